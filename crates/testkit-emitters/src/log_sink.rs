use std::io::Write;
use std::sync::Arc;

use testkit_clock::CodeTimer;
use testkit_protocol::{AssertKind, Event, EventSink, FaultKind, SrcInfo};

use crate::buffer::WorkerBuffers;

fn format_timer(timer: &CodeTimer) -> String {
    format!(
        "real={}ns proc_cpu={}ns thread_cpu={}ns",
        timer.elapsed_real_ns(),
        timer.elapsed_process_cpu_ns(),
        timer.elapsed_thread_cpu_ns()
    )
}

/// Human-readable text output, the default `testkit-cli` format.
///
/// Control-thread events (`RunnerStart`/`RunnerFinish`) write straight
/// through; everything else accumulates per worker and flushes whole at
/// `CaseFinish`/`SuiteFinish`, so concurrent workers never interleave
/// mid-line.
pub struct LogSink {
    buffers: WorkerBuffers,
    verbose: bool,
    stats: bool,
}

impl LogSink {
    /// Build a sink writing to `out`. `stats` appends `CodeTimer` readings
    /// to case/suite/run summary lines.
    pub fn new(out: Box<dyn Write + Send>, verbose: bool, stats: bool) -> Self {
        Self {
            buffers: WorkerBuffers::new(out),
            verbose,
            stats,
        }
    }

    /// Build an `Arc<dyn EventSink>` writing to `out`.
    pub fn boxed(out: Box<dyn Write + Send>, verbose: bool, stats: bool) -> Arc<dyn EventSink> {
        Arc::new(Self::new(out, verbose, stats))
    }
}

impl EventSink for LogSink {
    fn on_event(&self, event: Event) {
        match event {
            Event::RunnerStart {
                max_workers,
                total_suites,
                total_cases,
            } => {
                if self.verbose {
                    self.buffers.write_direct(&format!(
                        "running {total_suites} suite(s), {total_cases} case(s) using {max_workers} worker(s)...\n"
                    ));
                }
            }
            Event::RunnerFinish {
                used_workers,
                total,
                success,
                failed,
            } => {
                let mut line = if success + failed < total {
                    format!(
                        "run interrupted: {success} passed, {failed} failed, {} not run (of {total})\n",
                        total - success - failed
                    )
                } else if failed > 0 {
                    format!("run finished: {failed} of {total} suite(s) failed\n")
                } else {
                    format!("run finished: all {total} suite(s) passed\n")
                };
                if self.stats {
                    line.push_str(&format!("used {used_workers} worker(s)\n"));
                }
                self.buffers.write_direct(&line);
            }
            Event::SuiteError {
                worker_idx,
                suite,
                case_count,
            } => {
                self.buffers.push(
                    worker_idx,
                    &format!("suite '{suite}' failed to construct; {case_count} case(s) skipped\n"),
                );
                self.buffers.flush(worker_idx);
            }
            Event::SuiteStart {
                worker_idx,
                suite,
                case_count,
            } => {
                if self.verbose {
                    self.buffers.push(worker_idx, &format!("--- suite '{suite}' ({case_count} cases) ---\n"));
                }
            }
            Event::SuiteFinish {
                worker_idx,
                suite,
                total,
                success,
                failed,
                timer,
            } => {
                let mut line = if failed > 0 {
                    format!("suite '{suite}': {success}/{total} passed, {failed} failed")
                } else {
                    format!("suite '{suite}': {success}/{total} passed")
                };
                if self.stats {
                    line.push_str(&format!(" ({})", format_timer(&timer)));
                }
                line.push('\n');
                self.buffers.push(worker_idx, &line);
                self.buffers.flush(worker_idx);
            }
            Event::CaseStart { worker_idx, suite, case } => {
                if self.verbose {
                    self.buffers.push(worker_idx, &format!("case '{suite}::{case}'...\n"));
                }
            }
            Event::CaseFinish {
                worker_idx,
                suite,
                case,
                ok,
                timer,
            } => {
                let status = if ok { "ok" } else { "FAILED" };
                let mut line = format!("{suite}::{case}: {status}");
                if self.stats {
                    line.push_str(&format!(" ({})", format_timer(&timer)));
                }
                line.push('\n');
                self.buffers.push(worker_idx, &line);
                self.buffers.flush(worker_idx);
            }
        }
    }

    fn on_trace(&self, worker_idx: u32, src: SrcInfo, message: String) {
        if self.verbose {
            self.buffers
                .push(worker_idx, &format!("  [{}:{} {}] {message}\n", src.file, src.line, src.function));
        }
    }

    fn on_unary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, operand: &str) {
        if self.verbose {
            self.buffers.push(
                worker_idx,
                &format!("  [{}:{} {}] assert {kind}: {operand}\n", src.file, src.line, src.function),
            );
        }
    }

    fn on_binary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, op_a: &str, op_b: &str) {
        if self.verbose {
            self.buffers.push(
                worker_idx,
                &format!(
                    "  [{}:{} {}] assert {kind}: {op_a} / {op_b}\n",
                    src.file, src.line, src.function
                ),
            );
        }
    }

    fn on_runtime_error(&self, worker_idx: u32, fault: FaultKind) {
        self.buffers.push(worker_idx, &format!("  runtime error: {fault}\n"));
    }
}
