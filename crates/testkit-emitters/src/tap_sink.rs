use std::collections::HashMap;
use std::io::Write;
use std::sync::Arc;

use parking_lot::Mutex;
use testkit_protocol::{AssertKind, Event, EventSink, FaultKind, SrcInfo};

use crate::buffer::WorkerBuffers;

/// Test Anything Protocol output: a `1..N` plan header, one `ok`/`not ok`
/// line per case, and `#` diagnostic lines for traces and failures.
///
/// Diagnostics pushed between a case's `CaseStart` and `CaseFinish` are
/// held separately from the status line so they print *after* it — the
/// order TAP consumers expect — rather than interleaved by arrival order.
pub struct TapSink {
    buffers: WorkerBuffers,
    diagnostics: Mutex<HashMap<u32, Vec<String>>>,
    verbose: bool,
}

impl TapSink {
    /// Build a sink writing to `out`. `verbose` enables `#` diagnostic
    /// lines for traces, assertion failures, and runtime faults.
    pub fn new(out: Box<dyn Write + Send>, verbose: bool) -> Self {
        Self {
            buffers: WorkerBuffers::new(out),
            diagnostics: Mutex::new(HashMap::new()),
            verbose,
        }
    }

    /// Build an `Arc<dyn EventSink>` writing to `out`.
    pub fn boxed(out: Box<dyn Write + Send>, verbose: bool) -> Arc<dyn EventSink> {
        Arc::new(Self::new(out, verbose))
    }

    fn push_diagnostic(&self, worker_idx: u32, line: String) {
        if !self.verbose {
            return;
        }
        self.diagnostics.lock().entry(worker_idx).or_default().push(line);
    }

    /// Move `worker_idx`'s accumulated diagnostics into its pending output
    /// buffer, after whatever status line is already there. Does not flush
    /// — callers flush once, together with the status line, so the two
    /// reach the shared writer in a single lock acquisition.
    fn queue_diagnostics(&self, worker_idx: u32) {
        let lines = self.diagnostics.lock().remove(&worker_idx).unwrap_or_default();
        if lines.is_empty() {
            return;
        }
        let mut text = String::new();
        for line in lines {
            text.push_str("# ");
            text.push_str(&line);
            text.push('\n');
        }
        self.buffers.push(worker_idx, &text);
    }
}

impl EventSink for TapSink {
    fn on_event(&self, event: Event) {
        match event {
            Event::RunnerStart {
                max_workers,
                total_suites,
                total_cases,
            } => {
                let mut header = format!("1..{total_cases}\n");
                if self.verbose {
                    header.push_str(&format!("# {total_suites} suite(s) using {max_workers} worker(s)\n"));
                }
                self.buffers.write_direct(&header);
            }
            Event::RunnerFinish { .. } => {}
            Event::SuiteError {
                worker_idx: _,
                suite,
                case_count,
            } => {
                let mut text = String::new();
                for _ in 0..case_count {
                    text.push_str(&format!("not ok - [{suite}] suite failed to construct\n"));
                }
                self.buffers.write_direct(&text);
            }
            Event::SuiteStart { .. } => {}
            Event::SuiteFinish { worker_idx, .. } => {
                // Picks up diagnostics from a fault during suite
                // construction teardown (`Drop`), which arrives after the
                // last case's own `CaseFinish`.
                self.queue_diagnostics(worker_idx);
                self.buffers.flush(worker_idx);
            }
            Event::CaseStart { .. } => {}
            Event::CaseFinish {
                worker_idx,
                suite,
                case,
                ok,
                ..
            } => {
                let status = if ok { "ok" } else { "not ok" };
                self.buffers.push(worker_idx, &format!("{status} - [{suite}::{case}]\n"));
                self.queue_diagnostics(worker_idx);
                self.buffers.flush(worker_idx);
            }
        }
    }

    fn on_trace(&self, worker_idx: u32, src: SrcInfo, message: String) {
        self.push_diagnostic(worker_idx, format!("[{}:{} {}] {message}", src.file, src.line, src.function));
    }

    fn on_unary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, operand: &str) {
        self.push_diagnostic(
            worker_idx,
            format!("[{}:{} {}] assert {kind}: {operand}", src.file, src.line, src.function),
        );
    }

    fn on_binary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, op_a: &str, op_b: &str) {
        self.push_diagnostic(
            worker_idx,
            format!(
                "[{}:{} {}] assert {kind}: {op_a} / {op_b}",
                src.file, src.line, src.function
            ),
        );
    }

    fn on_runtime_error(&self, worker_idx: u32, fault: FaultKind) {
        self.push_diagnostic(worker_idx, format!("runtime error: {fault}"));
    }
}
