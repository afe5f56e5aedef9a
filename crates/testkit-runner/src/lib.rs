//! Worker-pool scheduler that drives registered suites through
//! [`testkit_sandbox::Sandbox`] and reports progress through an
//! [`testkit_protocol::EventSink`].
//!
//! A [`Runner`] owns one run: `start` spawns (or, for `worker_count == 0`,
//! runs inline) the worker loop, `stop` asks every worker to wind down at
//! the next suite/case boundary, and `wait_termination` joins everything
//! and reports the final failed-suite count.
#![warn(missing_docs)]

mod error;
mod shared;
mod worker;

pub use error::RunnerError;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread::{self, JoinHandle};

use parking_lot::Mutex;
use testkit_clock::CodeTimer;
use testkit_protocol::{Event, EventSink, SuiteDescriptor};

use shared::{Shared, WorkerOutcome};

static RUNNER_ACTIVE: AtomicBool = AtomicBool::new(false);

struct WorkerSlot {
    index: u32,
    handle: JoinHandle<WorkerOutcome>,
}

/// One execution of a fixed set of suites across a fixed worker pool.
pub struct Runner {
    shared: Arc<Shared>,
    worker_handles: Vec<WorkerSlot>,
    inline_outcome: Option<WorkerOutcome>,
    execution_timer: Mutex<CodeTimer>,
    terminated: Mutex<Option<usize>>,
}

impl Runner {
    /// Start a run over `suites` with up to `worker_count` worker threads,
    /// reporting through `sink`.
    ///
    /// `worker_count` is clamped to `suites.len()`; `0` runs the entire
    /// workload on the calling thread before returning (no threads are
    /// spawned). Only one `Runner` may be active per process at a time —
    /// a second concurrent call returns
    /// [`RunnerError::AlreadyRunning`](error::RunnerError::AlreadyRunning)
    /// before emitting any event.
    pub fn start(
        suites: Vec<&'static dyn SuiteDescriptor>,
        worker_count: usize,
        sink: Arc<dyn EventSink>,
    ) -> Result<Runner, RunnerError> {
        if RUNNER_ACTIVE
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Err(RunnerError::AlreadyRunning);
        }

        let worker_count = worker_count.min(suites.len());
        let total_suites = suites.len() as u32;
        let total_cases: u32 = suites.iter().map(|s| s.case_count() as u32).sum();

        let mut execution_timer = CodeTimer::new();
        execution_timer
            .start()
            .expect("a freshly created timer is never already running");

        testkit_sandbox::init_fault_interception();

        let shared = Arc::new(Shared {
            suites,
            sink: sink.clone(),
            next_suite_idx: AtomicUsize::new(0),
            failed_count: AtomicUsize::new(0),
            stop_requested: Arc::new(AtomicBool::new(false)),
        });

        sink.on_event(Event::RunnerStart {
            max_workers: worker_count as u32,
            total_suites,
            total_cases,
        });

        let mut worker_handles = Vec::with_capacity(worker_count);
        let mut inline_outcome = None;

        if worker_count == 0 {
            inline_outcome = Some(worker::worker_loop(0, &shared));
        } else {
            for idx in 0..worker_count {
                let worker_shared = shared.clone();
                let spawned = thread::Builder::new()
                    .name(format!("testkit-worker-{idx}"))
                    .spawn(move || worker::worker_loop(idx as u32, &worker_shared));
                match spawned {
                    Ok(handle) => worker_handles.push(WorkerSlot {
                        index: idx as u32,
                        handle,
                    }),
                    Err(err) => {
                        tracing::warn!(
                            worker = idx,
                            error = %err,
                            "testkit-runner: failed to spawn worker thread"
                        );
                    }
                }
            }
            if worker_handles.is_empty() {
                tracing::warn!(
                    "testkit-runner: every worker spawn failed; falling back to inline execution"
                );
                inline_outcome = Some(worker::worker_loop(0, &shared));
            }
        }

        Ok(Runner {
            shared,
            worker_handles,
            inline_outcome,
            execution_timer: Mutex::new(execution_timer),
            terminated: Mutex::new(None),
        })
    }

    /// Ask every worker to stop at its next suite/case boundary.
    ///
    /// A cooperative signal, not an error — safe to call from any thread,
    /// including a Unix signal handler (a plain atomic store is
    /// async-signal-safe). Idempotent.
    pub fn stop(&self) {
        self.shared.stop_requested.store(true, Ordering::Relaxed);
    }

    /// A handle to this run's stop flag, for wiring up external
    /// cancellation sources (e.g. `testkit-cli`'s signal handler) without
    /// borrowing the `Runner` itself.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.shared.stop_requested.clone()
    }

    /// Join every worker, tear down fault interception, and report the
    /// number of failed suites.
    ///
    /// Idempotent: a second call returns the same count without rejoining
    /// already-drained handles.
    pub fn wait_termination(&mut self) -> usize {
        let mut cached = self.terminated.lock();
        if let Some(count) = *cached {
            return count;
        }

        let used_workers = self.worker_handles.len() as u32;
        let mut success = 0u32;

        if let Some(outcome) = self.inline_outcome.take() {
            success += outcome.success;
        }

        for slot in self.worker_handles.drain(..) {
            match slot.handle.join() {
                Ok(outcome) => {
                    success += outcome.success;
                }
                Err(_) => {
                    tracing::error!(
                        worker = slot.index,
                        "testkit-runner: worker thread panicked outside the sandbox"
                    );
                    self.shared.failed_count.fetch_add(1, Ordering::Relaxed);
                }
            }
        }

        testkit_sandbox::shutdown_fault_interception();
        self.execution_timer.lock().stop();

        let failed = self.shared.failed_count.load(Ordering::Relaxed) as u32;
        let total = self.shared.suites.len() as u32;
        self.shared.sink.on_event(Event::RunnerFinish {
            used_workers,
            total,
            success,
            failed,
        });

        RUNNER_ACTIVE.store(false, Ordering::SeqCst);
        let count = failed as usize;
        *cached = Some(count);
        count
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex as StdMutex;

    use testkit_protocol::{AssertKind, EventKind, FaultKind, SrcInfo};
    use testkit_registry::{UserSuite, test_suite};

    use super::*;

    // `RUNNER_ACTIVE` is process-wide; serialize the tests that start a
    // `Runner` so they don't race each other under a parallel test runner.
    static TEST_SERIAL: Mutex<()> = Mutex::new(());

    #[derive(Default)]
    struct Recorder {
        events: StdMutex<Vec<EventKind>>,
    }

    impl EventSink for Recorder {
        fn on_event(&self, event: Event) {
            self.events.lock().unwrap().push(event);
        }
        fn on_trace(&self, _worker_idx: u32, _src: SrcInfo, _message: String) {}
        fn on_unary_assert_fail(&self, _worker_idx: u32, _src: SrcInfo, _kind: AssertKind, _operand: &str) {}
        fn on_binary_assert_fail(
            &self,
            _worker_idx: u32,
            _src: SrcInfo,
            _kind: AssertKind,
            _op_a: &str,
            _op_b: &str,
        ) {
        }
        fn on_runtime_error(&self, _worker_idx: u32, _fault: FaultKind) {}
    }

    struct Calm;

    impl UserSuite for Calm {
        fn new() -> Self {
            Calm
        }
    }

    impl Calm {
        fn passes(&mut self) -> bool {
            true
        }

        fn fails(&mut self) -> bool {
            false
        }
    }

    test_suite!(Calm => "calm" { passes, fails });

    fn calm_suite() -> &'static dyn SuiteDescriptor {
        testkit_registry::Registry::global()
            .suites()
            .iter()
            .copied()
            .find(|s| s.name() == "calm")
            .expect("calm suite registered")
    }

    #[test]
    fn happy_path_runs_all_cases_and_reports_one_failed_suite() {
        let _guard = TEST_SERIAL.lock();
        let sink = Arc::new(Recorder::default());
        let suites = vec![calm_suite()];
        let mut runner = Runner::start(suites, 1, sink.clone() as Arc<dyn EventSink>).unwrap();
        let failed = runner.wait_termination();
        assert_eq!(failed, 1);

        let events = sink.events.lock().unwrap();
        assert!(matches!(events.first(), Some(EventKind::RunnerStart { .. })));
        assert!(matches!(events.last(), Some(EventKind::RunnerFinish { .. })));
        let case_starts = events.iter().filter(|e| matches!(e, EventKind::CaseStart { .. })).count();
        let case_finishes = events.iter().filter(|e| matches!(e, EventKind::CaseFinish { .. })).count();
        assert_eq!(case_starts, 2);
        assert_eq!(case_finishes, 2);
    }

    #[test]
    fn inline_worker_count_zero_runs_on_the_calling_thread() {
        let _guard = TEST_SERIAL.lock();
        let sink: Arc<dyn EventSink> = Arc::new(Recorder::default());
        let suites = vec![calm_suite()];
        let mut runner = Runner::start(suites, 0, sink).unwrap();
        assert!(runner.worker_handles.is_empty());
        runner.wait_termination();
    }

    #[test]
    fn wait_termination_is_idempotent() {
        let _guard = TEST_SERIAL.lock();
        let sink: Arc<dyn EventSink> = Arc::new(Recorder::default());
        let suites = vec![calm_suite()];
        let mut runner = Runner::start(suites, 1, sink).unwrap();
        let first = runner.wait_termination();
        let second = runner.wait_termination();
        assert_eq!(first, second);
    }

    #[test]
    fn a_second_concurrent_runner_is_rejected() {
        let _guard = TEST_SERIAL.lock();
        let sink: Arc<dyn EventSink> = Arc::new(Recorder::default());
        let suites = vec![calm_suite()];
        let mut first = Runner::start(suites.clone(), 1, sink.clone()).unwrap();

        let second = Runner::start(suites, 1, sink);
        assert!(matches!(second, Err(RunnerError::AlreadyRunning)));

        first.wait_termination();
    }

    #[test]
    fn stop_before_any_suite_runs_leaves_everything_unstarted() {
        let _guard = TEST_SERIAL.lock();
        let sink = Arc::new(Recorder::default());
        let suites = vec![calm_suite()];
        let mut runner = Runner::start(suites, 1, sink.clone() as Arc<dyn EventSink>).unwrap();
        runner.stop();
        runner.wait_termination();

        let events = sink.events.lock().unwrap();
        let suite_starts = events.iter().filter(|e| matches!(e, EventKind::SuiteStart { .. })).count();
        assert_eq!(suite_starts, 0);
    }
}
