//! Assertion and trace helpers usable from inside a running suite case.
//!
//! [`Asserts`] is blanket-implemented for every `testkit_protocol::SuiteInstance`;
//! the `assert_*!` macros are the ergonomic entry point, expanding to a
//! call into `Asserts` followed by an early `return false` on failure —
//! the same "abort this case, not the process" behaviour the sandbox
//! reserves for actual faults.
#![warn(missing_docs)]

mod asserts;
#[macro_use]
mod macros;

pub use asserts::Asserts;

#[doc(hidden)]
pub use testkit_protocol;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testkit_protocol::{AssertKind, Event, EventSink, FaultKind, SrcInfo, SuiteInstance};

    use super::*;

    #[derive(Default)]
    struct Recorder {
        unary_failures: std::sync::Mutex<Vec<AssertKind>>,
        binary_failures: std::sync::Mutex<Vec<(AssertKind, String, String)>>,
        traces: std::sync::Mutex<Vec<String>>,
    }

    impl EventSink for Recorder {
        fn on_event(&self, _event: Event) {}
        fn on_trace(&self, _worker_idx: u32, _src: SrcInfo, message: String) {
            self.traces.lock().unwrap().push(message);
        }
        fn on_unary_assert_fail(&self, _worker_idx: u32, _src: SrcInfo, kind: AssertKind, _operand: &str) {
            self.unary_failures.lock().unwrap().push(kind);
        }
        fn on_binary_assert_fail(
            &self,
            _worker_idx: u32,
            _src: SrcInfo,
            kind: AssertKind,
            op_a: &str,
            op_b: &str,
        ) {
            self.binary_failures
                .lock()
                .unwrap()
                .push((kind, op_a.to_string(), op_b.to_string()));
        }
        fn on_runtime_error(&self, _worker_idx: u32, _fault: FaultKind) {}
    }

    struct Probe {
        sink: Arc<dyn EventSink>,
        worker_idx: u32,
    }

    impl SuiteInstance for Probe {
        fn sink(&self) -> &Arc<dyn EventSink> {
            &self.sink
        }
        fn worker_idx(&self) -> u32 {
            self.worker_idx
        }
        fn clear_sink(&mut self) {
            self.sink = Arc::new(testkit_protocol::NullSink);
        }
        fn as_any_mut(&mut self) -> &mut dyn std::any::Any {
            self
        }
    }

    impl Probe {
        fn new() -> Self {
            Self {
                sink: Arc::new(Recorder::default()),
                worker_idx: 0,
            }
        }

        fn passes(&mut self) -> bool {
            assert_true!(self, true);
            assert_are_equal!(self, 2 + 2, 4);
            trace!(self, "probe ran with {} == {}", 2 + 2, 4);
            true
        }

        fn fails_on_second_assertion(&mut self) -> bool {
            assert_true!(self, true);
            assert_are_equal!(self, 2 + 2, 5);
            unreachable!("assert_are_equal! should have returned false already");
        }
    }

    #[test]
    fn passing_assertions_report_nothing() {
        let mut probe = Probe::new();
        assert!(probe.passes());
    }

    #[test]
    fn failing_assertion_short_circuits_the_case() {
        let mut probe = Probe::new();
        assert!(!probe.fails_on_second_assertion());
    }
}
