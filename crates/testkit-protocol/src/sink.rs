use crate::{AssertKind, Event, FaultKind, SrcInfo};

/// Thread-safe consumer of the runner's structured output.
///
/// `on_event` carries lifecycle events; the other four callbacks carry
/// per-case diagnostics emitted while a case's guarded block is running.
/// Implementations must tolerate concurrent calls from different workers —
/// the runner never reenters a single sink from the *same* worker, but
/// distinct workers call it in parallel.
pub trait EventSink: Send + Sync {
    /// Record a lifecycle event.
    fn on_event(&self, event: Event);

    /// Record a formatted trace message from a running case.
    fn on_trace(&self, worker_idx: u32, src: SrcInfo, message: String);

    /// Record a failed single-operand assertion.
    fn on_unary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, operand: &str);

    /// Record a failed two-operand assertion.
    fn on_binary_assert_fail(
        &self,
        worker_idx: u32,
        src: SrcInfo,
        kind: AssertKind,
        op_a: &str,
        op_b: &str,
    );

    /// Record a fault intercepted by the sandbox.
    fn on_runtime_error(&self, worker_idx: u32, fault: FaultKind);
}

/// An [`EventSink`] that discards everything.
///
/// Used as the sink for a [`crate::SuiteInstance`] once its owning sandbox
/// has begun tearing the instance down, so that trace/assertion calls made
/// from a `Drop` impl never reach the real sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl EventSink for NullSink {
    fn on_event(&self, _event: Event) {}
    fn on_trace(&self, _worker_idx: u32, _src: SrcInfo, _message: String) {}
    fn on_unary_assert_fail(
        &self,
        _worker_idx: u32,
        _src: SrcInfo,
        _kind: AssertKind,
        _operand: &str,
    ) {
    }
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
