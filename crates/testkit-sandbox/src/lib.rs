//! Fault-isolated execution of suite construction, fixtures, and cases.
//!
//! [`init_fault_interception`]/[`shutdown_fault_interception`] install and
//! remove the process-wide panic hook and (on `x86_64`/unix) the
//! `SIGSEGV`/`SIGBUS`/`SIGILL`/`SIGFPE`/`SIGSYS`/`SIGPIPE`/`SIGXFSZ`
//! handlers; both are reference-counted so nested `Runner` lifetimes in
//! the same process compose correctly. [`Sandbox`] is the per-worker
//! handle that runs a closure under the recovery protocol and reports any
//! fault through the bound [`testkit_protocol::EventSink`].
//!
//! On architectures other than `x86_64`, hardware faults are not caught —
//! `init_fault_interception` logs a warning and the sandbox falls back to
//! catching Rust panics only.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod handler;
mod jumpbuf;
mod lifecycle;
mod sandbox;
mod signal;
mod tls;

pub use lifecycle::{init_fault_interception, shutdown_fault_interception};
pub use sandbox::Sandbox;

#[cfg(all(unix, target_arch = "x86_64"))]
#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testkit_protocol::NullSink;

    use super::*;

    #[test]
    fn guarded_returns_ok_on_plain_completion() {
        let sandbox = Sandbox::new(Arc::new(NullSink), 0);
        assert_eq!(sandbox.guarded(|| 1 + 1), Ok(2));
    }

    #[test]
    fn guarded_catches_a_panic_with_string_payload() {
        init_fault_interception();
        let sandbox = Sandbox::new(Arc::new(NullSink), 0);
        let result = sandbox.guarded(|| -> i32 { panic!("boom") });
        shutdown_fault_interception();
        assert!(matches!(result, Err(testkit_protocol::FaultKind::TypedException(ref s)) if s == "boom"));
    }

    #[test]
    fn nested_guarded_blocks_are_reported_as_a_fault_not_a_crash() {
        let sandbox = Sandbox::new(Arc::new(NullSink), 0);
        // The inner `guarded` call's reentrancy panic unwinds into the
        // outer call's own `catch_unwind`, so it surfaces as an ordinary
        // caught fault rather than tearing down the thread.
        let result = sandbox.guarded(|| {
            let _ = sandbox.guarded(|| ());
        });
        assert!(result.is_err());
    }

    #[test]
    fn init_shutdown_is_refcounted() {
        init_fault_interception();
        init_fault_interception();
        shutdown_fault_interception();
        shutdown_fault_interception();
    }
}
