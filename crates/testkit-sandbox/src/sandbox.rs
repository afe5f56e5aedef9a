use std::sync::Arc;

use testkit_protocol::{CaseDescriptor, EventSink, FaultKind, SuiteDescriptor, SuiteInstance};

use crate::tls;

/// Runs suite construction, fixture, case, and destruction closures inside
/// a guarded block, converting hardware traps and Rust panics into
/// [`FaultKind`] reports instead of letting them take down the worker.
///
/// One `Sandbox` per worker thread. Cheap to construct; holds only the
/// sink and worker index needed to report faults.
pub struct Sandbox {
    sink: Arc<dyn EventSink>,
    worker_idx: u32,
}

impl Sandbox {
    /// Bind a sandbox to a worker's sink and index.
    pub fn new(sink: Arc<dyn EventSink>, worker_idx: u32) -> Self {
        Self { sink, worker_idx }
    }

    /// Run `f` under the recovery protocol, yielding its result on success
    /// or the classified fault on a hardware trap or panic.
    ///
    /// Panics if called while another guarded block is already active on
    /// this thread — guarded blocks never nest.
    pub fn guarded<T>(&self, f: impl FnOnce() -> T) -> Result<T, FaultKind> {
        tls::enter_guard();
        let result = run_with_recovery(f);
        tls::leave_guard();
        result
    }

    /// Construct a suite instance. A fault during construction is reported
    /// and yields `None`; the runner treats this identically to the suite
    /// declaring zero passing cases.
    pub fn run_construction(&self, descriptor: &dyn SuiteDescriptor, sink: Arc<dyn EventSink>, worker_idx: u32) -> Option<Box<dyn SuiteInstance>> {
        match self.guarded(move || descriptor.instantiate(sink, worker_idx)) {
            Ok(instance) => instance,
            Err(fault) => {
                self.sink.on_runtime_error(self.worker_idx, fault);
                None
            }
        }
    }

    /// Run `setup_fixture`, reporting and swallowing any fault.
    pub fn run_setup(&self, instance: &mut dyn SuiteInstance) -> bool {
        match self.guarded(|| instance.setup_fixture()) {
            Ok(()) => true,
            Err(fault) => {
                self.sink.on_runtime_error(self.worker_idx, fault);
                false
            }
        }
    }

    /// Invoke one case, reporting and swallowing any fault.
    pub fn run_case(&self, case: &dyn CaseDescriptor, instance: &mut dyn SuiteInstance) -> bool {
        match self.guarded(|| case.invoke(instance)) {
            Ok(ok) => ok,
            Err(fault) => {
                self.sink.on_runtime_error(self.worker_idx, fault);
                false
            }
        }
    }

    /// Run `teardown_fixture`, reporting and swallowing any fault.
    pub fn run_teardown(&self, instance: &mut dyn SuiteInstance) -> bool {
        match self.guarded(|| instance.teardown_fixture()) {
            Ok(()) => true,
            Err(fault) => {
                self.sink.on_runtime_error(self.worker_idx, fault);
                false
            }
        }
    }

    /// Clear the instance's sink and drop it under guard. A fault here is
    /// reported but never changes an already-recorded case outcome.
    pub fn run_drop(&self, mut instance: Box<dyn SuiteInstance>) {
        instance.clear_sink();
        if let Err(fault) = self.guarded(move || drop(instance)) {
            self.sink.on_runtime_error(self.worker_idx, fault);
        }
    }
}

#[cfg(all(unix, target_arch = "x86_64"))]
fn run_with_recovery<T>(f: impl FnOnce() -> T) -> Result<T, FaultKind> {
    use std::panic::AssertUnwindSafe;

    use crate::jumpbuf::sandbox_setjmp;
    use crate::signal::classify;

    tls::ensure_alt_stack_installed();
    let buf = tls::recovery_buf_ptr();
    // SAFETY: `buf` is this thread's own recovery point; nothing between
    // here and the matching longjmp touches it from another thread.
    let rc = unsafe { sandbox_setjmp(buf) };
    if rc != 0 {
        let raw = tls::take_signal_fault();
        return Err(classify(raw));
    }
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(_) => Err(tls::take_panic_fault().unwrap_or(FaultKind::UndefinedException)),
    }
}

#[cfg(not(all(unix, target_arch = "x86_64")))]
fn run_with_recovery<T>(f: impl FnOnce() -> T) -> Result<T, FaultKind> {
    use std::panic::AssertUnwindSafe;

    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(value) => Ok(value),
        Err(_) => Err(tls::take_panic_fault().unwrap_or(FaultKind::UndefinedException)),
    }
}
