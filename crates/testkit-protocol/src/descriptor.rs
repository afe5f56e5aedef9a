use std::any::Any;
use std::sync::Arc;

use crate::EventSink;

/// A single boolean-returning test function, plus its declared name.
///
/// Implementations are generated by the `test_case!` macro in
/// `testkit-registry`; user code never implements this trait by hand.
pub trait CaseDescriptor: Send + Sync {
    /// The case's declared name, as given to `test_case!`.
    fn name(&self) -> &'static str;

    /// Invoke the case against a live suite instance.
    ///
    /// Returns `true` on pass, `false` on soft failure (an assertion or an
    /// explicit early return). Never called directly by user code — the
    /// sandbox wraps every call in a guarded block.
    fn invoke(&self, instance: &mut dyn SuiteInstance) -> bool;
}

/// A named collection of cases sharing a fixture lifecycle.
///
/// Implementations are generated by the `test_suite!` macro; user code
/// never implements this trait by hand.
pub trait SuiteDescriptor: Send + Sync {
    /// The suite's declared name, as given to `test_suite!`.
    fn name(&self) -> &'static str;

    /// Number of cases registered to this suite.
    fn case_count(&self) -> usize {
        self.cases().len()
    }

    /// This suite's cases, in declaration order.
    fn cases(&self) -> &'static [&'static dyn CaseDescriptor];

    /// Construct a fresh instance for one suite execution.
    ///
    /// `sink`/`worker_idx` are stashed on the instance so `Asserts`/`trace!`
    /// calls from within cases can reach the event stream. Returns `None`
    /// only if construction is fundamentally impossible (reserved for
    /// future use; the generated implementation always returns `Some` — a
    /// panicking constructor is caught by the sandbox's guarded block around
    /// this call, not by this method returning `None`).
    fn instantiate(&self, sink: Arc<dyn EventSink>, worker_idx: u32) -> Option<Box<dyn SuiteInstance>>;
}

/// State-carrying object exposed to a suite's cases for the duration of one
/// suite execution.
///
/// Bound to exactly one worker. `setup_fixture`/`teardown_fixture` run
/// around each case and both default to doing nothing, making them
/// optional fixture hooks.
pub trait SuiteInstance: Send + Any {
    /// Run before every case in this suite execution.
    fn setup_fixture(&mut self) {}

    /// Run after every case in this suite execution, even if the case or
    /// its setup faulted.
    fn teardown_fixture(&mut self) {}

    /// The sink bound to this instance, used by `Asserts`/`trace!`.
    fn sink(&self) -> &Arc<dyn EventSink>;

    /// The worker index this instance is bound to.
    fn worker_idx(&self) -> u32;

    /// Replace the bound sink with a no-op sink.
    ///
    /// Called by the sandbox immediately before the instance is dropped, so
    /// that a `Drop` impl cannot surface trace/assertion calls on the wire.
    fn clear_sink(&mut self);

    /// Downcasting hook so a generic [`CaseDescriptor`] can recover the
    /// concrete instance type it was generated for.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}
