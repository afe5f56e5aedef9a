use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use testkit_protocol::{CaseDescriptor, EventSink, NullSink, SuiteDescriptor, SuiteInstance};

/// State a suite's author owns: a default constructor plus optional
/// per-execution fixture hooks.
///
/// Implemented by hand on the struct passed to [`crate::test_suite!`]; the
/// macro never generates this impl, only the descriptor wrapping it.
pub trait UserSuite: Send + 'static {
    /// Build a fresh instance for one suite execution.
    fn new() -> Self;

    /// Run once before any case in this execution.
    fn setup_fixture(&mut self) {}

    /// Run once after every case in this execution, including after a
    /// faulted case.
    fn teardown_fixture(&mut self) {}
}

/// Binds a [`UserSuite`]'s plain state to the sink/worker metadata
/// [`SuiteInstance`] requires, so suite authors never see either.
pub struct SuiteWrapper<S> {
    /// The suite author's own state.
    pub inner: S,
    sink: Arc<dyn EventSink>,
    worker_idx: u32,
}

impl<S: UserSuite> SuiteInstance for SuiteWrapper<S> {
    fn setup_fixture(&mut self) {
        self.inner.setup_fixture();
    }

    fn teardown_fixture(&mut self) {
        self.inner.teardown_fixture();
    }

    fn sink(&self) -> &Arc<dyn EventSink> {
        &self.sink
    }

    fn worker_idx(&self) -> u32 {
        self.worker_idx
    }

    fn clear_sink(&mut self) {
        self.sink = Arc::new(NullSink);
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A single case method, bound to its owning suite type.
///
/// One of these is built per entry in a [`crate::test_suite!`] case list;
/// `invoke` downcasts back to the concrete [`SuiteWrapper<S>`] to call `f`.
pub struct MethodCase<S> {
    /// The case's declared name.
    pub name: &'static str,
    /// The case method itself.
    pub f: fn(&mut S) -> bool,
}

impl<S: UserSuite> CaseDescriptor for MethodCase<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn invoke(&self, instance: &mut dyn SuiteInstance) -> bool {
        let wrapper = instance
            .as_any_mut()
            .downcast_mut::<SuiteWrapper<S>>()
            .expect("case invoked against an instance of a different suite type");
        (self.f)(&mut wrapper.inner)
    }
}

/// The [`SuiteDescriptor`] the [`crate::test_suite!`] macro instantiates,
/// generic over the suite's own state type.
pub struct TypedSuiteDescriptor<S> {
    name: &'static str,
    cases: &'static [&'static dyn CaseDescriptor],
    _marker: PhantomData<fn() -> S>,
}

impl<S> TypedSuiteDescriptor<S> {
    /// Build a descriptor from a display name and a case list.
    ///
    /// `const fn` so [`crate::test_suite!`] can use it to initialize a
    /// `static`.
    pub const fn new(name: &'static str, cases: &'static [&'static dyn CaseDescriptor]) -> Self {
        Self {
            name,
            cases,
            _marker: PhantomData,
        }
    }
}

impl<S: UserSuite> SuiteDescriptor for TypedSuiteDescriptor<S> {
    fn name(&self) -> &'static str {
        self.name
    }

    fn cases(&self) -> &'static [&'static dyn CaseDescriptor] {
        self.cases
    }

    fn instantiate(&self, sink: Arc<dyn EventSink>, worker_idx: u32) -> Option<Box<dyn SuiteInstance>> {
        Some(Box::new(SuiteWrapper {
            inner: S::new(),
            sink,
            worker_idx,
        }))
    }
}
