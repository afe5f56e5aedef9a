use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize};

use testkit_protocol::{EventSink, SuiteDescriptor};

/// State every worker thread needs a handle to.
///
/// `Runner` holds this behind an `Arc` so worker threads, spawned
/// non-scoped (their handles outlive the call to `start`), can share it
/// without borrowing from `Runner` itself.
pub(crate) struct Shared {
    pub(crate) suites: Vec<&'static dyn SuiteDescriptor>,
    pub(crate) sink: Arc<dyn EventSink>,
    pub(crate) next_suite_idx: AtomicUsize,
    pub(crate) failed_count: AtomicUsize,
    pub(crate) stop_requested: Arc<AtomicBool>,
}

/// What one worker thread contributes to the run's final tally.
///
/// Only `success` is carried back this way — a failed suite is already
/// counted in `Shared::failed_count` at the point it fails, so summing it
/// again here would double-count.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct WorkerOutcome {
    pub(crate) success: u32,
}
