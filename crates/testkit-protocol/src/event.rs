use testkit_clock::CodeTimer;

/// A single entry in the runner's totally-ordered-per-worker event stream.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind")]
pub enum EventKind {
    /// Emitted once on the control thread before any worker starts.
    RunnerStart {
        /// Number of worker threads spawned (0 means inline execution).
        max_workers: u32,
        /// Total suites selected for this run.
        total_suites: u32,
        /// Total cases across all selected suites.
        total_cases: u32,
    },
    /// Emitted once on the control thread after all workers have joined.
    RunnerFinish {
        /// Number of workers actually used (may be less than requested if
        /// spawning failed and the run fell back to the calling thread).
        used_workers: u32,
        /// Total suites selected for this run.
        total: u32,
        /// Suites that completed with every case passing.
        success: u32,
        /// Suites with at least one failed case, or that failed to
        /// construct.
        failed: u32,
    },
    /// A suite failed to construct; no cases of it ran.
    SuiteError {
        /// Worker that attempted construction.
        worker_idx: u32,
        /// Suite name.
        suite: String,
        /// Number of cases that were implicitly skipped.
        case_count: u32,
    },
    /// A worker is about to run a suite's cases.
    SuiteStart {
        /// Worker running this suite.
        worker_idx: u32,
        /// Suite name.
        suite: String,
        /// Number of cases in this suite.
        case_count: u32,
    },
    /// A worker finished running a suite's cases.
    SuiteFinish {
        /// Worker that ran this suite.
        worker_idx: u32,
        /// Suite name.
        suite: String,
        /// Number of cases this suite declared.
        total: u32,
        /// Cases that passed.
        success: u32,
        /// Cases that failed (assertion or fault).
        failed: u32,
        /// Suite-level timing.
        timer: CodeTimer,
    },
    /// A worker is about to invoke a case.
    CaseStart {
        /// Worker running this case.
        worker_idx: u32,
        /// Owning suite name.
        suite: String,
        /// Case name.
        case: String,
    },
    /// A worker finished invoking a case.
    CaseFinish {
        /// Worker that ran this case.
        worker_idx: u32,
        /// Owning suite name.
        suite: String,
        /// Case name.
        case: String,
        /// Whether the case passed.
        ok: bool,
        /// Case-level timing.
        timer: CodeTimer,
    },
}

/// An [`EventKind`] is the payload the runner hands to
/// [`crate::EventSink::on_event`]; this alias keeps call sites readable.
pub type Event = EventKind;
