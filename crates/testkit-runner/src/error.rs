use thiserror::Error;

/// Failures that prevent a run from starting at all.
///
/// Distinct from a case/suite failure (soft, recorded in the event stream)
/// and a sandboxed fault (recorded via `on_runtime_error`) — these abort
/// before any `Event` is emitted.
#[derive(Error, Debug)]
pub enum RunnerError {
    /// A [`crate::Runner`] is already executing in this process.
    #[error("a runner is already active in this process")]
    AlreadyRunning,
}
