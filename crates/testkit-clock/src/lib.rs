//! Monotonic clocks and the triple-clock [`CodeTimer`].
//!
//! Three clock sources are exposed through [`ClockSource`]:
//! - [`ClockSource::Real`]: wall-clock monotonic time, unaffected by clock
//!   adjustments (`std::time::Instant`).
//! - [`ClockSource::ProcessCpu`]: total CPU time consumed by this process.
//! - [`ClockSource::ThreadCpu`]: CPU time consumed by the calling thread.
//!
//! Each reading is nanoseconds from an unspecified but fixed origin; only
//! differences between two readings of the same source are meaningful.
//! [`CodeTimer`] snapshots all three at `start()` and subtracts at `stop()`,
//! clamping negative deltas (possible under thread-CPU rollback on
//! migration) to zero.
#![warn(missing_docs)]

mod source;
mod timer;

pub use source::{ClockSource, now_ns};
pub use timer::{CodeTimer, CodeTimerError};
