//! Shared contracts between the runner, sandbox, assertion helpers, and
//! output emitters: the [`Event`] stream, [`FaultKind`], [`AssertKind`], and
//! the [`EventSink`]/[`SuiteDescriptor`]/[`CaseDescriptor`]/[`SuiteInstance`]
//! trait objects that tie static registration to runtime execution.
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod assert_kind;
mod descriptor;
mod event;
mod fault_kind;
mod sink;
mod src_info;

pub use assert_kind::AssertKind;
pub use descriptor::{CaseDescriptor, SuiteDescriptor, SuiteInstance};
pub use event::{Event, EventKind};
pub use fault_kind::FaultKind;
pub use sink::{EventSink, NullSink};
pub use src_info::SrcInfo;
