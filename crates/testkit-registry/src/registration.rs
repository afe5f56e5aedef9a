use std::sync::atomic::{AtomicU32, Ordering};

use testkit_protocol::SuiteDescriptor;

/// One `inventory`-submitted suite, tagged with the order in which its
/// ctor ran relative to every other submitted suite in this process.
///
/// `inventory` makes no promise about iteration order, so `suites()` sorts
/// on `seq` to recover a deterministic order. Construction order
/// approximates declaration order within a single compilation unit; across
/// units it tracks link order, same as the registration discipline it
/// replaces.
pub struct SuiteRegistration {
    seq: u32,
    desc: &'static dyn SuiteDescriptor,
}

impl SuiteRegistration {
    /// Wrap `desc`, stamping it with the next global sequence number.
    ///
    /// Called once per suite, from the ctor the [`crate::test_suite!`]
    /// macro's `inventory::submit!` generates — never by user code.
    pub fn new(desc: &'static dyn SuiteDescriptor) -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(0);
        Self {
            seq: NEXT.fetch_add(1, Ordering::Relaxed),
            desc,
        }
    }

    pub(crate) fn seq(&self) -> u32 {
        self.seq
    }

    pub(crate) fn desc(&self) -> &'static dyn SuiteDescriptor {
        self.desc
    }
}
