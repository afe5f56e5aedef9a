use std::sync::OnceLock;

use testkit_protocol::{CaseDescriptor, SuiteDescriptor};

use crate::SuiteRegistration;

/// Read-only view over every suite submitted via [`crate::test_suite!`] in
/// this process.
///
/// There is exactly one `Registry`, reachable through [`Registry::global`];
/// it has no mutable state of its own; it is a typed window onto
/// `inventory`'s submissions, materialized and sorted once.
pub struct Registry {
    suites: &'static [&'static dyn SuiteDescriptor],
}

impl Registry {
    /// The process-wide registry.
    ///
    /// Suites are gathered from `inventory` and sorted by registration
    /// sequence on first access; later calls return the same slice.
    pub fn global() -> &'static Self {
        static REGISTRY: OnceLock<Registry> = OnceLock::new();
        REGISTRY.get_or_init(|| {
            let mut entries: Vec<&SuiteRegistration> = inventory::iter::<SuiteRegistration>().collect();
            entries.sort_by_key(|r| r.seq());
            let suites: Vec<&'static dyn SuiteDescriptor> = entries.iter().map(|r| r.desc()).collect();
            Self {
                suites: Vec::leak(suites),
            }
        })
    }

    /// All registered suites, in stable registration order.
    pub fn suites(&self) -> &'static [&'static dyn SuiteDescriptor] {
        self.suites
    }

    /// A suite's cases, in declaration order.
    ///
    /// A thin pass-through kept distinct from [`SuiteDescriptor::cases`] so
    /// callers can go through the registry alone without naming the trait.
    pub fn cases_of(&self, suite: &dyn SuiteDescriptor) -> &'static [&'static dyn CaseDescriptor] {
        suite.cases()
    }

    /// Total number of cases across every registered suite.
    pub fn total_case_count(&self) -> u32 {
        self.suites.iter().map(|s| s.case_count() as u32).sum()
    }
}
