//! Process-wide inventory of test suites and cases.
//!
//! Suites register themselves at static-initialization time via
//! [`inventory`], keyed to a monotonic sequence number so that
//! [`Registry::suites`] returns them in a stable order across runs of the
//! same binary. A suite's cases never go through `inventory` at all — the
//! [`test_suite!`] macro builds each suite's case list as a plain `&'static`
//! array at the macro's own expansion site, so case order is exactly
//! declaration order with no static-init race to resolve.
//!
//! User code touches exactly two things: the [`UserSuite`] trait (a
//! constructor plus optional fixture hooks) and the [`test_suite!`] macro
//! (the suite type, its display name, and the list of case methods to
//! register).
#![warn(missing_docs)]

mod registration;
mod registry;
mod wrapper;

pub use registration::SuiteRegistration;
pub use registry::Registry;
pub use wrapper::{MethodCase, SuiteWrapper, TypedSuiteDescriptor, UserSuite};

#[doc(hidden)]
pub use inventory;
#[doc(hidden)]
pub use testkit_protocol::{CaseDescriptor, SuiteDescriptor, SuiteInstance};

/// Register a suite type and its cases with the process-wide [`Registry`].
///
/// `$suite` must implement [`UserSuite`] and declare one inherent method
/// `fn(&mut self) -> bool` per entry in the case list. Expands to a single
/// anonymous `const _: () = { ... };` item, so it is safe to invoke any
/// number of times per module.
///
/// ```ignore
/// struct Counters { seen: u32 }
///
/// impl UserSuite for Counters {
///     fn new() -> Self { Self { seen: 0 } }
/// }
///
/// impl Counters {
///     fn increments(&mut self) -> bool {
///         self.seen += 1;
///         self.seen == 1
///     }
/// }
///
/// test_suite!(Counters => "counters" { increments });
/// ```
#[macro_export]
macro_rules! test_suite {
    ($suite:ty => $name:literal { $($case:ident),* $(,)? }) => {
        const _: () = {
            static __TESTKIT_CASES: &[&dyn $crate::CaseDescriptor] = &[
                $(
                    &$crate::MethodCase::<$suite> {
                        name: ::core::stringify!($case),
                        f: <$suite>::$case,
                    }
                ),*
            ];

            static __TESTKIT_DESCRIPTOR: $crate::TypedSuiteDescriptor<$suite> =
                $crate::TypedSuiteDescriptor::new($name, __TESTKIT_CASES);

            $crate::inventory::submit! {
                $crate::SuiteRegistration::new(&__TESTKIT_DESCRIPTOR)
            }
        };
    };
}

inventory::collect!(SuiteRegistration);

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testkit_protocol::{EventSink, NullSink};

    use super::*;

    struct Adder {
        total: i64,
    }

    impl UserSuite for Adder {
        fn new() -> Self {
            Self { total: 0 }
        }
    }

    impl Adder {
        fn add_one(&mut self) -> bool {
            self.total += 1;
            self.total == 1
        }

        fn add_two(&mut self) -> bool {
            self.total += 2;
            self.total == 2
        }
    }

    test_suite!(Adder => "adder" { add_one, add_two });

    #[test]
    fn registered_suite_is_discoverable() {
        let registry = Registry::global();
        let found = registry
            .suites()
            .iter()
            .find(|s| s.name() == "adder")
            .expect("adder suite registered");
        assert_eq!(found.case_count(), 2);
        let names: Vec<_> = registry.cases_of(*found).iter().map(|c| c.name()).collect();
        assert_eq!(names, ["add_one", "add_two"]);
    }

    #[test]
    fn instantiate_runs_user_constructor() {
        let registry = Registry::global();
        let desc = registry
            .suites()
            .iter()
            .find(|s| s.name() == "adder")
            .expect("adder suite registered");
        let sink: Arc<dyn EventSink> = Arc::new(NullSink);
        let mut instance = desc.instantiate(sink, 0).expect("instantiate");
        let case = registry.cases_of(*desc)[0];
        assert!(case.invoke(instance.as_mut()));
    }

    #[test]
    fn suite_order_is_stable_across_calls() {
        let registry = Registry::global();
        let first: Vec<_> = registry.suites().iter().map(|s| s.name()).collect();
        let second: Vec<_> = registry.suites().iter().map(|s| s.name()).collect();
        assert_eq!(first, second);
    }
}
