//! Sample suites used to exercise `testkit-cli` end to end in its
//! integration tests.
//!
//! Not meant as API documentation for suite authors — see
//! `testkit-registry`'s own doc comments for that.
#![allow(missing_docs)]

use testkit_registry::{UserSuite, test_suite};

struct Arithmetic;

impl UserSuite for Arithmetic {
    fn new() -> Self {
        Arithmetic
    }
}

impl Arithmetic {
    fn addition(&mut self) -> bool {
        2 + 2 == 4
    }

    fn subtraction(&mut self) -> bool {
        5 - 3 == 2
    }
}

test_suite!(Arithmetic => "arithmetic" { addition, subtraction });

struct Flaky {
    attempt: u32,
}

impl UserSuite for Flaky {
    fn new() -> Self {
        Flaky { attempt: 0 }
    }
}

impl Flaky {
    fn sometimes_fails(&mut self) -> bool {
        self.attempt += 1;
        self.attempt != 1
    }
}

test_suite!(Flaky => "flaky" { sometimes_fails });

struct Faulty;

impl UserSuite for Faulty {
    fn new() -> Self {
        Faulty
    }
}

impl Faulty {
    fn divides_by_zero(&mut self) -> bool {
        let zero = std::hint::black_box(0);
        let one = std::hint::black_box(1);
        (one / zero) == 1
    }
}

test_suite!(Faulty => "faulty" { divides_by_zero });

struct Empty;

impl UserSuite for Empty {
    fn new() -> Self {
        Empty
    }
}

test_suite!(Empty => "empty" {});
