/// Assert `$value` is `true`, early-returning `false` from the enclosing
/// case on failure.
#[macro_export]
macro_rules! assert_true {
    ($instance:expr, $value:expr) => {
        if !$crate::Asserts::is_true($instance, $crate::testkit_protocol::src_info!(), $value) {
            return false;
        }
    };
}

/// Assert `$value` is `false`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_false {
    ($instance:expr, $value:expr) => {
        if !$crate::Asserts::is_false($instance, $crate::testkit_protocol::src_info!(), $value) {
            return false;
        }
    };
}

/// Assert `$value` is NaN, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_is_nan {
    ($instance:expr, $value:expr) => {
        if !$crate::Asserts::is_nan($instance, $crate::testkit_protocol::src_info!(), $value) {
            return false;
        }
    };
}

/// Assert `$value` is finite, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_is_finite {
    ($instance:expr, $value:expr) => {
        if !$crate::Asserts::is_finite($instance, $crate::testkit_protocol::src_info!(), $value) {
            return false;
        }
    };
}

/// Assert `$value` is infinite, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_is_infinite {
    ($instance:expr, $value:expr) => {
        if !$crate::Asserts::is_infinite($instance, $crate::testkit_protocol::src_info!(), $value) {
            return false;
        }
    };
}

/// Assert `$a < $b`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_less_than {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::less_than($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `$a <= $b`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_less_or_equal {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::less_or_equal($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `$a > $b`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_greater_than {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::greater_than($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `$a >= $b`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_greater_or_equal {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::greater_or_equal($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `$a == $b`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_are_equal {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::are_equal($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `$a != $b`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_are_different {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::are_different($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert two `Option<&str>` operands are both present and equal,
/// early-returning `false` on failure.
#[macro_export]
macro_rules! assert_string_equal {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::string_equal($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert two `Option<&str>` operands are both present and differ,
/// early-returning `false` on failure.
#[macro_export]
macro_rules! assert_string_different {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::string_different($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `|$a - $b| <= $epsilon`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_almost_equal {
    ($instance:expr, $a:expr, $b:expr, $epsilon:expr) => {
        if !$crate::Asserts::almost_equal($instance, $crate::testkit_protocol::src_info!(), $a, $b, $epsilon) {
            return false;
        }
    };
}

/// Assert `|$a - $b| > $epsilon`, early-returning `false` on failure.
#[macro_export]
macro_rules! assert_very_different {
    ($instance:expr, $a:expr, $b:expr, $epsilon:expr) => {
        if !$crate::Asserts::very_different($instance, $crate::testkit_protocol::src_info!(), $a, $b, $epsilon) {
            return false;
        }
    };
}

/// Assert `$a` and `$b` have identical bit patterns, early-returning
/// `false` on failure.
#[macro_export]
macro_rules! assert_bitwise_equal {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::bitwise_equal($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert `$a` and `$b` have differing bit patterns, early-returning
/// `false` on failure.
#[macro_export]
macro_rules! assert_bitwise_different {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::bitwise_different($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert two byte ranges are non-empty and identical, early-returning
/// `false` on failure.
#[macro_export]
macro_rules! assert_same_data {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::same_data($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Assert two byte ranges are non-empty and differ, early-returning
/// `false` on failure.
#[macro_export]
macro_rules! assert_different_data {
    ($instance:expr, $a:expr, $b:expr) => {
        if !$crate::Asserts::different_data($instance, $crate::testkit_protocol::src_info!(), $a, $b) {
            return false;
        }
    };
}

/// Format a message and forward it to `$instance`'s bound sink as a trace
/// event. Does not affect control flow.
#[macro_export]
macro_rules! trace {
    ($instance:expr, $($arg:tt)*) => {
        $crate::Asserts::trace_message($instance, $crate::testkit_protocol::src_info!(), format!($($arg)*))
    };
}
