use testkit_protocol::{AssertKind, SrcInfo, SuiteInstance};

/// Assertion and trace helpers available on any bound [`SuiteInstance`].
///
/// Blanket-implemented for every `T: SuiteInstance`; suite authors never
/// implement this trait themselves. Every method reports through the
/// instance's bound `EventSink` and returns `false` on failure instead of
/// panicking — a failed assertion is a recorded outcome, not a fault.
///
/// Called through the `assert_*!` macros in practice, which additionally
/// early-return `false` from the enclosing case on failure; the methods
/// here are what those macros expand to.
pub trait Asserts: SuiteInstance {
    /// `value` must be `true`.
    fn is_true(&self, src: SrcInfo, value: bool) -> bool {
        value || self.fail_unary(src, AssertKind::IsTrue, "false")
    }

    /// `value` must be `false`.
    fn is_false(&self, src: SrcInfo, value: bool) -> bool {
        !value || self.fail_unary(src, AssertKind::IsFalse, "true")
    }

    /// `value` must be NaN.
    fn is_nan(&self, src: SrcInfo, value: f64) -> bool {
        value.is_nan() || self.fail_unary(src, AssertKind::IsNaN, &format!("{value}"))
    }

    /// `value` must be finite.
    fn is_finite(&self, src: SrcInfo, value: f64) -> bool {
        value.is_finite() || self.fail_unary(src, AssertKind::IsFinite, &format!("{value}"))
    }

    /// `value` must be infinite.
    fn is_infinite(&self, src: SrcInfo, value: f64) -> bool {
        value.is_infinite() || self.fail_unary(src, AssertKind::IsInfinite, &format!("{value}"))
    }

    /// `a < b` must hold.
    fn less_than<T: PartialOrd + std::fmt::Debug>(&self, src: SrcInfo, a: T, b: T) -> bool {
        let ok = a < b;
        self.report_binary(ok, src, AssertKind::LessThan, &a, &b)
    }

    /// `a <= b` must hold.
    fn less_or_equal<T: PartialOrd + std::fmt::Debug>(&self, src: SrcInfo, a: T, b: T) -> bool {
        let ok = a <= b;
        self.report_binary(ok, src, AssertKind::LessOrEqual, &a, &b)
    }

    /// `a > b` must hold.
    fn greater_than<T: PartialOrd + std::fmt::Debug>(&self, src: SrcInfo, a: T, b: T) -> bool {
        let ok = a > b;
        self.report_binary(ok, src, AssertKind::GreaterThan, &a, &b)
    }

    /// `a >= b` must hold.
    fn greater_or_equal<T: PartialOrd + std::fmt::Debug>(&self, src: SrcInfo, a: T, b: T) -> bool {
        let ok = a >= b;
        self.report_binary(ok, src, AssertKind::GreaterOrEqual, &a, &b)
    }

    /// `a == b` must hold.
    fn are_equal<T: PartialEq + std::fmt::Debug>(&self, src: SrcInfo, a: T, b: T) -> bool {
        let ok = a == b;
        self.report_binary(ok, src, AssertKind::AreEqual, &a, &b)
    }

    /// `a != b` must hold.
    fn are_different<T: PartialEq + std::fmt::Debug>(&self, src: SrcInfo, a: T, b: T) -> bool {
        let ok = a != b;
        self.report_binary(ok, src, AssertKind::AreDifferent, &a, &b)
    }

    /// Both operands must be present and equal. A missing (`None`) operand
    /// is an automatic failure.
    fn string_equal(&self, src: SrcInfo, a: Option<&str>, b: Option<&str>) -> bool {
        let ok = matches!((a, b), (Some(a), Some(b)) if a == b);
        self.report_binary(ok, src, AssertKind::StringEqual, &a.unwrap_or("<none>"), &b.unwrap_or("<none>"))
    }

    /// Both operands must be present and unequal. A missing (`None`)
    /// operand is an automatic failure.
    fn string_different(&self, src: SrcInfo, a: Option<&str>, b: Option<&str>) -> bool {
        let ok = matches!((a, b), (Some(a), Some(b)) if a != b);
        self.report_binary(ok, src, AssertKind::StringDifferent, &a.unwrap_or("<none>"), &b.unwrap_or("<none>"))
    }

    /// `|a - b| <= epsilon` must hold.
    fn almost_equal(&self, src: SrcInfo, a: f64, b: f64, epsilon: f64) -> bool {
        let ok = (a - b).abs() <= epsilon;
        self.report_binary(ok, src, AssertKind::AlmostEqual, &a, &b)
    }

    /// `|a - b| > epsilon` must hold.
    fn very_different(&self, src: SrcInfo, a: f64, b: f64, epsilon: f64) -> bool {
        let ok = (a - b).abs() > epsilon;
        self.report_binary(ok, src, AssertKind::VeryDifferent, &a, &b)
    }

    /// The raw bit patterns of `a` and `b` must match (unlike `==`, this
    /// considers `NaN` equal to a bit-identical `NaN`).
    fn bitwise_equal(&self, src: SrcInfo, a: f64, b: f64) -> bool {
        let ok = a.to_bits() == b.to_bits();
        self.report_binary(ok, src, AssertKind::BitwiseEqual, &a, &b)
    }

    /// The raw bit patterns of `a` and `b` must differ.
    fn bitwise_different(&self, src: SrcInfo, a: f64, b: f64) -> bool {
        let ok = a.to_bits() != b.to_bits();
        self.report_binary(ok, src, AssertKind::BitwiseDifferent, &a, &b)
    }

    /// Both byte ranges must be non-empty and identical.
    fn same_data(&self, src: SrcInfo, a: &[u8], b: &[u8]) -> bool {
        let ok = !a.is_empty() && !b.is_empty() && a == b;
        self.report_binary(ok, src, AssertKind::SameData, &format!("{a:?}"), &format!("{b:?}"))
    }

    /// Both byte ranges must be non-empty and differ.
    fn different_data(&self, src: SrcInfo, a: &[u8], b: &[u8]) -> bool {
        let ok = !a.is_empty() && !b.is_empty() && a != b;
        self.report_binary(ok, src, AssertKind::DifferentData, &format!("{a:?}"), &format!("{b:?}"))
    }

    /// Format `args` and forward it to the bound sink as a trace message.
    fn trace_message(&self, src: SrcInfo, message: String) {
        self.sink().on_trace(self.worker_idx(), src, message);
    }

    /// Report a failed unary assertion and return `false`. Internal to the
    /// default method bodies above.
    #[doc(hidden)]
    fn fail_unary(&self, src: SrcInfo, kind: AssertKind, operand: &str) -> bool {
        self.sink().on_unary_assert_fail(self.worker_idx(), src, kind, operand);
        false
    }

    /// Report a binary assertion's outcome, failing and returning `false`
    /// unless `ok`. Internal to the default method bodies above.
    #[doc(hidden)]
    fn report_binary(
        &self,
        ok: bool,
        src: SrcInfo,
        kind: AssertKind,
        a: &dyn std::fmt::Debug,
        b: &dyn std::fmt::Debug,
    ) -> bool {
        if ok {
            return true;
        }
        self.sink()
            .on_binary_assert_fail(self.worker_idx(), src, kind, &format!("{a:?}"), &format!("{b:?}"));
        false
    }
}

impl<T: SuiteInstance + ?Sized> Asserts for T {}
