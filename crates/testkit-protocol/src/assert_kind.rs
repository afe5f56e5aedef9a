/// The predicate an assertion helper evaluated before failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum AssertKind {
    /// Operand was expected to be truthy.
    IsTrue,
    /// Operand was expected to be falsy.
    IsFalse,
    /// Operand was expected to be NaN.
    IsNaN,
    /// Operand was expected to be finite.
    IsFinite,
    /// Operand was expected to be infinite.
    IsInfinite,
    /// `a < b` was expected.
    LessThan,
    /// `a <= b` was expected.
    LessOrEqual,
    /// `a > b` was expected.
    GreaterThan,
    /// `a >= b` was expected.
    GreaterOrEqual,
    /// `a == b` was expected.
    AreEqual,
    /// `a != b` was expected.
    AreDifferent,
    /// String equality was expected.
    StringEqual,
    /// String inequality was expected.
    StringDifferent,
    /// `|a - b| <= epsilon` was expected.
    AlmostEqual,
    /// `|a - b| > epsilon` was expected.
    VeryDifferent,
    /// Bitwise equality was expected.
    BitwiseEqual,
    /// Bitwise inequality was expected.
    BitwiseDifferent,
    /// Byte-range equality was expected.
    SameData,
    /// Byte-range inequality was expected.
    DifferentData,
}

impl std::fmt::Display for AssertKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::IsTrue => "is_true",
            Self::IsFalse => "is_false",
            Self::IsNaN => "is_nan",
            Self::IsFinite => "is_finite",
            Self::IsInfinite => "is_infinite",
            Self::LessThan => "less_than",
            Self::LessOrEqual => "less_or_equal",
            Self::GreaterThan => "greater_than",
            Self::GreaterOrEqual => "greater_or_equal",
            Self::AreEqual => "are_equal",
            Self::AreDifferent => "are_different",
            Self::StringEqual => "string_equal",
            Self::StringDifferent => "string_different",
            Self::AlmostEqual => "almost_equal",
            Self::VeryDifferent => "very_different",
            Self::BitwiseEqual => "bitwise_equal",
            Self::BitwiseDifferent => "bitwise_different",
            Self::SameData => "same_data",
            Self::DifferentData => "different_data",
        };
        write!(f, "{s}")
    }
}
