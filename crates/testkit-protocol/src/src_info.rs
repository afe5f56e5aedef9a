/// Source location of a trace or assertion-failure call site.
///
/// Built from `file!()`/`line!()` and the enclosing function name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SrcInfo {
    /// Source file path as given to the compiler.
    pub file: &'static str,
    /// Enclosing function name.
    pub function: &'static str,
    /// Line number within `file`.
    pub line: u32,
}

impl SrcInfo {
    /// Construct a `SrcInfo` from its three fields.
    pub const fn new(file: &'static str, function: &'static str, line: u32) -> Self {
        Self {
            file,
            function,
            line,
        }
    }
}

/// Capture the caller's file, enclosing function, and line as a [`SrcInfo`].
///
/// Usage: `src_info!()`, typically embedded in another macro (`assert_*!`,
/// `trace!`) rather than called directly.
#[macro_export]
macro_rules! src_info {
    () => {
        $crate::SrcInfo::new(file!(), $crate::function_name!(), line!())
    };
}

/// Expands to the name of the function it is invoked in.
///
/// Used internally by [`src_info!`]; exported so `assert_*!`/`trace!` macros
/// in other crates can build a [`SrcInfo`] without re-deriving this.
#[macro_export]
macro_rules! function_name {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            core::any::type_name::<T>()
        }
        let name = type_name_of(f);
        // Strip the trailing "::f" and any "::{{closure}}" suffix.
        name.trim_end_matches("::f")
            .trim_end_matches("::{{closure}}")
    }};
}
