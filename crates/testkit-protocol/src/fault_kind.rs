/// A synchronous, fatal runtime condition intercepted by the sandbox.
///
/// Produced exclusively by `testkit-sandbox`; never constructed by runner or
/// assertion code.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum FaultKind {
    /// A fault occurred but could not be classified.
    Unknown,
    /// A Rust panic unwound with a payload that was not a `&str`/`String`.
    UndefinedException,
    /// A Rust panic unwound with a string payload, captured here.
    TypedException(String),
    /// `SIGSEGV` on an unmapped page.
    MemoryNotMapped,
    /// `SIGSEGV` on a mapped page without the required permission.
    MemoryAccessViolation,
    /// `SIGBUS` not otherwise classified.
    MemoryBusError,
    /// `SIGBUS` from a misaligned access.
    MemoryMisalignment,
    /// `SIGILL` not otherwise classified.
    InstructionError,
    /// `SIGILL` from a genuinely illegal opcode/operand/address/trap.
    InstructionIllegal,
    /// `SIGILL` from a privileged opcode or register.
    InstructionPrivileged,
    /// `SIGFPE` from integer division by zero.
    IntegerDivideByZero,
    /// `SIGFPE` from integer overflow.
    IntegerOverflow,
    /// `SIGFPE` not otherwise classified.
    FloatError,
    /// `SIGFPE` from floating-point division by zero.
    FloatDivideByZero,
    /// `SIGFPE` from floating-point overflow.
    FloatOverflow,
    /// `SIGFPE` from floating-point underflow.
    FloatUnderflow,
    /// `SIGFPE` from an inexact floating-point result.
    FloatInexact,
    /// `SIGFPE` from an invalid floating-point operation.
    FloatInvalidOp,
    /// `SIGFPE` raised for an out-of-bounds array subscript.
    ArrayOutOfBounds,
    /// `SIGSYS`: a disallowed or malformed system call.
    SystemError,
    /// `SIGPIPE`: write to a closed pipe/socket.
    BrokenPipe,
    /// `SIGXFSZ`: file size limit exceeded.
    FileSizeOverLimit,
}

impl std::fmt::Display for FaultKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unknown => write!(f, "unknown fault"),
            Self::UndefinedException => write!(f, "undefined exception"),
            Self::TypedException(detail) => write!(f, "exception: {detail}"),
            Self::MemoryNotMapped => write!(f, "memory not mapped"),
            Self::MemoryAccessViolation => write!(f, "memory access violation"),
            Self::MemoryBusError => write!(f, "bus error"),
            Self::MemoryMisalignment => write!(f, "misaligned memory access"),
            Self::InstructionError => write!(f, "illegal instruction (unclassified)"),
            Self::InstructionIllegal => write!(f, "illegal instruction"),
            Self::InstructionPrivileged => write!(f, "privileged instruction"),
            Self::IntegerDivideByZero => write!(f, "integer divide by zero"),
            Self::IntegerOverflow => write!(f, "integer overflow"),
            Self::FloatError => write!(f, "floating-point error (unclassified)"),
            Self::FloatDivideByZero => write!(f, "floating-point divide by zero"),
            Self::FloatOverflow => write!(f, "floating-point overflow"),
            Self::FloatUnderflow => write!(f, "floating-point underflow"),
            Self::FloatInexact => write!(f, "inexact floating-point result"),
            Self::FloatInvalidOp => write!(f, "invalid floating-point operation"),
            Self::ArrayOutOfBounds => write!(f, "array index out of bounds"),
            Self::SystemError => write!(f, "system call error"),
            Self::BrokenPipe => write!(f, "broken pipe"),
            Self::FileSizeOverLimit => write!(f, "file size limit exceeded"),
        }
    }
}
