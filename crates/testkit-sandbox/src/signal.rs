//! Synchronous fatal-signal interception: installing `sigaction` handlers
//! and mapping a delivered signal's `si_code` to a [`FaultKind`].
#![cfg(unix)]

use std::os::raw::c_int;

use testkit_protocol::FaultKind;

/// Signals this sandbox intercepts. `SIGINT`/`SIGTERM`/`SIGHUP`/`SIGQUIT`
/// are deliberately absent — those are cooperative-cancellation signals
/// handled by the runner, not faults.
pub const INTERCEPTED_SIGNALS: &[c_int] = &[
    libc::SIGSEGV,
    libc::SIGBUS,
    libc::SIGILL,
    libc::SIGFPE,
    libc::SIGSYS,
    libc::SIGPIPE,
    libc::SIGXFSZ,
];

/// A signal observation copied out of `siginfo_t` with no heap data, so a
/// signal handler can stash it in thread-local storage with a plain store.
#[derive(Clone, Copy, Default)]
pub struct RawFault {
    signal: c_int,
    si_code: i32,
    present: bool,
}

impl RawFault {
    pub fn captured(signal: c_int, si_code: i32) -> Self {
        Self {
            signal,
            si_code,
            present: true,
        }
    }

    pub fn present(&self) -> bool {
        self.present
    }
}

/// Translate a captured signal/`si_code` pair into a [`FaultKind`].
///
/// Follows the complete signal to fault mapping this sandbox implements;
/// any signal/code combination not named falls through to the
/// unclassified row for that signal, or [`FaultKind::Unknown`] for a
/// signal outside [`INTERCEPTED_SIGNALS`].
pub fn classify(raw: RawFault) -> FaultKind {
    if !raw.present {
        return FaultKind::Unknown;
    }
    match raw.signal {
        libc::SIGSEGV => match raw.si_code {
            libc::SEGV_ACCERR => FaultKind::MemoryAccessViolation,
            _ => FaultKind::MemoryNotMapped,
        },
        libc::SIGBUS => match raw.si_code {
            libc::BUS_ADRALN => FaultKind::MemoryMisalignment,
            _ => FaultKind::MemoryBusError,
        },
        libc::SIGILL => match raw.si_code {
            libc::ILL_ILLOPC | libc::ILL_ILLOPN | libc::ILL_ILLADR | libc::ILL_ILLTRP => {
                FaultKind::InstructionIllegal
            }
            libc::ILL_PRVOPC | libc::ILL_PRVREG => FaultKind::InstructionPrivileged,
            _ => FaultKind::InstructionError,
        },
        libc::SIGFPE => match raw.si_code {
            libc::FPE_INTDIV => FaultKind::IntegerDivideByZero,
            libc::FPE_INTOVF => FaultKind::IntegerOverflow,
            libc::FPE_FLTDIV => FaultKind::FloatDivideByZero,
            libc::FPE_FLTOVF => FaultKind::FloatOverflow,
            libc::FPE_FLTUND => FaultKind::FloatUnderflow,
            libc::FPE_FLTRES => FaultKind::FloatInexact,
            libc::FPE_FLTINV => FaultKind::FloatInvalidOp,
            libc::FPE_FLTSUB => FaultKind::ArrayOutOfBounds,
            _ => FaultKind::FloatError,
        },
        libc::SIGSYS => FaultKind::SystemError,
        libc::SIGPIPE => FaultKind::BrokenPipe,
        libc::SIGXFSZ => FaultKind::FileSizeOverLimit,
        _ => FaultKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fault_is_unknown() {
        assert_eq!(classify(RawFault::default()), FaultKind::Unknown);
    }

    #[test]
    fn segv_maperr_maps_to_memory_not_mapped() {
        let raw = RawFault::captured(libc::SIGSEGV, libc::SEGV_MAPERR);
        assert_eq!(classify(raw), FaultKind::MemoryNotMapped);
    }

    #[test]
    fn segv_accerr_maps_to_access_violation() {
        let raw = RawFault::captured(libc::SIGSEGV, libc::SEGV_ACCERR);
        assert_eq!(classify(raw), FaultKind::MemoryAccessViolation);
    }

    #[test]
    fn fpe_intdiv_maps_to_integer_divide_by_zero() {
        let raw = RawFault::captured(libc::SIGFPE, libc::FPE_INTDIV);
        assert_eq!(classify(raw), FaultKind::IntegerDivideByZero);
    }

    #[test]
    fn sigpipe_maps_to_broken_pipe_regardless_of_code() {
        let raw = RawFault::captured(libc::SIGPIPE, 0);
        assert_eq!(classify(raw), FaultKind::BrokenPipe);
    }

    #[test]
    fn unmapped_signal_is_unknown() {
        let raw = RawFault::captured(libc::SIGUSR1, 0);
        assert_eq!(classify(raw), FaultKind::Unknown);
    }
}
