//! The non-local-transfer recovery point used to escape a signal handler
//! back to the guarded block that installed it.
//!
//! `x86_64`-only, the same scope a kernel panic-recovery primitive
//! targets. Adapted from a `static mut`, single-threaded `JumpBuf` to a
//! `thread_local!`-scoped one: each worker thread owns its own recovery
//! point, since signal handlers only ever run on the thread that faulted.

#[cfg(target_arch = "x86_64")]
mod arch {
    use core::arch::naked_asm;

    /// Callee-saved registers plus the stack and instruction pointers at the
    /// point [`sandbox_setjmp`] was called.
    #[repr(C, align(16))]
    pub struct JumpBuf {
        rbx: u64,
        rbp: u64,
        r12: u64,
        r13: u64,
        r14: u64,
        r15: u64,
        rsp: u64,
        rip: u64,
    }

    impl JumpBuf {
        pub const fn zeroed() -> Self {
            Self {
                rbx: 0,
                rbp: 0,
                r12: 0,
                r13: 0,
                r14: 0,
                r15: 0,
                rsp: 0,
                rip: 0,
            }
        }
    }

    /// Save the calling context into `buf`. Returns `0` on the direct call;
    /// a subsequent [`sandbox_longjmp`] into `buf` makes it return again
    /// with `val` (or `1` if `val` was `0`).
    #[unsafe(naked)]
    pub unsafe extern "C" fn sandbox_setjmp(buf: *mut JumpBuf) -> i32 {
        naked_asm!(
            "mov [rdi], rbx",
            "mov [rdi + 8], rbp",
            "mov [rdi + 16], r12",
            "mov [rdi + 24], r13",
            "mov [rdi + 32], r14",
            "mov [rdi + 40], r15",
            "lea rax, [rsp + 8]",
            "mov [rdi + 48], rax",
            "mov rax, [rsp]",
            "mov [rdi + 56], rax",
            "xor eax, eax",
            "ret",
        )
    }

    /// Restore the context saved in `buf`, making the matching
    /// [`sandbox_setjmp`] call return `val` (or `1` if `val` is `0`).
    ///
    /// # Safety
    ///
    /// `buf` must have been populated by `sandbox_setjmp` on this same
    /// thread, and the stack frame it captured must still be live.
    #[unsafe(naked)]
    pub unsafe extern "C" fn sandbox_longjmp(buf: *const JumpBuf, val: i32) -> ! {
        naked_asm!(
            "mov eax, esi",
            "test eax, eax",
            "jnz 2f",
            "mov eax, 1",
            "2:",
            "mov rbx, [rdi]",
            "mov rbp, [rdi + 8]",
            "mov r12, [rdi + 16]",
            "mov r13, [rdi + 24]",
            "mov r14, [rdi + 32]",
            "mov r15, [rdi + 40]",
            "mov rsp, [rdi + 48]",
            "jmp [rdi + 56]",
        )
    }
}

#[cfg(target_arch = "x86_64")]
pub use arch::{JumpBuf, sandbox_longjmp, sandbox_setjmp};

/// Stub recovery point for architectures the naked-asm pair is not written
/// for. `sandbox_setjmp` always reports "no recovery installed"; nothing
/// ever calls `sandbox_longjmp` because no signal handler is installed on
/// these targets (see [`crate::lifecycle::init_fault_interception`]).
#[cfg(not(target_arch = "x86_64"))]
mod arch {
    pub struct JumpBuf;

    impl JumpBuf {
        pub const fn zeroed() -> Self {
            Self
        }
    }
}

#[cfg(not(target_arch = "x86_64"))]
pub use arch::JumpBuf;
