//! The installed signal handler and panic hook.
#![cfg(all(unix, target_arch = "x86_64"))]

use std::os::raw::{c_int, c_void};

use crate::jumpbuf::sandbox_longjmp;
use crate::signal::RawFault;
use crate::tls;

/// Registered for every signal in [`crate::signal::INTERCEPTED_SIGNALS`].
///
/// Only async-signal-safe operations run here: reading `si_code` out of
/// `info`, a plain scalar store into this thread's [`RawFault`] cell, and
/// the non-local jump back to the guarded block's recovery point. Nothing
/// here allocates, locks, or calls back into libstd's panic machinery.
pub extern "C" fn handle_fault(signum: c_int, info: *mut libc::siginfo_t, _ctx: *mut c_void) {
    // SAFETY: `info` is supplied by the kernel for the duration of the
    // handler call and is non-null for SA_SIGINFO handlers.
    let si_code = unsafe { (*info).si_code };
    tls::record_signal_fault(RawFault::captured(signum, si_code));
    let buf = tls::recovery_buf_ptr();
    // SAFETY: every guarded block calls `sandbox_setjmp` on this same
    // thread before the signal could have been delivered inside it.
    unsafe { sandbox_longjmp(buf, 1) };
}
