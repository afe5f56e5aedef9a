//! Cooperative-cancellation signal handling.
//!
//! Distinct from `testkit-sandbox`'s fatal-signal interception: this
//! installs a handler for `SIGHUP`/`SIGINT`/`SIGQUIT`/`SIGTERM` that stores
//! `true` into the active run's stop flag, so a worker notices at its next
//! suite/case boundary rather than the process being killed outright.

use std::os::raw::c_int;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

static STOP_FLAG: OnceLock<Arc<AtomicBool>> = OnceLock::new();

const INTERCEPTED_SIGNALS: &[c_int] = &[libc::SIGHUP, libc::SIGINT, libc::SIGQUIT, libc::SIGTERM];

/// Register `flag` as the target of the cancellation signal handler and
/// install it. Call once per process, after `Runner::start`.
pub fn install(flag: Arc<AtomicBool>) {
    if STOP_FLAG.set(flag).is_err() {
        tracing::warn!("testkit-cli: signal handler already installed in this process");
        return;
    }

    let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
    action.sa_sigaction = handle_stop_signal as usize;
    action.sa_flags = libc::SA_RESTART;
    unsafe {
        libc::sigemptyset(&mut action.sa_mask);
    }

    for &signum in INTERCEPTED_SIGNALS {
        let rc = unsafe { libc::sigaction(signum, &action, std::ptr::null_mut()) };
        if rc != 0 {
            tracing::warn!(signal = signum, "testkit-cli: failed to install cancellation signal handler");
        }
    }
}

extern "C" fn handle_stop_signal(_signum: c_int) {
    if let Some(flag) = STOP_FLAG.get() {
        flag.store(true, Ordering::Relaxed);
    }
}
