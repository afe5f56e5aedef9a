//! Process-wide install/restore of the panic hook and, where supported,
//! the fatal-signal handlers.
use std::sync::atomic::{AtomicUsize, Ordering};

use parking_lot::Mutex;
use testkit_protocol::FaultKind;

use crate::tls;

type PanicHook = dyn Fn(&std::panic::PanicHookInfo<'_>) + Sync + Send;

static ACTIVE_COUNT: AtomicUsize = AtomicUsize::new(0);
static PREVIOUS_HOOK: Mutex<Option<Box<PanicHook>>> = Mutex::new(None);

/// Install the sandbox's panic hook and, on `x86_64`/unix, its fatal-signal
/// handlers. Reference-counted: call once per active [`crate::Sandbox`]
/// owner (in practice, once per `testkit-runner::Runner::start`); the Nth
/// call is a no-op beyond bumping the count, and only the first call
/// actually installs anything.
pub fn init_fault_interception() {
    if ACTIVE_COUNT.fetch_add(1, Ordering::SeqCst) == 0 {
        install_panic_hook();
        install_signal_handlers();
    }
}

/// Undo one [`init_fault_interception`] call. Restores the previous panic
/// hook and signal dispositions once the reference count reaches zero.
pub fn shutdown_fault_interception() {
    let previous = ACTIVE_COUNT.fetch_update(Ordering::SeqCst, Ordering::SeqCst, |count| {
        count.checked_sub(1)
    });
    match previous {
        Ok(1) => {
            restore_signal_handlers();
            restore_panic_hook();
        }
        Ok(_) => {}
        Err(_) => {
            tracing::warn!("testkit-sandbox: shutdown_fault_interception called without a matching init");
        }
    }
}

fn install_panic_hook() {
    let previous = std::panic::take_hook();
    *PREVIOUS_HOOK.lock() = Some(previous);
    std::panic::set_hook(Box::new(|info| {
        let payload = info.payload();
        let fault = payload
            .downcast_ref::<&str>()
            .map(|s| FaultKind::TypedException((*s).to_string()))
            .or_else(|| {
                payload
                    .downcast_ref::<String>()
                    .map(|s| FaultKind::TypedException(s.clone()))
            })
            .unwrap_or(FaultKind::UndefinedException);
        tls::record_panic_fault(fault);
    }));
}

fn restore_panic_hook() {
    if let Some(previous) = PREVIOUS_HOOK.lock().take() {
        std::panic::set_hook(previous);
    }
}

#[cfg(all(unix, target_arch = "x86_64"))]
mod signals {
    use std::os::raw::c_int;

    use parking_lot::Mutex;

    use crate::handler::handle_fault;
    use crate::signal::INTERCEPTED_SIGNALS;

    static PREVIOUS_ACTIONS: Mutex<Vec<(c_int, libc::sigaction)>> = Mutex::new(Vec::new());

    pub fn install() {
        let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
        action.sa_sigaction = handle_fault as usize;
        action.sa_flags = libc::SA_SIGINFO | libc::SA_ONSTACK;
        unsafe {
            libc::sigemptyset(&mut action.sa_mask);
        }

        let mut previous = PREVIOUS_ACTIONS.lock();
        previous.clear();
        for &signum in INTERCEPTED_SIGNALS {
            let mut old: libc::sigaction = unsafe { std::mem::zeroed() };
            let rc = unsafe { libc::sigaction(signum, &action, &mut old) };
            if rc != 0 {
                tracing::warn!(signal = signum, "testkit-sandbox: failed to install signal handler");
                continue;
            }
            previous.push((signum, old));
        }
    }

    pub fn restore() {
        let mut previous = PREVIOUS_ACTIONS.lock();
        for (signum, old) in previous.drain(..) {
            unsafe {
                libc::sigaction(signum, &old, std::ptr::null_mut());
            }
        }
    }
}

#[cfg(all(unix, target_arch = "x86_64"))]
fn install_signal_handlers() {
    signals::install();
}

#[cfg(all(unix, target_arch = "x86_64"))]
fn restore_signal_handlers() {
    signals::restore();
}

#[cfg(not(all(unix, target_arch = "x86_64")))]
fn install_signal_handlers() {
    tracing::warn!(
        "testkit-sandbox: hardware fault interception is only implemented for unix/x86_64; \
         this platform falls back to panic-only recovery"
    );
}

#[cfg(not(all(unix, target_arch = "x86_64")))]
fn restore_signal_handlers() {}
