//! Per-worker-thread state the guarded block and the signal handler share.
use std::cell::{Cell, RefCell};

use testkit_protocol::FaultKind;

use crate::jumpbuf::JumpBuf;
#[cfg(all(unix, target_arch = "x86_64"))]
use crate::signal::RawFault;

thread_local! {
    static RECOVERY_BUF: Cell<JumpBuf> = Cell::new(JumpBuf::zeroed());
    static GUARD_ACTIVE: Cell<bool> = const { Cell::new(false) };
    static PANIC_FAULT: RefCell<Option<FaultKind>> = const { RefCell::new(None) };
    #[cfg(all(unix, target_arch = "x86_64"))]
    static LAST_SIGNAL_FAULT: Cell<RawFault> = Cell::new(RawFault::default());
    #[cfg(all(unix, target_arch = "x86_64"))]
    static ALT_STACK: RefCell<Option<Vec<u8>>> = const { RefCell::new(None) };
}

/// Record the panic hook's classification of the panic currently
/// unwinding on this thread.
pub fn record_panic_fault(fault: FaultKind) {
    PANIC_FAULT.with(|cell| *cell.borrow_mut() = Some(fault));
}

/// Take (and clear) the panic fault recorded for this thread, if any.
pub fn take_panic_fault() -> Option<FaultKind> {
    PANIC_FAULT.with(|cell| cell.borrow_mut().take())
}

/// A raw, `'static`-lifetime pointer into this thread's recovery point.
///
/// Valid only while called on the thread that owns it — which is every
/// call site in this crate, since the signal handler runs on the faulting
/// thread and `guarded()` never crosses threads.
pub fn recovery_buf_ptr() -> *mut JumpBuf {
    RECOVERY_BUF.with(|cell| cell.as_ptr())
}

/// Enter a guarded block on this thread, or panic if one is already
/// active — reentrant guarded blocks are a programming error, not a
/// recoverable fault.
pub fn enter_guard() {
    GUARD_ACTIVE.with(|active| {
        if active.replace(true) {
            panic!("testkit-sandbox: guarded blocks do not nest on the same worker thread");
        }
    });
}

/// Leave the guarded block entered by [`enter_guard`].
pub fn leave_guard() {
    GUARD_ACTIVE.with(|active| active.set(false));
}

#[cfg(all(unix, target_arch = "x86_64"))]
pub fn record_signal_fault(raw: RawFault) {
    LAST_SIGNAL_FAULT.with(|cell| cell.set(raw));
}

#[cfg(all(unix, target_arch = "x86_64"))]
pub fn take_signal_fault() -> RawFault {
    LAST_SIGNAL_FAULT.with(|cell| cell.replace(RawFault::default()))
}

/// Install this thread's alternate signal stack if it has not been
/// installed yet. Idempotent per thread.
#[cfg(all(unix, target_arch = "x86_64"))]
pub fn ensure_alt_stack_installed() {
    ALT_STACK.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return;
        }
        let size = libc::SIGSTKSZ.max(32 * 1024);
        let mut buf = vec![0u8; size];
        let stack = libc::stack_t {
            ss_sp: buf.as_mut_ptr().cast(),
            ss_flags: 0,
            ss_size: size,
        };
        // SAFETY: `buf` outlives the altstack registration — it is stashed
        // in `slot` for the remaining lifetime of this thread.
        let rc = unsafe { libc::sigaltstack(&stack, std::ptr::null_mut()) };
        if rc != 0 {
            tracing::warn!(
                errno = std::io::Error::last_os_error().raw_os_error(),
                "testkit-sandbox: failed to install alternate signal stack"
            );
        }
        *slot = Some(buf);
    });
}
