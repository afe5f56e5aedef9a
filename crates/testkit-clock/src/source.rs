use std::sync::OnceLock;
use std::time::Instant;

/// One of the three time sources a [`crate::CodeTimer`] composes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClockSource {
    /// Monotonic wall-clock time.
    Real,
    /// Total CPU time consumed by this process.
    ProcessCpu,
    /// CPU time consumed by the calling thread.
    ThreadCpu,
}

/// Process start instant, used as the fixed origin for [`ClockSource::Real`].
fn real_origin() -> &'static Instant {
    static ORIGIN: OnceLock<Instant> = OnceLock::new();
    ORIGIN.get_or_init(Instant::now)
}

fn warn_once_cpu_clock_unavailable() {
    static WARNED: OnceLock<()> = OnceLock::new();
    WARNED.get_or_init(|| {
        tracing::warn!(
            "no per-process/per-thread CPU clock on this platform; CodeTimer falls back to the real clock for both"
        );
    });
}

/// Read `source` as nanoseconds from its fixed origin.
///
/// Only differences between two readings of the same source are meaningful;
/// the absolute value has no defined meaning across sources.
pub fn now_ns(source: ClockSource) -> i64 {
    match source {
        ClockSource::Real => real_origin().elapsed().as_nanos() as i64,
        #[cfg(unix)]
        ClockSource::ProcessCpu => unix_clock_ns(libc::CLOCK_PROCESS_CPUTIME_ID),
        #[cfg(unix)]
        ClockSource::ThreadCpu => unix_clock_ns(libc::CLOCK_THREAD_CPUTIME_ID),
        #[cfg(not(unix))]
        ClockSource::ProcessCpu | ClockSource::ThreadCpu => {
            warn_once_cpu_clock_unavailable();
            real_origin().elapsed().as_nanos() as i64
        }
    }
}

#[cfg(unix)]
fn unix_clock_ns(clock_id: libc::clockid_t) -> i64 {
    let mut ts = libc::timespec {
        tv_sec: 0,
        tv_nsec: 0,
    };
    // SAFETY: `ts` is a valid, uniquely-owned out-parameter; `clock_id` is one
    // of the two process/thread CPU-time clocks, both always supported on
    // Linux and macOS.
    let rc = unsafe { libc::clock_gettime(clock_id, &mut ts) };
    if rc != 0 {
        warn_once_cpu_clock_unavailable();
        return real_origin().elapsed().as_nanos() as i64;
    }
    ts.tv_sec
        .saturating_mul(1_000_000_000)
        .saturating_add(i64::from(ts.tv_nsec))
}
