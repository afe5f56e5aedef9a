use thiserror::Error;

use crate::source::{ClockSource, now_ns};

/// Errors produced by [`CodeTimer`] operations.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeTimerError {
    /// `start()` was called on a timer that is already running.
    #[error("CodeTimer::start called while already running")]
    AlreadyRunning,
}

/// A start/stop pair over the three [`ClockSource`]s.
///
/// While running, all readings are zero. After `stop()`, each reading is the
/// non-negative elapsed nanoseconds on that source between `start()` and
/// `stop()`.
#[derive(Debug, Clone, Copy, Default, serde::Serialize, serde::Deserialize)]
pub struct CodeTimer {
    running: bool,
    #[serde(skip)]
    start_ns: [i64; 3],
    elapsed_ns: [i64; 3],
}

const REAL: usize = 0;
const PROCESS_CPU: usize = 1;
const THREAD_CPU: usize = 2;

impl CodeTimer {
    /// A fresh, stopped timer with all readings at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot all three clocks. Errors if the timer is already running.
    pub fn start(&mut self) -> Result<(), CodeTimerError> {
        if self.running {
            return Err(CodeTimerError::AlreadyRunning);
        }
        self.start_ns = [
            now_ns(ClockSource::Real),
            now_ns(ClockSource::ProcessCpu),
            now_ns(ClockSource::ThreadCpu),
        ];
        self.elapsed_ns = [0; 3];
        self.running = true;
        Ok(())
    }

    /// Snapshot all three clocks again and compute non-negative deltas.
    ///
    /// A no-op (leaves `elapsed_ns` at its prior value) if the timer was not
    /// running.
    pub fn stop(&mut self) {
        if !self.running {
            return;
        }
        let now = [
            now_ns(ClockSource::Real),
            now_ns(ClockSource::ProcessCpu),
            now_ns(ClockSource::ThreadCpu),
        ];
        for i in 0..3 {
            self.elapsed_ns[i] = now[i].saturating_sub(self.start_ns[i]).max(0);
        }
        self.running = false;
    }

    /// Whether `stop()` has not yet been called since the last `start()`.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Elapsed monotonic wall-clock nanoseconds. Zero while running.
    pub fn elapsed_real_ns(&self) -> i64 {
        if self.running {
            0
        } else {
            self.elapsed_ns[REAL]
        }
    }

    /// Elapsed process CPU nanoseconds. Zero while running.
    pub fn elapsed_process_cpu_ns(&self) -> i64 {
        if self.running {
            0
        } else {
            self.elapsed_ns[PROCESS_CPU]
        }
    }

    /// Elapsed thread CPU nanoseconds. Zero while running.
    pub fn elapsed_thread_cpu_ns(&self) -> i64 {
        if self.running {
            0
        } else {
            self.elapsed_ns[THREAD_CPU]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn running_timer_reports_zero() {
        let mut t = CodeTimer::new();
        t.start().unwrap();
        assert_eq!(t.elapsed_real_ns(), 0);
        assert_eq!(t.elapsed_process_cpu_ns(), 0);
        assert_eq!(t.elapsed_thread_cpu_ns(), 0);
    }

    #[test]
    fn stopped_timer_reports_nonnegative_elapsed() {
        let mut t = CodeTimer::new();
        t.start().unwrap();
        thread::sleep(Duration::from_millis(5));
        t.stop();
        assert!(t.elapsed_real_ns() > 0);
        assert!(t.elapsed_process_cpu_ns() >= 0);
        assert!(t.elapsed_thread_cpu_ns() >= 0);
    }

    #[test]
    fn double_start_errors() {
        let mut t = CodeTimer::new();
        t.start().unwrap();
        assert_eq!(t.start(), Err(CodeTimerError::AlreadyRunning));
    }

    #[test]
    fn stop_without_start_is_noop() {
        let mut t = CodeTimer::new();
        t.stop();
        assert_eq!(t.elapsed_real_ns(), 0);
    }

    proptest::proptest! {
        #[test]
        fn elapsed_never_negative(sleep_ms in 0u64..20) {
            let mut t = CodeTimer::new();
            t.start().unwrap();
            thread::sleep(Duration::from_millis(sleep_ms));
            t.stop();
            prop_assert!(t.elapsed_real_ns() >= 0);
            prop_assert!(t.elapsed_process_cpu_ns() >= 0);
            prop_assert!(t.elapsed_thread_cpu_ns() >= 0);
        }
    }
}
