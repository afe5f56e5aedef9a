use std::collections::HashMap;
use std::io::Write;

use parking_lot::Mutex;

/// Per-worker text accumulation, flushed to a shared writer at
/// `CaseFinish`/`SuiteFinish` boundaries.
///
/// Events from one worker accumulate in isolation from other workers, so
/// interleaved output from concurrent suites never tears a single case's
/// lines apart.
pub(crate) struct WorkerBuffers {
    pending: Mutex<HashMap<u32, String>>,
    out: Mutex<Box<dyn Write + Send>>,
}

impl WorkerBuffers {
    pub(crate) fn new(out: Box<dyn Write + Send>) -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            out: Mutex::new(out),
        }
    }

    /// Append `text` to `worker_idx`'s pending buffer without flushing.
    pub(crate) fn push(&self, worker_idx: u32, text: &str) {
        self.pending.lock().entry(worker_idx).or_default().push_str(text);
    }

    /// Write `worker_idx`'s pending buffer straight to the shared
    /// destination, bypassing accumulation (used for control-thread
    /// events, which are never interleaved with worker output).
    pub(crate) fn write_direct(&self, text: &str) {
        let mut out = self.out.lock();
        let _ = out.write_all(text.as_bytes());
        let _ = out.flush();
    }

    /// Drain and write `worker_idx`'s accumulated buffer.
    pub(crate) fn flush(&self, worker_idx: u32) {
        let text = self.pending.lock().remove(&worker_idx).unwrap_or_default();
        if text.is_empty() {
            return;
        }
        self.write_direct(&text);
    }
}
