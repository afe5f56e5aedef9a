use std::io::Write;
use std::sync::Arc;

use testkit_protocol::{AssertKind, Event, EventSink, FaultKind, SrcInfo};

use crate::buffer::WorkerBuffers;

/// Everything `JsonSink` can render as one line (or pretty block) of JSON.
#[derive(serde::Serialize)]
#[serde(tag = "record")]
enum Record<'a> {
    /// A lifecycle event, flattened so its own `kind` tag stays visible.
    Event {
        #[serde(flatten)]
        event: &'a Event,
    },
    /// A trace message emitted from inside a running case.
    Trace {
        worker_idx: u32,
        src: SrcInfo,
        message: &'a str,
    },
    /// A failed single-operand assertion.
    UnaryAssertFail {
        worker_idx: u32,
        src: SrcInfo,
        assert_kind: AssertKind,
        operand: &'a str,
    },
    /// A failed two-operand assertion.
    BinaryAssertFail {
        worker_idx: u32,
        src: SrcInfo,
        assert_kind: AssertKind,
        operand_a: &'a str,
        operand_b: &'a str,
    },
    /// A fault intercepted by the sandbox.
    RuntimeError {
        worker_idx: u32,
        fault: &'a FaultKind,
    },
}

/// Newline-delimited JSON output, one [`Record`] per line (pretty-printed
/// when `verbose` is set).
///
/// Buffers per worker and flushes whole at `CaseFinish`/`SuiteFinish`, same
/// as [`crate::LogSink`], so a consumer streaming the file sees complete
/// cases rather than interleaved partial lines from concurrent workers.
pub struct JsonSink {
    buffers: WorkerBuffers,
    pretty: bool,
}

impl JsonSink {
    /// Build a sink writing to `out`. `pretty` pretty-prints each record.
    pub fn new(out: Box<dyn Write + Send>, pretty: bool) -> Self {
        Self {
            buffers: WorkerBuffers::new(out),
            pretty,
        }
    }

    /// Build an `Arc<dyn EventSink>` writing to `out`.
    pub fn boxed(out: Box<dyn Write + Send>, pretty: bool) -> Arc<dyn EventSink> {
        Arc::new(Self::new(out, pretty))
    }

    fn render(&self, record: &Record<'_>) -> String {
        let rendered = if self.pretty {
            serde_json::to_string_pretty(record)
        } else {
            serde_json::to_string(record)
        };
        let mut line = rendered.unwrap_or_else(|err| {
            tracing::warn!(error = %err, "testkit-emitters: failed to serialize a record, dropping it");
            String::new()
        });
        line.push('\n');
        line
    }
}

impl EventSink for JsonSink {
    fn on_event(&self, event: Event) {
        let worker_idx = event_worker_idx(&event);
        let line = self.render(&Record::Event { event: &event });
        match &event {
            Event::RunnerStart { .. } | Event::RunnerFinish { .. } => self.buffers.write_direct(&line),
            Event::SuiteError { .. } | Event::SuiteFinish { .. } | Event::CaseFinish { .. } => {
                self.buffers.push(worker_idx, &line);
                self.buffers.flush(worker_idx);
            }
            Event::SuiteStart { .. } | Event::CaseStart { .. } => {
                self.buffers.push(worker_idx, &line);
            }
        }
    }

    fn on_trace(&self, worker_idx: u32, src: SrcInfo, message: String) {
        let line = self.render(&Record::Trace {
            worker_idx,
            src,
            message: &message,
        });
        self.buffers.push(worker_idx, &line);
    }

    fn on_unary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, operand: &str) {
        let line = self.render(&Record::UnaryAssertFail {
            worker_idx,
            src,
            assert_kind: kind,
            operand,
        });
        self.buffers.push(worker_idx, &line);
    }

    fn on_binary_assert_fail(&self, worker_idx: u32, src: SrcInfo, kind: AssertKind, op_a: &str, op_b: &str) {
        let line = self.render(&Record::BinaryAssertFail {
            worker_idx,
            src,
            assert_kind: kind,
            operand_a: op_a,
            operand_b: op_b,
        });
        self.buffers.push(worker_idx, &line);
    }

    fn on_runtime_error(&self, worker_idx: u32, fault: FaultKind) {
        let line = self.render(&Record::RuntimeError {
            worker_idx,
            fault: &fault,
        });
        self.buffers.push(worker_idx, &line);
    }
}

fn event_worker_idx(event: &Event) -> u32 {
    match *event {
        Event::RunnerStart { .. } | Event::RunnerFinish { .. } => 0,
        Event::SuiteError { worker_idx, .. }
        | Event::SuiteStart { worker_idx, .. }
        | Event::SuiteFinish { worker_idx, .. }
        | Event::CaseStart { worker_idx, .. }
        | Event::CaseFinish { worker_idx, .. } => worker_idx,
    }
}
