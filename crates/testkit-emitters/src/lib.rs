//! [`testkit_protocol::EventSink`] implementations that render a run's
//! event stream as human-readable text, newline-delimited JSON, or TAP.
//!
//! All three buffer per worker (a `parking_lot::Mutex`-guarded map keyed
//! by worker index) and flush at `CaseFinish`/`SuiteFinish` boundaries, so
//! concurrent workers never interleave mid-case output. Any `std::io::Write`
//! works as the destination — a file opened by `testkit-cli`'s `-o/--out`,
//! or stdout otherwise.
#![warn(missing_docs)]

mod buffer;
mod json_sink;
mod log_sink;
mod tap_sink;

pub use json_sink::JsonSink;
pub use log_sink::LogSink;
pub use tap_sink::TapSink;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use testkit_clock::CodeTimer;
    use testkit_protocol::{Event, EventSink};

    use super::*;

    fn finished_timer() -> CodeTimer {
        let mut timer = CodeTimer::new();
        timer.start().unwrap();
        timer.stop();
        timer
    }

    #[test]
    fn log_sink_reports_a_failed_case() {
        let out = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = LogSink::new(Box::new(VecWriter(out.clone())), false, false);
        sink.on_event(Event::CaseStart {
            worker_idx: 0,
            suite: "s".into(),
            case: "c".into(),
        });
        sink.on_event(Event::CaseFinish {
            worker_idx: 0,
            suite: "s".into(),
            case: "c".into(),
            ok: false,
            timer: finished_timer(),
        });
        let written = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        assert!(written.contains("s::c: FAILED"));
    }

    #[test]
    fn json_sink_emits_one_line_per_case_finish() {
        let out = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = JsonSink::new(Box::new(VecWriter(out.clone())), false);
        sink.on_event(Event::CaseFinish {
            worker_idx: 0,
            suite: "s".into(),
            case: "c".into(),
            ok: true,
            timer: finished_timer(),
        });
        let written = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(written.trim()).unwrap();
        assert_eq!(parsed["kind"], "CaseFinish");
        assert_eq!(parsed["record"], "Event");
    }

    #[test]
    fn tap_sink_writes_plan_header_then_ok_lines() {
        let out = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = TapSink::new(Box::new(VecWriter(out.clone())), false);
        sink.on_event(Event::RunnerStart {
            max_workers: 1,
            total_suites: 1,
            total_cases: 2,
        });
        sink.on_event(Event::CaseFinish {
            worker_idx: 0,
            suite: "s".into(),
            case: "c".into(),
            ok: true,
            timer: finished_timer(),
        });
        let written = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        let mut lines = written.lines();
        assert_eq!(lines.next(), Some("1..2"));
        assert_eq!(lines.next(), Some("ok - [s::c]"));
    }

    #[test]
    fn tap_sink_marks_a_constructor_failure_as_not_ok_for_every_case() {
        let out = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = TapSink::new(Box::new(VecWriter(out.clone())), false);
        sink.on_event(Event::SuiteError {
            worker_idx: 0,
            suite: "s".into(),
            case_count: 2,
        });
        let written = String::from_utf8(out.lock().unwrap().clone()).unwrap();
        assert_eq!(written.lines().count(), 2);
        assert!(written.lines().all(|l| l.starts_with("not ok - [s]")));
    }

    struct VecWriter(Arc<std::sync::Mutex<Vec<u8>>>);

    impl std::io::Write for VecWriter {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }
}
