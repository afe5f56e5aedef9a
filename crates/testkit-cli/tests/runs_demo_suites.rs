//! Exercises the registry → runner → emitter wiring end to end against
//! `testkit-demo-suites`, the same path `main.rs` drives for a real CLI
//! invocation.

use std::sync::{Arc, Mutex};

use testkit_emitters::LogSink;
use testkit_protocol::{EventSink, SuiteDescriptor};
use testkit_registry::Registry;
use testkit_runner::Runner;

// `testkit-demo-suites` registers its suites via `inventory` the moment
// this crate links it; nothing else needed to make them discoverable.
extern crate testkit_demo_suites as _;

// `Runner` enforces one active run per process; these tests share that
// process, so they must not overlap.
static SERIAL: Mutex<()> = Mutex::new(());

fn find<'a>(suites: &'a [&'static dyn SuiteDescriptor], name: &str) -> &'a &'static dyn SuiteDescriptor {
    suites.iter().find(|s| s.name() == name).unwrap_or_else(|| panic!("demo suite '{name}' not registered"))
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

#[test]
fn arithmetic_suite_passes_entirely() {
    let _guard = SERIAL.lock();
    let out = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink: Arc<dyn EventSink> = LogSink::boxed(Box::new(VecWriter(out.clone())), true, false);

    let all = Registry::global().suites();
    let suite = *find(all, "arithmetic");
    let mut runner = Runner::start(vec![suite], 2, sink).unwrap();
    let failed = runner.wait_termination();

    assert_eq!(failed, 0);
    let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
    assert!(text.contains("arithmetic::addition: ok"));
    assert!(text.contains("arithmetic::subtraction: ok"));
}

#[test]
fn faulty_suite_reports_a_runtime_error_and_fails() {
    let _guard = SERIAL.lock();
    let out = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink: Arc<dyn EventSink> = LogSink::boxed(Box::new(VecWriter(out.clone())), true, false);

    let all = Registry::global().suites();
    let suite = *find(all, "faulty");
    let mut runner = Runner::start(vec![suite], 1, sink).unwrap();
    let failed = runner.wait_termination();

    assert_eq!(failed, 1);
    let text = String::from_utf8(out.lock().unwrap().clone()).unwrap();
    assert!(text.contains("runtime error"));
    assert!(text.contains("faulty::divides_by_zero: FAILED"));
}

#[test]
fn empty_suite_reports_zero_of_zero() {
    let _guard = SERIAL.lock();
    let out = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink: Arc<dyn EventSink> = LogSink::boxed(Box::new(VecWriter(out.clone())), true, false);

    let all = Registry::global().suites();
    let suite = *find(all, "empty");
    let mut runner = Runner::start(vec![suite], 1, sink).unwrap();
    let failed = runner.wait_termination();

    assert_eq!(failed, 0);
}

#[test]
fn inline_worker_count_runs_on_the_calling_thread() {
    let _guard = SERIAL.lock();
    let out = Arc::new(std::sync::Mutex::new(Vec::new()));
    let sink: Arc<dyn EventSink> = LogSink::boxed(Box::new(VecWriter(out.clone())), false, false);

    let all = Registry::global().suites();
    let suite = *find(all, "arithmetic");
    let mut runner = Runner::start(vec![suite], 0, sink).unwrap();
    let failed = runner.wait_termination();

    assert_eq!(failed, 0);
}
