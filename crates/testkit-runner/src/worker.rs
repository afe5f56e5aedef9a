use std::sync::atomic::Ordering;

use testkit_clock::CodeTimer;
use testkit_protocol::{CaseDescriptor, Event, SuiteDescriptor, SuiteInstance};
use testkit_sandbox::Sandbox;

use crate::shared::{Shared, WorkerOutcome};

/// The body of one worker thread: pull suites off the shared work queue
/// until it's drained or `stop()` is observed, running each one under a
/// fresh [`Sandbox`] bound to this worker's index.
pub(crate) fn worker_loop(worker_idx: u32, shared: &Shared) -> WorkerOutcome {
    let sandbox = Sandbox::new(shared.sink.clone(), worker_idx);
    let mut outcome = WorkerOutcome::default();

    loop {
        if shared.stop_requested.load(Ordering::Relaxed) {
            break;
        }
        let idx = shared.next_suite_idx.fetch_add(1, Ordering::Relaxed);
        let Some(suite) = shared.suites.get(idx).copied() else {
            break;
        };
        run_suite(worker_idx, suite, shared, &sandbox, &mut outcome);
    }

    outcome
}

fn run_suite(
    worker_idx: u32,
    suite: &'static dyn SuiteDescriptor,
    shared: &Shared,
    sandbox: &Sandbox,
    outcome: &mut WorkerOutcome,
) {
    let case_count = suite.case_count() as u32;
    let suite_name = suite.name().to_string();

    let Some(mut instance) = sandbox.run_construction(suite, shared.sink.clone(), worker_idx) else {
        shared.sink.on_event(Event::SuiteError {
            worker_idx,
            suite: suite_name,
            case_count,
        });
        shared.failed_count.fetch_add(1, Ordering::Relaxed);
        return;
    };

    shared.sink.on_event(Event::SuiteStart {
        worker_idx,
        suite: suite_name.clone(),
        case_count,
    });

    let mut timer = CodeTimer::new();
    timer.start().expect("a freshly created timer is never already running");
    let mut success = 0u32;
    let mut failed = 0u32;

    for case in suite.cases() {
        if shared.stop_requested.load(Ordering::Relaxed) {
            break;
        }
        let ok = run_case(worker_idx, &suite_name, *case, instance.as_mut(), sandbox, shared);
        if ok {
            success += 1;
        } else {
            failed += 1;
        }
    }

    timer.stop();
    sandbox.run_drop(instance);

    shared.sink.on_event(Event::SuiteFinish {
        worker_idx,
        suite: suite_name,
        total: case_count,
        success,
        failed,
        timer,
    });

    if failed > 0 {
        shared.failed_count.fetch_add(1, Ordering::Relaxed);
    } else {
        outcome.success += 1;
    }
}

/// Runs one case's setup/body/teardown trio, matching the fixture
/// lifecycle: a fault in setup skips body and teardown outright; a fault in
/// the body still runs teardown; a fault in teardown fails the case even if
/// the body passed.
fn run_case(
    worker_idx: u32,
    suite_name: &str,
    case: &'static dyn CaseDescriptor,
    instance: &mut dyn SuiteInstance,
    sandbox: &Sandbox,
    shared: &Shared,
) -> bool {
    let case_name = case.name().to_string();
    shared.sink.on_event(Event::CaseStart {
        worker_idx,
        suite: suite_name.to_string(),
        case: case_name.clone(),
    });

    let mut timer = CodeTimer::new();
    timer.start().expect("a freshly created timer is never already running");

    let ok = if sandbox.run_setup(instance) {
        let body_ok = sandbox.run_case(case, instance);
        let teardown_ok = sandbox.run_teardown(instance);
        body_ok && teardown_ok
    } else {
        false
    };

    timer.stop();
    shared.sink.on_event(Event::CaseFinish {
        worker_idx,
        suite: suite_name.to_string(),
        case: case_name,
        ok,
        timer,
    });

    ok
}
