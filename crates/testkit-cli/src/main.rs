//! Entry point for the `testkit` binary: discovers registered suites, runs
//! them under the sandbox, and renders results in the selected format.
#![warn(missing_docs)]

mod cli;
mod signals;

use std::fs::File;
use std::io::{self, Write};
use std::process;
use std::sync::Arc;

use clap::Parser;
use testkit_emitters::{JsonSink, LogSink, TapSink};
use testkit_protocol::{EventSink, SuiteDescriptor};
use testkit_registry::Registry;
use testkit_runner::Runner;

use crate::cli::{Cli, OutputType};

fn main() {
    let cli = Cli::parse();
    testkit_logging::install(&cli.log);

    let registry = Registry::global();

    if cli.list {
        for suite in registry.suites() {
            println!("{}", suite.name());
        }
        return;
    }

    let selected = match select_suites(registry.suites(), &cli.suites) {
        Ok(selected) => selected,
        Err(unknown) => {
            for name in unknown {
                eprintln!("testkit: unknown suite '{name}'");
            }
            process::exit(1);
        }
    };

    let out: Box<dyn Write + Send> = match &cli.out {
        Some(path) => match File::create(path) {
            Ok(file) => Box::new(file),
            Err(err) => {
                eprintln!("testkit: failed to open '{}': {err}", path.display());
                process::exit(1);
            }
        },
        None => Box::new(io::stdout()),
    };

    let sink: Arc<dyn EventSink> = match cli.r#type {
        OutputType::Log => LogSink::boxed(out, cli.verbose, cli.stats),
        OutputType::Js => JsonSink::boxed(out, cli.verbose),
        OutputType::Tap => TapSink::boxed(out, cli.verbose),
    };

    let mut runner = match Runner::start(selected, cli.nthreads, sink) {
        Ok(runner) => runner,
        Err(err) => {
            eprintln!("testkit: {err}");
            process::exit(1);
        }
    };

    signals::install(runner.stop_handle());

    let failed = runner.wait_termination();
    process::exit(i32::from(u8::try_from(failed).unwrap_or(u8::MAX)));
}

/// Resolve the requested suite names against `suites`, case-folded exact
/// match. Empty `requested` selects everything. Returns the unmatched
/// names as `Err` rather than a partial selection.
fn select_suites(
    suites: &'static [&'static dyn SuiteDescriptor],
    requested: &[String],
) -> Result<Vec<&'static dyn SuiteDescriptor>, Vec<String>> {
    if requested.is_empty() {
        return Ok(suites.to_vec());
    }

    let mut selected = Vec::with_capacity(requested.len());
    let mut unknown = Vec::new();
    for name in requested {
        match suites.iter().find(|s| s.name().eq_ignore_ascii_case(name)) {
            Some(suite) => selected.push(*suite),
            None => unknown.push(name.clone()),
        }
    }

    if unknown.is_empty() { Ok(selected) } else { Err(unknown) }
}

#[cfg(test)]
mod tests {
    use testkit_protocol::{CaseDescriptor, SuiteInstance};

    use super::*;

    struct StubSuite(&'static str);

    impl SuiteDescriptor for StubSuite {
        fn name(&self) -> &'static str {
            self.0
        }
        fn cases(&self) -> &'static [&'static dyn CaseDescriptor] {
            &[]
        }
        fn instantiate(&self, _sink: Arc<dyn EventSink>, _worker_idx: u32) -> Option<Box<dyn SuiteInstance>> {
            None
        }
    }

    static ALPHA: StubSuite = StubSuite("alpha");
    static BETA: StubSuite = StubSuite("beta");
    static SUITES: &[&dyn SuiteDescriptor] = &[&ALPHA, &BETA];

    #[test]
    fn empty_selection_returns_everything() {
        let selected = select_suites(SUITES, &[]).unwrap();
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn matches_are_case_folded() {
        let selected = select_suites(SUITES, &["ALPHA".to_string()]).unwrap();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].name(), "alpha");
    }

    #[test]
    fn unknown_names_are_reported_without_a_partial_selection() {
        let err = select_suites(SUITES, &["alpha".to_string(), "gamma".to_string()]).unwrap_err();
        assert_eq!(err, vec!["gamma".to_string()]);
    }
}
