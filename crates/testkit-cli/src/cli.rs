//! Command-line interface definition for the `testkit` binary.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use testkit_logging::LogArgs;

/// Discover and run registered test suites.
#[derive(Parser, Debug)]
#[command(name = "testkit", about = "Run registered test suites", version)]
pub struct Cli {
    /// Print suite names one per line and exit.
    #[arg(short = 'l', long)]
    pub list: bool,

    /// Verbose output (passed through to the selected emitter).
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Include timing information in LOG output.
    #[arg(short = 's', long)]
    pub stats: bool,

    /// Worker count: a number, `0` for inline (single-threaded, no spawned
    /// workers), or `max` for `std::thread::available_parallelism()`.
    #[arg(short = 'n', long, default_value = "max", value_parser = parse_nthreads)]
    pub nthreads: usize,

    /// Write output to this file instead of stdout (truncates if it
    /// already exists).
    #[arg(short = 'o', long, value_name = "PATH")]
    pub out: Option<PathBuf>,

    /// Output format.
    #[arg(short = 't', long, value_enum, default_value_t = OutputType::Log)]
    pub r#type: OutputType,

    /// Logging controls shared across this workspace's binaries.
    #[command(flatten)]
    pub log: LogArgs,

    /// Suite names to run (case-folded exact match against the registered
    /// name). Empty runs every registered suite.
    #[arg(value_name = "SUITE")]
    pub suites: Vec<String>,
}

/// Selects which [`testkit_protocol::EventSink`] renders the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputType {
    /// Human-readable text.
    Log,
    /// Newline-delimited JSON.
    Js,
    /// Test Anything Protocol.
    Tap,
}

fn parse_nthreads(raw: &str) -> Result<usize, String> {
    if raw.eq_ignore_ascii_case("max") {
        return Ok(std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get));
    }
    raw.parse::<usize>().map_err(|_| format!("'{raw}' is not a number or 'max'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nthreads_accepts_a_plain_number() {
        assert_eq!(parse_nthreads("4").unwrap(), 4);
    }

    #[test]
    fn nthreads_accepts_zero_for_inline() {
        assert_eq!(parse_nthreads("0").unwrap(), 0);
    }

    #[test]
    fn nthreads_accepts_max_case_insensitively() {
        assert!(parse_nthreads("Max").unwrap() >= 1);
    }

    #[test]
    fn nthreads_rejects_garbage() {
        assert!(parse_nthreads("banana").is_err());
    }

    #[test]
    fn default_type_is_log() {
        let cli = Cli::parse_from(["testkit"]);
        assert_eq!(cli.r#type, OutputType::Log);
        assert_eq!(cli.nthreads, std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get));
    }

    #[test]
    fn positional_args_collect_as_suite_names() {
        let cli = Cli::parse_from(["testkit", "alpha", "beta"]);
        assert_eq!(cli.suites, vec!["alpha".to_string(), "beta".to_string()]);
    }
}
