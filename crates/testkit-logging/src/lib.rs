//! Shared logging CLI arguments and `tracing` subscriber setup for the
//! testkit workspace.
//!
//! [`LogArgs`] is meant to be flattened into a binary's `clap` parser;
//! [`install`] turns it into an installed `tracing_subscriber` filter, with
//! [`compute_spec`] exposed separately so callers (and tests) can inspect
//! the resolved filter string without installing a global subscriber.
#![warn(missing_docs)]

use std::env;

use clap::Args;
use tracing_subscriber::EnvFilter;

/// Crate targets included in this workspace's default logging directives.
const OUR_CRATES: &[&str] = &[
    "testkit_runner",
    "testkit_sandbox",
    "testkit_registry",
    "testkit_emitters",
    "testkit_cli",
];

/// Logging controls for CLI apps in this workspace.
#[derive(Debug, Clone, Args)]
pub struct LogArgs {
    /// Set global log level to trace (this workspace's crates only).
    #[arg(long, conflicts_with_all = ["debug", "log_level", "log_filter"])]
    pub trace: bool,

    /// Set global log level to debug (this workspace's crates only).
    #[arg(long, conflicts_with_all = ["trace", "log_level", "log_filter"])]
    pub debug: bool,

    /// Set a single global log level for this workspace's crates
    /// (error|warn|info|debug|trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Set an explicit tracing filter directive, overriding every other
    /// flag, e.g. `"testkit_runner=trace,testkit_sandbox=debug"`.
    #[arg(long)]
    pub log_filter: Option<String>,
}

/// Build crate-scoped directives for the given level.
fn crate_specs(level: &str) -> Vec<String> {
    let lvl = level.to_ascii_lowercase();
    OUR_CRATES.iter().map(|t| format!("{t}={lvl}")).collect()
}

/// Build a filter directive string that sets the same `level` for every
/// crate in this workspace.
pub fn level_spec_for(level: &str) -> String {
    crate_specs(level).join(",")
}

/// Compute the final filter spec string.
///
/// Precedence: `log_filter` > `trace`/`debug`/`log_level` (crate-scoped) >
/// `RUST_LOG` env > a crate-scoped `info` default.
pub fn compute_spec(trace: bool, debug: bool, log_level: Option<&str>, log_filter: Option<&str>) -> String {
    if let Some(spec) = log_filter {
        return spec.to_string();
    }
    if trace {
        return level_spec_for("trace");
    }
    if debug {
        return level_spec_for("debug");
    }
    if let Some(lvl) = log_level {
        return level_spec_for(lvl);
    }
    if let Ok(spec) = env::var("RUST_LOG") {
        return spec;
    }
    level_spec_for("info")
}

/// Resolve `args` into an `EnvFilter`.
pub fn env_filter_from(args: &LogArgs) -> EnvFilter {
    let spec = compute_spec(
        args.trace,
        args.debug,
        args.log_level.as_deref(),
        args.log_filter.as_deref(),
    );
    EnvFilter::new(spec)
}

/// Install a global `fmt` subscriber configured from `args`.
///
/// Intended to be called once, near the start of `main`. Writes to stderr
/// so that `-o/--out`-selected emitter output on stdout stays clean.
pub fn install(args: &LogArgs) {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter_from(args))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_filter_wins_over_everything() {
        let spec = compute_spec(true, true, Some("debug"), Some("testkit_runner=warn"));
        assert_eq!(spec, "testkit_runner=warn");
    }

    #[test]
    fn trace_flag_scopes_to_our_crates() {
        let spec = compute_spec(true, false, None, None);
        assert!(spec.contains("testkit_runner=trace"));
        assert!(spec.contains("testkit_sandbox=trace"));
    }

    #[test]
    fn log_level_is_used_when_trace_and_debug_are_both_unset() {
        let spec = compute_spec(false, false, Some("warn"), None);
        assert!(spec.contains("testkit_cli=warn"));
    }

    #[test]
    fn default_is_crate_scoped_info() {
        // SAFETY: test-only; no other test in this process reads RUST_LOG.
        unsafe {
            env::remove_var("RUST_LOG");
        }
        let spec = compute_spec(false, false, None, None);
        assert!(spec.contains("testkit_emitters=info"));
    }
}
