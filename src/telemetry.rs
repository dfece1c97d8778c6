//! Diagnostic logging setup.
//!
//! Console status lines go to stdout through `println!`. Everything else
//! (per-file errors, dropped clauses, debug traces) goes through `tracing`
//! to stderr.

use std::io::{self, IsTerminal};
use std::sync::OnceLock;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV_VAR: &str = "DRIZZLE_FIX_LOG";

static TELEMETRY_GUARD: OnceLock<()> = OnceLock::new();

/// Errors encountered while configuring logging.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
	#[error("invalid log filter: {0}")]
	Filter(String),

	#[error("failed to install log subscriber: {0}")]
	Subscriber(String),
}

/// Pick the filter directive: the environment wins, then `--verbose`.
pub fn filter_directive(verbose: bool) -> String {
	match std::env::var(LOG_ENV_VAR) {
		Ok(value) if !value.trim().is_empty() => value,
		_ if verbose => "debug".to_string(),
		_ => "warn".to_string(),
	}
}

/// Install the global stderr subscriber. Later calls are no-ops.
pub fn init(verbose: bool) -> Result<(), TelemetryError> {
	if TELEMETRY_GUARD.get().is_some() {
		return Ok(());
	}

	let filter = EnvFilter::try_new(filter_directive(verbose))
		.map_err(|error| TelemetryError::Filter(error.to_string()))?;

	let subscriber = fmt::Subscriber::builder()
		.with_env_filter(filter)
		.with_target(false)
		.without_time()
		.with_writer(io::stderr)
		.with_ansi(io::stderr().is_terminal())
		.finish();

	tracing::subscriber::set_global_default(subscriber)
		.map_err(|error| TelemetryError::Subscriber(error.to_string()))?;
	let _ = TELEMETRY_GUARD.set(());
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_filter_directive() {
		// SAFETY: only this test touches this env var
		unsafe {
			std::env::remove_var(LOG_ENV_VAR);
			assert_eq!(filter_directive(false), "warn");
			assert_eq!(filter_directive(true), "debug");

			std::env::set_var(LOG_ENV_VAR, "drizzle_fix=trace");
			assert_eq!(filter_directive(false), "drizzle_fix=trace");

			std::env::set_var(LOG_ENV_VAR, "  ");
			assert_eq!(filter_directive(false), "warn");

			std::env::remove_var(LOG_ENV_VAR);
		}
	}
}
