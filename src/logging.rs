//! Logging init: console plus a mirror file, or console only as a fallback.

use crate::error::{Result, TransformError};
use std::fs::File;
use std::io::IsTerminal;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "info,ngx2agw=debug";

fn stdout_ansi() -> bool {
	std::io::stdout().is_terminal()
}

fn env_filter() -> EnvFilter {
	EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize logging to stdout and to `log_file` (truncated).
///
/// On failure to create the file, returns Err so the caller can fall back to stdout only.
pub fn init_logging(log_file: &Path) -> Result<()> {
	let file = File::create(log_file).map_err(|source| TransformError::LogFileOpen {
		path: log_file.to_path_buf(),
		source,
	})?;

	tracing_subscriber::registry()
		.with(env_filter())
		.with(
			fmt::layer()
				.with_target(false)
				.with_ansi(stdout_ansi())
				.with_writer(std::io::stdout),
		)
		.with(
			fmt::layer()
				.with_target(false)
				.with_ansi(false)
				.with_writer(Mutex::new(file)),
		)
		.init();

	tracing::debug!("Logging to stdout and {}", log_file.display());

	Ok(())
}

/// Initialize logging to stdout only. Use when init_logging() fails so the CLI doesn't crash.
pub fn init_logging_stdout() {
	tracing_subscriber::registry()
		.with(env_filter())
		.with(
			fmt::layer()
				.with_target(false)
				.with_ansi(stdout_ansi())
				.with_writer(std::io::stdout),
		)
		.init();
}
