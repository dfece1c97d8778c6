use std::path::PathBuf;

/// Library-level structured errors for drizzle-fix.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum FixError {
	#[error("File not found: {path}")]
	NotFound { path: PathBuf },

	#[error("Failed to read file: {path}")]
	ReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write file: {path}")]
	WriteError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Config file not found: {path}")]
	ConfigNotFound { path: PathBuf },

	#[error("Failed to read config file: {path}")]
	ConfigReadError {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParseError {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Target listed more than once: {path}")]
	DuplicateTarget { path: PathBuf },

	#[error("Invalid regex pattern in rule: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},
}

/// Result type alias using FixError.
pub type Result<T> = std::result::Result<T, FixError>;
