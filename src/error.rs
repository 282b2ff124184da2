use std::path::PathBuf;

/// Library-level structured errors for ngx2agw.
///
/// Use `thiserror` for structured errors that library consumers can match on.
/// The CLI binary wraps these with `anyhow` for rich context chains.
#[derive(Debug, thiserror::Error)]
pub enum TransformError {
	#[error("Failed to read input file: {path}")]
	InputRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to write output file: {path}")]
	OutputWrite {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to serialize configuration document")]
	Serialize(#[from] serde_json::Error),

	#[error("Invalid proxy_pass URL: {url}")]
	InvalidProxyUrl {
		url: String,
		#[source]
		source: url::ParseError,
	},

	#[error("proxy_pass URL has no host: {url}")]
	MissingHost { url: String },

	#[error("proxy_pass host has no subdomain to use as service name: {host}")]
	MissingSubdomain { host: String },

	#[error("Failed to read config file: {path}")]
	ConfigRead {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to parse config file: {path}")]
	ConfigParse {
		path: PathBuf,
		#[source]
		source: toml::de::Error,
	},

	#[error("Rule sequence step must be greater than zero (got {step})")]
	InvalidSequenceStep { step: u32 },

	#[error("Rule sequence ran past u32::MAX (start {start}, step {step})")]
	SequenceOverflow { start: u32, step: u32 },

	#[error("Invalid regex pattern: {pattern}")]
	InvalidRegex {
		pattern: String,
		#[source]
		source: regex::Error,
	},

	#[error("Failed to open log file: {path}")]
	LogFileOpen {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("Failed to resolve home directory")]
	HomeDirectoryNotFound,
}

/// Result type alias using TransformError.
pub type Result<T> = std::result::Result<T, TransformError>;
