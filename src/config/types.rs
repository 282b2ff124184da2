use crate::rules::sequence::{DEFAULT_START, DEFAULT_STEP};
use serde::Deserialize;
use std::path::PathBuf;

/// Input file read when none is given on the command line or in config.
pub const DEFAULT_INPUT: &str = "conf.d/mysite.conf";

/// Log file that mirrors console diagnostics.
pub const DEFAULT_LOG_FILE: &str = "transform_debug.log";

/// Template placeholder resolved downstream to the gateway host name.
pub const HOST_NAME_PLACEHOLDER: &str = "{{ env.hostName }}";

/// Template placeholder resolved downstream to the workload name.
pub const WORKLOAD_NAME_PLACEHOLDER: &str = "{{ env.fullWorkloadName }}";

/// Top-level configuration from a `.ngx2agw.toml` file.
///
/// Every field is optional; unset fields fall through to less specific files
/// and finally to the built-in defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Config {
	/// If true, stop the directory cascade here and skip ~/.ngx2agw.toml.
	#[serde(default)]
	pub root: bool,

	/// NGINX configuration file to convert.
	pub input: Option<PathBuf>,

	/// Directory the JSON document is written to.
	pub output_dir: Option<PathBuf>,

	/// File that mirrors console diagnostics.
	pub log_file: Option<PathBuf>,

	/// Rule sequence numbering.
	#[serde(default)]
	pub sequence: SequenceConfig,

	/// Names used for the generated URL path map.
	#[serde(default)]
	pub url_path_map: UrlPathMapConfig,
}

/// `[sequence]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SequenceConfig {
	pub start: Option<u32>,
	pub step: Option<u32>,
}

/// `[url-path-map]` table.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct UrlPathMapConfig {
	pub name: Option<String>,
	pub default_backend_address_pool_name: Option<String>,
	pub default_backend_http_settings_name: Option<String>,
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
	pub input: PathBuf,
	pub output_dir: PathBuf,
	pub log_file: PathBuf,
	pub sequence_start: u32,
	pub sequence_step: u32,
	pub url_path_map: UrlPathMapSettings,
}

/// Resolved names for the generated URL path map.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlPathMapSettings {
	pub name: String,
	pub default_backend_address_pool_name: String,
	pub default_backend_http_settings_name: String,
}

impl Default for UrlPathMapSettings {
	fn default() -> Self {
		UrlPathMapSettings {
			name: HOST_NAME_PLACEHOLDER.to_string(),
			default_backend_address_pool_name: format!("pool-default-{WORKLOAD_NAME_PLACEHOLDER}"),
			default_backend_http_settings_name: format!(
				"settings-default-{WORKLOAD_NAME_PLACEHOLDER}"
			),
		}
	}
}

impl Default for Settings {
	fn default() -> Self {
		Settings {
			input: PathBuf::from(DEFAULT_INPUT),
			output_dir: PathBuf::from("."),
			log_file: PathBuf::from(DEFAULT_LOG_FILE),
			sequence_start: DEFAULT_START,
			sequence_step: DEFAULT_STEP,
			url_path_map: UrlPathMapSettings::default(),
		}
	}
}

impl Config {
	/// Validate values that can't be expressed in the schema.
	pub fn validate(&self) -> Result<(), crate::error::TransformError> {
		if let Some(step) = self.sequence.step
			&& step == 0
		{
			return Err(crate::error::TransformError::InvalidSequenceStep { step });
		}
		Ok(())
	}
}
