use crate::config::parser::parse_config_file;
use crate::config::types::{Config, LoadedConfig, Settings, UrlPathMapSettings};
use crate::error::{Result, TransformError};
use std::path::{Path, PathBuf};

/// Name of the config file looked up in each directory.
pub const CONFIG_FILE_NAME: &str = ".ngx2agw.toml";

/// Discover and load all config files in the cascade.
///
/// The cascade order is:
/// 1. Start from `start_dir` and look for `.ngx2agw.toml`
/// 2. If found and `root = true`, stop there
/// 3. Otherwise, continue up the directory tree
/// 4. Finally, check ~/.ngx2agw.toml (unless a `root` config was found)
///
/// Returns configs in cascade order (most specific first).
pub fn discover_configs(start_dir: &Path) -> Result<Vec<LoadedConfig>> {
	let home_dir = dirs::home_dir();
	discover_configs_with_home(start_dir, home_dir.as_deref())
}

/// Same as [`discover_configs`], with an explicit home directory.
pub fn discover_configs_with_home(
	start_dir: &Path,
	home_dir: Option<&Path>,
) -> Result<Vec<LoadedConfig>> {
	let mut configs = Vec::new();
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			let root = config.root;

			tracing::debug!("Loaded config {}", config_path.display());
			configs.push(LoadedConfig {
				config,
				path: config_path,
			});

			if root {
				return Ok(configs);
			}
		}

		current_dir = dir.parent();
	}

	if let Some(home) = home_dir {
		let user_config_path = home.join(CONFIG_FILE_NAME);
		let already_loaded = configs.iter().any(|c| c.path == user_config_path);

		if user_config_path.is_file() && !already_loaded {
			let config = parse_config_file(&user_config_path)?;
			configs.push(LoadedConfig {
				config,
				path: user_config_path,
			});
		}
	}

	Ok(configs)
}

/// Resolve effective settings from configs in cascade order.
///
/// For every field the most specific config that sets it wins; unset fields
/// keep the built-in defaults.
pub fn merge_configs(configs: &[LoadedConfig]) -> Settings {
	let defaults = Settings::default();
	let map = &defaults.url_path_map;

	Settings {
		input: first_set(configs, |c| c.input.clone()).unwrap_or(defaults.input.clone()),
		output_dir: first_set(configs, |c| c.output_dir.clone())
			.unwrap_or(defaults.output_dir.clone()),
		log_file: first_set(configs, |c| c.log_file.clone()).unwrap_or(defaults.log_file.clone()),
		sequence_start: first_set(configs, |c| c.sequence.start).unwrap_or(defaults.sequence_start),
		sequence_step: first_set(configs, |c| c.sequence.step).unwrap_or(defaults.sequence_step),
		url_path_map: UrlPathMapSettings {
			name: first_set(configs, |c| c.url_path_map.name.clone())
				.unwrap_or(map.name.clone()),
			default_backend_address_pool_name: first_set(configs, |c| {
				c.url_path_map.default_backend_address_pool_name.clone()
			})
			.unwrap_or(map.default_backend_address_pool_name.clone()),
			default_backend_http_settings_name: first_set(configs, |c| {
				c.url_path_map.default_backend_http_settings_name.clone()
			})
			.unwrap_or(map.default_backend_http_settings_name.clone()),
		},
	}
}

/// Value of a field from the most specific config that sets it.
fn first_set<T>(configs: &[LoadedConfig], field: impl Fn(&Config) -> Option<T>) -> Option<T> {
	configs.iter().find_map(|loaded| field(&loaded.config))
}

/// Load an explicit config file, or discover the cascade from `start_dir`.
pub fn load_configs(start_dir: &Path, explicit: Option<&Path>) -> Result<Vec<LoadedConfig>> {
	match explicit {
		Some(path) => Ok(vec![LoadedConfig {
			config: parse_config_file(path)?,
			path: path.to_path_buf(),
		}]),
		None => discover_configs(start_dir),
	}
}

/// Load settings from an explicit config file, or by cascade discovery from `start_dir`.
pub fn load_settings(start_dir: &Path, explicit: Option<&Path>) -> Result<Settings> {
	Ok(merge_configs(&load_configs(start_dir, explicit)?))
}

/// Get the path to the user's config file.
pub fn user_config_path() -> Result<PathBuf> {
	let home_dir = dirs::home_dir().ok_or(TransformError::HomeDirectoryNotFound)?;
	Ok(home_dir.join(CONFIG_FILE_NAME))
}
