use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use ngx2agw::config::{
	CONFIG_FILE_NAME, Settings, generate_init_template, load_configs, load_settings,
	merge_configs, user_config_path,
};
use ngx2agw::logging::{init_logging, init_logging_stdout};
use ngx2agw::transform::{render_document, transform_file};

#[derive(Parser)]
#[command(name = "ngx2agw")]
#[command(
	author,
	version,
	about = "Convert NGINX location/proxy_pass rules into Application Gateway rewrite and path rules"
)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Create a template .ngx2agw.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .ngx2agw.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,

	/// Use this config file instead of discovering .ngx2agw.toml
	#[arg(long, value_name = "FILE")]
	config: Option<PathBuf>,

	/// Directory to write <input name>.json into
	#[arg(long, value_name = "DIR")]
	output_dir: Option<PathBuf>,

	/// File that mirrors console diagnostics
	#[arg(long, value_name = "FILE")]
	log_file: Option<PathBuf>,

	/// Also print the generated JSON to stdout
	#[arg(long)]
	stdout: bool,

	/// NGINX configuration file [default: conf.d/mysite.conf]
	input: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display effective settings and the files they came from
	Show,
	/// Check all config files for errors without converting anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	if cli.init {
		return handle_init(cli.force);
	}

	if let Some(command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(cli.config.as_deref()),
				ConfigAction::Validate => handle_config_validate(cli.config.as_deref()),
			},
		};
	}

	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let mut settings =
		load_settings(&cwd, cli.config.as_deref()).context("Failed to load configuration")?;

	if let Some(input) = cli.input {
		settings.input = input;
	}
	if let Some(output_dir) = cli.output_dir {
		settings.output_dir = output_dir;
	}
	if let Some(log_file) = cli.log_file {
		settings.log_file = log_file;
	}

	handle_transform(&settings, cli.stdout)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	std::fs::write(&config_path, generate_init_template())
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

fn handle_transform(settings: &Settings, print_json: bool) -> Result<ExitCode> {
	if let Err(e) = init_logging(&settings.log_file) {
		init_logging_stdout();
		tracing::warn!("Logging to stdout only: {e}");
	}

	let report = transform_file(settings)
		.with_context(|| format!("Failed to convert {}", settings.input.display()))?;

	if print_json {
		println!("{}", render_document(report.document.as_ref())?);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(explicit: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let configs = load_configs(&cwd, explicit).context("Failed to load config files")?;

	if configs.is_empty() {
		println!("No configuration files found; using built-in defaults.\n");
	} else {
		println!("Configuration files (in cascade order):");
		for loaded in &configs {
			println!("  {}", loaded.path.display());
		}
		println!();
	}

	let settings = merge_configs(&configs);
	print_settings(&settings);

	if let Ok(user_path) = user_config_path() {
		println!();
		println!("User config path: {}", user_path.display());
		if user_path.exists() {
			println!("  (exists)");
		} else {
			println!("  (not found)");
		}
	}

	Ok(ExitCode::SUCCESS)
}

fn print_settings(settings: &Settings) {
	println!("input: {}", settings.input.display());
	println!("output-dir: {}", settings.output_dir.display());
	println!("log-file: {}", settings.log_file.display());
	println!("sequence.start: {}", settings.sequence_start);
	println!("sequence.step: {}", settings.sequence_step);
	println!("url-path-map.name: {}", settings.url_path_map.name);
	println!(
		"url-path-map.default-backend-address-pool-name: {}",
		settings.url_path_map.default_backend_address_pool_name
	);
	println!(
		"url-path-map.default-backend-http-settings-name: {}",
		settings.url_path_map.default_backend_http_settings_name
	);
}

fn handle_config_validate(explicit: Option<&Path>) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match load_configs(&cwd, explicit) {
		Ok(configs) => {
			if configs.is_empty() {
				println!("No configuration files found.");
			} else {
				println!("All configuration files are valid:");
				for loaded in &configs {
					println!("  {}", display_relative(&loaded.path, &cwd));
				}
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {}", e);
			Ok(ExitCode::FAILURE)
		}
	}
}

fn display_relative(path: &Path, base: &Path) -> String {
	path.strip_prefix(base)
		.unwrap_or(path)
		.display()
		.to_string()
}
