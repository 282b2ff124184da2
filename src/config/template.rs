use crate::config::types::{
	DEFAULT_INPUT, DEFAULT_LOG_FILE, HOST_NAME_PLACEHOLDER, WORKLOAD_NAME_PLACEHOLDER,
};
use crate::rules::sequence::{DEFAULT_START, DEFAULT_STEP};

/// Generate a commented `.ngx2agw.toml` holding the built-in defaults.
pub fn generate_init_template() -> String {
	format!(
		r#"# ngx2agw configuration
# Files are discovered from the working directory upward; the most specific wins.

# Stop looking in parent directories and ~/.ngx2agw.toml
root = true

# NGINX configuration to convert
input = "{DEFAULT_INPUT}"

# Where <input name>.json is written
output-dir = "."

# Diagnostics are written to the console and to this file
log-file = "{DEFAULT_LOG_FILE}"

[sequence]
start = {DEFAULT_START}
step = {DEFAULT_STEP}

# Placeholders are left for downstream template substitution
[url-path-map]
name = "{HOST_NAME_PLACEHOLDER}"
default-backend-address-pool-name = "pool-default-{WORKLOAD_NAME_PLACEHOLDER}"
default-backend-http-settings-name = "settings-default-{WORKLOAD_NAME_PLACEHOLDER}"
"#
	)
}
