use crate::error::{Result, TransformError};
use regex::Regex;
use url::Host;

/// Pattern for a single-line `location <path> { proxy_pass <url><sub-path> ... }` block.
///
/// Anchored at the start of the line. Further `;`-terminated directives may follow
/// `proxy_pass` before the closing brace; nested blocks are not recognized.
pub const LOCATION_PATTERN: &str = r"^location\s+(?P<path>.+?)\s*\{\s*proxy_pass\s+(?P<url>https?://[^;/\s]+)(?P<proxy_path>/[^;\s}]*)\s*(?:;[^}]*)?\}";

const REQUIRED_GROUPS: [&str; 3] = ["path", "url", "proxy_path"];

/// Routing intent pulled out of one matched `location` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedRule {
	/// Short rule name: last path segment, hyphens and wildcards removed, lower-cased.
	pub name: String,

	/// Proxy sub-path without surrounding slashes, or `/` when it was empty.
	pub modified_path: String,

	/// The location path as written.
	pub path: String,

	/// Service name from the proxy target host: its first dot-separated label,
	/// cut at the first hyphen.
	pub hostname: String,
}

/// Compiled location/proxy_pass matcher.
#[derive(Debug)]
pub struct RuleExtractor {
	pattern: Regex,
}

impl RuleExtractor {
	/// Compile the built-in location pattern.
	pub fn new() -> Result<Self> {
		Self::with_pattern(LOCATION_PATTERN)
	}

	/// Compile a custom pattern. It must define the `path`, `url` and `proxy_path` groups.
	pub fn with_pattern(pattern: &str) -> Result<Self> {
		let compiled = Regex::new(pattern).map_err(|source| TransformError::InvalidRegex {
			pattern: pattern.to_string(),
			source,
		})?;

		let names: Vec<_> = compiled.capture_names().flatten().collect();
		for group in REQUIRED_GROUPS {
			if !names.contains(&group) {
				return Err(TransformError::InvalidRegex {
					pattern: pattern.to_string(),
					source: regex::Error::Syntax(format!("missing capture group '{group}'")),
				});
			}
		}

		Ok(RuleExtractor { pattern: compiled })
	}

	/// Try to extract a rule from one line.
	///
	/// Returns `Ok(None)` for lines that don't match. A matched line whose proxy host
	/// has no subdomain is an error.
	pub fn extract(&self, line: &str) -> Result<Option<ExtractedRule>> {
		let line = line.trim();

		let Some(caps) = self.pattern.captures(line) else {
			if line.starts_with("location") {
				tracing::warn!("No match: {}", line);
			}
			return Ok(None);
		};

		let group = |name: &str| caps.name(name).map_or("", |m| m.as_str());
		let path = group("path").trim().to_string();
		let proxy_url = group("url");
		let proxy_path = group("proxy_path");

		let hostname = service_name(proxy_url)?;

		tracing::info!("Matched line: {}", line);
		tracing::debug!(
			"Extracted [path: {}] [proxy_path: {}] [proxy_url: {}]",
			path,
			proxy_path,
			proxy_url
		);

		let trimmed = proxy_path.trim_matches('/');
		let (modified_path, name_source) = if trimmed.is_empty() {
			("/".to_string(), path.as_str())
		} else {
			(trimmed.to_string(), trimmed)
		};
		let name = rule_name(name_source);

		tracing::debug!("Extracted [name: {}] [modified_path: {}]", name, modified_path);

		Ok(Some(ExtractedRule {
			name,
			modified_path,
			path,
			hostname,
		}))
	}
}

/// Service name of the proxy URL's host, e.g. `backend` for `http://backend-svc.local`.
///
/// Only the host is validated; the port is ignored, whatever its value.
fn service_name(proxy_url: &str) -> Result<String> {
	let authority = proxy_url
		.split_once("://")
		.map_or(proxy_url, |(_, rest)| rest);
	let authority = authority
		.rsplit_once('@')
		.map_or(authority, |(_, host_port)| host_port);
	let host_part = if authority.starts_with('[') {
		authority.find(']').map_or(authority, |end| &authority[..=end])
	} else {
		authority.split_once(':').map_or(authority, |(host, _)| host)
	};

	if host_part.is_empty() {
		return Err(TransformError::MissingHost {
			url: proxy_url.to_string(),
		});
	}

	let host = match Host::parse(host_part) {
		Ok(Host::Domain(domain)) => domain,
		Ok(other) => other.to_string(),
		Err(source) => {
			return Err(TransformError::InvalidProxyUrl {
				url: proxy_url.to_string(),
				source,
			});
		}
	};

	let label = match host.split_once('.') {
		Some((label, _)) if !label.is_empty() => label,
		_ => return Err(TransformError::MissingSubdomain { host: host.clone() }),
	};

	match label.split_once('-') {
		Some((service, _)) if !service.is_empty() => Ok(service.to_string()),
		_ => Ok(label.to_string()),
	}
}

/// Derive a rule name from the last non-empty segment of a path.
fn rule_name(path: &str) -> String {
	path.split('/')
		.rev()
		.find(|segment| !segment.is_empty())
		.unwrap_or_default()
		.replace(['-', '*'], "")
		.to_lowercase()
}
