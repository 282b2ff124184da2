//! End-to-end conversion: read lines, extract rules, assemble and write the document.

use crate::config::types::{Settings, UrlPathMapSettings};
use crate::document::{ConfigDocument, UrlPathMap};
use crate::error::{Result, TransformError};
use crate::rules::{RuleExtractor, RuleSequence, path_rule, rewrite_rule};
use std::path::{Path, PathBuf};

/// Turns NGINX lines into a [`ConfigDocument`].
#[derive(Debug)]
pub struct Generator {
	extractor: RuleExtractor,
	sequence_start: u32,
	sequence_step: u32,
	url_path_map: UrlPathMapSettings,
}

impl Generator {
	/// Build a generator from resolved settings.
	pub fn new(settings: &Settings) -> Result<Self> {
		// Surface a bad step before any line is read.
		RuleSequence::new(settings.sequence_start, settings.sequence_step)?;

		Ok(Generator {
			extractor: RuleExtractor::new()?,
			sequence_start: settings.sequence_start,
			sequence_step: settings.sequence_step,
			url_path_map: settings.url_path_map.clone(),
		})
	}

	/// Assemble the document for the given lines.
	///
	/// Zero lines yields `None`. Any other input yields a document, possibly with
	/// empty rule lists. Sequence numbers are drawn only for matched lines.
	pub fn generate<S: AsRef<str>>(&self, lines: &[S]) -> Result<Option<ConfigDocument>> {
		if lines.is_empty() {
			return Ok(None);
		}

		let mut sequence = RuleSequence::new(self.sequence_start, self.sequence_step)?;
		let mut rewrite_rules = Vec::new();
		let mut path_rules = Vec::new();

		for line in lines {
			let Some(rule) = self.extractor.extract(line.as_ref())? else {
				continue;
			};

			let Some(rule_id) = sequence.next() else {
				return Err(TransformError::SequenceOverflow {
					start: self.sequence_start,
					step: self.sequence_step,
				});
			};
			rewrite_rules.push(rewrite_rule(&rule, rule_id));
			path_rules.push(path_rule(&rule, rule_id));
		}

		Ok(Some(ConfigDocument {
			rewrite_rule_sets: rewrite_rules.into(),
			url_path_maps: vec![UrlPathMap {
				name: self.url_path_map.name.clone(),
				default_backend_address_pool_name: self
					.url_path_map
					.default_backend_address_pool_name
					.clone(),
				default_backend_http_settings_name: self
					.url_path_map
					.default_backend_http_settings_name
					.clone(),
				path_rules,
			}]
			.into(),
		}))
	}
}

/// Convenience wrapper using the built-in defaults.
pub fn generate_json_config<S: AsRef<str>>(lines: &[S]) -> Result<Option<ConfigDocument>> {
	Generator::new(&Settings::default())?.generate(lines)
}

/// Read a file into lines. The whole file is read before processing.
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
	let content = std::fs::read_to_string(path).map_err(|source| TransformError::InputRead {
		path: path.to_path_buf(),
		source,
	})?;
	Ok(content.lines().map(str::to_string).collect())
}

/// Output location for an input file: `<output_dir>/<input file name>.json`.
pub fn output_path(input: &Path, output_dir: &Path) -> PathBuf {
	let mut file_name = input
		.file_name()
		.unwrap_or(input.as_os_str())
		.to_os_string();
	file_name.push(".json");
	output_dir.join(file_name)
}

/// Serialize the document (or `null`) with 2-space indentation.
pub fn render_document(document: Option<&ConfigDocument>) -> Result<String> {
	Ok(serde_json::to_string_pretty(&document)?)
}

/// Write the rendered document to `path`.
pub fn write_document(document: Option<&ConfigDocument>, path: &Path) -> Result<()> {
	let rendered = render_document(document)?;
	std::fs::write(path, rendered).map_err(|source| TransformError::OutputWrite {
		path: path.to_path_buf(),
		source,
	})
}

/// What a completed run produced.
#[derive(Debug)]
pub struct TransformReport {
	pub output_path: PathBuf,
	pub document: Option<ConfigDocument>,
}

/// Convert `settings.input` and write the JSON into `settings.output_dir`.
///
/// Nothing is written if any line fails extraction.
pub fn transform_file(settings: &Settings) -> Result<TransformReport> {
	let generator = Generator::new(settings)?;

	tracing::info!("Reading NGINX configuration from {}", settings.input.display());
	let lines = read_lines(&settings.input)?;

	let document = generator.generate(&lines)?;
	if let Some(document) = &document {
		tracing::info!("Generated {} rules from {} lines", document.rule_count(), lines.len());
	}
	let output_path = output_path(&settings.input, &settings.output_dir);
	write_document(document.as_ref(), &output_path)?;

	tracing::info!("JSON configuration saved to {}", output_path.display());

	Ok(TransformReport {
		output_path,
		document,
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	#[test]
	fn test_zero_lines_gives_no_document() {
		let lines: Vec<String> = Vec::new();
		assert!(generate_json_config(&lines).unwrap().is_none());
	}

	#[test]
	fn test_non_matching_line_gives_empty_document() {
		let document = generate_json_config(&["# nothing here"]).unwrap().unwrap();
		assert!(document.rewrite_rule_sets.value.is_empty());
		assert_eq!(document.url_path_maps.value.len(), 1);
		assert!(document.url_path_maps.value[0].path_rules.is_empty());
	}

	#[test]
	fn test_sequence_skips_unmatched_lines() {
		let lines = [
			"server {",
			"location /api { proxy_pass http://api.svc/v1; }",
			"# comment",
			"location /static { root /var/www; }",
			"",
			"location /users { proxy_pass http://users.svc/v2/users; }",
			"location /cart { proxy_pass http://cart.svc/; }",
			"}",
		];
		let document = generate_json_config(&lines).unwrap().unwrap();

		let sequences: Vec<u32> = document
			.rewrite_rule_sets
			.value
			.iter()
			.map(|set| set.properties.rewrite_rules[0].rule_sequence)
			.collect();
		assert_eq!(sequences, vec![10, 15, 20]);

		let names: Vec<&str> = document.url_path_maps.value[0]
			.path_rules
			.iter()
			.map(|rule| rule.name.as_str())
			.collect();
		assert_eq!(names, vec!["v110", "users15", "cart20"]);
	}

	#[test]
	fn test_records_pair_up_by_name() {
		let lines = [
			"location /a { proxy_pass http://a.svc/alpha; }",
			"location /b { proxy_pass http://b.svc/beta-gamma; }",
		];
		let document = generate_json_config(&lines).unwrap().unwrap();
		let path_rules = &document.url_path_maps.value[0].path_rules;

		assert_eq!(document.rule_count(), path_rules.len());
		for (rewrite, path) in document.rewrite_rule_sets.value.iter().zip(path_rules) {
			assert_eq!(rewrite.name, path.name);
			assert_eq!(path.name, path.rewrite_rule_set_name);
		}
	}

	#[test]
	fn test_full_document_shape() {
		let document =
			generate_json_config(&["location /api { proxy_pass http://backend-svc.internal/v1; }"])
				.unwrap();
		let value = serde_json::to_value(&document).unwrap();

		assert_eq!(
			value,
			json!({
				"rewriteRuleSets": {
					"value": [
						{
							"name": "v110",
							"properties": {
								"rewriteRules": [
									{
										"actionSet": {
											"urlConfiguration": {
												"modifiedPath": "/v1",
												"reroute": true
											}
										},
										"name": "rwrule-v1",
										"ruleSequence": 10
									}
								]
							}
						}
					]
				},
				"urlPathMaps": {
					"value": [
						{
							"name": "{{ env.hostName }}",
							"defaultBackendAddressPoolName": "pool-default-{{ env.fullWorkloadName }}",
							"defaultBackendHttpSettingsName": "settings-default-{{ env.fullWorkloadName }}",
							"pathRules": [
								{
									"name": "v110",
									"backendAddressPoolName": "pool-backend",
									"backendHttpSettingsName": "settings-backend",
									"paths": ["/api*"],
									"rewriteRuleSetName": "v110"
								}
							]
						}
					]
				}
			})
		);
	}

	#[test]
	fn test_custom_settings() {
		let settings = Settings {
			sequence_start: 100,
			sequence_step: 1,
			url_path_map: UrlPathMapSettings {
				name: "gateway".to_string(),
				default_backend_address_pool_name: "pool-x".to_string(),
				default_backend_http_settings_name: "settings-x".to_string(),
			},
			..Settings::default()
		};
		let generator = Generator::new(&settings).unwrap();
		let lines = [
			"location /a { proxy_pass http://a.svc/a; }",
			"location /b { proxy_pass http://b.svc/b; }",
		];
		let document = generator.generate(&lines).unwrap().unwrap();
		let map = &document.url_path_maps.value[0];

		assert_eq!(map.name, "gateway");
		assert_eq!(map.default_backend_address_pool_name, "pool-x");
		assert_eq!(map.path_rules[1].name, "b101");
	}

	#[test]
	fn test_sequence_overflow_is_error() {
		let settings = Settings {
			sequence_start: u32::MAX - 5,
			sequence_step: 5,
			..Settings::default()
		};
		let generator = Generator::new(&settings).unwrap();
		let lines = [
			"location /a { proxy_pass http://x.svc/x; }",
			"location /b { proxy_pass http://x.svc/x; }",
			"location /c { proxy_pass http://x.svc/x; }",
		];

		match generator.generate(&lines).unwrap_err() {
			TransformError::SequenceOverflow { start, step } => {
				assert_eq!(start, u32::MAX - 5);
				assert_eq!(step, 5);
			}
			other => panic!("Expected SequenceOverflow error, got {other:?}"),
		}

		let names: Vec<String> = generator
			.generate(&lines[..2])
			.unwrap()
			.unwrap()
			.rewrite_rule_sets
			.value
			.into_iter()
			.map(|set| set.name)
			.collect();
		assert_eq!(names, vec!["x4294967290", "x4294967295"]);
	}

	#[test]
	fn test_generator_rejects_zero_step() {
		let settings = Settings {
			sequence_step: 0,
			..Settings::default()
		};
		assert!(matches!(
			Generator::new(&settings).unwrap_err(),
			TransformError::InvalidSequenceStep { .. }
		));
	}

	#[test]
	fn test_each_run_restarts_sequence() {
		let generator = Generator::new(&Settings::default()).unwrap();
		let lines = ["location /a { proxy_pass http://a.svc/a; }"];
		let first = generator.generate(&lines).unwrap();
		let second = generator.generate(&lines).unwrap();
		assert_eq!(first, second);
	}

	#[test]
	fn test_host_without_subdomain_aborts() {
		let lines = [
			"location /a { proxy_pass http://a.svc/a; }",
			"location /x { proxy_pass http://single/; }",
		];
		assert!(matches!(
			generate_json_config(&lines).unwrap_err(),
			TransformError::MissingSubdomain { .. }
		));
	}

	#[test]
	fn test_output_path() {
		assert_eq!(
			output_path(Path::new("conf.d/mysite.conf"), Path::new(".")),
			PathBuf::from("./mysite.conf.json")
		);
		assert_eq!(
			output_path(Path::new("/etc/nginx/site"), Path::new("out")),
			PathBuf::from("out/site.json")
		);
	}

	#[test]
	fn test_render_absent_document() {
		assert_eq!(render_document(None).unwrap(), "null");
	}

	#[test]
	fn test_render_uses_two_space_indent() {
		let document = generate_json_config(&[""]).unwrap();
		let rendered = render_document(document.as_ref()).unwrap();
		assert!(rendered.starts_with("{\n  \"rewriteRuleSets\": {\n    \"value\": []"));
	}

	#[test]
	fn test_read_lines_missing_file() {
		match read_lines(Path::new("/nonexistent/mysite.conf")).unwrap_err() {
			TransformError::InputRead { path, .. } => {
				assert_eq!(path, PathBuf::from("/nonexistent/mysite.conf"));
			}
			other => panic!("Expected InputRead error, got {other:?}"),
		}
	}

	#[test]
	fn test_read_lines_empty_and_blank_files() {
		let temp_dir = tempfile::tempdir().unwrap();

		let empty = temp_dir.path().join("empty.conf");
		std::fs::write(&empty, "").unwrap();
		assert!(read_lines(&empty).unwrap().is_empty());

		let blank = temp_dir.path().join("blank.conf");
		std::fs::write(&blank, "\n").unwrap();
		assert_eq!(read_lines(&blank).unwrap(), vec![String::new()]);
	}

	#[test]
	fn test_transform_file_writes_json() {
		let temp_dir = tempfile::tempdir().unwrap();
		let input = temp_dir.path().join("site.conf");
		std::fs::write(
			&input,
			"location /api { proxy_pass http://backend-svc.internal/v1; }\n",
		)
		.unwrap();

		let settings = Settings {
			input,
			output_dir: temp_dir.path().to_path_buf(),
			..Settings::default()
		};
		let report = transform_file(&settings).unwrap();

		assert_eq!(report.output_path, temp_dir.path().join("site.conf.json"));
		let written: serde_json::Value =
			serde_json::from_str(&std::fs::read_to_string(&report.output_path).unwrap()).unwrap();
		assert_eq!(
			written["urlPathMaps"]["value"][0]["pathRules"][0]["backendAddressPoolName"],
			"pool-backend"
		);
	}

	#[test]
	fn test_transform_file_failure_writes_nothing() {
		let temp_dir = tempfile::tempdir().unwrap();
		let input = temp_dir.path().join("bad.conf");
		std::fs::write(&input, "location /x { proxy_pass http://single/; }\n").unwrap();

		let settings = Settings {
			input,
			output_dir: temp_dir.path().to_path_buf(),
			..Settings::default()
		};
		assert!(transform_file(&settings).is_err());
		assert!(!temp_dir.path().join("bad.conf.json").exists());
	}
}
