use crate::rules::extractor::ExtractedRule;
use serde::{Deserialize, Serialize};

/// A rewrite rule set with a single URL-rewrite rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteRuleSet {
	pub name: String,
	pub properties: RewriteRuleSetProperties,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRuleSetProperties {
	pub rewrite_rules: Vec<RewriteRule>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewriteRule {
	pub action_set: ActionSet,
	pub name: String,
	pub rule_sequence: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSet {
	pub url_configuration: UrlConfiguration,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlConfiguration {
	pub modified_path: String,
	pub reroute: bool,
}

/// Maps a URL path pattern to a backend pool and its HTTP settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathRule {
	pub name: String,
	pub backend_address_pool_name: String,
	pub backend_http_settings_name: String,
	pub paths: Vec<String>,
	pub rewrite_rule_set_name: String,
}

/// Name shared by a rewrite rule set and its path rule.
fn rule_set_name(rule: &ExtractedRule, sequence: u32) -> String {
	format!("{}{}", rule.name, sequence)
}

/// Build the rewrite rule set for an extracted rule.
pub fn rewrite_rule(rule: &ExtractedRule, sequence: u32) -> RewriteRuleSet {
	let modified_path = if rule.modified_path == "/" {
		"/".to_string()
	} else {
		format!("/{}", rule.modified_path)
	};

	RewriteRuleSet {
		name: rule_set_name(rule, sequence),
		properties: RewriteRuleSetProperties {
			rewrite_rules: vec![RewriteRule {
				action_set: ActionSet {
					url_configuration: UrlConfiguration {
						modified_path,
						reroute: true,
					},
				},
				name: format!("rwrule-{}", rule.name),
				rule_sequence: sequence,
			}],
		},
	}
}

/// Build the path rule for an extracted rule.
///
/// The location path always gets exactly one trailing `*`.
pub fn path_rule(rule: &ExtractedRule, sequence: u32) -> PathRule {
	let name = rule_set_name(rule, sequence);

	PathRule {
		name: name.clone(),
		backend_address_pool_name: format!("pool-{}", rule.hostname),
		backend_http_settings_name: format!("settings-{}", rule.hostname),
		paths: vec![format!("{}*", rule.path.replace('*', ""))],
		rewrite_rule_set_name: name,
	}
}
