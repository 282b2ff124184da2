//! The assembled gateway configuration document.

use crate::rules::{PathRule, RewriteRuleSet};
use serde::{Deserialize, Serialize};

/// Root of the generated JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigDocument {
	pub rewrite_rule_sets: ValueList<RewriteRuleSet>,
	pub url_path_maps: ValueList<UrlPathMap>,
}

/// `{ "value": [...] }` wrapper used by the gateway's resource lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValueList<T> {
	pub value: Vec<T>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UrlPathMap {
	pub name: String,
	pub default_backend_address_pool_name: String,
	pub default_backend_http_settings_name: String,
	pub path_rules: Vec<PathRule>,
}

impl ConfigDocument {
	/// Number of rules; rewrite sets and path rules always pair up.
	pub fn rule_count(&self) -> usize {
		self.rewrite_rule_sets.value.len()
	}
}

impl<T> From<Vec<T>> for ValueList<T> {
	fn from(value: Vec<T>) -> Self {
		ValueList { value }
	}
}
