//! Rule extraction and record building for ngx2agw.
//!
//! This module handles:
//! - Matching `location`/`proxy_pass` lines and deriving rule names
//! - Drawing rule sequence numbers
//! - Shaping rewrite rule sets and path rules

pub mod builder;
pub mod extractor;
pub mod sequence;

pub use builder::{PathRule, RewriteRuleSet, path_rule, rewrite_rule};
pub use extractor::{ExtractedRule, LOCATION_PATTERN, RuleExtractor};
pub use sequence::RuleSequence;
