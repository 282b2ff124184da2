//! ngx2agw - convert NGINX `location`/`proxy_pass` lines into Application Gateway
//! rewrite rule sets and URL path map rules.
//!
//! This library provides the core functionality for ngx2agw, including:
//! - Line-based rule extraction with a fixed location/proxy_pass pattern
//! - Rule sequence numbering and record building
//! - Document assembly and JSON output
//! - Configuration file parsing and cascade discovery
//!
//! # Example
//!
//! ```
//! use ngx2agw::transform::generate_json_config;
//!
//! let lines = ["location /api { proxy_pass http://backend-svc.internal/v1; }"];
//! let document = generate_json_config(&lines).unwrap().unwrap();
//!
//! let rule = &document.url_path_maps.value[0].path_rules[0];
//! assert_eq!(rule.backend_address_pool_name, "pool-backend");
//! assert_eq!(rule.paths, vec!["/api*"]);
//! ```

pub mod config;
pub mod document;
pub mod error;
pub mod logging;
pub mod rules;
pub mod transform;

pub use document::ConfigDocument;
pub use error::{Result, TransformError};
