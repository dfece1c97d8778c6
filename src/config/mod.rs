//! Configuration loading and parsing for drizzle-fix.
//!
//! This module handles:
//! - TOML config file parsing
//! - Upward discovery of `.drizzle-fix.toml`
//! - Resolving the ordered target list for a batch

pub mod discovery;
pub mod parser;
pub mod template;
pub mod types;

pub use discovery::{discover_config, load_targets, load_targets_from};
pub use parser::{parse_config_file, parse_config_str};
pub use template::generate_init_template;
pub use types::{
	CONFIG_FILE_NAME, Config, DEFAULT_TARGETS, LoadedConfig, TargetList, TargetSource,
	validate_targets,
};
