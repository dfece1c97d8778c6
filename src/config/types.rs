use crate::error::{FixError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// File name looked up when discovering a project config.
pub const CONFIG_FILE_NAME: &str = ".drizzle-fix.toml";

/// Targets used when no config file or explicit list is given.
pub const DEFAULT_TARGETS: &[&str] = &[
	"src/middleware/tenant.ts",
	"src/routes/consulting.ts",
	"src/routes/orchestrator.ts",
	"src/routes/upload.ts",
	"src/services/social-media/scheduler.ts",
	"src/services/stripe.ts",
	"src/services/results/trigger-engine.ts",
	"src/services/workflow/automated-flow.ts",
	"src/services/modules/lxp/lxp-module.ts",
	"src/services/modules/hiring/hiring-module.ts",
	"src/services/orchestrator/architect-ai.ts",
	"src/services/stripe-service.ts",
];

/// Top-level configuration from a `.drizzle-fix.toml` file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct Config {
	/// Files to rewrite, relative to the directory holding the config file.
	/// When absent the built-in list is used.
	#[serde(default)]
	pub files: Option<Vec<PathBuf>>,
}

impl Config {
	/// Validate that no target is listed twice.
	pub fn validate(&self) -> Result<()> {
		match self.files {
			Some(ref files) => validate_targets(files),
			None => Ok(()),
		}
	}
}

/// A loaded configuration with its source path for debugging/display.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
	/// The parsed configuration.
	pub config: Config,

	/// The path this config was loaded from.
	pub path: PathBuf,
}

impl LoadedConfig {
	/// Directory that relative targets resolve against.
	pub fn base_dir(&self) -> PathBuf {
		match self.path.parent() {
			Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
			_ => PathBuf::from("."),
		}
	}
}

/// Where a target list came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetSource {
	BuiltIn,
	ConfigFile(PathBuf),
	CommandLine,
}

/// The ordered batch of files to process, plus the directory they are
/// relative to.
#[derive(Debug, Clone)]
pub struct TargetList {
	pub targets: Vec<PathBuf>,
	pub base: PathBuf,
	pub source: TargetSource,
}

impl TargetList {
	/// The built-in target list, relative to `base`.
	pub fn built_in(base: &Path) -> Self {
		TargetList {
			targets: DEFAULT_TARGETS.iter().map(PathBuf::from).collect(),
			base: base.to_path_buf(),
			source: TargetSource::BuiltIn,
		}
	}

	/// Targets given explicitly, e.g. on the command line.
	pub fn from_paths(targets: Vec<PathBuf>, base: &Path) -> Result<Self> {
		validate_targets(&targets)?;
		Ok(TargetList {
			targets,
			base: base.to_path_buf(),
			source: TargetSource::CommandLine,
		})
	}

	/// Targets from a loaded config, falling back to the built-in list when
	/// the config does not name any.
	pub fn from_config(loaded: &LoadedConfig) -> Self {
		let base = loaded.base_dir();
		let targets = match loaded.config.files {
			Some(ref files) => files.clone(),
			None => DEFAULT_TARGETS.iter().map(PathBuf::from).collect(),
		};
		TargetList {
			targets,
			base,
			source: TargetSource::ConfigFile(loaded.path.clone()),
		}
	}

	/// Override the base directory.
	pub fn with_base(mut self, base: &Path) -> Self {
		self.base = base.to_path_buf();
		self
	}
}

/// Reject target lists that name the same file more than once.
pub fn validate_targets(targets: &[PathBuf]) -> Result<()> {
	let mut seen = HashSet::new();
	for target in targets {
		if !seen.insert(target) {
			return Err(FixError::DuplicateTarget {
				path: target.clone(),
			});
		}
	}
	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_built_in_targets() {
		let list = TargetList::built_in(Path::new("/project"));
		assert_eq!(list.targets.len(), DEFAULT_TARGETS.len());
		assert_eq!(list.targets[0], PathBuf::from("src/middleware/tenant.ts"));
		assert_eq!(list.base, PathBuf::from("/project"));
		assert_eq!(list.source, TargetSource::BuiltIn);
	}

	#[test]
	fn test_duplicate_targets_rejected() {
		let targets = vec![PathBuf::from("a.ts"), PathBuf::from("b.ts"), PathBuf::from("a.ts")];
		match TargetList::from_paths(targets, Path::new(".")).unwrap_err() {
			FixError::DuplicateTarget { path } => assert_eq!(path, PathBuf::from("a.ts")),
			_ => panic!("Expected DuplicateTarget error"),
		}
	}

	#[test]
	fn test_base_dir_of_bare_file_name() {
		let loaded = LoadedConfig {
			config: Config::default(),
			path: PathBuf::from(CONFIG_FILE_NAME),
		};
		assert_eq!(loaded.base_dir(), PathBuf::from("."));
	}

	#[test]
	fn test_config_without_files_uses_built_in_list() {
		let loaded = LoadedConfig {
			config: Config::default(),
			path: PathBuf::from("/repo/.drizzle-fix.toml"),
		};
		let list = TargetList::from_config(&loaded);
		assert_eq!(list.targets.len(), DEFAULT_TARGETS.len());
		assert_eq!(list.base, PathBuf::from("/repo"));
		assert_eq!(
			list.source,
			TargetSource::ConfigFile(PathBuf::from("/repo/.drizzle-fix.toml"))
		);
	}
}
