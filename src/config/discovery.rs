use crate::config::parser::parse_config_file;
use crate::config::types::{CONFIG_FILE_NAME, LoadedConfig, TargetList};
use crate::error::Result;
use std::path::Path;

/// Find the nearest `.drizzle-fix.toml`, starting at `start_dir` and walking
/// up the directory tree. The first one found wins.
pub fn discover_config(start_dir: &Path) -> Result<Option<LoadedConfig>> {
	let mut current_dir = Some(start_dir);

	while let Some(dir) = current_dir {
		let config_path = dir.join(CONFIG_FILE_NAME);

		if config_path.is_file() {
			let config = parse_config_file(&config_path)?;
			tracing::debug!(path = %config_path.display(), "Loaded config");
			return Ok(Some(LoadedConfig {
				config,
				path: config_path,
			}));
		}

		current_dir = dir.parent();
	}

	Ok(None)
}

/// Load the target list for a run started in `start_dir`.
///
/// Uses the nearest config file if there is one, otherwise the built-in list
/// relative to `start_dir`.
pub fn load_targets(start_dir: &Path) -> Result<TargetList> {
	match discover_config(start_dir)? {
		Some(loaded) => Ok(TargetList::from_config(&loaded)),
		None => Ok(TargetList::built_in(start_dir)),
	}
}

/// Load the target list from an explicitly named config file.
pub fn load_targets_from(config_path: &Path) -> Result<TargetList> {
	let config = parse_config_file(config_path)?;
	let loaded = LoadedConfig {
		config,
		path: config_path.to_path_buf(),
	};
	Ok(TargetList::from_config(&loaded))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::config::types::TargetSource;
	use crate::error::FixError;
	use std::fs;
	use std::path::PathBuf;

	#[test]
	fn test_no_config_uses_built_in_list() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("a/b");
		fs::create_dir_all(&nested).unwrap();

		// Only meaningful when no ancestor of the temp dir carries a config.
		if discover_config(&nested).unwrap().is_none() {
			let list = load_targets(&nested).unwrap();
			assert_eq!(list.source, TargetSource::BuiltIn);
			assert_eq!(list.base, nested);
		}
	}

	#[test]
	fn test_config_found_in_ancestor() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("packages/api");
		fs::create_dir_all(&nested).unwrap();
		fs::write(
			dir.path().join(CONFIG_FILE_NAME),
			r#"files = ["src/db.ts"]"#,
		)
		.unwrap();

		let list = load_targets(&nested).unwrap();
		assert_eq!(list.targets, vec![PathBuf::from("src/db.ts")]);
		assert_eq!(list.base, dir.path());
		assert_eq!(
			list.source,
			TargetSource::ConfigFile(dir.path().join(CONFIG_FILE_NAME))
		);
	}

	#[test]
	fn test_nearest_config_wins() {
		let dir = tempfile::tempdir().unwrap();
		let nested = dir.path().join("app");
		fs::create_dir_all(&nested).unwrap();
		fs::write(dir.path().join(CONFIG_FILE_NAME), r#"files = ["outer.ts"]"#).unwrap();
		fs::write(nested.join(CONFIG_FILE_NAME), r#"files = ["inner.ts"]"#).unwrap();

		let list = load_targets(&nested).unwrap();
		assert_eq!(list.targets, vec![PathBuf::from("inner.ts")]);
		assert_eq!(list.base, nested);
	}

	#[test]
	fn test_invalid_config_is_an_error() {
		let dir = tempfile::tempdir().unwrap();
		fs::write(dir.path().join(CONFIG_FILE_NAME), "files = [[[").unwrap();

		match load_targets(dir.path()).unwrap_err() {
			FixError::ConfigParseError { .. } => {}
			other => panic!("Expected ConfigParseError, got {other:?}"),
		}
	}

	#[test]
	fn test_explicit_config_missing() {
		let dir = tempfile::tempdir().unwrap();
		let result = load_targets_from(&dir.path().join("custom.toml"));
		assert!(matches!(result, Err(FixError::ConfigNotFound { .. })));
	}
}
