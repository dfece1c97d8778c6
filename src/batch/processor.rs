use crate::batch::{FileStatus, WriteMode};
use crate::error::{FixError, Result};
use crate::rules::RuleSet;
use std::path::Path;

/// Rewrite a single file in place.
///
/// The file is only written when the rewritten text differs from what was
/// read. In [`WriteMode::DryRun`] nothing is ever written and `Changed`
/// means "would change".
pub fn process_file(path: &Path, rules: &RuleSet, mode: WriteMode) -> Result<FileStatus> {
	let original = std::fs::read_to_string(path).map_err(|source| {
		if source.kind() == std::io::ErrorKind::NotFound {
			FixError::NotFound {
				path: path.to_path_buf(),
			}
		} else {
			FixError::ReadError {
				path: path.to_path_buf(),
				source,
			}
		}
	})?;

	let rewrite = rules.apply(&original);
	if rewrite.text == original {
		return Ok(FileStatus::Unchanged);
	}

	tracing::debug!(
		path = %path.display(),
		replacements = rewrite.total_hits(),
		"File rewritten"
	);

	if mode == WriteMode::Write {
		std::fs::write(path, &rewrite.text).map_err(|source| FixError::WriteError {
			path: path.to_path_buf(),
			source,
		})?;
	}

	Ok(FileStatus::Changed)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::rules::drizzle_rules;
	use std::fs;

	#[test]
	fn test_changed_file_is_written() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("users.ts");
		fs::write(&path, "await db.query.users.findMany();\n").unwrap();

		let status = process_file(&path, &drizzle_rules().unwrap(), WriteMode::Write).unwrap();

		assert_eq!(status, FileStatus::Changed);
		assert_eq!(
			fs::read_to_string(&path).unwrap(),
			"await db.select().from(users);\n"
		);
	}

	#[test]
	fn test_unchanged_file_is_not_written() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("plain.ts");
		fs::write(&path, "export const x = 1;\n").unwrap();
		let before = fs::metadata(&path).unwrap().modified().unwrap();

		std::thread::sleep(std::time::Duration::from_millis(20));
		let status = process_file(&path, &drizzle_rules().unwrap(), WriteMode::Write).unwrap();

		assert_eq!(status, FileStatus::Unchanged);
		let after = fs::metadata(&path).unwrap().modified().unwrap();
		assert_eq!(before, after);
	}

	#[test]
	fn test_dry_run_leaves_file_alone() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("users.ts");
		let content = "db.query.users.findFirst({ where: eq(id, 1) })";
		fs::write(&path, content).unwrap();

		let status = process_file(&path, &drizzle_rules().unwrap(), WriteMode::DryRun).unwrap();

		assert_eq!(status, FileStatus::Changed);
		assert_eq!(fs::read_to_string(&path).unwrap(), content);
	}

	#[test]
	fn test_invalid_utf8_is_read_error() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("binary.ts");
		fs::write(&path, [0xff, 0xfe, 0x00, 0x80]).unwrap();

		let result = process_file(&path, &drizzle_rules().unwrap(), WriteMode::Write);
		assert!(matches!(result, Err(FixError::ReadError { .. })));
	}

	#[test]
	fn test_missing_file_is_not_found() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("missing.ts");

		let result = process_file(&path, &drizzle_rules().unwrap(), WriteMode::Write);
		assert!(matches!(result, Err(FixError::NotFound { .. })));
		assert!(!path.exists());
	}
}
