//! Batch processing for drizzle-fix.
//!
//! This module handles:
//! - Rewriting single files in place (only when the text changes)
//! - Running an ordered target list with per-file error isolation
//! - Status and summary lines for the console

pub mod processor;

pub use processor::process_file;

use crate::config::TargetList;
use crate::rules::RuleSet;
use std::path::PathBuf;

/// Whether changed files are written back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WriteMode {
	#[default]
	Write,
	DryRun,
}

/// Outcome for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileStatus {
	Changed,
	Unchanged,
	NotFound,
	Error(String),
}

/// A target together with its outcome.
#[derive(Debug, Clone)]
pub struct FileReport {
	/// The target as listed (relative to the batch base).
	pub path: PathBuf,
	pub status: FileStatus,
}

impl FileReport {
	/// One console line for this file.
	pub fn status_line(&self, mode: WriteMode) -> String {
		let path = self.path.display();
		match (&self.status, mode) {
			(FileStatus::Changed, WriteMode::Write) => format!("✅ Fixed: {path}"),
			(FileStatus::Changed, WriteMode::DryRun) => format!("🔍 Would fix: {path}"),
			(FileStatus::Unchanged, _) => format!("⏭️  No changes: {path}"),
			(FileStatus::NotFound, _) => format!("❌ Not found: {path}"),
			(FileStatus::Error(_), _) => format!("⚠️  Failed: {path}"),
		}
	}
}

/// All reports of a batch, in target order.
#[derive(Debug, Clone, Default)]
pub struct Summary {
	pub reports: Vec<FileReport>,
}

impl Summary {
	pub fn changed_count(&self) -> usize {
		self.count(|status| *status == FileStatus::Changed)
	}

	pub fn error_count(&self) -> usize {
		self.count(|status| matches!(status, FileStatus::Error(_)))
	}

	fn count(&self, pred: impl Fn(&FileStatus) -> bool) -> usize {
		self.reports
			.iter()
			.filter(|report| pred(&report.status))
			.count()
	}

	/// Final console line with the changed count.
	pub fn summary_line(&self, mode: WriteMode) -> String {
		match mode {
			WriteMode::Write => format!("🎉 Fixed {} files", self.changed_count()),
			WriteMode::DryRun => format!("🎉 Would fix {} files", self.changed_count()),
		}
	}
}

/// Run every target through the rules, in list order.
pub fn run_batch(list: &TargetList, rules: &RuleSet, mode: WriteMode) -> Summary {
	run_batch_with(list, rules, mode, |_| {})
}

/// Like [`run_batch`], calling `on_report` as each target finishes.
///
/// Missing targets are reported as `NotFound` and never created. A failure on
/// one target is logged and reported, and the batch moves on to the next.
pub fn run_batch_with(
	list: &TargetList,
	rules: &RuleSet,
	mode: WriteMode,
	mut on_report: impl FnMut(&FileReport),
) -> Summary {
	let mut summary = Summary::default();

	for target in &list.targets {
		let full_path = list.base.join(target);

		let status = if !full_path.exists() {
			FileStatus::NotFound
		} else {
			match process_file(&full_path, rules, mode) {
				Ok(status) => status,
				Err(e) => {
					let reason = error_chain(&e);
					tracing::error!(path = %target.display(), "Error processing file: {reason}");
					FileStatus::Error(reason)
				}
			}
		};

		let report = FileReport {
			path: target.clone(),
			status,
		};
		on_report(&report);
		summary.reports.push(report);
	}

	summary
}

/// Render an error and its sources as one line.
fn error_chain(error: &dyn std::error::Error) -> String {
	let mut message = error.to_string();
	let mut source = error.source();
	while let Some(cause) = source {
		message.push_str(&format!(": {cause}"));
		source = cause.source();
	}
	message
}
