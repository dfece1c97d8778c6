use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use drizzle_fix::batch::{WriteMode, run_batch_with};
use drizzle_fix::config::{
	CONFIG_FILE_NAME, TargetList, TargetSource, generate_init_template, load_targets,
	load_targets_from,
};
use drizzle_fix::rules::drizzle_rules;
use drizzle_fix::telemetry;

#[derive(Parser)]
#[command(name = "drizzle-fix")]
#[command(
	author,
	version,
	about = "Rewrites db.query.* lookups into explicit Drizzle ORM select chains"
)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
	#[command(subcommand)]
	command: Option<Commands>,

	/// Files to rewrite, relative to the current directory (overrides any config file)
	#[arg(value_name = "FILE")]
	files: Vec<PathBuf>,

	/// Read the target list from this config file instead of discovering one
	#[arg(long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Resolve targets against this directory
	#[arg(long, value_name = "DIR")]
	root: Option<PathBuf>,

	/// Report what would change without writing anything
	#[arg(long)]
	dry_run: bool,

	/// Log every rule that fires
	#[arg(short, long)]
	verbose: bool,

	/// Create a template .drizzle-fix.toml in the current directory
	#[arg(long)]
	init: bool,

	/// Overwrite existing .drizzle-fix.toml when using --init
	#[arg(long, requires = "init")]
	force: bool,
}

#[derive(Subcommand)]
enum Commands {
	/// Configuration management commands
	Config {
		#[command(subcommand)]
		action: ConfigAction,
	},
}

#[derive(Subcommand)]
enum ConfigAction {
	/// Display the effective target list and where it came from
	Show,
	/// Check the config file for errors without rewriting anything
	Validate,
}

fn main() -> ExitCode {
	match run() {
		Ok(code) => code,
		Err(e) => {
			eprintln!("error: {e:?}");
			ExitCode::FAILURE
		}
	}
}

fn run() -> Result<ExitCode> {
	let cli = Cli::parse();

	// Logging is best effort; a bad filter must not stop the batch
	if let Err(e) = telemetry::init(cli.verbose) {
		eprintln!("Warning: {e}");
	}

	// Handle --init
	if cli.init {
		return handle_init(cli.force);
	}

	// Handle subcommands
	if let Some(ref command) = cli.command {
		return match command {
			Commands::Config { action } => match action {
				ConfigAction::Show => handle_config_show(&cli),
				ConfigAction::Validate => handle_config_validate(&cli),
			},
		};
	}

	handle_fix(&cli)
}

fn handle_init(force: bool) -> Result<ExitCode> {
	let config_path = PathBuf::from(CONFIG_FILE_NAME);

	if config_path.exists() && !force {
		anyhow::bail!("{CONFIG_FILE_NAME} already exists. Use --force to overwrite.");
	}

	let template = generate_init_template();
	std::fs::write(&config_path, template)
		.with_context(|| format!("Failed to write {}", config_path.display()))?;

	println!("Created {CONFIG_FILE_NAME}");
	Ok(ExitCode::SUCCESS)
}

/// Work out the batch: explicit files, then `--config`, then discovery.
fn resolve_targets(cli: &Cli, cwd: &Path) -> Result<TargetList> {
	let list = if !cli.files.is_empty() {
		TargetList::from_paths(cli.files.clone(), cwd).context("Invalid target list")?
	} else if let Some(ref config_path) = cli.config {
		load_targets_from(config_path)
			.with_context(|| format!("Failed to load {}", config_path.display()))?
	} else {
		load_targets(cwd).context("Failed to load configuration")?
	};

	Ok(match cli.root {
		Some(ref root) => list.with_base(root),
		None => list,
	})
}

fn handle_fix(cli: &Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let list = resolve_targets(cli, &cwd)?;
	let rules = drizzle_rules().context("Failed to compile rewrite rules")?;

	let mode = if cli.dry_run {
		WriteMode::DryRun
	} else {
		WriteMode::Write
	};

	let summary = run_batch_with(&list, &rules, mode, |report| {
		println!("{}", report.status_line(mode));
	});

	println!();
	println!("{}", summary.summary_line(mode));

	// Per-file failures are reported above and never change the exit status
	Ok(ExitCode::SUCCESS)
}

fn handle_config_show(cli: &Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;
	let list = resolve_targets(cli, &cwd)?;

	match list.source {
		TargetSource::BuiltIn => println!("# Source: built-in target list"),
		TargetSource::ConfigFile(ref path) => println!("# Source: {}", path.display()),
		TargetSource::CommandLine => println!("# Source: command line"),
	}
	println!("# Base: {}", list.base.display());
	println!("# Targets: {}", list.targets.len());
	println!();

	for target in &list.targets {
		let marker = if list.base.join(target).exists() {
			""
		} else {
			"  (not found)"
		};
		println!("  {}{}", target.display(), marker);
	}

	Ok(ExitCode::SUCCESS)
}

fn handle_config_validate(cli: &Cli) -> Result<ExitCode> {
	let cwd = std::env::current_dir().context("Failed to get current directory")?;

	match resolve_targets(cli, &cwd) {
		Ok(list) => {
			match list.source {
				TargetSource::ConfigFile(ref path) => println!(
					"Configuration is valid: {} ({} targets)",
					path.display(),
					list.targets.len()
				),
				_ => println!(
					"No configuration file found; using {} built-in targets.",
					list.targets.len()
				),
			}
			Ok(ExitCode::SUCCESS)
		}
		Err(e) => {
			eprintln!("Configuration error: {e:#}");
			Ok(ExitCode::FAILURE)
		}
	}
}
