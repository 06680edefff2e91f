use anyhow::{bail, Context, Result};
use clap::Parser;
use mill_config::{logging, DequalifyConfig};
use mill_dequalify::constants::ROOT_MARKERS;
use mill_dequalify::{
    find_project_root, Dequalifier, FileOutcome, ResolveOptions, RunSummary, WriteMode,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "dequalify")]
#[command(about = "Replace fully qualified Java type references with imports", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Files or directories to process instead of the configured source roots
    pub paths: Vec<PathBuf>,

    /// Project root to use instead of searching upward for `.git`
    #[arg(long)]
    pub root: Option<PathBuf>,

    /// Report what would change without writing any file
    #[arg(long)]
    pub dry_run: bool,

    /// Like --dry-run, but exit with status 1 if any file would change
    #[arg(long, conflicts_with = "dry_run")]
    pub check: bool,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    fn write_mode(&self) -> WriteMode {
        if self.dry_run || self.check {
            WriteMode::DryRun
        } else {
            WriteMode::Write
        }
    }
}

/// Result of a CLI run
#[derive(Debug)]
pub struct RunOutcome {
    pub summary: RunSummary,
    /// `--check` was given and at least one file would change
    pub check_failed: bool,
}

pub fn run(args: Cli) -> Result<RunOutcome> {
    let root = match &args.root {
        Some(root) => root.clone(),
        None => {
            let cwd = std::env::current_dir()
                .context("Failed to resolve project root: current directory is unavailable")?;
            find_project_root(&cwd, ROOT_MARKERS)
        }
    };
    if !root.is_dir() {
        bail!("Project root {} is not a directory", root.display());
    }

    let mut config = DequalifyConfig::load(&root)
        .with_context(|| format!("Failed to load configuration under {}", root.display()))?;
    if args.verbose {
        config.logging.level = "debug".to_string();
    }
    logging::initialize(&config.logging);

    println!("Project root: {}", root.display());

    let targets = if args.paths.is_empty() {
        config.source_trees(&root)
    } else {
        args.paths.clone()
    };

    let options = ResolveOptions {
        builtin_packages: config.builtin_packages.clone(),
        exempt_names: config.exempt_names.clone(),
    };

    let summary = Dequalifier::new(options)
        .with_mode(args.write_mode())
        .with_extension(config.extension.clone())
        .run(&targets, report_update);

    println!("Total files analyzed: {}", summary.analyzed);

    info!(
        updated = summary.updated,
        imports_added = summary.imports_added,
        skipped_trees = summary.skipped_trees,
        "Run complete"
    );
    if summary.failed > 0 {
        warn!(failed = summary.failed, "Some files could not be processed");
    }

    Ok(RunOutcome {
        check_failed: args.check && summary.updated > 0,
        summary,
    })
}

fn report_update(outcome: &FileOutcome) {
    let verb = if outcome.written {
        "Updated"
    } else {
        "Would update"
    };
    println!(
        "{}: {} ({} new imports)",
        verb,
        outcome.path.display(),
        outcome.new_imports.len()
    );
}
