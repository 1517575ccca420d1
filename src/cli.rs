//! Command-line interface for deprecheck.

use clap::{ArgAction, Parser};
use colored::*;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::{self, Settings};
use crate::detect::{RunSummary, Runner};
use crate::error::AnalyzerError;
use crate::metadata::{self, MetadataModule, TargetContext};
use crate::report;
use crate::semantic::SolutionSnapshot;

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Suffix of snapshot files collected from a solution directory.
pub const SNAPSHOT_SUFFIX: &str = ".snapshot.json";

/// Report uses of deprecated platform APIs.
///
/// Reads a semantic snapshot of a solution and warns about every use of an
/// API marked deprecated at or before the target SDK version.
#[derive(Parser, Debug)]
#[command(name = "deprecheck", about, long_about = None, disable_help_flag = true)]
pub struct Cli {
    /// Path to the platform metadata module - Optional
    #[arg(short = 'r', long)]
    pub reference: Option<PathBuf>,

    /// Path to the solution snapshot (file or directory) to be analyzed - Required
    #[arg(short = 's', long)]
    pub solution: Option<PathBuf>,

    /// Target SDK version (ie. 7.0) - Optional
    #[arg(short = 'v', long)]
    pub version: Option<String>,

    /// Output filename - Optional (not implemented yet)
    #[arg(short = 'o', long)]
    pub out: Option<PathBuf>,

    /// Path to settings YAML file (default: auto-discover)
    #[arg(short = 'c', long)]
    pub config: Option<PathBuf>,

    /// Display this usage message
    #[arg(short = 'h', long, visible_short_alias = '?', action = ArgAction::Help)]
    pub help: Option<bool>,
}

/// Load settings from `--config` or the current directory.
fn load_settings(cli: &Cli, cwd: &Path) -> anyhow::Result<Settings> {
    let path = match &cli.config {
        Some(p) => Some(p.clone()),
        None => config::discover(cwd),
    };
    let settings = match path {
        Some(p) => {
            tracing::debug!(path = %p.display(), "loading settings");
            Settings::parse_file(&p)?
        }
        None => Settings::default(),
    };
    config::validate(&settings)?;
    Ok(settings)
}

/// Collect snapshot files: the path itself, or every `*.snapshot.json`
/// below a directory, sorted.
pub fn collect_snapshots(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let metadata = std::fs::metadata(root)?;
    if !metadata.is_dir() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            // Skip hidden directories
            !(e.depth() > 0 && e.file_type().is_dir() && e.file_name().to_string_lossy().starts_with('.'))
        })
    {
        let entry = entry?;
        if entry.file_type().is_file()
            && entry.file_name().to_string_lossy().ends_with(SNAPSHOT_SUFFIX)
        {
            files.push(entry.path().to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

fn error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

fn notice(message: &str) {
    println!("{}", message.yellow());
}

/// Run an analysis session.
pub fn run(cli: &Cli) -> anyhow::Result<i32> {
    let cwd = std::env::current_dir()?;

    let settings = match load_settings(cli, &cwd) {
        Ok(s) => s,
        Err(e) => {
            error(&format!("invalid settings: {}", e));
            return Ok(EXIT_ERROR);
        }
    };

    let Some(solution_path) = cli.solution.as_deref() else {
        error("missing required option -s");
        eprintln!("Try 'deprecheck --help' for more information.");
        return Ok(EXIT_ERROR);
    };

    if let Some(out) = &cli.out {
        tracing::warn!(path = %out.display(), "--out is not implemented; ignoring");
        notice("Option -o is not implemented yet.  Warnings are written to standard output");
    }

    // Locate and load the metadata module
    let reference = match cli.reference.clone().or_else(|| settings.reference.clone()) {
        Some(p) => p,
        None => {
            notice("Option -r not supplied.  Will attempt to auto-locate the platform metadata module");
            match metadata::auto_locate(&cwd) {
                Some(p) => p,
                None => {
                    let err = AnalyzerError::ModuleNotFound(metadata::DEFAULT_MODULE_NAMES.join(", "));
                    error(&err.to_string());
                    eprintln!("Try 'deprecheck --help' for more information.");
                    return Ok(EXIT_ERROR);
                }
            }
        }
    };
    let module = match MetadataModule::load(&reference) {
        Ok(m) => m,
        Err(e) => {
            error(&format!("could not load the metadata module: {}", e));
            eprintln!("Try 'deprecheck --help' for more information.");
            return Ok(EXIT_ERROR);
        }
    };

    // Resolve the required types and the target version
    let version = cli.version.as_deref().or(settings.version.as_deref());
    let ctx = match TargetContext::new(&module, &settings.metadata, version) {
        Ok(ctx) => ctx,
        Err(e @ AnalyzerError::InvalidVersion(_)) => {
            error(&e.to_string());
            eprintln!("Try 'deprecheck --help' for more information.");
            return Ok(EXIT_ERROR);
        }
        Err(e) => {
            error(&e.to_string());
            return Ok(EXIT_ERROR);
        }
    };
    if ctx.defaulted_version {
        notice("Option -v not supplied.  Defaulting to max available SDK version");
    }

    let files = match collect_snapshots(solution_path) {
        Ok(f) => f,
        Err(e) => {
            error(&format!("cannot access solution {:?}: {}", solution_path, e));
            return Ok(EXIT_ERROR);
        }
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    report::write_banner(&mut out, module.location(), solution_path, &ctx)?;

    if files.is_empty() {
        notice("No snapshot files to analyze");
        return Ok(EXIT_SUCCESS);
    }

    let runner = Runner::new(&ctx).exclude(settings.exclusion_set()?);
    let mut summary = RunSummary::default();
    for file in &files {
        let solution = SolutionSnapshot::load(file)?;
        tracing::debug!(
            path = %file.display(),
            projects = solution.projects.len(),
            trees = solution.tree_count(),
            "loaded snapshot"
        );
        summary.merge(runner.run(&solution, &mut out)?);
    }

    if summary.findings == 0 {
        Ok(EXIT_SUCCESS)
    } else {
        Ok(EXIT_FAILED)
    }
}
