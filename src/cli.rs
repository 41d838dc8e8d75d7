use std::collections::HashSet;
use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgAction, Parser, ValueHint};

use crate::dialects::default_excluded_dirs;
use crate::error::CleanError;

mod run_impl;
mod sub_backup;

/// Exit status when the batch finished but some files failed.
pub const EXIT_FILE_ERRORS: i32 = 2;

#[allow(clippy::struct_excessive_bools)]
#[derive(Parser, Debug, Clone)]
#[command(
    name = "decomment",
    version,
    about = "Strip comments from JS/JSX/CSS sources, leaving string literals intact",
    long_about = None
)]
pub struct Args {
    /// Directory to process
    #[arg(value_name = "DIR", value_hint = ValueHint::DirPath)]
    pub path: PathBuf,

    /// Overwrite files without keeping a .backup copy
    #[arg(long = "no-backup", action = ArgAction::SetTrue)]
    pub no_backup: bool,

    /// Restore every file from its .backup copy and remove the copies
    #[arg(
        long = "restore",
        action = ArgAction::SetTrue,
        conflicts_with_all = ["delete_backups", "dry_run", "no_backup", "extensions"]
    )]
    pub restore: bool,

    /// Delete every .backup copy
    #[arg(
        long = "delete-backups",
        action = ArgAction::SetTrue,
        conflicts_with_all = ["dry_run", "no_backup", "extensions"]
    )]
    pub delete_backups: bool,

    /// Process only these extensions, e.g. --extensions .js jsx (default: .js .jsx .css)
    #[arg(long = "extensions", value_name = "EXT", num_args = 1..)]
    pub extensions: Option<Vec<String>>,

    /// Extra directory names to skip (node_modules, .git, build, dist, __pycache__ are always skipped)
    #[arg(long = "exclude", value_name = "DIR", num_args = 1..)]
    pub exclude: Vec<String>,

    /// Report what would change without writing anything
    #[arg(long = "dry-run", action = ArgAction::SetTrue)]
    pub dry_run: bool,

    /// Do not ask for confirmation before restoring or deleting backups
    #[arg(long = "yes", short = 'y', action = ArgAction::SetTrue)]
    pub yes: bool,

    /// Output JSON instead of the console report
    #[arg(long = "json", action = ArgAction::SetTrue)]
    pub json: bool,

    /// Show a progress bar
    #[arg(long = "progress", action = ArgAction::SetTrue)]
    pub progress: bool,

    /// Follow symlinks
    #[arg(long = "follow-symlinks", action = ArgAction::SetTrue)]
    pub follow_symlinks: bool,

    /// Verbose logging
    #[arg(long = "verbose", short = 'v', action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    fn excluded_dirs(&self) -> HashSet<String> {
        let mut dirs = default_excluded_dirs();
        dirs.extend(
            self.exclude
                .iter()
                .map(|d| d.trim().trim_end_matches(['/', '\\']).to_string())
                .filter(|d| !d.is_empty()),
        );
        dirs
    }
}

/// Runs the CLI application and returns the process exit status.
///
/// # Errors
/// Returns an error if the root directory is missing or a fatal step fails.
pub fn run() -> Result<i32> {
    let args = Args::parse();
    run_with_args(&args)
}

/// # Errors
/// See [`run`].
pub fn run_with_args(args: &Args) -> Result<i32> {
    if !args.path.is_dir() {
        return Err(CleanError::DirectoryNotFound(args.path.clone()).into());
    }
    if args.restore {
        return sub_backup::run_restore(args);
    }
    if args.delete_backups {
        return sub_backup::run_delete(args);
    }
    run_impl::run_clean(args)
}
