use anyhow::{Context, Result};
use std::io::{self, BufRead, Write};

use crate::backup::{delete_all, find_backups, restore_all};
use crate::formatters;
use crate::types::{BackupAction, BackupReport};

use super::{Args, EXIT_FILE_ERRORS};

pub fn run_restore(args: &Args) -> Result<i32> {
    run_backup_action(args, BackupAction::Restore)
}

pub fn run_delete(args: &Args) -> Result<i32> {
    run_backup_action(args, BackupAction::Delete)
}

fn run_backup_action(args: &Args, action: BackupAction) -> Result<i32> {
    let backups = find_backups(&args.path, args.excluded_dirs(), args.follow_symlinks)
        .with_context(|| format!("search backups in {}", args.path.display()))?;
    if args.verbose > 0 {
        eprintln!(
            "Found {} backups under {}",
            backups.len(),
            args.path.display()
        );
    }

    let report = if backups.is_empty() {
        BackupReport::new(action, 0)
    } else {
        let question = match action {
            BackupAction::Restore => format!(
                "Found {} backups. Restore all files from backups?",
                backups.len()
            ),
            BackupAction::Delete => format!("Found {} backups. Delete all backups?", backups.len()),
        };
        let confirmed =
            args.yes || confirm(&mut io::stdin().lock(), &mut io::stderr(), &question)?;
        if confirmed {
            match action {
                BackupAction::Restore => restore_all(&args.path, &backups),
                BackupAction::Delete => delete_all(&args.path, &backups),
            }
        } else {
            let mut declined = BackupReport::new(action, backups.len());
            declined.confirmed = false;
            declined
        }
    };

    if args.verbose > 1 {
        for f in &report.failures {
            eprintln!("failed: {} ({})", f.path, f.message);
        }
    }

    if args.json {
        let s = serde_json::to_string_pretty(&report)?;
        println!("{}", s);
    } else {
        println!("{}", formatters::console::format_backup_report(&report));
    }

    Ok(if report.failures.is_empty() {
        0
    } else {
        EXIT_FILE_ERRORS
    })
}

/// Asks a yes/no question; anything but `yes`/`y` (any case) is a no,
/// including end of input.
///
/// # Errors
/// Returns an error if the prompt cannot be written or the answer read.
pub fn confirm<R, W>(input: &mut R, out: &mut W, question: &str) -> Result<bool>
where
    R: BufRead + ?Sized,
    W: Write + ?Sized,
{
    write!(out, "{question} (yes/no): ")?;
    out.flush()?;
    let mut answer = String::new();
    input.read_line(&mut answer).context("read confirmation")?;
    Ok(matches!(
        answer.trim().to_ascii_lowercase().as_str(),
        "yes" | "y"
    ))
}
