//! Snapshots taken before a file is overwritten, and their later restore or
//! removal.
//!
//! A snapshot of `x.ext` lives next to it as `x.ext.backup`.

use std::collections::HashSet;
use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::dialects::extension_of;
use crate::error::CleanError;
use crate::traversal::{TraversalOptions, collect_files, display_path};
use crate::types::{BackupAction, BackupFailure, BackupReport};

pub const BACKUP_SUFFIX: &str = "backup";

pub fn backup_path_for(path: &Path) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(BACKUP_SUFFIX);
    PathBuf::from(name)
}

/// Inverse of [`backup_path_for`]. `None` if `backup` does not carry the
/// marker or has nothing in front of it.
pub fn original_path_for(backup: &Path) -> Option<PathBuf> {
    if extension_of(backup)? != BACKUP_SUFFIX {
        return None;
    }
    let stem = backup.file_stem()?;
    Some(backup.with_file_name(stem))
}

/// Copies `original` verbatim to its snapshot path, replacing any older
/// snapshot.
///
/// # Errors
/// Returns [`CleanError::Io`] if the copy fails.
pub fn snapshot(original: &Path) -> Result<PathBuf, CleanError> {
    let target = backup_path_for(original);
    fs::copy(original, &target).map_err(|e| CleanError::io("copy", original, e))?;
    Ok(target)
}

/// Finds every snapshot under `root`, skipping the excluded subtrees.
///
/// # Errors
/// Returns an error if the directory walk cannot be set up.
pub fn find_backups(
    root: &Path,
    excluded_dirs: HashSet<String>,
    follow_symlinks: bool,
) -> Result<Vec<PathBuf>> {
    let opts = TraversalOptions {
        follow_symlinks,
        excluded_dirs,
        allowed_exts: Some(HashSet::from([BACKUP_SUFFIX.to_string()])),
    };
    let mut found = collect_files(root, &opts)?;
    found.retain(|p| original_path_for(p).is_some());
    Ok(found)
}

/// Copies a snapshot back over its original, then removes the snapshot.
///
/// # Errors
/// Returns [`CleanError::Io`] naming the step that failed.
pub fn restore_one(backup: &Path) -> Result<PathBuf, CleanError> {
    let original = original_path_for(backup).ok_or_else(|| {
        CleanError::io(
            "restore",
            backup,
            io::Error::new(io::ErrorKind::InvalidInput, "not a backup file"),
        )
    })?;
    fs::copy(backup, &original).map_err(|e| CleanError::io("copy", backup, e))?;
    fs::remove_file(backup).map_err(|e| CleanError::io("delete", backup, e))?;
    Ok(original)
}

/// Restores every snapshot in order; failures are recorded and the rest
/// still run.
pub fn restore_all(root: &Path, backups: &[PathBuf]) -> BackupReport {
    let mut report = BackupReport::new(BackupAction::Restore, backups.len());
    for backup in backups {
        match restore_one(backup) {
            Ok(original) => report.succeeded.push(display_path(root, &original)),
            Err(e) => report.failures.push(BackupFailure {
                path: display_path(root, backup),
                message: e.to_string(),
            }),
        }
    }
    report
}

pub fn delete_all(root: &Path, backups: &[PathBuf]) -> BackupReport {
    let mut report = BackupReport::new(BackupAction::Delete, backups.len());
    for backup in backups {
        match fs::remove_file(backup) {
            Ok(()) => report.succeeded.push(display_path(root, backup)),
            Err(e) => report.failures.push(BackupFailure {
                path: display_path(root, backup),
                message: CleanError::io("delete", backup, e).to_string(),
            }),
        }
    }
    report
}
