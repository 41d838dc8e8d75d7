use std::fs;
use std::path::{Path, PathBuf};

use crate::backup;
use crate::dialects::{Dialect, extension_of};
use crate::error::CleanError;
use crate::traversal::display_path;
use crate::types::{BatchSummary, FileReport, FileStatus};

#[derive(Debug, Clone, Copy)]
pub struct CleanOptions {
    /// Snapshot the original before overwriting it.
    pub backup: bool,
    /// Decide what would change without writing anything.
    pub dry_run: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    Changed { backup: Option<PathBuf> },
    Unchanged,
}

/// Cleans one file in place.
///
/// The file is only written when the scanner output differs from what was
/// read. With `opts.backup` the original bytes are copied to the snapshot
/// path first; if that copy fails the file is left alone.
///
/// # Errors
/// [`CleanError::UnsupportedExtension`] if no dialect handles the file,
/// [`CleanError::Io`] if reading, snapshotting or writing fails.
pub fn clean_file(path: &Path, opts: CleanOptions) -> Result<FileOutcome, CleanError> {
    let ext = extension_of(path);
    let dialect = ext
        .as_deref()
        .and_then(Dialect::for_extension)
        .ok_or_else(|| {
            let shown = ext
                .as_ref()
                .map_or_else(|| "(none)".to_string(), |e| format!(".{e}"));
            CleanError::UnsupportedExtension(shown)
        })?;
    let original = fs::read_to_string(path).map_err(|e| CleanError::io("read", path, e))?;
    let cleaned = dialect.clean(&original);
    if cleaned == original {
        return Ok(FileOutcome::Unchanged);
    }
    if opts.dry_run {
        return Ok(FileOutcome::Changed { backup: None });
    }
    let backup = if opts.backup {
        Some(backup::snapshot(path)?)
    } else {
        None
    };
    fs::write(path, cleaned).map_err(|e| CleanError::io("write", path, e))?;
    Ok(FileOutcome::Changed { backup })
}

/// Cleans `files` one at a time, in order, and returns the accumulated
/// summary. A failing file is recorded and the batch moves on.
///
/// `observe` sees each report right after its file is handled.
pub fn process_files<F>(
    root: &Path,
    files: &[PathBuf],
    extensions: Vec<String>,
    opts: CleanOptions,
    mut observe: F,
) -> BatchSummary
where
    F: FnMut(&FileReport),
{
    let mut summary = BatchSummary::new(
        root.display().to_string(),
        extensions,
        opts.backup && !opts.dry_run,
        opts.dry_run,
    );
    for path in files {
        let dialect = extension_of(path).and_then(|e| Dialect::for_extension(&e));
        let mut report = FileReport {
            path: display_path(root, path),
            status: FileStatus::Unchanged,
            dialect,
            message: None,
            backup: None,
        };
        match clean_file(path, opts) {
            Ok(FileOutcome::Unchanged) => {}
            Ok(FileOutcome::Changed { backup }) => {
                report.status = FileStatus::Processed;
                report.backup = backup.map(|b| display_path(root, &b));
            }
            Err(e) => {
                report.status = FileStatus::Error;
                report.message = Some(e.to_string());
            }
        }
        observe(&report);
        summary.push(report);
    }
    summary
}
