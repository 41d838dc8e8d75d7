use indexmap::IndexMap;
use serde::Serialize;

use crate::dialects::Dialect;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FileStatus {
    /// Comments were removed (or would be, on a dry run).
    Processed,
    /// Scanner output equals the input; nothing written.
    Unchanged,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dialect: Option<Dialect>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backup: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Tally {
    pub processed: usize,
    pub unchanged: usize,
    pub errors: usize,
}

impl Tally {
    pub fn record(&mut self, status: FileStatus) {
        match status {
            FileStatus::Processed => self.processed += 1,
            FileStatus::Unchanged => self.unchanged += 1,
            FileStatus::Error => self.errors += 1,
        }
    }

    pub const fn files(&self) -> usize {
        self.processed + self.unchanged + self.errors
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchSummary {
    pub root: String,
    pub extensions: Vec<String>,
    pub backups: bool,
    pub dry_run: bool,
    pub files: Vec<FileReport>,
    #[serde(rename = "dialects")]
    pub per_dialect: IndexMap<String, Tally>,
    pub totals: Tally,
}

impl BatchSummary {
    pub fn new(root: String, extensions: Vec<String>, backups: bool, dry_run: bool) -> Self {
        BatchSummary {
            root,
            extensions,
            backups,
            dry_run,
            files: Vec::new(),
            per_dialect: IndexMap::new(),
            totals: Tally::default(),
        }
    }

    pub fn push(&mut self, report: FileReport) {
        let key = report
            .dialect
            .map_or("unsupported", Dialect::name)
            .to_string();
        self.per_dialect.entry(key).or_default().record(report.status);
        self.totals.record(report.status);
        self.files.push(report);
    }

    pub fn backups_created(&self) -> usize {
        self.files.iter().filter(|f| f.backup.is_some()).count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BackupAction {
    Restore,
    Delete,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupFailure {
    pub path: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BackupReport {
    pub action: BackupAction,
    pub found: usize,
    pub succeeded: Vec<String>,
    pub failures: Vec<BackupFailure>,
    /// False when the user declined the confirmation prompt.
    pub confirmed: bool,
}

impl BackupReport {
    pub fn new(action: BackupAction, found: usize) -> Self {
        BackupReport {
            action,
            found,
            succeeded: Vec::new(),
            failures: Vec::new(),
            confirmed: true,
        }
    }
}
