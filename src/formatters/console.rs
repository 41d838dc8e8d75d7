use std::fmt::Write as _;
use std::io::IsTerminal;

use crate::backup::BACKUP_SUFFIX;
use crate::types::{BackupAction, BackupReport, BatchSummary, FileStatus};

const RULE_WIDTH: usize = 70;

pub fn format_summary(s: &BatchSummary) -> String {
    format_summary_with(s, &Colors::enabled())
}

pub fn format_backup_report(r: &BackupReport) -> String {
    format_backup_report_with(r, &Colors::enabled())
}

fn format_summary_with(s: &BatchSummary, colors: &Colors) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();
    let _ = writeln!(out, "Scanning: {}", s.root);
    let _ = writeln!(out, "Extensions: {}", s.extensions.join(", "));
    if s.dry_run {
        let _ = writeln!(out, "Dry run: no files will be written");
    } else {
        let _ = writeln!(out, "Backups: {}", if s.backups { "yes" } else { "no" });
    }
    let _ = writeln!(out, "{rule}");

    if s.files.is_empty() {
        let _ = write!(out, "{}", colors.paint("No matching files found", "33"));
        return out;
    }
    let _ = writeln!(out, "Found {} files\n", format_num(s.files.len()));

    for f in &s.files {
        let line = match f.status {
            FileStatus::Processed => colors.paint(&format!("✓ {}", f.path), "32"),
            FileStatus::Unchanged => colors.paint(&format!("○ {} (no comments)", f.path), "90"),
            FileStatus::Error => colors.paint(
                &format!("✗ {} - {}", f.path, f.message.as_deref().unwrap_or("error")),
                "31",
            ),
        };
        let _ = writeln!(out, "{line}");
    }

    let _ = writeln!(out, "{rule}");
    let processed_label = if s.dry_run { "Would process" } else { "Processed" };
    let _ = writeln!(
        out,
        "{}",
        colors.bold(&format!("{processed_label}: {}", format_num(s.totals.processed)))
    );
    let _ = writeln!(out, "Skipped (unchanged): {}", format_num(s.totals.unchanged));
    if s.totals.errors > 0 {
        let _ = writeln!(
            out,
            "{}",
            colors.paint(&format!("Errors: {}", format_num(s.totals.errors)), "31")
        );
    }

    if s.backups_created() > 0 {
        let _ = writeln!(out, "\nBackups saved with suffix .{BACKUP_SUFFIX}");
        let _ = writeln!(out, "  To delete them run:");
        let _ = writeln!(out, "  decomment {} --delete-backups", s.root);
    }
    out.truncate(out.trim_end().len());
    out
}

fn format_backup_report_with(r: &BackupReport, colors: &Colors) -> String {
    let mut out = String::new();
    if r.found == 0 {
        let _ = write!(out, "{}", colors.paint("No backups found", "33"));
        return out;
    }
    if !r.confirmed {
        let _ = write!(out, "Cancelled");
        return out;
    }
    let (verb, done_label) = match r.action {
        BackupAction::Restore => ("Restored", "Files restored"),
        BackupAction::Delete => ("Deleted", "Backups deleted"),
    };
    for path in &r.succeeded {
        let _ = writeln!(out, "{}", colors.paint(&format!("✓ {verb}: {path}"), "32"));
    }
    for f in &r.failures {
        let _ = writeln!(
            out,
            "{}",
            colors.paint(&format!("✗ {}: {}", f.path, f.message), "31")
        );
    }
    let _ = write!(
        out,
        "\n{}",
        colors.bold(&format!("{done_label}: {}", format_num(r.succeeded.len())))
    );
    out
}

fn format_num(n: usize) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);
    for (i, ch) in s.chars().enumerate() {
        if i > 0 && (s.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

struct Colors {
    enabled: bool,
}

impl Colors {
    fn enabled() -> Self {
        let force = std::env::var("CLICOLOR_FORCE")
            .ok()
            .filter(|v| v != "0")
            .is_some();
        let no_color = std::env::var_os("NO_COLOR").is_some();
        let clicolor_zero = std::env::var("CLICOLOR")
            .ok()
            .is_some_and(|v| v == "0");
        let term = std::io::stdout().is_terminal();
        let enabled = if force {
            true
        } else if no_color || clicolor_zero {
            false
        } else {
            term
        };
        Colors { enabled }
    }

    fn paint(&self, s: &str, code: &str) -> String {
        if self.enabled {
            format!("\x1b[{code}m{s}\x1b[0m")
        } else {
            s.to_string()
        }
    }

    fn bold(&self, s: &str) -> String {
        self.paint(s, "1")
    }
}
