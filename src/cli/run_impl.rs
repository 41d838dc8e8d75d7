use anyhow::{Context, Result};

use crate::dialects::{default_extensions, display_extensions, parse_extensions};
use crate::formatters;
use crate::pipeline::{CleanOptions, process_files};
use crate::traversal::{TraversalOptions, collect_files};

use super::{Args, EXIT_FILE_ERRORS};

pub fn run_clean(args: &Args) -> Result<i32> {
    let allowed_exts = match args.extensions {
        Some(ref tokens) => parse_extensions(tokens),
        None => default_extensions(),
    };
    if allowed_exts.is_empty() {
        anyhow::bail!("--extensions needs at least one extension");
    }
    let extensions = display_extensions(&allowed_exts);

    let opts = TraversalOptions {
        follow_symlinks: args.follow_symlinks,
        excluded_dirs: args.excluded_dirs(),
        allowed_exts: Some(allowed_exts),
    };

    if args.verbose > 0 {
        eprintln!("Scanning path: {}", args.path.display());
        eprintln!("Extensions: {}", extensions.join(", "));
        let mut skipped: Vec<&str> = opts.excluded_dirs.iter().map(String::as_str).collect();
        skipped.sort_unstable();
        eprintln!("Excluded directories: {}", skipped.join(", "));
    }
    let files = collect_files(&args.path, &opts)
        .with_context(|| format!("walk {}", args.path.display()))?;
    if args.verbose > 0 {
        eprintln!("Found {} files to process", files.len());
    }

    // Progress setup
    let pb = if args.progress {
        let pb = indicatif::ProgressBar::new(files.len() as u64);
        pb.set_style(
            indicatif::ProgressStyle::with_template("{spinner} {pos}/{len} files {wide_bar} {eta}")?
                .tick_chars("⠁⠃⠇⠋⠙⠸⢰⣠⣄⡆"),
        );
        Some(pb)
    } else {
        None
    };

    let clean_opts = CleanOptions {
        backup: !args.no_backup,
        dry_run: args.dry_run,
    };
    let summary = process_files(&args.path, &files, extensions, clean_opts, |report| {
        if let Some(ref pb) = pb {
            pb.inc(1);
        }
        if args.verbose > 1 {
            eprintln!("{:?}: {}", report.status, report.path);
        }
    });

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }
    if args.verbose > 1 {
        eprintln!(
            "Totals: files={}, processed={}, unchanged={}, errors={}",
            summary.totals.files(),
            summary.totals.processed,
            summary.totals.unchanged,
            summary.totals.errors
        );
    }

    if args.json {
        let s = serde_json::to_string_pretty(&summary)?;
        println!("{}", s);
    } else {
        println!("{}", formatters::console::format_summary(&summary));
    }

    Ok(if summary.totals.errors > 0 {
        EXIT_FILE_ERRORS
    } else {
        0
    })
}
