use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::Result;
use ignore::WalkBuilder;

use crate::dialects::extension_of;

pub struct TraversalOptions {
    pub follow_symlinks: bool,
    pub excluded_dirs: HashSet<String>, // directory names, not paths
    pub allowed_exts: Option<HashSet<String>>, // lowercase, no dot
}

/// Walks `root` and returns candidate files in a stable (name-sorted) order.
///
/// Every directory whose name is in `excluded_dirs` is pruned together with
/// its descendants. Ignore files are not consulted: only the exclusion set
/// decides what gets skipped.
pub fn collect_files(root: &Path, opts: &TraversalOptions) -> Result<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);
    builder.follow_links(opts.follow_symlinks);
    builder.hidden(false);
    builder.ignore(false);
    builder.parents(false);
    builder.git_ignore(false);
    builder.git_exclude(false);
    builder.git_global(false);
    builder.sort_by_file_name(|a, b| a.cmp(b));

    let excluded = opts.excluded_dirs.clone();
    builder.filter_entry(move |dent| {
        let is_dir = dent.file_type().is_some_and(|t| t.is_dir());
        if !is_dir || dent.depth() == 0 {
            return true;
        }
        dent.file_name()
            .to_str()
            .is_none_or(|name| !excluded.contains(name))
    });

    let mut out = Vec::new();
    for dent in builder.build() {
        let dent = match dent {
            Ok(d) => d,
            Err(_) => continue,
        };
        let path = dent.path();
        if !path.is_file() {
            continue;
        }

        if let Some(ref allowed) = opts.allowed_exts {
            match extension_of(path) {
                Some(ext) if allowed.contains(&ext) => {}
                _ => continue,
            }
        }

        out.push(path.to_path_buf());
    }

    Ok(out)
}

/// `path` relative to `root` for reports; falls back to the full path.
pub fn display_path(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}
