#![allow(clippy::must_use_candidate)]

use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;

use crate::scanner::{clean_script, clean_stylesheet};

/// Comment and literal syntax shared by a group of file extensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Script,
    Stylesheet,
}

// Extensions are lowercase, no dot.
static DIALECT_TABLE: &[(&str, Dialect)] = &[
    ("js", Dialect::Script),
    ("jsx", Dialect::Script),
    ("mjs", Dialect::Script),
    ("cjs", Dialect::Script),
    ("ts", Dialect::Script),
    ("tsx", Dialect::Script),
    ("css", Dialect::Stylesheet),
];

pub const DEFAULT_EXTENSIONS: &[&str] = &["js", "jsx", "css"];

pub const DEFAULT_EXCLUDED_DIRS: &[&str] =
    &["node_modules", ".git", "build", "dist", "__pycache__"];

impl Dialect {
    pub const fn name(self) -> &'static str {
        match self {
            Dialect::Script => "script",
            Dialect::Stylesheet => "stylesheet",
        }
    }

    pub fn for_extension(ext: &str) -> Option<Self> {
        let ext = normalize_extension(ext);
        DIALECT_TABLE
            .iter()
            .find(|(e, _)| *e == ext)
            .map(|&(_, d)| d)
    }

    /// Runs the scanner for this dialect.
    pub fn clean(self, text: &str) -> String {
        match self {
            Dialect::Script => clean_script(text),
            Dialect::Stylesheet => clean_stylesheet(text),
        }
    }
}

/// Lowercase extension of `path` without the dot.
pub fn extension_of(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|s| s.to_str())
        .map(str::to_ascii_lowercase)
}

pub fn dialect_for_path(path: &Path) -> Option<Dialect> {
    extension_of(path).and_then(|ext| Dialect::for_extension(&ext))
}

/// `".JS"`, `"js"` and `" js "` all become `"js"`.
pub fn normalize_extension(token: &str) -> String {
    token.trim().trim_start_matches('.').to_ascii_lowercase()
}

/// Builds an extension set from command-line tokens; each token may itself
/// be a comma-separated list.
pub fn parse_extensions<S: AsRef<str>>(tokens: &[S]) -> HashSet<String> {
    tokens
        .iter()
        .flat_map(|t| t.as_ref().split(','))
        .filter(|t| !t.trim().is_empty())
        .map(normalize_extension)
        .filter(|t| !t.is_empty())
        .collect()
}

pub fn default_extensions() -> HashSet<String> {
    DEFAULT_EXTENSIONS.iter().map(|e| (*e).to_string()).collect()
}

pub fn default_excluded_dirs() -> HashSet<String> {
    DEFAULT_EXCLUDED_DIRS.iter().map(|d| (*d).to_string()).collect()
}

/// Sorted `.ext` list for display.
pub fn display_extensions(exts: &HashSet<String>) -> Vec<String> {
    let mut out: Vec<String> = exts.iter().map(|e| format!(".{e}")).collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn maps_default_extensions() {
        assert_eq!(Dialect::for_extension("js"), Some(Dialect::Script));
        assert_eq!(Dialect::for_extension(".JSX"), Some(Dialect::Script));
        assert_eq!(Dialect::for_extension("css"), Some(Dialect::Stylesheet));
        assert_eq!(Dialect::for_extension("py"), None);
    }

    #[test]
    fn path_lookup_is_case_insensitive() {
        assert_eq!(
            dialect_for_path(&PathBuf::from("src/App.JSX")),
            Some(Dialect::Script)
        );
        assert_eq!(
            dialect_for_path(&PathBuf::from("styles/Main.Css")),
            Some(Dialect::Stylesheet)
        );
        assert_eq!(dialect_for_path(&PathBuf::from("Makefile")), None);
        // Only the last extension counts.
        assert_eq!(dialect_for_path(&PathBuf::from("app.js.backup")), None);
    }

    #[test]
    fn extension_tokens_are_normalized() {
        let set = parse_extensions(&["js", ".JSX", "ts,.tsx", " ", ","]);
        let mut got: Vec<_> = set.into_iter().collect();
        got.sort();
        assert_eq!(got, vec!["js", "jsx", "ts", "tsx"]);
    }

    #[test]
    fn display_adds_dots() {
        assert_eq!(
            display_extensions(&default_extensions()),
            vec![".css", ".js", ".jsx"]
        );
    }

    #[test]
    fn dialect_dispatches_to_scanner() {
        assert_eq!(Dialect::Script.clean("a // b\n"), "a\n");
        assert_eq!(Dialect::Stylesheet.clean("a /* b */\n\nc\n"), "a\nc\n");
    }
}
