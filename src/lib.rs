//! Comment stripping for script-like and style-sheet-like sources.
//!
//! The scanners in [`scanner`] are pure functions from text to text. The
//! rest of the crate walks a directory, rewrites changed files (optionally
//! keeping a `.backup` snapshot) and manages those snapshots afterwards.

pub mod backup;
pub mod cli;
pub mod dialects;
pub mod error;
pub mod formatters;
pub mod layout;
pub mod pipeline;
pub mod scanner;
pub mod traversal;
pub mod types;

pub use dialects::Dialect;
pub use error::CleanError;
pub use scanner::{Span, SpanKind, clean_script, clean_stylesheet};
