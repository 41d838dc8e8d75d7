use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CleanError {
    #[error("directory {} not found", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("unsupported extension: {0}")]
    UnsupportedExtension(String),
    #[error("failed to {action} {}: {source}", .path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl CleanError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        CleanError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_message_names_step_and_path() {
        let err = CleanError::io(
            "read",
            "src/app.js",
            io::Error::new(io::ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "failed to read src/app.js: gone");
    }

    #[test]
    fn missing_directory_message() {
        let err = CleanError::DirectoryNotFound(PathBuf::from("/nope"));
        assert_eq!(err.to_string(), "directory /nope not found");
    }
}
