use std::path::PathBuf;
use thiserror::Error;

/// Errors that can end a file-creation command
#[derive(Error, Debug)]
pub enum FileError {
    /// The user dismissed a prompt
    #[error("Operation cancelled")]
    Cancelled,

    /// File-system operation failed
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Configured template could not be read
    #[error("Failed to read template {}: {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Target exists as a directory
    #[error("This file is already a directory. Try a different name.")]
    IsDirectory(PathBuf),

    /// Host could not open or show a document
    #[error("Could not open {}: {message}", path.display())]
    Open { path: PathBuf, message: String },

    /// Brace pattern could not be expanded
    #[error("Invalid brace pattern: {0}")]
    Expansion(String),
}

/// Result type for file operations
pub type FileResult<T> = Result<T, FileError>;

impl FileError {
    /// Create an I/O error tied to a path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a template read error
    pub fn template_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::TemplateRead {
            path: path.into(),
            source,
        }
    }

    /// Create an open error
    pub fn open(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Open {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create an expansion error
    pub fn expansion(message: impl Into<String>) -> Self {
        Self::Expansion(message.into())
    }

    /// True when the user cancelled and nothing should be reported
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = FileError::IsDirectory(PathBuf::from("/tmp/dir"));
        assert_eq!(
            err.to_string(),
            "This file is already a directory. Try a different name."
        );

        let err = FileError::open("/tmp/a.rs", "editor exited with status 1");
        assert_eq!(
            err.to_string(),
            "Could not open /tmp/a.rs: editor exited with status 1"
        );

        let err = FileError::io(
            "/tmp/x",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied"),
        );
        assert_eq!(err.to_string(), "/tmp/x: permission denied");
    }

    #[test]
    fn test_is_cancelled() {
        assert!(FileError::Cancelled.is_cancelled());
        assert!(!FileError::expansion("bad").is_cancelled());
    }
}
