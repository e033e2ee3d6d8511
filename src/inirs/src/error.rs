// inirs/src/error.rs

//! Error types for reading and rewriting INI files.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for inirs operations.
pub type Result<T> = std::result::Result<T, IniError>;

/// Errors that can occur when parsing or modifying an INI file.
///
/// Malformed lines are never reported here: the parser tolerates them.
#[derive(Error, Debug)]
pub enum IniError {
    /// A stream over the configuration file (or its temporary copy) failed.
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// `modify` was called with an empty key or value.
    #[error("Invalid parameter input: key [{key}], value [{value}]")]
    InvalidParameter { key: String, value: String },

    /// The rewritten temporary file could not replace the original.
    #[error("Failed to replace {} with rewritten copy: {source}", .path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serialization error
    #[cfg(feature = "json")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl IniError {
    /// Create a new I/O error bound to a path.
    pub fn io<P: Into<PathBuf>>(path: P, source: io::Error) -> Self {
        IniError::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a new invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(key: S, value: S) -> Self {
        IniError::InvalidParameter {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Get the error category for logging and reporting.
    pub fn category(&self) -> &'static str {
        match self {
            IniError::Io { .. } => "file-unavailable",
            IniError::InvalidParameter { .. } => "invalid-argument",
            IniError::Persist { .. } => "replace",
            #[cfg(feature = "json")]
            IniError::Json(_) => "serialization",
        }
    }

    /// Whether the error was caused by the caller's arguments rather than the filesystem.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, IniError::InvalidParameter { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IniError::invalid_parameter("port", "");
        assert_eq!(
            err.to_string(),
            "Invalid parameter input: key [port], value []"
        );

        let err = IniError::io(
            "config.ini",
            io::Error::new(io::ErrorKind::NotFound, "missing"),
        );
        assert_eq!(err.to_string(), "I/O error on config.ini: missing");
    }

    #[test]
    fn test_error_categories() {
        assert_eq!(
            IniError::invalid_parameter("", "x").category(),
            "invalid-argument"
        );
        let err = IniError::io("a.ini", io::Error::new(io::ErrorKind::Other, "boom"));
        assert_eq!(err.category(), "file-unavailable");
        assert!(!err.is_invalid_input());
        assert!(IniError::invalid_parameter("k", "").is_invalid_input());
    }

    #[test]
    fn test_io_source_is_kept() {
        use std::error::Error;

        let err = IniError::io(
            "a.ini",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        let source = err.source().expect("io error should carry its source");
        assert_eq!(source.to_string(), "denied");
    }
}
