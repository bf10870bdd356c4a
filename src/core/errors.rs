//! Error types for the rec-em library.
//!
//! Every failure in the header pipeline is unrecoverable at the point it
//! occurs, so the variants here mostly exist to carry enough context (which
//! path, which config field) for a single descriptive message at the CLI.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Main result type for rec-em operations.
pub type Result<T> = std::result::Result<T, RecEmError>;

/// Error type for all rec-em operations.
#[derive(Error, Debug)]
pub enum RecEmError {
    /// An input file could not be opened or read while encoding
    #[error("Error reading input file {}: {source}", .path.display())]
    InputUnavailable {
        /// Offending input path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The generated header could not be created or written
    #[error("Error writing header file {}: {source}", .path.display())]
    OutputUnavailable {
        /// Output header path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// An input argument is neither a regular file nor a directory
    #[error("Cannot find file or directory: {}", .path.display())]
    InputNotFound {
        /// Path as given on the command line
        path: PathBuf,
    },

    /// Input is too long for the `unsigned int` size constant
    #[error("Input file {} is {len} bytes, larger than an unsigned int can describe", .path.display())]
    InputTooLarge {
        /// Offending input path
        path: PathBuf,
        /// Size reported by the filesystem
        len: u64,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Other I/O errors (directory walks, directory creation)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Config file deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl RecEmError {
    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create an input error naming the path that failed
    pub fn input(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::InputUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create an output error naming the header path that failed
    pub fn output(path: impl AsRef<Path>, source: io::Error) -> Self {
        Self::OutputUnavailable {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Prefix the message of message-carrying variants with extra context
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        match &mut self {
            Self::Io { message, .. }
            | Self::Config { message, .. }
            | Self::Serialization { message, .. } => {
                *message = format!("{}: {message}", context.into());
            }
            _ => {} // Path-carrying variants already name their subject
        }
        self
    }
}

impl From<io::Error> for RecEmError {
    fn from(err: io::Error) -> Self {
        Self::io(err.kind().to_string(), err)
    }
}

impl From<serde_yaml::Error> for RecEmError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML deserialization failed: {err}"),
            source: Some(Box::new(err)),
        }
    }
}

impl From<walkdir::Error> for RecEmError {
    fn from(err: walkdir::Error) -> Self {
        let message = match err.path() {
            Some(path) => format!("Failed to walk {}", path.display()),
            None => "Failed to walk input directory".to_string(),
        };
        Self::io(message, err.into())
    }
}

/// Result extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error result
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String;

    /// Add static context to an error result
    fn context(self, msg: &'static str) -> Result<T>;
}

impl<T, E> ResultExt<T> for std::result::Result<T, E>
where
    E: Into<RecEmError>,
{
    fn with_context<F>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> String,
    {
        self.map_err(|e| e.into().with_context(f()))
    }

    fn context(self, msg: &'static str) -> Result<T> {
        self.map_err(|e| e.into().with_context(msg))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_names_path() {
        let err = RecEmError::input(
            "assets/missing.bin",
            io::Error::new(io::ErrorKind::NotFound, "No such file"),
        );

        let display = err.to_string();
        assert!(display.contains("assets/missing.bin"));
        assert!(display.contains("No such file"));
        assert!(matches!(err, RecEmError::InputUnavailable { .. }));
    }

    #[test]
    fn test_output_error_names_path() {
        let err = RecEmError::output(
            "out/rec_em.hpp",
            io::Error::new(io::ErrorKind::PermissionDenied, "Access denied"),
        );

        if let RecEmError::OutputUnavailable { path, source } = &err {
            assert_eq!(path, &PathBuf::from("out/rec_em.hpp"));
            assert_eq!(source.kind(), io::ErrorKind::PermissionDenied);
        } else {
            panic!("Expected OutputUnavailable error");
        }
    }

    #[test]
    fn test_input_not_found_message() {
        let err = RecEmError::InputNotFound {
            path: PathBuf::from("nowhere"),
        };
        assert_eq!(err.to_string(), "Cannot find file or directory: nowhere");
    }

    #[test]
    fn test_config_field_error() {
        let err = RecEmError::config_field("must be greater than zero", "tokens_per_line");

        if let RecEmError::Config { message, field } = err {
            assert_eq!(message, "must be greater than zero");
            assert_eq!(field, Some("tokens_per_line".to_string()));
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_with_context_prefixes_message() {
        let err = RecEmError::config_field("bad value", "namespace").with_context("Loading .rec_em.yml");

        if let RecEmError::Config { message, .. } = err {
            assert_eq!(message, "Loading .rec_em.yml: bad value");
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_with_context_leaves_path_variants_alone() {
        let err = RecEmError::InputNotFound {
            path: PathBuf::from("a.bin"),
        }
        .with_context("ignored");

        assert_eq!(err.to_string(), "Cannot find file or directory: a.bin");
    }

    #[test]
    fn test_result_ext_converts_io_error() {
        let result: std::result::Result<(), io::Error> = Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Bad input",
        ));

        let err = result
            .with_context(|| "Creating output directory".to_string())
            .unwrap_err();

        if let RecEmError::Io { message, .. } = err {
            assert!(message.starts_with("Creating output directory"));
        } else {
            panic!("Expected Io error");
        }
    }

    #[test]
    fn test_from_yaml_error() {
        let yaml_err = serde_yaml::from_str::<u32>("invalid: yaml: content").unwrap_err();
        let err: RecEmError = yaml_err.into();

        assert!(matches!(err, RecEmError::Serialization { .. }));
    }
}
