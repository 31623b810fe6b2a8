//! Error types for the colour switching pipeline.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::extension::ExtensionKind;

/// Errors that abort a colour switch run.
///
/// Failures the pipeline recovers from (a single stylesheet that cannot be
/// rewritten, an invalid colour mapping) never surface here; they are reported
/// through the [`Notifier`](crate::Notifier) and the returned
/// [`SwitchReport`](crate::SwitchReport) instead.
#[derive(Debug, Error)]
pub enum SwitchError {
    /// No configuration file exists for the requested id.
    #[error("configuration '{id}' not found in {}", dir.display())]
    ConfigNotFound { id: String, dir: PathBuf },

    /// The configuration file exists but could not be parsed.
    #[error("failed to parse configuration {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// A theme or module could not be located.
    #[error("{kind} '{name}' not found")]
    ExtensionNotFound { kind: ExtensionKind, name: String },

    /// A filesystem operation failed.
    #[error("failed to {op} {}: {source}", path.display())]
    Io {
        op: &'static str,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The colour matcher could not be compiled.
    #[error("failed to build colour matcher: {0}")]
    Matcher(#[from] regex::Error),

    /// An invocation setting does not match its expected format.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidSetting {
        field: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl SwitchError {
    /// Create an I/O error with the failed operation and path attached.
    pub fn io(op: &'static str, path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            op,
            path: path.into(),
            source,
        }
    }
}

/// Result type for colour switch operations.
pub type Result<T> = std::result::Result<T, SwitchError>;

/// Error raised while building a [`ColorMapping`](crate::ColorMapping).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingError {
    /// A key or value is not a 3 or 6 digit hex colour.
    #[error("{key} or {value} is not hexadecimal format")]
    InvalidColor { key: String, value: String },
}
