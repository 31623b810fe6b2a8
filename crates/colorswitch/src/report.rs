//! Results returned by a colour switch run.

use std::path::PathBuf;

use serde::Serialize;

/// Status message returned when stylesheets were published.
pub const PUBLISHED_MESSAGE: &str = "Switch css : css files copied.";

/// What happened to one staged stylesheet during substitution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FileStatus {
    /// No configured colour occurs in the file.
    Unchanged,
    /// The file was rewritten.
    Modified { replacements: usize },
    /// The file could not be read or written back.
    Failed { error: String },
}

/// Per-file substitution result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileOutcome {
    pub name: String,
    #[serde(flatten)]
    pub status: FileStatus,
}

impl FileOutcome {
    pub fn new(name: impl Into<String>, status: FileStatus) -> Self {
        Self {
            name: name.into(),
            status,
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self.status, FileStatus::Failed { .. })
    }
}

/// Result of the publication stage.
///
/// Only [`Published`](Self::Published) carries a status message. The other
/// two variants are distinct "nothing was published" outcomes that callers
/// must handle explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PublishOutcome {
    /// Modified stylesheets were copied into the target directory.
    Published {
        message: String,
        target_dir: PathBuf,
        copied: Vec<String>,
    },
    /// Stylesheets were found but none was modified, so none was copied.
    NothingModified { target_dir: PathBuf },
    /// Discovery found no stylesheets at all.
    NoStylesheets,
}

impl PublishOutcome {
    /// The status message, if anything was published.
    pub fn message(&self) -> Option<&str> {
        match self {
            PublishOutcome::Published { message, .. } => Some(message),
            _ => None,
        }
    }

    /// Names of the published stylesheets.
    pub fn copied(&self) -> &[String] {
        match self {
            PublishOutcome::Published { copied, .. } => copied,
            _ => &[],
        }
    }

    pub fn is_published(&self) -> bool {
        matches!(self, PublishOutcome::Published { .. })
    }
}

/// Everything a colour switch run produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SwitchReport {
    pub outcome: PublishOutcome,
    /// Per-file substitution results. Empty when substitution was skipped.
    pub files: Vec<FileOutcome>,
}

impl SwitchReport {
    /// The status message, if anything was published.
    pub fn message(&self) -> Option<&str> {
        self.outcome.message()
    }

    /// Stylesheets whose substitution failed.
    pub fn failures(&self) -> impl Iterator<Item = &FileOutcome> {
        self.files.iter().filter(|f| f.is_failed())
    }
}
