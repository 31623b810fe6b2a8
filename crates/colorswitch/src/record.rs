//! Per-stylesheet state carried through the pipeline.

use std::path::{Path, PathBuf};

use serde::Serialize;

/// A stylesheet discovered in a theme.
///
/// Created by discovery with `current_path == source_path`. Staging points
/// `current_path` at the staged copy, and substitution sets `modified` once
/// at least one colour was replaced in that copy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StylesheetRecord {
    /// Base filename, e.g. `"style.css"`.
    pub name: String,
    /// Where the stylesheet lives in the theme.
    pub source_path: PathBuf,
    /// Where the working copy currently lives.
    pub current_path: PathBuf,
    /// Whether the working copy differs from the source.
    pub modified: bool,
}

impl StylesheetRecord {
    /// Creates an unmodified record for a stylesheet found at `source_path`.
    pub fn new(name: impl Into<String>, source_path: impl Into<PathBuf>) -> Self {
        let source_path = source_path.into();
        Self {
            name: name.into(),
            current_path: source_path.clone(),
            source_path,
            modified: false,
        }
    }

    /// Returns true once the record points at a copy rather than the source.
    pub fn is_staged(&self) -> bool {
        self.current_path != self.source_path
    }

    /// Path of the working copy.
    pub fn current_path(&self) -> &Path {
        &self.current_path
    }
}
