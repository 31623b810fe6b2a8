//! Theme and module path resolution.
//!
//! Themes and modules are extensions: directories identified by a
//! `<name>.info.yml` file whose `type` key says what they are.
//!
//! ```text
//! web/
//! ├── themes/
//! │   └── custom/
//! │       └── demo/
//! │           ├── demo.info.yml      type: theme
//! │           └── css/
//! └── modules/
//!     └── ewcms_extended/
//!         └── ewcms_extended.info.yml  type: module
//! ```
//!
//! Lookups check explicit overrides first, then walk the registered roots in
//! order. Within a root, directories are visited in name order so the first
//! match is stable.

use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use walkdir::WalkDir;

use crate::env::SKIPPED_DIRS;
use crate::error::{Result, SwitchError};

/// Suffix of extension info files.
pub const INFO_SUFFIX: &str = ".info.yml";

/// What kind of extension to look up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtensionKind {
    Theme,
    Module,
}

impl ExtensionKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ExtensionKind::Theme => "theme",
            ExtensionKind::Module => "module",
        }
    }
}

impl fmt::Display for ExtensionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Deserialize)]
struct InfoFile {
    #[serde(rename = "type")]
    kind: Option<String>,
}

/// Resolves extension names to their directories.
#[derive(Debug, Clone, Default)]
pub struct ExtensionList {
    roots: Vec<PathBuf>,
    overrides: HashMap<(ExtensionKind, String), PathBuf>,
}

impl ExtensionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a directory to search for info files.
    pub fn add_root(&mut self, root: impl Into<PathBuf>) -> &mut Self {
        self.roots.push(root.into());
        self
    }

    /// Pins `name` to `path`, bypassing the search.
    pub fn set_path(
        &mut self,
        kind: ExtensionKind,
        name: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> &mut Self {
        self.overrides.insert((kind, name.into()), path.into());
        self
    }

    pub fn roots(&self) -> &[PathBuf] {
        &self.roots
    }

    /// Directory of the theme `name`.
    pub fn theme_path(&self, name: &str) -> Result<PathBuf> {
        self.path_of(ExtensionKind::Theme, name)
    }

    /// Directory of the module `name`.
    pub fn module_path(&self, name: &str) -> Result<PathBuf> {
        self.path_of(ExtensionKind::Module, name)
    }

    /// Directory of the extension `name`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::ExtensionNotFound`] if neither an override nor
    /// an info file of the right type exists.
    pub fn path_of(&self, kind: ExtensionKind, name: &str) -> Result<PathBuf> {
        if let Some(path) = self.overrides.get(&(kind, name.to_string())) {
            return Ok(path.clone());
        }

        let info_name = format!("{}{}", name, INFO_SUFFIX);
        for root in &self.roots {
            if let Some(dir) = find_info_dir(root, &info_name, kind) {
                debug!(%kind, name, dir = %dir.display(), "resolved extension");
                return Ok(dir);
            }
        }

        Err(SwitchError::ExtensionNotFound {
            kind,
            name: name.to_string(),
        })
    }
}

fn find_info_dir(root: &Path, info_name: &str, kind: ExtensionKind) -> Option<PathBuf> {
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && SKIPPED_DIRS.iter().any(|skip| entry.file_name() == *skip))
        })
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file() && entry.file_name() == info_name)
        .find(|entry| declares_kind(entry.path(), kind))
        .and_then(|entry| entry.path().parent().map(Path::to_path_buf))
}

/// An info file without a `type` key is accepted for either kind.
fn declares_kind(info_path: &Path, kind: ExtensionKind) -> bool {
    let Ok(content) = fs::read_to_string(info_path) else {
        return false;
    };
    match serde_yaml::from_str::<InfoFile>(&content) {
        Ok(info) => info.kind.map_or(true, |declared| declared == kind.as_str()),
        Err(_) => false,
    }
}
