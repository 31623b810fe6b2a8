//! Site layout: where configuration, extensions and staging live.
//!
//! The layout is read from an optional `colorswitch.yaml`. Every key has a
//! default, so an empty file (or no file at all) describes a site rooted at
//! the current directory:
//!
//! ```yaml
//! root: .
//! config_dir: config
//! extension_roots:
//!   - themes
//!   - modules
//! staging_dir: .colorswitch/temp
//! themes: {}
//! modules: {}
//! ```
//!
//! Relative paths resolve against `root`; a relative `root` resolves against
//! the directory holding the layout file. `themes` and `modules` pin
//! extension names to directories, bypassing info file discovery.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::ConfigStore;
use crate::error::{Result, SwitchError};
use crate::extension::{ExtensionKind, ExtensionList};

/// Default name of the site layout file.
pub const SITE_FILE_NAME: &str = "colorswitch.yaml";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub root: PathBuf,
    pub config_dir: PathBuf,
    pub extension_roots: Vec<PathBuf>,
    pub staging_dir: PathBuf,
    pub themes: BTreeMap<String, PathBuf>,
    pub modules: BTreeMap<String, PathBuf>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            config_dir: PathBuf::from("config"),
            extension_roots: vec![PathBuf::from("themes"), PathBuf::from("modules")],
            staging_dir: PathBuf::from(".colorswitch/temp"),
            themes: BTreeMap::new(),
            modules: BTreeMap::new(),
        }
    }
}

impl SiteConfig {
    /// Parses a layout from YAML. An empty document yields the defaults.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
    }

    /// Loads a layout file, anchoring a relative `root` at the file's
    /// directory.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SwitchError::io("read", path, e))?;
        let mut site = Self::from_yaml(&content).map_err(|source| SwitchError::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;

        if site.root.is_relative() {
            let base = path.parent().unwrap_or_else(|| Path::new(""));
            site.root = base.join(&site.root);
        }
        Ok(site)
    }

    /// Loads `path` if it exists, otherwise returns the defaults.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Replaces the root directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Resolves `path` against the site root.
    pub fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    pub fn config_store(&self) -> ConfigStore {
        ConfigStore::new(self.resolve(&self.config_dir))
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.resolve(&self.staging_dir)
    }

    /// Builds the extension lookup for this site.
    pub fn extension_list(&self) -> ExtensionList {
        let mut list = ExtensionList::new();
        for root in &self.extension_roots {
            list.add_root(self.resolve(root));
        }
        for (name, path) in &self.themes {
            list.set_path(ExtensionKind::Theme, name.clone(), self.resolve(path));
        }
        for (name, path) in &self.modules {
            list.set_path(ExtensionKind::Module, name.clone(), self.resolve(path));
        }
        list
    }
}
