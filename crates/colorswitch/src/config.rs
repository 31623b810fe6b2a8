//! Colour switch configuration objects.
//!
//! A configuration object is a YAML file named after its id inside the
//! configuration directory. For the id `ewcms_extended.settings`:
//!
//! ```text
//! config/
//! └── ewcms_extended.settings.yml
//! ```
//!
//! ```yaml
//! switch_colors: true
//! theme: demo
//! styles_paths:
//!   mapping:
//!     - /css/
//! colors_mapping:
//!   mapping:
//!     "#fff": "#000"
//!     "#123456": "#654321"
//! ```
//!
//! Colour keys must be quoted: an unquoted `#` starts a YAML comment.
//!
//! # Supported Extensions
//!
//! | Priority | Extension |
//! |----------|-----------|
//! | 1 (highest) | `.yml` |
//! | 2 (lowest) | `.yaml` |

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};

use crate::error::{Result, SwitchError};

/// Recognized configuration file extensions in priority order.
pub const CONFIG_EXTENSIONS: &[&str] = &[".yml", ".yaml"];

/// Style path fragments, relative to the theme directory.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StylesPaths {
    #[serde(default)]
    pub mapping: Vec<String>,
}

/// Raw colour pairs, kept in file order and not yet validated.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ColorsMapping {
    #[serde(default)]
    pub mapping: Mapping,
}

/// A loaded configuration object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ResolvedConfig {
    /// Whether colour substitution runs at all.
    #[serde(default)]
    pub switch_colors: bool,
    /// Machine name of the theme whose stylesheets are switched.
    pub theme: String,
    #[serde(default)]
    pub styles_paths: StylesPaths,
    #[serde(default)]
    pub colors_mapping: ColorsMapping,
}

impl ResolvedConfig {
    /// Parses a configuration object from YAML.
    pub fn from_yaml(yaml: &str) -> std::result::Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    pub fn switch_colors_enabled(&self) -> bool {
        self.switch_colors
    }

    pub fn theme_name(&self) -> &str {
        &self.theme
    }

    pub fn style_paths(&self) -> &[String] {
        &self.styles_paths.mapping
    }

    /// The colour pairs in file order, as text.
    ///
    /// Non-string scalars are kept in their textual form so that validation
    /// can name them; they never pass as colours.
    pub fn colors_mapping_raw(&self) -> Vec<(String, String)> {
        self.colors_mapping
            .mapping
            .iter()
            .map(|(key, value)| (scalar_text(key), scalar_text(value)))
            .collect()
    }
}

fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => serde_yaml::to_string(other)
            .map(|s| s.trim_end().to_string())
            .unwrap_or_default(),
    }
}

/// Directory of configuration objects addressed by id.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    dir: PathBuf,
}

impl ConfigStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The file backing `id`, honouring extension priority.
    pub fn path_for(&self, id: &str) -> Option<PathBuf> {
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| self.dir.join(format!("{}{}", id, ext)))
            .find(|path| path.is_file())
    }

    /// Loads and parses the configuration object `id`.
    ///
    /// # Errors
    ///
    /// - [`SwitchError::ConfigNotFound`] if no file exists for `id`
    /// - [`SwitchError::ConfigParse`] if the file is not a valid object
    /// - [`SwitchError::Io`] if the file cannot be read
    pub fn load(&self, id: &str) -> Result<ResolvedConfig> {
        let path = self
            .path_for(id)
            .ok_or_else(|| SwitchError::ConfigNotFound {
                id: id.to_string(),
                dir: self.dir.clone(),
            })?;

        let content = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => SwitchError::ConfigNotFound {
                id: id.to_string(),
                dir: self.dir.clone(),
            },
            _ => SwitchError::io("read", &path, e),
        })?;

        ResolvedConfig::from_yaml(&content)
            .map_err(|source| SwitchError::ConfigParse { path, source })
    }
}
