//! Per-invocation settings.
//!
//! Settings name the configuration object to load, the module that receives
//! the switched stylesheets and the folder inside that module. The pipeline
//! trusts them as given; callers are expected to run
//! [`PipelineSettings::validate`] first.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SwitchError};

pub const DEFAULT_MODULE_TARGET: &str = "ewcms_extended";
pub const DEFAULT_CSS_PATH: &str = "/assets/css/switch/";
pub const DEFAULT_CONFIG_FILE: &str = "ewcms_extended.settings";

static MODULE_TARGET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_]+$").expect("module target pattern is valid"));
static CSS_PATH: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/[a-z_/-][^\sA-Z'@]+/$").expect("css path pattern is valid")
});
static CONFIG_FILE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z_.]+$").expect("config file pattern is valid"));

/// Settings supplied by the caller for one run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineSettings {
    /// Id of the configuration object to load.
    pub config_file: String,
    /// Machine name of the module receiving the switched stylesheets.
    pub module_target: String,
    /// Folder inside the target module, surrounded by slashes.
    pub css_path: String,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            config_file: DEFAULT_CONFIG_FILE.to_string(),
            module_target: DEFAULT_MODULE_TARGET.to_string(),
            css_path: DEFAULT_CSS_PATH.to_string(),
        }
    }
}

impl PipelineSettings {
    pub fn new(
        config_file: impl Into<String>,
        module_target: impl Into<String>,
        css_path: impl Into<String>,
    ) -> Self {
        Self {
            config_file: config_file.into(),
            module_target: module_target.into(),
            css_path: css_path.into(),
        }
    }

    /// Checks every setting against its expected format.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::InvalidSetting`] for the first setting that
    /// does not match.
    pub fn validate(&self) -> Result<()> {
        check(
            "module_target",
            &self.module_target,
            &MODULE_TARGET,
            "no digits, uppercase letters or symbols other than underscore",
        )?;
        check(
            "css_path",
            &self.css_path,
            &CSS_PATH,
            "path must be surrounded by slashes, without spaces, uppercase letters, quotes or @",
        )?;
        check(
            "config_file",
            &self.config_file,
            &CONFIG_FILE,
            "no digits, uppercase letters or symbols other than underscore and dot",
        )
    }
}

fn check(field: &'static str, value: &str, pattern: &Regex, reason: &'static str) -> Result<()> {
    if pattern.is_match(value) {
        Ok(())
    } else {
        Err(SwitchError::InvalidSetting {
            field,
            value: value.to_string(),
            reason,
        })
    }
}
