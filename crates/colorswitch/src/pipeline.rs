//! The colour switch pipeline.
//!
//! A run goes through four stages, always in this order:
//!
//! 1. **Discovery**: find `.css` files under the theme's style paths
//! 2. **Staging**: copy them into the flat staging directory
//! 3. **Substitution**: swap colours in the staged copies (only when
//!    `switch_colors` is on and the colour mapping is valid and non-empty)
//! 4. **Publication**: copy the modified copies into the target module
//!
//! [`run_pipeline`] is the core and only needs resolved directories.
//! [`Switcher`] adds configuration loading and extension lookup on top.
//!
//! # Example
//!
//! ```rust,ignore
//! use colorswitch::{ConsoleNotifier, LocalFileStore, PipelineSettings, SiteConfig, Switcher};
//!
//! let site = SiteConfig::load_or_default("colorswitch.yaml")?;
//! let switcher = Switcher::from_site(&site, LocalFileStore, ConsoleNotifier);
//! let report = switcher.switch_css(&PipelineSettings::default())?;
//! if let Some(message) = report.message() {
//!     println!("{}", message);
//! }
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::color::ColorMapping;
use crate::config::{ConfigStore, ResolvedConfig};
use crate::discovery::{discover_stylesheets, join_fragment};
use crate::env::{FileStore, Notifier};
use crate::error::Result;
use crate::extension::ExtensionList;
use crate::publication::publish_stylesheets;
use crate::record::StylesheetRecord;
use crate::report::{FileOutcome, SwitchReport};
use crate::settings::PipelineSettings;
use crate::site::SiteConfig;
use crate::staging::stage_stylesheets;
use crate::substitution::{substitute_colors, ColorReplacer};

/// Directories a run works with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PipelinePaths {
    /// Theme directory the style paths are relative to.
    pub theme_base: PathBuf,
    pub staging_dir: PathBuf,
    /// Folder inside the target module receiving published stylesheets.
    pub target_dir: PathBuf,
}

/// Runs discovery, staging, substitution and publication.
///
/// An invalid colour mapping is reported through `notifier` as an error and
/// the run continues without substitution, so nothing gets published. Any
/// other failure outside substitution aborts the run. A successful
/// publication is announced with [`Notifier::status`].
pub fn run_pipeline(
    config: &ResolvedConfig,
    paths: &PipelinePaths,
    fs: &dyn FileStore,
    notifier: &dyn Notifier,
) -> Result<SwitchReport> {
    let mut records = discover_stylesheets(fs, &paths.theme_base, config.style_paths())?;
    info!(
        theme = config.theme_name(),
        count = records.len(),
        "stylesheets discovered"
    );

    stage_stylesheets(fs, &paths.staging_dir, &mut records)?;

    let files = if config.switch_colors_enabled() {
        switch_colors(config, fs, notifier, &mut records)?
    } else {
        debug!("colour switching disabled");
        Vec::new()
    };

    let outcome = publish_stylesheets(fs, &paths.target_dir, &records)?;
    if let Some(message) = outcome.message() {
        notifier.status(message);
    }
    Ok(SwitchReport { outcome, files })
}

fn switch_colors(
    config: &ResolvedConfig,
    fs: &dyn FileStore,
    notifier: &dyn Notifier,
    records: &mut [StylesheetRecord],
) -> Result<Vec<FileOutcome>> {
    let (mapping, error) = ColorMapping::build(&config.colors_mapping_raw());
    if let Some(e) = error {
        let message = e.to_string();
        warn!("{}", message);
        notifier.error(&message);
        return Ok(Vec::new());
    }
    if mapping.is_empty() {
        debug!("empty colour mapping");
        return Ok(Vec::new());
    }

    let replacer = ColorReplacer::new(&mapping)?;
    Ok(substitute_colors(fs, notifier, &replacer, records))
}

/// Loads configuration, resolves extensions and runs the pipeline.
pub struct Switcher<F: FileStore, N: Notifier> {
    configs: ConfigStore,
    extensions: ExtensionList,
    staging_dir: PathBuf,
    fs: F,
    notifier: N,
}

impl<F: FileStore, N: Notifier> Switcher<F, N> {
    pub fn new(
        configs: ConfigStore,
        extensions: ExtensionList,
        staging_dir: impl Into<PathBuf>,
        fs: F,
        notifier: N,
    ) -> Self {
        Self {
            configs,
            extensions,
            staging_dir: staging_dir.into(),
            fs,
            notifier,
        }
    }

    /// Builds a switcher from a site layout.
    pub fn from_site(site: &SiteConfig, fs: F, notifier: N) -> Self {
        Self::new(
            site.config_store(),
            site.extension_list(),
            site.staging_dir(),
            fs,
            notifier,
        )
    }

    pub fn fs(&self) -> &F {
        &self.fs
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn load_config(&self, config_file: &str) -> Result<ResolvedConfig> {
        self.configs.load(config_file)
    }

    /// Resolves the directories for `config` and `settings`.
    ///
    /// # Errors
    ///
    /// Returns [`SwitchError::ExtensionNotFound`](crate::SwitchError::ExtensionNotFound)
    /// if the theme or the target module cannot be located.
    pub fn resolve_paths(
        &self,
        config: &ResolvedConfig,
        settings: &PipelineSettings,
    ) -> Result<PipelinePaths> {
        let theme_base = self.extensions.theme_path(config.theme_name())?;
        let module_dir = self.extensions.module_path(&settings.module_target)?;
        Ok(PipelinePaths {
            theme_base,
            staging_dir: self.staging_dir.clone(),
            target_dir: join_fragment(&module_dir, &settings.css_path),
        })
    }

    /// Runs discovery only.
    pub fn discover(&self, config_file: &str) -> Result<Vec<StylesheetRecord>> {
        let config = self.load_config(config_file)?;
        let theme_base = self.extensions.theme_path(config.theme_name())?;
        discover_stylesheets(&self.fs, &theme_base, config.style_paths())
    }

    /// Runs the whole pipeline for `settings`.
    ///
    /// Settings are used as given; validate them with
    /// [`PipelineSettings::validate`] beforehand.
    pub fn switch_css(&self, settings: &PipelineSettings) -> Result<SwitchReport> {
        let config = self.load_config(&settings.config_file)?;
        let paths = self.resolve_paths(&config, settings)?;
        debug!(?paths, config_file = %settings.config_file, "starting colour switch");
        run_pipeline(&config, &paths, &self.fs, &self.notifier)
    }
}
