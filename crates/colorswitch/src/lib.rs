//! Theme stylesheet colour switching.
//!
//! `colorswitch` takes the stylesheets of a theme, swaps configured hex
//! colours for their replacements and publishes the files that changed into
//! a target module, leaving the theme's own files untouched.
//!
//! # Quick Start
//!
//! ```ignore
//! use colorswitch::{ConsoleNotifier, LocalFileStore, PipelineSettings, SiteConfig, Switcher};
//!
//! let site = SiteConfig::load_or_default("colorswitch.yaml")?;
//! let switcher = Switcher::from_site(&site, LocalFileStore, ConsoleNotifier);
//!
//! let settings = PipelineSettings::default();
//! settings.validate()?;
//! let report = switcher.switch_css(&settings)?;
//! ```
//!
//! # Architecture
//!
//! A run is a fixed sequence of stages over a list of
//! [`StylesheetRecord`]s:
//!
//! ```text
//! ResolvedConfig ──► discover ──► stage ──► substitute ──► publish ──► SwitchReport
//!                    theme css    staging   staged copies  target module
//! ```
//!
//! All filesystem access goes through the [`FileStore`] trait and all user
//! facing messages through the [`Notifier`] trait.
//!
//! # Colour Mappings
//!
//! ```
//! use colorswitch::{ColorMapping, ColorReplacer};
//!
//! let mapping = ColorMapping::try_build(&[("#fff", "#000"), ("#ffffff", "#000000")]).unwrap();
//! let replacer = ColorReplacer::new(&mapping).unwrap();
//!
//! let (css, count) = replacer.replace("a{color:#ffffff}b{color:#fff}");
//! assert_eq!(css, "a{color:#000000}b{color:#000}");
//! assert_eq!(count, 2);
//! ```
//!
//! # Testing
//!
//! [`env::MockFileStore`] and [`env::MockNotifier`] stand in for the
//! filesystem and the message sink:
//!
//! ```
//! use colorswitch::env::{MockFileStore, MockNotifier};
//!
//! let fs = MockFileStore::new().with_file("/theme/css/a.css", "a{color:#fff}");
//! let notifier = MockNotifier::new();
//! # let _ = (fs, notifier);
//! ```

mod color;
mod config;
mod discovery;
pub mod env;
mod error;
mod extension;
mod pipeline;
mod publication;
mod record;
mod report;
mod settings;
mod site;
mod staging;
mod substitution;

pub use color::{ColorMapping, HexColor};
pub use config::{ColorsMapping, ConfigStore, ResolvedConfig, StylesPaths, CONFIG_EXTENSIONS};
pub use discovery::{discover_stylesheets, join_fragment, STYLESHEET_SUFFIX};
pub use error::{MappingError, Result, SwitchError};
pub use extension::{ExtensionKind, ExtensionList, INFO_SUFFIX};
pub use pipeline::{run_pipeline, PipelinePaths, Switcher};
pub use publication::publish_stylesheets;
pub use record::StylesheetRecord;
pub use report::{FileOutcome, FileStatus, PublishOutcome, SwitchReport, PUBLISHED_MESSAGE};
pub use settings::{
    PipelineSettings, DEFAULT_CONFIG_FILE, DEFAULT_CSS_PATH, DEFAULT_MODULE_TARGET,
};
pub use site::{SiteConfig, SITE_FILE_NAME};
pub use staging::stage_stylesheets;
pub use substitution::{substitute_colors, ColorReplacer};

// Re-export the collaborator traits and their real implementations
pub use env::{ConsoleNotifier, FileStore, LocalFileStore, Notifier, ScannedFile};
