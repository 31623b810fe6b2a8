//! Command line definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use colorswitch::{
    PipelineSettings, SiteConfig, DEFAULT_CONFIG_FILE, DEFAULT_CSS_PATH, DEFAULT_MODULE_TARGET,
    SITE_FILE_NAME,
};

#[derive(Debug, Parser)]
#[command(name = "colorswitch")]
#[command(version)]
#[command(about = "Switch the colours of a theme's stylesheets into a target module")]
#[command(long_about = None)]
pub struct Cli {
    /// Site layout file
    #[arg(short, long, global = true, default_value = SITE_FILE_NAME, value_name = "FILE")]
    pub site: PathBuf,

    /// Site root directory (overrides the layout file)
    #[arg(short, long, global = true, value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Log level
    #[arg(short = 'v', long, global = true, default_value = "warn")]
    pub log_level: String,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputMode::Text)]
    pub output: OutputMode,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputMode {
    /// Styled, human readable text
    #[default]
    Text,
    /// Serialize the result as JSON
    Json,
    /// Serialize the result as YAML
    Yaml,
}

impl OutputMode {
    pub fn is_structured(&self) -> bool {
        matches!(self, OutputMode::Json | OutputMode::Yaml)
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Stage, switch and publish the theme's stylesheets
    Switch(SwitchArgs),
    /// List the stylesheets the theme exposes
    List(ConfigArgs),
    /// Validate the colour mapping of a configuration
    Check(ConfigArgs),
}

#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Configuration object id
    #[arg(short, long, default_value = DEFAULT_CONFIG_FILE)]
    pub config_file: String,
}

#[derive(Debug, Args)]
pub struct SwitchArgs {
    /// Module receiving the switched stylesheets
    #[arg(short, long, default_value = DEFAULT_MODULE_TARGET)]
    pub module_target: String,

    /// Folder inside the target module, surrounded by slashes
    #[arg(long, default_value = DEFAULT_CSS_PATH)]
    pub css_path: String,

    #[command(flatten)]
    pub config: ConfigArgs,
}

impl SwitchArgs {
    pub fn settings(&self) -> PipelineSettings {
        PipelineSettings::new(
            self.config.config_file.clone(),
            self.module_target.clone(),
            self.css_path.clone(),
        )
    }
}

impl Cli {
    /// Loads the site layout and applies command line overrides.
    pub fn site_config(&self) -> colorswitch::Result<SiteConfig> {
        let site = SiteConfig::load_or_default(&self.site)?;
        Ok(match &self.root {
            Some(root) => site.with_root(root),
            None => site,
        })
    }

    /// Filter directive for the tracing subscriber.
    pub fn log_filter(&self) -> String {
        format!(
            "colorswitch={level},colorswitch_cli={level}",
            level = self.log_level
        )
    }
}
