use anyhow::{bail, Result};
use clap::Parser;
use colorswitch::{ColorMapping, ConsoleNotifier, LocalFileStore, Switcher};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod output;

use cli::{Cli, Command, OutputMode};
use output::CheckSummary;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so structured output stays parseable
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_filter().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let site = cli.site_config()?;
    info!(root = %site.root.display(), "site layout loaded");
    let switcher = Switcher::from_site(&site, LocalFileStore, ConsoleNotifier);

    match &cli.command {
        Command::Switch(args) => {
            let settings = args.settings();
            settings.validate()?;
            let report = switcher.switch_css(&settings)?;
            emit(cli.output, &report, output::render_report)
        }
        Command::List(args) => {
            let records = switcher.discover(&args.config_file)?;
            emit(cli.output, &records, |records| {
                output::render_stylesheets(records)
            })
        }
        Command::Check(args) => {
            let config = switcher.load_config(&args.config_file)?;
            let mapping = match ColorMapping::try_build(&config.colors_mapping_raw()) {
                Ok(mapping) => mapping,
                Err(e) => bail!("{}: {}", args.config_file, e),
            };
            let summary = CheckSummary {
                config_file: &args.config_file,
                theme: config.theme_name(),
                switch_colors: config.switch_colors_enabled(),
                mapping: &mapping,
            };
            emit(cli.output, &summary, output::render_check)
        }
    }
}

fn emit<T: Serialize>(mode: OutputMode, data: &T, render: impl Fn(&T) -> String) -> Result<()> {
    let text = if mode.is_structured() {
        output::serialize_structured(data, mode)?
    } else {
        render(data)
    };
    println!("{}", text.trim_end());
    Ok(())
}
