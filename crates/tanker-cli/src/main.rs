//! Tanker CLI - water tanker bookings, fleet and diesel bookkeeping
//!
//! This is the command-line interface for Tanker. It drives the core
//! library's forms, date input engine and JSON storage.

mod app;
mod cli;
mod commands;
mod config;
mod logging;
mod output;
mod ui;

use clap::Parser;

use crate::app::{exit_with_error, resolve_config_path, AppContext};
use crate::cli::Cli;
use crate::config::{load_config, ColorSetting, TankerConfig};
use crate::ui::{UiContext, UiFlags};

fn main() {
    let cli = Cli::parse();

    let config = match resolve_config_path().and_then(|path| load_config(&path)) {
        Ok(config) => config,
        Err(err) => exit_with_error(&fallback_ui(&cli), &err),
    };
    logging::init(
        logging::level_for(cli.verbose, cli.quiet, config.logging.level.as_deref()),
        !cli.no_color && config.ui.color != ColorSetting::Never,
    );

    if let Err(err) = run(&cli, config) {
        exit_with_error(&fallback_ui(&cli), &err);
    }
}

fn run(cli: &Cli, config: TankerConfig) -> anyhow::Result<()> {
    let ctx = AppContext::with_config(cli, config)?;
    if let Err(err) = commands::dispatch(&ctx, &cli.command) {
        exit_with_error(ctx.ui(), &err);
    }
    Ok(())
}

/// Output settings for errors raised before a context exists.
fn fallback_ui(cli: &Cli) -> UiContext {
    UiContext::from_env(
        UiFlags {
            json: cli.json,
            format: cli.format.as_deref(),
            no_color: cli.no_color,
            ascii: cli.ascii,
        },
        ColorSetting::Auto,
    )
}
