//! `maildex` - maildir indexer
//!
//! Lists maildir folders and messages as one line each, in formats the user
//! defines with `#{...}` placeholders.

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod cli;
mod commands;
mod settings;

use std::process::ExitCode;

use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cli::{Cli, Commands};
use settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "maildex=debug,maildex_core=debug"
    } else {
        "maildex=warn,maildex_core=error"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings_path = cli.config.unwrap_or_else(Settings::default_path);
    let mut settings = Settings::load(&settings_path)?;
    if let Some(prefix) = cli.prefix {
        settings.prefix = prefix;
    }
    debug!(prefix = %settings.prefix.display(), "Starting maildex");

    match cli.command {
        Commands::Maildirs {
            short,
            unread,
            format,
        } => commands::maildirs(&settings, short, unread, format),
        Commands::Messages {
            format,
            arrival_order,
            folders,
        } => commands::messages(&settings, format, arrival_order, &folders),
        Commands::Message {
            template,
            dump_template,
            files,
        } => commands::message(&settings, template.as_deref(), dump_template, &files),
    }
}
