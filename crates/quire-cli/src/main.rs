//! Quire CLI
//!
//! Turns the tabs of a Google Doc into ArchieML records.

#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::Parser;

use quire_cli::cli::{Cli, Command};
use quire_cli::commands::{cmd_convert, cmd_fetch};
use quire_cli::config::QuireConfig;
use quire_cli::config_handlers::handle_config_command;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_filter = if cli.verbose {
        "info,quire=debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .init();

    let cwd = std::env::current_dir().context("Cannot determine working directory")?;
    let config_path = cli.config.as_deref();

    match cli.command {
        Command::Fetch(args) => {
            let mut config = QuireConfig::load(config_path, &cwd)?;
            args.apply(&mut config);
            config.fill_document_id_from_package(&cwd);

            let summary = cmd_fetch(&config, args.output.keep_going).await?;
            if summary.failed > 0 {
                tracing::warn!(failed = summary.failed, "Some tabs were skipped");
            }
        }
        Command::Convert(args) => {
            let mut config = QuireConfig::load(config_path, &cwd)?;
            args.output.apply(&mut config);

            let summary = cmd_convert(&config, &args.input, args.output.keep_going).await?;
            if summary.failed > 0 {
                tracing::warn!(failed = summary.failed, "Some tabs were skipped");
            }
        }
        Command::Config { action } => handle_config_command(config_path, &cwd, action)?,
    }

    Ok(())
}
