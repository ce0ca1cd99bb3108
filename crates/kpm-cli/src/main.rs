//! kpm - console reporter playground

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use kpm_cli::cmd;
use kpm_cli::{Cli, Commands};
use kpm_console::{ConsoleConfig, ConsoleReporter};

fn main() -> Result<()> {
    // Logs go to stderr so they never mix with reporter output on stdout
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let config = ConsoleConfig::discover(cli.config.as_deref())
        .context("Failed to load console config")?;
    tracing::debug!(?config, "loaded config");
    let reporter = ConsoleReporter::new(config);

    match cli.command {
        Commands::Log { message } => {
            cmd::log::log(&reporter, &message);
            Ok(())
        }
        Commands::Spin { seconds, text } => {
            cmd::spin::spin(&reporter, seconds, &text);
            Ok(())
        }
        Commands::Progress { total, delay_ms } => {
            cmd::progress::progress(&reporter, total, delay_ms);
            Ok(())
        }
        Commands::Select {
            header,
            question,
            options,
        } => cmd::select::select(&reporter, &header, &question, &options),
    }
}
