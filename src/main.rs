use std::io::Write;

use anyhow::Context;
use bicho_capiba_lib::bootstrap::{self, ConfigSource};
use bicho_capiba_lib::cli::Cli;
use clap::Parser;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let source = match cli.config {
        Some(path) => ConfigSource::Explicit(path),
        None => bootstrap::resolve_config_source(),
    };
    let config = bootstrap::load_from_source(source)?;

    bootstrap::tracing::init_tracing_subscriber(&config.logging)
        .context("Failed to initialize tracing")?;

    let app = bootstrap::build_app(&config)?;

    let mut stdout = std::io::stdout().lock();
    bootstrap::run_command(&app, cli.command, &mut stdout).await?;
    stdout.flush().context("flush stdout")?;
    Ok(())
}
