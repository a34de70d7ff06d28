mod analyse;
mod cli;
mod selfplay;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use skippity_core::EngineConfig;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

fn load_engine_config(path: Option<&Path>) -> Result<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    EngineConfig::load_from_json(&json)
        .with_context(|| format!("parsing config {}", path.display()))
}

fn main() -> Result<()> {
    // `log` records from the engine are forwarded to the same subscriber.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();
    let engine_config = Arc::new(load_engine_config(cli.config.as_deref())?);

    match &cli.command {
        Command::Selfplay(args) => selfplay::run(args, engine_config),
        Command::Analyse(args) => analyse::run(args, engine_config),
    }
}
