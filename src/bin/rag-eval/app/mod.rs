mod ask;
mod batch;
mod rag;

use clap::Parser;
use serde::Serialize;

use crate::args::{CliArgs, Command};
use crate::config::load_config;
use crate::logging::init_logging;

pub async fn run() -> anyhow::Result<()> {
    let args = CliArgs::parse();
    let loaded = load_config(args.config.clone())?;
    let _logger = init_logging(&loaded.config.logging, &loaded.paths, args.verbose)?;
    if loaded.config_exists {
        log::info!("Loaded config from {}", loaded.paths.config_file.display());
    }

    match &args.command {
        Command::Batch(batch) => batch::run(&args, batch, &loaded.config).await,
        Command::Ask(ask) => ask::run(&args, ask, &loaded.config).await,
        Command::Rag(rag) => rag::run(&args, rag, &loaded.config).await,
    }
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
