pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod feed;
pub mod http;
pub mod map;
pub mod normalize;
pub mod pagination;
pub mod pipeline;
pub mod rate_limiter;
pub mod season;
pub mod services;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::warn;
use std::io;
use std::path::PathBuf;

use crate::cli::Command;
use crate::config::curated_mocks;
use crate::config::settings::AppConfig;
use crate::map::JsonFileStore;
use crate::season::local_now;
use crate::services::ingestion::IngestionService;
use crate::services::processing::ProcessingService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_serve(port: u16) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let service = ServerService::new(port, config, curated_mocks());
        service.run().await
    })
}

pub fn handle_ingest() -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::from_env();
        let mut service = IngestionService::new(&config)?;
        service.run(local_now()).await
    })
}

pub fn handle_map(output: Option<&PathBuf>) -> Result<()> {
    let config = AppConfig::from_env();
    let service = ProcessingService::new(config, curated_mocks())?;
    let mut store = match output {
        Some(path) => JsonFileStore::new(path),
        None => service.default_store(),
    };
    service.run_map(local_now(), &mut store)?;
    Ok(())
}

pub fn handle_feed() -> Result<()> {
    let config = AppConfig::from_env();
    let service = ProcessingService::new(config, curated_mocks())?;
    service.run_feed(local_now())?;
    Ok(())
}

/// Ingest then regenerate every output. Outputs are rebuilt from the
/// cache when ingestion fails.
pub fn handle_build() -> Result<()> {
    if let Err(e) = handle_ingest() {
        warn!("Ingestion failed, building from cached data: {:#}", e);
    }
    let config = AppConfig::from_env();
    let service = ProcessingService::new(config, curated_mocks())?;
    service.run(local_now())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut io::stdout());
    Ok(())
}
