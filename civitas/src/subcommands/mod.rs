mod server;

pub use server::*;

use std::sync::Arc;

use civitas_core::Address;
use sqlx::SqlitePool;

use crate::{
    config::{Config, ConfigFile},
    indexer::Indexer,
};

pub(crate) fn init() -> anyhow::Result<()> {
    let config_file = ConfigFile::example();
    let cfg = toml::to_string(&config_file)?;
    println!("{cfg} ");
    Ok(())
}

pub(crate) async fn index(config: &Config, pool: &SqlitePool) -> anyhow::Result<()> {
    let client = Arc::new(config.chain_client());
    let indexer = Indexer::new(config.clone(), pool.clone(), client);

    let outcomes = indexer.run_once().await?;
    for outcome in outcomes {
        match outcome.window {
            Some(window) => tracing::info!(
                "Source {}: scanned [{}, {}], {} events",
                outcome.source,
                window.from,
                window.to,
                outcome.events
            ),
            None => tracing::info!("Source {}: nothing to do", outcome.source),
        }
    }
    tracing::info!("Scan pass complete.");
    Ok(())
}

pub(crate) async fn reindex(
    config: &Config,
    pool: &SqlitePool,
    source: Option<Address>,
    block: Option<i64>,
) -> anyhow::Result<()> {
    tracing::info!("Resetting checkpoints to force re-derivation.");
    crate::indexer::reindex(config, pool, source, block).await?;
    Ok(())
}

pub(crate) fn version() {
    let version = env!("CARGO_PKG_VERSION");
    println!("Current version is {version}");
}
