use std::path::PathBuf;

use sqlx::{sqlite, SqlitePool};

use crate::chain::HttpChainClient;

use super::{Cli, ConfigFile, SourceConfig};

#[derive(Clone, Debug)]
pub struct Config {
    pub cli: Cli,
    pub file: ConfigFile,
}

impl Config {
    pub fn new(cli: Cli, file: ConfigFile) -> Self {
        Self { cli, file }
    }

    pub fn chain_client(&self) -> HttpChainClient {
        HttpChainClient::new(self.chain_url())
    }

    pub async fn sqlite(&self) -> anyhow::Result<sqlite::SqlitePool> {
        let db = self.data();

        // SQLx doesn't seem to like it if a db file does not already exist, so let's create an empty one
        if !tokio::fs::try_exists(&db).await? {
            tokio::fs::OpenOptions::new()
                .write(true)
                .create(true)
                .open(&db)
                .await?;
        }

        Ok(SqlitePool::connect(&format!("sqlite:{}", db.to_string_lossy())).await?)
    }

    pub fn chain_url(&self) -> String {
        self.file.chain.url.clone().expect("chain RPC url required")
    }

    pub fn decimals(&self) -> u32 {
        self.file.chain.decimals.unwrap_or(8)
    }

    pub fn sources(&self) -> Vec<SourceConfig> {
        self.file.sources.clone()
    }

    fn data(&self) -> PathBuf {
        self.file.data.clone().unwrap_or_else(|| "civitas.db".into())
    }

    pub fn server_bind(&self) -> Option<String> {
        self.file.server.bind.clone()
    }

    pub fn indexer_delay(&self) -> u64 {
        self.file.server.indexer_delay.unwrap_or(30)
    }

    pub fn max_window(&self) -> u64 {
        self.file.server.max_window.unwrap_or(1000)
    }

    pub fn indexer(&self) -> bool {
        self.file.server.indexer.unwrap_or(true)
    }

    pub fn api(&self) -> bool {
        self.file.server.api.unwrap_or(true)
    }
}
