use std::path::PathBuf;

use civitas_core::{Address, SourceKind};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ServerConfig {
    pub bind: Option<String>,
    pub api: Option<bool>,
    pub indexer: Option<bool>,
    /// Seconds between scan passes. Longer delays trade freshness for
    /// fewer RPC calls.
    pub indexer_delay: Option<u64>,
    /// Largest block range scanned per source per pass. Bounds the size of
    /// one log-fetch request and of one commit.
    pub max_window: Option<u64>,
}
impl ServerConfig {
    fn example() -> ServerConfig {
        ServerConfig {
            bind: Some("0.0.0.0:8080".into()),
            api: Some(true),
            indexer: Some(true),
            indexer_delay: Some(30),
            max_window: Some(1000),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ChainConfig {
    pub url: Option<String>,
    /// Scale between chain integer base units and the domain decimal unit.
    pub decimals: Option<u32>,
}
impl ChainConfig {
    fn example() -> ChainConfig {
        ChainConfig {
            url: Some("http://localhost:8545".into()),
            decimals: Some(8),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SourceConfig {
    pub kind: SourceKind,
    pub address: Address,
    pub starting_block: u64,
}
impl SourceConfig {
    fn example() -> Vec<SourceConfig> {
        vec![
            SourceConfig {
                kind: SourceKind::Fund,
                address: "0x1111111111111111111111111111111111111111"
                    .parse()
                    .expect("example address"),
                starting_block: 0,
            },
            SourceConfig {
                kind: SourceKind::Registry,
                address: "0x2222222222222222222222222222222222222222"
                    .parse()
                    .expect("example address"),
                starting_block: 0,
            },
            SourceConfig {
                kind: SourceKind::Voting,
                address: "0x3333333333333333333333333333333333333333"
                    .parse()
                    .expect("example address"),
                starting_block: 0,
            },
        ]
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct ConfigFile {
    pub data: Option<PathBuf>,
    pub chain: ChainConfig,
    pub server: ServerConfig,
    pub sources: Vec<SourceConfig>,
}

impl ConfigFile {
    pub fn example() -> ConfigFile {
        ConfigFile {
            data: Some("civitas.db".into()),
            chain: ChainConfig::example(),
            server: ServerConfig::example(),
            sources: SourceConfig::example(),
        }
    }
}
