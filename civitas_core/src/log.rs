use serde::{Deserialize, Serialize};

use super::{parse_hex_u64, DecodeError, TxHash};

/// A raw log entry as returned by `eth_getLogs`. Numeric fields arrive as
/// hex quantities and are parsed on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawLog {
    pub address: String,
    pub topics: Vec<String>,
    pub data: String,
    #[serde(rename = "blockNumber")]
    pub block_number: String,
    #[serde(rename = "transactionHash")]
    pub tx_hash: String,
    #[serde(rename = "logIndex")]
    pub log_index: String,
    #[serde(default, rename = "blockHash")]
    pub block_hash: Option<String>,
    #[serde(default)]
    pub removed: Option<bool>,
}

impl RawLog {
    pub fn block_number(&self) -> Result<u64, DecodeError> {
        parse_hex_u64(&self.block_number)
    }

    pub fn log_index(&self) -> Result<u64, DecodeError> {
        parse_hex_u64(&self.log_index)
    }

    pub fn txid(&self) -> Result<TxHash, DecodeError> {
        self.tx_hash.parse()
    }

    pub fn topic(&self, index: usize) -> Result<&str, DecodeError> {
        self.topics
            .get(index)
            .map(String::as_str)
            .ok_or(DecodeError::MissingTopic(index))
    }
}
