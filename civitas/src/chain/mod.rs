use std::time::Duration;

use anyhow::{anyhow, bail};
use async_trait::async_trait;
use civitas_core::{event_topic, parse_hex_u64, Address, RawLog};
use serde_json::{json, Value};

/// The node-facing surface the indexer consumes. One `get_logs` call per
/// (source, event kind) per window; block timestamps per window, not per
/// event.
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Latest block number the node reports.
    async fn current_height(&self) -> anyhow::Result<u64>;

    /// All logs emitted by `address` matching `signature` in the closed
    /// range [from, to].
    async fn get_logs(
        &self,
        address: &Address,
        signature: &str,
        from: u64,
        to: u64,
    ) -> anyhow::Result<Vec<RawLog>>;

    /// Unix timestamp of block `number`.
    async fn block_time(&self, number: u64) -> anyhow::Result<i64>;
}

/// JSON-RPC over HTTP client.
pub struct HttpChainClient {
    url: String,
    http: reqwest::Client,
}

impl HttpChainClient {
    pub fn new(url: impl Into<String>) -> HttpChainClient {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("failed to build reqwest client");

        HttpChainClient {
            url: url.into(),
            http,
        }
    }

    async fn rpc(&self, method: &str, params: Value) -> anyhow::Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });

        let resp: Value = self
            .http
            .post(&self.url)
            .json(&body)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        if let Some(err) = resp.get("error") {
            if !err.is_null() {
                bail!("rpc {method} failed: {err}");
            }
        }

        Ok(resp.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl ChainClient for HttpChainClient {
    async fn current_height(&self) -> anyhow::Result<u64> {
        let result = self.rpc("eth_blockNumber", json!([])).await?;
        let height = result
            .as_str()
            .ok_or_else(|| anyhow!("eth_blockNumber: expected hex quantity"))?;
        Ok(parse_hex_u64(height)?)
    }

    async fn get_logs(
        &self,
        address: &Address,
        signature: &str,
        from: u64,
        to: u64,
    ) -> anyhow::Result<Vec<RawLog>> {
        let filter = json!({
            "address": address.to_string(),
            "topics": [event_topic(signature)],
            "fromBlock": format!("0x{from:x}"),
            "toBlock": format!("0x{to:x}"),
        });
        let result = self.rpc("eth_getLogs", json!([filter])).await?;
        Ok(serde_json::from_value(result)?)
    }

    async fn block_time(&self, number: u64) -> anyhow::Result<i64> {
        let result = self
            .rpc(
                "eth_getBlockByNumber",
                json!([format!("0x{number:x}"), false]),
            )
            .await?;
        let timestamp = result
            .get("timestamp")
            .and_then(Value::as_str)
            .ok_or_else(|| anyhow!("block {number} missing timestamp"))?;
        Ok(parse_hex_u64(timestamp)? as i64)
    }
}
