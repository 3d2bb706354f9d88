use std::collections::HashMap;

use civitas_core::{Address, ChainEvent, DecodeError, RawLog, SourceKind, TxHash};
use itertools::Itertools;

use crate::{chain::ChainClient, config::SourceConfig};

use super::planner::Window;

/// One decoded log entry, carrying enough chain context to archive and
/// mutate without further RPC calls.
#[derive(Debug, Clone)]
pub struct DecodedRecord {
    pub source: Address,
    pub kind: SourceKind,
    pub block: u64,
    pub log_index: u64,
    pub txid: TxHash,
    pub blocktime: i64,
    pub event: ChainEvent,
}

/// Fetch and decode everything a source emitted inside the window, ordered
/// by (block, log index) so mutations replay in causal order. Each declared
/// event kind is fetched and decoded independently: a kind that fails to
/// decode is logged and dropped for this window without blocking the rest.
pub async fn fetch_window(
    client: &dyn ChainClient,
    source: &SourceConfig,
    window: &Window,
) -> anyhow::Result<Vec<DecodedRecord>> {
    let mut records = Vec::new();
    for schema in source.kind.declared_events() {
        let logs = client
            .get_logs(&source.address, schema.signature, window.from, window.to)
            .await?;
        match decode_kind(source, schema.name, &logs) {
            Ok(mut batch) => records.append(&mut batch),
            Err(err) => tracing::warn!(
                "Dropping {}/{} for window [{}, {}]: {err}",
                source.kind,
                schema.name,
                window.from,
                window.to
            ),
        }
    }
    records.sort_by_key(|r| (r.block, r.log_index));

    // One timestamp lookup per distinct block, not per event.
    let blocks = records.iter().map(|r| r.block).unique().collect_vec();
    let mut times = HashMap::new();
    for block in blocks {
        times.insert(block, client.block_time(block).await?);
    }
    for record in &mut records {
        record.blocktime = times[&record.block];
    }

    Ok(records)
}

fn decode_kind(
    source: &SourceConfig,
    name: &str,
    logs: &[RawLog],
) -> Result<Vec<DecodedRecord>, DecodeError> {
    logs.iter()
        .map(|log| {
            let event = ChainEvent::decode(source.kind, name, log)?;
            Ok(DecodedRecord {
                source: source.address,
                kind: source.kind,
                block: log.block_number()?,
                log_index: log.log_index()?,
                txid: log.txid()?,
                blocktime: 0,
                event,
            })
        })
        .collect()
}
