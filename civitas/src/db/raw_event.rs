use civitas_core::{Address, TxHash};
use sqlx::{sqlite::SqliteRow, Executor, FromRow, Row, Sqlite};

/// A verbatim archived copy of one decoded chain log, written before any
/// domain mutation. Unique per physical log entry.
pub struct RawEvent {
    pub source: Address,
    pub txid: TxHash,
    pub log_index: i64,
    pub block: i64,
    pub kind: String,
    pub args: serde_json::Value,
}

impl FromRow<'_, SqliteRow> for RawEvent {
    fn from_row(row: &'_ SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(RawEvent {
            source: row
                .try_get::<String, _>("source")?
                .parse()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            txid: row
                .try_get::<String, _>("txid")?
                .parse()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            log_index: row.try_get("log_index")?,
            block: row.try_get("block")?,
            kind: row.try_get("kind")?,
            args: serde_json::from_str(row.try_get::<String, _>("args")?.as_str())
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
        })
    }
}

/// Idempotent insert: reprocessing the same log entry keeps the original
/// row untouched.
pub async fn archive(
    conn: impl Executor<'_, Database = Sqlite>,
    raw: &RawEvent,
) -> anyhow::Result<()> {
    sqlx::query(include_str!("./queries/insert_raw_event.sql"))
        .bind(raw.source.to_string())
        .bind(raw.txid.to_string())
        .bind(raw.log_index)
        .bind(raw.block)
        .bind(&raw.kind)
        .bind(raw.args.to_string())
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn mark_processed(
    conn: impl Executor<'_, Database = Sqlite>,
    source: &Address,
    txid: &TxHash,
    log_index: i64,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE raw_events SET processed = 1 WHERE source = ? AND txid = ? AND log_index = ?;")
        .bind(source.to_string())
        .bind(txid.to_string())
        .bind(log_index)
        .execute(conn)
        .await?;
    Ok(())
}
