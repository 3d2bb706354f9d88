use civitas_core::{Receipt, TxHash};
use sqlx::{Executor, Sqlite};

/// Keyed by the originating log entry so a replayed window cannot insert
/// the same allocation twice.
pub async fn insert(
    conn: impl Executor<'_, Database = Sqlite>,
    project_id: i64,
    receipt: &Receipt,
    amount: f64,
    block: i64,
    txid: &TxHash,
    log_index: i64,
) -> anyhow::Result<()> {
    sqlx::query(include_str!("./queries/insert_allocation.sql"))
        .bind(project_id)
        .bind(receipt.to_string())
        .bind(amount)
        .bind(block)
        .bind(txid.to_string())
        .bind(log_index)
        .execute(conn)
        .await?;
    Ok(())
}
