use civitas_core::{Address, Receipt, TxHash};
use sqlx::{Executor, Sqlite};

/// Donations are immutable once inserted; a replayed event is a no-op.
pub async fn insert(
    conn: impl Executor<'_, Database = Sqlite>,
    receipt: &Receipt,
    donor: &Address,
    amount: f64,
    block: i64,
    blocktime: i64,
    txid: &TxHash,
) -> anyhow::Result<()> {
    sqlx::query(include_str!("./queries/insert_donation.sql"))
        .bind(receipt.to_string())
        .bind(donor.to_string())
        .bind(amount)
        .bind(block)
        .bind(blocktime)
        .bind(txid.to_string())
        .execute(conn)
        .await?;
    Ok(())
}
