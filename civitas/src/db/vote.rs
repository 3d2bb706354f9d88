use civitas_core::{Address, TxHash};
use sqlx::{Executor, Sqlite};

/// One row per (round, voter, project); a reveal replayed through reindex
/// keeps the original row.
pub async fn insert(
    conn: impl Executor<'_, Database = Sqlite>,
    round: i64,
    voter: &Address,
    project_id: i64,
    choice: u8,
    weight: f64,
    block: i64,
    txid: &TxHash,
) -> anyhow::Result<()> {
    sqlx::query(include_str!("./queries/insert_vote.sql"))
        .bind(round)
        .bind(voter.to_string())
        .bind(project_id)
        .bind(i64::from(choice))
        .bind(weight)
        .bind(block)
        .bind(txid.to_string())
        .execute(conn)
        .await?;
    Ok(())
}
