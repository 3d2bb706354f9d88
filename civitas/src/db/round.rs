use sqlx::{Executor, Sqlite};

pub async fn insert(
    conn: impl Executor<'_, Database = Sqlite>,
    round: i64,
    snapshot_block: i64,
    commit_end: i64,
    reveal_end: i64,
    created_block: i64,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO voting_rounds (round, snapshot_block, commit_end, reveal_end, created_block)
        VALUES (?, ?, ?, ?, ?)
        ON CONFLICT (round) DO NOTHING;",
    )
    .bind(round)
    .bind(snapshot_block)
    .bind(commit_end)
    .bind(reveal_end)
    .bind(created_block)
    .execute(conn)
    .await?;
    Ok(())
}
