use civitas_core::Address;
use sqlx::{sqlite::SqliteRow, Executor, FromRow, Row, Sqlite, SqlitePool};

/// A source's resumption point: the last block fully reflected in the
/// domain tables.
pub struct Checkpoint {
    pub address: Address,
    pub last_processed_block: i64,
    pub updated_at: i64,
}

impl FromRow<'_, SqliteRow> for Checkpoint {
    fn from_row(row: &'_ SqliteRow) -> Result<Self, sqlx::Error> {
        Ok(Checkpoint {
            address: row
                .try_get::<String, _>("address")?
                .parse()
                .map_err(|e| sqlx::Error::Decode(Box::new(e)))?,
            last_processed_block: row.try_get("last_processed_block")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

pub async fn get(
    conn: impl Executor<'_, Database = Sqlite>,
    address: &Address,
) -> anyhow::Result<Option<i64>> {
    let row = sqlx::query_as::<_, (i64,)>(
        "SELECT last_processed_block FROM checkpoints WHERE address = ?;",
    )
    .bind(address.to_string())
    .fetch_optional(conn)
    .await?;
    Ok(row.map(|(block,)| block))
}

/// Committer-side write: lives in the same transaction as the window's
/// archive rows and domain mutations.
pub async fn advance(
    conn: impl Executor<'_, Database = Sqlite>,
    address: &Address,
    block: i64,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO checkpoints (address, last_processed_block, updated_at)
        VALUES (?, ?, unixepoch())
        ON CONFLICT(address) DO UPDATE
        SET last_processed_block = excluded.last_processed_block, updated_at = excluded.updated_at;",
    )
    .bind(address.to_string())
    .bind(block)
    .execute(conn)
    .await?;
    Ok(())
}

/// Reindex-side write: may move the checkpoint backwards.
pub async fn reset(conn: &SqlitePool, address: &Address, block: i64) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO checkpoints (address, last_processed_block, updated_at)
        VALUES (?, ?, unixepoch())
        ON CONFLICT(address) DO UPDATE
        SET last_processed_block = excluded.last_processed_block, updated_at = excluded.updated_at;",
    )
    .bind(address.to_string())
    .bind(block)
    .execute(conn)
    .await?;
    Ok(())
}

pub async fn all(conn: &SqlitePool) -> anyhow::Result<Vec<Checkpoint>> {
    Ok(
        sqlx::query_as::<_, Checkpoint>("SELECT * FROM checkpoints ORDER BY address;")
            .fetch_all(conn)
            .await?,
    )
}
