use civitas_core::Address;
use sqlx::{Executor, Sqlite};

/// Create the member row on first sight, with zeroed aggregates.
pub async fn upsert(
    conn: impl Executor<'_, Database = Sqlite>,
    address: &Address,
    block: i64,
) -> anyhow::Result<()> {
    sqlx::query(
        "INSERT INTO members (address, total_donated, voting_weight, first_seen_block)
        VALUES (?, 0, 0, ?)
        ON CONFLICT(address) DO NOTHING;",
    )
    .bind(address.to_string())
    .bind(block)
    .execute(conn)
    .await?;
    Ok(())
}

/// Recompute the donation aggregate from the donation rows. Summation
/// instead of increment keeps replay and reindex convergent.
pub async fn rederive_total_donated(
    conn: impl Executor<'_, Database = Sqlite>,
    address: &Address,
) -> anyhow::Result<()> {
    sqlx::query(
        "UPDATE members
        SET total_donated = (SELECT COALESCE(SUM(amount), 0) FROM donations WHERE donor = ?)
        WHERE address = ?;",
    )
    .bind(address.to_string())
    .bind(address.to_string())
    .execute(conn)
    .await?;
    Ok(())
}

/// Weight is a snapshot value carried by each reveal event, not an
/// accumulation.
pub async fn set_voting_weight(
    conn: impl Executor<'_, Database = Sqlite>,
    address: &Address,
    weight: f64,
) -> anyhow::Result<()> {
    sqlx::query("UPDATE members SET voting_weight = ? WHERE address = ?;")
        .bind(weight)
        .bind(address.to_string())
        .execute(conn)
        .await?;
    Ok(())
}
