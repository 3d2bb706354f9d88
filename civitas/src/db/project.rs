use civitas_core::Address;
use sqlx::{Executor, Sqlite};

pub async fn insert(
    conn: impl Executor<'_, Database = Sqlite>,
    project_id: i64,
    owner: &Address,
    name: &str,
    funding_target: f64,
    created_block: i64,
) -> anyhow::Result<()> {
    sqlx::query(include_str!("./queries/insert_project.sql"))
        .bind(project_id)
        .bind(owner.to_string())
        .bind(name)
        .bind(funding_target)
        .bind(created_block)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn exists(
    conn: impl Executor<'_, Database = Sqlite>,
    project_id: i64,
) -> anyhow::Result<bool> {
    let row = sqlx::query_as::<_, (i64,)>("SELECT 1 FROM projects WHERE project_id = ?;")
        .bind(project_id)
        .fetch_optional(conn)
        .await?;
    Ok(row.is_some())
}

/// Recompute the allocation aggregate from the allocation rows.
pub async fn rederive_total_allocated(
    conn: impl Executor<'_, Database = Sqlite>,
    project_id: i64,
) -> anyhow::Result<()> {
    sqlx::query(
        "UPDATE projects
        SET total_allocated = (SELECT COALESCE(SUM(amount), 0) FROM allocations WHERE project_id = ?)
        WHERE project_id = ?;",
    )
    .bind(project_id)
    .bind(project_id)
    .execute(conn)
    .await?;
    Ok(())
}
