use sqlx::SqlitePool;

pub async fn save(conn: &SqlitePool, evt_type: &str, evt_data: &str) -> anyhow::Result<()> {
    sqlx::query("INSERT INTO scan_log (created_at, type, data) VALUES (unixepoch(), ?, ?);")
        .bind(evt_type)
        .bind(evt_data)
        .execute(conn)
        .await?;
    Ok(())
}

pub async fn last_scan_time(conn: &SqlitePool) -> anyhow::Result<Option<i64>> {
    let row = sqlx::query_as::<_, (i64,)>(
        "SELECT created_at FROM scan_log WHERE type = 'scan' ORDER BY created_at DESC LIMIT 1;",
    )
    .fetch_optional(conn)
    .await?;

    Ok(row.map(|(created_at,)| created_at))
}
