use sqlx::SqlitePool;

pub async fn members(conn: &SqlitePool) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT count(*) FROM members;")
        .fetch_one(conn)
        .await?;
    Ok(count)
}

pub async fn projects(conn: &SqlitePool) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT count(*) FROM projects;")
        .fetch_one(conn)
        .await?;
    Ok(count)
}

pub async fn donation_total(conn: &SqlitePool) -> anyhow::Result<f64> {
    let (total,) =
        sqlx::query_as::<_, (f64,)>("SELECT COALESCE(SUM(amount), 0.0) FROM donations;")
            .fetch_one(conn)
            .await?;
    Ok(total)
}

pub async fn archived_events(conn: &SqlitePool) -> anyhow::Result<i64> {
    let (count,) = sqlx::query_as::<_, (i64,)>("SELECT count(*) FROM raw_events;")
        .fetch_one(conn)
        .await?;
    Ok(count)
}
