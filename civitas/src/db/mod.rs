use crate::config::Config;

use sqlx::SqlitePool;

pub mod allocation;
pub mod checkpoint;
pub mod donation;
pub mod member;
pub mod project;
pub mod raw_event;
pub mod round;
pub mod scan_log;
pub mod stats;
pub mod vote;

pub use checkpoint::Checkpoint;
pub use raw_event::RawEvent;

static MIGRATIONS: [&str; 14] = [
    "CREATE TABLE checkpoints (address TEXT PRIMARY KEY, last_processed_block INTEGER NOT NULL, updated_at INTEGER NOT NULL);",
    "CREATE TABLE raw_events (id INTEGER PRIMARY KEY, source, txid, log_index, block, kind, args, indexed_at, processed);",
    "CREATE UNIQUE INDEX raw_events_unique_idx ON raw_events (source, txid, log_index);",
    "CREATE TABLE members (address TEXT PRIMARY KEY, total_donated REAL NOT NULL, voting_weight REAL NOT NULL, first_seen_block);",
    "CREATE TABLE donations (receipt TEXT PRIMARY KEY, donor, amount REAL, block, blocktime, txid);",
    "CREATE TABLE allocations (id INTEGER PRIMARY KEY, project_id, receipt, amount REAL, block, txid, log_index);",
    "CREATE UNIQUE INDEX allocations_event_idx ON allocations (txid, log_index);",
    "CREATE TABLE projects (project_id INTEGER PRIMARY KEY, owner, name, funding_target REAL, total_allocated REAL NOT NULL, created_block);",
    "CREATE TABLE voting_rounds (round INTEGER PRIMARY KEY, snapshot_block, commit_end, reveal_end, created_block);",
    "CREATE TABLE votes (round, voter, project_id, choice, weight REAL, block, txid);",
    "CREATE UNIQUE INDEX votes_unique_idx ON votes (round, voter, project_id);",
    "CREATE TABLE scan_log (id INTEGER PRIMARY KEY, created_at, type, data);",
    "CREATE INDEX donations_donor_idx ON donations (donor);",
    "CREATE INDEX allocations_project_idx ON allocations (project_id);",
];

pub async fn initialize(config: &Config) -> anyhow::Result<SqlitePool> {
    let conn = config.sqlite().await?;
    migrate(&conn).await?;
    Ok(conn)
}

pub async fn migrate(conn: &SqlitePool) -> anyhow::Result<()> {
    sqlx::query("CREATE TABLE IF NOT EXISTS schema (version);")
        .execute(conn)
        .await?;

    let (version,) =
        sqlx::query_as::<_, (i64,)>("SELECT COALESCE(MAX(version) + 1, 0) FROM schema;")
            .fetch_one(conn)
            .await?;

    for (idx, migration) in MIGRATIONS[version as usize..].iter().enumerate() {
        let version = idx as i64 + version;
        let mut tx = conn.begin().await?;
        tracing::debug!("Migrations schema version {version}");
        sqlx::query(migration).execute(&mut tx).await?;
        sqlx::query("INSERT INTO schema (version) VALUES (?);")
            .bind(version)
            .execute(&mut tx)
            .await?;
        tx.commit().await?;
    }

    Ok(())
}

// A pooled :memory: database gives every pooled connection its own empty
// database, so tests pin the pool to a single long-lived connection.
#[cfg(test)]
pub(crate) async fn test_pool() -> SqlitePool {
    let conn = sqlx::sqlite::SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("in-memory pool");
    migrate(&conn).await.expect("migrations");
    conn
}
