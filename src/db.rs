use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::event_log::{AggregateRow, EventLog};

/// Format SQLite's `CURRENT_TIMESTAMP` writes
const SQLITE_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Initialize the database schema
pub async fn init_database_schema(pool: &SqlitePool) -> Result<()> {
    info!("Initializing database schema...");

    sqlx::query(
        "CREATE TABLE IF NOT EXISTS events (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            user_id INTEGER,
            username TEXT,
            event TEXT,
            ts DATETIME DEFAULT CURRENT_TIMESTAMP
        )",
    )
    .execute(pool)
    .await
    .context("Failed to create events table")?;

    info!("Database schema initialized successfully");
    Ok(())
}

/// Parse a timestamp as stored by SQLite
pub fn parse_timestamp(raw: &str) -> Result<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw, SQLITE_TIMESTAMP_FORMAT)
        .with_context(|| format!("Invalid timestamp in events table: {raw}"))
}

#[derive(Debug, sqlx::FromRow)]
struct AggregateRecord {
    username: String,
    event: String,
    count: i64,
    last_ts: String,
}

impl TryFrom<AggregateRecord> for AggregateRow {
    type Error = anyhow::Error;

    fn try_from(record: AggregateRecord) -> Result<Self> {
        Ok(AggregateRow {
            last_ts: parse_timestamp(&record.last_ts)?,
            username: record.username,
            event: record.event,
            count: record.count,
        })
    }
}

/// [`EventLog`] backed by a local SQLite file
#[derive(Debug, Clone)]
pub struct SqliteEventLog {
    pool: SqlitePool,
}

impl SqliteEventLog {
    /// Open (creating if missing) the database at `path` and apply the schema
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        info!(path = %path.display(), "Opening event log database");

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await
            .with_context(|| format!("Failed to open database at {}", path.display()))?;

        init_database_schema(&pool).await?;

        Ok(Self { pool })
    }

    /// Wrap a pool whose schema is already initialized
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl EventLog for SqliteEventLog {
    async fn append(&self, user_id: i64, username: &str, event: &str) -> Result<i64> {
        let id = sqlx::query("INSERT INTO events (user_id, username, event) VALUES (?1, ?2, ?3)")
            .bind(user_id)
            .bind(username)
            .bind(event)
            .execute(&self.pool)
            .await
            .context("Failed to insert event")?
            .last_insert_rowid();

        debug!(user_id, event, id, "Event recorded");
        Ok(id)
    }

    async fn aggregate(&self) -> Result<Vec<AggregateRow>> {
        let records = sqlx::query_as::<_, AggregateRecord>(
            "SELECT username, event, COUNT(*) AS count, MAX(ts) AS last_ts
             FROM events
             GROUP BY username, event
             ORDER BY username, event",
        )
        .fetch_all(&self.pool)
        .await
        .context("Failed to aggregate events")?;

        records.into_iter().map(AggregateRow::try_from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timestamp_current_timestamp_format() -> Result<()> {
        let ts = parse_timestamp("2024-05-01 09:30:15")?;
        assert_eq!(ts.format("%Y-%m-%d %H:%M:%S").to_string(), "2024-05-01 09:30:15");
        Ok(())
    }

    #[test]
    fn test_parse_timestamp_with_fraction() -> Result<()> {
        let ts = parse_timestamp("2024-05-01 09:30:15.250")?;
        assert_eq!(ts.format("%H:%M:%S%.3f").to_string(), "09:30:15.250");
        Ok(())
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_err());
    }
}
