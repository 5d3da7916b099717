//! # Event Log
//!
//! Append-only record of bot interactions and the storage interface shared by
//! the bot dispatcher and the report server.
//!
//! The interface is an object-safe async trait so that both sides can hold an
//! `Arc<dyn EventLog>`: production code injects [`crate::db::SqliteEventLog`],
//! tests inject [`MemoryEventLog`].

use anyhow::Result;
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// A single stored interaction
#[derive(Debug, Clone, PartialEq)]
pub struct EventRecord {
    pub id: i64,
    pub user_id: i64,
    pub username: String,
    pub event: String,
    pub ts: NaiveDateTime,
}

/// Count and most recent timestamp for one `(username, event)` pair
#[derive(Debug, Clone, PartialEq)]
pub struct AggregateRow {
    pub username: String,
    pub event: String,
    pub count: i64,
    pub last_ts: NaiveDateTime,
}

/// The user behind an interaction, as reported by the transport
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Interactor {
    pub user_id: i64,
    /// Public handle without the leading `@`
    pub handle: Option<String>,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl Interactor {
    pub fn new(
        user_id: i64,
        handle: Option<&str>,
        first_name: &str,
        last_name: Option<&str>,
    ) -> Self {
        Self {
            user_id,
            handle: handle.map(str::to_string),
            first_name: first_name.to_string(),
            last_name: last_name.map(str::to_string),
        }
    }

    /// Name stored in the log for this user
    pub fn display_name(&self) -> String {
        resolve_display_name(
            self.handle.as_deref(),
            &self.first_name,
            self.last_name.as_deref(),
        )
    }
}

impl From<&teloxide::types::User> for Interactor {
    fn from(user: &teloxide::types::User) -> Self {
        Self {
            user_id: user.id.0 as i64,
            handle: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
        }
    }
}

/// Pick the name to store for an interaction.
///
/// A non-empty handle wins. Otherwise the given and family names are joined
/// with a single space and trimmed, which may produce an empty string.
pub fn resolve_display_name(handle: Option<&str>, first_name: &str, last_name: Option<&str>) -> String {
    match handle {
        Some(handle) if !handle.is_empty() => handle.to_string(),
        _ => format!("{} {}", first_name, last_name.unwrap_or("")).trim().to_string(),
    }
}

/// Durable, append-only interaction log
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Persist one event for an already-resolved username and return its id
    async fn append(&self, user_id: i64, username: &str, event: &str) -> Result<i64>;

    /// Current counts and last timestamps grouped by `(username, event)`
    async fn aggregate(&self) -> Result<Vec<AggregateRow>>;

    /// Persist one event for `user`, resolving the stored name first
    async fn record(&self, user: &Interactor, event: &str) -> Result<i64> {
        let username = user.display_name();
        self.append(user.user_id, &username, event).await
    }
}

/// Handle to the log shared by the dispatcher and the report server
pub type SharedLog = Arc<dyn EventLog>;

/// In-memory [`EventLog`] used by tests and by callers that need no durability
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    records: Mutex<Vec<EventRecord>>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of every stored record in insertion order
    pub async fn records(&self) -> Vec<EventRecord> {
        self.records.lock().await.clone()
    }
}

#[async_trait]
impl EventLog for MemoryEventLog {
    async fn append(&self, user_id: i64, username: &str, event: &str) -> Result<i64> {
        let mut records = self.records.lock().await;

        let id = records.last().map_or(1, |last| last.id + 1);
        let now = Utc::now().naive_utc();
        // The wall clock may step backwards; stored timestamps may not.
        let ts = match records.last() {
            Some(last) if last.ts > now => last.ts,
            _ => now,
        };

        records.push(EventRecord {
            id,
            user_id,
            username: username.to_string(),
            event: event.to_string(),
            ts,
        });

        Ok(id)
    }

    async fn aggregate(&self) -> Result<Vec<AggregateRow>> {
        let records = self.records.lock().await;

        let mut groups: BTreeMap<(&str, &str), AggregateRow> = BTreeMap::new();
        for record in records.iter() {
            groups
                .entry((record.username.as_str(), record.event.as_str()))
                .and_modify(|row| {
                    row.count += 1;
                    if record.ts > row.last_ts {
                        row.last_ts = record.ts;
                    }
                })
                .or_insert_with(|| AggregateRow {
                    username: record.username.clone(),
                    event: record.event.clone(),
                    count: 1,
                    last_ts: record.ts,
                });
        }

        Ok(groups.into_values().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_prefers_handle() {
        assert_eq!(resolve_display_name(Some("alice"), "Alice", Some("Smith")), "alice");
    }

    #[test]
    fn test_display_name_falls_back_on_empty_handle() {
        assert_eq!(resolve_display_name(Some(""), "Alice", Some("Smith")), "Alice Smith");
        assert_eq!(resolve_display_name(None, "Alice", None), "Alice");
        assert_eq!(resolve_display_name(None, "  Alice ", Some("")), "Alice");
    }

    #[test]
    fn test_display_name_may_be_empty() {
        assert_eq!(resolve_display_name(None, "", None), "");
        assert_eq!(resolve_display_name(None, "", Some("")), "");
    }

    #[tokio::test]
    async fn test_memory_log_assigns_increasing_ids() -> Result<()> {
        let log = MemoryEventLog::new();

        let first = log.append(1, "alice", "start").await?;
        let second = log.append(2, "bob", "start").await?;

        assert_eq!(first, 1);
        assert_eq!(second, 2);

        let records = log.records().await;
        assert!(records[0].ts <= records[1].ts);

        Ok(())
    }

    #[tokio::test]
    async fn test_memory_log_groups_by_username_and_event() -> Result<()> {
        let log = MemoryEventLog::new();

        log.append(1, "alice", "start").await?;
        log.append(1, "alice", "cases").await?;
        log.append(1, "alice", "start").await?;

        let rows = log.aggregate().await?;
        assert_eq!(rows.len(), 2);

        let start = rows.iter().find(|r| r.event == "start").unwrap();
        assert_eq!(start.count, 2);

        let records = log.records().await;
        assert_eq!(start.last_ts, records[2].ts);

        Ok(())
    }
}
