//! # Report Renderer
//!
//! Turns the current event aggregate into the HTML statistics page.
//! Stored timestamps are UTC; the page shows Moscow time.

use anyhow::{Context, Result};
use askama::Template;
use chrono::{Duration, NaiveDateTime};

use crate::event_log::{AggregateRow, EventLog};

/// Moscow is UTC+3 all year round
pub const MOSCOW_UTC_OFFSET_SECS: i64 = 3 * 60 * 60;

/// Timestamp layout used on the report page
pub const DISPLAY_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    rows: Vec<ReportRow>,
}

struct ReportRow {
    username: String,
    event: String,
    count: i64,
    last_seen: String,
}

/// Shift a stored UTC timestamp to Moscow wall-clock time
pub fn to_moscow_time(ts: NaiveDateTime) -> NaiveDateTime {
    ts + Duration::seconds(MOSCOW_UTC_OFFSET_SECS)
}

/// Format a stored UTC timestamp for display in Moscow time
pub fn format_timestamp(ts: NaiveDateTime) -> String {
    to_moscow_time(ts).format(DISPLAY_TIMESTAMP_FORMAT).to_string()
}

/// Render aggregate rows as a complete HTML document
pub fn render_rows(rows: &[AggregateRow]) -> Result<String> {
    let template = ReportTemplate {
        rows: rows
            .iter()
            .map(|row| ReportRow {
                username: row.username.clone(),
                event: row.event.clone(),
                count: row.count,
                last_seen: format_timestamp(row.last_ts),
            })
            .collect(),
    };

    template.render().context("Failed to render report template")
}

/// Render the report from the current state of `log`
pub async fn render(log: &dyn EventLog) -> Result<String> {
    let rows = log.aggregate().await?;
    render_rows(&rows)
}
