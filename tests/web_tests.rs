use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use pirania_bot::event_log::{EventLog, MemoryEventLog, SharedLog};
use pirania_bot::web::router;
use reqwest::StatusCode;
use tokio::net::TcpListener;

/// Serve the report for `log` on an ephemeral local port
async fn spawn_app(log: SharedLog) -> Result<SocketAddr> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        let _ = axum::serve(listener, router(log)).await;
    });

    Ok(addr)
}

#[tokio::test]
async fn test_report_page_lists_recorded_events() -> Result<()> {
    let log = Arc::new(MemoryEventLog::new());
    log.append(7, "alice", "cases").await?;
    let addr = spawn_app(log.clone()).await?;

    let resp = reqwest::get(format!("http://{addr}/")).await?;
    assert_eq!(resp.status(), StatusCode::OK);

    let content_type = resp
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let body = resp.text().await?;
    assert!(body.contains("<td>alice</td><td>cases</td><td>1</td>"));

    Ok(())
}

#[tokio::test]
async fn test_report_page_sees_writes_between_requests() -> Result<()> {
    let log = Arc::new(MemoryEventLog::new());
    let addr = spawn_app(log.clone()).await?;

    let body = reqwest::get(format!("http://{addr}/")).await?.text().await?;
    assert!(!body.contains("<td>"));

    log.append(1, "bob", "start").await?;

    let body = reqwest::get(format!("http://{addr}/")).await?.text().await?;
    assert!(body.contains("<td>bob</td><td>start</td><td>1</td>"));

    Ok(())
}

#[tokio::test]
async fn test_only_root_is_served() -> Result<()> {
    let addr = spawn_app(Arc::new(MemoryEventLog::new())).await?;

    let resp = reqwest::get(format!("http://{addr}/stats")).await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    Ok(())
}
