//! Report HTTP surface: a single `GET /` page with the interaction statistics.

use anyhow::Result;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::signal;

use crate::error::AppError;
use crate::event_log::SharedLog;
use crate::report;

pub fn router(log: SharedLog) -> Router {
    Router::new().route("/", get(report_page)).with_state(log)
}

async fn report_page(State(log): State<SharedLog>) -> Result<Html<String>, AppError> {
    let html = report::render(log.as_ref()).await?;
    Ok(Html(html))
}

/// Serve the report on `listener` until ctrl-c or SIGTERM
pub async fn serve(listener: TcpListener, log: SharedLog) -> Result<()> {
    if let Ok(addr) = listener.local_addr() {
        tracing::info!("Report server listening on {addr}");
    }

    axum::serve(listener, router(log))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Report server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, stopping report server");
}
