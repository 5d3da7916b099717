use anyhow::{Context, Result};
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use pirania_bot::bot;
use pirania_bot::config::{Config, LogFormat};
use pirania_bot::db::SqliteEventLog;
use pirania_bot::event_log::SharedLog;
use pirania_bot::web;

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);

    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Text => subscriber.init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    let config = Config::from_env().map_err(anyhow::Error::msg)?;

    init_tracing(&config);

    info!("Starting PIRANIA Telegram Bot");

    let event_log: SharedLog = Arc::new(SqliteEventLog::open(&config.database_path).await?);

    let listener = tokio::net::TcpListener::bind(config.report_addr())
        .await
        .with_context(|| format!("Failed to bind report server to {}", config.report_addr()))?;
    let report_server = tokio::spawn(web::serve(listener, Arc::clone(&event_log)));

    let bot = Bot::new(&config.bot_token);
    bot::register_commands(&bot).await;
    bot::run_dispatcher(bot, event_log).await;

    match report_server.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => error!(error = %e, "Report server failed"),
        Err(e) => error!(error = %e, "Report server task panicked"),
    }

    info!("Shutdown complete");
    Ok(())
}
