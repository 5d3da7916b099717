use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub bot_token: String,
    pub database_path: PathBuf,
    pub report_host: IpAddr,
    pub report_port: u16,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, String> {
        let env_required = |key: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| format!("Missing required environment variable: {key}"))
        };
        let env_or = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let bot_token = env_required("TELEGRAM_BOT_TOKEN")?;

        let database_path = PathBuf::from(env_or("DATABASE_PATH", "analytics.db"));

        let report_host: IpAddr = env_or("REPORT_HOST", "0.0.0.0")
            .parse()
            .map_err(|e| format!("Invalid REPORT_HOST: {e}"))?;

        let report_port: u16 = env_or("REPORT_PORT", "5000")
            .parse()
            .map_err(|e| format!("Invalid REPORT_PORT: {e}"))?;

        let log_level = env_or("LOG_LEVEL", "info");

        let log_format = match env_or("LOG_FORMAT", "text").as_str() {
            "text" => LogFormat::Text,
            "json" => LogFormat::Json,
            other => return Err(format!("Invalid LOG_FORMAT: {other} (expected text or json)")),
        };

        Ok(Config {
            bot_token,
            database_path,
            report_host,
            report_port,
            log_level,
            log_format,
        })
    }

    pub fn report_addr(&self) -> SocketAddr {
        SocketAddr::new(self.report_host, self.report_port)
    }
}
