use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Which clipboard the copy routes write to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClipboardBackend {
    /// The OS clipboard of the machine running the service.
    System,
    /// In-process only; for headless hosts.
    Memory,
}

impl FromStr for ClipboardBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "system" => Ok(ClipboardBackend::System),
            "memory" => Ok(ClipboardBackend::Memory),
            other => bail!("CLIPBOARD_BACKEND must be 'system' or 'memory', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub rust_log: String,
    pub clipboard_backend: ClipboardBackend,
    /// Idle time after which a builder or workshop session is dropped.
    pub session_ttl: Duration,
    pub session_sweep_interval: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            clipboard_backend: env_or("CLIPBOARD_BACKEND", "system").parse()?,
            session_ttl: secs("SESSION_TTL_SECS", "3600")?,
            session_sweep_interval: secs("SESSION_SWEEP_SECS", "60")?,
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn secs(key: &str, default: &str) -> Result<Duration> {
    let n = env_or(key, default)
        .parse::<u64>()
        .with_context(|| format!("{key} must be a whole number of seconds"))?;
    if n == 0 {
        bail!("{key} must be greater than zero");
    }
    Ok(Duration::from_secs(n))
}
