use std::path::PathBuf;

use anyhow::{Context, Result};
use resumatch_core::TopK;

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// When set, candidates and jobs are persisted in PostgreSQL instead of memory.
    pub database_url: Option<String>,
    /// Optional skill vocabulary CSV overriding the embedded one.
    pub skills_path: Option<PathBuf>,
    pub port: u16,
    pub rust_log: String,
    /// Result count for recommendation requests that omit `k`.
    pub default_top_k: TopK,
    pub max_bulk_files: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            database_url: optional_env("DATABASE_URL"),
            skills_path: optional_env("SKILLS_PATH").map(PathBuf::from),
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            default_top_k: parse_top_k("DEFAULT_TOP_K", TopK::new(5))?,
            max_bulk_files: parse_env("MAX_BULK_FILES", 100)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 50 * 1024 * 1024)?,
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            database_url: None,
            skills_path: None,
            port: 8080,
            rust_log: "info".to_string(),
            default_top_k: TopK::new(5),
            max_bulk_files: 100,
            max_upload_bytes: 50 * 1024 * 1024,
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        None => Ok(default),
    }
}

fn parse_top_k(key: &str, default: TopK) -> Result<TopK> {
    let raw = parse_env(key, i64::from(default))?;
    TopK::try_from(raw)
        .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}"))
}
