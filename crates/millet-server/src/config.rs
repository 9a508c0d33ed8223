use std::fmt::Display;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use tracing::info;

/// Placeholder JWT secrets that must not reach a running server.
const PLACEHOLDER_SECRETS: &[&str] = &[
    "change-me-to-a-random-string",
    "dev-secret-change-me",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub jwt_secret: String,
    pub db_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub notification_limit: u32,
    pub token_ttl_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::load(|key| std::env::var(key).ok())
    }

    fn load(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let jwt_secret = var("MILLET_JWT_SECRET").unwrap_or_default();
        if jwt_secret.is_empty() || PLACEHOLDER_SECRETS.contains(&jwt_secret.as_str()) {
            bail!("MILLET_JWT_SECRET is unset or still a placeholder; set it in your .env file");
        }

        Ok(Self {
            jwt_secret,
            db_path: try_load(&var, "MILLET_DB_PATH", "millet.db")?,
            host: try_load(&var, "MILLET_HOST", "0.0.0.0")?,
            port: try_load(&var, "MILLET_PORT", "3000")?,
            notification_limit: try_load(&var, "MILLET_NOTIFICATION_LIMIT", "5")?,
            token_ttl_days: try_load(&var, "MILLET_TOKEN_TTL_DAYS", "30")?,
        })
    }
}

fn try_load<T>(var: &impl Fn(&str) -> Option<String>, key: &str, default: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    raw.parse()
        .map_err(|e: T::Err| anyhow::anyhow!("{e}"))
        .with_context(|| format!("invalid {key} value '{raw}'"))
}
