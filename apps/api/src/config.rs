use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::models::student::MAX_SCORE;
use crate::skills::gap::DEFAULT_STRONG_THRESHOLD;

/// Application configuration loaded from environment variables.
/// Every variable has a default; invalid values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_path: PathBuf,
    pub host: String,
    pub port: u16,
    pub strong_threshold: u8,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let env_or = |key: &str, default: &str| var(key).unwrap_or_else(|| default.to_string());

        Ok(Config {
            data_path: PathBuf::from(env_or("DATA_PATH", "data/studies_career.csv")),
            host: env_or("HOST", "127.0.0.1"),
            port: env_or("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            strong_threshold: parse_threshold(&env_or(
                "STRONG_SUBJECT_THRESHOLD",
                &DEFAULT_STRONG_THRESHOLD.to_string(),
            ))
            .context("STRONG_SUBJECT_THRESHOLD is invalid")?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

/// Parses a strong-subject threshold in `0..=100`.
pub fn parse_threshold(raw: &str) -> Result<u8> {
    let value: u8 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a whole number"))?;
    if value > MAX_SCORE {
        bail!("threshold {value} is above {MAX_SCORE}");
    }
    Ok(value)
}
