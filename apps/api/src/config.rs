use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// CSV file holding `job_title` / `job_description_text` rows.
    pub corpus_path: String,
    /// Optional JSON question bank keyed by experience level.
    pub question_bank_path: Option<String>,
    /// Default number of roles returned by the matcher.
    pub top_n: usize,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let top_n = parse_env("TOP_N", 3usize)?;
        if top_n == 0 {
            bail!("TOP_N must be at least 1");
        }

        Ok(Config {
            port: parse_env("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            corpus_path: std::env::var("CORPUS_PATH").unwrap_or_else(|_| "dataset.csv".to_string()),
            question_bank_path: std::env::var("QUESTION_BANK_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty()),
            top_n,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024usize)?,
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Configuration used by handler tests; no environment access.
    pub fn for_tests() -> Self {
        Config {
            port: 0,
            rust_log: "debug".to_string(),
            corpus_path: "dataset.csv".to_string(),
            question_bank_path: None,
            top_n: 3,
            max_upload_bytes: 1024 * 1024,
        }
    }
}
