use std::str::FromStr;

use anyhow::{Context, Result};

use crate::layout::LayoutConfig;

/// Application configuration loaded from environment variables.
/// Every variable is optional; layout tuning falls back to `LayoutConfig::default()`.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub layout: LayoutConfig,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = LayoutConfig::default();
        let layout = LayoutConfig {
            max_attempts: env_or("LAYOUT_MAX_ATTEMPTS", defaults.max_attempts)?,
            grid_rows: env_or("LAYOUT_GRID_ROWS", defaults.grid_rows)?,
            grid_cols: env_or("LAYOUT_GRID_COLS", defaults.grid_cols)?,
            grid_bias: env_or("LAYOUT_GRID_BIAS", defaults.grid_bias)?,
            allow_title_overlap_on_exhaustion: env_or(
                "LAYOUT_ALLOW_TITLE_OVERLAP",
                defaults.allow_title_overlap_on_exhaustion,
            )?,
            side_horizontal_chance: env_or(
                "LAYOUT_SIDE_HORIZONTAL_CHANCE",
                defaults.side_horizontal_chance,
            )?,
            ..defaults
        };
        // Surface bad tuning at startup rather than on the first request.
        layout
            .validate()
            .context("Invalid layout configuration in environment")?;

        Ok(Config {
            port: env_or("PORT", 8080u16).context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            layout,
        })
    }
}

fn env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => parse_value(key, &raw),
        Err(_) => Ok(default),
    }
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    raw.trim()
        .parse::<T>()
        .with_context(|| format!("Environment variable '{key}' has invalid value '{raw}'"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_trims_whitespace() {
        let attempts: u32 = parse_value("LAYOUT_MAX_ATTEMPTS", " 120 ").unwrap();
        assert_eq!(attempts, 120);
        let bias: bool = parse_value("LAYOUT_GRID_BIAS", "false").unwrap();
        assert!(!bias);
    }

    #[test]
    fn test_parse_value_reports_key() {
        let err = parse_value::<u16>("PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn test_missing_variable_uses_default() {
        let value: u32 = env_or("THUMBNAIL_API_TEST_UNSET_VARIABLE", 7).unwrap();
        assert_eq!(value, 7);
    }
}
