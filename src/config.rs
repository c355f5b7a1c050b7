//! Runtime Configuration
//!
//! API base URL and log level. Build-time env vars set the defaults;
//! `localStorage["garage.apiBaseUrl"]` overrides the base URL at runtime.

use log::LevelFilter;

use crate::browser;

pub const DEFAULT_API_BASE: &str = "/api";
pub const API_BASE_STORAGE_KEY: &str = "garage.apiBaseUrl";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_base: String,
    pub log_level: LevelFilter,
}

impl Config {
    /// Defaults baked in at build time
    pub fn from_build_env() -> Self {
        Self {
            api_base: option_env!("GARAGE_API_URL").unwrap_or(DEFAULT_API_BASE).to_string(),
            log_level: parse_level(option_env!("GARAGE_LOG_LEVEL").unwrap_or("info")),
        }
    }

    /// Build defaults plus any browser override
    pub fn load() -> Self {
        let mut config = Self::from_build_env();
        if let Some(base) = browser::storage_get(API_BASE_STORAGE_KEY).filter(|b| !b.trim().is_empty()) {
            config.api_base = base.trim().to_string();
        }
        config
    }

    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base, path)
    }
}

/// Join base and path with exactly one slash between them
pub fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{}/{}", base, path)
}

pub fn parse_level(level: &str) -> LevelFilter {
    level.trim().parse().unwrap_or(LevelFilter::Info)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_slashes() {
        assert_eq!(join_url("/api", "/customers"), "/api/customers");
        assert_eq!(join_url("/api/", "customers"), "/api/customers");
        assert_eq!(join_url("http://localhost:8000//", "//work-orders/3/invoice"), "http://localhost:8000/work-orders/3/invoice");
        assert_eq!(join_url("/api", ""), "/api");
    }

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("debug"), LevelFilter::Debug);
        assert_eq!(parse_level("WARN"), LevelFilter::Warn);
        assert_eq!(parse_level("chatty"), LevelFilter::Info);
    }

    #[test]
    fn test_build_defaults() {
        let config = Config::from_build_env();
        assert!(!config.api_base.is_empty());
    }
}
