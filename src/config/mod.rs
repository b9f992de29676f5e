use crate::modules::product::DeletePolicy;
use dashmap::DashMap;
use std::env;
use std::str::FromStr;
use std::sync::Arc;
use strum::VariantNames;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: `{value}` ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Unsupported(String),
}

/// Key/value configuration source
///
/// Snapshots the process environment (after loading `.env`, if any) so the
/// rest of startup reads from one place.
#[derive(Clone, Default)]
pub struct ConfigService {
    config: Arc<DashMap<String, String>>,
}

impl ConfigService {
    pub fn new() -> Self {
        if let Ok(path) = dotenvy::dotenv() {
            tracing::debug!("Loaded environment from {}", path.display());
        }
        let service = Self::default();
        for (key, value) in env::vars() {
            service.set(&key, &value);
        }
        service
    }

    /// A service holding exactly `pairs`, ignoring the environment.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let service = Self::default();
        for (key, value) in pairs {
            service.set(key, value);
        }
        service
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.config.get(key).map(|v| v.clone())
    }

    pub fn set(&self, key: &str, value: &str) {
        self.config.insert(key.to_string(), value.to_string());
    }
}

/// Typed application settings.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_url: Option<String>,
    pub delete_policy: DeletePolicy,
    pub log_filter: String,
}

impl AppConfig {
    pub const DEFAULT_HOST: &'static str = "0.0.0.0";
    pub const DEFAULT_PORT: u16 = 3000;
    pub const DEFAULT_LOG_FILTER: &'static str = "info";

    pub fn from_service(config: &ConfigService) -> Result<Self, ConfigError> {
        let host = config
            .get("HOST")
            .unwrap_or_else(|| Self::DEFAULT_HOST.to_string());

        let port = match config.get("PORT") {
            Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidValue {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => Self::DEFAULT_PORT,
        };

        let delete_policy = match config.get("DELETE_POLICY") {
            Some(raw) => DeletePolicy::from_str(raw.trim()).map_err(|_| ConfigError::InvalidValue {
                key: "DELETE_POLICY",
                value: raw.clone(),
                reason: format!("expected one of {}", DeletePolicy::VARIANTS.join(", ")),
            })?,
            None => DeletePolicy::default(),
        };

        let database_url = config.get("DATABASE_URL").filter(|url| !url.trim().is_empty());
        if database_url.is_some() && !cfg!(feature = "sea-orm-db") {
            return Err(ConfigError::Unsupported(
                "DATABASE_URL is set but this build lacks the `sea-orm-db` feature".to_string(),
            ));
        }

        let log_filter = config
            .get("RUST_LOG")
            .unwrap_or_else(|| Self::DEFAULT_LOG_FILTER.to_string());

        Ok(Self {
            host,
            port,
            database_url,
            delete_policy,
            log_filter,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
