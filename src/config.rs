use anyhow::{Context, Result};
use std::env;

const DEFAULT_LOG_FILTER: &str = "food_menu=debug,tower_http=info";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatabaseBackend {
    MongoDb,
    InMemory,
}

impl DatabaseBackend {
    fn from_env(raw: &str) -> Result<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "mongodb" | "mongo" => Ok(Self::MongoDb),
            "memory" | "in-memory" | "inmemory" => Ok(Self::InMemory),
            _ => Err(anyhow::anyhow!(
                "DATABASE_BACKEND must be one of: mongodb, memory"
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoSettings {
    pub uri: String,
    pub database: String,
    pub collection: String,
    pub app_name: String,
}

impl Default for MongoSettings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            database: "food_delivery_db".to_string(),
            collection: "menu".to_string(),
            app_name: "food_menu".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database_backend: DatabaseBackend,
    pub mongo: MongoSettings,
    /// Fallback `tracing` filter directive when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());
        let defaults = MongoSettings::default();

        let host = var("APP_HOST", "0.0.0.0");

        let port = var("APP_PORT", "8000")
            .parse::<u16>()
            .context("APP_PORT must be a valid u16")?;

        let database_backend = DatabaseBackend::from_env(&var("DATABASE_BACKEND", "mongodb"))?;

        let mongo = MongoSettings {
            uri: var("MONGODB_URI", &defaults.uri),
            database: var("MONGODB_DATABASE", &defaults.database),
            collection: var("MONGODB_COLLECTION", &defaults.collection),
            app_name: var("MONGODB_APP_NAME", &defaults.app_name),
        };

        let log_filter = var("LOG_FILTER", DEFAULT_LOG_FILTER);

        Ok(Self {
            host,
            port,
            database_backend,
            mongo,
            log_filter,
        })
    }

    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_point_at_local_mongodb() {
        let config = config_from(&[]).expect("defaults should load");

        assert_eq!(config.address(), "0.0.0.0:8000");
        assert_eq!(config.database_backend, DatabaseBackend::MongoDb);
        assert_eq!(config.mongo, MongoSettings::default());
        assert_eq!(config.mongo.database, "food_delivery_db");
        assert_eq!(config.mongo.collection, "menu");
        assert_eq!(config.log_filter, "food_menu=debug,tower_http=info");
    }

    #[test]
    fn overrides_are_applied() {
        let config = config_from(&[
            ("APP_PORT", "9090"),
            ("DATABASE_BACKEND", "Memory"),
            ("MONGODB_COLLECTION", "dishes"),
            ("LOG_FILTER", "food_menu=warn"),
        ])
        .expect("config should load");

        assert_eq!(config.port, 9090);
        assert_eq!(config.database_backend, DatabaseBackend::InMemory);
        assert_eq!(config.mongo.collection, "dishes");
        assert_eq!(config.log_filter, "food_menu=warn");
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(config_from(&[("APP_PORT", "not-a-port")]).is_err());
        assert!(config_from(&[("DATABASE_BACKEND", "postgres")]).is_err());
    }
}
