//! 配置
//!
//! 全部来自环境变量（启动时先加载 `.env`）。

use std::net::SocketAddr;
use thiserror::Error;
use tracing_subscriber::filter::LevelFilter;

pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::INFO;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{name} has an invalid value `{value}`: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
    #[error("DATABASE_URL must be set when CATALOG_STORAGE=postgres")]
    MissingDatabaseUrl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StorageSettings {
    Memory,
    Postgres {
        database_url: String,
        max_connections: u32,
    },
}

impl StorageSettings {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Postgres { .. } => "postgres",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    pub log_level: LevelFilter,
    pub storage: StorageSettings,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// 从任意查找函数读取配置，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let bind_raw = get("CATALOG_BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_raw.parse::<SocketAddr>().map_err(|e: std::net::AddrParseError| {
            ConfigError::Invalid {
                name: "CATALOG_BIND_ADDR",
                value: bind_raw.clone(),
                reason: e.to_string(),
            }
        })?;

        let database_url = get("DATABASE_URL");
        let storage_kind = get("CATALOG_STORAGE")
            .map(|v| v.to_lowercase())
            .unwrap_or_else(|| {
                if database_url.is_some() {
                    "postgres".to_string()
                } else {
                    "memory".to_string()
                }
            });

        let storage = match storage_kind.as_str() {
            "memory" => StorageSettings::Memory,
            "postgres" => {
                let database_url = database_url.ok_or(ConfigError::MissingDatabaseUrl)?;
                let max_connections = match get("CATALOG_DB_MAX_CONNECTIONS") {
                    Some(raw) => parse_max_connections(&raw)?,
                    None => DEFAULT_MAX_CONNECTIONS,
                };
                StorageSettings::Postgres {
                    database_url,
                    max_connections,
                }
            }
            other => {
                return Err(ConfigError::Invalid {
                    name: "CATALOG_STORAGE",
                    value: other.to_string(),
                    reason: "expected `memory` or `postgres`".to_string(),
                })
            }
        };

        let log_level = match get("CATALOG_LOG_LEVEL") {
            Some(raw) => raw.trim().parse::<LevelFilter>().map_err(|e| ConfigError::Invalid {
                name: "CATALOG_LOG_LEVEL",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
            None => DEFAULT_LOG_LEVEL,
        };

        Ok(Self {
            bind_addr,
            cors_origin: get("CATALOG_CORS_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            log_level,
            storage,
        })
    }
}

fn parse_max_connections(raw: &str) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name: "CATALOG_DB_MAX_CONNECTIONS",
        value: raw.to_string(),
        reason,
    };
    let value: u32 = raw.trim().parse().map_err(|e: std::num::ParseIntError| invalid(e.to_string()))?;
    if value == 0 {
        return Err(invalid("must be at least 1".to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings(vars: &[(&str, &str)]) -> Result<Settings, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_to_memory_storage() {
        let settings = settings(&[]).unwrap();

        assert_eq!(settings.storage, StorageSettings::Memory);
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR.parse::<SocketAddr>().unwrap());
        assert_eq!(settings.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(settings.log_level, LevelFilter::INFO);
    }

    #[test]
    fn database_url_selects_postgres() {
        let settings = settings(&[("DATABASE_URL", "postgres://localhost/catalog")]).unwrap();

        assert_eq!(
            settings.storage,
            StorageSettings::Postgres {
                database_url: "postgres://localhost/catalog".to_string(),
                max_connections: DEFAULT_MAX_CONNECTIONS,
            }
        );
    }

    #[test]
    fn explicit_memory_wins_over_database_url() {
        let settings = settings(&[
            ("DATABASE_URL", "postgres://localhost/catalog"),
            ("CATALOG_STORAGE", "Memory"),
        ])
        .unwrap();

        assert_eq!(settings.storage.as_str(), "memory");
    }

    #[test]
    fn postgres_without_url_is_rejected() {
        assert_eq!(
            settings(&[("CATALOG_STORAGE", "postgres")]),
            Err(ConfigError::MissingDatabaseUrl)
        );
    }

    #[test]
    fn parses_log_level_case_insensitively() {
        let settings = settings(&[("CATALOG_LOG_LEVEL", "DEBUG")]).unwrap();

        assert_eq!(settings.log_level, LevelFilter::DEBUG);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            settings(&[("CATALOG_LOG_LEVEL", "verbose")]),
            Err(ConfigError::Invalid { name: "CATALOG_LOG_LEVEL", .. })
        ));
        assert!(matches!(
            settings(&[("CATALOG_BIND_ADDR", "nowhere")]),
            Err(ConfigError::Invalid { name: "CATALOG_BIND_ADDR", .. })
        ));
        assert!(matches!(
            settings(&[("CATALOG_STORAGE", "redis")]),
            Err(ConfigError::Invalid { name: "CATALOG_STORAGE", .. })
        ));
        assert!(matches!(
            settings(&[
                ("DATABASE_URL", "postgres://localhost/catalog"),
                ("CATALOG_DB_MAX_CONNECTIONS", "0"),
            ]),
            Err(ConfigError::Invalid { name: "CATALOG_DB_MAX_CONNECTIONS", .. })
        ));
    }
}
