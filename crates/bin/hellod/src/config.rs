//! `hello.toml` settings with `HELLO_*` environment overrides.

use serde::Deserialize;

/// Environment keys, applied in this order so later keys win
/// (`HELLO_BIND` over `HELLO_HOST`/`HELLO_PORT`, `RUST_LOG` over `HELLO_LOG`).
const ENV_KEYS: [&str; 7] = [
    "HELLO_HOST",
    "HELLO_PORT",
    "HELLO_BIND",
    "HELLO_DATABASE_URL",
    "HELLO_DATABASE_MAX_CONNECTIONS",
    "HELLO_LOG",
    "RUST_LOG",
];

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive.
    pub filter: String,
}

impl Config {
    /// Read `hello.toml` from the working directory (defaults if absent),
    /// then apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on an unreadable or malformed file, an
    /// unparseable override, or an invalid final value.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::fs::read_to_string("hello.toml") {
            Ok(content) => toml::from_str(&content)?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(err) => return Err(err.into()),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        for key in ENV_KEYS {
            if let Some(value) = var(key) {
                self.set(key, value)?;
            }
        }
        Ok(())
    }

    fn set(&mut self, key: &'static str, value: String) -> Result<(), ConfigError> {
        let invalid = |value: &str| ConfigError::InvalidEnv {
            key,
            value: value.to_string(),
        };
        match key {
            "HELLO_HOST" => self.server.host = value,
            "HELLO_PORT" => self.server.port = value.parse().map_err(|_| invalid(&value))?,
            "HELLO_BIND" => {
                let (host, port) = value.rsplit_once(':').ok_or_else(|| invalid(&value))?;
                self.server.port = port.parse().map_err(|_| invalid(&value))?;
                self.server.host = host.to_string();
            }
            "HELLO_DATABASE_URL" => self.database.url = value,
            "HELLO_DATABASE_MAX_CONNECTIONS" => {
                self.database.max_connections = value.parse().map_err(|_| invalid(&value))?;
            }
            // HELLO_LOG, RUST_LOG
            _ => self.logging.filter = value,
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("server.port must be non-zero"));
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::Validation(
                "database.max_connections must be non-zero",
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl DatabaseConfig {
    /// Settings for the `SQLite` adapter.
    #[must_use]
    pub fn storage(&self) -> hello_adapter_storage_sqlite_sqlx::Config {
        hello_adapter_storage_sqlite_sqlx::Config {
            url: self.url.clone(),
            max_connections: self.max_connections,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite:hello.db?mode=rwc".to_string(),
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hellod=info,hello=info,tower_http=debug".to_string(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse hello.toml")]
    Parse(#[from] toml::de::Error),
    #[error("failed to read hello.toml")]
    Io(#[from] std::io::Error),
    #[error("invalid value {value:?} for {key}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Validation(&'static str),
}
