/**
 * Server Configuration
 *
 * Configuration is assembled in layers:
 * 1. Built-in defaults suitable for local development
 * 2. An optional TOML file named by `STUDYCOLLAB_CONFIG`
 * 3. Environment variable overrides (a `.env` file is loaded first by the binary)
 *
 * # Environment Variables
 *
 * `SERVER_HOST`, `SERVER_PORT`, `DATABASE_URL`, `JWT_SECRET`, `ASSIST_API_URL`,
 * `ASSIST_API_KEY`, `ASSIST_MODEL`, `ASSIST_DAILY_LIMIT`, `ASSIST_TIMEOUT_SECS`,
 * `AUTO_JOIN_ON_VIEW`
 *
 * # Database
 *
 * A missing `DATABASE_URL` is not an error. The server logs a warning and
 * keeps sessions in memory.
 */

use serde::Deserialize;
use sqlx::PgPool;
use std::net::SocketAddr;
use std::path::Path;
use thiserror::Error;

use crate::shared::assist::DEFAULT_DAILY_LIMIT;
use crate::shared::Limits;

/// Development signing secret used when `JWT_SECRET` is unset
pub const DEV_JWT_SECRET: &str = "studycollab-dev-secret-change-me";

/// Environment variable naming an optional TOML config file
pub const CONFIG_PATH_VAR: &str = "STUDYCOLLAB_CONFIG";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerSection {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AuthSection {
    pub jwt_secret: String,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            jwt_secret: DEV_JWT_SECRET.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AssistSection {
    /// Base URL of an OpenAI-compatible API (without `/chat/completions`)
    pub api_url: String,
    /// No key means the assistant is disabled
    pub api_key: Option<String>,
    pub model: String,
    pub daily_limit: u32,
    pub timeout_secs: u64,
}

impl Default for AssistSection {
    fn default() -> Self {
        Self {
            api_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            model: "gpt-4o-mini".to_string(),
            daily_limit: DEFAULT_DAILY_LIMIT,
            timeout_secs: 30,
        }
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AccessSection {
    /// Viewing a session as a non-member adds the viewer as a participant
    pub auto_join_on_view: bool,
}

impl Default for AccessSection {
    fn default() -> Self {
        Self { auto_join_on_view: true }
    }
}

/// Complete server configuration
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ServerConfig {
    pub server: ServerSection,
    pub database: DatabaseSection,
    pub auth: AuthSection,
    pub assist: AssistSection,
    pub limits: Limits,
    pub access: AccessSection,
}

fn parse_var<T: std::str::FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

impl ServerConfig {
    /// Load defaults, then the optional TOML file, then environment overrides
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = match std::env::var(CONFIG_PATH_VAR) {
            Ok(path) => Self::from_file(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document; missing sections take their defaults
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    /// Apply overrides from a variable lookup (the process environment in `load`)
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup("SERVER_HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("SERVER_PORT") {
            self.server.port = parse_var("SERVER_PORT", port)?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            self.database.url = Some(url).filter(|u| !u.trim().is_empty());
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(url) = lookup("ASSIST_API_URL") {
            self.assist.api_url = url;
        }
        if let Some(key) = lookup("ASSIST_API_KEY") {
            self.assist.api_key = Some(key).filter(|k| !k.trim().is_empty());
        }
        if let Some(model) = lookup("ASSIST_MODEL") {
            self.assist.model = model;
        }
        if let Some(limit) = lookup("ASSIST_DAILY_LIMIT") {
            self.assist.daily_limit = parse_var("ASSIST_DAILY_LIMIT", limit)?;
        }
        if let Some(timeout) = lookup("ASSIST_TIMEOUT_SECS") {
            self.assist.timeout_secs = parse_var("ASSIST_TIMEOUT_SECS", timeout)?;
        }
        if let Some(flag) = lookup("AUTO_JOIN_ON_VIEW") {
            self.access.auto_join_on_view = parse_var("AUTO_JOIN_ON_VIEW", flag)?;
        }
        Ok(())
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.assist.daily_limit == 0 {
            return Err(ConfigError::Invalid("assist.daily_limit must be at least 1".into()));
        }
        if self.limits.max_title_chars == 0
            || self.limits.max_content_chars == 0
            || self.limits.max_message_chars == 0
        {
            return Err(ConfigError::Invalid("limits must be greater than zero".into()));
        }
        if self.auth.jwt_secret.len() < 16 {
            return Err(ConfigError::Invalid("auth.jwt_secret must be at least 16 bytes".into()));
        }
        if self.assist.timeout_secs == 0 {
            return Err(ConfigError::Invalid("assist.timeout_secs must be at least 1".into()));
        }
        Ok(())
    }

    /// Address the server binds to
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = format!("{}:{}", self.server.host, self.server.port);
        raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "SERVER_HOST",
            value: raw,
        })
    }

    pub fn uses_dev_secret(&self) -> bool {
        self.auth.jwt_secret == DEV_JWT_SECRET
    }
}

/// Connect to PostgreSQL and run migrations
///
/// Returns `None` when no URL is configured or the connection fails; the
/// caller falls back to the in-memory store. Migration failures are logged
/// and the pool is still returned.
pub async fn load_database(url: Option<&str>) -> Option<PgPool> {
    let database_url = match url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Sessions will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPool::connect(database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Sessions will be kept in memory.");
            return None;
        }
    };

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = ServerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.assist.daily_limit, DEFAULT_DAILY_LIMIT);
        assert!(config.access.auto_join_on_view);
        assert!(config.uses_dev_secret());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            [assist]
            daily_limit = 3

            [limits]
            max_message_chars = 500
            "#,
        )
        .unwrap();
        assert_eq!(config.assist.daily_limit, 3);
        assert_eq!(config.assist.model, "gpt-4o-mini");
        assert_eq!(config.limits.max_message_chars, 500);
        assert_eq!(config.limits.max_title_chars, 200);
    }

    #[test]
    fn test_env_overrides_file_values() {
        let mut config = ServerConfig::from_toml_str("[server]\nport = 8080\n").unwrap();
        config
            .apply_overrides(lookup_from(&[
                ("SERVER_PORT", "9090"),
                ("ASSIST_API_KEY", "sk-test"),
                ("AUTO_JOIN_ON_VIEW", "false"),
                ("DATABASE_URL", ""),
            ]))
            .unwrap();
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.assist.api_key.as_deref(), Some("sk-test"));
        assert!(!config.access.auto_join_on_view);
        assert_eq!(config.database.url, None);
    }

    #[test]
    fn test_bad_number_is_reported_with_key() {
        let mut config = ServerConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[("ASSIST_DAILY_LIMIT", "lots")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "ASSIST_DAILY_LIMIT", .. }));
    }

    #[test]
    fn test_validate_rejects_zero_limit_and_short_secret() {
        let mut config = ServerConfig::default();
        config.assist.daily_limit = 0;
        assert!(config.validate().is_err());

        let mut config = ServerConfig::default();
        config.auth.jwt_secret = "short".into();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_socket_addr() {
        let mut config = ServerConfig::default();
        config.server.host = "127.0.0.1".into();
        config.server.port = 4001;
        assert_eq!(config.socket_addr().unwrap().to_string(), "127.0.0.1:4001");
    }

    #[test]
    #[serial_test::serial]
    fn test_load_reads_file_and_environment() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[assist]\ndaily_limit = 4\nmodel = \"file-model\"").unwrap();

        std::env::set_var(CONFIG_PATH_VAR, file.path());
        std::env::set_var("ASSIST_MODEL", "env-model");
        let loaded = ServerConfig::load();
        std::env::remove_var(CONFIG_PATH_VAR);
        std::env::remove_var("ASSIST_MODEL");

        let config = loaded.unwrap();
        assert_eq!(config.assist.daily_limit, 4);
        assert_eq!(config.assist.model, "env-model");
    }

    #[test]
    #[serial_test::serial]
    fn test_load_missing_file_is_io_error() {
        std::env::set_var(CONFIG_PATH_VAR, "/nonexistent/studycollab.toml");
        let loaded = ServerConfig::load();
        std::env::remove_var(CONFIG_PATH_VAR);
        assert!(matches!(loaded, Err(ConfigError::Io { .. })));
    }
}
