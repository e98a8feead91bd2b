use std::env;
use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgSslMode};

#[derive(Debug, Clone)]
pub struct Config {
    // Database
    pub database: DatabaseConfig,

    // Server
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
}

/// Connection settings for the PostgreSQL store.
///
/// `url` wins when present; otherwise the discrete parts are used.
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: Option<String>,
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub tls: Option<bool>,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            database: DatabaseConfig::from_env()?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                Ok("text") | Err(_) => LogFormat::Text,
                Ok(_) => return Err(ConfigError::Invalid("LOG_FORMAT")),
            },
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let url = env::var("DATABASE_URL").ok();

        // The discrete parts are only mandatory when no URL is given
        let required = |key: &'static str| -> Result<String, ConfigError> {
            match env::var(key) {
                Ok(value) => Ok(value),
                Err(_) if url.is_some() => Ok(String::new()),
                Err(_) => Err(ConfigError::Missing(key)),
            }
        };

        Ok(Self {
            host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),
            port: env::var("DB_PORT")
                .unwrap_or_else(|_| "5432".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("DB_PORT"))?,
            user: required("DB_USER")?,
            password: env::var("DB_PASSWORD").unwrap_or_default(),
            name: required("DB_NAME")?,
            tls: match env::var("DB_TLS") {
                Ok(value) => Some(parse_flag(&value).ok_or(ConfigError::Invalid("DB_TLS"))?),
                Err(_) => None,
            },
            max_connections: env::var("DB_MAX_CONNECTIONS")
                .unwrap_or_else(|_| "10".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("DB_MAX_CONNECTIONS"))?,
            url,
        })
    }

    /// Build a config from a single connection URL
    pub fn from_url(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            host: String::new(),
            port: 5432,
            user: String::new(),
            password: String::new(),
            name: String::new(),
            tls: None,
            max_connections: 10,
        }
    }

    /// Resolve sqlx connect options
    pub fn connect_options(&self) -> Result<PgConnectOptions, ConfigError> {
        if let Some(url) = &self.url {
            return PgConnectOptions::from_str(url).map_err(|_| ConfigError::Invalid("DATABASE_URL"));
        }

        let ssl_mode = match self.tls {
            Some(true) => PgSslMode::Require,
            Some(false) => PgSslMode::Disable,
            None => PgSslMode::Prefer,
        };

        Ok(PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.name)
            .ssl_mode(ssl_mode))
    }
}

/// Settings for the dashboard's store client
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub api_url: String,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        Self {
            api_url: env::var("HOURGLOW_API_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
