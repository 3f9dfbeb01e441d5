//! Server configuration from environment variables.

use std::env;
use std::str::FromStr;

use chrono::TimeDelta;

/// Longest accepted credential lifetime: one year.
const MAX_EXPIRY_HOURS: i64 = 24 * 365;

/// Which storage backend the server runs on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// PostgreSQL via `DATABASE_URL`.
    Postgres,
    /// Process memory; everything is lost on exit.
    Memory,
}

impl StorageBackend {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Postgres => "postgres",
            Self::Memory => "memory",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::InvalidValue {
                name: "STORAGE_BACKEND".to_string(),
                reason: format!("expected \"postgres\" or \"memory\", got {:?}", other),
            }),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Server port to listen on.
    pub port: u16,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Emit logs as JSON lines instead of human-readable text.
    pub log_json: bool,
    /// CORS allowed origins (comma-separated or "*" for all).
    pub cors_allowed_origins: String,
    /// Secret for signing bearer credentials (HS256).
    pub jwt_secret: String,
    /// Lifetime of issued credentials.
    pub jwt_ttl: TimeDelta,
    /// Storage backend.
    pub storage: StorageBackend,
}

impl ServerConfig {
    /// Configuration with every optional setting at its default.
    pub fn new(jwt_secret: impl Into<String>) -> Self {
        Self {
            port: 3000,
            log_level: "info".to_string(),
            log_json: false,
            cors_allowed_origins: "*".to_string(),
            jwt_secret: jwt_secret.into(),
            jwt_ttl: TimeDelta::hours(24),
            storage: StorageBackend::Postgres,
        }
    }

    /// Load configuration from environment variables.
    ///
    /// Required:
    /// - `JWT_SECRET`: Signing secret for bearer credentials
    ///
    /// Optional:
    /// - `PORT`: Server port (default: 3000)
    /// - `LOG_LEVEL`: Logging level (default: "info")
    /// - `LOG_FORMAT`: "json" or "pretty" (default: "pretty")
    /// - `CORS_ALLOWED_ORIGINS`: Allowed CORS origins (default: "*")
    /// - `JWT_EXPIRY_HOURS`: Credential lifetime, 1 to 8760 (default: 24)
    /// - `STORAGE_BACKEND`: "postgres" or "memory" (default: "postgres")
    ///
    /// Database settings are read separately by `notes_store::StoreConfig`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| ConfigError::MissingEnvVar("JWT_SECRET".to_string()))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::InvalidValue {
                name: "JWT_SECRET".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let port = parse_var("PORT", 3000)?;
        let jwt_ttl = match env::var("JWT_EXPIRY_HOURS") {
            Ok(s) => parse_expiry_hours(&s)?,
            Err(_) => TimeDelta::hours(24),
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let log_json = env::var("LOG_FORMAT")
            .map(|s| s.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let cors_allowed_origins =
            env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string());

        let storage = match env::var("STORAGE_BACKEND") {
            Ok(s) => s.parse()?,
            Err(_) => StorageBackend::Postgres,
        };

        Ok(Self {
            port,
            log_level,
            log_json,
            cors_allowed_origins,
            jwt_secret,
            jwt_ttl,
            storage,
        })
    }

    /// Get the socket address for the server.
    pub fn socket_addr(&self) -> std::net::SocketAddr {
        std::net::SocketAddr::from(([0, 0, 0, 0], self.port))
    }
}

/// Read an optional numeric variable, rejecting values that do not parse.
fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(s) => s.parse().map_err(|_| ConfigError::InvalidValue {
            name: name.to_string(),
            reason: format!("{:?} is not a valid number", s),
        }),
        Err(_) => Ok(default),
    }
}

/// Parse a credential lifetime given in whole hours.
fn parse_expiry_hours(raw: &str) -> Result<TimeDelta, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidValue {
        name: "JWT_EXPIRY_HOURS".to_string(),
        reason,
    };
    let hours: i64 = raw
        .trim()
        .parse()
        .map_err(|_| invalid(format!("{:?} is not a valid number", raw)))?;
    if !(1..=MAX_EXPIRY_HOURS).contains(&hours) {
        return Err(invalid(format!(
            "{} is outside 1..={}",
            hours, MAX_EXPIRY_HOURS
        )));
    }
    TimeDelta::try_hours(hours).ok_or_else(|| invalid(format!("{} hours is out of range", hours)))
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Required environment variable is missing.
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    /// Invalid environment variable value.
    #[error("invalid value for environment variable {name}: {reason}")]
    InvalidValue { name: String, reason: String },
}
