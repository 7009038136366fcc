//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Database (one of)
//! - `PVZ_DATABASE_URL` / `DATABASE_URL` - `PostgreSQL` connection string
//! - `DB_HOST`, `DB_PORT`, `DB_USER`, `DB_PASSWORD`, `DB_NAME` - connection parts,
//!   used only when no URL variable is set
//!
//! ## Optional
//! - `PVZ_HOST` - Bind address (default: 0.0.0.0)
//! - `PVZ_PORT` - Listen port (default: 8080)
//! - `PVZ_ALLOWED_CITIES` - Comma-separated city whitelist
//!   (default: Москва,Санкт-Петербург,Казань)
//! - `PVZ_DB_MAX_CONNECTIONS` - Pool size (default: 10)
//! - `PVZ_RUN_MIGRATIONS` - Apply migrations at startup (default: false)
//! - `PVZ_LOG_FORMAT` - `text` or `json` (default: text)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Trace sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use sqlx::postgres::PgConnectOptions;
use thiserror::Error;

use pvz_core::AllowedCities;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the database lives.
#[derive(Clone)]
pub enum DatabaseSettings {
    /// A full connection URL (contains password).
    Url(SecretString),
    /// Connection parts, as the `DB_*` variables provide them.
    Parts {
        host: String,
        port: u16,
        user: String,
        password: SecretString,
        name: String,
    },
}

impl DatabaseSettings {
    /// Build `sqlx` connection options.
    ///
    /// # Errors
    ///
    /// Returns `sqlx::Error::Configuration` if the URL cannot be parsed.
    pub fn connect_options(&self) -> Result<PgConnectOptions, sqlx::Error> {
        match self {
            Self::Url(url) => PgConnectOptions::from_str(url.expose_secret()),
            Self::Parts {
                host,
                port,
                user,
                password,
                name,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password.expose_secret())
                .database(name)),
        }
    }
}

impl std::fmt::Debug for DatabaseSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(_) => f.debug_tuple("Url").field(&"[REDACTED]").finish(),
            Self::Parts {
                host,
                port,
                user,
                name,
                ..
            } => f
                .debug_struct("Parts")
                .field("host", host)
                .field("port", port)
                .field("user", user)
                .field("password", &"[REDACTED]")
                .field("name", name)
                .finish(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "pretty" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("expected `text` or `json`, got `{other}`")),
        }
    }
}

/// Sentry error tracking configuration.
#[derive(Debug, Clone, Default)]
pub struct SentryConfig {
    /// Sentry DSN; tracking is disabled when unset
    pub dsn: Option<String>,
    /// Environment name reported with events
    pub environment: Option<String>,
    /// Fraction of errors to send
    pub sample_rate: f32,
    /// Fraction of transactions to trace
    pub traces_sample_rate: f32,
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Database location
    pub database: DatabaseSettings,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Cities in which pickup points may be registered
    pub allowed_cities: AllowedCities,
    /// Maximum pool connections
    pub max_connections: u32,
    /// Apply embedded migrations before serving
    pub run_migrations: bool,
    /// Log output format
    pub log_format: LogFormat,
    /// Error tracking
    pub sentry: SentryConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database = database_settings(&env)?;
        let host = env.parse_or("PVZ_HOST", IpAddr::from([0, 0, 0, 0]))?;
        let port = env.parse_or("PVZ_PORT", 8080_u16)?;
        let allowed_cities = match env.get("PVZ_ALLOWED_CITIES") {
            Some(list) => AllowedCities::parse_list(&list).map_err(|e| {
                ConfigError::InvalidEnvVar("PVZ_ALLOWED_CITIES".to_string(), e.to_string())
            })?,
            None => AllowedCities::default(),
        };
        let max_connections = env.parse_or("PVZ_DB_MAX_CONNECTIONS", 10_u32)?;
        let run_migrations = env.parse_or("PVZ_RUN_MIGRATIONS", false)?;
        let log_format = env.parse_or("PVZ_LOG_FORMAT", LogFormat::Text)?;

        let sentry = SentryConfig {
            dsn: env.get("SENTRY_DSN"),
            environment: env.get("SENTRY_ENVIRONMENT"),
            sample_rate: env.parse_or("SENTRY_SAMPLE_RATE", 1.0_f32)?,
            traces_sample_rate: env.parse_or("SENTRY_TRACES_SAMPLE_RATE", 0.0_f32)?,
        };

        Ok(Self {
            database,
            host,
            port,
            allowed_cities,
            max_connections,
            run_migrations,
            log_format,
            sentry,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable; empty values count as unset.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    /// Get a required variable.
    fn required(&self, key: &str) -> Result<String, ConfigError> {
        self.get(key)
            .ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
    }

    /// Parse a variable, falling back to `default` when unset.
    fn parse_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.get(key).map_or(Ok(default), |raw| {
            raw.trim()
                .parse()
                .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
        })
    }
}

/// Database settings with fallback from `PVZ_DATABASE_URL` to `DATABASE_URL`
/// to the `DB_*` parts.
fn database_settings<F>(env: &Env<F>) -> Result<DatabaseSettings, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = env.get("PVZ_DATABASE_URL").or_else(|| env.get("DATABASE_URL")) {
        return Ok(DatabaseSettings::Url(SecretString::from(url)));
    }

    if env.get("DB_HOST").is_none() {
        return Err(ConfigError::MissingEnvVar("PVZ_DATABASE_URL".to_string()));
    }

    Ok(DatabaseSettings::Parts {
        host: env.required("DB_HOST")?,
        port: env.parse_or("DB_PORT", 5432_u16)?,
        user: env.required("DB_USER")?,
        password: SecretString::from(env.required("DB_PASSWORD")?),
        name: env.required("DB_NAME")?,
    })
}
