//! Service configuration loaded from environment variables.
//!
//! All settings come from environment variables (or a `.env` file via
//! `dotenvy`) and are read once at startup. Parsing is done over a key
//! lookup closure so it can be exercised without touching the process
//! environment.

use std::net::{AddrParseError, SocketAddr};

/// Default bind address.
const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:5000";

/// Database file name used when `DATABASE_URL` is not set.
const DATABASE_FILE: &str = "app.db";

/// Mount point of the persistent disk on the hosted deployment.
const DEFAULT_RENDER_DISK_PATH: &str = "/var/data";

/// Errors raised while loading [`AppConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// `SECRET_KEY` is unset or empty.
    #[error("SECRET_KEY must be set to a non-empty value")]
    MissingSecret,

    /// `LISTEN_ADDR` could not be parsed.
    #[error("invalid LISTEN_ADDR: {0}")]
    InvalidListenAddr(#[from] AddrParseError),
}

/// Cross-origin policy applied to every response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsPolicy {
    /// Any origin, method and header.
    Permissive,
    /// Only the listed origins.
    AllowList(Vec<String>),
}

/// Output format of the tracing subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per line.
    Json,
}

/// Top-level service configuration.
///
/// Loaded once at startup via [`AppConfig::from_env`].
#[derive(Clone)]
pub struct AppConfig {
    /// Socket address to bind the HTTP server to.
    pub listen_addr: SocketAddr,

    /// Shared secret expected after `Bearer ` in the `Authorization` header.
    pub secret_key: String,

    /// sqlx SQLite connection string.
    pub database_url: String,

    /// Maximum number of database connections in the pool.
    pub database_max_connections: u32,

    /// Timeout in seconds for acquiring a database connection.
    pub database_connect_timeout_secs: u64,

    /// Cross-origin policy.
    pub cors: CorsPolicy,

    /// Log output format.
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("listen_addr", &self.listen_addr)
            .field("secret_key", &"<redacted>")
            .field("database_url", &self.database_url)
            .field("database_max_connections", &self.database_max_connections)
            .field(
                "database_connect_timeout_secs",
                &self.database_connect_timeout_secs,
            )
            .field("cors", &self.cors)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl AppConfig {
    /// Loads configuration from the process environment.
    ///
    /// Calls `dotenvy::dotenv().ok()` to optionally load a `.env` file first.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `SECRET_KEY` is missing or
    /// `LISTEN_ADDR` is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds configuration from an arbitrary key lookup.
    ///
    /// Falls back to defaults for every optional setting.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if `SECRET_KEY` is missing or
    /// `LISTEN_ADDR` cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret_key = lookup("SECRET_KEY")
            .filter(|s| !s.is_empty())
            .ok_or(ConfigError::MissingSecret)?;

        let listen_addr: SocketAddr = lookup("LISTEN_ADDR")
            .unwrap_or_else(|| DEFAULT_LISTEN_ADDR.to_string())
            .parse()?;

        let database_url = lookup("DATABASE_URL")
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| default_database_url(&lookup));

        let database_max_connections = parse_var(&lookup, "DATABASE_MAX_CONNECTIONS", 5);
        let database_connect_timeout_secs =
            parse_var(&lookup, "DATABASE_CONNECT_TIMEOUT_SECS", 5);

        let cors = parse_cors(lookup("CORS_ALLOWED_ORIGINS").as_deref());

        let log_format = match lookup("LOG_FORMAT").as_deref() {
            Some("json") | Some("JSON") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Ok(Self {
            listen_addr,
            secret_key,
            database_url,
            database_max_connections,
            database_connect_timeout_secs,
            cors,
            log_format,
        })
    }
}

/// Picks the database location when no explicit URL is configured.
///
/// On the hosted deployment (`RENDER` present) the file lives on the
/// mounted disk; locally it sits in the working directory.
fn default_database_url<F>(lookup: &F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    if lookup("RENDER").is_some() {
        let disk =
            lookup("RENDER_DISK_PATH").unwrap_or_else(|| DEFAULT_RENDER_DISK_PATH.to_string());
        format!("sqlite://{}/{DATABASE_FILE}", disk.trim_end_matches('/'))
    } else {
        format!("sqlite://{DATABASE_FILE}")
    }
}

/// Parses `CORS_ALLOWED_ORIGINS`. Unset, empty, or `*` means permissive.
fn parse_cors(raw: Option<&str>) -> CorsPolicy {
    let Some(raw) = raw else {
        return CorsPolicy::Permissive;
    };
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect();
    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        CorsPolicy::Permissive
    } else {
        CorsPolicy::AllowList(origins)
    }
}

/// Parses a variable as `T`, returning `default` on missing or invalid
/// values.
fn parse_var<F, T>(lookup: &F, key: &str, default: T) -> T
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    lookup(key).and_then(|v| v.parse().ok()).unwrap_or(default)
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn missing_secret_is_rejected() {
        assert!(matches!(load(&[]), Err(ConfigError::MissingSecret)));
        assert!(matches!(
            load(&[("SECRET_KEY", "")]),
            Err(ConfigError::MissingSecret)
        ));
    }

    #[test]
    fn defaults_apply() {
        let Ok(cfg) = load(&[("SECRET_KEY", "s3cret")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.listen_addr.port(), 5000);
        assert_eq!(cfg.database_url, "sqlite://app.db");
        assert_eq!(cfg.database_max_connections, 5);
        assert_eq!(cfg.cors, CorsPolicy::Permissive);
        assert_eq!(cfg.log_format, LogFormat::Text);
    }

    #[test]
    fn render_deployment_uses_disk_path() {
        let Ok(cfg) = load(&[
            ("SECRET_KEY", "k"),
            ("RENDER", "true"),
            ("RENDER_DISK_PATH", "/mnt/disk/"),
        ]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.database_url, "sqlite:///mnt/disk/app.db");

        let Ok(cfg) = load(&[("SECRET_KEY", "k"), ("RENDER", "1")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.database_url, "sqlite:///var/data/app.db");
    }

    #[test]
    fn explicit_database_url_wins() {
        let Ok(cfg) = load(&[
            ("SECRET_KEY", "k"),
            ("RENDER", "1"),
            ("DATABASE_URL", "sqlite::memory:"),
        ]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.database_url, "sqlite::memory:");
    }

    #[test]
    fn bad_listen_addr_is_an_error() {
        assert!(matches!(
            load(&[("SECRET_KEY", "k"), ("LISTEN_ADDR", "nope")]),
            Err(ConfigError::InvalidListenAddr(_))
        ));
    }

    #[test]
    fn invalid_numbers_fall_back() {
        let Ok(cfg) = load(&[("SECRET_KEY", "k"), ("DATABASE_MAX_CONNECTIONS", "many")]) else {
            panic!("config should load");
        };
        assert_eq!(cfg.database_max_connections, 5);
    }

    #[test]
    fn cors_origins_parse() {
        assert_eq!(parse_cors(Some("*")), CorsPolicy::Permissive);
        assert_eq!(parse_cors(Some(" , ")), CorsPolicy::Permissive);
        assert_eq!(
            parse_cors(Some("https://a.example, https://b.example")),
            CorsPolicy::AllowList(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }

    #[test]
    fn debug_redacts_secret() {
        let Ok(cfg) = load(&[("SECRET_KEY", "hunter2")]) else {
            panic!("config should load");
        };
        let printed = format!("{cfg:?}");
        assert!(!printed.contains("hunter2"));
    }
}
