// src/config.rs
use axum::http::HeaderName;
use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
    time::Duration,
};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Memory,
    Postgres,
    MySql,
}

impl StorageBackend {
    /// Guess the backend from a connection string scheme.
    fn infer(database_url: Option<&str>) -> Self {
        match database_url.and_then(|url| url.split_once("://")).map(|(scheme, _)| scheme) {
            Some("postgres" | "postgresql") => Self::Postgres,
            Some("mysql" | "mariadb") => Self::MySql,
            _ => Self::Memory,
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "memory" | "mock" => Ok(Self::Memory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            "mysql" => Ok(Self::MySql),
            other => Err(ConfigError::Invalid(format!(
                "STORAGE_BACKEND must be memory, postgres or mysql (got '{other}')"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SlugStrategy {
    #[default]
    Naive,
    Sanitized,
}

impl FromStr for SlugStrategy {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "naive" => Ok(Self::Naive),
            "sanitized" => Ok(Self::Sanitized),
            other => Err(ConfigError::Invalid(format!(
                "SLUG_STRATEGY must be naive or sanitized (got '{other}')"
            ))),
        }
    }
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    listen_addr: String,
    storage: StorageBackend,
    database_url: Option<String>,
    api_keys: Vec<String>,
    api_key_header: HeaderName,
    session_cookie_name: String,
    session_ttl: Duration,
    cache_ttl: Duration,
    assets_dir: PathBuf,
    seed_dir: Option<PathBuf>,
    slug_strategy: SlugStrategy,
    allowed_origins: Vec<String>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

fn default_listen_addr() -> String {
    "127.0.0.1:8888".into()
}

fn default_allowed_origins() -> Vec<String> {
    vec!["http://localhost:3000".into()]
}

const DEFAULT_API_KEY_HEADER: &str = "x-api-key";
const DEFAULT_SESSION_COOKIE: &str = "blog_session";
const DEFAULT_SESSION_TTL_SECS: u64 = 60 * 60 * 24;
const DEFAULT_CACHE_TTL_SECS: u64 = 60;
const DEFAULT_ASSETS_DIR: &str = "static";

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_secs(key: &'static str, raw: Option<String>, default: u64) -> Result<Duration, ConfigError> {
    raw.map_or(Ok(default), |value| {
        value.trim().parse::<u64>().map_err(|_| {
            ConfigError::Invalid(format!("{key} must be a whole number of seconds (got '{value}')"))
        })
    })
    .map(Duration::from_secs)
}

fn is_cookie_token(name: &str) -> bool {
    !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.'))
}

impl AppConfig {
    /// Build configuration from environment variables, reading a `.env` file
    /// first when one exists.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup. Blank values count
    /// as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL");
        let storage = match get("STORAGE_BACKEND") {
            Some(raw) => raw.parse::<StorageBackend>()?,
            None => StorageBackend::infer(database_url.as_deref()),
        };
        if storage != StorageBackend::Memory && database_url.is_none() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }

        let api_key_header = get("API_KEY_HEADER")
            .unwrap_or_else(|| DEFAULT_API_KEY_HEADER.to_string());
        let api_key_header = HeaderName::from_bytes(api_key_header.trim().as_bytes())
            .map_err(|_| ConfigError::Invalid(format!("API_KEY_HEADER '{api_key_header}' is not a valid header name")))?;

        let session_cookie_name =
            get("SESSION_COOKIE_NAME").unwrap_or_else(|| DEFAULT_SESSION_COOKIE.to_string());
        if !is_cookie_token(&session_cookie_name) {
            return Err(ConfigError::Invalid(format!(
                "SESSION_COOKIE_NAME '{session_cookie_name}' is not a valid cookie name"
            )));
        }

        let session_ttl = parse_secs("SESSION_TTL_SECONDS", get("SESSION_TTL_SECONDS"), DEFAULT_SESSION_TTL_SECS)?;
        if session_ttl.is_zero() {
            return Err(ConfigError::Invalid("SESSION_TTL_SECONDS must be positive".into()));
        }

        let slug_strategy = get("SLUG_STRATEGY")
            .map(|raw| raw.parse::<SlugStrategy>())
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            listen_addr: get("LISTEN_ADDR").unwrap_or_else(default_listen_addr),
            storage,
            database_url,
            api_keys: get("API_KEYS").map(|raw| split_list(&raw)).unwrap_or_default(),
            api_key_header,
            session_cookie_name,
            session_ttl,
            cache_ttl: parse_secs("CACHE_TTL_SECONDS", get("CACHE_TTL_SECONDS"), DEFAULT_CACHE_TTL_SECS)?,
            assets_dir: get("ASSETS_DIR").map_or_else(|| PathBuf::from(DEFAULT_ASSETS_DIR), PathBuf::from),
            seed_dir: get("SEED_DIR").map(PathBuf::from),
            slug_strategy,
            allowed_origins: get("ALLOWED_ORIGINS")
                .map(|raw| split_list(&raw))
                .unwrap_or_else(default_allowed_origins),
        })
    }

    pub fn listen_addr(&self) -> &str {
        &self.listen_addr
    }

    pub fn storage(&self) -> StorageBackend {
        self.storage
    }

    pub fn database_url(&self) -> Option<&str> {
        self.database_url.as_deref()
    }

    pub fn api_keys(&self) -> &[String] {
        &self.api_keys
    }

    pub fn api_key_header(&self) -> &HeaderName {
        &self.api_key_header
    }

    pub fn session_cookie_name(&self) -> &str {
        &self.session_cookie_name
    }

    pub fn session_ttl(&self) -> Duration {
        self.session_ttl
    }

    /// Zero disables the HTML response cache.
    pub fn cache_ttl(&self) -> Duration {
        self.cache_ttl
    }

    pub fn assets_dir(&self) -> &Path {
        &self.assets_dir
    }

    pub fn seed_dir(&self) -> Option<&Path> {
        self.seed_dir.as_deref()
    }

    pub fn slug_strategy(&self) -> SlugStrategy {
        self.slug_strategy
    }

    pub fn allowed_origins(&self) -> &[String] {
        &self.allowed_origins
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_select_memory_storage() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.listen_addr(), "127.0.0.1:8888");
        assert_eq!(cfg.storage(), StorageBackend::Memory);
        assert!(cfg.api_keys().is_empty());
        assert_eq!(cfg.api_key_header().as_str(), "x-api-key");
        assert_eq!(cfg.session_cookie_name(), "blog_session");
        assert_eq!(cfg.session_ttl(), Duration::from_secs(86_400));
        assert_eq!(cfg.cache_ttl(), Duration::from_secs(60));
        assert_eq!(cfg.slug_strategy(), SlugStrategy::Naive);
        assert_eq!(cfg.allowed_origins(), ["http://localhost:3000"]);
        assert!(cfg.seed_dir().is_none());
    }

    #[test]
    fn backend_is_inferred_from_database_url() {
        let pg = config(&[("DATABASE_URL", "postgres://u:p@localhost/blog")]).unwrap();
        assert_eq!(pg.storage(), StorageBackend::Postgres);

        let my = config(&[("DATABASE_URL", "mysql://u:p@localhost/blog")]).unwrap();
        assert_eq!(my.storage(), StorageBackend::MySql);
    }

    #[test]
    fn explicit_backend_wins_and_sql_requires_url() {
        let cfg = config(&[
            ("STORAGE_BACKEND", "memory"),
            ("DATABASE_URL", "postgres://localhost/blog"),
        ])
        .unwrap();
        assert_eq!(cfg.storage(), StorageBackend::Memory);

        assert!(matches!(
            config(&[("STORAGE_BACKEND", "mysql")]),
            Err(ConfigError::Missing("DATABASE_URL"))
        ));
        assert!(matches!(
            config(&[("STORAGE_BACKEND", "sqlite")]),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn lists_are_split_and_trimmed() {
        let cfg = config(&[
            ("API_KEYS", " one, two ,,three "),
            ("ALLOWED_ORIGINS", "https://a.example, https://b.example"),
        ])
        .unwrap();
        assert_eq!(cfg.api_keys(), ["one", "two", "three"]);
        assert_eq!(
            cfg.allowed_origins(),
            ["https://a.example", "https://b.example"]
        );
    }

    #[test]
    fn invalid_values_are_rejected() {
        for vars in [
            [("CACHE_TTL_SECONDS", "soon")],
            [("SESSION_TTL_SECONDS", "0")],
            [("SLUG_STRATEGY", "fancy")],
            [("API_KEY_HEADER", "bad header")],
            [("SESSION_COOKIE_NAME", "a=b")],
        ] {
            assert!(
                matches!(config(&vars), Err(ConfigError::Invalid(_))),
                "{vars:?} should be invalid"
            );
        }
    }

    #[test]
    fn zero_cache_ttl_is_allowed() {
        let cfg = config(&[("CACHE_TTL_SECONDS", "0"), ("SLUG_STRATEGY", "sanitized")]).unwrap();
        assert!(cfg.cache_ttl().is_zero());
        assert_eq!(cfg.slug_strategy(), SlugStrategy::Sanitized);
    }
}
