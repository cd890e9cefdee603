use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::content::application::services::content_cache::{CacheSettings, DEFAULT_CACHE_KEY};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is not set")]
    Missing(&'static str),

    #[error("Invalid {name} value: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// Where content is read from and written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentBackend {
    Supabase,
    Memory,
}

impl FromStr for ContentBackend {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "supabase" => Ok(ContentBackend::Supabase),
            "memory" => Ok(ContentBackend::Memory),
            _ => Err(()),
        }
    }
}

/// Where the cache entry is persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheBackend {
    Memory,
    File { dir: PathBuf },
    Redis { url: String },
}

#[derive(Debug, Clone)]
pub struct SupabaseConfig {
    pub url: String,
    pub anon_key: String,
}

/// Login accepted by the in-memory auth provider.
#[derive(Clone)]
pub struct DevAdmin {
    pub email: String,
    pub password: String,
}

impl std::fmt::Debug for DevAdmin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DevAdmin")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub content_backend: ContentBackend,
    pub supabase: Option<SupabaseConfig>,
    pub dev_admin: Option<DevAdmin>,
    pub cache_backend: CacheBackend,
    pub cache: CacheSettings,
    pub init_timeout: Duration,
}

impl AppConfig {
    /// Load `.env.{RUST_ENV}` (falling back to `.env`), then read the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let rust_env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        let env_file = format!(".env.{}", rust_env);
        if dotenvy::from_filename(&env_file).is_err() {
            dotenvy::dotenv().ok();
        }

        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let host = var("HOST").unwrap_or_else(|| "127.0.0.1".to_string());
        let port = parse_or("PORT", var("PORT"), 8080u16)?;

        let content_backend = match var("CONTENT_BACKEND") {
            Some(value) => ContentBackend::from_str(&value).map_err(|_| ConfigError::Invalid {
                name: "CONTENT_BACKEND",
                value,
            })?,
            None => ContentBackend::Supabase,
        };

        let supabase = match content_backend {
            ContentBackend::Supabase => Some(SupabaseConfig {
                url: var("SUPABASE_URL").ok_or(ConfigError::Missing("SUPABASE_URL"))?,
                anon_key: var("SUPABASE_ANON_KEY")
                    .ok_or(ConfigError::Missing("SUPABASE_ANON_KEY"))?,
            }),
            ContentBackend::Memory => None,
        };

        let dev_admin = match (var("DEV_ADMIN_EMAIL"), var("DEV_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) if content_backend == ContentBackend::Memory => {
                Some(DevAdmin { email, password })
            }
            _ => None,
        };

        let cache_backend = match var("CACHE_BACKEND").as_deref().map(str::to_ascii_lowercase) {
            None => CacheBackend::Memory,
            Some(kind) if kind == "memory" => CacheBackend::Memory,
            Some(kind) if kind == "file" => CacheBackend::File {
                dir: var("CACHE_DIR")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(".cache")),
            },
            Some(kind) if kind == "redis" => CacheBackend::Redis {
                url: var("REDIS_URL").ok_or(ConfigError::Missing("REDIS_URL"))?,
            },
            Some(kind) => {
                return Err(ConfigError::Invalid {
                    name: "CACHE_BACKEND",
                    value: kind,
                })
            }
        };

        let cache = CacheSettings {
            key: var("CACHE_KEY").unwrap_or_else(|| DEFAULT_CACHE_KEY.to_string()),
            ttl: Duration::from_secs(parse_or("CACHE_TTL_SECS", var("CACHE_TTL_SECS"), 900u64)?),
        };
        let init_timeout =
            Duration::from_secs(parse_or("INIT_TIMEOUT_SECS", var("INIT_TIMEOUT_SECS"), 10u64)?);

        Ok(Self {
            host,
            port,
            content_backend,
            supabase,
            dev_admin,
            cache_backend,
            cache,
            init_timeout,
        })
    }

    pub fn server_url(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
