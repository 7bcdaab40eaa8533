use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} must be {expected}, got {value:?}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Settings for the outbound listings search.
#[derive(Debug, Clone)]
pub struct ListingsApiConfig {
    /// `None` keeps the server up but makes the rent estimator answer 500.
    pub api_key: Option<String>,
    pub host: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for ListingsApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            host: "realty-in-us.p.rapidapi.com".to_string(),
            base_url: "https://realty-in-us.p.rapidapi.com".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub max_workers: usize,
    pub listings: ListingsApiConfig,
    pub usage_log_path: PathBuf,
    /// Shared secret for reading the usage log. Unset disables the listing.
    pub admin_key: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            max_workers: 8,
            listings: ListingsApiConfig::default(),
            usage_log_path: PathBuf::from("data/usage-log.jsonl"),
            admin_key: None,
        }
    }
}

impl Config {
    /// Load configuration from the process environment, after reading `.env`
    /// if one is present.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a config from any name -> value lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let mut config = Config::default();

        if let Some(v) = get("BIND_ADDR") {
            config.bind_addr = parse(v, "BIND_ADDR", "a socket address like 127.0.0.1:3000")?;
        }
        if let Some(v) = get("MAX_WORKERS") {
            config.max_workers = parse(v, "MAX_WORKERS", "a positive integer")?;
            if config.max_workers == 0 {
                return Err(ConfigError::Invalid {
                    name: "MAX_WORKERS",
                    expected: "a positive integer",
                    value: "0".into(),
                });
            }
        }
        if let Some(v) = get("LISTINGS_API_HOST") {
            config.listings.host = v;
        }
        if let Some(v) = get("LISTINGS_API_BASE_URL") {
            config.listings.base_url = v;
        }
        if let Some(v) = get("LISTINGS_API_TIMEOUT_SECS") {
            let secs: u64 = parse(v, "LISTINGS_API_TIMEOUT_SECS", "a number of seconds")?;
            config.listings.timeout = Duration::from_secs(secs);
        }
        if let Some(v) = get("USAGE_LOG_PATH") {
            config.usage_log_path = PathBuf::from(v);
        }

        config.listings.api_key = get("RAPIDAPI_KEY");
        config.admin_key = get("ADMIN_KEY");

        Ok(config)
    }
}

fn parse<T: std::str::FromStr>(
    value: String,
    name: &'static str,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        name,
        expected,
        value,
    })
}
