use crate::util::secret::generate_session_secret;
use dotenv::dotenv;
use log::warn;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SESSION_MAX_AGE: i64 = 86_400;
/// One year.
const MAX_SESSION_MAX_AGE: i64 = 31_536_000;
const DEFAULT_POOL_MAX_SIZE: usize = 16;
const DEFAULT_POOL_TIMEOUT_SECS: u64 = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{key} has an invalid value: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_pool_max_size: usize,
    pub database_pool_timeout: Duration,
    pub session_secret: String,
    pub session_max_age: i64,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn init() -> Result<Config, ConfigError> {
        dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup. Empty values
    /// count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let session_secret = match get("SESSION_SECRET") {
            Some(secret) => secret,
            None => {
                warn!("SESSION_SECRET is not set, generated a random one. Sessions will not survive a restart.");
                generate_session_secret()
            }
        };

        let session_max_age = parse_or(
            "SESSION_MAX_AGE",
            get("SESSION_MAX_AGE"),
            DEFAULT_SESSION_MAX_AGE,
        )?;
        if session_max_age <= 0 || session_max_age > MAX_SESSION_MAX_AGE {
            return Err(ConfigError::Invalid {
                key: "SESSION_MAX_AGE",
                value: session_max_age.to_string(),
            });
        }

        let pool_timeout_secs = parse_or(
            "DATABASE_POOL_TIMEOUT_SECS",
            get("DATABASE_POOL_TIMEOUT_SECS"),
            DEFAULT_POOL_TIMEOUT_SECS,
        )?;

        Ok(Config {
            database_url,
            database_pool_max_size: parse_or(
                "DATABASE_POOL_MAX_SIZE",
                get("DATABASE_POOL_MAX_SIZE"),
                DEFAULT_POOL_MAX_SIZE,
            )?,
            database_pool_timeout: Duration::from_secs(pool_timeout_secs),
            session_secret,
            session_max_age,
            host: get("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: parse_or("PORT", get("PORT"), DEFAULT_PORT)?,
        })
    }
}

fn parse_or<T: FromStr>(key: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError> {
    match raw {
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    pub fn for_tests() -> Config {
        Config {
            database_url: "postgres://localhost/league_test".to_string(),
            database_pool_max_size: 1,
            database_pool_timeout: Duration::from_secs(1),
            session_secret: "test-session-secret".to_string(),
            session_max_age: 3600,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}
