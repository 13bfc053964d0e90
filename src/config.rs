use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;
use thiserror::Error;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 15;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} is not in the correct format: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Process settings, read from the environment (and `.env`) at startup.
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
    pub request_timeout: Duration,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|value| !value.is_empty())
                .ok_or(ConfigError::Missing(name))
        };
        let parsed = |name: &'static str| -> Result<Option<_>, ConfigError> {
            lookup(name).map(|raw| raw.parse::<u64>().map_err(|e| invalid(name, e))).transpose()
        };

        let host = match lookup("HOST") {
            Some(raw) => raw.parse().map_err(|e| invalid("HOST", e))?,
            None => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        };
        let port = match parsed("PORT")? {
            Some(port) => u16::try_from(port).map_err(|e| invalid("PORT", e))?,
            None => DEFAULT_PORT,
        };
        let timeout_secs = parsed("REQUEST_TIMEOUT_SECS")?.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS);

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            host,
            port,
            admin_username: required("ADMIN_USERNAME")?,
            admin_password: required("ADMIN_PASSWORD")?,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::from((self.host, self.port))
    }
}

fn invalid(name: &'static str, err: impl std::fmt::Display) -> ConfigError {
    ConfigError::Invalid {
        name,
        reason: err.to_string(),
    }
}
