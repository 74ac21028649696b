use std::fmt;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::{AUTH_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS, TIMEOUT_ENV};

/// Errors raised while assembling a [`Config`].
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("authorization token is not set, export {var}")]
    MissingToken { var: &'static str },
    #[error("authorization token contains characters not allowed in an HTTP header")]
    InvalidToken,
    #[error("invalid base url `{url}`: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("base url `{url}` must use http or https")]
    UnsupportedScheme { url: String },
    #[error("invalid timeout `{value}`, expected a positive number of seconds")]
    InvalidTimeout { value: String },
}

/// Connection settings of the remote file client.
///
/// A config is immutable once built. The token is the raw value sent in the
/// `Authorization` header of every admin request.
#[derive(Clone)]
pub struct Config {
    base_url: Url,
    token: String,
    timeout: Duration,
}

impl Config {
    /// Creates a config for the public server with the default timeout.
    pub fn new(token: impl Into<String>) -> Result<Self, ConfigError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(ConfigError::MissingToken { var: AUTH_ENV });
        }
        if !token.chars().all(|c| c == '\t' || (' '..='~').contains(&c)) {
            return Err(ConfigError::InvalidToken);
        }
        Ok(Self {
            base_url: parse_base_url(DEFAULT_BASE_URL)?,
            token,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        })
    }

    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ConfigError> {
        self.base_url = parse_base_url(base_url)?;
        Ok(self)
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Reads the config from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds the config from any variable source, `lookup` returns `None`
    /// for unset variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let token = lookup(AUTH_ENV).ok_or(ConfigError::MissingToken { var: AUTH_ENV })?;
        let mut config = Self::new(token)?;

        config.base_url = base_url_from_lookup(&lookup)?;

        if let Some(value) = lookup(TIMEOUT_ENV).filter(|t| !t.trim().is_empty()) {
            let secs = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|s| *s > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    value: value.clone(),
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    #[must_use]
    pub fn token(&self) -> &str {
        &self.token
    }

    #[must_use]
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Server base URL from `SITMC_TEMP_SERVER_URL`, or the public server when
/// unset. Needs no token.
pub fn base_url_from_env() -> Result<Url, ConfigError> {
    base_url_from_lookup(&|name: &str| std::env::var(name).ok())
}

pub fn base_url_from_lookup<F>(lookup: &F) -> Result<Url, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
        Some(url) => parse_base_url(url.trim()),
        None => parse_base_url(DEFAULT_BASE_URL),
    }
}

fn parse_base_url(url: &str) -> Result<Url, ConfigError> {
    let parsed = Url::parse(url).map_err(|source| ConfigError::InvalidBaseUrl {
        url: url.to_string(),
        source,
    })?;
    match parsed.scheme() {
        "http" | "https" => Ok(parsed),
        _ => Err(ConfigError::UnsupportedScheme {
            url: url.to_string(),
        }),
    }
}
