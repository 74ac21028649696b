#![warn(clippy::unwrap_in_result)]
#![warn(clippy::unwrap_used)]

pub mod config;
pub mod progress;

pub use config::{Config, ConfigError, base_url_from_env, base_url_from_lookup};
pub use progress::Progress;

/// Public host of the SIT-MC temporary file server.
pub const DEFAULT_BASE_URL: &str = "https://temp.sitmc.club";

/// Environment variable holding the `Authorization` header value.
pub const AUTH_ENV: &str = "SITMC_TEMP_SERVER_AUTH";

/// Environment variable overriding [`DEFAULT_BASE_URL`].
pub const BASE_URL_ENV: &str = "SITMC_TEMP_SERVER_URL";

/// Environment variable overriding the request timeout, in whole seconds.
pub const TIMEOUT_ENV: &str = "SITMC_TEMP_SERVER_TIMEOUT";

/// Request timeout used when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;
