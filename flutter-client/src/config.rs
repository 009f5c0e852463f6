use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

pub const ENV_PREFIX: &str = "FLUTTER_";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Error parsing .env file: {0}")]
    Dotenv(#[from] dotenvy::Error),
    #[error("Error parsing environment: {0}")]
    Envy(#[from] envy::Error),
    #[error("Error building the HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error("Error resolving an endpoint against the base URL: {0}")]
    Endpoint(#[from] url::ParseError),
}

/// Settings of the HTTP post service, read from `FLUTTER_*` variables.
#[derive(Clone, Eq, PartialEq, Debug, Deserialize)]
pub struct ClientEnv {
    pub api_base_url: Url,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

fn default_request_timeout_secs() -> u64 {
    DEFAULT_REQUEST_TIMEOUT_SECS
}

impl ClientEnv {
    /// Reads the process environment, after loading a `.env` file if there is one.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if e.not_found() {
                debug!("No .dotenv file found");
            } else {
                return Err(e.into());
            }
        }

        envy::prefixed(ENV_PREFIX)
            .from_env()
            .map_err(ConfigError::from)
    }

    pub fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(ENV_PREFIX)
            .from_iter(vars)
            .map_err(ConfigError::from)
    }

    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
