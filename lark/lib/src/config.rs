//! Client configuration from the environment.

use std::time::Duration;

use url::Url;

use crate::client::DEFAULT_TIMEOUT_SECS;
use crate::error::ConfigError;

/// Open platform host used when `LARK_BASE_URL` is unset.
pub const DEFAULT_BASE_URL: &str = "https://open.feishu.cn";

pub const BASE_URL_ENV: &str = "LARK_BASE_URL";
pub const TIMEOUT_ENV: &str = "LARK_TIMEOUT_SECS";

/// Settings an [`ApiClient`](crate::ApiClient) is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: Url,
    pub timeout: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ClientConfig {
    /// Reads `LARK_BASE_URL` and `LARK_TIMEOUT_SECS`.
    ///
    /// Unset or empty variables fall back to the defaults.
    ///
    /// ## Errors
    ///
    /// [`ConfigError::InvalidEnv`] when a variable is set to something
    /// unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(raw) = env_value(BASE_URL_ENV) {
            config.base_url = Url::parse(&raw).map_err(|e| ConfigError::InvalidEnv {
                var: BASE_URL_ENV,
                message: e.to_string(),
            })?;
        }

        if let Some(raw) = env_value(TIMEOUT_ENV) {
            let secs: u64 = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                var: TIMEOUT_ENV,
                message: format!("expected whole seconds, got '{raw}'"),
            })?;
            if secs == 0 {
                return Err(ConfigError::InvalidEnv {
                    var: TIMEOUT_ENV,
                    message: "timeout must be positive".to_string(),
                });
            }
            config.timeout = Duration::from_secs(secs);
        }

        Ok(config)
    }
}

fn env_value(var: &str) -> Option<String> {
    std::env::var(var).ok().filter(|v| !v.trim().is_empty())
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is valid")
}
