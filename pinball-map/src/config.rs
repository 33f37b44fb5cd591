//! Explicit configuration for the Pinball Map client.
//!
//! Nothing here is compiled in: the host and version default to the public
//! API, credentials must always be supplied by the caller.

use std::fmt;

use thiserror::Error;

pub const DEFAULT_HOST: &str = "pinballmap.com";
pub const SUPPORTED_VERSION: u32 = 1;

const HOST_VAR: &str = "PINBALL_MAP_HOST";
const SCHEME_VAR: &str = "PINBALL_MAP_SCHEME";
const VERSION_VAR: &str = "PINBALL_MAP_API_VERSION";
const LOGIN_VAR: &str = "PINBALL_MAP_LOGIN";
const PASSWORD_VAR: &str = "PINBALL_MAP_PASSWORD";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },

    #[error("unsupported API version {0}; only v1 is available")]
    UnsupportedVersion(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinballMapConfig {
    pub host: String,
    pub scheme: String,
    pub version: u32,
}

impl Default for PinballMapConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            scheme: netkit_core::DEFAULT_SCHEME.to_string(),
            version: SUPPORTED_VERSION,
        }
    }
}

impl PinballMapConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        if let Some(host) = lookup(HOST_VAR) {
            config.host = host;
        }
        if let Some(scheme) = lookup(SCHEME_VAR) {
            config.scheme = scheme;
        }
        if let Some(version) = lookup(VERSION_VAR) {
            config.version = version.trim().parse().map_err(|_| ConfigError::Invalid {
                key: VERSION_VAR,
                value: version.clone(),
            })?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version != SUPPORTED_VERSION {
            return Err(ConfigError::UnsupportedVersion(self.version));
        }
        Ok(())
    }
}

/// Login and password for `auth_details`.
#[derive(Clone)]
pub struct Credentials {
    pub login: String,
    password: String,
}

impl Credentials {
    pub fn new(login: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            login: login.into(),
            password: password.into(),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let login = lookup(LOGIN_VAR).ok_or(ConfigError::Missing(LOGIN_VAR))?;
        let password = lookup(PASSWORD_VAR).ok_or(ConfigError::Missing(PASSWORD_VAR))?;
        Ok(Self::new(login, password))
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("login", &self.login)
            .field("password", &"<redacted>")
            .finish()
    }
}
