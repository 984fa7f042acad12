//! Client configuration parsed from environment variables.
//!
//! Values are read through a lookup closure so tests can feed a map instead
//! of mutating the process environment.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

pub const API_BASE_URL_VAR: &str = "SHORTLINK_API_BASE_URL";
pub const PUBLIC_BASE_URL_VAR: &str = "SHORTLINK_PUBLIC_BASE_URL";
pub const REQUEST_TIMEOUT_VAR: &str = "SHORTLINK_REQUEST_TIMEOUT_SECS";
pub const CONNECT_TIMEOUT_VAR: &str = "SHORTLINK_CONNECT_TIMEOUT_SECS";

/// Errors produced while building a [`ClientConfig`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A base address did not parse as an absolute `http(s)` URL.
    #[error("invalid base URL in {source_name}: {value:?}")]
    InvalidBaseUrl { source_name: &'static str, value: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self { request_secs: DEFAULT_REQUEST_TIMEOUT_SECS, connect_secs: DEFAULT_CONNECT_TIMEOUT_SECS }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Address the API client talks to, without a trailing slash.
    pub api_base_url: String,
    /// Address shown to users in short links, without a trailing slash.
    pub public_base_url: String,
    pub timeouts: Timeouts,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            public_base_url: DEFAULT_API_BASE_URL.to_owned(),
            timeouts: Timeouts::default(),
        }
    }
}

impl ClientConfig {
    /// Build typed client config from environment variables.
    ///
    /// Optional:
    /// - `SHORTLINK_API_BASE_URL`: default `http://localhost:3000`
    /// - `SHORTLINK_PUBLIC_BASE_URL`: defaults to the API base
    /// - `SHORTLINK_REQUEST_TIMEOUT_SECS`: default 30
    /// - `SHORTLINK_CONNECT_TIMEOUT_SECS`: default 10
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if either base is not an absolute URL.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`ClientConfig::from_env`] with an injectable variable source.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if either base is not an absolute URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_raw = lookup(API_BASE_URL_VAR).unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());
        let api_base_url = normalize_base_url(API_BASE_URL_VAR, &api_raw)?;
        let public_base_url = match lookup(PUBLIC_BASE_URL_VAR) {
            Some(raw) => normalize_base_url(PUBLIC_BASE_URL_VAR, &raw)?,
            None => api_base_url.clone(),
        };
        let timeouts = Timeouts {
            request_secs: parse_u64(lookup(REQUEST_TIMEOUT_VAR), DEFAULT_REQUEST_TIMEOUT_SECS),
            connect_secs: parse_u64(lookup(CONNECT_TIMEOUT_VAR), DEFAULT_CONNECT_TIMEOUT_SECS),
        };
        Ok(Self { api_base_url, public_base_url, timeouts })
    }

    /// Apply command-line overrides on top of the environment values.
    ///
    /// Overriding only the API base also moves the public base when the
    /// public base was not set on its own.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if an override is not an absolute URL.
    pub fn with_overrides(mut self, api_base_url: Option<&str>, public_base_url: Option<&str>) -> Result<Self, ConfigError> {
        let public_followed_api = self.public_base_url == self.api_base_url;
        if let Some(raw) = api_base_url {
            self.api_base_url = normalize_base_url("--api-base-url", raw)?;
            if public_followed_api {
                self.public_base_url = self.api_base_url.clone();
            }
        }
        if let Some(raw) = public_base_url {
            self.public_base_url = normalize_base_url("--public-base-url", raw)?;
        }
        Ok(self)
    }
}

/// Trim whitespace and trailing slashes, then require an absolute `http(s)` URL.
pub(crate) fn normalize_base_url(source_name: &'static str, raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let invalid = || ConfigError::InvalidBaseUrl { source_name, value: raw.to_owned() };
    let parsed = url::Url::parse(trimmed).map_err(|_| invalid())?;
    if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
        return Err(invalid());
    }
    Ok(trimmed.to_owned())
}

fn parse_u64(raw: Option<String>, default: u64) -> u64 {
    raw.and_then(|v| v.trim().parse::<u64>().ok())
        .filter(|v| *v > 0)
        .unwrap_or(default)
}
