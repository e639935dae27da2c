use std::env;
use std::time::Duration;

use anyhow::{Result, bail};

use crate::transport::{OPENROUTER_API_URL, REQUEST_TIMEOUT};

/// Bearer credential for the chat-completion API
pub const API_KEY_ENV: &str = "OPENROUTER_API_KEY";
/// Optional endpoint override
pub const API_URL_ENV: &str = "DEVPILOT_API_URL";

/// Process-wide settings, resolved once at startup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// `None` when the variable is unset or blank; requests are refused then
    pub api_key: Option<String>,
    pub api_url: String,
    pub timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self { api_key: None, api_url: OPENROUTER_API_URL.to_string(), timeout: REQUEST_TIMEOUT }
    }
}

impl Config {
    /// Read the configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build the configuration from any variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty());

        let mut config = Self { api_key, ..Self::default() };
        if let Some(url) = lookup(API_URL_ENV).filter(|url| !url.trim().is_empty()) {
            config = config.with_api_url(url)?;
        }
        Ok(config)
    }

    /// Override the endpoint; only http(s) URLs are accepted
    pub fn with_api_url(mut self, url: impl Into<String>) -> Result<Self> {
        let url = url.into().trim().to_string();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            bail!("API URL must start with http:// or https:// (got '{}')", url);
        }
        self.api_url = url;
        Ok(self)
    }
}
