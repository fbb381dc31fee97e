//! Configuration management.
//!
//! Two layers:
//!
//! - `Config`: the mail settings, read from a JSON file only when a
//!   notification actually has to go out. Keys `From`, `To`, `usr` and `pwd`
//!   are required; `smtp_host` and `smtp_port` default to Gmail's relay.
//! - `Settings`: where the config and cache files live and which lookup
//!   service to ask, taken from `IPWATCH_*` environment variables.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::api::DEFAULT_LOOKUP_URL;

/// Default SMTP relay
pub const DEFAULT_SMTP_HOST: &str = "smtp.gmail.com";

/// Default SMTP submission port (STARTTLS)
pub const DEFAULT_SMTP_PORT: u16 = 587;

/// Config file name, relative to the working directory
const DEFAULT_CONFIG_FILE: &str = "conf.json";

/// Cache file name, relative to the working directory
const DEFAULT_CACHE_FILE: &str = "cache.txt";

const CONFIG_ENV: &str = "IPWATCH_CONFIG";
const CACHE_ENV: &str = "IPWATCH_CACHE";
const LOOKUP_URL_ENV: &str = "IPWATCH_LOOKUP_URL";

fn default_smtp_host() -> String {
    DEFAULT_SMTP_HOST.to_string()
}

fn default_smtp_port() -> u16 {
    DEFAULT_SMTP_PORT
}

#[derive(Clone, Deserialize)]
pub struct Config {
    #[serde(rename = "From")]
    pub from: String,
    #[serde(rename = "To")]
    pub to: String,
    #[serde(rename = "usr")]
    pub username: String,
    #[serde(rename = "pwd")]
    pub password: String,
    #[serde(default = "default_smtp_host")]
    pub smtp_host: String,
    #[serde(default = "default_smtp_port")]
    pub smtp_port: u16,
}

// Keep the password out of logs
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .finish()
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub config_path: PathBuf,
    pub cache_path: PathBuf,
    pub lookup_url: String,
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve settings through `lookup`; unset or empty values use defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            config_path: get(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE)),
            cache_path: get(CACHE_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CACHE_FILE)),
            lookup_url: get(LOOKUP_URL_ENV).unwrap_or_else(|| DEFAULT_LOOKUP_URL.to_string()),
        }
    }
}
