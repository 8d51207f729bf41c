//! Startup configuration
//!
//! Read once from `~/.formrelay/config.yaml`, then overridden by
//! `FORMRELAY_*` environment variables. Read-only afterwards.

use anyhow::{bail, Context, Result};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::constants::{CONFIG_DIR_NAME, CONFIG_FILE_NAME, DEFAULT_ENDPOINT, DEFAULT_EXTRA_FIELDS};
use crate::models::Locale;

/// Keys of the required fields; extra fields may not reuse them
const RESERVED_FIELDS: &[&str] = &["name", "email", "message"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub endpoint: String,
    pub locale: Locale,
    pub timeout_secs: Option<u64>,
    pub extra_fields: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            locale: Locale::En,
            timeout_secs: None,
            extra_fields: DEFAULT_EXTRA_FIELDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// `~/.formrelay`, or `./.formrelay` when there is no home directory
pub fn config_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

impl AppConfig {
    /// Load the config file (if any) and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::from_file(&config_dir().join(CONFIG_FILE_NAME))?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Missing file means defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        Self::from_yaml_str(&content).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(endpoint) = lookup("FORMRELAY_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(locale) = lookup("FORMRELAY_LOCALE") {
            self.locale = locale.parse()?;
        }
        if let Some(secs) = lookup("FORMRELAY_TIMEOUT_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .with_context(|| format!("invalid FORMRELAY_TIMEOUT_SECS: {}", secs))?;
            self.timeout_secs = if secs == 0 { None } else { Some(secs) };
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.endpoint_url()?;
        let mut seen: Vec<&str> = Vec::new();
        for field in &self.extra_fields {
            let key = field.trim();
            if key.is_empty() {
                bail!("extra_fields contains an empty name");
            }
            if RESERVED_FIELDS.contains(&key) {
                bail!("extra field `{}` clashes with a required field", key);
            }
            if seen.contains(&key) {
                bail!("extra field `{}` is listed twice", key);
            }
            seen.push(key);
        }
        Ok(())
    }

    pub fn endpoint_url(&self) -> Result<Url> {
        let url = Url::parse(self.endpoint.trim())
            .with_context(|| format!("invalid endpoint URL: {}", self.endpoint))?;
        if !matches!(url.scheme(), "http" | "https") {
            bail!("endpoint must be http or https, got {}", url.scheme());
        }
        Ok(url)
    }

    pub fn timeout(&self) -> Option<Duration> {
        // 0 means no timeout, same as the env override
        self.timeout_secs.filter(|&secs| secs > 0).map(Duration::from_secs)
    }
}
