//! Buffer configuration
//!
//! Loaded from TOML, with `CBUFFER_*` environment variables taking precedence
//! over file values.

use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Default config file looked up in the working directory
pub const DEFAULT_CONFIG_FILE: &str = "cbuffer.toml";

pub const ENV_CAPACITY: &str = "CBUFFER_CAPACITY";
pub const ENV_LOG: &str = "CBUFFER_LOG";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RingConfig {
    /// Usable capacity in samples
    pub capacity: usize,
    /// `tracing` filter directive, e.g. `"cbuffer=debug"`
    pub log_filter: Option<String>,
}

impl Default for RingConfig {
    fn default() -> Self {
        Self {
            capacity: 1024,
            log_filter: None,
        }
    }
}

impl RingConfig {
    pub fn load(path: Option<&str>) -> Result<Self> {
        Self::load_with(path, Path::new(DEFAULT_CONFIG_FILE), |key| {
            std::env::var(key).ok()
        })
    }

    /// Same as [`RingConfig::load`], with the fallback file and the override
    /// source supplied by the caller. `fallback` is only read when `path` is
    /// `None`; if it cannot be read, defaults are used.
    pub fn load_with<F>(path: Option<&str>, fallback: &Path, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)
                    .with_context(|| format!("Failed to read config from {}", p))?;
                Self::from_toml(&content)?
            }
            None => match std::fs::read_to_string(fallback) {
                Ok(content) => Self::from_toml(&content)
                    .with_context(|| format!("Invalid config in {}", fallback.display()))?,
                Err(_) => {
                    tracing::debug!(path = %fallback.display(), "No config file found, using defaults");
                    Self::default()
                }
            },
        };

        config.apply_overrides(lookup);
        config.validate()?;
        Ok(config)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse config")
    }

    /// Apply overrides from `lookup`, keyed by the `CBUFFER_*` variable names.
    /// Values that do not parse are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(capacity) = lookup(ENV_CAPACITY) {
            match capacity.parse::<usize>() {
                Ok(n) => self.capacity = n,
                Err(_) => tracing::warn!(value = %capacity, "ignoring unparsable {}", ENV_CAPACITY),
            }
        }
        if let Some(filter) = lookup(ENV_LOG) {
            self.log_filter = Some(filter);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.capacity == 0 {
            bail!("capacity must be at least 1 sample");
        }
        if self.capacity == usize::MAX {
            bail!("capacity {} leaves no room for the sentinel slot", self.capacity);
        }
        Ok(())
    }
}
