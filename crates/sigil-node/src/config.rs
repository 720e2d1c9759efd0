//! Node configuration types.

use anyhow::Context;
use serde::{Deserialize, Serialize};
use sigil_auth::{App, HasherParams};
use std::path::Path;

/// Configuration for the Sigil node.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// API listen address.
    pub listen_addr: String,
    /// Lifetime of issued tokens, in seconds.
    pub token_ttl_secs: u64,
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
    /// Log output format (pretty or json).
    pub log_format: String,
    /// Password hasher work factor.
    pub hasher: HasherParams,
    /// Pre-provisioned app records.
    pub apps: Vec<AppRecord>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: "127.0.0.1:8080".to_string(),
            token_ttl_secs: 3600,
            log_level: "info".to_string(),
            log_format: "pretty".to_string(),
            hasher: HasherParams::default(),
            apps: Vec::new(),
        }
    }
}

impl Config {
    /// Loads configuration from a YAML file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: Self = serde_yaml::from_str(&raw)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        Ok(config)
    }
}

/// A pre-provisioned app, seeded into the account store at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppRecord {
    /// Unique app id.
    pub id: i64,
    /// Human-readable name.
    pub name: String,
    /// Token-signing secret.
    pub secret: String,
}

impl From<AppRecord> for App {
    fn from(record: AppRecord) -> Self {
        App {
            id: record.id,
            name: record.name,
            secret: record.secret,
        }
    }
}
