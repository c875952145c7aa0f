//! CLI settings: optional TOML file layered under `SLOTS_*` environment variables.

use std::path::Path;

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use slot_engine::dst::DstPolicy;

/// Settings file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "slots.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Timezone for snapshots that do not name one.
    pub timezone: String,
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub log_level: String,
    pub dst_policy: DstPolicy,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timezone: "UTC".to_string(),
            log_level: "warn".to_string(),
            dst_policy: DstPolicy::ShiftForward,
        }
    }
}

impl Settings {
    /// Load settings from `path` (required if given) or `slots.toml` (optional),
    /// then apply `SLOTS_TIMEZONE`, `SLOTS_LOG_LEVEL`, `SLOTS_DST_POLICY`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(p) => File::from(p).required(true),
            None => File::with_name(DEFAULT_CONFIG_FILE).required(false),
        };

        Config::builder()
            .add_source(file)
            .add_source(Environment::with_prefix("SLOTS"))
            .build()
            .context("Failed to load settings")?
            .try_deserialize()
            .context("Invalid settings")
    }
}
