// File: src/config.rs
// Handles configuration loading, saving, and defaults.
use crate::context::AppContext;
use crate::storage::LocalStorage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;

fn default_true() -> bool {
    true
}

#[derive(Deserialize, Serialize, Clone, Debug)]
pub struct Config {
    /// Whether the list view includes completed tasks.
    #[serde(default)]
    pub show_completed: bool,

    /// Populate the item store with a few sample items on first launch.
    #[serde(default = "default_true")]
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_completed: false,
            // Match the serde defaults
            seed_demo_data: true,
        }
    }
}

impl Config {
    /// Loads the configuration, falling back to defaults when the file
    /// does not exist yet. Parse and IO failures are real errors.
    pub fn load(ctx: &dyn AppContext) -> Result<Self> {
        let path = ctx.get_config_file_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path).map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;

        let config: Config = toml::from_str(&contents).map_err(|e| {
            anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e)
        })?;

        Ok(config)
    }

    pub fn save(&self, ctx: &dyn AppContext) -> Result<()> {
        let path = ctx.get_config_file_path()?;
        LocalStorage::with_lock(&path, || {
            let toml_str = toml::to_string_pretty(self)?;
            LocalStorage::atomic_write(&path, toml_str)?;
            Ok(())
        })?;
        Ok(())
    }
}
