//! JSON config file: key bindings and theme name.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::input::{KeyBindings, KeyConfig};

pub const DEFAULT_THEME: &str = "modern";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub keys: KeyConfig,
    pub theme: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            keys: KeyConfig::default(),
            theme: DEFAULT_THEME.to_string(),
        }
    }
}

impl Config {
    /// Validated bindings for this config, or the defaults if the bindings are invalid.
    pub fn bindings(&self) -> KeyBindings {
        self.clone().settle_bindings()
    }

    /// Like [`Config::bindings`], but also resets invalid `keys` to the defaults so
    /// later edits start from a valid table.
    pub fn settle_bindings(&mut self) -> KeyBindings {
        match KeyBindings::from_config(&self.keys) {
            Ok(bindings) => bindings,
            Err(err) => {
                warn!(error = %err, "falling back to default key bindings");
                self.keys = KeyConfig::default();
                KeyBindings::default()
            }
        }
    }
}

/// Read the config at `path`.
///
/// A missing file is created with the defaults. An unreadable or malformed file is
/// left alone and the defaults are returned.
pub fn load_config(path: &Path) -> Config {
    if !path.exists() {
        let config = Config::default();
        match save_config(path, &config) {
            Ok(()) => info!(path = %path.display(), "wrote default config"),
            Err(err) => warn!(path = %path.display(), error = %err, "could not write default config"),
        }
        return config;
    }

    match read_config(path) {
        Ok(config) => config,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "using default config");
            Config::default()
        }
    }
}

fn read_config(path: &Path) -> Result<Config> {
    let text =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(path: &Path, config: &Config) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("create {}", parent.display()))?;
    }
    let text = serde_json::to_string_pretty(config)?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}
