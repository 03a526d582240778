//! Viewer configuration.
//!
//! Stored as YAML. Default location: `<config dir>/chordview/config.yaml`.
//! Every field has a default, so a partial file is fine.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Root viewer configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub font: FontConfig,
    pub layout: LayoutConfig,
    pub keys: Keybindings,
}

/// Font scaling (percent of the normal size)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontConfig {
    pub initial_percent: u32,
    pub step_percent: u32,
    /// Lower bound for "smaller"
    pub min_percent: u32,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            initial_percent: 100,
            step_percent: 10,
            min_percent: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Blank cells between the two columns in column mode
    pub column_gap: u16,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { column_gap: 4 }
    }
}

/// Key names are single characters (`"f"`, `"+"`) or named keys
/// (`"Up"`, `"Down"`, `"PageUp"`, `"PageDown"`, `"Esc"`, `"Enter"`, `"Tab"`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keybindings {
    pub bigger: Vec<String>,
    pub smaller: Vec<String>,
    pub fullscreen: Vec<String>,
    pub transpose_more: Vec<String>,
    pub transpose_less: Vec<String>,
    pub scroll_up: Vec<String>,
    pub scroll_down: Vec<String>,
    pub quit: Vec<String>,
}

impl Default for Keybindings {
    fn default() -> Self {
        Self {
            bigger: vec!["+".into(), "=".into()],
            smaller: vec!["-".into()],
            fullscreen: vec!["f".into()],
            transpose_more: vec!["]".into(), "Up".into()],
            transpose_less: vec!["[".into(), "Down".into()],
            scroll_up: vec!["PageUp".into(), "k".into()],
            scroll_down: vec!["PageDown".into(), "j".into(), " ".into()],
            quit: vec!["q".into(), "Esc".into()],
        }
    }
}

/// Default config file path, if the platform has a config directory
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("chordview").join("config.yaml"))
}

impl ViewerConfig {
    /// Read the config at `path`. Anything short of a valid file (missing,
    /// unreadable, bad YAML) falls back to the defaults.
    pub fn load(path: &Path) -> Self {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("No config at {:?}, using defaults", path);
                return Self::default();
            }
            Err(e) => {
                log::warn!("Can't read config {:?} ({}), using defaults", path, e);
                return Self::default();
            }
        };

        serde_yaml::from_str(&text).unwrap_or_else(|e| {
            log::warn!("Bad config {:?} ({}), using defaults", path, e);
            Self::default()
        })
    }

    /// Write as YAML, creating the config directory if needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
        }
        let yaml = serde_yaml::to_string(self).context("serializing config")?;
        fs::write(path, yaml).with_context(|| format!("writing {}", path.display()))?;
        log::info!("Saved config to {:?}", path);
        Ok(())
    }
}
