//! Configuration for skiff prompts.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.skiff/config.toml`
//! - Default labels, view size and key bindings for the list prompt
//! - Default options for the confirm prompt
//!
//! # Configuration File
//!
//! ```toml
//! # Color scheme: default, solarized-dark, nord, gruvbox-dark
//! color_scheme = "nord"
//!
//! [list]
//! label = "Pick a branch"
//! allow_search = true
//! view_size = 6
//!
//! [list.keys]
//! up = ["arrowup", "k", "ctrl+p"]
//! down = ["arrowdown", "j", "ctrl+n"]
//! abort = ["ctrl+c", "q"]
//!
//! [confirm]
//! default_value = false
//! ```
//!
//! Key names are the binding names of decoded keys: `enter`, `esc`,
//! `backspace`, `ctrl+<letter>`, `arrowup`/`arrowdown`/`arrowleft`/
//! `arrowright`, or the character itself.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PromptError, Result};
use crate::ui::theme::Palette;

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color scheme name
    pub color_scheme: String,
    /// List prompt settings
    pub list: ListConfig,
    /// Confirm prompt settings
    pub confirm: ConfirmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: "default".to_string(),
            list: ListConfig::default(),
            confirm: ConfirmConfig::default(),
        }
    }
}

/// List prompt settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListConfig {
    /// Text displayed above the list
    pub label: String,
    /// Enables search mode
    pub allow_search: bool,
    /// Max number of items displayed at once
    pub view_size: usize,
    pub keys: ListKeys,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            label: "Select option".to_string(),
            allow_search: true,
            view_size: 4,
            keys: ListKeys::default(),
        }
    }
}

impl ListConfig {
    pub fn validate(&self) -> Result<()> {
        if self.view_size == 0 {
            return Err(PromptError::InvalidConfig(
                "view_size must be at least 1".to_string(),
            ));
        }
        // Row arithmetic happens in terminal coordinates
        if self.view_size > usize::from(u16::MAX) {
            return Err(PromptError::InvalidConfig(format!(
                "view_size must be at most {}",
                u16::MAX
            )));
        }
        Ok(())
    }
}

/// Key bindings for the list prompt, each a set of binding names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListKeys {
    pub up: Vec<String>,
    pub down: Vec<String>,
    pub select: Vec<String>,
    pub search: Vec<String>,
    pub exit_search: Vec<String>,
    pub abort: Vec<String>,
}

impl Default for ListKeys {
    fn default() -> Self {
        Self {
            up: names(&["arrowup", "k"]),
            down: names(&["arrowdown", "j"]),
            select: names(&["enter"]),
            search: names(&["/"]),
            exit_search: names(&["esc"]),
            abort: names(&["ctrl+c"]),
        }
    }
}

/// Confirm prompt settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmConfig {
    /// Question displayed before the answer field
    pub label: String,
    pub true_option: String,
    pub false_option: String,
    pub case_sensitive: bool,
    /// An empty or unknown answer resolves to `default_value`
    pub allow_default: bool,
    pub default_value: bool,
    pub select_keys: Vec<String>,
    pub abort_keys: Vec<String>,
}

impl Default for ConfirmConfig {
    fn default() -> Self {
        Self {
            label: "Continue?".to_string(),
            true_option: "y".to_string(),
            false_option: "n".to_string(),
            case_sensitive: false,
            allow_default: true,
            default_value: true,
            select_keys: names(&["enter"]),
            abort_keys: names(&["ctrl+c"]),
        }
    }
}

impl Config {
    /// Load configuration from `~/.skiff/config.toml`, falling back to defaults
    pub fn load() -> Self {
        Self::get_config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Load configuration from a file, falling back to defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content).unwrap_or_else(|e| {
                tracing::warn!("ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }),
            Err(e) => {
                tracing::warn!("failed to read config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn from_toml_str(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Get config file path
    pub fn get_config_path() -> Option<PathBuf> {
        data_dir().map(|dir| dir.join("config.toml"))
    }

    /// Get the color palette
    pub fn get_palette(&self) -> Palette {
        Palette::by_name(&self.color_scheme)
    }
}

fn names(keys: &[&str]) -> Vec<String> {
    keys.iter().map(|k| k.to_string()).collect()
}

/// `~/.skiff`, holding the config file and the log
pub fn data_dir() -> Option<PathBuf> {
    home_dir().map(|home| home.join(".skiff"))
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE")
        .or_else(|| std::env::var_os("HOME"))
        .map(PathBuf::from)
}
