//
//  drone-client
//  config/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Configuration Module
//!
//! Connection settings a [`DroneClient`](crate::api::DroneClient) can be
//! built from, loaded from a TOML file and overridden from the environment.
//!
//! ## Configuration File Location
//!
//! - **Linux**: `~/.config/drone/config.toml`
//! - **macOS**: `~/Library/Application Support/drone/config.toml`
//! - **Windows**: `C:\Users\<User>\AppData\Roaming\drone\config.toml`
//!
//! ## Example Configuration File
//!
//! ```toml
//! server = "https://drone.example.com"
//! token = "my-token"
//! legacy = false
//! timeout_secs = 30
//! ```
//!
//! ## Environment Overrides
//!
//! | Variable | Setting |
//! |----------|---------|
//! | `DRONE_SERVER` | `server` |
//! | `DRONE_TOKEN` | `token` |
//! | `DRONE_LEGACY` | `legacy` (`1`, `true` or `yes`) |
//!
//! ## Usage
//!
//! ```rust,no_run
//! use drone_client::api::DroneClient;
//! use drone_client::config::Settings;
//!
//! let settings = Settings::load()?.apply_env();
//! let client = DroneClient::from_settings(&settings)?;
//! # Ok::<(), anyhow::Error>(())
//! ```
//!
//! ## Submodules
//!
//! - [`file`]: Low-level configuration file I/O operations
//! - [`hosts`]: Server URL normalization

mod file;
mod hosts;

pub use file::*;
pub use hosts::*;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`Settings::server`].
pub const ENV_SERVER: &str = "DRONE_SERVER";

/// Environment variable overriding [`Settings::token`].
pub const ENV_TOKEN: &str = "DRONE_TOKEN";

/// Environment variable overriding [`Settings::legacy`].
pub const ENV_LEGACY: &str = "DRONE_LEGACY";

/// Connection settings for one Drone server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Server URL. `http://` is assumed when no scheme is given.
    #[serde(default = "default_server")]
    pub server: String,

    /// API token. `None` means unauthenticated calls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,

    /// Talk to a 0.4 server.
    #[serde(default)]
    pub legacy: bool,

    /// Per-request timeout in seconds. `None` disables it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

fn default_server() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            server: default_server(),
            token: None,
            legacy: false,
            timeout_secs: None,
        }
    }
}

impl Settings {
    /// Loads settings from the default location, or defaults when the file
    /// does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Loads settings from `path`, or defaults when the file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !config_exists(path) {
            return Ok(Self::default());
        }

        let content = read_config_file(path)?;
        let mut settings: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        settings.server = normalize_server(&settings.server);
        Ok(settings)
    }

    /// Writes settings to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        write_config_file(path, &content)
    }

    /// Overrides settings from `DRONE_SERVER`, `DRONE_TOKEN` and
    /// `DRONE_LEGACY`.
    pub fn apply_env(self) -> Self {
        self.apply_vars(|name| std::env::var(name).ok())
    }

    /// Overrides settings from an arbitrary variable lookup.
    pub fn apply_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(server) = lookup(ENV_SERVER).filter(|s| !s.trim().is_empty()) {
            self.server = normalize_server(&server);
        }
        if let Some(token) = lookup(ENV_TOKEN) {
            self.token = Some(token).filter(|t| !t.is_empty());
        }
        if let Some(legacy) = lookup(ENV_LEGACY) {
            self.legacy = parse_flag(&legacy);
        }
        self
    }

    /// Path of the configuration file.
    pub fn config_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("", "", "drone")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("config.toml"))
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}
