//! Application configuration
//!
//! Read once at startup from `config.json` in the platform config directory:
//! - macOS: ~/Library/Application Support/impactviz/
//! - Linux: ~/.config/impactviz/
//! - Windows: %APPDATA%\impactviz\config\
//!
//! Values stay fixed for the lifetime of the process.

use anyhow::{Context, Result};
use bevy::prelude::*;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const API_URL_ENV: &str = "IMPACTVIZ_API_URL";
/// The service rejects multi-impact requests with more asteroids than this.
pub const ASTEROID_LIMIT: usize = 5;

#[derive(Resource, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub close_approach_refresh_secs: u64,
    /// Upper bound on scenario entries, 1..=5.
    pub max_asteroids: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:5000".to_string(),
            request_timeout_secs: 10,
            close_approach_refresh_secs: 5 * 60,
            max_asteroids: 3,
        }
    }
}

impl AppConfig {
    /// Load from the platform config dir, falling back to defaults when the
    /// file is absent or unreadable. The env override is applied last.
    pub fn load() -> Self {
        let mut config = match Self::default_path() {
            Some(path) => match Self::load_from(&path) {
                Ok(config) => config,
                Err(err) => {
                    warn!("[CONFIG] {:#}; using defaults", err);
                    Self::default()
                }
            },
            None => {
                warn!("[CONFIG] no config directory on this platform; using defaults");
                Self::default()
            }
        };
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_base_url = url;
        }
        config.sanitized()
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "impactviz").map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Missing file is not an error; a malformed one is.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        let config: Self = serde_json::from_str(&contents)
            .with_context(|| format!("parsing {}", path.display()))?;
        Ok(config.sanitized())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn close_approach_refresh(&self) -> Duration {
        Duration::from_secs(self.close_approach_refresh_secs)
    }

    fn sanitized(mut self) -> Self {
        self.request_timeout_secs = self.request_timeout_secs.max(1);
        self.close_approach_refresh_secs = self.close_approach_refresh_secs.max(1);
        self.max_asteroids = self.max_asteroids.clamp(1, ASTEROID_LIMIT);
        self
    }
}
