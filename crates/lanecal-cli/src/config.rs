//! Configuration loading and management.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Weekday;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// First day of a week row, as a weekday name ("sunday", "mon", ...).
    pub week_start: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            week_start: "sunday".to_string(),
        }
    }
}

impl Config {
    /// Loads configuration from default locations.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (LANECAL_*)
        figment = figment.merge(Env::prefixed("LANECAL_"));

        figment.extract()
    }

    /// The configured week start as a weekday, with an optional CLI override
    /// taking precedence.
    pub fn week_start(&self, flag: Option<&str>) -> anyhow::Result<Weekday> {
        let name = flag.unwrap_or(&self.week_start);
        name.parse::<Weekday>()
            .ok()
            .with_context(|| format!("invalid week start day: {name}"))
    }
}

/// Returns the platform-specific config directory for lanecal.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("lanecal"))
}
