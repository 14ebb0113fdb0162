//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use sa_core::Keywords;
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Title substring marking an event as a shift.
    pub shift_keyword: String,

    /// Title substring marking a shift as crunch.
    pub crunch_keyword: String,
}

impl Default for Config {
    fn default() -> Self {
        let keywords = Keywords::default();
        Self {
            shift_keyword: keywords.shift,
            crunch_keyword: keywords.crunch,
        }
    }
}

impl Config {
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

        // Load from environment variables (SHIFTS_*)
        figment = figment.merge(Env::prefixed("SHIFTS_"));

        figment.extract()
    }

    /// The configured keywords.
    pub fn keywords(&self) -> Keywords {
        Keywords {
            shift: self.shift_keyword.clone(),
            crunch: self.crunch_keyword.clone(),
        }
    }
}

/// Returns the platform-specific config directory for shifts.
///
/// On Linux: `~/.config/shifts`
pub fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("shifts"))
}
