//! Configuration loading and management.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// One configured course: a name and its inline control list.
///
/// Courses are an array of tables rather than a map so their declaration
/// order survives loading; it is the matching priority order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    /// The course name.
    pub name: String,
    /// Comma- or semicolon-separated control codes.
    pub controls: String,
}

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Courses in declaration order.
    #[serde(default)]
    pub courses: Vec<CourseEntry>,

    /// The repeating lap boundary control, if the race is run in laps.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lap_control: Option<String>,

    /// Emit a result for every course a runner satisfies, instead of
    /// stopping at the first.
    #[serde(default)]
    pub all_matches: bool,
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

        // Load from environment variables (OTIME_*)
        figment = figment.merge(Env::prefixed("OTIME_"));

        figment.extract()
    }
}

/// Returns the platform-specific config directory for otime.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("otime"))
}
