//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/arbor/arbor.toml`
//! 3. Environment variables: `ARBOR_*` prefix

use std::fmt;
use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment, File};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, instrument};

/// Failure to load or render settings.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("config error: {0}")]
    Load(String),

    #[error("config error: cannot render settings: {0}")]
    Render(String),
}

/// How `tree show` lays out a tree.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ShowStyle {
    /// Box-drawing tree
    #[default]
    Termtree,
    /// One value per line, indented by depth
    Indent,
}

impl fmt::Display for ShowStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShowStyle::Termtree => write!(f, "termtree"),
            ShowStyle::Indent => write!(f, "indent"),
        }
    }
}

/// Unified configuration for arbor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default layout for `tree show`
    pub show_style: ShowStyle,
    /// Spaces per depth level in the indented layout
    pub indent: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            show_style: ShowStyle::default(),
            indent: 1,
        }
    }
}

/// Get the XDG config directory for arbor.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "arbor").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("arbor.toml"))
}

impl Settings {
    /// Load settings from the global config file and `ARBOR_*` variables.
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(global_config_path().as_deref())
    }

    /// Load settings with an explicit config file in place of the global one.
    ///
    /// A missing file is not an error; the layer is simply skipped.
    #[instrument(level = "debug")]
    pub fn load_from(path: Option<&Path>) -> Result<Self, SettingsError> {
        let defaults = Settings::default();
        let mut builder = Config::builder()
            .set_default("show_style", defaults.show_style.to_string())
            .map_err(config_err)?
            .set_default("indent", defaults.indent as i64)
            .map_err(config_err)?;

        if let Some(path) = path {
            debug!("config file: {}", path.display());
            builder = builder.add_source(File::from(path.to_path_buf()).required(false));
        }

        builder = builder.add_source(
            Environment::with_prefix("ARBOR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().map_err(config_err)?;
        let settings: Self = config.try_deserialize().map_err(config_err)?;
        debug!("settings: {:?}", settings);
        Ok(settings)
    }

    /// Render the effective settings as TOML.
    pub fn to_toml(&self) -> Result<String, SettingsError> {
        toml::to_string_pretty(self).map_err(|e| SettingsError::Render(e.to_string()))
    }
}

fn config_err(e: ConfigError) -> SettingsError {
    SettingsError::Load(e.to_string())
}
