//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/auto-opener/settings.toml`
//! 3. Environment variables: `AO_*` prefix
//! 4. Command line flags (applied by the caller)
//!
//! These are settings for `ao` itself; the titles and links live in the
//! links file named by `links_file`.

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Name of the links file inside the config directory.
pub const LINKS_FILE_NAME: &str = "config.config";

/// Name of the settings file inside the config directory.
pub const SETTINGS_FILE_NAME: &str = "settings.toml";

/// Unified configuration for ao.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Links file (default: `<config_dir>/auto-opener/config.config`)
    pub links_file: PathBuf,
    /// Launcher command line; platform default when unset
    pub opener: Option<String>,
    /// Send a desktop notification after opening a title
    pub notify: bool,
    /// Emit OSC 8 hyperlinks when listing links on a terminal
    pub hyperlinks: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            links_file: default_links_file(),
            opener: None,
            notify: false,
            hyperlinks: true,
        }
    }
}

/// Raw settings for intermediate parsing (`None` = not specified).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub links_file: Option<PathBuf>,
    pub opener: Option<String>,
    pub notify: Option<bool>,
    pub hyperlinks: Option<bool>,
}

/// Get the XDG config directory for ao.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "auto-opener").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global settings file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join(SETTINGS_FILE_NAME))
}

/// Default links file location (~/.config/auto-opener/config.config on Linux).
fn default_links_file() -> PathBuf {
    global_config_dir()
        .map(|dir| dir.join(LINKS_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from("~/.config/auto-opener").join(LINKS_FILE_NAME))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    ///
    /// Handles `~`, `$VAR`, and `${VAR}` syntax.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.links_file.to_string_lossy().as_ref());
        self.links_file = PathBuf::from(expanded);

        // opener may be something like ~/bin/open-in-browser
        if let Some(opener) = &self.opener {
            self.opener = Some(expand_env_vars(opener));
        }
    }

    /// Overlay wins where it specifies a value.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            links_file: overlay
                .links_file
                .clone()
                .unwrap_or_else(|| self.links_file.clone()),
            opener: overlay.opener.clone().or_else(|| self.opener.clone()),
            notify: overlay.notify.unwrap_or(self.notify),
            hyperlinks: overlay.hyperlinks.unwrap_or(self.hyperlinks),
        }
    }

    /// Load settings with layered precedence from the standard locations.
    pub fn load() -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), None)
    }

    /// Load settings from an explicit global file and environment.
    ///
    /// # Arguments
    /// * `global_path` - settings file; skipped when `None` or missing
    /// * `env` - environment to read `AO_*` variables from; the process
    ///   environment when `None`
    pub fn load_from(
        global_path: Option<&Path>,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global settings file
        if let Some(path) = global_path {
            if path.exists() {
                let raw = load_raw_settings(path)?;
                current = current.merge_with(&raw);
            }
        }

        // 3. Environment variables (explicit override)
        current = Self::apply_env_overrides(current, env)?;

        // Expand ~ and $VAR in path-like fields
        current.expand_paths();

        Ok(current)
    }

    /// Apply AO_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        env: Option<config::Map<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // AO_LINKS_FILE -> links_file
        let config = Config::builder()
            .add_source(Environment::with_prefix("AO").source(env))
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("links_file") {
            settings.links_file = PathBuf::from(val);
        }
        if let Ok(val) = config.get_string("opener") {
            settings.opener = Some(val).filter(|v| !v.trim().is_empty());
        }
        if let Ok(val) = config.get_bool("notify") {
            settings.notify = val;
        }
        if let Ok(val) = config.get_bool("hyperlinks") {
            settings.hyperlinks = val;
        }

        Ok(settings)
    }

    /// Point at a different links file (`--file`).
    pub fn with_links_file(mut self, path: &Path) -> Self {
        self.links_file = PathBuf::from(expand_env_vars(path.to_string_lossy().as_ref()));
        self
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
