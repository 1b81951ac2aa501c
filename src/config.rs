//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/digitchain/digitchain.toml`
//! 3. Local config: `<project_dir>/.digitchain.toml`
//! 4. Environment variables: `DIGITCHAIN_*` prefix

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// How command results are printed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Raw settings for intermediate parsing (every field optional to detect "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub problems_dir: Option<PathBuf>,
    pub strict_digits: Option<bool>,
    pub output: Option<OutputFormat>,
}

/// Unified configuration for digitchain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Directory holding `<problem>/testcases.json` files (default: "problems")
    pub problems_dir: PathBuf,
    /// Reject input nodes outside 0-9 before adding (default: true)
    pub strict_digits: bool,
    /// Output format for command results
    pub output: OutputFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            problems_dir: PathBuf::from("problems"),
            strict_digits: true,
            output: OutputFormat::Text,
        }
    }
}

/// Get the XDG config directory for digitchain.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "digitchain").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("digitchain.toml"))
}

/// Get the path to the local config file in a project directory.
pub fn local_config_path(project_dir: &Path) -> PathBuf {
    project_dir.join(".digitchain.toml")
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
    /// Merge overlay config onto self (base); overlay wins where specified.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            problems_dir: overlay
                .problems_dir
                .clone()
                .unwrap_or_else(|| self.problems_dir.clone()),
            strict_digits: overlay.strict_digits.unwrap_or(self.strict_digits),
            output: overlay.output.unwrap_or(self.output),
        }
    }

    /// Expand `~` and `$VAR` in `problems_dir`, then anchor a relative path at `project_dir`.
    fn resolve_paths(&mut self, project_dir: Option<&Path>) {
        let expanded = PathBuf::from(expand_env_vars(
            self.problems_dir.to_string_lossy().as_ref(),
        ));
        self.problems_dir = match project_dir {
            Some(dir) if expanded.is_relative() => dir.join(expanded),
            _ => expanded,
        };
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `project_dir` - Optional project directory for local config and relative paths
    pub fn load(project_dir: Option<&Path>) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config
        if let Some(global_path) = global_config_path() {
            if global_path.exists() {
                debug!("load: global config {}", global_path.display());
                current = current.merge_with(&load_raw_settings(&global_path)?);
            }
        }

        // 3. Project-local config
        if let Some(dir) = project_dir {
            let local_path = local_config_path(dir);
            if local_path.exists() {
                debug!("load: local config {}", local_path.display());
                current = current.merge_with(&load_raw_settings(&local_path)?);
            }
        }

        // 4. Environment variables
        let env = Config::builder()
            .add_source(Environment::with_prefix("DIGITCHAIN").prefix_separator("_"))
            .build()
            .map_err(config_err)?;
        current = current.apply_overrides(&env)?;

        current.resolve_paths(project_dir);
        Ok(current)
    }

    /// Apply explicit overrides (e.g. `DIGITCHAIN_*` variables) on top of the settings.
    fn apply_overrides(mut self, overrides: &Config) -> Result<Self, ApplicationError> {
        if let Ok(val) = overrides.get_string("problems_dir") {
            self.problems_dir = PathBuf::from(val);
        }
        if let Ok(val) = overrides.get_bool("strict_digits") {
            self.strict_digits = val;
        }
        if let Ok(val) = overrides.get_string("output") {
            self.output = <OutputFormat as ValueEnum>::from_str(&val, true).map_err(|e| {
                ApplicationError::Config {
                    message: format!("output: {e}"),
                }
            })?;
        }
        Ok(self)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# digitchain configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/digitchain/digitchain.toml
#   Local:  <project_dir>/.digitchain.toml
#   Env:    DIGITCHAIN_* environment variables

# Directory with <problem>/testcases.json files, relative to the project directory
# problems_dir = "problems"

# Reject input digits outside 0-9 before adding
# strict_digits = true

# Output format: "text" or "json"
# output = "text"
"#
        .to_string()
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
