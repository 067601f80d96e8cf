//! Configuration for gomodpin.
//!
//! gomodpin works without any configuration: the built-in exclusion list in
//! [`crate::constants::DEFAULT_EXCLUDES`] applies and nothing else is needed.
//! An optional TOML file can replace that list or add exclusions that should
//! apply on every run.
//!
//! # Configuration File Location
//!
//! In order of precedence:
//!
//! 1. `--config <FILE>` on the command line (must exist)
//! 2. The `GOMODPIN_CONFIG_PATH` environment variable
//! 3. `~/.gomodpin/config.toml` (`%LOCALAPPDATA%\gomodpin\config.toml` on Windows)
//!
//! A missing file at locations 2 and 3 is not an error; defaults apply.
//!
//! # File Format
//!
//! ```toml
//! # Replaces the built-in default exclusions (still disabled by --no-default-excludes)
//! default_excludes = ["github.com/DataDog/dd-trace-go/v2"]
//!
//! # Always excluded, in addition to any --exclude flags
//! excludes = ["github.com/internal/platform"]
//! ```
//!
//! The loaded configuration is resolved once, at startup, into
//! [`PinOptions`](crate::pin::PinOptions) and passed by value into the
//! pipeline.

use crate::constants::{CONFIG_PATH_ENV, default_excludes};
use crate::core::PinError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// User configuration loaded from `config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PinConfig {
    /// Modules excluded unless `--no-default-excludes` is given.
    pub default_excludes: Vec<String>,

    /// Modules always excluded, merged with `--exclude` values.
    pub excludes: Vec<String>,
}

impl Default for PinConfig {
    fn default() -> Self {
        Self {
            default_excludes: default_excludes(),
            excludes: Vec::new(),
        }
    }
}

impl PinConfig {
    /// Load configuration, honouring an explicit path first.
    ///
    /// An explicit path must exist. Otherwise the environment override and
    /// then the default location are tried, and defaults are returned when
    /// neither names an existing file.
    ///
    /// # Errors
    ///
    /// Returns an error if an explicit path is missing, or if the selected
    /// file cannot be read or is not valid configuration.
    pub fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(PinError::ConfigError {
                    message: format!("config file not found: {}", path.display()),
                }
                .into());
            }
            return Self::load_from(&path);
        }

        let path = match std::env::var_os(CONFIG_PATH_ENV) {
            Some(value) => PathBuf::from(value),
            None => match Self::default_path() {
                Ok(path) => path,
                Err(e) => {
                    debug!("No default config location: {e}");
                    return Ok(Self::default());
                }
            },
        };

        if path.exists() {
            Self::load_from(&path)
        } else {
            debug!("No config file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// contains keys gomodpin does not know.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| PinError::ConfigError {
                message: format!("{}: {}", path.display(), e.message()),
            })
            .with_context(|| format!("Failed to parse config from {}", path.display()))?;

        debug!(
            "Loaded config from {} ({} default excludes, {} excludes)",
            path.display(),
            config.default_excludes.len(),
            config.excludes.len()
        );
        Ok(config)
    }

    /// Platform default location of the config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the home (or local data) directory cannot be determined.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("gomodpin")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".gomodpin")
        };

        Ok(config_dir.join("config.toml"))
    }
}
