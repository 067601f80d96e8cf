//! Command-line interface for gomodpin.
//!
//! gomodpin has a single operation, so there are no subcommands: the
//! positional argument names the go.mod to pin and the flags adjust logging
//! and exclusions.
//!
//! ```bash
//! # Pin everything except the default exclusions
//! gomodpin ./go.mod
//!
//! # Show what is replaced, excluded and appended
//! gomodpin -v ./go.mod
//!
//! # Pin the DataDog modules too, but leave an internal module floating
//! gomodpin --no-default-excludes --exclude github.com/acme/platform ./go.mod
//! ```
//!
//! # Configuration Flow
//!
//! Parsed flags become a [`CliConfig`] (log level and config path). Executing
//! initialises logging, loads the [`PinConfig`], merges it with the exclusion
//! flags into [`PinOptions`], and runs [`pin_manifest`].

use crate::config::PinConfig;
use crate::pin::{PinOptions, PinReport, pin_manifest};
use anyhow::Result;
use clap::{ArgAction, Parser};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Log filter used without `--verbose`.
const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log filter used with `--verbose`.
const VERBOSE_LOG_LEVEL: &str = "debug";

/// Settings derived from the command line that shape how a run executes,
/// as opposed to what it pins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliConfig {
    /// Filter for the tracing subscriber. `RUST_LOG` takes precedence.
    pub log_level: Option<String>,

    /// Explicit config file from `--config`.
    pub config_path: Option<PathBuf>,
}

impl CliConfig {
    /// Creates a configuration with no overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Pin the dependencies of a go.mod to their current versions.
#[derive(Parser, Debug)]
#[command(
    name = "gomodpin",
    about = "Pin go.mod dependencies to their current versions",
    version,
    long_about = "Appends a `replace` block to a go.mod that pins every required module to the \
                  version currently in use, after applying the manifest's own replace and exclude \
                  directives. The original file is saved as go.mod.old next to it."
)]
pub struct Cli {
    /// Enable verbose logs
    #[arg(short, long)]
    verbose: bool,

    /// Disable default excludes (dd-trace-go and orchestrion)
    #[arg(long)]
    no_default_excludes: bool,

    /// Module path to exclude; can be repeated
    #[arg(long = "exclude", value_name = "PATH", action = ArgAction::Append)]
    excludes: Vec<String>,

    /// Path to a gomodpin config file
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the go.mod file to pin
    #[arg(value_name = "MANIFEST")]
    manifest: PathBuf,
}

impl Cli {
    /// Runs gomodpin with a configuration built from the parsed flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the run fails.
    pub fn execute(self) -> Result<PinReport> {
        let config = self.build_config();
        self.execute_with_config(config)
    }

    /// Translates flags into a [`CliConfig`].
    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            VERBOSE_LOG_LEVEL
        } else {
            DEFAULT_LOG_LEVEL
        };

        CliConfig {
            log_level: Some(log_level.to_string()),
            config_path: self.config.clone(),
        }
    }

    /// Merges the loaded configuration with the exclusion flags.
    #[must_use]
    pub fn pin_options(&self, config: &PinConfig) -> PinOptions {
        PinOptions::from_config(config)
            .with_default_excludes(!self.no_default_excludes)
            .with_excludes(self.excludes.iter().cloned())
    }

    /// Runs gomodpin with an explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the run fails.
    pub fn execute_with_config(self, config: CliConfig) -> Result<PinReport> {
        init_logging(config.log_level.as_deref());

        let pin_config = PinConfig::load_with_optional(config.config_path)?;
        let options = self.pin_options(&pin_config);
        debug!(
            "Pinning {} (default excludes {}, {} user excludes)",
            self.manifest.display(),
            if options.use_default_excludes {
                "on"
            } else {
                "off"
            },
            options.user_excludes.len()
        );

        pin_manifest(&self.manifest, &options)
    }
}

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `filter`, falling back to `warn`.
/// Output goes to stdout. Calling this again after a subscriber is installed
/// has no effect.
pub fn init_logging(filter: Option<&str>) {
    let env_filter = match std::env::var("RUST_LOG") {
        Ok(_) => EnvFilter::from_default_env(),
        Err(_) => EnvFilter::new(filter.unwrap_or(DEFAULT_LOG_LEVEL)),
    };

    let _ = tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(false)
                .with_ansi(std::env::var_os("NO_COLOR").is_none()),
        )
        .with(env_filter)
        .try_init();
}
