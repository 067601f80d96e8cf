//! The pinning pipeline.
//!
//! A run is strictly sequential and single-pass:
//!
//! ```text
//! validate path → read → parse → resolve → filter → render → back up → append
//! ```
//!
//! - [`resolver`] builds the [`VersionMap`] from `require` and `replace`
//! - [`filter`] removes manifest `exclude`s and the [`ExclusionSet`]
//! - [`render`] produces the sorted [`OverrideBlock`]
//! - [`writer`] backs up the manifest and appends the block
//!
//! Any failure aborts the run. A parse failure, in particular, happens before
//! anything is written, so it leaves neither a backup nor a modified manifest.
//! Rendering zero entries is a success: the backup is written and the manifest
//! is left as it was.

pub mod filter;
pub mod render;
pub mod resolver;
pub mod writer;

pub use filter::{ExclusionSet, apply_manifest_excludes};
pub use render::{OverrideBlock, render};
pub use resolver::{VersionMap, resolve};
pub use writer::{ManifestWriter, WriteOutcome};

use crate::config::PinConfig;
use crate::constants::MANIFEST_FILE_NAME;
use crate::core::PinError;
use crate::core::file_error::{FileOperation, FileResultExt};
use crate::modfile;
use anyhow::Result;
use std::fs::{self, Metadata};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Exclusion settings for a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinOptions {
    /// Paths excluded unless `use_default_excludes` is false
    pub default_excludes: Vec<String>,
    /// Whether `default_excludes` applies
    pub use_default_excludes: bool,
    /// Paths excluded on every run (config `excludes` plus `--exclude`)
    pub user_excludes: Vec<String>,
}

impl Default for PinOptions {
    fn default() -> Self {
        Self::from_config(&PinConfig::default())
    }
}

impl PinOptions {
    /// Options derived from a loaded configuration, defaults enabled.
    #[must_use]
    pub fn from_config(config: &PinConfig) -> Self {
        Self {
            default_excludes: config.default_excludes.clone(),
            use_default_excludes: true,
            user_excludes: config.excludes.clone(),
        }
    }

    /// Adds user exclusions.
    #[must_use]
    pub fn with_excludes<I>(mut self, paths: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        self.user_excludes.extend(paths.into_iter().map(Into::into));
        self
    }

    /// Enables or disables the default exclusions.
    #[must_use]
    pub fn with_default_excludes(mut self, enabled: bool) -> Self {
        self.use_default_excludes = enabled;
        self
    }

    /// The exclusion set these options describe.
    #[must_use]
    pub fn exclusion_set(&self) -> ExclusionSet {
        ExclusionSet::new(
            self.default_excludes.iter().cloned(),
            self.user_excludes.iter().cloned(),
            self.use_default_excludes,
        )
    }
}

/// Result of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PinReport {
    /// The manifest that was processed
    pub manifest_path: PathBuf,
    /// Where the pre-run contents were saved
    pub backup_path: PathBuf,
    /// Whether and how much was appended
    pub outcome: WriteOutcome,
}

impl PinReport {
    /// Number of entries appended; zero when nothing was appended.
    #[must_use]
    pub fn appended(&self) -> usize {
        match self.outcome {
            WriteOutcome::Appended(count) => count,
            WriteOutcome::NothingToAppend => 0,
        }
    }
}

/// Checks that `path` names an existing regular file called `go.mod`.
///
/// # Errors
///
/// - [`PinError::ManifestNotFound`] if the path cannot be stat'ed
/// - [`PinError::ManifestIsDirectory`] if it is a directory
/// - [`PinError::NotAManifest`] if its file name is not `go.mod`
pub fn validate_manifest_path(path: &Path) -> Result<Metadata, PinError> {
    let metadata = fs::metadata(path).map_err(|e| PinError::ManifestNotFound {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if metadata.is_dir() {
        return Err(PinError::ManifestIsDirectory {
            path: path.display().to_string(),
        });
    }

    let file_name = path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
    if file_name != MANIFEST_FILE_NAME {
        return Err(PinError::NotAManifest {
            path: path.display().to_string(),
            file_name,
        });
    }

    Ok(metadata)
}

/// Computes the override block for manifest content without touching disk.
///
/// # Errors
///
/// Returns [`PinError::ManifestParseError`] if `data` is not a valid go.mod.
pub fn plan(file_name: &str, data: &[u8], options: &PinOptions) -> Result<OverrideBlock, PinError> {
    let file =
        modfile::parse(file_name, data).map_err(|e| PinError::from_parse_errors(file_name, &e))?;

    let mut versions = resolve(&file);
    filter::filter(&mut versions, &file.exclude, &options.exclusion_set());
    debug!("{} modules left after exclusions", versions.len());

    Ok(render(&versions))
}

/// Pins the dependencies of the go.mod at `path`.
///
/// Validates the path, reads and parses the manifest, computes the override
/// block, writes the `go.mod.old` backup and appends the block if it has any
/// entries.
///
/// # Errors
///
/// Any validation, read, parse or write failure. Nothing is written unless
/// validation, reading and parsing all succeed, and nothing is appended
/// unless the backup was written.
///
/// # Examples
///
/// ```rust,no_run
/// use gomodpin::pin::{PinOptions, pin_manifest};
/// use std::path::Path;
///
/// let report = pin_manifest(Path::new("go.mod"), &PinOptions::default())?;
/// println!("pinned {} modules", report.appended());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn pin_manifest(path: &Path, options: &PinOptions) -> Result<PinReport> {
    let metadata = validate_manifest_path(path)?;

    let data = fs::read(path).with_file_context(
        FileOperation::Read,
        path,
        "reading go.mod",
        "pin_manifest",
    )?;

    let block = plan(&path.display().to_string(), &data, options)?;

    let writer = ManifestWriter::new(path.to_path_buf());
    let outcome = writer.commit(&data, &metadata.permissions(), &block)?;

    Ok(PinReport {
        manifest_path: path.to_path_buf(),
        backup_path: writer.backup_path().to_path_buf(),
        outcome,
    })
}
