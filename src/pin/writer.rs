//! Backup and append for the target go.mod.
//!
//! The writer is the only stage that touches the filesystem for writing. It
//! always writes the backup first, and only once the backup is on disk does it
//! open the manifest, in append mode, to add the rendered block. Existing
//! bytes of the manifest are never rewritten.
//!
//! # Concurrency
//!
//! gomodpin assumes it has the manifest to itself. Two concurrent runs on the
//! same file are unsafe: the last one to write the backup wins, and their
//! appended blocks may interleave.
//!
//! # Repeated runs
//!
//! Appending is deliberately not idempotent. Running gomodpin twice appends
//! two blocks, and the second backup already contains the first block.

use super::render::OverrideBlock;
use crate::constants::BACKUP_FILE_NAME;
use crate::core::file_error::{FileOperation, FileResultExt};
use anyhow::Result;
use std::fs::{self, OpenOptions, Permissions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const CALLER: &str = "manifest_writer";

/// What the writer did after the backup was in place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    /// The block had no entries; the manifest was left untouched
    NothingToAppend,
    /// The block was appended with this many entries
    Appended(usize),
}

/// Writes the backup of a go.mod and appends override blocks to it.
///
/// # Examples
///
/// ```rust,no_run
/// use gomodpin::pin::ManifestWriter;
/// use std::path::PathBuf;
///
/// let writer = ManifestWriter::new(PathBuf::from("/src/app/go.mod"));
/// assert_eq!(writer.backup_path(), std::path::Path::new("/src/app/go.mod.old"));
/// ```
#[derive(Debug, Clone)]
pub struct ManifestWriter {
    /// Path to the manifest being pinned.
    manifest_path: PathBuf,
    /// Sibling path that receives the pre-run contents.
    backup_path: PathBuf,
}

impl ManifestWriter {
    /// Creates a writer for `manifest_path`; the backup goes next to it.
    pub fn new(manifest_path: PathBuf) -> Self {
        let backup_path = manifest_path.with_file_name(BACKUP_FILE_NAME);
        Self {
            manifest_path,
            backup_path,
        }
    }

    /// Path of the manifest.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Path of the backup file.
    pub fn backup_path(&self) -> &Path {
        &self.backup_path
    }

    /// Writes `original` to the backup path with `permissions`.
    ///
    /// An existing backup is removed first, so a read-only backup left by a
    /// previous run does not block this one.
    ///
    /// # Errors
    ///
    /// Returns an error if the old backup cannot be removed or the new one
    /// cannot be written or given the original's permission bits.
    pub fn write_backup(&self, original: &[u8], permissions: &Permissions) -> Result<()> {
        if self.backup_path.exists() {
            debug!("Removing old backup at {}", self.backup_path.display());
            fs::remove_file(&self.backup_path).with_file_context(
                FileOperation::Remove,
                &self.backup_path,
                "replacing the previous backup",
                CALLER,
            )?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create_new(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};
            options.mode(permissions.mode() & 0o7777);
        }

        let mut file = options.open(&self.backup_path).with_file_context(
            FileOperation::Write,
            &self.backup_path,
            "creating the backup",
            CALLER,
        )?;
        file.write_all(original).with_file_context(
            FileOperation::Write,
            &self.backup_path,
            "writing the backup",
            CALLER,
        )?;
        drop(file);

        // The creation mode is filtered through the umask; set it explicitly.
        fs::set_permissions(&self.backup_path, permissions.clone()).with_file_context(
            FileOperation::SetPermissions,
            &self.backup_path,
            "copying permissions to the backup",
            CALLER,
        )?;

        info!("Backed up {} to {}", self.manifest_path.display(), self.backup_path.display());
        Ok(())
    }

    /// Appends `block` to the end of the manifest.
    ///
    /// The file is opened append-only; it is never truncated or rewritten.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be opened for appending or the
    /// write fails.
    pub fn append_block(&self, block: &OverrideBlock) -> Result<()> {
        let mut file = OpenOptions::new().append(true).open(&self.manifest_path).with_file_context(
            FileOperation::Append,
            &self.manifest_path,
            "opening the manifest for appending",
            CALLER,
        )?;
        file.write_all(block.text.as_bytes()).with_file_context(
            FileOperation::Append,
            &self.manifest_path,
            "appending the replace block",
            CALLER,
        )?;
        file.flush().with_file_context(
            FileOperation::Append,
            &self.manifest_path,
            "appending the replace block",
            CALLER,
        )?;

        info!("Appended {} replacements to {}", block.count, self.manifest_path.display());
        Ok(())
    }

    /// Backs up `original`, then appends `block` unless it is empty.
    ///
    /// Nothing is appended if the backup fails.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`write_backup`](Self::write_backup) and
    /// [`append_block`](Self::append_block).
    pub fn commit(
        &self,
        original: &[u8],
        permissions: &Permissions,
        block: &OverrideBlock,
    ) -> Result<WriteOutcome> {
        self.write_backup(original, permissions)?;

        if block.is_empty() {
            info!("No replacements to append");
            return Ok(WriteOutcome::NothingToAppend);
        }

        self.append_block(block)?;
        Ok(WriteOutcome::Appended(block.count))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pin::render::render;
    use crate::pin::resolver::VersionMap;
    use tempfile::tempdir;

    const ORIGINAL: &str = "module example.com/test\n\nrequire github.com/pkg/errors v0.9.1\n";

    fn block_with(entries: &[(&str, &str)]) -> OverrideBlock {
        let mut map = VersionMap::new();
        for (path, version) in entries {
            map.insert(*path, *version);
        }
        render(&map)
    }

    fn setup() -> (tempfile::TempDir, ManifestWriter, Permissions) {
        let temp = tempdir().unwrap();
        let path = temp.path().join("go.mod");
        fs::write(&path, ORIGINAL).unwrap();
        let permissions = fs::metadata(&path).unwrap().permissions();
        (temp, ManifestWriter::new(path), permissions)
    }

    #[test]
    fn test_backup_path_is_sibling() {
        let writer = ManifestWriter::new(PathBuf::from("/work/app/go.mod"));
        assert_eq!(writer.backup_path(), Path::new("/work/app/go.mod.old"));
        assert_eq!(writer.manifest_path(), Path::new("/work/app/go.mod"));
    }

    #[test]
    fn test_commit_appends_after_backup() {
        let (_temp, writer, permissions) = setup();
        let block = block_with(&[("github.com/pkg/errors", "v0.9.1")]);

        let outcome = writer.commit(ORIGINAL.as_bytes(), &permissions, &block).unwrap();
        assert_eq!(outcome, WriteOutcome::Appended(1));

        assert_eq!(fs::read_to_string(writer.backup_path()).unwrap(), ORIGINAL);
        let updated = fs::read_to_string(writer.manifest_path()).unwrap();
        assert_eq!(updated, format!("{ORIGINAL}{}", block.text));
    }

    #[test]
    fn test_commit_empty_block_leaves_manifest_untouched() {
        let (_temp, writer, permissions) = setup();
        let block = block_with(&[]);

        let outcome = writer.commit(ORIGINAL.as_bytes(), &permissions, &block).unwrap();
        assert_eq!(outcome, WriteOutcome::NothingToAppend);
        assert_eq!(fs::read_to_string(writer.backup_path()).unwrap(), ORIGINAL);
        assert_eq!(fs::read_to_string(writer.manifest_path()).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_backup_overwrites_previous_backup() {
        let (_temp, writer, permissions) = setup();
        fs::write(writer.backup_path(), "stale contents that are longer than the original")
            .unwrap();

        writer.write_backup(ORIGINAL.as_bytes(), &permissions).unwrap();
        assert_eq!(fs::read_to_string(writer.backup_path()).unwrap(), ORIGINAL);
    }

    #[test]
    fn test_failed_backup_prevents_append() {
        let temp = tempdir().unwrap();
        let path = temp.path().join("go.mod");
        fs::write(&path, ORIGINAL).unwrap();
        let permissions = fs::metadata(&path).unwrap().permissions();

        // A directory where the backup should go makes the backup fail.
        let writer = ManifestWriter::new(path.clone());
        fs::create_dir(writer.backup_path()).unwrap();

        let block = block_with(&[("a.b/c", "v1.0.0")]);
        assert!(writer.commit(ORIGINAL.as_bytes(), &permissions, &block).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), ORIGINAL);
    }

    #[cfg(unix)]
    #[test]
    fn test_backup_copies_permission_bits() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, writer, _) = setup();
        fs::set_permissions(writer.manifest_path(), Permissions::from_mode(0o640)).unwrap();
        let permissions = fs::metadata(writer.manifest_path()).unwrap().permissions();

        writer.write_backup(ORIGINAL.as_bytes(), &permissions).unwrap();
        let mode = fs::metadata(writer.backup_path()).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o640);
    }

    #[cfg(unix)]
    #[test]
    fn test_backup_replaces_read_only_backup() {
        use std::os::unix::fs::PermissionsExt;

        let (_temp, writer, permissions) = setup();
        fs::write(writer.backup_path(), "old").unwrap();
        fs::set_permissions(writer.backup_path(), Permissions::from_mode(0o444)).unwrap();

        writer.write_backup(ORIGINAL.as_bytes(), &permissions).unwrap();
        assert_eq!(fs::read_to_string(writer.backup_path()).unwrap(), ORIGINAL);
    }
}
