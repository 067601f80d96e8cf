//! Common test utilities for gomodpin integration tests

// Not every helper is used by every test module
#![allow(dead_code)]

use anyhow::Result;
use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub use gomodpin::test_utils::ModFileFixture;

/// A temporary module directory with a go.mod, driven through the binary
pub struct PinProject {
    _temp_dir: TempDir, // Keep alive for RAII cleanup
    project_dir: PathBuf,
}

impl PinProject {
    /// Create an empty project directory
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().join("module");
        fs::create_dir_all(&project_dir)?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// Create a project whose go.mod is `fixture`
    pub fn with_fixture(fixture: &ModFileFixture) -> Result<Self> {
        let project = Self::new()?;
        fixture.write_to(&project.project_dir)?;
        Ok(project)
    }

    pub fn project_path(&self) -> &Path {
        &self.project_dir
    }

    pub fn manifest_path(&self) -> PathBuf {
        self.project_dir.join("go.mod")
    }

    pub fn backup_path(&self) -> PathBuf {
        self.project_dir.join("go.mod.old")
    }

    /// Write raw go.mod content
    pub fn write_manifest(&self, content: &str) -> Result<()> {
        fs::write(self.manifest_path(), content)?;
        Ok(())
    }

    pub fn read_manifest(&self) -> String {
        fs::read_to_string(self.manifest_path()).unwrap()
    }

    pub fn read_backup(&self) -> String {
        fs::read_to_string(self.backup_path()).unwrap()
    }

    /// Write a config file next to the module and return its path
    pub fn write_config(&self, content: &str) -> Result<PathBuf> {
        let path = self.project_dir.join("gomodpin.toml");
        fs::write(&path, content)?;
        Ok(path)
    }

    /// A gomodpin command isolated from the user's config file
    pub fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("gomodpin").unwrap();
        cmd.current_dir(&self.project_dir)
            .env("GOMODPIN_CONFIG_PATH", self.project_dir.join("no-such-config.toml"))
            .env_remove("RUST_LOG")
            .env("NO_COLOR", "1");
        cmd
    }

    /// Run gomodpin with `args` followed by the manifest path
    pub fn run_pin(&self, args: &[&str]) -> CommandOutput {
        let output = self.command().args(args).arg(self.manifest_path()).output().unwrap();
        CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Command output helper
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl CommandOutput {
    /// Assert the command succeeded
    pub fn assert_success(&self) -> &Self {
        assert!(
            self.success,
            "Command failed with code {:?}\nStderr: {}",
            self.code, self.stderr
        );
        self
    }

    /// Assert the command failed with exit status 1
    pub fn assert_failure(&self) -> &Self {
        assert_eq!(self.code, Some(1), "Expected exit code 1\nStdout: {}", self.stdout);
        self
    }

    /// Assert stdout contains the given text
    pub fn assert_stdout_contains(&self, text: &str) -> &Self {
        assert!(
            self.stdout.contains(text),
            "Expected stdout to contain '{}'\nActual stdout: {}",
            text,
            self.stdout
        );
        self
    }

    /// Assert stderr contains the given text
    pub fn assert_stderr_contains(&self, text: &str) -> &Self {
        assert!(
            self.stderr.contains(text),
            "Expected stderr to contain '{}'\nActual stderr: {}",
            text,
            self.stderr
        );
        self
    }
}

/// The entry lines of every override block in `content`, in order
pub fn pinned_lines(content: &str) -> Vec<&str> {
    content.lines().filter(|line| line.starts_with('\t') && line.contains(" => ")).collect()
}
