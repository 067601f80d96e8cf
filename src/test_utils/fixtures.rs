//! Test fixtures for creating sample go.mod files

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::MANIFEST_FILE_NAME;

/// Test fixture for creating sample go.mod files
#[derive(Clone, Debug)]
pub struct ModFileFixture {
    pub content: String,
    pub name: String,
}

impl ModFileFixture {
    /// Fixture with arbitrary content
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// Plain require list, no replace or exclude
    pub fn basic() -> Self {
        Self::new(
            "basic",
            r#"module example.com/basic

go 1.22

require (
	github.com/pkg/errors v0.9.1
	golang.org/x/sys v0.16.0 // indirect
)
"#,
        )
    }

    /// `a` self-replaced to v1.1.0 and `b/v2` excluded by the manifest
    pub fn self_replace_and_exclude() -> Self {
        Self::new(
            "self_replace_and_exclude",
            r#"module example.com/scenario

go 1.22

require (
	example.com/a v1.0.0
	example.com/b/v2 v2.0.0
)

replace example.com/a => example.com/a v1.1.0

exclude example.com/b/v2 v2.0.0
"#,
        )
    }

    /// Requires only a module on the default exclusion list
    pub fn only_default_excluded() -> Self {
        Self::new(
            "only_default_excluded",
            r#"module example.com/traced

go 1.22

require github.com/DataDog/orchestrion v1.0.0
"#,
        )
    }

    /// Cross-path replaces, a local directory and a fork
    pub fn cross_path_replace() -> Self {
        Self::new(
            "cross_path_replace",
            r#"module example.com/forks

go 1.22

require (
	example.com/local v1.0.0
	example.com/upstream v1.2.0
	example.com/kept v0.3.0
)

replace (
	example.com/local => ../local
	example.com/upstream v1.2.0 => github.com/fork/upstream v1.2.1
)
"#,
        )
    }

    /// Malformed require line
    pub fn invalid_syntax() -> Self {
        Self::new(
            "invalid_syntax",
            r#"module example.com/broken

require github.com/pkg/errors
"#,
        )
    }

    /// Write the fixture as `go.mod` in `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(MANIFEST_FILE_NAME);
        fs::write(&path, &self.content)
            .with_context(|| format!("Failed to write fixture {} to {}", self.name, path.display()))?;
        Ok(path)
    }
}
