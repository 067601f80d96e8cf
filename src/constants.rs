//! Global constants used throughout the gomodpin codebase.
//!
//! File names, the override block framing, and the built-in exclusion list
//! live here so the pipeline stages agree on them without sharing state.

/// The only file name gomodpin will operate on.
pub const MANIFEST_FILE_NAME: &str = "go.mod";

/// Name of the sibling backup written before the manifest is touched.
pub const BACKUP_FILE_NAME: &str = "go.mod.old";

/// Comment line that introduces every appended override block.
pub const BLOCK_HEADER: &str = "// prevent module upgrades";

/// Separator written between the existing manifest content and the block.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Modules that are never pinned unless `--no-default-excludes` is given.
///
/// The tracer and its compile-time instrumentation are released in lockstep
/// and managed independently of the application's other dependencies.
pub const DEFAULT_EXCLUDES: &[&str] = &[
    "gopkg.in/DataDog/dd-trace-go.v1",
    "github.com/DataDog/dd-trace-go/v2",
    "github.com/DataDog/orchestrion",
];

/// Environment variable that overrides the config file location.
pub const CONFIG_PATH_ENV: &str = "GOMODPIN_CONFIG_PATH";

/// Returns the built-in default exclusion list as owned strings.
#[must_use]
pub fn default_excludes() -> Vec<String> {
    DEFAULT_EXCLUDES.iter().map(|s| (*s).to_string()).collect()
}
