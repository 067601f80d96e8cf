//! gomodpin - pin go.mod dependencies to their current versions
//!
//! gomodpin reads a `go.mod`, works out which version of each required module
//! is in effect, and appends a `replace` block that redirects every one of
//! them to itself at that version. Later `go get -u` runs then cannot move
//! them. The original manifest is saved as `go.mod.old` first.
//!
//! # Pipeline
//!
//! ```text
//! go.mod ─► modfile::parse ─► pin::resolve ─► pin::filter ─► pin::render ─► ManifestWriter
//!                              (require +       (go.mod exclude   (sorted       (go.mod.old,
//!                               replace)         + exclusion set)  block)        then append)
//! ```
//!
//! # Core Modules
//!
//! - [`cli`] - Command-line flags, logging setup and execution
//! - [`config`] - Optional TOML configuration for exclusions
//! - [`constants`] - File names, block header and the default exclusion list
//! - [`core`] - Error types and user-friendly error reporting
//! - [`modfile`] - go.mod lexer, parser and version handling
//! - [`pin`] - Version resolution, exclusion, rendering and writing
//!
//! # Example
//!
//! For this manifest:
//!
//! ```text
//! module example.com/app
//!
//! require (
//!     example.com/a v1.0.0
//!     example.com/b/v2 v2.0.0
//! )
//!
//! replace example.com/a => example.com/a v1.1.0
//!
//! exclude example.com/b/v2 v2.0.0
//! ```
//!
//! gomodpin appends:
//!
//! ```text
//! // prevent module upgrades
//! replace (
//!     example.com/a => example.com/a v1.1.0
//! )
//! ```
//!
//! Running it again appends a second block; the operation is append-only.

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod modfile;
pub mod pin;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
