//! Integration test suite for gomodpin
//!
//! End-to-end tests that run the `gomodpin` binary against go.mod files in
//! temporary directories.
//!
//! # Running Integration Tests
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **cli**: argument handling, exit codes and input validation
//! - **config**: exclusions from config files and the environment
//! - **pinning**: the pinning pipeline, backups and repeated runs

// Shared test utilities (from parent tests/ directory)
#[path = "../common/mod.rs"]
mod common;

mod cli;
mod config;
mod pinning;
