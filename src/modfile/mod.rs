//! go.mod parsing.
//!
//! This module turns the raw bytes of a go.mod file into a [`ModFile`]: the
//! structured `require`, `replace` and `exclude` lists the pinning pipeline
//! consumes, plus the remaining directives (`module`, `go`, `toolchain`,
//! `godebug`, `retract`, `tool`, `ignore`) so that a well-formed file is
//! accepted in full and a malformed one is rejected with line numbers.
//!
//! # Grammar
//!
//! ```text
//! module example.com/service
//!
//! go 1.23.2
//!
//! require (
//!     github.com/pkg/errors v0.9.1
//!     golang.org/x/sys v0.16.0 // indirect
//! )
//!
//! replace github.com/pkg/errors => github.com/pkg/errors v0.9.2
//! exclude golang.org/x/net v0.1.0
//! ```
//!
//! Every statement sits on one line. A verb followed by `(` opens a block
//! whose lines each carry that verb implicitly, up to a line holding only `)`.
//!
//! # Errors
//!
//! Parsing does not stop at the first problem: every malformed line is
//! reported, as `<file>:<line>: <message>`, in a single [`ParseErrors`].

mod lexer;
mod parser;
pub mod version;


pub use parser::parse;
pub use version::{
    canonical_version, check_path_major, is_directory_path, is_go_version, split_path_major,
};

use std::fmt;
use thiserror::Error;

/// A module path paired with a version.
///
/// The version is empty when no version applies, e.g. for the old side of a
/// `replace` without a version or for a directory replacement target.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ModuleRef {
    /// Module path, e.g. `github.com/pkg/errors`
    pub path: String,
    /// Canonical version, or empty
    pub version: String,
}

impl ModuleRef {
    /// Creates a new module reference.
    pub fn new(path: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            version: version.into(),
        }
    }
}

impl fmt::Display for ModuleRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.version.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}@{}", self.path, self.version)
        }
    }
}

/// A `require` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Require {
    /// The required module and version
    pub module: ModuleRef,
    /// Whether the line is marked `// indirect`
    pub indirect: bool,
    /// Source line
    pub line: usize,
}

/// A `replace` entry: `old [version] => new [version]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replace {
    /// The module being replaced; version empty when the replace applies to all versions
    pub old: ModuleRef,
    /// The replacement; version empty when `new.path` is a directory
    pub new: ModuleRef,
    /// Source line
    pub line: usize,
}

impl Replace {
    /// A self-replace redirects a module to another version of itself.
    #[must_use]
    pub fn is_self_replace(&self) -> bool {
        self.old.path == self.new.path
    }
}

/// An `exclude` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exclude {
    /// The excluded module version
    pub module: ModuleRef,
    /// Source line
    pub line: usize,
}

/// A `retract` entry. A single retracted version has `low == high`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Retract {
    /// Lowest retracted version
    pub low: String,
    /// Highest retracted version
    pub high: String,
    /// Comment attached to the line, if any
    pub rationale: Option<String>,
    /// Source line
    pub line: usize,
}

/// A `godebug key=value` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Godebug {
    /// Setting name
    pub key: String,
    /// Setting value
    pub value: String,
}

/// A parsed go.mod file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModFile {
    /// Path from the `module` statement
    pub module: Option<String>,
    /// Version from the `go` statement
    pub go: Option<String>,
    /// Name from the `toolchain` statement
    pub toolchain: Option<String>,
    /// `godebug` settings
    pub godebug: Vec<Godebug>,
    /// `require` entries in source order
    pub require: Vec<Require>,
    /// `exclude` entries in source order
    pub exclude: Vec<Exclude>,
    /// `replace` entries in source order
    pub replace: Vec<Replace>,
    /// `retract` entries in source order
    pub retract: Vec<Retract>,
    /// `tool` package paths
    pub tool: Vec<String>,
    /// `ignore` directory paths
    pub ignore: Vec<String>,
}

/// One syntax or validation error at a specific line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{file}:{line}: {message}")]
pub struct ParseError {
    /// File name used in the message
    pub file: String,
    /// 1-based line number
    pub line: usize,
    /// What is wrong with the line
    pub message: String,
}

/// All errors found while parsing one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseErrors {
    /// Errors in source order
    pub errors: Vec<ParseError>,
}

impl fmt::Display for ParseErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.errors.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseErrors {}
