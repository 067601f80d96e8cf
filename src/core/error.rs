//! Error handling for gomodpin
//!
//! Every failure in gomodpin is fatal: it is reported once and the process
//! exits non-zero. The error system therefore cares about two things only:
//! 1. **Strongly-typed errors** so tests can assert on the failure mode
//! 2. **User-friendly messages** with a suggestion where one is obvious
//!
//! # Architecture
//!
//! - [`PinError`] - Enumerated error types for input validation, parsing and config
//! - [`ErrorContext`] - Wrapper that adds details and a suggestion for display
//! - [`user_friendly_error`] - Converts any [`anyhow::Error`] into an [`ErrorContext`]
//!
//! I/O failures carry their own structured type,
//! [`FileOperationError`](crate::core::file_error::FileOperationError), and are
//! recognised by [`user_friendly_error`] as well.
//!
//! # Examples
//!
//! ```rust,no_run
//! use gomodpin::core::{PinError, ErrorContext};
//!
//! let context = ErrorContext::new(PinError::ManifestIsDirectory {
//!     path: "./service".to_string(),
//! })
//! .with_suggestion("Pass the path to the go.mod file itself, e.g. ./service/go.mod");
//!
//! context.display();
//! ```

use crate::constants::MANIFEST_FILE_NAME;
use crate::core::file_error::FileOperationError;
use crate::modfile::ParseErrors;
use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for gomodpin operations
///
/// The variants follow the three fatal categories the tool distinguishes:
/// input validation (the path given on the command line), parsing (the
/// manifest content), and configuration. Raw I/O failures during read,
/// backup or append are reported through
/// [`FileOperationError`](crate::core::file_error::FileOperationError) instead.
#[derive(Error, Debug, Clone)]
pub enum PinError {
    /// The path given on the command line does not exist or cannot be stat'ed
    #[error("error accessing path {path}: {reason}")]
    ManifestNotFound {
        /// The path as given by the user
        path: String,
        /// The underlying reason reported by the operating system
        reason: String,
    },

    /// The path points at a directory
    #[error("provided path is a directory; expected path to a go.mod file")]
    ManifestIsDirectory {
        /// The directory path as given by the user
        path: String,
    },

    /// The path points at a file that is not named `go.mod`
    #[error("provided path must be a go.mod file; got \"{file_name}\"")]
    NotAManifest {
        /// The path as given by the user
        path: String,
        /// The final component of the path
        file_name: String,
    },

    /// Manifest content could not be parsed
    #[error("error parsing {file}:\n{reason}")]
    ManifestParseError {
        /// Path to the manifest that failed to parse
        file: String,
        /// One line per syntax error, already prefixed with file and line
        reason: String,
    },

    /// Configuration error
    #[error("Configuration error: {message}")]
    ConfigError {
        /// Description of the configuration error
        message: String,
    },

    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

impl PinError {
    /// Wraps a collected set of parse errors for the manifest at `file`.
    pub fn from_parse_errors(file: impl Into<String>, errors: &ParseErrors) -> Self {
        Self::ManifestParseError {
            file: file.into(),
            reason: errors.to_string(),
        }
    }
}

/// Error context wrapper that provides user-friendly error information
///
/// When displayed, errors show:
/// 1. **Error**: The main error message in red
/// 2. **Details**: Additional context about the error in yellow (optional)
/// 3. **Suggestion**: Actionable steps to resolve the issue in green (optional)
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: PinError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: PinError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error to a user-friendly [`ErrorContext`]
///
/// Recognises, in order:
/// - [`PinError`] variants, with tailored suggestions
/// - [`FileOperationError`], keeping the operation and path in the message
/// - [`std::io::Error`] by kind
/// - anything else, with the full cause chain appended
///
/// # Examples
///
/// ```rust,no_run
/// use gomodpin::core::{PinError, user_friendly_error};
///
/// let error = anyhow::Error::from(PinError::ManifestIsDirectory { path: ".".into() });
/// let context = user_friendly_error(error);
/// assert!(context.suggestion.is_some());
/// ```
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(pin_error) = error.downcast_ref::<PinError>() {
        return create_error_context(pin_error.clone());
    }

    if let Some(file_error) = error.downcast_ref::<FileOperationError>() {
        let context = ErrorContext::new(PinError::Other {
            message: format!("{}: {}", error, file_error.source),
        })
        .with_details(file_error.user_message());
        return match file_error.source.kind() {
            std::io::ErrorKind::PermissionDenied => context.with_suggestion(
                "Check the permissions of the go.mod file and its directory",
            ),
            _ => context,
        };
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(PinError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check file ownership and permissions")
                .with_details("gomodpin needs to read go.mod and write next to it");
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(PinError::Other {
                    message: error.to_string(),
                })
                .with_suggestion("Check that the file exists and the path is correct");
            }
            _ => {}
        }
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();

    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(PinError::Other {
        message,
    })
}

/// Maps each [`PinError`] variant to an [`ErrorContext`] with a suggestion.
fn create_error_context(error: PinError) -> ErrorContext {
    match &error {
        PinError::ManifestNotFound {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the path; it must point at an existing go.mod file"),
        PinError::ManifestIsDirectory {
            path,
        } => {
            let suggestion = format!(
                "Pass the manifest itself, e.g. {}",
                std::path::Path::new(path).join(MANIFEST_FILE_NAME).display()
            );
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        PinError::NotAManifest {
            ..
        } => ErrorContext::new(error)
            .with_details("gomodpin only rewrites files named go.mod")
            .with_suggestion("Point gomodpin at the module's go.mod file"),
        PinError::ManifestParseError {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Fix the reported lines; `go mod edit -fmt` reports the same problems"),
        PinError::ConfigError {
            ..
        } => ErrorContext::new(error).with_suggestion(
            "Check the gomodpin config file; supported keys are default_excludes and excludes",
        ),
        _ => ErrorContext::new(error),
    }
}
