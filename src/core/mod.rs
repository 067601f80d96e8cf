//! Core types shared by every stage of the pinning pipeline
//!
//! # Modules
//!
//! ## `error` - Fatal error reporting
//!
//! - [`PinError`] - Enumerated error types covering validation, parsing and config
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ## `file_error` - Structured I/O failures
//!
//! - [`FileOperationError`] - An I/O error annotated with operation, path and purpose
//! - [`FileResultExt`] - `with_file_context` on `io::Result`

pub mod error;
pub mod file_error;

pub use error::{ErrorContext, PinError, user_friendly_error};
pub use file_error::{FileOperation, FileOperationError, FileResultExt};
