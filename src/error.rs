//! Error types for form building

use thiserror::Error;

/// Errors raised by the form builder's open/close guard.
///
/// Everything else (token provider failures, model lookup problems)
/// surfaces from the injected collaborators, not from this crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
	/// A second form was opened before the first was closed.
	#[error("a form is already open; close it before opening another")]
	AlreadyOpen,
	/// `close` was called with no open form.
	#[error("no form is open")]
	NotOpen,
}

/// Result type for form building operations.
pub type FormResult<T> = Result<T, FormError>;
