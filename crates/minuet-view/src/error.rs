//! Compilation and mounting errors.

use thiserror::Error;

use minuet_reactive::PathError;

/// Result alias for compilation and mounting.
pub type CompileResult<T> = Result<T, CompileError>;

/// Errors raised while assembling or mounting an application.
///
/// Individual binding failures never surface here; the compiler logs and
/// skips them. Mounting fails only when the application as a whole cannot
/// exist.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
	/// The initial data tree was not a JSON object.
	#[error("initial data must be a json object, got {kind}")]
	InvalidData {
		/// What the data actually was.
		kind: &'static str,
	},

	/// A path expression failed to parse or resolve.
	#[error(transparent)]
	Path(#[from] PathError),
}
