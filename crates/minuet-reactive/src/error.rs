//! Reactive graph error types.
//!
//! This module defines all error types used when parsing key paths and
//! resolving them against the data graph.

use thiserror::Error;

/// Result type for path parsing and resolution.
pub type PathResult<T> = Result<T, PathError>;

/// Path parsing and resolution errors.
///
/// A resolution failure is deliberately loud: silently producing an empty
/// value would let the recorded dependency set drift away from the set of
/// paths the expression actually reads.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
	/// The path expression was empty or whitespace-only.
	#[error("empty path expression")]
	Empty,

	/// A dot-separated segment of the expression was empty.
	#[error("empty segment in path expression `{expr}`")]
	EmptySegment {
		/// The full expression as written.
		expr: String,
	},

	/// An intermediate or final segment does not exist in the data graph.
	#[error("no value at segment `{segment}` while resolving `{path}`")]
	MissingSegment {
		/// The full path being resolved.
		path: String,
		/// The segment that failed to resolve.
		segment: String,
	},

	/// A segment tried to descend into a scalar or null value.
	#[error("value at `{path}` is not a container, cannot resolve segment `{segment}`")]
	NotIndexable {
		/// The path of the non-container value.
		path: String,
		/// The segment that could not be applied.
		segment: String,
	},

	/// An array was indexed with a non-numeric or out-of-range segment.
	#[error("invalid array index `{segment}` at `{path}` (array length {len})")]
	BadIndex {
		/// The path of the array.
		path: String,
		/// The offending segment.
		segment: String,
		/// The array's current length.
		len: usize,
	},

	/// A write targeted a path rooted at a computed property.
	#[error("computed property `{name}` is read-only")]
	ReadOnly {
		/// The computed property name.
		name: String,
	},
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_empty_error_display() {
		assert_eq!(PathError::Empty.to_string(), "empty path expression");
	}

	#[test]
	fn test_missing_segment_error_display() {
		let err = PathError::MissingSegment {
			path: "user.name".to_string(),
			segment: "name".to_string(),
		};
		assert_eq!(
			err.to_string(),
			"no value at segment `name` while resolving `user.name`"
		);
	}

	#[test]
	fn test_bad_index_error_display() {
		let err = PathError::BadIndex {
			path: "items".to_string(),
			segment: "first".to_string(),
			len: 3,
		};
		let msg = err.to_string();
		assert!(msg.contains("items"));
		assert!(msg.contains("first"));
		assert!(msg.contains('3'));
	}

	#[test]
	fn test_read_only_error_display() {
		let err = PathError::ReadOnly {
			name: "fullName".to_string(),
		};
		assert_eq!(err.to_string(), "computed property `fullName` is read-only");
	}
}
