//! Key paths into the data graph.
//!
//! A [`KeyPath`] is a parsed dot-separated expression such as
//! `user.name.first`. Segments are matched against object keys; a segment of
//! ASCII digits additionally indexes into arrays during resolution. The path
//! itself stores plain segments and leaves that interpretation to the graph
//! walk, so `items.0` can address both `{"items": [..]}` and
//! `{"items": {"0": ..}}`.

use std::fmt;
use std::str::FromStr;

use crate::error::{PathError, PathResult};

/// A parsed dot-separated path, e.g. `user.name.first`.
///
/// Always contains at least one segment; parsing rejects empty expressions
/// and empty segments. Paths are cheap to clone and hashable, which lets the
/// dependency side table key its sets by path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
	segments: Vec<String>,
}

impl KeyPath {
	/// Parse a dot-separated expression into a path.
	///
	/// Surrounding whitespace is trimmed, so `{{ user.name }}` style sources
	/// can pass the raw capture through. Interior whitespace is not trimmed
	/// per segment; `a. b` is two segments `a` and ` b`.
	pub fn parse(expr: &str) -> PathResult<KeyPath> {
		let trimmed = expr.trim();
		if trimmed.is_empty() {
			return Err(PathError::Empty);
		}
		let mut segments = Vec::new();
		for segment in trimmed.split('.') {
			if segment.is_empty() {
				return Err(PathError::EmptySegment {
					expr: trimmed.to_string(),
				});
			}
			segments.push(segment.to_string());
		}
		Ok(KeyPath { segments })
	}

	/// Build a path from already-validated segments.
	///
	/// Used internally while walking a value tree during instrumentation.
	pub(crate) fn from_segments(segments: Vec<String>) -> KeyPath {
		debug_assert!(!segments.is_empty());
		debug_assert!(segments.iter().all(|s| !s.is_empty()));
		KeyPath { segments }
	}

	/// The segments in root-to-leaf order.
	pub fn segments(&self) -> &[String] {
		&self.segments
	}

	/// Number of segments. Always at least 1.
	pub fn len(&self) -> usize {
		self.segments.len()
	}

	/// Always false; present for API symmetry with `len`.
	pub fn is_empty(&self) -> bool {
		self.segments.is_empty()
	}

	/// The first segment.
	pub fn root(&self) -> &str {
		&self.segments[0]
	}

	/// The final segment.
	pub fn leaf(&self) -> &str {
		// Parsing guarantees at least one segment.
		&self.segments[self.segments.len() - 1]
	}

	/// The path without its final segment, or `None` for a root path.
	pub fn parent(&self) -> Option<KeyPath> {
		if self.segments.len() < 2 {
			return None;
		}
		Some(KeyPath {
			segments: self.segments[..self.segments.len() - 1].to_vec(),
		})
	}

	/// Every prefix of this path, shortest first: `a`, `a.b`, `a.b.c`.
	///
	/// Tracked resolution registers the observer at each of these, which is
	/// what makes a watcher on `a.b` fire when `a` is replaced wholesale.
	pub fn prefixes(&self) -> impl Iterator<Item = KeyPath> + '_ {
		(1..=self.segments.len()).map(|n| KeyPath {
			segments: self.segments[..n].to_vec(),
		})
	}

	/// This path extended by one segment.
	pub fn child(&self, segment: &str) -> KeyPath {
		let mut segments = self.segments.clone();
		segments.push(segment.to_string());
		KeyPath { segments }
	}
}

impl fmt::Display for KeyPath {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.segments.join("."))
	}
}

impl FromStr for KeyPath {
	type Err = PathError;

	fn from_str(s: &str) -> PathResult<KeyPath> {
		KeyPath::parse(s)
	}
}
