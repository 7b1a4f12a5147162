//! Text interpolation.
//!
//! Templates embed paths in non-greedy double braces: `{{ user.name }}`.
//! Rendering always substitutes every placeholder in the template, so a
//! change to one dependency recomputes the whole string.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use minuet_reactive::{KeyPath, PathResult};

/// Non-greedy placeholder pattern. Group 1 is the path expression.
static PLACEHOLDER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\{\{(.+?)\}\}").expect("placeholder pattern is valid"));

/// Whether the template contains at least one placeholder.
pub fn has_placeholder(template: &str) -> bool {
	PLACEHOLDER.is_match(template)
}

/// The paths named by the template's placeholders, in order of appearance.
///
/// Whitespace inside the braces is trimmed by path parsing. A malformed
/// path is an error here rather than a skipped placeholder, so the set of
/// recorded dependencies always matches what rendering will read.
pub fn placeholder_paths(template: &str) -> PathResult<Vec<KeyPath>> {
	let mut paths = Vec::new();
	for captures in PLACEHOLDER.captures_iter(template) {
		let Some(expr) = captures.get(1) else {
			continue;
		};
		paths.push(KeyPath::parse(expr.as_str())?);
	}
	Ok(paths)
}

/// Renders the template, substituting each placeholder with the value
/// `resolve` produces for its path.
pub fn render<F>(template: &str, mut resolve: F) -> PathResult<String>
where
	F: FnMut(&KeyPath) -> PathResult<Value>,
{
	let mut out = String::with_capacity(template.len());
	let mut tail = 0;
	for captures in PLACEHOLDER.captures_iter(template) {
		let (Some(whole), Some(expr)) = (captures.get(0), captures.get(1)) else {
			continue;
		};
		let path = KeyPath::parse(expr.as_str())?;
		let value = resolve(&path)?;
		out.push_str(&template[tail..whole.start()]);
		out.push_str(&to_display(&value));
		tail = whole.end();
	}
	out.push_str(&template[tail..]);
	Ok(out)
}

/// Converts a resolved value to display text.
///
/// `Null` renders empty, strings render bare without quotes, booleans and
/// numbers use their canonical form, and containers fall back to compact
/// JSON.
pub fn to_display(value: &Value) -> Cow<'_, str> {
	match value {
		Value::Null => Cow::Borrowed(""),
		Value::String(text) => Cow::Borrowed(text.as_str()),
		Value::Bool(flag) => Cow::Owned(flag.to_string()),
		Value::Number(number) => Cow::Owned(number.to_string()),
		container => Cow::Owned(container.to_string()),
	}
}

#[cfg(test)]
mod tests {
	use proptest::prelude::*;
	use rstest::rstest;
	use serde_json::json;

	use super::*;

	fn lookup(data: serde_json::Value) -> impl FnMut(&KeyPath) -> PathResult<Value> {
		move |path| {
			let mut current = &data;
			for segment in path.segments() {
				current = &current[segment.as_str()];
			}
			Ok(current.clone())
		}
	}

	#[rstest]
	#[case("{{name}}", true)]
	#[case("hi {{ user.name }}!", true)]
	#[case("no braces here", false)]
	#[case("single {brace}", false)]
	#[case("{{}}", false)]
	fn test_has_placeholder(#[case] template: &str, #[case] expected: bool) {
		assert_eq!(has_placeholder(template), expected);
	}

	#[test]
	fn test_placeholder_paths_in_order_of_appearance() {
		let paths = placeholder_paths("{{ b }} then {{a.c}} then {{ b }}").unwrap();
		let rendered: Vec<String> = paths.iter().map(|p| p.to_string()).collect();
		assert_eq!(rendered, ["b", "a.c", "b"]);
	}

	#[test]
	fn test_placeholder_paths_reject_malformed_expressions() {
		assert!(placeholder_paths("{{ a..b }}").is_err());
		assert!(placeholder_paths("{{ . }}").is_err());
	}

	#[test]
	fn test_render_substitutes_every_placeholder() {
		let data = json!({"x": 1, "y": 2});
		let out = render("{{x}} and {{y}}", lookup(data)).unwrap();
		assert_eq!(out, "1 and 2");
	}

	#[test]
	fn test_render_preserves_literal_text() {
		let data = json!({"user": {"name": "ada"}});
		let out = render("hello, {{ user.name }}!", lookup(data)).unwrap();
		assert_eq!(out, "hello, ada!");
	}

	#[test]
	fn test_render_is_non_greedy_across_adjacent_placeholders() {
		let data = json!({"a": "A", "b": "B"});
		let out = render("{{a}}{{b}}", lookup(data)).unwrap();
		assert_eq!(out, "AB");
	}

	#[test]
	fn test_render_without_placeholders_returns_template() {
		let out = render("static text", lookup(json!({}))).unwrap();
		assert_eq!(out, "static text");
	}

	#[test]
	fn test_render_propagates_resolution_errors() {
		let result = render("{{ missing }}", |path| {
			Err(minuet_reactive::PathError::MissingSegment {
				path: path.to_string(),
				segment: "missing".to_string(),
			})
		});
		assert!(result.is_err());
	}

	#[rstest]
	#[case(json!(null), "")]
	#[case(json!("plain"), "plain")]
	#[case(json!(true), "true")]
	#[case(json!(42), "42")]
	#[case(json!(2.5), "2.5")]
	#[case(json!([1, 2]), "[1,2]")]
	#[case(json!({"k": "v"}), "{\"k\":\"v\"}")]
	fn test_to_display(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(to_display(&value), expected);
	}

	proptest! {
		#[test]
		fn prop_render_matches_format(x: i64, y: i64) {
			let data = json!({"x": x, "y": y});
			let out = render("{{x}} and {{y}}", lookup(data)).unwrap();
			prop_assert_eq!(out, format!("{x} and {y}"));
		}
	}
}
