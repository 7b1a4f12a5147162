//! HTML serialization of the in-memory tree.
//!
//! Used by demos and tests to inspect what a compiled tree currently shows.
//! Text content and attribute values are escaped; the markup slot is the one
//! deliberate exception and is emitted verbatim.

use std::borrow::Cow;

use crate::node::{Node, NodeKind};

/// HTML5 void elements, serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
	"track", "wbr",
];

/// Serialize a subtree to HTML.
pub fn to_html(node: &Node) -> String {
	let mut out = String::new();
	write_node(node, &mut out);
	out
}

fn write_node(node: &Node, out: &mut String) {
	match node.kind() {
		NodeKind::Text => out.push_str(&html_escape(&node.text())),
		NodeKind::Comment => {
			out.push_str("<!--");
			out.push_str(&node.text());
			out.push_str("-->");
		}
		NodeKind::Fragment => {
			for child in node.children() {
				write_node(&child, out);
			}
		}
		NodeKind::Element => write_element(node, out),
	}
}

fn write_element(node: &Node, out: &mut String) {
	let tag = node.tag();
	out.push('<');
	out.push_str(&tag);
	for (name, value) in node.attrs() {
		out.push(' ');
		out.push_str(&name);
		out.push_str("=\"");
		out.push_str(&html_escape(&value));
		out.push('"');
	}
	// The value slot is its own storage; surface it as an attribute unless
	// one was set explicitly.
	let value = node.value();
	if !value.is_empty() && node.attr("value").is_none() {
		out.push_str(" value=\"");
		out.push_str(&html_escape(&value));
		out.push('"');
	}
	if VOID_ELEMENTS.contains(&tag.as_str()) {
		out.push('>');
		return;
	}
	out.push('>');
	match node.markup() {
		Some(markup) => out.push_str(&markup),
		None => {
			for child in node.children() {
				write_node(&child, out);
			}
		}
	}
	out.push_str("</");
	out.push_str(&tag);
	out.push('>');
}

/// Escape HTML special characters.
///
/// Returns a borrowed reference when no escaping is needed.
pub fn html_escape(s: &str) -> Cow<'_, str> {
	if s.contains(['&', '<', '>', '"', '\'']) {
		let mut escaped = String::with_capacity(s.len() + 8);
		for c in s.chars() {
			match c {
				'&' => escaped.push_str("&amp;"),
				'<' => escaped.push_str("&lt;"),
				'>' => escaped.push_str("&gt;"),
				'"' => escaped.push_str("&quot;"),
				'\'' => escaped.push_str("&#x27;"),
				_ => escaped.push(c),
			}
		}
		Cow::Owned(escaped)
	} else {
		Cow::Borrowed(s)
	}
}
