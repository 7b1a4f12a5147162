//! Directive attribute parsing.
//!
//! Directives are ordinary attributes whose names start with [`DIRECTIVE_PREFIX`].
//! Parsing is closed over the set the engine understands; anything else with the
//! prefix becomes [`Directive::Unknown`], which compiles to no binding at all, so
//! the attribute may belong to another layer without breaking the pass.

/// Marker prefix for directive attributes.
pub const DIRECTIVE_PREFIX: &str = "v-";

/// A parsed directive attribute name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
	/// `v-text`: interpolated text content.
	Text,
	/// `v-html`: raw markup content.
	Html,
	/// `v-model`: two-way value binding.
	Model,
	/// `v-on:<event>`: event listener dispatching to a named method.
	On {
		/// The event type to listen for. Empty when the colon suffix is missing.
		event: String,
	},
	/// Any other `v-` attribute.
	Unknown {
		/// The directive name as written, without the `v-` prefix.
		name: String,
	},
}

impl Directive {
	/// Parses an attribute name into a directive.
	///
	/// Returns `None` for attributes without the `v-` prefix, which are left
	/// alone by the compiler. The colon suffix carries the event type for
	/// `on`; the other directives ignore it.
	pub fn parse(attr_name: &str) -> Option<Directive> {
		let rest = attr_name.strip_prefix(DIRECTIVE_PREFIX)?;
		let (name, suffix) = match rest.split_once(':') {
			Some((name, suffix)) => (name, Some(suffix)),
			None => (rest, None),
		};
		Some(match name {
			"text" => Directive::Text,
			"html" => Directive::Html,
			"model" => Directive::Model,
			"on" => Directive::On {
				event: suffix.unwrap_or_default().to_string(),
			},
			_ => Directive::Unknown {
				name: rest.to_string(),
			},
		})
	}

	/// Whether compiling this directive produces a binding.
	pub fn is_bindable(&self) -> bool {
		!matches!(self, Directive::Unknown { .. })
	}
}
