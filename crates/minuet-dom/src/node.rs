//! Tree nodes.
//!
//! [`Node`] is a cheap clonable handle to a shared, interior-mutable tree
//! node. The tree is single-threaded and holds no parent pointers: detaching
//! a subtree means draining children into a fragment, reattaching means
//! appending them back. That is exactly the shape the template compiler
//! needs for its off-tree staging step.
//!
//! ## Example
//!
//! ```ignore
//! use minuet_dom::Node;
//!
//! let root = Node::element("div")
//!     .with_attr("class", "card")
//!     .with_child(Node::element("input").with_attr("v-model", "name"))
//!     .with_child(Node::text_node("{{ name }}"));
//! assert_eq!(root.child_count(), 2);
//! ```

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use crate::event::ListenerSlot;

/// Node classification.
///
/// Comments (and any future inert kinds) produce no bindings during
/// compilation but must never crash classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
	/// An element with a tag, attributes and children.
	Element,
	/// A text node.
	Text,
	/// A comment node; inert.
	Comment,
	/// An off-tree container of children.
	Fragment,
}

pub(crate) struct NodeInner {
	pub(crate) kind: NodeKind,
	/// Element tag; empty for non-elements.
	pub(crate) tag: String,
	/// Attributes in insertion order.
	pub(crate) attrs: RefCell<Vec<(String, String)>>,
	pub(crate) children: RefCell<Vec<Node>>,
	/// Textual payload of text and comment nodes.
	pub(crate) text: RefCell<String>,
	/// Raw markup slot written by markup bindings; opaque, emitted verbatim
	/// during serialization and replacing the children while set.
	pub(crate) markup: RefCell<Option<String>>,
	/// Editable value slot of form-like elements.
	pub(crate) value: RefCell<String>,
	pub(crate) listeners: RefCell<Vec<ListenerSlot>>,
	pub(crate) next_listener_id: Cell<u64>,
}

/// A handle to a tree node. Cloning the handle shares the node.
#[derive(Clone)]
pub struct Node {
	pub(crate) inner: Rc<NodeInner>,
}

impl Node {
	fn with_kind(kind: NodeKind, tag: &str, text: &str) -> Node {
		Node {
			inner: Rc::new(NodeInner {
				kind,
				tag: tag.to_string(),
				attrs: RefCell::new(Vec::new()),
				children: RefCell::new(Vec::new()),
				text: RefCell::new(text.to_string()),
				markup: RefCell::new(None),
				value: RefCell::new(String::new()),
				listeners: RefCell::new(Vec::new()),
				next_listener_id: Cell::new(0),
			}),
		}
	}

	/// Create an element node.
	pub fn element(tag: &str) -> Node {
		Node::with_kind(NodeKind::Element, tag, "")
	}

	/// Create a text node.
	pub fn text_node(content: &str) -> Node {
		Node::with_kind(NodeKind::Text, "", content)
	}

	/// Create a comment node.
	pub fn comment(content: &str) -> Node {
		Node::with_kind(NodeKind::Comment, "", content)
	}

	/// Create an empty off-tree fragment.
	pub fn fragment() -> Node {
		Node::with_kind(NodeKind::Fragment, "", "")
	}

	/// This node's kind.
	pub fn kind(&self) -> NodeKind {
		self.inner.kind
	}

	/// The element tag, or an empty string for non-elements.
	pub fn tag(&self) -> String {
		self.inner.tag.clone()
	}

	/// Whether two handles refer to the same node.
	pub fn ptr_eq(&self, other: &Node) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Set an attribute, replacing an existing one of the same name.
	pub fn set_attr(&self, name: &str, value: &str) {
		let mut attrs = self.inner.attrs.borrow_mut();
		if let Some(slot) = attrs.iter_mut().find(|(n, _)| n == name) {
			slot.1 = value.to_string();
		} else {
			attrs.push((name.to_string(), value.to_string()));
		}
	}

	/// Look up an attribute value.
	pub fn attr(&self, name: &str) -> Option<String> {
		self.inner
			.attrs
			.borrow()
			.iter()
			.find(|(n, _)| n == name)
			.map(|(_, v)| v.clone())
	}

	/// All attributes in insertion order.
	pub fn attrs(&self) -> Vec<(String, String)> {
		self.inner.attrs.borrow().clone()
	}

	/// Append a child. Appending a node to itself is a no-op.
	pub fn append_child(&self, child: &Node) {
		if self.ptr_eq(child) {
			return;
		}
		self.inner.children.borrow_mut().push(child.clone());
	}

	/// The children, in order.
	pub fn children(&self) -> Vec<Node> {
		self.inner.children.borrow().clone()
	}

	/// Number of children.
	pub fn child_count(&self) -> usize {
		self.inner.children.borrow().len()
	}

	/// Detach all children into a fresh fragment, leaving this node empty.
	///
	/// This is an ownership transfer, not a copy: compiling inside the
	/// returned fragment mutates the same nodes that will be reattached.
	pub fn take_children(&self) -> Node {
		let fragment = Node::fragment();
		{
			let mut children = self.inner.children.borrow_mut();
			fragment
				.inner
				.children
				.borrow_mut()
				.extend(children.drain(..));
		}
		fragment
	}

	/// Move all of `fragment`'s children to the end of this node's
	/// children, leaving the fragment empty.
	pub fn append_fragment(&self, fragment: &Node) {
		if self.ptr_eq(fragment) {
			return;
		}
		let mut source = fragment.inner.children.borrow_mut();
		self.inner.children.borrow_mut().extend(source.drain(..));
	}

	/// The textual content.
	///
	/// For text and comment nodes this is their payload; for elements and
	/// fragments it is the concatenated text of all descendant text nodes.
	/// The markup slot is opaque and not included.
	pub fn text(&self) -> String {
		match self.kind() {
			NodeKind::Text | NodeKind::Comment => self.inner.text.borrow().clone(),
			NodeKind::Element | NodeKind::Fragment => {
				let mut out = String::new();
				collect_text(self, &mut out);
				out
			}
		}
	}

	/// Write the textual content.
	///
	/// On a text or comment node this replaces the payload. On an element
	/// or fragment it replaces all children with a single text node and
	/// clears the markup slot.
	pub fn set_text(&self, content: &str) {
		match self.kind() {
			NodeKind::Text | NodeKind::Comment => {
				*self.inner.text.borrow_mut() = content.to_string();
			}
			NodeKind::Element | NodeKind::Fragment => {
				let mut children = self.inner.children.borrow_mut();
				children.clear();
				children.push(Node::text_node(content));
				*self.inner.markup.borrow_mut() = None;
			}
		}
	}

	/// The raw markup slot, if set.
	pub fn markup(&self) -> Option<String> {
		self.inner.markup.borrow().clone()
	}

	/// Write the raw markup slot, replacing the children.
	///
	/// The content is interpreted as structured markup rather than literal
	/// text: serialization emits it verbatim, without escaping.
	pub fn set_markup(&self, html: &str) {
		self.inner.children.borrow_mut().clear();
		*self.inner.markup.borrow_mut() = Some(html.to_string());
	}

	/// The editable value slot.
	pub fn value(&self) -> String {
		self.inner.value.borrow().clone()
	}

	/// Write the editable value slot.
	pub fn set_value(&self, value: &str) {
		*self.inner.value.borrow_mut() = value.to_string();
	}

	/// Fluent form of [`Node::set_attr`] for tree construction.
	pub fn with_attr(self, name: &str, value: &str) -> Node {
		self.set_attr(name, value);
		self
	}

	/// Fluent form of [`Node::append_child`] for tree construction.
	pub fn with_child(self, child: Node) -> Node {
		self.append_child(&child);
		self
	}

	/// Fluent form of [`Node::set_text`] for tree construction.
	pub fn with_text(self, content: &str) -> Node {
		self.set_text(content);
		self
	}
}

fn collect_text(node: &Node, out: &mut String) {
	match node.kind() {
		NodeKind::Text => out.push_str(&node.inner.text.borrow()),
		NodeKind::Comment => {}
		NodeKind::Element | NodeKind::Fragment => {
			for child in node.children() {
				collect_text(&child, out);
			}
		}
	}
}

impl fmt::Debug for Node {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.kind() {
			NodeKind::Element => f
				.debug_struct("Element")
				.field("tag", &self.inner.tag)
				.field("children", &self.child_count())
				.finish(),
			NodeKind::Text => f
				.debug_tuple("Text")
				.field(&self.inner.text.borrow().as_str())
				.finish(),
			NodeKind::Comment => f
				.debug_tuple("Comment")
				.field(&self.inner.text.borrow().as_str())
				.finish(),
			NodeKind::Fragment => f
				.debug_struct("Fragment")
				.field("children", &self.child_count())
				.finish(),
		}
	}
}
