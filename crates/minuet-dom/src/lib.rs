//! Minuet DOM - In-Memory Host Tree
//!
//! The host-document collaborator for the Minuet template compiler, as an
//! owned single-threaded tree: no browser required. It provides exactly the
//! surface the compiler consumes — node classification, attribute and child
//! enumeration, detach/reattach, text/markup/value write slots and event
//! listener attachment — plus an HTML serializer for looking at the result.
//!
//! ## Architecture
//!
//! - [`node`]: [`Node`] handles over shared interior-mutable tree nodes
//! - [`event`]: [`Event`], listener attachment and RAII [`EventHandle`]s
//! - [`render`]: [`to_html`] serialization with escaping
//!
//! ## Example
//!
//! ```ignore
//! use minuet_dom::{Node, to_html};
//!
//! let root = Node::element("div")
//!     .with_child(Node::element("input").with_attr("v-model", "name"))
//!     .with_child(Node::text_node("{{ name }}"));
//! println!("{}", to_html(&root));
//! ```

pub mod event;
pub mod node;
pub mod render;

pub use event::{Event, EventHandle, ListenerId};
pub use node::{Node, NodeKind};
pub use render::{html_escape, to_html};
