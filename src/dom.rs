//! In-memory host tree module.
//!
//! This module provides access to the node tree the compiler binds
//! against: element, text, comment and fragment nodes, attributes, event
//! listeners with simulated dispatch, and HTML serialization.
//!
//! # Examples
//!
//! ```rust,ignore
//! use minuet::dom::{Node, to_html};
//!
//! let tree = Node::element("ul")
//!     .with_child(Node::element("li").with_text("one"))
//!     .with_child(Node::element("li").with_text("two"));
//! assert_eq!(to_html(&tree), "<ul><li>one</li><li>two</li></ul>");
//! ```

pub use minuet_dom::*;
