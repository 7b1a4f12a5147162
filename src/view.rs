//! Template compiler and application object module.
//!
//! This module provides access to directive parsing, `{{ path }}`
//! interpolation, the binding strategies, the one-pass tree compiler and
//! the [`App`](crate::view::App) builder that ties a data graph to a
//! mounted tree.
//!
//! # Examples
//!
//! ```rust,ignore
//! use minuet::view::App;
//! use minuet::dom::Node;
//! use serde_json::json;
//!
//! let root = Node::element("div")
//!     .with_child(Node::element("input").with_attr("v-model", "name"));
//! let app = App::builder().data(json!({ "name": "ada" })).mount(&root)?;
//! ```

pub use minuet_view::*;
