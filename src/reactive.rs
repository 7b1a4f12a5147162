//! Reactive data graph module.
//!
//! This module provides access to the dependency-tracking core: the graph
//! over a JSON value tree, dot-separated key paths, watcher registration
//! and computed properties.
//!
//! # Examples
//!
//! ```rust,ignore
//! use minuet::reactive::{KeyPath, ReactiveGraph};
//! use serde_json::json;
//!
//! let graph = ReactiveGraph::new(json!({ "count": 0 }));
//! let path: KeyPath = "count".parse()?;
//! let _watcher = graph.watch(path.clone(), |_, value| {
//!     println!("count is now {value}");
//! })?;
//! graph.set(&path, json!(1))?;
//! ```

pub use minuet_reactive::*;
