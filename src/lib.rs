//! # Minuet
//!
//! A minimal reactive templating engine: a dependency-tracking data graph
//! bound to an in-memory node tree through compiled template directives.
//!
//! Minuet takes a JSON object, instruments every path in it, and compiles
//! a host tree whose `v-` attributes and `{{ path }}` placeholders become
//! live bindings. Writing through the graph re-renders every dependent
//! binding synchronously, before the write returns. There is no virtual
//! tree, no diffing and no scheduler.
//!
//! ## Core Principles
//!
//! - **Explicit dependency tracking**: reads performed while a watcher is
//!   being set up are recorded against that watcher; nothing is global.
//! - **Synchronous propagation**: one write, one in-order notification
//!   sweep, no batching.
//! - **RAII teardown**: every binding is a guard object; dropping it
//!   detaches the binding.
//! - **Single-threaded**: the graph and tree share state with `Rc`, not
//!   locks.
//!
//! ## Feature Flags
//!
//! - `reactive` - the data graph alone, for embedding without a tree
//! - `view` (default) - host tree, template compiler and application object
//! - `full` - everything
//!
//! ## Quick Example
//!
//! ```rust,ignore
//! use minuet::prelude::*;
//!
//! let root = Node::element("div")
//!     .with_child(Node::text_node("count: {{ count }}"))
//!     .with_child(Node::element("button").with_attr("v-on:click", "bump"));
//!
//! let app = App::builder()
//!     .data(json!({ "count": 0 }))
//!     .method("bump", |app, _event| {
//!         let n = app.get("count").ok().and_then(|v| v.as_i64()).unwrap_or(0);
//!         let _ = app.set("count", json!(n + 1));
//!     })
//!     .mount(&root)?;
//!
//! // Simulated click; the text re-renders before this returns.
//! root.children()[1].simulate_click();
//! assert_eq!(root.children()[0].text(), "count: 1");
//! ```

// Module re-exports, one per member crate
pub mod reactive;

#[cfg(feature = "view")]
pub mod dom;
#[cfg(feature = "view")]
pub mod view;

// Re-export the reactive core
pub use minuet_reactive::{
	ComputedScope, DepSet, KeyPath, PathError, PathResult, ReactiveGraph, Watcher, WatcherId,
};

// Re-export the host tree
#[cfg(feature = "view")]
pub use minuet_dom::{Event, EventHandle, Node, NodeKind, html_escape, to_html};

// Re-export the compiler and application object
#[cfg(feature = "view")]
pub use minuet_view::{
	App, AppBuilder, Bindings, CompileError, CompileResult, Compiler, Directive, MethodDispatcher,
};

// External
pub use serde_json::{Value, json};

pub mod prelude {
	// Reactive core - always available
	pub use crate::{KeyPath, PathError, PathResult, ReactiveGraph, Watcher};

	// External
	pub use serde_json::{Value, json};

	// View feature - tree, compiler, application object
	#[cfg(feature = "view")]
	pub use crate::{App, AppBuilder, CompileError, Directive, Event, Node, NodeKind, to_html};
}
