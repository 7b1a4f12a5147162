//! Minuet Reactive - Dependency-Tracking Data Graph
//!
//! The reactive core of Minuet: an owned JSON data graph whose reads can be
//! tracked and whose writes propagate synchronously to the watchers that
//! depend on them.
//!
//! ## Architecture
//!
//! - [`path`]: dot-separated [`KeyPath`] expressions (`user.name.first`)
//! - [`dep`]: per-path [`DepSet`]s, insertion-ordered and identity-keyed
//! - [`graph`]: the [`ReactiveGraph`] — data, side table, computed
//!   properties, tracked resolution and synchronous notification
//! - [`watcher`]: [`Watcher`] handles — RAII subscriptions created by
//!   [`ReactiveGraph::watch`]
//!
//! Dependency discovery is implicit: a watcher learns which paths it reads
//! by resolving its expression once while threaded through the walk as the
//! observer context. There is no global "currently evaluating" slot and no
//! batching; a write notifies every dependent watcher before it returns.
//!
//! ## Example
//!
//! ```ignore
//! use minuet_reactive::{KeyPath, ReactiveGraph};
//! use serde_json::json;
//!
//! let graph = ReactiveGraph::new(json!({"count": 0}));
//! let count = KeyPath::parse("count")?;
//! let _watcher = graph.watch(count.clone(), |_, value| {
//!     println!("count = {value}");
//! })?;
//! graph.set(&count, json!(1))?; // prints: count = 1
//! graph.set(&count, json!(1))?; // prints nothing: idempotent write
//! ```

pub mod dep;
pub mod error;
pub mod graph;
pub mod path;
pub mod watcher;

pub use dep::{DepSet, WatcherId};
pub use error::{PathError, PathResult};
pub use graph::{ComputedScope, ReactiveGraph};
pub use path::KeyPath;
pub use watcher::Watcher;
