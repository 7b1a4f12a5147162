//! Watchers: owned subscriptions over one path expression.
//!
//! A [`Watcher`] represents one evaluation of one path against the data
//! graph on behalf of one rendered effect. Construction resolves the path
//! with the new watcher threaded through as the observer context, which
//! records it in the dependency set of every traversed prefix. The handle is
//! the teardown: dropping it removes the watcher from every set it was
//! recorded in, so a torn-down binding can never be notified again.
//!
//! The callback is not invoked at construction. Binders perform their
//! initial render themselves; the callback fires on every later qualifying
//! mutation with the freshly re-resolved value.

use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::debug;

use crate::dep::WatcherId;
use crate::error::PathResult;
use crate::graph::{ReactiveGraph, WatcherEntry};
use crate::path::KeyPath;

/// An owned subscription over one path.
///
/// Holds a weak reference to its graph; if the graph is gone, teardown is a
/// no-op.
#[must_use = "dropping a Watcher tears the subscription down"]
pub struct Watcher {
	graph: Weak<ReactiveGraph>,
	id: WatcherId,
	path: KeyPath,
}

impl Watcher {
	/// The watcher's identity within its graph.
	pub fn id(&self) -> WatcherId {
		self.id
	}

	/// The watched path.
	pub fn path(&self) -> &KeyPath {
		&self.path
	}

	/// Tear the subscription down now. Equivalent to dropping the handle.
	pub fn dispose(self) {}
}

impl Drop for Watcher {
	fn drop(&mut self) {
		if let Some(graph) = self.graph.upgrade() {
			graph.unwatch(self.id);
		}
	}
}

impl std::fmt::Debug for Watcher {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Watcher")
			.field("id", &self.id)
			.field("path", &self.path.to_string())
			.finish()
	}
}

impl ReactiveGraph {
	/// Subscribe a render callback to a path.
	///
	/// The path is resolved immediately with the new watcher as the
	/// observer context, recording it at every traversed instrumented
	/// prefix — this is how a watcher on `a.b` also learns about wholesale
	/// replacement of `a`. Resolution failure deregisters everything and
	/// propagates the error; a silently half-registered watcher would
	/// desynchronize the recorded dependencies from the expression's real
	/// ones.
	///
	/// The callback receives the graph and the freshly resolved value on
	/// every notification. It is not invoked here.
	pub fn watch<F>(self: &Rc<Self>, path: KeyPath, callback: F) -> PathResult<Watcher>
	where
		F: Fn(&ReactiveGraph, &Value) + 'static,
	{
		let id = self.allocate_watcher_id();
		self.insert_watcher(
			id,
			WatcherEntry {
				path: path.clone(),
				callback: Rc::new(callback),
				dependencies: Vec::new(),
			},
		);

		if let Err(err) = self.resolve(&path, Some(id)) {
			self.unwatch(id);
			return Err(err);
		}

		debug!(watcher = id.0, path = %path, "watcher registered");
		Ok(Watcher {
			graph: Rc::downgrade(self),
			id,
			path,
		})
	}

	/// Remove a watcher from the registry and from every dependency set it
	/// was recorded in.
	pub(crate) fn unwatch(&self, id: WatcherId) {
		let entry = self.watchers.borrow_mut().remove(&id);
		if let Some(entry) = entry {
			let mut deps = self.deps.borrow_mut();
			for dependency in &entry.dependencies {
				if let Some(set) = deps.get_mut(dependency) {
					set.remove(id);
				}
			}
			debug!(watcher = id.0, path = %entry.path, "watcher removed");
		}
	}
}
