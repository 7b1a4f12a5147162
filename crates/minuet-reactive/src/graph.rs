//! Reactive data graph.
//!
//! This module provides the dependency-tracking core: an owned
//! [`serde_json::Value`] tree plus a side table mapping every key path that
//! existed at construction time to its [`DepSet`]. Reactivity is bookkeeping
//! beside the data rather than interception of field access.
//!
//! ## Architecture
//!
//! 1. **Instrumentation**: construction walks the initial value and inserts
//!    one empty dependency set per reachable path. Keys added later get no
//!    set and are therefore not reactive.
//! 2. **Tracked reads**: [`ReactiveGraph::resolve`] threads an explicit
//!    `Option<WatcherId>` observer context through the walk; every traversed
//!    instrumented prefix records the observer. There is no process-global
//!    "current observer" slot.
//! 3. **Writes**: [`ReactiveGraph::set`] compares structurally before
//!    storing; an equal value stores nothing and notifies nobody.
//! 4. **Notification**: synchronous and unbatched. The written path's
//!    dependency set is snapshotted, all interior borrows are released, and
//!    each watcher re-resolves its own path untracked and runs its callback
//!    before the next one starts.
//!
//! ## Example
//!
//! ```ignore
//! use minuet_reactive::{KeyPath, ReactiveGraph};
//! use serde_json::json;
//!
//! let graph = ReactiveGraph::new(json!({"user": {"name": "ada"}}));
//! let path = KeyPath::parse("user.name")?;
//! let _watcher = graph.watch(path.clone(), |_, value| {
//!     println!("name is now {value}");
//! })?;
//! graph.set(&path, json!("grace"))?; // prints: name is now "grace"
//! ```

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use serde_json::Value;
use tracing::{debug, warn};

use crate::dep::{DepSet, WatcherId};
use crate::error::{PathError, PathResult};
use crate::path::KeyPath;

/// A registered watcher: its path, its render callback and the paths it was
/// recorded in (kept so teardown can remove it without sweeping the table).
pub(crate) struct WatcherEntry {
	pub(crate) path: KeyPath,
	pub(crate) callback: Rc<dyn Fn(&ReactiveGraph, &Value)>,
	pub(crate) dependencies: Vec<KeyPath>,
}

/// Read scope handed to computed property closures.
///
/// Carries the observer context of the read that triggered evaluation, so
/// data accessed through [`ComputedScope::get`] registers the OUTER watcher
/// on the underlying paths.
pub struct ComputedScope<'a> {
	graph: &'a ReactiveGraph,
	observer: Option<WatcherId>,
}

impl ComputedScope<'_> {
	/// Resolve a dot-path expression, recording the active observer.
	pub fn get(&self, expr: &str) -> PathResult<Value> {
		let path = KeyPath::parse(expr)?;
		self.graph.resolve(&path, self.observer)
	}
}

/// The reactive data graph.
///
/// Owns the data, the dependency side table, the watcher registry and the
/// computed-property registry. Single-threaded; share it with [`Rc`].
pub struct ReactiveGraph {
	/// The data value tree.
	data: RefCell<Value>,
	/// Side table: instrumented path -> dependency set.
	pub(crate) deps: RefCell<HashMap<KeyPath, DepSet>>,
	/// Watcher registry.
	pub(crate) watchers: RefCell<HashMap<WatcherId, WatcherEntry>>,
	/// Computed properties, keyed by root name.
	computed: RefCell<HashMap<String, Rc<dyn Fn(&ComputedScope<'_>) -> Value>>>,
	/// Next watcher ID.
	next_id: Cell<u64>,
}

impl ReactiveGraph {
	/// Build a graph over an initial value, instrumenting every path
	/// reachable in it.
	///
	/// Scalars and `null` stop the walk; objects and arrays are
	/// instrumented and recursed into, arrays index-by-index. Growing an
	/// array later does not instrument the new slots, and neither does
	/// inserting a new key: reactivity covers exactly what exists now.
	pub fn new(data: Value) -> Rc<ReactiveGraph> {
		let mut deps = HashMap::new();
		instrument(&mut deps, None, &data);
		debug!(paths = deps.len(), "instrumented data graph");
		Rc::new(ReactiveGraph {
			data: RefCell::new(data),
			deps: RefCell::new(deps),
			watchers: RefCell::new(HashMap::new()),
			computed: RefCell::new(HashMap::new()),
			next_id: Cell::new(0),
		})
	}

	/// Resolve a path without recording any observer.
	pub fn get(&self, path: &KeyPath) -> PathResult<Value> {
		self.resolve(path, None)
	}

	/// Resolve a path, optionally recording `observer` in the dependency
	/// set of every instrumented prefix it traverses.
	///
	/// This is the explicit-context form of dependency discovery: the
	/// observer is a plain parameter, so nested resolutions (for example a
	/// computed property evaluated mid-walk) cannot corrupt an outer
	/// registration.
	pub fn resolve(&self, path: &KeyPath, observer: Option<WatcherId>) -> PathResult<Value> {
		// Computed roots evaluate their closure with no borrows held, then
		// descend any remaining segments into the produced value.
		if let Some(derive) = self.computed_fn(path.root()) {
			let scope = ComputedScope {
				graph: self,
				observer,
			};
			let produced = derive(&scope);
			return descend(&produced, path, 1).map(Value::clone);
		}

		let data = self.data.borrow();
		let mut current: &Value = &data;
		let mut walked: Vec<String> = Vec::with_capacity(path.len());
		for segment in path.segments() {
			current = step(current, path, &walked, segment)?;
			walked.push(segment.clone());
			if let Some(id) = observer {
				self.record(id, &walked);
			}
		}
		Ok(current.clone())
	}

	/// Write a value at a path.
	///
	/// Structurally equal values are dropped without storing or notifying
	/// (the idempotence guard). A changed value is stored and the exact
	/// written path's watchers are notified synchronously, in registration
	/// order, before this call returns. Assigning a key that does not exist
	/// under an existing parent object stores it silently: such keys were
	/// never instrumented and nothing can be watching them. A missing
	/// intermediate segment is an error.
	pub fn set(&self, path: &KeyPath, new_value: Value) -> PathResult<()> {
		if self.computed.borrow().contains_key(path.root()) {
			return Err(PathError::ReadOnly {
				name: path.root().to_string(),
			});
		}

		let changed = {
			let mut data = self.data.borrow_mut();
			let mut current: &mut Value = &mut data;
			let segments = path.segments();
			let mut walked: Vec<String> = Vec::with_capacity(segments.len());
			for segment in &segments[..segments.len() - 1] {
				current = step_mut(current, path, &walked, segment)?;
				walked.push(segment.clone());
			}
			assign(current, path, &walked, path.leaf(), new_value)?
		};

		if changed {
			self.notify(path);
		}
		Ok(())
	}

	/// Register a computed property under a root name.
	///
	/// The closure is evaluated lazily on every read of a path rooted at
	/// `name`; reads it performs through the scope register the active
	/// watcher on the underlying data. A computed name shadows a data key
	/// of the same name and is read-only through [`ReactiveGraph::set`].
	pub fn register_computed<F>(&self, name: impl Into<String>, derive: F)
	where
		F: Fn(&ComputedScope<'_>) -> Value + 'static,
	{
		let name = name.into();
		if name.contains('.') {
			warn!(%name, "computed property names are root names; a dotted name is unreachable");
		}
		if self
			.deps
			.borrow()
			.contains_key(&KeyPath::from_segments(vec![name.clone()]))
		{
			debug!(%name, "computed property shadows a data key");
		}
		self.computed.borrow_mut().insert(name, Rc::new(derive));
	}

	/// Whether the path was present (and therefore instrumented) at
	/// construction time.
	pub fn is_instrumented(&self, path: &KeyPath) -> bool {
		self.deps.borrow().contains_key(path)
	}

	/// Number of watchers registered at a path (for testing).
	pub fn subscriber_count(&self, path: &KeyPath) -> usize {
		self.deps
			.borrow()
			.get(path)
			.map(|set| set.len())
			.unwrap_or(0)
	}

	/// Number of live watchers across the whole graph (for testing).
	pub fn watcher_count(&self) -> usize {
		self.watchers.borrow().len()
	}

	/// A clone of the current data tree.
	pub fn snapshot(&self) -> Value {
		self.data.borrow().clone()
	}

	/// Notify every watcher registered at `path`, in registration order.
	///
	/// The set is snapshotted and all borrows are released before any
	/// callback runs, so callbacks may freely read the graph, write other
	/// paths or tear down watchers. A watcher whose own path no longer
	/// resolves is skipped with a warning; it does not block the rest.
	pub(crate) fn notify(&self, path: &KeyPath) {
		let ids = {
			let deps = self.deps.borrow();
			match deps.get(path) {
				Some(set) => set.snapshot(),
				None => return,
			}
		};
		if ids.is_empty() {
			return;
		}
		debug!(path = %path, watchers = ids.len(), "notifying");
		for id in ids {
			// An earlier callback may have torn this watcher down.
			let entry = self
				.watchers
				.borrow()
				.get(&id)
				.map(|entry| (entry.path.clone(), Rc::clone(&entry.callback)));
			let Some((watched_path, callback)) = entry else {
				continue;
			};
			match self.resolve(&watched_path, None) {
				Ok(value) => callback(self, &value),
				Err(err) => {
					warn!(
						watcher = id.0,
						path = %watched_path,
						error = %err,
						"skipping watcher whose path no longer resolves"
					);
				}
			}
		}
	}

	/// Record `observer` in the dependency set of the walked prefix, and
	/// the prefix in the observer's own dependency list.
	fn record(&self, id: WatcherId, walked: &[String]) {
		let prefix = KeyPath::from_segments(walked.to_vec());
		let newly_added = {
			let mut deps = self.deps.borrow_mut();
			match deps.get_mut(&prefix) {
				Some(set) => set.add(id),
				// Not instrumented: a later-added key, nothing to record.
				None => false,
			}
		};
		if newly_added {
			if let Some(entry) = self.watchers.borrow_mut().get_mut(&id) {
				entry.dependencies.push(prefix);
			}
		}
	}

	/// Look up a computed closure, cloning it out so no borrow is held
	/// while it runs.
	fn computed_fn(&self, root: &str) -> Option<Rc<dyn Fn(&ComputedScope<'_>) -> Value>> {
		self.computed.borrow().get(root).map(Rc::clone)
	}

	pub(crate) fn allocate_watcher_id(&self) -> WatcherId {
		let id = self.next_id.get();
		self.next_id.set(id + 1);
		WatcherId(id)
	}

	pub(crate) fn insert_watcher(&self, id: WatcherId, entry: WatcherEntry) {
		self.watchers.borrow_mut().insert(id, entry);
	}
}

/// Recursively insert an empty dependency set for every path in `value`.
fn instrument(deps: &mut HashMap<KeyPath, DepSet>, prefix: Option<&KeyPath>, value: &Value) {
	match value {
		Value::Object(map) => {
			for (key, child) in map {
				if key.is_empty() {
					// Unreachable through dot-path expressions.
					debug!("skipping empty key during instrumentation");
					continue;
				}
				let path = match prefix {
					Some(p) => p.child(key),
					None => KeyPath::from_segments(vec![key.clone()]),
				};
				deps.insert(path.clone(), DepSet::new());
				instrument(deps, Some(&path), child);
			}
		}
		Value::Array(items) => {
			for (index, child) in items.iter().enumerate() {
				let segment = index.to_string();
				let path = match prefix {
					Some(p) => p.child(&segment),
					None => KeyPath::from_segments(vec![segment]),
				};
				deps.insert(path.clone(), DepSet::new());
				instrument(deps, Some(&path), child);
			}
		}
		// Scalars and null stop the walk.
		_ => {}
	}
}

/// One immutable resolution step into a container value.
fn step<'v>(
	current: &'v Value,
	full: &KeyPath,
	walked: &[String],
	segment: &str,
) -> PathResult<&'v Value> {
	match current {
		Value::Object(map) => map.get(segment).ok_or_else(|| PathError::MissingSegment {
			path: full.to_string(),
			segment: segment.to_string(),
		}),
		Value::Array(items) => {
			let len = items.len();
			let index: usize = segment.parse().map_err(|_| PathError::BadIndex {
				path: joined(walked),
				segment: segment.to_string(),
				len,
			})?;
			items.get(index).ok_or_else(|| PathError::BadIndex {
				path: joined(walked),
				segment: segment.to_string(),
				len,
			})
		}
		_ => Err(PathError::NotIndexable {
			path: joined(walked),
			segment: segment.to_string(),
		}),
	}
}

/// One mutable resolution step into a container value.
fn step_mut<'v>(
	current: &'v mut Value,
	full: &KeyPath,
	walked: &[String],
	segment: &str,
) -> PathResult<&'v mut Value> {
	match current {
		Value::Object(map) => map
			.get_mut(segment)
			.ok_or_else(|| PathError::MissingSegment {
				path: full.to_string(),
				segment: segment.to_string(),
			}),
		Value::Array(items) => {
			let len = items.len();
			let index: usize = segment.parse().map_err(|_| PathError::BadIndex {
				path: joined(walked),
				segment: segment.to_string(),
				len,
			})?;
			items.get_mut(index).ok_or_else(|| PathError::BadIndex {
				path: joined(walked),
				segment: segment.to_string(),
				len,
			})
		}
		_ => Err(PathError::NotIndexable {
			path: joined(walked),
			segment: segment.to_string(),
		}),
	}
}

/// Assign into the final segment of a container.
///
/// Returns whether the stored value actually changed (and watchers should
/// be notified).
fn assign(
	container: &mut Value,
	full: &KeyPath,
	walked: &[String],
	segment: &str,
	new_value: Value,
) -> PathResult<bool> {
	match container {
		Value::Object(map) => {
			if let Some(slot) = map.get_mut(segment) {
				if *slot == new_value {
					return Ok(false);
				}
				*slot = new_value;
				Ok(true)
			} else {
				// Key created after construction: stored, never reactive.
				debug!(path = %full, "storing key without instrumentation");
				map.insert(segment.to_string(), new_value);
				Ok(false)
			}
		}
		Value::Array(items) => {
			let len = items.len();
			let index: usize = segment.parse().map_err(|_| PathError::BadIndex {
				path: joined(walked),
				segment: segment.to_string(),
				len,
			})?;
			let slot = items.get_mut(index).ok_or_else(|| PathError::BadIndex {
				path: joined(walked),
				segment: segment.to_string(),
				len,
			})?;
			if *slot == new_value {
				return Ok(false);
			}
			*slot = new_value;
			Ok(true)
		}
		_ => Err(PathError::NotIndexable {
			path: joined(walked),
			segment: segment.to_string(),
		}),
	}
}

/// Walk the remaining segments of `path` (from index `from`) into an
/// already-produced value. Used for paths rooted at a computed property.
fn descend<'v>(value: &'v Value, path: &KeyPath, from: usize) -> PathResult<&'v Value> {
	let mut walked: Vec<String> = path.segments()[..from].to_vec();
	let mut current = value;
	for segment in &path.segments()[from..] {
		current = step(current, path, &walked, segment)?;
		walked.push(segment.clone());
	}
	Ok(current)
}

fn joined(walked: &[String]) -> String {
	if walked.is_empty() {
		"(root)".to_string()
	} else {
		walked.join(".")
	}
}
