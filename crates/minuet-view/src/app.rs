//! The application object.
//!
//! [`App`] ties the pieces together: a reactive graph built from initial
//! data, an optional set of computed properties, named methods reachable
//! from event directives, and the compiled wiring over a mounted root.
//! Construction goes through [`AppBuilder`]; [`AppBuilder::mount`] is the
//! single entry point that builds, compiles and returns the running app.
//!
//! ## Example
//!
//! ```ignore
//! let root = Node::element("div")
//!     .with_child(Node::text_node("count: {{ count }}"))
//!     .with_child(Node::element("button").with_attr("v-on:click", "bump"));
//!
//! let app = App::builder()
//!     .data(json!({ "count": 0 }))
//!     .method("bump", |app, _event| {
//!         let count = app.get("count").ok().and_then(|v| v.as_i64()).unwrap_or(0);
//!         let _ = app.set("count", json!(count + 1));
//!     })
//!     .mount(&root)?;
//! ```

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use serde_json::Value;
use tracing::{debug, warn};

use minuet_dom::{Event, Node};
use minuet_reactive::{ComputedScope, KeyPath, PathResult, ReactiveGraph};

use crate::binding::MethodDispatcher;
use crate::compiler::{Bindings, Compiler};
use crate::error::{CompileError, CompileResult};

/// A named method invoked by event directives, with the app as receiver.
pub type Method = Rc<dyn Fn(&App, &Event)>;

struct AppInner {
	/// Declared first: binding teardown runs while the graph still exists.
	bindings: RefCell<Option<Bindings>>,
	graph: Rc<ReactiveGraph>,
	methods: HashMap<String, Method>,
	root: Node,
}

/// A mounted application.
///
/// Cheap to clone; clones share the same graph, methods and wiring. When
/// the last clone drops, every binding detaches and the tree keeps its
/// final rendered state.
#[derive(Clone)]
pub struct App {
	inner: Rc<AppInner>,
}

impl App {
	/// Starts building an application.
	pub fn builder() -> AppBuilder {
		AppBuilder {
			data: Value::Null,
			computed: Vec::new(),
			methods: HashMap::new(),
		}
	}

	/// Reads a dot-path from the data graph.
	pub fn get(&self, expr: &str) -> PathResult<Value> {
		let path: KeyPath = expr.parse()?;
		self.inner.graph.get(&path)
	}

	/// Writes a dot-path into the data graph, propagating to dependents
	/// before returning.
	pub fn set(&self, expr: &str, value: Value) -> PathResult<()> {
		let path: KeyPath = expr.parse()?;
		self.inner.graph.set(&path, value)
	}

	/// The underlying reactive graph.
	pub fn graph(&self) -> &Rc<ReactiveGraph> {
		&self.inner.graph
	}

	/// The mounted root node.
	pub fn root(&self) -> &Node {
		&self.inner.root
	}

	/// Invokes a named method exactly as an event directive would.
	///
	/// An unknown name is a logged no-op, matching how stray `v-on`
	/// expressions behave at runtime.
	pub fn call(&self, method: &str, event: &Event) {
		let Some(callback) = self.inner.methods.get(method).map(Rc::clone) else {
			warn!(method, "no such method, event ignored");
			return;
		};
		callback(self, event);
	}

	/// Number of live watchers (for testing).
	pub fn watcher_count(&self) -> usize {
		self.inner
			.bindings
			.borrow()
			.as_ref()
			.map(|b| b.watcher_count())
			.unwrap_or(0)
	}
}

/// Routes events from compiled `v-on` bindings to app methods.
///
/// Holds the app weakly: listeners on a tree that outlives its app fire
/// into nothing instead of keeping the app alive.
struct AppDispatcher {
	inner: Weak<AppInner>,
}

impl MethodDispatcher for AppDispatcher {
	fn dispatch(&self, method: &str, event: &Event) {
		let Some(inner) = self.inner.upgrade() else {
			return;
		};
		let app = App { inner };
		app.call(method, event);
	}
}

type ComputedFn = Rc<dyn Fn(&ComputedScope<'_>) -> Value>;

/// Builder for [`App`].
pub struct AppBuilder {
	data: Value,
	computed: Vec<(String, ComputedFn)>,
	methods: HashMap<String, Method>,
}

impl AppBuilder {
	/// The initial data tree. Must be a JSON object; anything else fails
	/// at [`AppBuilder::mount`].
	pub fn data(mut self, data: Value) -> Self {
		self.data = data;
		self
	}

	/// Registers a computed property under a root name.
	///
	/// Repeated registration under one name keeps the last closure.
	pub fn computed<F>(mut self, name: &str, derive: F) -> Self
	where
		F: Fn(&ComputedScope<'_>) -> Value + 'static,
	{
		self.computed.push((name.to_string(), Rc::new(derive)));
		self
	}

	/// Registers a method callable from `v-on` directives.
	pub fn method<F>(mut self, name: &str, method: F) -> Self
	where
		F: Fn(&App, &Event) + 'static,
	{
		self.methods.insert(name.to_string(), Rc::new(method));
		self
	}

	/// Builds the graph, compiles `root`'s subtree and returns the running
	/// app.
	///
	/// Directives inside `root` are bound against the data; a per-binding
	/// failure is logged and skipped, so mounting only fails when the data
	/// itself is unusable.
	pub fn mount(self, root: &Node) -> CompileResult<App> {
		if !self.data.is_object() {
			return Err(CompileError::InvalidData {
				kind: value_kind(&self.data),
			});
		}
		let graph = ReactiveGraph::new(self.data);
		for (name, derive) in self.computed {
			graph.register_computed(name, move |scope| derive(scope));
		}

		let inner = Rc::new(AppInner {
			bindings: RefCell::new(None),
			graph: Rc::clone(&graph),
			methods: self.methods,
			root: root.clone(),
		});
		let dispatcher: Rc<dyn MethodDispatcher> = Rc::new(AppDispatcher {
			inner: Rc::downgrade(&inner),
		});

		let bindings = Compiler::new(graph, dispatcher).compile(root);
		debug!(
			watchers = bindings.watcher_count(),
			listeners = bindings.listener_count(),
			"application mounted"
		);
		*inner.bindings.borrow_mut() = Some(bindings);

		Ok(App { inner })
	}
}

fn value_kind(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "a boolean",
		Value::Number(_) => "a number",
		Value::String(_) => "a string",
		Value::Array(_) => "an array",
		Value::Object(_) => "an object",
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;

	#[test]
	fn test_mount_rejects_non_object_data() {
		let root = Node::element("div");
		let result = App::builder().data(json!([1, 2, 3])).mount(&root);
		assert!(matches!(
			result,
			Err(CompileError::InvalidData { kind: "an array" })
		));
	}

	#[test]
	fn test_get_and_set_proxy_the_graph() {
		let root = Node::element("div");
		let app = App::builder()
			.data(json!({"user": {"name": "ada"}}))
			.mount(&root)
			.unwrap();

		assert_eq!(app.get("user.name").unwrap(), json!("ada"));
		app.set("user.name", json!("grace")).unwrap();
		assert_eq!(app.get("user.name").unwrap(), json!("grace"));
	}

	#[test]
	fn test_call_reaches_registered_method() {
		let root = Node::element("div");
		let app = App::builder()
			.data(json!({"count": 0}))
			.method("bump", |app, _event| {
				let count = app.get("count").ok().and_then(|v| v.as_i64()).unwrap_or(0);
				app.set("count", json!(count + 1)).unwrap();
			})
			.mount(&root)
			.unwrap();

		let button = Node::element("button");
		app.call("bump", &Event::new("click", &button));
		app.call("bump", &Event::new("click", &button));
		assert_eq!(app.get("count").unwrap(), json!(2));
	}

	#[test]
	fn test_call_with_unknown_method_is_a_no_op() {
		let root = Node::element("div");
		let app = App::builder().data(json!({"count": 0})).mount(&root).unwrap();

		let button = Node::element("button");
		app.call("nope", &Event::new("click", &button));
		assert_eq!(app.get("count").unwrap(), json!(0));
	}

	#[test]
	fn test_clones_share_state() {
		let root = Node::element("div");
		let app = App::builder().data(json!({"n": 1})).mount(&root).unwrap();
		let other = app.clone();

		other.set("n", json!(2)).unwrap();
		assert_eq!(app.get("n").unwrap(), json!(2));
	}
}
