//! Binding strategies for each directive.
//!
//! A binding wires one node to the reactive graph: it performs the initial
//! write and returns the RAII guards ([`Watcher`], [`EventHandle`]) whose
//! drop tears the wiring down. Binding callbacks receive the graph by
//! reference and hold only weak handles themselves, so an app and its tree
//! never form a reference cycle.

use std::rc::Rc;

use serde_json::Value;
use tracing::warn;

use minuet_dom::{Event, EventHandle, Node};
use minuet_reactive::{KeyPath, PathResult, ReactiveGraph, Watcher};

use crate::interpolate;

/// Dispatches a named method in response to an event.
///
/// The application object implements this; the event binder only needs the
/// seam. Implementations treat an unknown method name as a logged no-op,
/// never a panic, so a half-wired template still compiles and runs.
pub trait MethodDispatcher {
	/// Invokes the named method with the triggering event.
	fn dispatch(&self, method: &str, event: &Event);
}

/// Binds interpolated text content.
///
/// One watcher per placeholder, and every firing re-renders the whole
/// template, so `{{x}} and {{y}}` stays consistent no matter which side
/// changed. The initial render happens here at bind time. A template with
/// no placeholders gets a single literal write and no watchers.
pub fn bind_text(
	graph: &Rc<ReactiveGraph>,
	node: &Node,
	template: &str,
) -> PathResult<Vec<Watcher>> {
	let paths = interpolate::placeholder_paths(template)?;
	let mut watchers = Vec::with_capacity(paths.len());
	for path in paths {
		let target = node.clone();
		let template = template.to_string();
		// An early return drops the partial vec, unwinding the
		// registrations made so far.
		watchers.push(graph.watch(path, move |graph, _| {
			render_into(graph, &target, &template);
		})?);
	}
	render_into(graph, node, template);
	Ok(watchers)
}

fn render_into(graph: &ReactiveGraph, node: &Node, template: &str) {
	match interpolate::render(template, |path| graph.get(path)) {
		Ok(text) => node.set_text(&text),
		Err(error) => warn!(%error, "text template no longer renders"),
	}
}

/// Binds raw markup content to a single path.
///
/// The resolved value is written to the node's markup verbatim, replacing
/// any children. Callers own the trust decision; nothing is escaped here.
pub fn bind_html(graph: &Rc<ReactiveGraph>, node: &Node, expr: &str) -> PathResult<Watcher> {
	let path = KeyPath::parse(expr)?;
	let target = node.clone();
	let watcher = graph.watch(path.clone(), move |_, value| {
		target.set_markup(&interpolate::to_display(value));
	})?;
	let initial = graph.get(&path)?;
	node.set_markup(&interpolate::to_display(&initial));
	Ok(watcher)
}

/// Binds a two-way value binding.
///
/// Graph to node: a watcher writes the resolved value into the node's
/// value slot. Node to graph: an `input` listener writes the user's text
/// back to the same path as a JSON string. The write-back goes through the
/// ordinary `set`, so it re-enters notification; the idempotence guard on
/// writes stops the loop after the echo.
pub fn bind_model(
	graph: &Rc<ReactiveGraph>,
	node: &Node,
	expr: &str,
) -> PathResult<(Watcher, EventHandle)> {
	let path = KeyPath::parse(expr)?;

	let target = node.clone();
	let watcher = graph.watch(path.clone(), move |_, value| {
		target.set_value(&interpolate::to_display(value));
	})?;

	let write_back = Rc::downgrade(graph);
	let listener_path = path.clone();
	let handle = node.add_listener("input", move |event| {
		let Some(graph) = write_back.upgrade() else {
			return;
		};
		let entered = Value::String(event.target().value());
		if let Err(error) = graph.set(&listener_path, entered) {
			warn!(path = %listener_path, %error, "model write-back failed");
		}
	});

	let initial = graph.get(&path)?;
	node.set_value(&interpolate::to_display(&initial));
	Ok((watcher, handle))
}

/// Binds an event directive.
///
/// Attaches a listener that forwards to the dispatcher; there is no
/// reactive dependency. An empty event type attaches nothing.
pub fn bind_event(
	dispatcher: &Rc<dyn MethodDispatcher>,
	node: &Node,
	event_type: &str,
	method: &str,
) -> Option<EventHandle> {
	if event_type.is_empty() {
		warn!(method, "event directive without an event type binds nothing");
		return None;
	}
	let dispatcher = Rc::clone(dispatcher);
	let method = method.trim().to_string();
	Some(node.add_listener(event_type, move |event| {
		dispatcher.dispatch(&method, event);
	}))
}

#[cfg(test)]
mod tests {
	use std::cell::RefCell;
	use std::rc::Rc;

	use serde_json::json;

	use minuet_dom::{Node, NodeKind};
	use minuet_reactive::ReactiveGraph;

	use super::*;

	#[test]
	fn test_text_binding_renders_and_tracks() {
		let graph = ReactiveGraph::new(json!({"x": 1, "y": 2}));
		let node = Node::text_node("");

		let watchers = bind_text(&graph, &node, "{{x}} and {{y}}").unwrap();
		assert_eq!(watchers.len(), 2);
		assert_eq!(node.text(), "1 and 2");

		graph.set(&"y".parse().unwrap(), json!(9)).unwrap();
		assert_eq!(node.text(), "1 and 9");
	}

	#[test]
	fn test_text_binding_without_placeholders_writes_literal() {
		let graph = ReactiveGraph::new(json!({"x": 1}));
		let node = Node::text_node("");

		let watchers = bind_text(&graph, &node, "just words").unwrap();
		assert!(watchers.is_empty());
		assert_eq!(node.text(), "just words");
		assert_eq!(graph.watcher_count(), 0);
	}

	#[test]
	fn test_text_binding_failure_leaves_no_registrations() {
		let graph = ReactiveGraph::new(json!({"x": 1}));
		let node = Node::text_node("");

		let result = bind_text(&graph, &node, "{{x}} {{gone}}");
		assert!(result.is_err());
		assert_eq!(graph.watcher_count(), 0);
		assert_eq!(graph.subscriber_count(&"x".parse().unwrap()), 0);
	}

	#[test]
	fn test_html_binding_writes_markup_verbatim() {
		let graph = ReactiveGraph::new(json!({"body": "<b>hi</b>"}));
		let node = Node::element("div");

		let _watcher = bind_html(&graph, &node, "body").unwrap();
		assert_eq!(node.markup(), Some("<b>hi</b>".to_string()));

		graph
			.set(&"body".parse().unwrap(), json!("<i>bye</i>"))
			.unwrap();
		assert_eq!(node.markup(), Some("<i>bye</i>".to_string()));
	}

	#[test]
	fn test_model_binding_is_two_way() {
		let graph = ReactiveGraph::new(json!({"name": "ada"}));
		let node = Node::element("input");

		let (_watcher, _handle) = bind_model(&graph, &node, "name").unwrap();
		assert_eq!(node.value(), "ada");

		// Graph to node.
		graph.set(&"name".parse().unwrap(), json!("grace")).unwrap();
		assert_eq!(node.value(), "grace");

		// Node to graph.
		node.simulate_input("lin");
		assert_eq!(graph.get(&"name".parse().unwrap()).unwrap(), json!("lin"));
	}

	#[test]
	fn test_model_write_back_reaches_sibling_bindings() {
		let graph = ReactiveGraph::new(json!({"name": "ada"}));
		let input = Node::element("input");
		let label = Node::text_node("");

		let (_watcher, _handle) = bind_model(&graph, &input, "name").unwrap();
		let _label_watchers = bind_text(&graph, &label, "hi {{name}}").unwrap();

		input.simulate_input("grace");
		assert_eq!(label.text(), "hi grace");
	}

	struct RecordingDispatcher {
		calls: RefCell<Vec<(String, String)>>,
	}

	impl MethodDispatcher for RecordingDispatcher {
		fn dispatch(&self, method: &str, event: &Event) {
			self.calls
				.borrow_mut()
				.push((method.to_string(), event.event_type().to_string()));
		}
	}

	#[test]
	fn test_event_binding_dispatches_to_method() {
		let recorder = Rc::new(RecordingDispatcher {
			calls: RefCell::new(Vec::new()),
		});
		let dispatcher: Rc<dyn MethodDispatcher> = recorder.clone();
		let node = Node::element("button");

		let _handle = bind_event(&dispatcher, &node, "click", "save").unwrap();
		node.simulate_click();
		node.simulate_click();

		let calls = recorder.calls.borrow();
		assert_eq!(calls.len(), 2);
		assert_eq!(calls[0], ("save".to_string(), "click".to_string()));
	}

	#[test]
	fn test_event_binding_requires_event_type() {
		let recorder = Rc::new(RecordingDispatcher {
			calls: RefCell::new(Vec::new()),
		});
		let dispatcher: Rc<dyn MethodDispatcher> = recorder;
		let node = Node::element("button");

		assert!(bind_event(&dispatcher, &node, "", "save").is_none());
		assert_eq!(node.kind(), NodeKind::Element);
	}
}
