//! Template compilation.
//!
//! The compiler walks a mounted subtree once, turning directive attributes
//! and placeholder text into live bindings. The walk happens off-tree: the
//! root's children are detached into a fragment, compiled there, and
//! reattached in one move, so binding-time writes never land on a
//! half-processed tree.
//!
//! Compilation is total. A directive that fails to bind is logged and
//! skipped; the pass always finishes and returns whatever wiring
//! succeeded.

use std::rc::Rc;

use tracing::{debug, warn};

use minuet_dom::{EventHandle, Node, NodeKind};
use minuet_reactive::{ReactiveGraph, Watcher};

use crate::binding::{self, MethodDispatcher};
use crate::directive::Directive;
use crate::interpolate;

/// The live wiring produced by one compile pass.
///
/// Dropping it detaches every watcher and listener; the tree keeps its
/// last-rendered state but stops updating.
#[derive(Default)]
pub struct Bindings {
	watchers: Vec<Watcher>,
	handles: Vec<EventHandle>,
}

impl Bindings {
	/// Number of live watchers.
	pub fn watcher_count(&self) -> usize {
		self.watchers.len()
	}

	/// Number of attached event listeners.
	pub fn listener_count(&self) -> usize {
		self.handles.len()
	}
}

/// Compiles subtrees against a reactive graph and a method dispatcher.
pub struct Compiler {
	graph: Rc<ReactiveGraph>,
	dispatcher: Rc<dyn MethodDispatcher>,
}

impl Compiler {
	pub fn new(graph: Rc<ReactiveGraph>, dispatcher: Rc<dyn MethodDispatcher>) -> Compiler {
		Compiler { graph, dispatcher }
	}

	/// Compiles every descendant of `root`.
	///
	/// The root's own attributes are not compiled; directives live on the
	/// nodes inside the mount point.
	pub fn compile(&self, root: &Node) -> Bindings {
		let mut bindings = Bindings::default();
		let staged = root.take_children();
		self.compile_children(&staged, &mut bindings);
		root.append_fragment(&staged);
		debug!(
			watchers = bindings.watcher_count(),
			listeners = bindings.listener_count(),
			"compile pass finished"
		);
		bindings
	}

	fn compile_children(&self, parent: &Node, bindings: &mut Bindings) {
		for child in parent.children() {
			match child.kind() {
				NodeKind::Text => self.compile_text(&child, bindings),
				NodeKind::Element => {
					self.compile_element(&child, bindings);
					self.compile_children(&child, bindings);
				}
				// Comments and fragments in the tree are inert.
				_ => {}
			}
		}
	}

	fn compile_text(&self, node: &Node, bindings: &mut Bindings) {
		let template = node.text();
		if !interpolate::has_placeholder(&template) {
			return;
		}
		match binding::bind_text(&self.graph, node, &template) {
			Ok(watchers) => bindings.watchers.extend(watchers),
			Err(error) => warn!(%error, template, "skipping text binding"),
		}
	}

	fn compile_element(&self, node: &Node, bindings: &mut Bindings) {
		for (attr_name, expr) in node.attrs() {
			let Some(directive) = Directive::parse(&attr_name) else {
				continue;
			};
			self.compile_directive(node, directive, &expr, bindings);
		}
	}

	fn compile_directive(
		&self,
		node: &Node,
		directive: Directive,
		expr: &str,
		bindings: &mut Bindings,
	) {
		match directive {
			Directive::Text => match binding::bind_text(&self.graph, node, expr) {
				Ok(watchers) => bindings.watchers.extend(watchers),
				Err(error) => warn!(%error, expr, "skipping v-text binding"),
			},
			Directive::Html => match binding::bind_html(&self.graph, node, expr) {
				Ok(watcher) => bindings.watchers.push(watcher),
				Err(error) => warn!(%error, expr, "skipping v-html binding"),
			},
			Directive::Model => match binding::bind_model(&self.graph, node, expr) {
				Ok((watcher, handle)) => {
					bindings.watchers.push(watcher);
					bindings.handles.push(handle);
				}
				Err(error) => warn!(%error, expr, "skipping v-model binding"),
			},
			Directive::On { event } => {
				if let Some(handle) = binding::bind_event(&self.dispatcher, node, &event, expr) {
					bindings.handles.push(handle);
				}
			}
			Directive::Unknown { name } => {
				debug!(directive = %name, "ignoring unknown directive");
			}
		}
	}
}
