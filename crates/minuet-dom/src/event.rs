//! Event listeners and synthetic dispatch.
//!
//! Listeners attach to a node by event type and come back as RAII
//! [`EventHandle`]s: dropping the handle detaches the listener, so a
//! torn-down binding can never fire again. Dispatch is synchronous and
//! snapshots the matching listeners first, which lets a listener detach
//! handles (including its own) while running.

use std::rc::{Rc, Weak};

use tracing::trace;

use crate::node::{Node, NodeInner};

/// Identifier of one listener attachment on one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListenerId(u64);

pub(crate) struct ListenerSlot {
	pub(crate) id: ListenerId,
	pub(crate) event_type: String,
	pub(crate) callback: Rc<dyn Fn(&Event)>,
}

/// A synthetic event delivered to listeners.
///
/// Carries its type and the target node, so listeners can read the
/// target's current state — a model write-back reads `target().value()`.
#[derive(Clone)]
pub struct Event {
	event_type: String,
	target: Node,
}

impl Event {
	/// Create an event of the given type targeting `target`.
	pub fn new(event_type: &str, target: &Node) -> Event {
		Event {
			event_type: event_type.to_string(),
			target: target.clone(),
		}
	}

	/// The event type, e.g. `click` or `input`.
	pub fn event_type(&self) -> &str {
		&self.event_type
	}

	/// The node the event targets.
	pub fn target(&self) -> &Node {
		&self.target
	}
}

impl std::fmt::Debug for Event {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Event")
			.field("event_type", &self.event_type)
			.field("target", &self.target)
			.finish()
	}
}

/// RAII guard for one attached listener. Dropping it detaches the
/// listener; if the node is already gone, dropping is a no-op.
#[must_use = "dropping an EventHandle detaches its listener"]
pub struct EventHandle {
	node: Weak<NodeInner>,
	id: ListenerId,
}

impl EventHandle {
	/// Detach the listener now. Equivalent to dropping the handle.
	pub fn detach(self) {}
}

impl Drop for EventHandle {
	fn drop(&mut self) {
		if let Some(inner) = self.node.upgrade() {
			inner.listeners.borrow_mut().retain(|slot| slot.id != self.id);
		}
	}
}

impl Node {
	/// Attach a listener for `event_type`.
	///
	/// Listeners fire in attachment order when a matching event is
	/// dispatched. The returned handle owns the attachment.
	pub fn add_listener<F>(&self, event_type: &str, callback: F) -> EventHandle
	where
		F: Fn(&Event) + 'static,
	{
		let id = ListenerId(self.inner.next_listener_id.get());
		self.inner.next_listener_id.set(id.0 + 1);
		self.inner.listeners.borrow_mut().push(ListenerSlot {
			id,
			event_type: event_type.to_string(),
			callback: Rc::new(callback),
		});
		trace!(event_type, "listener attached");
		EventHandle {
			node: Rc::downgrade(&self.inner),
			id,
		}
	}

	/// Dispatch an event to this node's listeners of the matching type.
	///
	/// The matching listeners are snapshotted before any of them runs.
	pub fn dispatch(&self, event: &Event) {
		let callbacks: Vec<Rc<dyn Fn(&Event)>> = self
			.inner
			.listeners
			.borrow()
			.iter()
			.filter(|slot| slot.event_type == event.event_type())
			.map(|slot| Rc::clone(&slot.callback))
			.collect();
		trace!(
			event_type = event.event_type(),
			listeners = callbacks.len(),
			"dispatching"
		);
		for callback in callbacks {
			callback(event);
		}
	}

	/// Write the value slot and dispatch an `input` event, mirroring a
	/// user edit of an editable element.
	pub fn simulate_input(&self, text: &str) {
		self.set_value(text);
		self.dispatch(&Event::new("input", self));
	}

	/// Dispatch a `click` event on this node.
	pub fn simulate_click(&self) {
		self.dispatch(&Event::new("click", self));
	}
}
