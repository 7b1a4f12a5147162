//! Dependency sets.
//!
//! One [`DepSet`] exists per instrumented path in the graph's side table. It
//! records which watchers read that path, in the order they first read it,
//! with each watcher appearing at most once. Notification walks the set in
//! that order, so render callbacks fire in registration order.

/// Unique identifier for a watcher within one graph.
///
/// Allocated by the graph; identity-keyed registration and teardown both go
/// through this ID rather than through callback pointers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WatcherId(pub(crate) u64);

/// The set of watchers subscribed to one instrumented path.
///
/// Insertion-ordered and deduplicated: re-reading the same path during one
/// evaluation registers the watcher once, and one mutation notifies it once.
#[derive(Debug, Default, Clone)]
pub struct DepSet {
	watchers: Vec<WatcherId>,
}

impl DepSet {
	/// Create an empty set.
	pub fn new() -> Self {
		Self {
			watchers: Vec::new(),
		}
	}

	/// Register a watcher, keeping the set deduplicated.
	///
	/// Returns true if the watcher was newly added.
	pub fn add(&mut self, id: WatcherId) -> bool {
		if self.watchers.contains(&id) {
			return false;
		}
		self.watchers.push(id);
		true
	}

	/// Remove a watcher. No-op if it was never registered.
	pub fn remove(&mut self, id: WatcherId) {
		self.watchers.retain(|&w| w != id);
	}

	/// Whether the watcher is registered.
	pub fn contains(&self, id: WatcherId) -> bool {
		self.watchers.contains(&id)
	}

	/// Number of registered watchers.
	pub fn len(&self) -> usize {
		self.watchers.len()
	}

	/// Whether the set is empty.
	pub fn is_empty(&self) -> bool {
		self.watchers.is_empty()
	}

	/// Snapshot of the registered watchers in insertion order.
	///
	/// Notification iterates over a snapshot so callbacks may register or
	/// tear down watchers without invalidating the walk.
	pub fn snapshot(&self) -> Vec<WatcherId> {
		self.watchers.clone()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_add_preserves_insertion_order() {
		let mut set = DepSet::new();
		set.add(WatcherId(3));
		set.add(WatcherId(1));
		set.add(WatcherId(2));
		assert_eq!(
			set.snapshot(),
			vec![WatcherId(3), WatcherId(1), WatcherId(2)]
		);
	}

	#[test]
	fn test_add_deduplicates() {
		let mut set = DepSet::new();
		assert!(set.add(WatcherId(7)));
		assert!(!set.add(WatcherId(7)));
		assert_eq!(set.len(), 1);
	}

	#[test]
	fn test_remove_unregistered_is_noop() {
		let mut set = DepSet::new();
		set.add(WatcherId(1));
		set.remove(WatcherId(2));
		assert_eq!(set.len(), 1);
		assert!(set.contains(WatcherId(1)));
	}

	#[test]
	fn test_remove_clears_membership() {
		let mut set = DepSet::new();
		set.add(WatcherId(1));
		set.add(WatcherId(2));
		set.remove(WatcherId(1));
		assert!(!set.contains(WatcherId(1)));
		assert_eq!(set.snapshot(), vec![WatcherId(2)]);
	}
}
