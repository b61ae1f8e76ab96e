// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::sync::Arc;

use disruptivo_common_storage::ClientStorage;
use tokio::sync::watch;
use tracing::debug;

/// Session storage key for the pinned flag.
pub const SIDEBAR_PINNED_KEY: &str = "disruptivo.admin.sidebar.pinned";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SidebarSnapshot {
	pub is_pinned: bool,
	pub is_hovered: bool,
}

impl SidebarSnapshot {
	pub fn is_expanded(&self) -> bool {
		self.is_pinned || self.is_hovered
	}
}

/// Admin sidebar pin and hover flags.
///
/// `storage` should be session-scoped: the pinned flag is meant to survive
/// navigation, not a reload.
pub struct SidebarState {
	storage: Arc<dyn ClientStorage>,
	tx: watch::Sender<SidebarSnapshot>,
}

impl SidebarState {
	pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
		let is_pinned = storage.get(SIDEBAR_PINNED_KEY).as_deref() == Some("true");
		let (tx, _) = watch::channel(SidebarSnapshot {
			is_pinned,
			is_hovered: false,
		});
		Self { storage, tx }
	}

	pub fn snapshot(&self) -> SidebarSnapshot {
		*self.tx.borrow()
	}

	pub fn subscribe(&self) -> watch::Receiver<SidebarSnapshot> {
		self.tx.subscribe()
	}

	pub fn is_expanded(&self) -> bool {
		self.snapshot().is_expanded()
	}

	pub fn set_pinned(&self, pinned: bool) {
		self
			.storage
			.set(SIDEBAR_PINNED_KEY, if pinned { "true" } else { "false" });
		let changed = self.tx.send_if_modified(|snapshot| {
			let changed = snapshot.is_pinned != pinned;
			snapshot.is_pinned = pinned;
			changed
		});
		if changed {
			debug!(pinned, "sidebar pin changed");
		}
	}

	/// Flip the pinned flag and return the new value.
	pub fn toggle_pinned(&self) -> bool {
		let pinned = !self.snapshot().is_pinned;
		self.set_pinned(pinned);
		pinned
	}

	pub fn set_hovered(&self, hovered: bool) {
		self.tx.send_if_modified(|snapshot| {
			let changed = snapshot.is_hovered != hovered;
			snapshot.is_hovered = hovered;
			changed
		});
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use disruptivo_common_storage::MemoryStorage;

	#[test]
	fn test_expansion_truth_table() {
		for (is_pinned, is_hovered, expanded) in [
			(false, false, false),
			(true, false, true),
			(false, true, true),
			(true, true, true),
		] {
			let snapshot = SidebarSnapshot {
				is_pinned,
				is_hovered,
			};
			assert_eq!(snapshot.is_expanded(), expanded);
		}
	}

	#[test]
	fn test_starts_collapsed() {
		let sidebar = SidebarState::new(Arc::new(MemoryStorage::new()));
		assert_eq!(sidebar.snapshot(), SidebarSnapshot::default());
		assert!(!sidebar.is_expanded());
	}

	#[test]
	fn test_pin_survives_within_session() {
		let storage = Arc::new(MemoryStorage::new());
		let sidebar = SidebarState::new(storage.clone());
		assert!(sidebar.toggle_pinned());
		assert_eq!(storage.get(SIDEBAR_PINNED_KEY).as_deref(), Some("true"));

		let remounted = SidebarState::new(storage);
		assert!(remounted.snapshot().is_pinned);
		assert!(remounted.is_expanded());
	}

	#[test]
	fn test_pin_lost_with_new_session() {
		let sidebar = SidebarState::new(Arc::new(MemoryStorage::new()));
		sidebar.set_pinned(true);

		let fresh = SidebarState::new(Arc::new(MemoryStorage::new()));
		assert!(!fresh.snapshot().is_pinned);
	}

	#[test]
	fn test_hover_is_not_persisted() {
		let storage = Arc::new(MemoryStorage::new());
		let sidebar = SidebarState::new(storage.clone());
		sidebar.set_hovered(true);
		assert!(sidebar.is_expanded());
		assert!(storage.is_empty());

		sidebar.set_hovered(false);
		assert!(!sidebar.is_expanded());
	}

	#[test]
	fn test_subscribers_see_changes_only() {
		let sidebar = SidebarState::new(Arc::new(MemoryStorage::new()));
		let mut rx = sidebar.subscribe();

		sidebar.set_hovered(false);
		assert!(!rx.has_changed().unwrap());

		sidebar.set_hovered(true);
		assert!(rx.has_changed().unwrap());
		assert!(rx.borrow_and_update().is_expanded());
	}
}
