// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-scoped bundle cache.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::OnceCell;

use crate::bundle::Bundle;
use crate::locale::Locale;

/// A single-assignment cell for one (namespace, locale) pair.
pub(crate) type Slot = Arc<OnceCell<Arc<Bundle>>>;

/// Map from (namespace, locale) to bundle.
///
/// Slots are created insert-if-absent and each is written at most once.
/// Namespaces are expected in canonical dotted form.
#[derive(Debug, Default)]
pub struct BundleCache {
	slots: Mutex<HashMap<(String, Locale), Slot>>,
}

impl BundleCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Get the slot for a pair, creating an empty one if absent.
	pub(crate) fn slot(&self, namespace: &str, locale: Locale) -> Slot {
		self
			.slots
			.lock()
			.entry((namespace.to_string(), locale))
			.or_default()
			.clone()
	}

	/// The bundle for a pair, if its load has completed.
	pub fn get(&self, namespace: &str, locale: Locale) -> Option<Arc<Bundle>> {
		let slots = self.slots.lock();
		slots
			.get(&(namespace.to_string(), locale))
			.and_then(|slot| slot.get().cloned())
	}

	pub fn is_loaded(&self, namespace: &str, locale: Locale) -> bool {
		self.get(namespace, locale).is_some()
	}

	/// Namespaces with at least one completed slot, sorted.
	pub fn loaded_namespaces(&self) -> Vec<String> {
		let slots = self.slots.lock();
		slots
			.iter()
			.filter(|(_, slot)| slot.initialized())
			.map(|((namespace, _), _)| namespace.clone())
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	/// Number of completed slots.
	pub fn len(&self) -> usize {
		self.slots.lock().values().filter(|slot| slot.initialized()).count()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
