// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::ClientStorage;

/// Session storage: values live as long as this instance.
#[derive(Debug, Default)]
pub struct MemoryStorage {
	values: RwLock<HashMap<String, String>>,
}

impl MemoryStorage {
	pub fn new() -> Self {
		Self::default()
	}

	/// Number of stored keys.
	pub fn len(&self) -> usize {
		self.values.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.read().is_empty()
	}
}

impl ClientStorage for MemoryStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.values.read().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		self.values.write().insert(key.to_string(), value.to_string());
	}

	fn remove(&self, key: &str) {
		self.values.write().remove(key);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_set_get_remove() {
		let storage = MemoryStorage::new();
		assert!(storage.is_empty());

		storage.set("a", "1");
		storage.set("a", "2");
		assert_eq!(storage.get("a").as_deref(), Some("2"));
		assert_eq!(storage.len(), 1);

		storage.remove("a");
		assert_eq!(storage.get("a"), None);
	}

	#[test]
	fn test_memory_storage_is_not_persistent() {
		assert!(!MemoryStorage::new().is_persistent());
	}
}
