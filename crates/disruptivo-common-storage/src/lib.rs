// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Client-side key/value storage for Disruptivo.
//!
//! Two flavours are provided behind the [`ClientStorage`] trait:
//!
//! - [`FileStorage`]: durable storage backed by a single JSON document on disk.
//!   Values survive restarts, like browser local storage.
//! - [`MemoryStorage`]: session storage that lives as long as the process.
//!
//! Storage operations never fail from the caller's point of view. When the
//! disk cannot be written, [`FileStorage`] logs a warning and keeps serving
//! values from memory for the rest of the session.
//!
//! # Example
//!
//! ```
//! use disruptivo_common_storage::{ClientStorage, MemoryStorage};
//!
//! let storage = MemoryStorage::new();
//! storage.set("disruptivo.locale", "en");
//! assert_eq!(storage.get("disruptivo.locale").as_deref(), Some("en"));
//! ```

mod error;
mod file;
mod memory;

pub use error::StorageError;
pub use file::{read_document, write_document, FileStorage};
pub use memory::MemoryStorage;

/// A string key/value store shared by UI state objects.
pub trait ClientStorage: Send + Sync {
	/// Read the value stored under `key`.
	fn get(&self, key: &str) -> Option<String>;

	/// Store `value` under `key`, replacing any previous value.
	fn set(&self, key: &str, value: &str);

	/// Remove the value stored under `key`, if any.
	fn remove(&self, key: &str);

	/// Whether writes currently reach durable storage.
	fn is_persistent(&self) -> bool {
		false
	}
}
