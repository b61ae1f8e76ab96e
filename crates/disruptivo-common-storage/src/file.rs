// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Durable storage backed by one JSON document.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::{ClientStorage, StorageError};

/// Read a storage document: a JSON object mapping keys to string values.
///
/// A missing file yields an empty map.
pub fn read_document(path: &Path) -> Result<HashMap<String, String>, StorageError> {
	let bytes = match fs::read(path) {
		Ok(bytes) => bytes,
		Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(HashMap::new()),
		Err(e) => return Err(StorageError::io(path, e)),
	};

	serde_json::from_slice(&bytes).map_err(|source| StorageError::Malformed {
		path: path.to_path_buf(),
		source,
	})
}

/// Write a storage document atomically using temp file + rename.
///
/// Creates parent directories if needed. Keys are written sorted.
pub fn write_document(path: &Path, values: &HashMap<String, String>) -> Result<(), StorageError> {
	if let Some(parent) = path.parent() {
		if !parent.as_os_str().is_empty() {
			fs::create_dir_all(parent).map_err(|e| StorageError::io(parent, e))?;
		}
	}

	let sorted: BTreeMap<&String, &String> = values.iter().collect();
	let bytes = serde_json::to_vec_pretty(&sorted)?;

	let tmp_path = path.with_extension("tmp");
	fs::write(&tmp_path, bytes).map_err(|e| StorageError::io(&tmp_path, e))?;
	fs::rename(&tmp_path, path).map_err(|e| StorageError::io(path, e))?;

	Ok(())
}

/// Durable storage: every write is flushed to a JSON document on disk.
///
/// The in-memory view is authoritative. If the document cannot be written the
/// instance degrades to memory-only for the rest of its lifetime.
#[derive(Debug)]
pub struct FileStorage {
	path: PathBuf,
	values: RwLock<HashMap<String, String>>,
	persistent: AtomicBool,
}

impl FileStorage {
	/// Open the storage document at `path`.
	///
	/// Never fails: an unreadable or malformed document is logged and
	/// treated as empty.
	pub fn open(path: impl Into<PathBuf>) -> Self {
		let path = path.into();
		let values = match read_document(&path) {
			Ok(values) => {
				debug!(path = %path.display(), keys = values.len(), "opened client storage");
				values
			}
			Err(e) => {
				warn!(path = %path.display(), error = %e, "client storage unreadable, starting empty");
				HashMap::new()
			}
		};

		Self {
			path,
			values: RwLock::new(values),
			persistent: AtomicBool::new(true),
		}
	}

	/// Location of the backing document.
	pub fn path(&self) -> &Path {
		&self.path
	}

	fn flush(&self, values: &HashMap<String, String>) {
		if !self.persistent.load(Ordering::Acquire) {
			return;
		}

		if let Err(e) = write_document(&self.path, values) {
			warn!(
					path = %self.path.display(),
					error = %e,
					"client storage write failed, continuing in memory only"
			);
			self.persistent.store(false, Ordering::Release);
		}
	}
}

impl ClientStorage for FileStorage {
	fn get(&self, key: &str) -> Option<String> {
		self.values.read().get(key).cloned()
	}

	fn set(&self, key: &str, value: &str) {
		let mut values = self.values.write();
		values.insert(key.to_string(), value.to_string());
		self.flush(&values);
	}

	fn remove(&self, key: &str) {
		let mut values = self.values.write();
		if values.remove(key).is_some() {
			self.flush(&values);
		}
	}

	fn is_persistent(&self) -> bool {
		self.persistent.load(Ordering::Acquire)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;
	use tempfile::tempdir;

	#[test]
	fn test_values_survive_reopen() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("storage.json");

		let storage = FileStorage::open(&path);
		storage.set("disruptivo.locale", "en");
		storage.set("disruptivo.admin.theme", "light");
		drop(storage);

		let reopened = FileStorage::open(&path);
		assert_eq!(reopened.get("disruptivo.locale").as_deref(), Some("en"));
		assert_eq!(reopened.get("disruptivo.admin.theme").as_deref(), Some("light"));
		assert!(reopened.is_persistent());
	}

	#[test]
	fn test_remove_is_persisted() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("storage.json");

		let storage = FileStorage::open(&path);
		storage.set("k", "v");
		storage.remove("k");

		assert_eq!(FileStorage::open(&path).get("k"), None);
	}

	#[test]
	fn test_missing_file_is_empty() {
		let dir = tempdir().unwrap();
		let storage = FileStorage::open(dir.path().join("nested/dir/storage.json"));
		assert_eq!(storage.get("anything"), None);

		storage.set("k", "v");
		assert!(dir.path().join("nested/dir/storage.json").exists());
	}

	#[test]
	fn test_malformed_document_starts_empty() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("storage.json");
		fs::write(&path, b"{not json").unwrap();

		let storage = FileStorage::open(&path);
		assert_eq!(storage.get("k"), None);

		assert!(matches!(
			read_document(&path),
			Err(StorageError::Malformed { .. })
		));
	}

	#[test]
	fn test_write_failure_degrades_to_memory() {
		let dir = tempdir().unwrap();
		let blocker = dir.path().join("blocker");
		fs::write(&blocker, b"file, not a directory").unwrap();

		let storage = FileStorage::open(blocker.join("storage.json"));
		storage.set("disruptivo.locale", "fr");

		assert!(!storage.is_persistent());
		assert_eq!(storage.get("disruptivo.locale").as_deref(), Some("fr"));

		storage.set("disruptivo.locale", "pt");
		assert_eq!(storage.get("disruptivo.locale").as_deref(), Some("pt"));
	}

	#[test]
	fn test_document_is_sorted_json_object() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("storage.json");

		let storage = FileStorage::open(&path);
		storage.set("b", "2");
		storage.set("a", "1");

		let text = fs::read_to_string(&path).unwrap();
		let a = text.find("\"a\"").unwrap();
		let b = text.find("\"b\"").unwrap();
		assert!(a < b);
		assert!(!path.with_extension("tmp").exists());
	}

	proptest! {
		#[test]
		fn document_roundtrip_preserves_values(
			entries in prop::collection::hash_map("[a-z.]{1,20}", "\\PC{0,30}", 0..10)
		) {
			let dir = tempdir().unwrap();
			let path = dir.path().join("storage.json");
			write_document(&path, &entries).unwrap();
			prop_assert_eq!(read_document(&path).unwrap(), entries);
		}
	}
}
