// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Persisted active-locale value.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use disruptivo_common_storage::ClientStorage;
use parking_lot::RwLock;
use tracing::{debug, info};

use crate::locale::{Locale, DEFAULT_LOCALE};
use crate::resolve::{resolve_locale, LocaleResolution};

/// Storage key for the saved locale preference.
pub const LOCALE_STORAGE_KEY: &str = "disruptivo.locale";

/// Holds the active locale and persists explicit changes.
///
/// Until [`LocaleStore::initialize`] runs, the default locale is active.
pub struct LocaleStore {
	storage: Arc<dyn ClientStorage>,
	default_locale: Locale,
	active: RwLock<Locale>,
	auto_detected: AtomicBool,
}

impl LocaleStore {
	pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
		Self::with_default(storage, DEFAULT_LOCALE)
	}

	pub fn with_default(storage: Arc<dyn ClientStorage>, default_locale: Locale) -> Self {
		Self {
			storage,
			default_locale,
			active: RwLock::new(default_locale),
			auto_detected: AtomicBool::new(false),
		}
	}

	/// Resolve the active locale from storage and the runtime language.
	///
	/// Detection does not write storage; only [`LocaleStore::set_active`] does.
	pub fn initialize(&self, detected_language: Option<&str>) -> LocaleResolution {
		let saved = self.storage.get(LOCALE_STORAGE_KEY);
		if let Some(value) = saved.as_deref() {
			if Locale::from_code(value).is_none() {
				debug!(value, "ignoring unsupported saved locale");
			}
		}

		let resolution = resolve_locale(saved.as_deref(), detected_language, self.default_locale);
		*self.active.write() = resolution.locale();
		self
			.auto_detected
			.store(resolution.is_auto_detected(), Ordering::Release);

		info!(
				locale = %resolution.locale(),
				resolution = ?resolution,
				"active locale resolved"
		);
		resolution
	}

	pub fn active(&self) -> Locale {
		*self.active.read()
	}

	/// Switch the active locale and persist it immediately.
	pub fn set_active(&self, locale: Locale) {
		*self.active.write() = locale;
		self.auto_detected.store(false, Ordering::Release);
		self.storage.set(LOCALE_STORAGE_KEY, locale.code());
	}

	/// True when the active locale came from runtime detection rather than a
	/// saved preference.
	pub fn is_auto_detected(&self) -> bool {
		self.auto_detected.load(Ordering::Acquire)
	}

	pub fn default_locale(&self) -> Locale {
		self.default_locale
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use disruptivo_common_storage::{FileStorage, MemoryStorage};
	use tempfile::tempdir;

	#[test]
	fn test_default_before_initialize() {
		let store = LocaleStore::new(Arc::new(MemoryStorage::new()));
		assert_eq!(store.active(), Locale::Es);
		assert!(!store.is_auto_detected());
	}

	#[test]
	fn test_detection_marks_auto_detected_without_persisting() {
		let storage = Arc::new(MemoryStorage::new());
		let store = LocaleStore::new(storage.clone());

		let resolution = store.initialize(Some("ko-KR"));
		assert_eq!(resolution, LocaleResolution::Detected(Locale::Ko));
		assert_eq!(store.active(), Locale::Ko);
		assert!(store.is_auto_detected());
		assert_eq!(storage.get(LOCALE_STORAGE_KEY), None);
	}

	#[test]
	fn test_unsupported_detection_uses_default() {
		let store = LocaleStore::new(Arc::new(MemoryStorage::new()));
		assert_eq!(
			store.initialize(Some("de-DE")),
			LocaleResolution::Default(Locale::Es)
		);
		assert_eq!(store.initialize(None).locale(), Locale::Es);
	}

	#[test]
	fn test_persistence_round_trip_across_reload() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("storage.json");

		let store = LocaleStore::new(Arc::new(FileStorage::open(&path)));
		store.initialize(Some("fr-FR"));
		store.set_active(Locale::En);
		assert!(!store.is_auto_detected());
		drop(store);

		let reloaded = LocaleStore::new(Arc::new(FileStorage::open(&path)));
		let resolution = reloaded.initialize(Some("fr-FR"));
		assert_eq!(resolution, LocaleResolution::Persisted(Locale::En));
		assert_eq!(reloaded.active(), Locale::En);
		assert!(!reloaded.is_auto_detected());
	}

	#[test]
	fn test_cleared_storage_behaves_like_first_visit() {
		let storage = Arc::new(MemoryStorage::new());
		let store = LocaleStore::new(storage.clone());
		store.set_active(Locale::Ja);

		storage.remove(LOCALE_STORAGE_KEY);
		let resolution = LocaleStore::new(storage).initialize(Some("pt-PT"));
		assert_eq!(resolution, LocaleResolution::Detected(Locale::Pt));
	}

	#[test]
	fn test_custom_default_locale() {
		let store = LocaleStore::with_default(Arc::new(MemoryStorage::new()), Locale::En);
		assert_eq!(store.active(), Locale::En);
		assert_eq!(store.initialize(None), LocaleResolution::Default(Locale::En));
		assert_eq!(store.default_locale(), Locale::En);
	}
}
