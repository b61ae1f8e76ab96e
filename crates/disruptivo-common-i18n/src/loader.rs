// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Lazy, deduplicated bundle loading.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, instrument, trace, warn};

use crate::bundle::Bundle;
use crate::cache::BundleCache;
use crate::locale::Locale;
use crate::source::{canonical_namespace, BundleSource};

/// Result of a [`BundleLoader::load_slot`] call.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
	pub bundle: Arc<Bundle>,
	/// True if this call performed the fetch, false if it reused a cached or
	/// in-flight load.
	pub fetched: bool,
}

/// Fetches bundles through a [`BundleSource`] into a [`BundleCache`].
///
/// Concurrent requests for the same slot share a single fetch. Failed
/// fetches are cached as empty bundles and never retried.
pub struct BundleLoader {
	source: Arc<dyn BundleSource>,
	cache: BundleCache,
}

impl BundleLoader {
	pub fn new(source: Arc<dyn BundleSource>) -> Self {
		Self {
			source,
			cache: BundleCache::new(),
		}
	}

	pub fn cache(&self) -> &BundleCache {
		&self.cache
	}

	pub fn source_name(&self) -> &'static str {
		self.source.name()
	}

	/// Load the bundle for `namespace` in `locale`, fetching at most once.
	pub async fn load(&self, namespace: &str, locale: Locale) -> Arc<Bundle> {
		self.load_slot(namespace, locale).await.bundle
	}

	/// Like [`BundleLoader::load`], also reporting whether this call fetched.
	///
	/// An invalid namespace yields an empty bundle that is not cached.
	#[instrument(skip(self), fields(source = self.source.name()))]
	pub async fn load_slot(&self, namespace: &str, locale: Locale) -> LoadOutcome {
		let namespace = match canonical_namespace(namespace) {
			Ok(namespace) => namespace,
			Err(e) => {
				warn!(error = %e, "refusing to load invalid namespace");
				return LoadOutcome {
					bundle: Arc::new(Bundle::empty()),
					fetched: false,
				};
			}
		};

		let slot = self.cache.slot(&namespace, locale);
		if let Some(bundle) = slot.get() {
			trace!("bundle cache hit");
			return LoadOutcome {
				bundle: bundle.clone(),
				fetched: false,
			};
		}

		let fetched = AtomicBool::new(false);
		let (flag, name) = (&fetched, namespace.as_str());
		let bundle = slot
			.get_or_init(|| async move {
				flag.store(true, Ordering::Release);
				Arc::new(self.fetch(name, locale).await)
			})
			.await
			.clone();

		LoadOutcome {
			bundle,
			fetched: fetched.load(Ordering::Acquire),
		}
	}

	async fn fetch(&self, namespace: &str, locale: Locale) -> Bundle {
		match self.source.fetch(namespace, locale).await {
			Ok(bundle) => {
				debug!(keys = bundle.len(), "bundle loaded");
				bundle
			}
			Err(e) if e.is_not_found() => {
				debug!("no bundle document, caching empty bundle");
				Bundle::empty()
			}
			Err(e) => {
				warn!(error = %e, "bundle load failed, caching empty bundle");
				Bundle::empty()
			}
		}
	}

	/// Non-blocking peek at a completed slot.
	pub fn get(&self, namespace: &str, locale: Locale) -> Option<Arc<Bundle>> {
		let namespace = canonical_namespace(namespace).ok()?;
		self.cache.get(&namespace, locale)
	}

	pub fn is_loaded(&self, namespace: &str, locale: Locale) -> bool {
		self.get(namespace, locale).is_some()
	}

	pub fn loaded_namespaces(&self) -> Vec<String> {
		self.cache.loaded_namespaces()
	}
}
