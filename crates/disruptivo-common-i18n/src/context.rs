// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-wide translation context.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use disruptivo_common_storage::ClientStorage;
use futures::future::join_all;
use parking_lot::RwLock;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::audit::{audit_namespace, AuditReport};
use crate::bundle::Bundle;
use crate::catalog::{translate, translate_fmt};
use crate::loader::{BundleLoader, LoadOutcome};
use crate::locale::{available_locales, Locale, LocaleInfo, DEFAULT_LOCALE};
use crate::resolve::LocaleResolution;
use crate::source::{canonical_namespace, BundleSource};
use crate::store::LocaleStore;

const EVENT_CAPACITY: usize = 64;

/// Changes published by [`ModularTranslations`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationEvent {
	/// The active locale was resolved at mount.
	LocaleResolved {
		locale: Locale,
		resolution: LocaleResolution,
	},
	/// The active locale was changed explicitly.
	LocaleChanged { from: Locale, to: Locale },
	/// A bundle fetch completed. `empty` is true when nothing usable was found.
	NamespaceLoaded {
		namespace: String,
		locale: Locale,
		empty: bool,
	},
}

struct Inner {
	store: LocaleStore,
	loader: BundleLoader,
	requested: RwLock<BTreeSet<String>>,
	loading: AtomicBool,
	events: broadcast::Sender<TranslationEvent>,
}

/// Locale state, bundle loading and key resolution for one session.
///
/// Cloning is cheap; all clones share the same cache and locale.
#[derive(Clone)]
pub struct ModularTranslations {
	inner: Arc<Inner>,
}

impl ModularTranslations {
	pub fn new(source: Arc<dyn BundleSource>, storage: Arc<dyn ClientStorage>) -> Self {
		Self::with_default_locale(source, storage, DEFAULT_LOCALE)
	}

	pub fn with_default_locale(
		source: Arc<dyn BundleSource>,
		storage: Arc<dyn ClientStorage>,
		default_locale: Locale,
	) -> Self {
		let (events, _) = broadcast::channel(EVENT_CAPACITY);
		Self {
			inner: Arc::new(Inner {
				store: LocaleStore::with_default(storage, default_locale),
				loader: BundleLoader::new(source),
				requested: RwLock::new(BTreeSet::new()),
				loading: AtomicBool::new(true),
				events,
			}),
		}
	}

	/// Resolve the active locale and leave the loading state.
	pub fn mount(&self, detected_language: Option<&str>) -> LocaleResolution {
		let resolution = self.inner.store.initialize(detected_language);
		self.inner.loading.store(false, Ordering::Release);
		self.emit(TranslationEvent::LocaleResolved {
			locale: resolution.locale(),
			resolution,
		});
		resolution
	}

	pub fn locale(&self) -> Locale {
		self.inner.store.active()
	}

	pub fn default_locale(&self) -> Locale {
		self.inner.store.default_locale()
	}

	/// True until [`ModularTranslations::mount`] has run.
	pub fn is_loading(&self) -> bool {
		self.inner.loading.load(Ordering::Acquire)
	}

	pub fn is_auto_detected(&self) -> bool {
		self.inner.store.is_auto_detected()
	}

	/// Switch and persist the active locale, then load it for every namespace
	/// already requested this session.
	///
	/// Selecting the active locale again saves it as the preference without
	/// publishing a change.
	pub async fn change_locale(&self, locale: Locale) {
		let from = self.locale();
		if from == locale {
			self.inner.store.set_active(locale);
			debug!(%locale, "locale unchanged, preference saved");
			return;
		}

		self.inner.store.set_active(locale);
		info!(%from, to = %locale, "locale changed");
		self.emit(TranslationEvent::LocaleChanged { from, to: locale });

		let namespaces = self.requested_namespaces();
		let loads = namespaces
			.iter()
			.map(|namespace| self.inner.loader.load_slot(namespace, locale));
		for (namespace, outcome) in namespaces.iter().zip(join_all(loads).await) {
			self.report(namespace, locale, &outcome);
		}
	}

	/// Request a namespace for the active locale and the default locale.
	///
	/// Both slots are loaded concurrently. Repeated calls reuse the cache.
	pub async fn load_modular_translation(&self, namespace: &str) {
		let namespace = match canonical_namespace(namespace) {
			Ok(namespace) => namespace,
			Err(e) => {
				warn!(error = %e, "ignoring invalid namespace request");
				return;
			}
		};
		self.inner.requested.write().insert(namespace.clone());

		let active = self.locale();
		let default = self.default_locale();
		let loader = &self.inner.loader;

		if active == default {
			let outcome = loader.load_slot(&namespace, active).await;
			self.report(&namespace, active, &outcome);
			return;
		}

		let (active_outcome, default_outcome) = futures::join!(
			loader.load_slot(&namespace, active),
			loader.load_slot(&namespace, default)
		);
		self.report(&namespace, active, &active_outcome);
		self.report(&namespace, default, &default_outcome);
	}

	/// Resolve `key_path` in `namespace` against whatever is cached.
	///
	/// Never blocks; a namespace that is not loaded yet resolves to the key.
	pub fn t(&self, namespace: &str, key_path: &str) -> String {
		let (active, fallback) = self.bundles(namespace);
		translate(active.as_deref(), fallback.as_deref(), key_path)
	}

	/// [`ModularTranslations::t`] with `{name}` substitution.
	pub fn t_fmt(&self, namespace: &str, key_path: &str, vars: &[(&str, &str)]) -> String {
		let (active, fallback) = self.bundles(namespace);
		translate_fmt(active.as_deref(), fallback.as_deref(), key_path, vars)
	}

	fn bundles(&self, namespace: &str) -> (Option<Arc<Bundle>>, Option<Arc<Bundle>>) {
		let active = self.locale();
		let default = self.default_locale();
		let loader = &self.inner.loader;

		let fallback = if active == default {
			None
		} else {
			loader.get(namespace, default)
		};
		(loader.get(namespace, active), fallback)
	}

	pub fn subscribe(&self) -> broadcast::Receiver<TranslationEvent> {
		self.inner.events.subscribe()
	}

	pub fn available_locales(&self) -> &'static [LocaleInfo] {
		available_locales()
	}

	/// Namespaces requested through [`ModularTranslations::load_modular_translation`], sorted.
	pub fn requested_namespaces(&self) -> Vec<String> {
		self.inner.requested.read().iter().cloned().collect()
	}

	pub fn is_loaded(&self, namespace: &str, locale: Locale) -> bool {
		self.inner.loader.is_loaded(namespace, locale)
	}

	/// Load `namespace` in every supported locale and compare key sets against
	/// the default locale.
	pub async fn audit(&self, namespace: &str) -> AuditReport {
		let reference = self.default_locale();
		let loader = &self.inner.loader;
		let loads = Locale::ALL
			.into_iter()
			.map(|locale| async move { (locale, loader.load(namespace, locale).await) });
		let bundles: BTreeMap<Locale, Arc<Bundle>> = join_all(loads).await.into_iter().collect();
		audit_namespace(namespace, &bundles, reference)
	}

	fn report(&self, namespace: &str, locale: Locale, outcome: &LoadOutcome) {
		if outcome.fetched {
			self.emit(TranslationEvent::NamespaceLoaded {
				namespace: namespace.to_string(),
				locale,
				empty: outcome.bundle.is_empty(),
			});
		}
	}

	fn emit(&self, event: TranslationEvent) {
		// No receivers is fine.
		let _ = self.inner.events.send(event);
	}
}
