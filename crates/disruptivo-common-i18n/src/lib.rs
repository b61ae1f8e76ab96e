// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Modular translations for the Disruptivo Lab site.
//!
//! Translations are split into namespaces (`home`, `blog.post`,
//! `admin.sidebar`) that are loaded on demand, per locale, and cached for the
//! session. Keys are dot-separated paths into a bundle's JSON tree.
//!
//! Lookups never fail: a key missing from the active locale falls back to the
//! default locale (`es`), then to the key itself.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use disruptivo_common_i18n::{Locale, ModularTranslations, StaticBundleSource};
//! use disruptivo_common_storage::MemoryStorage;
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let source = StaticBundleSource::new()
//! 	.with_document("home", Locale::Es, json!({ "greeting": "Hola {name}" }))
//! 	.with_document("home", Locale::En, json!({ "greeting": "Hello {name}" }));
//!
//! let i18n = ModularTranslations::new(Arc::new(source), Arc::new(MemoryStorage::new()));
//! i18n.mount(Some("en-US"));
//! i18n.load_modular_translation("home").await;
//!
//! assert_eq!(i18n.t_fmt("home", "greeting", &[("name", "Ana")]), "Hello Ana");
//! assert_eq!(i18n.t("home", "missing.key"), "missing.key");
//! # });
//! ```

mod audit;
mod bundle;
mod cache;
mod catalog;
mod context;
mod error;
mod loader;
mod locale;
mod resolve;
mod source;
mod store;

pub use audit::{audit_namespace, AuditReport, LocaleDiff};
pub use bundle::{Bundle, TranslationNode};
pub use cache::BundleCache;
pub use catalog::{interpolate, translate, translate_fmt};
pub use context::{ModularTranslations, TranslationEvent};
pub use error::BundleError;
pub use loader::{BundleLoader, LoadOutcome};
pub use locale::{available_locales, is_supported, Locale, LocaleInfo, UnsupportedLocale};
pub use resolve::{resolve_locale, LocaleResolution};
pub use source::{
	canonical_namespace, document_path, namespace_segments, BundleSource, FsBundleSource,
	HttpBundleSource, StaticBundleSource,
};
pub use store::{LocaleStore, LOCALE_STORAGE_KEY};

pub use locale::{DEFAULT_LOCALE, LOCALES};
