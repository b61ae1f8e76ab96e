// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key-structure comparison across locales.
//!
//! Bundles of one namespace are expected to share a key structure. Nothing at
//! runtime enforces that; this module only reports drift.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use serde::Serialize;

use crate::bundle::Bundle;
use crate::locale::Locale;

/// Key differences between one locale and the reference locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocaleDiff {
	pub locale: Locale,
	/// Present in the reference, absent here
	pub missing: Vec<String>,
	/// Present here, absent from the reference
	pub extra: Vec<String>,
}

impl LocaleDiff {
	pub fn is_clean(&self) -> bool {
		self.missing.is_empty() && self.extra.is_empty()
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuditReport {
	pub namespace: String,
	pub reference: Locale,
	/// Locales that differ from the reference. Empty locales are not listed here.
	pub diffs: Vec<LocaleDiff>,
	/// Locales with no keys at all, including the reference if it is empty.
	pub empty_locales: Vec<Locale>,
}

impl AuditReport {
	pub fn is_clean(&self) -> bool {
		self.diffs.is_empty() && self.empty_locales.is_empty()
	}
}

/// Compare the key paths of every bundle against `reference`.
///
/// A locale absent from `bundles` is treated as empty.
pub fn audit_namespace(
	namespace: &str,
	bundles: &BTreeMap<Locale, Arc<Bundle>>,
	reference: Locale,
) -> AuditReport {
	let key_set = |locale: &Locale| -> BTreeSet<String> {
		bundles
			.get(locale)
			.map(|bundle| bundle.key_paths().into_iter().collect())
			.unwrap_or_default()
	};

	let reference_keys = key_set(&reference);
	let mut diffs = Vec::new();
	let mut empty_locales = Vec::new();

	if reference_keys.is_empty() {
		empty_locales.push(reference);
	}

	for locale in bundles.keys().filter(|locale| **locale != reference) {
		let keys = key_set(locale);
		if keys.is_empty() {
			empty_locales.push(*locale);
			continue;
		}

		let diff = LocaleDiff {
			locale: *locale,
			missing: reference_keys.difference(&keys).cloned().collect(),
			extra: keys.difference(&reference_keys).cloned().collect(),
		};
		if !diff.is_clean() {
			diffs.push(diff);
		}
	}

	empty_locales.sort();
	AuditReport {
		namespace: namespace.to_string(),
		reference,
		diffs,
		empty_locales,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn bundle(value: serde_json::Value) -> Arc<Bundle> {
		Arc::new(Bundle::try_from(value).unwrap())
	}

	#[test]
	fn test_matching_locales_are_clean() {
		let bundles = BTreeMap::from([
			(Locale::Es, bundle(json!({ "nav": { "home": "Inicio" } }))),
			(Locale::En, bundle(json!({ "nav": { "home": "Home" } }))),
		]);
		let report = audit_namespace("home", &bundles, Locale::Es);
		assert!(report.is_clean());
		assert_eq!(report.namespace, "home");
	}

	#[test]
	fn test_missing_and_extra_keys() {
		let bundles = BTreeMap::from([
			(
				Locale::Es,
				bundle(json!({ "nav": { "home": "Inicio", "blog": "Blog" } })),
			),
			(
				Locale::Fr,
				bundle(json!({ "nav": { "home": "Accueil", "contact": "Contact" } })),
			),
		]);
		let report = audit_namespace("home", &bundles, Locale::Es);

		assert!(!report.is_clean());
		assert_eq!(
			report.diffs,
			vec![LocaleDiff {
				locale: Locale::Fr,
				missing: vec!["nav.blog".to_string()],
				extra: vec!["nav.contact".to_string()],
			}]
		);
	}

	#[test]
	fn test_empty_locales_reported_separately() {
		let bundles = BTreeMap::from([
			(Locale::Es, bundle(json!({ "title": "Hola" }))),
			(Locale::Ja, Arc::new(Bundle::empty())),
		]);
		let report = audit_namespace("home", &bundles, Locale::Es);

		assert!(report.diffs.is_empty());
		assert_eq!(report.empty_locales, vec![Locale::Ja]);
		assert!(!report.is_clean());
	}

	#[test]
	fn test_absent_reference_counts_as_empty() {
		let bundles = BTreeMap::from([(Locale::En, bundle(json!({ "title": "Hello" })))]);
		let report = audit_namespace("home", &bundles, Locale::Es);

		assert_eq!(report.empty_locales, vec![Locale::Es]);
		assert_eq!(report.diffs[0].extra, vec!["title"]);
	}
}
