// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Where bundle documents come from.
//!
//! Every source maps a (namespace, locale) pair to the document
//! `<namespace segments>/<locale>.json`, so `blog.post` in English lives at
//! `blog/post/en.json`.

use std::collections::{BTreeSet, HashMap};
use std::io;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use tracing::{debug, trace};
use url::Url;

use crate::bundle::Bundle;
use crate::error::BundleError;
use crate::locale::{Locale, LOCALES};

/// Split a namespace on `.` and `/` and validate each segment.
///
/// Segments must be non-empty and contain only ASCII letters, digits, `_`
/// or `-`.
pub fn namespace_segments(namespace: &str) -> Result<Vec<&str>, BundleError> {
	let segments: Vec<&str> = namespace.split(['.', '/']).collect();
	let valid = segments.iter().all(|segment| {
		!segment.is_empty()
			&& segment
				.chars()
				.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
	});

	if valid {
		Ok(segments)
	} else {
		Err(BundleError::InvalidNamespace(namespace.to_string()))
	}
}

/// Canonical dotted form of a namespace: `admin/sidebar` becomes `admin.sidebar`.
pub fn canonical_namespace(namespace: &str) -> Result<String, BundleError> {
	Ok(namespace_segments(namespace)?.join("."))
}

/// Relative document path for a namespace and locale, e.g. `blog/post/en.json`.
pub fn document_path(namespace: &str, locale: Locale) -> Result<String, BundleError> {
	let mut path = namespace_segments(namespace)?.join("/");
	path.push('/');
	path.push_str(locale.code());
	path.push_str(".json");
	Ok(path)
}

/// A fetch-by-name provider of translation documents.
#[async_trait]
pub trait BundleSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Fetch and parse the bundle for `namespace` in `locale`.
	async fn fetch(&self, namespace: &str, locale: Locale) -> Result<Bundle, BundleError>;
}

/// Documents read from a directory tree on disk.
#[derive(Debug, Clone)]
pub struct FsBundleSource {
	root: PathBuf,
}

impl FsBundleSource {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}

	/// List the namespaces that have at least one locale document on disk.
	///
	/// A directory is a namespace when it directly contains `<locale>.json`
	/// for some supported locale. Returned in canonical dotted form, sorted.
	pub async fn namespaces(&self) -> Result<Vec<String>, BundleError> {
		let mut found = BTreeSet::new();
		let mut pending = vec![self.root.clone()];

		while let Some(dir) = pending.pop() {
			let mut entries = match tokio::fs::read_dir(&dir).await {
				Ok(entries) => entries,
				Err(e) if e.kind() == io::ErrorKind::NotFound => continue,
				Err(source) => return Err(BundleError::Io { path: dir, source }),
			};

			let mut has_document = false;
			loop {
				let entry = match entries.next_entry().await {
					Ok(Some(entry)) => entry,
					Ok(None) => break,
					Err(source) => {
						return Err(BundleError::Io {
							path: dir.clone(),
							source,
						})
					}
				};
				let path = entry.path();
				let file_type = match entry.file_type().await {
					Ok(file_type) => file_type,
					Err(source) => return Err(BundleError::Io { path, source }),
				};

				// Symlinked directories are not followed.
				if file_type.is_dir() {
					pending.push(path);
				} else if is_locale_document(&path) {
					has_document = true;
				}
			}

			if has_document {
				if let Some(namespace) = self.namespace_of(&dir) {
					found.insert(namespace);
				}
			}
		}

		Ok(found.into_iter().collect())
	}

	fn namespace_of(&self, dir: &Path) -> Option<String> {
		let relative = dir.strip_prefix(&self.root).ok()?;
		let segments: Vec<String> = relative
			.components()
			.map(|c| c.as_os_str().to_string_lossy().into_owned())
			.collect();
		if segments.is_empty() {
			return None;
		}
		canonical_namespace(&segments.join(".")).ok()
	}
}

fn is_locale_document(path: &Path) -> bool {
	path.extension().is_some_and(|ext| ext == "json")
		&& path
			.file_stem()
			.and_then(|stem| stem.to_str())
			.is_some_and(|stem| LOCALES.iter().any(|info| info.locale.code() == stem))
}

#[async_trait]
impl BundleSource for FsBundleSource {
	fn name(&self) -> &'static str {
		"filesystem"
	}

	async fn fetch(&self, namespace: &str, locale: Locale) -> Result<Bundle, BundleError> {
		let path = self.root.join(document_path(namespace, locale)?);
		trace!(path = %path.display(), "reading bundle document");

		let bytes = match tokio::fs::read(&path).await {
			Ok(bytes) => bytes,
			Err(e) if e.kind() == io::ErrorKind::NotFound => {
				return Err(BundleError::NotFound {
					namespace: namespace.to_string(),
					locale,
				})
			}
			Err(source) => return Err(BundleError::Io { path, source }),
		};

		Bundle::from_slice(&bytes)
	}
}

/// Documents fetched over HTTP, e.g. from the site's `/locales/` folder.
#[derive(Debug, Clone)]
pub struct HttpBundleSource {
	base_url: Url,
	http: reqwest::Client,
}

impl HttpBundleSource {
	/// Documents are resolved relative to `base_url`, which is treated as a
	/// directory even without a trailing slash.
	pub fn new(base_url: Url) -> Self {
		Self::with_client(base_url, reqwest::Client::new())
	}

	pub fn with_client(mut base_url: Url, http: reqwest::Client) -> Self {
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}
		Self { base_url, http }
	}

	/// Absolute URL of the document for a namespace and locale.
	pub fn document_url(&self, namespace: &str, locale: Locale) -> Result<Url, BundleError> {
		self
			.base_url
			.join(&document_path(namespace, locale)?)
			.map_err(|e| BundleError::InvalidUrl(e.to_string()))
	}
}

#[async_trait]
impl BundleSource for HttpBundleSource {
	fn name(&self) -> &'static str {
		"http"
	}

	async fn fetch(&self, namespace: &str, locale: Locale) -> Result<Bundle, BundleError> {
		let url = self.document_url(namespace, locale)?;
		debug!(url = %url, "fetching bundle document");

		let response = self.http.get(url.clone()).send().await?;
		let status = response.status();

		if status == reqwest::StatusCode::NOT_FOUND {
			return Err(BundleError::NotFound {
				namespace: namespace.to_string(),
				locale,
			});
		}
		if !status.is_success() {
			return Err(BundleError::UnexpectedStatus {
				status,
				url: url.to_string(),
			});
		}

		let bytes = response.bytes().await?;
		Bundle::from_slice(&bytes)
	}
}

/// Documents held in memory, keyed by canonical namespace and locale.
#[derive(Debug, Default)]
pub struct StaticBundleSource {
	documents: RwLock<HashMap<(String, Locale), Value>>,
}

impl StaticBundleSource {
	pub fn new() -> Self {
		Self::default()
	}

	/// Builder form of [`StaticBundleSource::insert`].
	pub fn with_document(self, namespace: &str, locale: Locale, document: Value) -> Self {
		self.insert(namespace, locale, document);
		self
	}

	/// Register a document. Invalid namespaces are ignored.
	pub fn insert(&self, namespace: &str, locale: Locale, document: Value) {
		if let Ok(namespace) = canonical_namespace(namespace) {
			self.documents.write().insert((namespace, locale), document);
		}
	}
}

#[async_trait]
impl BundleSource for StaticBundleSource {
	fn name(&self) -> &'static str {
		"static"
	}

	async fn fetch(&self, namespace: &str, locale: Locale) -> Result<Bundle, BundleError> {
		let key = (canonical_namespace(namespace)?, locale);
		let document = self.documents.read().get(&key).cloned();

		match document {
			Some(document) => Bundle::try_from(document),
			None => Err(BundleError::NotFound {
				namespace: key.0,
				locale,
			}),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;
	use tempfile::tempdir;

	#[test]
	fn test_namespace_segments() {
		assert_eq!(namespace_segments("home").unwrap(), vec!["home"]);
		assert_eq!(
			namespace_segments("admin/sidebar").unwrap(),
			vec!["admin", "sidebar"]
		);
		assert_eq!(
			namespace_segments("blog.post-detail").unwrap(),
			vec!["blog", "post-detail"]
		);
	}

	#[test]
	fn test_invalid_namespaces() {
		for namespace in ["", "a..b", "../etc", "a/", "with space", "a\\b"] {
			assert!(
				matches!(
					namespace_segments(namespace),
					Err(BundleError::InvalidNamespace(_))
				),
				"{namespace:?} should be rejected"
			);
		}
	}

	#[test]
	fn test_canonical_and_document_path() {
		assert_eq!(canonical_namespace("admin/sidebar").unwrap(), "admin.sidebar");
		assert_eq!(
			document_path("blog.post", Locale::En).unwrap(),
			"blog/post/en.json"
		);
	}

	#[tokio::test]
	async fn test_fs_source_reads_document() {
		let dir = tempdir().unwrap();
		std::fs::create_dir_all(dir.path().join("home")).unwrap();
		std::fs::write(
			dir.path().join("home/en.json"),
			r#"{"hero":{"title":"Disruptive innovation"}}"#,
		)
		.unwrap();

		let source = FsBundleSource::new(dir.path());
		let bundle = source.fetch("home", Locale::En).await.unwrap();
		assert_eq!(bundle.lookup("hero.title"), Some("Disruptive innovation"));
	}

	#[tokio::test]
	async fn test_fs_source_missing_document_is_not_found() {
		let dir = tempdir().unwrap();
		let source = FsBundleSource::new(dir.path());
		let err = source.fetch("home", Locale::Fr).await.unwrap_err();
		assert!(err.is_not_found());
	}

	#[tokio::test]
	async fn test_fs_source_malformed_document() {
		let dir = tempdir().unwrap();
		std::fs::create_dir_all(dir.path().join("home")).unwrap();
		std::fs::write(dir.path().join("home/es.json"), "{ nope").unwrap();

		let source = FsBundleSource::new(dir.path());
		let err = source.fetch("home", Locale::Es).await.unwrap_err();
		assert!(matches!(err, BundleError::Json(_)));
	}

	#[tokio::test]
	async fn test_fs_source_lists_namespaces() {
		let dir = tempdir().unwrap();
		let root = dir.path();
		for rel in ["home/es.json", "blog/en.json", "blog/post/es.json", "admin/notes.txt"] {
			let path = root.join(rel);
			std::fs::create_dir_all(path.parent().unwrap()).unwrap();
			std::fs::write(path, "{}").unwrap();
		}

		let source = FsBundleSource::new(root);
		assert_eq!(
			source.namespaces().await.unwrap(),
			vec!["blog", "blog.post", "home"]
		);
	}

	#[cfg(unix)]
	#[tokio::test]
	async fn test_fs_source_skips_symlinked_directories() {
		let dir = tempdir().unwrap();
		let root = dir.path();
		std::fs::create_dir_all(root.join("home")).unwrap();
		std::fs::write(root.join("home/es.json"), "{}").unwrap();
		std::os::unix::fs::symlink(root, root.join("home/loop")).unwrap();

		let source = FsBundleSource::new(root);
		assert_eq!(source.namespaces().await.unwrap(), vec!["home"]);
	}

	#[tokio::test]
	async fn test_fs_source_missing_root_has_no_namespaces() {
		let source = FsBundleSource::new("/nonexistent/disruptivo/locales");
		assert!(source.namespaces().await.unwrap().is_empty());
	}

	#[test]
	fn test_http_document_url() {
		let source = HttpBundleSource::new(Url::parse("https://disruptivo.lab/locales").unwrap());
		assert_eq!(
			source.document_url("admin/sidebar", Locale::Pt).unwrap().as_str(),
			"https://disruptivo.lab/locales/admin/sidebar/pt.json"
		);

		let source = HttpBundleSource::new(Url::parse("https://cdn.example.com/i18n/").unwrap());
		assert_eq!(
			source.document_url("home", Locale::Es).unwrap().as_str(),
			"https://cdn.example.com/i18n/home/es.json"
		);
	}

	#[tokio::test]
	async fn test_static_source_normalizes_namespace() {
		let source = StaticBundleSource::new().with_document(
			"admin/sidebar",
			Locale::Es,
			json!({ "title": "Panel" }),
		);

		let bundle = source.fetch("admin.sidebar", Locale::Es).await.unwrap();
		assert_eq!(bundle.lookup("title"), Some("Panel"));
		assert!(source
			.fetch("admin.sidebar", Locale::En)
			.await
			.unwrap_err()
			.is_not_found());
	}
}
