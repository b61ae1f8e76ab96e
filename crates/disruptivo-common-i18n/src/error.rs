// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for bundle loading.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::locale::Locale;

/// Errors raised while fetching or parsing a translation bundle.
///
/// The loader never surfaces these to callers: a failed slot is cached as an
/// empty bundle.
#[derive(Debug, Error)]
pub enum BundleError {
	/// Namespace contains empty or disallowed segments
	#[error("invalid namespace: {0:?}")]
	InvalidNamespace(String),

	/// No document exists for this namespace and locale
	#[error("bundle not found: {namespace} ({locale})")]
	NotFound { namespace: String, locale: Locale },

	/// I/O error reading a bundle document
	#[error("I/O error reading {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	/// Document is not valid JSON
	#[error("malformed bundle document: {0}")]
	Json(#[from] serde_json::Error),

	/// Document root is not a JSON object
	#[error("bundle document root must be a JSON object")]
	NotAnObject,

	/// Network error fetching a remote document
	#[error("network error: {0}")]
	Http(#[from] reqwest::Error),

	/// Remote server answered with a non-success status
	#[error("unexpected status {status} fetching {url}")]
	UnexpectedStatus {
		status: reqwest::StatusCode,
		url: String,
	},

	/// Remote document URL could not be built
	#[error("invalid URL: {0}")]
	InvalidUrl(String),
}

impl BundleError {
	/// Whether this error only means "no translations here yet".
	pub fn is_not_found(&self) -> bool {
		matches!(self, Self::NotFound { .. })
	}
}
