// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use std::io;
use std::path::PathBuf;

/// Errors raised by the low-level document helpers.
///
/// [`crate::ClientStorage`] implementations swallow these after logging them.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
	#[error("io error on {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: io::Error,
	},

	#[error("malformed storage document {path}: {source}")]
	Malformed {
		path: PathBuf,
		#[source]
		source: serde_json::Error,
	},

	#[error("serialization failed: {0}")]
	Serialization(#[from] serde_json::Error),
}

impl StorageError {
	pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}
