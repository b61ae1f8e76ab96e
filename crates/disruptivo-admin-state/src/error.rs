// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

/// Errors reported by a [`crate::SessionProvider`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
	#[error("session provider unavailable: {0}")]
	Unavailable(String),
}

/// Error returned when parsing a theme name other than `light` or `dark`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown theme: {0:?}")]
pub struct UnknownTheme(pub String);
