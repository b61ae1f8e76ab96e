// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration validation rules.

use tracing::warn;

use crate::runtime::{DisruptivoConfig, SourceKind};
use crate::ConfigError;

/// Validate the configuration.
///
/// Returns Ok(()) if valid, or a ConfigError describing the first problem.
pub fn validate_config(config: &DisruptivoConfig) -> Result<(), ConfigError> {
	validate_i18n(config)?;
	validate_admin(config)?;

	Ok(())
}

fn validate_i18n(config: &DisruptivoConfig) -> Result<(), ConfigError> {
	let i18n = &config.i18n;

	match i18n.source {
		SourceKind::Http => {
			let Some(base_url) = &i18n.base_url else {
				return Err(ConfigError::invalid_value(
					"i18n.base_url",
					"required when i18n.source is \"http\"",
				));
			};
			if !matches!(base_url.scheme(), "http" | "https") {
				return Err(ConfigError::invalid_value(
					"i18n.base_url",
					format!("unsupported scheme {:?}", base_url.scheme()),
				));
			}
		}
		SourceKind::Fs => {
			if i18n.base_url.is_some() {
				warn!("i18n.base_url is set but i18n.source is \"fs\"; ignoring it");
			}
			if i18n.locales_dir.as_os_str().is_empty() {
				return Err(ConfigError::invalid_value(
					"i18n.locales_dir",
					"cannot be empty",
				));
			}
		}
	}

	Ok(())
}

fn validate_admin(config: &DisruptivoConfig) -> Result<(), ConfigError> {
	if !config.admin.login_route.starts_with('/') {
		return Err(ConfigError::invalid_value(
			"admin.login_route",
			"must start with '/'",
		));
	}

	Ok(())
}
