// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Default configuration file generation.

use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::ConfigError;

/// Default configuration file template.
///
/// This template is written to ~/.config/disruptivo/config.toml when no user config exists.
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"#
# Disruptivo Configuration File
# Location: ~/.config/disruptivo/config.toml
#
# This file was auto-generated with sensible defaults.
# Settings here are overridden by .disruptivo/config.toml in the current
# directory, DISRUPTIVO_* environment variables and command-line flags.
#

# =============================================================================
# Translations
# =============================================================================

[i18n]
# Where bundles come from: "fs" reads <locales_dir>/<namespace>/<locale>.json,
# "http" fetches <base_url>/<namespace>/<locale>.json.
source = "fs"

# Directory holding translation bundles (relative to the working directory)
locales_dir = "locales"

# Base URL for the "http" source
# base_url = "https://disruptivo.example/locales/"

# Fallback locale for missing keys: es, en, fr, pt, ja, zh, ko
default_locale = "es"

# =============================================================================
# Client Storage
# =============================================================================

[storage]
# Durable key/value document for the locale and theme preferences.
# Defaults to ~/.local/state/disruptivo/storage.json
# file = "/path/to/storage.json"

# =============================================================================
# Admin
# =============================================================================

[admin]
# Route unauthenticated visitors are redirected to
login_route = "/admin/login"

# =============================================================================
# Logging Configuration
# =============================================================================

[logging]
# Log level: error, warn, info, debug, trace
level = "info"

# Log format: pretty, json, compact
format = "pretty"
"#;

/// Ensure the config directory exists and create a default config file if none exists.
///
/// Returns `true` if a new config file was created, `false` if one already existed.
pub fn ensure_default_config(config_file_path: &Path) -> Result<bool, ConfigError> {
	if config_file_path.exists() {
		debug!(path = %config_file_path.display(), "config file already exists");
		return Ok(false);
	}

	if let Some(parent) = config_file_path.parent() {
		if !parent.exists() {
			debug!(path = %parent.display(), "creating config directory");
			fs::create_dir_all(parent)?;
		}
	}

	info!(path = %config_file_path.display(), "creating default config file");
	fs::write(config_file_path, DEFAULT_CONFIG_TEMPLATE)?;

	Ok(true)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::layer::ConfigLayer;
	use crate::paths::PathsConfig;
	use crate::runtime::DisruptivoConfig;
	use crate::validation::validate_config;
	use tempfile::tempdir;

	#[test]
	fn test_default_config_template_is_valid() {
		let layer: ConfigLayer = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
		let config = DisruptivoConfig::from_layer(layer, PathsConfig::default()).unwrap();
		assert!(validate_config(&config).is_ok());
	}

	#[test]
	fn test_ensure_default_config_creates_file() {
		let dir = tempdir().unwrap();
		let config_path = dir.path().join("disruptivo/config.toml");

		assert!(!config_path.exists());

		let created = ensure_default_config(&config_path).unwrap();
		assert!(created);

		let contents = fs::read_to_string(&config_path).unwrap();
		assert!(contents.contains("[i18n]"));
		assert!(contents.contains("login_route"));
	}

	#[test]
	fn test_ensure_default_config_does_not_overwrite() {
		let dir = tempdir().unwrap();
		let config_path = dir.path().join("config.toml");

		fs::write(&config_path, "# existing config\n").unwrap();

		let created = ensure_default_config(&config_path).unwrap();
		assert!(!created);

		let contents = fs::read_to_string(&config_path).unwrap();
		assert_eq!(contents, "# existing config\n");
	}
}
