// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: files, environment, CLI, defaults.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::layer::*;
use crate::paths::{PathsConfig, SYSTEM_CONFIG_FILE, WORKSPACE_CONFIG_FILE};
use crate::ConfigError;

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	SystemFile = 20,
	UserFile = 30,
	WorkspaceFile = 40,
	/// File named with `--config`
	ExplicitFile = 45,
	Environment = 50,
	Cli = 60,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	/// Name for logging
	fn name(&self) -> &'static str;

	/// Precedence level
	fn precedence(&self) -> Precedence;

	/// Load configuration layer from this source
	fn load(&self) -> Result<ConfigLayer, ConfigError>;

	/// Whether a load failure aborts configuration instead of being skipped
	fn is_required(&self) -> bool {
		false
	}
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading defaults");
		// Return empty layer - defaults applied during finalization
		Ok(ConfigLayer::default())
	}
}

/// File-based configuration source (TOML).
pub struct FileSource {
	path: PathBuf,
	precedence: Precedence,
	name: &'static str,
	required: bool,
}

impl FileSource {
	/// System config: /etc/disruptivo/config.toml
	pub fn system() -> Self {
		Self {
			path: PathBuf::from(SYSTEM_CONFIG_FILE),
			precedence: Precedence::SystemFile,
			name: "system-config",
			required: false,
		}
	}

	/// User config: ~/.config/disruptivo/config.toml
	pub fn user(paths: &PathsConfig) -> Self {
		Self {
			path: paths.user_config_file.clone(),
			precedence: Precedence::UserFile,
			name: "user-config",
			required: false,
		}
	}

	/// Workspace config: .disruptivo/config.toml
	pub fn workspace() -> Result<Self, ConfigError> {
		let cwd = std::env::current_dir()?;
		Ok(Self {
			path: cwd.join(WORKSPACE_CONFIG_FILE),
			precedence: Precedence::WorkspaceFile,
			name: "workspace-config",
			required: false,
		})
	}

	/// Custom file path with specified precedence
	pub fn custom(path: PathBuf, precedence: Precedence, name: &'static str) -> Self {
		Self {
			path,
			precedence,
			name,
			required: false,
		}
	}

	/// File named with `--config`. It must exist and parse.
	pub fn explicit(path: PathBuf) -> Self {
		Self {
			path,
			precedence: Precedence::ExplicitFile,
			name: "explicit-config",
			required: true,
		}
	}
}

impl ConfigSource for FileSource {
	fn name(&self) -> &'static str {
		self.name
	}
	fn precedence(&self) -> Precedence {
		self.precedence
	}

	fn is_required(&self) -> bool {
		self.required
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		if !self.path.exists() {
			if self.required {
				return Err(ConfigError::FileNotFound(self.path.clone()));
			}
			debug!(path = %self.path.display(), source = self.name, "config file not found, skipping");
			return Ok(ConfigLayer::default());
		}

		debug!(path = %self.path.display(), source = self.name, "loading config file");

		let content = std::fs::read_to_string(&self.path)?;
		let layer: ConfigLayer = toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
			path: self.path.clone(),
			source: e,
		})?;

		trace!(source = self.name, "parsed config layer");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Recognised variables: `DISRUPTIVO_LOCALES_DIR`, `DISRUPTIVO_I18N_SOURCE`,
/// `DISRUPTIVO_I18N_BASE_URL`, `DISRUPTIVO_DEFAULT_LOCALE`,
/// `DISRUPTIVO_STORAGE_FILE`, `DISRUPTIVO_LOGIN_ROUTE`,
/// `DISRUPTIVO_LOG_LEVEL` and `DISRUPTIVO_LOG_FORMAT`.
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(layer_from_env(std::env::vars()))
	}
}

/// Build a layer from `DISRUPTIVO_*` key/value pairs. Blank values are ignored.
pub fn layer_from_env<I>(vars: I) -> ConfigLayer
where
	I: IntoIterator<Item = (String, String)>,
{
	let mut layer = ConfigLayer::default();

	for (key, value) in vars {
		if !key.starts_with("DISRUPTIVO_") {
			continue;
		}

		let value = value.trim().to_string();
		if value.is_empty() {
			continue;
		}

		trace!(key = %key, "processing env var");

		match key.as_str() {
			"DISRUPTIVO_LOCALES_DIR" => {
				layer
					.i18n
					.get_or_insert_with(I18nLayer::default)
					.locales_dir = Some(PathBuf::from(value));
			}
			"DISRUPTIVO_I18N_SOURCE" => {
				layer.i18n.get_or_insert_with(I18nLayer::default).source = Some(value);
			}
			"DISRUPTIVO_I18N_BASE_URL" => {
				layer.i18n.get_or_insert_with(I18nLayer::default).base_url = Some(value);
			}
			"DISRUPTIVO_DEFAULT_LOCALE" => {
				layer
					.i18n
					.get_or_insert_with(I18nLayer::default)
					.default_locale = Some(value);
			}
			"DISRUPTIVO_STORAGE_FILE" => {
				layer.storage.get_or_insert_with(StorageLayer::default).file =
					Some(PathBuf::from(value));
			}
			"DISRUPTIVO_LOGIN_ROUTE" => {
				layer
					.admin
					.get_or_insert_with(AdminLayer::default)
					.login_route = Some(value);
			}
			"DISRUPTIVO_LOG_LEVEL" => {
				layer
					.logging
					.get_or_insert_with(LoggingLayer::default)
					.level = Some(value);
			}
			"DISRUPTIVO_LOG_FORMAT" => {
				layer
					.logging
					.get_or_insert_with(LoggingLayer::default)
					.format = Some(value);
			}
			_ => {
				// Unknown DISRUPTIVO_ variable, ignore
			}
		}
	}

	layer
}

/// CLI override source.
pub struct CliSource {
	overrides: CliOverrides,
}

/// CLI argument overrides.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
	pub config_file: Option<PathBuf>,
	pub locales_dir: Option<PathBuf>,
	pub log_level: Option<String>,
	pub log_format: Option<String>,
}

impl CliSource {
	pub fn new(overrides: CliOverrides) -> Self {
		Self { overrides }
	}
}

impl ConfigSource for CliSource {
	fn name(&self) -> &'static str {
		"cli"
	}
	fn precedence(&self) -> Precedence {
		Precedence::Cli
	}

	fn load(&self) -> Result<ConfigLayer, ConfigError> {
		debug!("loading CLI overrides");
		let mut layer = ConfigLayer::default();

		if let Some(ref dir) = self.overrides.locales_dir {
			layer
				.i18n
				.get_or_insert_with(I18nLayer::default)
				.locales_dir = Some(dir.clone());
		}

		if let Some(ref level) = self.overrides.log_level {
			layer
				.logging
				.get_or_insert_with(LoggingLayer::default)
				.level = Some(level.clone());
		}

		if let Some(ref format) = self.overrides.log_format {
			layer
				.logging
				.get_or_insert_with(LoggingLayer::default)
				.format = Some(format.clone());
		}

		Ok(layer)
	}
}
