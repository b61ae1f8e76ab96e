// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Runtime configuration types with resolved defaults.

use std::path::PathBuf;

use disruptivo_admin_state::DEFAULT_LOGIN_ROUTE;
use disruptivo_common_i18n::{Locale, DEFAULT_LOCALE};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::layer::*;
use crate::paths::PathsConfig;
use crate::ConfigError;

/// The final, validated configuration for Disruptivo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DisruptivoConfig {
	pub i18n: I18nConfig,
	pub storage: StorageConfig,
	pub admin: AdminConfig,
	pub logging: LoggingConfig,

	/// Resolved XDG paths (not serialized)
	#[serde(skip)]
	pub paths: PathsConfig,
}

/// Where translation bundles are read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
	#[default]
	Fs,
	Http,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
	pub source: SourceKind,
	pub locales_dir: PathBuf,
	pub base_url: Option<Url>,
	pub default_locale: Locale,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
	pub file: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
	pub login_route: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingConfig {
	pub level: LogLevel,
	pub format: LogFormat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	Error,
	Warn,
	#[default]
	Info,
	Debug,
	Trace,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::Error => "error",
			LogLevel::Warn => "warn",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Trace => "trace",
		}
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
	#[default]
	Pretty,
	Json,
	Compact,
}

impl Default for I18nConfig {
	fn default() -> Self {
		Self {
			source: SourceKind::Fs,
			locales_dir: PathBuf::from("locales"),
			base_url: None,
			default_locale: DEFAULT_LOCALE,
		}
	}
}

impl Default for AdminConfig {
	fn default() -> Self {
		Self {
			login_route: DEFAULT_LOGIN_ROUTE.to_string(),
		}
	}
}

impl DisruptivoConfig {
	/// Build runtime config from a merged layer and paths.
	pub fn from_layer(layer: ConfigLayer, paths: PathsConfig) -> Result<Self, ConfigError> {
		let i18n = build_i18n_config(layer.i18n)?;
		let storage = build_storage_config(layer.storage, &paths);
		let admin = build_admin_config(layer.admin);
		let logging = build_logging_config(layer.logging)?;

		Ok(Self {
			i18n,
			storage,
			admin,
			logging,
			paths,
		})
	}
}

fn build_i18n_config(layer: Option<I18nLayer>) -> Result<I18nConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	let defaults = I18nConfig::default();

	let source = match layer.source.as_deref() {
		None | Some("fs") => SourceKind::Fs,
		Some("http") => SourceKind::Http,
		Some(other) => {
			return Err(ConfigError::invalid_value(
				"i18n.source",
				format!("expected \"fs\" or \"http\", got {other:?}"),
			))
		}
	};

	let base_url = layer
		.base_url
		.map(|raw| {
			Url::parse(&raw).map_err(|e| ConfigError::invalid_value("i18n.base_url", e.to_string()))
		})
		.transpose()?;

	let default_locale = match layer.default_locale {
		Some(code) => code
			.parse::<Locale>()
			.map_err(|e| ConfigError::invalid_value("i18n.default_locale", format!("{e}")))?,
		None => defaults.default_locale,
	};

	Ok(I18nConfig {
		source,
		locales_dir: layer.locales_dir.unwrap_or(defaults.locales_dir),
		base_url,
		default_locale,
	})
}

fn build_storage_config(layer: Option<StorageLayer>, paths: &PathsConfig) -> StorageConfig {
	let layer = layer.unwrap_or_default();
	StorageConfig {
		file: layer.file.unwrap_or_else(|| paths.default_storage_file()),
	}
}

fn build_admin_config(layer: Option<AdminLayer>) -> AdminConfig {
	let layer = layer.unwrap_or_default();
	AdminConfig {
		login_route: layer
			.login_route
			.unwrap_or_else(|| DEFAULT_LOGIN_ROUTE.to_string()),
	}
}

fn build_logging_config(layer: Option<LoggingLayer>) -> Result<LoggingConfig, ConfigError> {
	let layer = layer.unwrap_or_default();
	Ok(LoggingConfig {
		level: parse_log_level(layer.level.as_deref())?,
		format: parse_log_format(layer.format.as_deref())?,
	})
}

/// Case-insensitive; unset means `info`.
fn parse_log_level(s: Option<&str>) -> Result<LogLevel, ConfigError> {
	let Some(raw) = s else {
		return Ok(LogLevel::default());
	};
	match raw.trim().to_ascii_lowercase().as_str() {
		"error" => Ok(LogLevel::Error),
		"warn" => Ok(LogLevel::Warn),
		"info" => Ok(LogLevel::Info),
		"debug" => Ok(LogLevel::Debug),
		"trace" => Ok(LogLevel::Trace),
		_ => Err(ConfigError::invalid_value(
			"logging.level",
			format!("expected error, warn, info, debug or trace, got {raw:?}"),
		)),
	}
}

/// Case-insensitive; unset means `pretty`.
fn parse_log_format(s: Option<&str>) -> Result<LogFormat, ConfigError> {
	let Some(raw) = s else {
		return Ok(LogFormat::default());
	};
	match raw.trim().to_ascii_lowercase().as_str() {
		"json" => Ok(LogFormat::Json),
		"compact" => Ok(LogFormat::Compact),
		"pretty" => Ok(LogFormat::Pretty),
		_ => Err(ConfigError::invalid_value(
			"logging.format",
			format!("expected pretty, json or compact, got {raw:?}"),
		)),
	}
}
