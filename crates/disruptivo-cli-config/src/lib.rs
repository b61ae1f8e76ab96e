// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration management for the disruptivo command-line tool.
//!
//! This crate provides:
//! - XDG Base Directory compliant path resolution
//! - Layered configuration from multiple sources
//! - TOML configuration file parsing
//! - Environment variable overrides
//! - Configuration validation

pub mod defaults;
pub mod error;
pub mod layer;
pub mod paths;
pub mod registry;
pub mod runtime;
pub mod sources;
pub mod validation;

pub use defaults::{ensure_default_config, DEFAULT_CONFIG_TEMPLATE};
pub use error::ConfigError;
pub use layer::ConfigLayer;
pub use paths::PathsConfig;
pub use registry::ConfigRegistry;
pub use runtime::{DisruptivoConfig, LogFormat, LogLevel, SourceKind};
pub use sources::{CliOverrides, ConfigSource, Precedence};

/// Load configuration from all sources with default precedence.
///
/// If no user config file exists, a default one is created at
/// `~/.config/disruptivo/config.toml` with sensible defaults.
pub fn load_config() -> Result<DisruptivoConfig, ConfigError> {
	load_config_with_cli(sources::CliOverrides::default())
}

/// Load configuration with CLI overrides.
///
/// A file named in `cli.config_file` sits between the workspace file and
/// the environment, and loading fails if it is missing or malformed.
pub fn load_config_with_cli(cli: sources::CliOverrides) -> Result<DisruptivoConfig, ConfigError> {
	let paths = paths::resolve_xdg_paths()?;

	defaults::ensure_default_config(&paths.user_config_file)?;

	let mut registry = ConfigRegistry::new();

	registry.register(Box::new(sources::DefaultsSource));
	registry.register(Box::new(sources::FileSource::system()));
	registry.register(Box::new(sources::FileSource::user(&paths)));
	if let Ok(ws) = sources::FileSource::workspace() {
		registry.register(Box::new(ws));
	}
	if let Some(path) = cli.config_file.clone() {
		registry.register(Box::new(sources::FileSource::explicit(path)));
	}
	registry.register(Box::new(sources::EnvSource));
	registry.register(Box::new(sources::CliSource::new(cli)));

	registry.load(paths)
}
