// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! XDG Base Directory compliant path resolution.

use std::path::PathBuf;

use crate::ConfigError;

/// System-wide config file.
pub const SYSTEM_CONFIG_FILE: &str = "/etc/disruptivo/config.toml";

/// Workspace config file, relative to the current directory.
pub const WORKSPACE_CONFIG_FILE: &str = ".disruptivo/config.toml";

/// Resolved XDG paths for Disruptivo.
#[derive(Debug, Clone)]
pub struct PathsConfig {
	/// User config file: ~/.config/disruptivo/config.toml
	pub user_config_file: PathBuf,
	/// System config file: /etc/disruptivo/config.toml
	pub system_config_file: PathBuf,
	/// State directory: ~/.local/state/disruptivo/
	pub state_dir: PathBuf,
}

impl PathsConfig {
	/// Get the config directory (parent of user_config_file)
	pub fn config_dir(&self) -> PathBuf {
		self
			.user_config_file
			.parent()
			.map(|p| p.to_path_buf())
			.unwrap_or_else(|| self.user_config_file.clone())
	}

	/// Default durable storage document.
	pub fn default_storage_file(&self) -> PathBuf {
		self.state_dir.join("storage.json")
	}
}

impl Default for PathsConfig {
	fn default() -> Self {
		Self {
			user_config_file: PathBuf::from("~/.config/disruptivo/config.toml"),
			system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
			state_dir: PathBuf::from("~/.local/state/disruptivo"),
		}
	}
}

/// Resolve XDG paths according to the Base Directory Specification.
///
/// Uses environment variables if set, otherwise falls back to defaults:
/// - XDG_CONFIG_HOME or ~/.config
/// - XDG_STATE_HOME or ~/.local/state
pub fn resolve_xdg_paths() -> Result<PathsConfig, ConfigError> {
	let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;

	let config_home = std::env::var_os("XDG_CONFIG_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".config"));

	let state_home = std::env::var_os("XDG_STATE_HOME")
		.map(PathBuf::from)
		.unwrap_or_else(|| home.join(".local/state"));

	tracing::debug!(
			config_home = %config_home.display(),
			state_home = %state_home.display(),
			"resolved XDG paths"
	);

	Ok(PathsConfig {
		user_config_file: config_home.join("disruptivo/config.toml"),
		system_config_file: PathBuf::from(SYSTEM_CONFIG_FILE),
		state_dir: state_home.join("disruptivo"),
	})
}

/// Get the workspace config file path from current directory.
pub fn workspace_config_path() -> Result<PathBuf, ConfigError> {
	let cwd = std::env::current_dir()?;
	Ok(cwd.join(WORKSPACE_CONFIG_FILE))
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_resolve_xdg_paths_succeeds() {
		let paths = resolve_xdg_paths().unwrap();
		assert!(paths.user_config_file.ends_with("disruptivo/config.toml"));
		assert!(paths.state_dir.ends_with("disruptivo"));
	}

	#[test]
	fn test_system_config_is_etc() {
		let paths = resolve_xdg_paths().unwrap();
		assert_eq!(
			paths.system_config_file,
			PathBuf::from("/etc/disruptivo/config.toml")
		);
	}

	#[test]
	fn test_config_dir_returns_parent() {
		let paths = resolve_xdg_paths().unwrap();
		assert!(paths.config_dir().ends_with("disruptivo"));
	}

	#[test]
	fn test_default_storage_file_under_state_dir() {
		let paths = PathsConfig {
			state_dir: "/tmp/state/disruptivo".into(),
			..Default::default()
		};
		assert_eq!(
			paths.default_storage_file(),
			PathBuf::from("/tmp/state/disruptivo/storage.json")
		);
	}

	#[test]
	fn test_workspace_config_path() {
		let path = workspace_config_path().unwrap();
		assert!(path.ends_with(".disruptivo/config.toml"));
	}
}
