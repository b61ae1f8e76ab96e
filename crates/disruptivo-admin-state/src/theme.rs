// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Admin colour theme.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use disruptivo_common_storage::ClientStorage;
use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::error::UnknownTheme;

/// Durable storage key for the theme preference.
pub const THEME_STORAGE_KEY: &str = "disruptivo.admin.theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
	Light,
	#[default]
	Dark,
}

impl Theme {
	pub fn as_str(&self) -> &'static str {
		match self {
			Theme::Light => "light",
			Theme::Dark => "dark",
		}
	}

	/// Marker class placed on the root element.
	pub fn class_name(&self) -> &'static str {
		self.as_str()
	}

	pub fn toggled(&self) -> Self {
		match self {
			Theme::Light => Theme::Dark,
			Theme::Dark => Theme::Light,
		}
	}
}

impl fmt::Display for Theme {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Theme {
	type Err = UnknownTheme;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"light" => Ok(Theme::Light),
			"dark" => Ok(Theme::Dark),
			other => Err(UnknownTheme(other.to_string())),
		}
	}
}

/// Class list of the document root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RootClassList {
	classes: BTreeSet<String>,
}

impl RootClassList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add(&mut self, class: &str) {
		self.classes.insert(class.to_string());
	}

	pub fn remove(&mut self, class: &str) {
		self.classes.remove(class);
	}

	pub fn contains(&self, class: &str) -> bool {
		self.classes.contains(class)
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.classes.iter().map(String::as_str)
	}
}

impl fmt::Display for RootClassList {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let joined: Vec<&str> = self.iter().collect();
		f.write_str(&joined.join(" "))
	}
}

/// Persisted admin theme.
pub struct ThemeState {
	storage: Arc<dyn ClientStorage>,
	tx: watch::Sender<Theme>,
}

impl ThemeState {
	/// Load the saved theme; missing or unknown values give [`Theme::Dark`].
	pub fn new(storage: Arc<dyn ClientStorage>) -> Self {
		let theme = match storage.get(THEME_STORAGE_KEY) {
			Some(value) => value.parse().unwrap_or_else(|e: UnknownTheme| {
				debug!(error = %e, "ignoring saved theme");
				Theme::default()
			}),
			None => Theme::default(),
		};
		let (tx, _) = watch::channel(theme);
		Self { storage, tx }
	}

	pub fn theme(&self) -> Theme {
		*self.tx.borrow()
	}

	pub fn subscribe(&self) -> watch::Receiver<Theme> {
		self.tx.subscribe()
	}

	pub fn set(&self, theme: Theme) {
		self.storage.set(THEME_STORAGE_KEY, theme.as_str());
		if self.tx.send_replace(theme) != theme {
			info!(%theme, "admin theme changed");
		}
	}

	/// Switch between light and dark and return the new theme.
	pub fn toggle(&self) -> Theme {
		let theme = self.theme().toggled();
		self.set(theme);
		theme
	}

	/// Put the current theme's marker class on `root` and remove the other.
	pub fn apply(&self, root: &mut RootClassList) {
		let theme = self.theme();
		root.remove(theme.toggled().class_name());
		root.add(theme.class_name());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use disruptivo_common_storage::{FileStorage, MemoryStorage};
	use tempfile::tempdir;

	#[test]
	fn test_defaults_to_dark() {
		let state = ThemeState::new(Arc::new(MemoryStorage::new()));
		assert_eq!(state.theme(), Theme::Dark);
	}

	#[test]
	fn test_unknown_saved_value_falls_back_to_dark() {
		let storage = Arc::new(MemoryStorage::new());
		storage.set(THEME_STORAGE_KEY, "sepia");
		assert_eq!(ThemeState::new(storage).theme(), Theme::Dark);
	}

	#[test]
	fn test_toggle_and_apply() {
		let state = ThemeState::new(Arc::new(MemoryStorage::new()));
		let mut root = RootClassList::new();
		root.add("admin");

		state.apply(&mut root);
		assert!(root.contains("dark"));

		assert_eq!(state.toggle(), Theme::Light);
		state.apply(&mut root);
		assert!(root.contains("light"));
		assert!(!root.contains("dark"));
		assert_eq!(root.to_string(), "admin light");
	}

	#[test]
	fn test_theme_persists_across_reload() {
		let dir = tempdir().unwrap();
		let path = dir.path().join("storage.json");

		ThemeState::new(Arc::new(FileStorage::open(&path))).set(Theme::Light);

		let reloaded = ThemeState::new(Arc::new(FileStorage::open(&path)));
		assert_eq!(reloaded.theme(), Theme::Light);
	}

	#[test]
	fn test_subscribers_are_notified() {
		let state = ThemeState::new(Arc::new(MemoryStorage::new()));
		let mut rx = state.subscribe();
		state.toggle();
		assert!(rx.has_changed().unwrap());
		assert_eq!(*rx.borrow_and_update(), Theme::Light);
	}

	#[test]
	fn test_parse_theme() {
		assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
		assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
		assert!("Dark".parse::<Theme>().is_err());
	}
}
