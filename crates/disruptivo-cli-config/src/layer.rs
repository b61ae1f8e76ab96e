// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer for merging from multiple sources.

use serde::Deserialize;
use std::path::PathBuf;

/// Partial configuration layer - all fields are Option for merging.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigLayer {
	#[serde(default)]
	pub i18n: Option<I18nLayer>,
	#[serde(default)]
	pub storage: Option<StorageLayer>,
	#[serde(default)]
	pub admin: Option<AdminLayer>,
	#[serde(default)]
	pub logging: Option<LoggingLayer>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct I18nLayer {
	#[serde(default)]
	pub source: Option<String>,
	#[serde(default)]
	pub locales_dir: Option<PathBuf>,
	#[serde(default)]
	pub base_url: Option<String>,
	#[serde(default)]
	pub default_locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StorageLayer {
	#[serde(default)]
	pub file: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AdminLayer {
	#[serde(default)]
	pub login_route: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingLayer {
	#[serde(default)]
	pub level: Option<String>,
	#[serde(default)]
	pub format: Option<String>,
}

impl ConfigLayer {
	/// Merge another layer into this one. Other layer takes precedence.
	pub fn merge(&mut self, other: ConfigLayer) {
		merge_option(&mut self.i18n, other.i18n, I18nLayer::merge);
		merge_option(&mut self.storage, other.storage, |t, s| {
			if s.file.is_some() {
				t.file = s.file;
			}
		});
		merge_option(&mut self.admin, other.admin, |t, s| {
			if s.login_route.is_some() {
				t.login_route = s.login_route;
			}
		});
		merge_option(&mut self.logging, other.logging, LoggingLayer::merge);
	}
}

fn merge_option<T, F>(target: &mut Option<T>, source: Option<T>, merge_fn: F)
where
	F: FnOnce(&mut T, T),
{
	match (target.as_mut(), source) {
		(Some(t), Some(s)) => merge_fn(t, s),
		(None, Some(s)) => *target = Some(s),
		_ => {}
	}
}

impl I18nLayer {
	fn merge(&mut self, other: I18nLayer) {
		if other.source.is_some() {
			self.source = other.source;
		}
		if other.locales_dir.is_some() {
			self.locales_dir = other.locales_dir;
		}
		if other.base_url.is_some() {
			self.base_url = other.base_url;
		}
		if other.default_locale.is_some() {
			self.default_locale = other.default_locale;
		}
	}
}

impl LoggingLayer {
	fn merge(&mut self, other: LoggingLayer) {
		if other.level.is_some() {
			self.level = other.level;
		}
		if other.format.is_some() {
			self.format = other.format;
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	/// Later layers override earlier ones field by field.
	#[test]
	fn test_merge_precedence_overwrites_existing_values() {
		let mut base = ConfigLayer {
			i18n: Some(I18nLayer {
				source: Some("fs".to_string()),
				locales_dir: Some(PathBuf::from("/srv/locales")),
				..Default::default()
			}),
			..Default::default()
		};

		let overlay = ConfigLayer {
			i18n: Some(I18nLayer {
				source: Some("http".to_string()),
				..Default::default()
			}),
			..Default::default()
		};

		base.merge(overlay);

		let i18n = base.i18n.unwrap();
		assert_eq!(i18n.source.as_deref(), Some("http"));
		assert_eq!(i18n.locales_dir, Some(PathBuf::from("/srv/locales")));
	}

	/// Merging an empty layer keeps every existing value.
	#[test]
	fn test_merge_empty_layer_preserves_all() {
		let mut base = ConfigLayer {
			storage: Some(StorageLayer {
				file: Some(PathBuf::from("/tmp/storage.json")),
			}),
			admin: Some(AdminLayer {
				login_route: Some("/login".to_string()),
			}),
			logging: Some(LoggingLayer {
				level: Some("debug".to_string()),
				format: Some("json".to_string()),
			}),
			..Default::default()
		};

		base.merge(ConfigLayer::default());

		assert_eq!(
			base.storage.unwrap().file,
			Some(PathBuf::from("/tmp/storage.json"))
		);
		assert_eq!(base.admin.unwrap().login_route.as_deref(), Some("/login"));
		let logging = base.logging.unwrap();
		assert_eq!(logging.level.as_deref(), Some("debug"));
		assert_eq!(logging.format.as_deref(), Some("json"));
	}

	#[test]
	fn test_merge_into_empty_base() {
		let mut base = ConfigLayer::default();
		base.merge(ConfigLayer {
			admin: Some(AdminLayer {
				login_route: Some("/admin/entrar".to_string()),
			}),
			..Default::default()
		});
		assert_eq!(
			base.admin.unwrap().login_route.as_deref(),
			Some("/admin/entrar")
		);
	}

	#[test]
	fn test_parse_partial_toml() {
		let layer: ConfigLayer = toml::from_str(
			r#"
			[i18n]
			default_locale = "en"

			[logging]
			format = "compact"
			"#,
		)
		.unwrap();

		assert_eq!(layer.i18n.unwrap().default_locale.as_deref(), Some("en"));
		assert_eq!(layer.logging.unwrap().format.as_deref(), Some("compact"));
		assert!(layer.storage.is_none());
	}

	proptest! {
		/// The last layer that sets a field wins.
		#[test]
		fn last_set_value_wins(levels in proptest::collection::vec(proptest::option::of("[a-z]{1,8}"), 1..8)) {
			let mut merged = ConfigLayer::default();
			for level in &levels {
				merged.merge(ConfigLayer {
					logging: Some(LoggingLayer {
						level: level.clone(),
						format: None,
					}),
					..Default::default()
				});
			}

			let expected = levels.iter().rev().find_map(|level| level.clone());
			prop_assert_eq!(merged.logging.and_then(|l| l.level), expected);
		}
	}
}
