// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Supported locales and their metadata.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A locale the site ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
	Es,
	En,
	Fr,
	Pt,
	Ja,
	Zh,
	Ko,
}

/// Default locale used as fallback.
pub const DEFAULT_LOCALE: Locale = Locale::Es;

/// Metadata about a supported locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleInfo {
	pub locale: Locale,
	/// English name of the language
	pub name: &'static str,
	/// Native name of the language, as shown in the locale switcher
	pub native_name: &'static str,
}

/// All supported locales, in switcher order.
pub const LOCALES: &[LocaleInfo] = &[
	LocaleInfo {
		locale: Locale::Es,
		name: "Spanish",
		native_name: "Español",
	},
	LocaleInfo {
		locale: Locale::En,
		name: "English",
		native_name: "English",
	},
	LocaleInfo {
		locale: Locale::Fr,
		name: "French",
		native_name: "Français",
	},
	LocaleInfo {
		locale: Locale::Pt,
		name: "Portuguese",
		native_name: "Português",
	},
	LocaleInfo {
		locale: Locale::Ja,
		name: "Japanese",
		native_name: "日本語",
	},
	LocaleInfo {
		locale: Locale::Zh,
		name: "Chinese",
		native_name: "中文",
	},
	LocaleInfo {
		locale: Locale::Ko,
		name: "Korean",
		native_name: "한국어",
	},
];

impl Locale {
	pub const ALL: [Locale; 7] = [
		Locale::Es,
		Locale::En,
		Locale::Fr,
		Locale::Pt,
		Locale::Ja,
		Locale::Zh,
		Locale::Ko,
	];

	/// ISO 639-1 code, e.g. `"es"`.
	pub fn code(&self) -> &'static str {
		match self {
			Locale::Es => "es",
			Locale::En => "en",
			Locale::Fr => "fr",
			Locale::Pt => "pt",
			Locale::Ja => "ja",
			Locale::Zh => "zh",
			Locale::Ko => "ko",
		}
	}

	/// Parse an exact locale code.
	pub fn from_code(code: &str) -> Option<Self> {
		LOCALES
			.iter()
			.map(|info| info.locale)
			.find(|locale| locale.code() == code)
	}

	/// Match a language tag such as `en-US` or `zh_Hans_CN` by its primary subtag.
	///
	/// The comparison is case-insensitive. Returns `None` for unsupported languages.
	pub fn from_language_tag(tag: &str) -> Option<Self> {
		let primary = tag.trim().split(['-', '_', '.', '@']).next()?;
		Self::from_code(&primary.to_ascii_lowercase())
	}

	pub fn info(&self) -> &'static LocaleInfo {
		LOCALES
			.iter()
			.find(|info| info.locale == *self)
			.unwrap_or(&LOCALES[0])
	}
}

impl fmt::Display for Locale {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.code())
	}
}

/// Error returned when parsing an unsupported locale code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unsupported locale: {0:?}")]
pub struct UnsupportedLocale(pub String);

impl FromStr for Locale {
	type Err = UnsupportedLocale;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_code(s).ok_or_else(|| UnsupportedLocale(s.to_string()))
	}
}

/// Check if a locale code is supported.
pub fn is_supported(code: &str) -> bool {
	Locale::from_code(code).is_some()
}

/// Get all supported locales.
pub fn available_locales() -> &'static [LocaleInfo] {
	LOCALES
}
