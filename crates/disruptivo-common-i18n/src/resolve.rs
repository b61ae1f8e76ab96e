// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Locale resolution logic.

use crate::locale::Locale;

/// How the active locale was chosen at mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocaleResolution {
	/// A saved preference was found in storage
	Persisted(Locale),
	/// No preference was saved; the runtime language matched a supported locale
	Detected(Locale),
	/// Neither of the above; the default locale applies
	Default(Locale),
}

impl LocaleResolution {
	pub fn locale(&self) -> Locale {
		match self {
			Self::Persisted(locale) | Self::Detected(locale) | Self::Default(locale) => *locale,
		}
	}

	pub fn is_auto_detected(&self) -> bool {
		matches!(self, Self::Detected(_))
	}
}

/// Resolve the active locale from a saved preference and the runtime language.
///
/// Resolution order (highest to lowest priority):
/// 1. Saved preference (if it is a supported locale code)
/// 2. Runtime language, matched by its primary subtag (`en-US` → `en`)
/// 3. `default`
///
/// # Example
///
/// ```
/// use disruptivo_common_i18n::{resolve_locale, Locale, LocaleResolution};
///
/// assert_eq!(
/// 	resolve_locale(Some("en"), Some("fr-FR"), Locale::Es),
/// 	LocaleResolution::Persisted(Locale::En)
/// );
/// assert_eq!(
/// 	resolve_locale(None, Some("fr-FR"), Locale::Es),
/// 	LocaleResolution::Detected(Locale::Fr)
/// );
/// assert_eq!(
/// 	resolve_locale(None, Some("de-DE"), Locale::Es),
/// 	LocaleResolution::Default(Locale::Es)
/// );
/// ```
pub fn resolve_locale(
	persisted: Option<&str>,
	detected_language: Option<&str>,
	default: Locale,
) -> LocaleResolution {
	if let Some(locale) = persisted.and_then(Locale::from_code) {
		return LocaleResolution::Persisted(locale);
	}

	if let Some(locale) = detected_language.and_then(Locale::from_language_tag) {
		return LocaleResolution::Detected(locale);
	}

	LocaleResolution::Default(default)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_saved_preference_takes_priority() {
		assert_eq!(
			resolve_locale(Some("ja"), Some("ko-KR"), Locale::Es),
			LocaleResolution::Persisted(Locale::Ja)
		);
	}

	#[test]
	fn test_detected_when_nothing_saved() {
		let resolution = resolve_locale(None, Some("pt-BR"), Locale::Es);
		assert_eq!(resolution, LocaleResolution::Detected(Locale::Pt));
		assert!(resolution.is_auto_detected());
	}

	#[test]
	fn test_unsupported_saved_value_is_ignored() {
		assert_eq!(
			resolve_locale(Some("klingon"), Some("en-GB"), Locale::Es),
			LocaleResolution::Detected(Locale::En)
		);
		assert_eq!(
			resolve_locale(Some(""), None, Locale::Es),
			LocaleResolution::Default(Locale::Es)
		);
	}

	#[test]
	fn test_fallback_to_default() {
		let resolution = resolve_locale(None, Some("de-DE"), Locale::Es);
		assert_eq!(resolution.locale(), Locale::Es);
		assert!(!resolution.is_auto_detected());
		assert_eq!(
			resolve_locale(None, None, Locale::En),
			LocaleResolution::Default(Locale::En)
		);
	}
}
