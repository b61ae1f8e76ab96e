// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

/// Language preference reported by the operating system, if any.
///
/// The raw tag is returned as-is (`en_US.UTF-8`, `pt-BR`, ...); deciding
/// whether it is supported is left to locale resolution.
pub fn detect_language() -> Option<String> {
	sys_locale::get_locale().and_then(|tag| normalize_tag(&tag))
}

/// Strip the encoding and modifier suffixes POSIX locales carry.
fn normalize_tag(tag: &str) -> Option<String> {
	let tag = tag.split(['.', '@']).next()?.trim();
	if tag.is_empty() || tag.eq_ignore_ascii_case("C") || tag.eq_ignore_ascii_case("POSIX") {
		return None;
	}
	Some(tag.to_string())
}

#[cfg(test)]
mod tests {
	use super::*;
	use disruptivo_common_i18n::Locale;

	#[test]
	fn test_normalize_strips_encoding() {
		assert_eq!(normalize_tag("en_US.UTF-8").as_deref(), Some("en_US"));
		assert_eq!(normalize_tag("de_DE@euro").as_deref(), Some("de_DE"));
		assert_eq!(normalize_tag("pt-BR").as_deref(), Some("pt-BR"));
	}

	#[test]
	fn test_normalize_ignores_posix_defaults() {
		assert_eq!(normalize_tag("C"), None);
		assert_eq!(normalize_tag("POSIX"), None);
		assert_eq!(normalize_tag(""), None);
	}

	#[test]
	fn test_normalized_tags_resolve_to_locales() {
		let tag = normalize_tag("ja_JP.UTF-8").unwrap();
		assert_eq!(Locale::from_language_tag(&tag), Some(Locale::Ja));
	}
}
