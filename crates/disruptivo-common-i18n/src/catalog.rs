// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Key resolution with fallback and variable substitution.

use tracing::trace;

use crate::bundle::Bundle;

/// Resolve a dotted key path against the active bundle, then the fallback bundle.
///
/// Returns the key path itself when neither bundle has a string at that path,
/// so missing translations stay visible instead of rendering blank.
///
/// # Example
///
/// ```
/// use disruptivo_common_i18n::{translate, Bundle};
///
/// let es = Bundle::from_slice(br#"{"nav":{"home":"Inicio","blog":"Blog"}}"#).unwrap();
/// let en = Bundle::from_slice(br#"{"nav":{"home":"Home"}}"#).unwrap();
///
/// assert_eq!(translate(Some(&en), Some(&es), "nav.home"), "Home");
/// assert_eq!(translate(Some(&en), Some(&es), "nav.blog"), "Blog");
/// assert_eq!(translate(Some(&en), Some(&es), "nav.contact"), "nav.contact");
/// ```
pub fn translate(active: Option<&Bundle>, fallback: Option<&Bundle>, key_path: &str) -> String {
	if let Some(value) = active.and_then(|bundle| bundle.lookup(key_path)) {
		return value.to_string();
	}

	if let Some(value) = fallback.and_then(|bundle| bundle.lookup(key_path)) {
		trace!(key = key_path, "translation key missing in active locale, using fallback");
		return value.to_string();
	}

	trace!(key = key_path, "translation key missing, returning key");
	key_path.to_string()
}

/// [`translate`] followed by [`interpolate`].
pub fn translate_fmt(
	active: Option<&Bundle>,
	fallback: Option<&Bundle>,
	key_path: &str,
	vars: &[(&str, &str)],
) -> String {
	interpolate(&translate(active, fallback, key_path), vars)
}

/// Replace `{name}` placeholders with values from `vars`.
///
/// A single left-to-right pass: placeholders whose name is not in `vars` are
/// kept verbatim, substituted values are not scanned again, and an unmatched
/// `{` is copied through.
///
/// # Example
///
/// ```
/// use disruptivo_common_i18n::interpolate;
///
/// assert_eq!(interpolate("Hello {name}", &[("name", "Ana")]), "Hello Ana");
/// assert_eq!(interpolate("Hello {name}", &[]), "Hello {name}");
/// ```
pub fn interpolate(template: &str, vars: &[(&str, &str)]) -> String {
	if vars.is_empty() {
		return template.to_string();
	}

	let mut out = String::with_capacity(template.len());
	let mut rest = template;

	while let Some(open) = rest.find('{') {
		out.push_str(&rest[..open]);
		let after = &rest[open + 1..];

		let Some(close) = after.find('}') else {
			out.push_str(&rest[open..]);
			return out;
		};

		let name = &after[..close];
		match vars.iter().find(|(var, _)| *var == name) {
			Some((_, value)) => {
				out.push_str(value);
				rest = &after[close + 1..];
			}
			None => {
				out.push('{');
				rest = after;
			}
		}
	}

	out.push_str(rest);
	out
}
