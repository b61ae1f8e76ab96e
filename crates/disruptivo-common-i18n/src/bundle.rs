// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Typed translation trees.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use crate::error::BundleError;

/// A node of a translation tree: either a displayable string or a keyed sub-tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationNode {
	Leaf(String),
	Tree(BTreeMap<String, TranslationNode>),
}

impl TranslationNode {
	/// Convert a JSON value into a node.
	///
	/// Strings become leaves, numbers and booleans become leaves holding their
	/// textual form, arrays become trees keyed by index (`"0"`, `"1"`, ...).
	/// `null` has no node.
	pub fn from_json(value: Value) -> Option<Self> {
		match value {
			Value::Null => None,
			Value::String(s) => Some(Self::Leaf(s)),
			Value::Bool(b) => Some(Self::Leaf(b.to_string())),
			Value::Number(n) => Some(Self::Leaf(n.to_string())),
			Value::Array(items) => Some(Self::Tree(
				items
					.into_iter()
					.enumerate()
					.filter_map(|(i, item)| Self::from_json(item).map(|node| (i.to_string(), node)))
					.collect(),
			)),
			Value::Object(map) => Some(Self::Tree(tree_from_map(map))),
		}
	}

	pub fn as_leaf(&self) -> Option<&str> {
		match self {
			Self::Leaf(s) => Some(s),
			Self::Tree(_) => None,
		}
	}

	fn collect_paths(&self, prefix: &str, out: &mut Vec<String>) {
		match self {
			Self::Leaf(_) => out.push(prefix.to_string()),
			Self::Tree(children) => {
				for (key, child) in children {
					child.collect_paths(&format!("{prefix}.{key}"), out);
				}
			}
		}
	}
}

fn tree_from_map(map: serde_json::Map<String, Value>) -> BTreeMap<String, TranslationNode> {
	map.into_iter()
		.filter_map(|(key, value)| TranslationNode::from_json(value).map(|node| (key, node)))
		.collect()
}

/// The translation tree for one namespace in one locale.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Value")]
pub struct Bundle {
	root: BTreeMap<String, TranslationNode>,
}

impl Bundle {
	/// A bundle with no keys. Failed loads are cached as this.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Parse a bundle from raw JSON bytes.
	pub fn from_slice(bytes: &[u8]) -> Result<Self, BundleError> {
		let value: Value = serde_json::from_slice(bytes)?;
		Self::try_from(value)
	}

	/// Walk a dotted key path and return the string leaf it addresses.
	///
	/// Returns `None` when a segment is missing, when an intermediate node is
	/// a leaf, or when the path ends on a sub-tree.
	pub fn lookup(&self, key_path: &str) -> Option<&str> {
		let mut segments = key_path.split('.');
		let first = segments.next()?;
		let mut node = self.root.get(first)?;

		for segment in segments {
			match node {
				TranslationNode::Tree(children) => node = children.get(segment)?,
				TranslationNode::Leaf(_) => return None,
			}
		}

		node.as_leaf()
	}

	pub fn is_empty(&self) -> bool {
		self.root.is_empty()
	}

	/// Dotted paths of every leaf, sorted.
	pub fn key_paths(&self) -> Vec<String> {
		let mut paths = Vec::new();
		for (key, node) in &self.root {
			match node {
				TranslationNode::Leaf(_) => paths.push(key.clone()),
				TranslationNode::Tree(_) => node.collect_paths(key, &mut paths),
			}
		}
		paths.sort();
		paths
	}

	/// Number of string leaves.
	pub fn len(&self) -> usize {
		self.key_paths().len()
	}
}

impl TryFrom<Value> for Bundle {
	type Error = BundleError;

	fn try_from(value: Value) -> Result<Self, Self::Error> {
		match value {
			Value::Object(map) => Ok(Self {
				root: tree_from_map(map),
			}),
			_ => Err(BundleError::NotAnObject),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn sample() -> Bundle {
		Bundle::try_from(json!({
			"hero": {
				"title": "Innovación disruptiva",
				"cta": { "primary": "Empieza ahora" }
			},
			"features": [
				{ "title": "Rápido" },
				{ "title": "Seguro" }
			],
			"stats": { "clients": 120, "remote": true },
			"draft": null
		}))
		.unwrap()
	}

	#[test]
	fn test_lookup_nested_leaf() {
		let bundle = sample();
		assert_eq!(bundle.lookup("hero.title"), Some("Innovación disruptiva"));
		assert_eq!(bundle.lookup("hero.cta.primary"), Some("Empieza ahora"));
	}

	#[test]
	fn test_lookup_array_by_index() {
		let bundle = sample();
		assert_eq!(bundle.lookup("features.1.title"), Some("Seguro"));
		assert_eq!(bundle.lookup("features.2.title"), None);
	}

	#[test]
	fn test_scalars_become_text() {
		let bundle = sample();
		assert_eq!(bundle.lookup("stats.clients"), Some("120"));
		assert_eq!(bundle.lookup("stats.remote"), Some("true"));
	}

	#[test]
	fn test_lookup_misses() {
		let bundle = sample();
		// ends on a sub-tree
		assert_eq!(bundle.lookup("hero"), None);
		// walks through a leaf
		assert_eq!(bundle.lookup("hero.title.extra"), None);
		assert_eq!(bundle.lookup("missing"), None);
		assert_eq!(bundle.lookup("draft"), None);
		assert_eq!(bundle.lookup(""), None);
		assert_eq!(bundle.lookup("hero..title"), None);
	}

	#[test]
	fn test_non_object_root_is_rejected() {
		assert!(matches!(
			Bundle::try_from(json!(["a", "b"])),
			Err(BundleError::NotAnObject)
		));
		assert!(matches!(
			Bundle::from_slice(b"\"just a string\""),
			Err(BundleError::NotAnObject)
		));
		assert!(matches!(
			Bundle::from_slice(b"{ broken"),
			Err(BundleError::Json(_))
		));
	}

	#[test]
	fn test_key_paths_sorted() {
		let bundle = sample();
		assert_eq!(
			bundle.key_paths(),
			vec![
				"features.0.title",
				"features.1.title",
				"hero.cta.primary",
				"hero.title",
				"stats.clients",
				"stats.remote",
			]
		);
		assert_eq!(bundle.len(), 6);
	}

	#[test]
	fn test_deserialize_via_serde() {
		let bundle: Bundle = serde_json::from_str(r#"{"a":{"b":"c"}}"#).unwrap();
		assert_eq!(bundle.lookup("a.b"), Some("c"));
		assert!(serde_json::from_str::<Bundle>("42").is_err());
	}

	#[test]
	fn test_empty_bundle() {
		let bundle = Bundle::empty();
		assert!(bundle.is_empty());
		assert_eq!(bundle.len(), 0);
		assert_eq!(bundle.lookup("anything"), None);
	}
}
