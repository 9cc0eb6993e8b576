// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event properties and their string-map projection.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A flat string-to-string property map, as destinations that only accept
/// string parameters expect. Ordered so that traces are deterministic.
pub type StringMap = BTreeMap<String, String>;

/// Properties attached to a track or screen event.
///
/// # Example
///
/// ```
/// use beacon_analytics_core::Properties;
///
/// let props = Properties::new()
///     .insert("category", "checkout")
///     .insert("price", 99.99)
///     .insert("is_premium", true);
/// assert_eq!(props.to_string_map()["is_premium"], "true");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Properties {
	inner: Map<String, Value>,
}

impl Properties {
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair into the properties.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Projects the properties onto a string-to-string map.
	///
	/// Strings are copied as-is; every other value is rendered as its JSON
	/// text (`3`, `true`, `null`, `{"a":1}`).
	pub fn to_string_map(&self) -> StringMap {
		self
			.inner
			.iter()
			.map(|(k, v)| {
				let rendered = match v {
					Value::String(s) => s.clone(),
					other => other.to_string(),
				};
				(k.clone(), rendered)
			})
			.collect()
	}
}

impl From<Value> for Properties {
	fn from(value: Value) -> Self {
		match value {
			Value::Object(map) => Self { inner: map },
			_ => Self::new(),
		}
	}
}

impl From<Map<String, Value>> for Properties {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}
