// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The settings bundle handed to an integration at construction time.
//!
//! Settings arrive from the pipeline's project configuration as a JSON object.
//! Accessors distinguish an absent key (resolved to the caller's default) from
//! a key holding the wrong type (an error); there is no coercion between
//! types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Result, SettingsError};

/// A string/number/boolean typed key-value bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValueMap {
	inner: Map<String, Value>,
}

impl ValueMap {
	/// Creates an empty bundle.
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Parses a bundle from a JSON object document.
	pub fn from_json_str(json: &str) -> Result<Self> {
		let inner: Map<String, Value> = serde_json::from_str(json)?;
		Ok(Self { inner })
	}

	/// Inserts a value (builder pattern).
	pub fn put_value<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Returns the raw value for a key.
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	/// Reads a string. Absent or null keys yield `None`.
	pub fn get_string(&self, key: &str) -> Result<Option<&str>> {
		match self.present(key) {
			None => Ok(None),
			Some(Value::String(s)) => Ok(Some(s.as_str())),
			Some(other) => Err(wrong_type(key, "string", other)),
		}
	}

	/// Reads an integer, falling back to `default` when the key is absent.
	///
	/// Floating point values are accepted only when they carry no fractional
	/// part, since JSON encoders are free to write `20` as `20.0`.
	pub fn get_int(&self, key: &str, default: i64) -> Result<i64> {
		match self.present(key) {
			None => Ok(default),
			Some(Value::Number(n)) => {
				if let Some(i) = n.as_i64() {
					return Ok(i);
				}
				match n.as_f64() {
					Some(f) if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 => {
						Ok(f as i64)
					}
					_ => Err(SettingsError::WrongType {
						key: key.to_string(),
						expected: "integer",
						found: "fractional number",
					}),
				}
			}
			Some(other) => Err(wrong_type(key, "integer", other)),
		}
	}

	/// Reads a boolean, falling back to `default` when the key is absent.
	pub fn get_bool(&self, key: &str, default: bool) -> Result<bool> {
		match self.present(key) {
			None => Ok(default),
			Some(Value::Bool(b)) => Ok(*b),
			Some(other) => Err(wrong_type(key, "boolean", other)),
		}
	}

	/// Reads a nested bundle, such as one integration's block inside the
	/// project settings.
	pub fn get_value_map(&self, key: &str) -> Result<Option<ValueMap>> {
		match self.present(key) {
			None => Ok(None),
			Some(Value::Object(map)) => Ok(Some(ValueMap { inner: map.clone() })),
			Some(other) => Err(wrong_type(key, "object", other)),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	fn present(&self, key: &str) -> Option<&Value> {
		self.inner.get(key).filter(|v| !v.is_null())
	}
}

impl From<Map<String, Value>> for ValueMap {
	fn from(inner: Map<String, Value>) -> Self {
		Self { inner }
	}
}

fn wrong_type(key: &str, expected: &'static str, found: &Value) -> SettingsError {
	SettingsError::WrongType {
		key: key.to_string(),
		expected,
		found: type_name(found),
	}
}

fn type_name(value: &Value) -> &'static str {
	match value {
		Value::Null => "null",
		Value::Bool(_) => "boolean",
		Value::Number(_) => "number",
		Value::String(_) => "string",
		Value::Array(_) => "array",
		Value::Object(_) => "object",
	}
}
