// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Payload types delivered to integrations by the pipeline.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::properties::Properties;

/// Named attributes of a user profile.
///
/// Traits are free-form; `age` and `gender` are the well-known keys that
/// destinations map onto dedicated profile fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Traits {
	inner: Properties,
}

impl Traits {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts an arbitrary trait (builder pattern).
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner = self.inner.insert(key, value);
		self
	}

	pub fn with_age(self, age: i32) -> Self {
		self.insert("age", age)
	}

	pub fn with_gender(self, gender: impl Into<String>) -> Self {
		self.insert("gender", gender.into())
	}

	/// The user's age, or 0 when unset or not representable as an `i32`.
	///
	/// Numeric strings are accepted, as some sources send every trait as a
	/// string.
	pub fn age(&self) -> i32 {
		match self.inner.get("age") {
			Some(Value::Number(n)) => n
				.as_i64()
				.or_else(|| n.as_f64().map(|f| f.trunc() as i64))
				.and_then(|i| i32::try_from(i).ok())
				.unwrap_or(0),
			Some(Value::String(s)) => s.trim().parse().unwrap_or(0),
			_ => 0,
		}
	}

	/// The user's gender as supplied. Non-string values are rendered as
	/// their JSON text, so `1` reads as `"1"`; null reads as absent.
	pub fn gender(&self) -> Option<Cow<'_, str>> {
		match self.inner.get("gender") {
			None | Some(Value::Null) => None,
			Some(Value::String(s)) => Some(Cow::Borrowed(s.as_str())),
			Some(other) => Some(Cow::Owned(other.to_string())),
		}
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}
}

/// A geographic position. A missing coordinate reads as 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
	#[serde(default)]
	pub latitude: f64,
	#[serde(default)]
	pub longitude: f64,
}

impl Location {
	pub fn new(latitude: f64, longitude: f64) -> Self {
		Self {
			latitude,
			longitude,
		}
	}
}

/// Device and environment context attached to an event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsContext {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub location: Option<Location>,
}

impl AnalyticsContext {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_location(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}

	pub fn location(&self) -> Option<&Location> {
		self.location.as_ref()
	}
}

/// Identifies a user and attaches traits to their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentifyPayload {
	pub user_id: String,
	#[serde(default)]
	pub traits: Traits,
	#[serde(default)]
	pub context: AnalyticsContext,
}

impl IdentifyPayload {
	pub fn new(user_id: impl Into<String>) -> Self {
		Self {
			user_id: user_id.into(),
			traits: Traits::new(),
			context: AnalyticsContext::new(),
		}
	}

	pub fn with_traits(mut self, traits: Traits) -> Self {
		self.traits = traits;
		self
	}

	pub fn with_context(mut self, context: AnalyticsContext) -> Self {
		self.context = context;
		self
	}
}

/// A custom event performed by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackPayload {
	pub event: String,
	#[serde(default)]
	pub properties: Properties,
}

impl TrackPayload {
	pub fn new(event: impl Into<String>) -> Self {
		Self {
			event: event.into(),
			properties: Properties::new(),
		}
	}

	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}
}

/// A screen view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScreenPayload {
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub name: Option<String>,
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub category: Option<String>,
	#[serde(default)]
	pub properties: Properties,
}

impl ScreenPayload {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: Some(name.into()),
			..Self::default()
		}
	}

	pub fn with_category(mut self, category: impl Into<String>) -> Self {
		self.category = Some(category.into());
		self
	}

	pub fn with_properties(mut self, properties: Properties) -> Self {
		self.properties = properties;
		self
	}

	/// The event name for this screen: its name, or its category when the
	/// name is empty.
	pub fn event(&self) -> &str {
		match self.name.as_deref() {
			Some(name) if !name.is_empty() => name,
			_ => self.category.as_deref().unwrap_or_default(),
		}
	}
}
