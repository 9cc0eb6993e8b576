// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Rendering helpers for the verbose call trace.

use std::fmt;

use beacon_analytics_core::StringMap;

/// Renders a string map as `{key=value, key=value}`.
pub struct DisplayStringMap<'a>(pub &'a StringMap);

impl fmt::Display for DisplayStringMap<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str("{")?;
		for (i, (key, value)) in self.0.iter().enumerate() {
			if i > 0 {
				f.write_str(", ")?;
			}
			write!(f, "{key}={value}")?;
		}
		f.write_str("}")
	}
}

/// Renders an `f32` the way the agent's own trace prints floats: plain
/// decimal with at least one fractional digit for magnitudes in
/// `[1e-3, 1e7)`, and `<mantissa>E<exponent>` outside it.
pub struct JavaFloat(pub f32);

impl fmt::Display for JavaFloat {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let value = self.0;
		if value.is_nan() {
			return f.write_str("NaN");
		}
		if value.is_infinite() {
			return f.write_str(if value > 0.0 { "Infinity" } else { "-Infinity" });
		}
		let magnitude = value.abs();
		if magnitude == 0.0 || (1.0e-3..1.0e7).contains(&magnitude) {
			return write!(f, "{value:?}");
		}

		let scientific = format!("{value:e}");
		let (mantissa, exponent) = scientific
			.split_once('e')
			.unwrap_or((scientific.as_str(), "0"));
		if mantissa.contains('.') {
			write!(f, "{mantissa}E{exponent}")
		} else {
			write!(f, "{mantissa}.0E{exponent}")
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn renders_empty_map() {
		assert_eq!(DisplayStringMap(&StringMap::new()).to_string(), "{}");
	}

	#[test]
	fn renders_entries_in_key_order() {
		let mut map = StringMap::new();
		map.insert("value".to_string(), "3".to_string());
		map.insert("category".to_string(), "bar".to_string());
		assert_eq!(
			DisplayStringMap(&map).to_string(),
			"{category=bar, value=3}"
		);
	}

	#[test]
	fn java_float_plain_range() {
		assert_eq!(JavaFloat(20.0).to_string(), "20.0");
		assert_eq!(JavaFloat(-37.5).to_string(), "-37.5");
		assert_eq!(JavaFloat(0.001).to_string(), "0.001");
		assert_eq!(JavaFloat(0.0).to_string(), "0.0");
		assert_eq!(JavaFloat(-0.0).to_string(), "-0.0");
	}

	#[test]
	fn java_float_scientific_range() {
		assert_eq!(JavaFloat(0.0001).to_string(), "1.0E-4");
		assert_eq!(JavaFloat(1.0e7).to_string(), "1.0E7");
		assert_eq!(JavaFloat(-2.5e-5).to_string(), "-2.5E-5");
		assert_eq!(JavaFloat(1.5e10).to_string(), "1.5E10");
	}

	#[test]
	fn java_float_special_values() {
		assert_eq!(JavaFloat(f32::NAN).to_string(), "NaN");
		assert_eq!(JavaFloat(f32::INFINITY).to_string(), "Infinity");
		assert_eq!(JavaFloat(f32::NEG_INFINITY).to_string(), "-Infinity");
	}

	proptest! {
		#[test]
		fn java_float_parses_back(value in proptest::num::f32::NORMAL) {
			let rendered = JavaFloat(value).to_string();
			prop_assert_eq!(rendered.parse::<f32>().unwrap(), value);
		}
	}
}
