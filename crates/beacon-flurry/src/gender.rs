// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Gender trait normalization.

/// Flurry's gender classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
	Male,
	Female,
	Unknown,
}

impl Gender {
	pub const MALE_CODE: i8 = 1;
	pub const FEMALE_CODE: i8 = 0;
	pub const UNKNOWN_CODE: i8 = -1;

	/// Classifies a raw gender trait.
	///
	/// `male`/`m` and `female`/`f` match case-insensitively. Any other
	/// non-empty string is [`Gender::Unknown`]. An empty string yields `None`:
	/// nothing should be sent at all.
	pub fn classify(raw: &str) -> Option<Gender> {
		if raw.is_empty() {
			return None;
		}
		if raw.eq_ignore_ascii_case("male") || raw.eq_ignore_ascii_case("m") {
			Some(Gender::Male)
		} else if raw.eq_ignore_ascii_case("female") || raw.eq_ignore_ascii_case("f") {
			Some(Gender::Female)
		} else {
			Some(Gender::Unknown)
		}
	}

	/// The byte code the agent expects.
	pub fn code(&self) -> i8 {
		match self {
			Gender::Male => Self::MALE_CODE,
			Gender::Female => Self::FEMALE_CODE,
			Gender::Unknown => Self::UNKNOWN_CODE,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn male_variants() {
		for raw in ["Male", "M", "male", "m", "MALE"] {
			assert_eq!(Gender::classify(raw), Some(Gender::Male), "{raw}");
		}
	}

	#[test]
	fn female_variants() {
		for raw in ["Female", "f", "F", "FEMALE"] {
			assert_eq!(Gender::classify(raw), Some(Gender::Female), "{raw}");
		}
	}

	#[test]
	fn unrecognized_is_unknown() {
		for raw in ["other", "nonbinary", "ma", " male", "fem"] {
			assert_eq!(Gender::classify(raw), Some(Gender::Unknown), "{raw}");
		}
	}

	#[test]
	fn empty_is_not_classified() {
		assert_eq!(Gender::classify(""), None);
	}

	#[test]
	fn codes() {
		assert_eq!(Gender::Male.code(), 1);
		assert_eq!(Gender::Female.code(), 0);
		assert_eq!(Gender::Unknown.code(), -1);
	}

	proptest! {
		#[test]
		fn non_empty_always_classified(raw in ".{1,20}") {
			prop_assert!(Gender::classify(&raw).is_some());
		}

		#[test]
		fn classification_ignores_ascii_case(raw in "(male|m|female|f|other)") {
			prop_assert_eq!(
				Gender::classify(&raw.to_ascii_uppercase()),
				Gender::classify(&raw)
			);
		}
	}
}
