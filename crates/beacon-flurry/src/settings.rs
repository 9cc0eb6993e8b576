// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Flurry settings resolved from the integration's settings bundle.

use std::fmt;

use beacon_analytics_core::{LogLevel, ValueMap};

use crate::error::{FlurryError, Result};

pub const API_KEY: &str = "apiKey";
pub const SESSION_CONTINUE_SECONDS: &str = "sessionContinueSeconds";
pub const CAPTURE_UNCAUGHT_EXCEPTIONS: &str = "captureUncaughtExceptions";
pub const REPORT_LOCATION: &str = "reportLocation";

pub const DEFAULT_SESSION_CONTINUE_SECONDS: i64 = 10;
pub const DEFAULT_CAPTURE_UNCAUGHT_EXCEPTIONS: bool = false;
pub const DEFAULT_REPORT_LOCATION: bool = true;

/// Validated Flurry settings.
#[derive(Clone, PartialEq, Eq)]
pub struct FlurrySettings {
	api_key: String,
	session_continue_seconds: i64,
	capture_uncaught_exceptions: bool,
	report_location: bool,
}

impl FlurrySettings {
	/// Resolves settings, applying defaults for absent optional keys.
	pub fn from_value_map(settings: &ValueMap) -> Result<Self> {
		let session_continue_seconds =
			settings.get_int(SESSION_CONTINUE_SECONDS, DEFAULT_SESSION_CONTINUE_SECONDS)?;
		if session_continue_seconds < 0 {
			return Err(FlurryError::InvalidSetting {
				key: SESSION_CONTINUE_SECONDS,
				reason: format!("must not be negative, got {session_continue_seconds}"),
			});
		}
		if session_continue_seconds.checked_mul(1000).is_none() {
			return Err(FlurryError::InvalidSetting {
				key: SESSION_CONTINUE_SECONDS,
				reason: format!("{session_continue_seconds} seconds overflows milliseconds"),
			});
		}

		let capture_uncaught_exceptions = settings
			.get_bool(CAPTURE_UNCAUGHT_EXCEPTIONS, DEFAULT_CAPTURE_UNCAUGHT_EXCEPTIONS)?;
		let report_location = settings.get_bool(REPORT_LOCATION, DEFAULT_REPORT_LOCATION)?;

		let api_key = match settings.get_string(API_KEY)? {
			Some(key) if !key.is_empty() => key.to_string(),
			_ => return Err(FlurryError::MissingApiKey),
		};

		Ok(Self {
			api_key,
			session_continue_seconds,
			capture_uncaught_exceptions,
			report_location,
		})
	}

	pub fn api_key(&self) -> &str {
		&self.api_key
	}

	pub fn session_continue_seconds(&self) -> i64 {
		self.session_continue_seconds
	}

	/// The session continuation window in milliseconds.
	pub fn continue_session_millis(&self) -> i64 {
		self.session_continue_seconds * 1000
	}

	pub fn capture_uncaught_exceptions(&self) -> bool {
		self.capture_uncaught_exceptions
	}

	pub fn report_location(&self) -> bool {
		self.report_location
	}
}

impl fmt::Debug for FlurrySettings {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FlurrySettings")
			.field("api_key", &"[REDACTED]")
			.field("session_continue_seconds", &self.session_continue_seconds)
			.field("capture_uncaught_exceptions", &self.capture_uncaught_exceptions)
			.field("report_location", &self.report_location)
			.finish()
	}
}

/// The two agent logging flags derived from the host log level.
///
/// Diagnostic logging turns on at [`LogLevel::Debug`]; echoing every logged
/// event only at [`LogLevel::Verbose`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogFlags {
	pub log_enabled: bool,
	pub log_events: bool,
}

impl LogFlags {
	pub fn from_level(level: LogLevel) -> Self {
		Self {
			log_enabled: level >= LogLevel::Debug,
			log_events: level >= LogLevel::Verbose,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_analytics_core::SettingsError;
	use proptest::prelude::*;

	#[test]
	fn defaults_apply_when_optional_keys_absent() {
		let settings = FlurrySettings::from_value_map(&ValueMap::new().put_value("apiKey", "foo")).unwrap();
		assert_eq!(settings.api_key(), "foo");
		assert_eq!(settings.session_continue_seconds(), 10);
		assert_eq!(settings.continue_session_millis(), 10_000);
		assert!(!settings.capture_uncaught_exceptions());
		assert!(settings.report_location());
	}

	#[test]
	fn explicit_values_override_defaults() {
		let settings = FlurrySettings::from_value_map(
			&ValueMap::new()
				.put_value("apiKey", "foo")
				.put_value("sessionContinueSeconds", 20)
				.put_value("captureUncaughtExceptions", true)
				.put_value("reportLocation", false),
		)
		.unwrap();
		assert_eq!(settings.continue_session_millis(), 20_000);
		assert!(settings.capture_uncaught_exceptions());
		assert!(!settings.report_location());
	}

	#[test]
	fn missing_api_key_fails() {
		let result = FlurrySettings::from_value_map(&ValueMap::new());
		assert!(matches!(result, Err(FlurryError::MissingApiKey)));
	}

	#[test]
	fn empty_api_key_fails() {
		let result = FlurrySettings::from_value_map(&ValueMap::new().put_value("apiKey", ""));
		assert!(matches!(result, Err(FlurryError::MissingApiKey)));
	}

	#[test]
	fn non_string_api_key_is_a_type_error() {
		let result = FlurrySettings::from_value_map(&ValueMap::new().put_value("apiKey", 42));
		assert!(matches!(
			result,
			Err(FlurryError::Settings(SettingsError::WrongType { .. }))
		));
	}

	#[test]
	fn wrong_type_optional_setting_fails() {
		let result = FlurrySettings::from_value_map(
			&ValueMap::new()
				.put_value("apiKey", "foo")
				.put_value("reportLocation", "no"),
		);
		assert!(matches!(result, Err(FlurryError::Settings(_))));
	}

	#[test]
	fn negative_session_window_fails() {
		let result = FlurrySettings::from_value_map(
			&ValueMap::new()
				.put_value("apiKey", "foo")
				.put_value("sessionContinueSeconds", -1),
		);
		assert!(matches!(
			result,
			Err(FlurryError::InvalidSetting {
				key: SESSION_CONTINUE_SECONDS,
				..
			})
		));
	}

	#[test]
	fn overflowing_session_window_fails() {
		let result = FlurrySettings::from_value_map(
			&ValueMap::new()
				.put_value("apiKey", "foo")
				.put_value("sessionContinueSeconds", i64::MAX),
		);
		assert!(matches!(result, Err(FlurryError::InvalidSetting { .. })));
	}

	#[test]
	fn debug_redacts_api_key() {
		let settings =
			FlurrySettings::from_value_map(&ValueMap::new().put_value("apiKey", "secret-key")).unwrap();
		let debug = format!("{settings:?}");
		assert!(!debug.contains("secret-key"));
	}

	#[test]
	fn log_flags_thresholds() {
		assert_eq!(
			LogFlags::from_level(LogLevel::None),
			LogFlags { log_enabled: false, log_events: false }
		);
		assert_eq!(
			LogFlags::from_level(LogLevel::Info),
			LogFlags { log_enabled: false, log_events: false }
		);
		assert_eq!(
			LogFlags::from_level(LogLevel::Debug),
			LogFlags { log_enabled: true, log_events: false }
		);
		assert_eq!(
			LogFlags::from_level(LogLevel::Verbose),
			LogFlags { log_enabled: true, log_events: true }
		);
	}

	fn any_level() -> impl Strategy<Value = LogLevel> {
		prop_oneof![
			Just(LogLevel::None),
			Just(LogLevel::Info),
			Just(LogLevel::Debug),
			Just(LogLevel::Verbose),
		]
	}

	proptest! {
		#[test]
		fn log_flags_are_independent_thresholds(level in any_level()) {
			let flags = LogFlags::from_level(level);
			prop_assert_eq!(flags.log_enabled, level >= LogLevel::Debug);
			prop_assert_eq!(flags.log_events, level >= LogLevel::Verbose);
			prop_assert!(!flags.log_events || flags.log_enabled);
		}

		#[test]
		fn session_window_converts_to_millis(seconds in 0i64..1_000_000) {
			let settings = FlurrySettings::from_value_map(
				&ValueMap::new()
					.put_value("apiKey", "foo")
					.put_value("sessionContinueSeconds", seconds),
			)
			.unwrap();
			prop_assert_eq!(settings.continue_session_millis(), seconds * 1000);
		}
	}
}
