// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for reading settings bundles.

use thiserror::Error;

/// Errors raised while reading a [`crate::ValueMap`].
#[derive(Debug, Error)]
pub enum SettingsError {
	/// A key is present but holds a value of the wrong type.
	#[error("setting '{key}' must be a {expected}, got {found}")]
	WrongType {
		key: String,
		expected: &'static str,
		found: &'static str,
	},

	/// The settings document is not a JSON object.
	#[error("settings must be a JSON object: {0}")]
	InvalidJson(#[from] serde_json::Error),
}

/// Result type alias for settings operations.
pub type Result<T> = std::result::Result<T, SettingsError>;
