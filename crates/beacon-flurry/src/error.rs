// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the Flurry integration.

use beacon_analytics_core::SettingsError;
use thiserror::Error;

/// Errors raised by the Flurry agent itself.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AgentError {
	/// The agent refused the API key.
	#[error("invalid Flurry API key: {0}")]
	InvalidApiKey(String),

	/// The agent rejected a call.
	#[error("FlurryAgent.{call} rejected: {reason}")]
	Rejected { call: &'static str, reason: String },
}

/// Flurry integration errors.
#[derive(Debug, Error)]
pub enum FlurryError {
	/// The `apiKey` setting is missing or empty.
	#[error("Flurry settings require a non-empty 'apiKey'")]
	MissingApiKey,

	/// A setting is present with the right type but an unusable value.
	#[error("invalid Flurry setting '{key}': {reason}")]
	InvalidSetting { key: &'static str, reason: String },

	/// A setting is present with the wrong type.
	#[error(transparent)]
	Settings(#[from] SettingsError),

	/// The Flurry agent failed a call.
	#[error(transparent)]
	Agent(#[from] AgentError),
}

/// Result type alias for Flurry integration operations.
pub type Result<T> = std::result::Result<T, FlurryError>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn agent_error_converts() {
		let err: FlurryError = AgentError::InvalidApiKey("x".to_string()).into();
		assert!(matches!(err, FlurryError::Agent(AgentError::InvalidApiKey(_))));
		assert_eq!(err.to_string(), "invalid Flurry API key: x");
	}

	#[test]
	fn rejected_message_names_the_call() {
		let err = AgentError::Rejected {
			call: "setAge",
			reason: "not initialized".to_string(),
		};
		assert_eq!(err.to_string(), "FlurryAgent.setAge rejected: not initialized");
	}
}
