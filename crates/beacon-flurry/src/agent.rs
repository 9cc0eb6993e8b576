// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The Flurry agent boundary.
//!
//! [`FlurryAgent`] mirrors the Flurry SDK's process-wide agent. The SDK owns
//! its session and delivery state; this crate only issues calls against it.
//!
//! [`AgentBuilderFactory`] is the seam used by the builder initialization
//! strategy. Production wiring uses [`ConfigBuilderFactory`], which collects
//! the chained configuration into an [`AgentConfig`] and hands it to
//! [`FlurryAgent::build`]. Tests substitute a recording factory and assert the
//! exact chain without touching an agent.

use std::fmt;
use std::sync::Arc;

use beacon_analytics_core::{ApplicationHandle, SessionContext, StringMap};

use crate::error::AgentError;

/// Result of a single agent call.
pub type AgentResult = std::result::Result<(), AgentError>;

/// The agent's internal log verbosity, using the platform log priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentLogLevel {
	Verbose,
	Debug,
	Info,
	Warn,
	Error,
}

impl AgentLogLevel {
	/// The platform priority code.
	pub fn code(&self) -> u8 {
		match self {
			AgentLogLevel::Verbose => 2,
			AgentLogLevel::Debug => 3,
			AgentLogLevel::Info => 4,
			AgentLogLevel::Warn => 5,
			AgentLogLevel::Error => 6,
		}
	}
}

impl fmt::Display for AgentLogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let name = match self {
			AgentLogLevel::Verbose => "VERBOSE",
			AgentLogLevel::Debug => "DEBUG",
			AgentLogLevel::Info => "INFO",
			AgentLogLevel::Warn => "WARN",
			AgentLogLevel::Error => "ERROR",
		};
		f.write_str(name)
	}
}

/// Notified by the agent when a destination session has actually started.
pub trait SessionListener: Send + Sync {
	fn on_session_started(&self);
}

/// The Flurry agent.
pub trait FlurryAgent: Send + Sync {
	fn set_continue_session_millis(&self, millis: i64) -> AgentResult;

	fn set_capture_uncaught_exceptions(&self, enabled: bool) -> AgentResult;

	fn set_report_location(&self, enabled: bool) -> AgentResult;

	fn set_log_enabled(&self, enabled: bool) -> AgentResult;

	fn set_log_events(&self, enabled: bool) -> AgentResult;

	/// Initializes the agent after the individual setters have been applied.
	fn init(&self, application: &ApplicationHandle, api_key: &str) -> AgentResult;

	/// Initializes the agent from a complete builder configuration.
	fn build(&self, application: &ApplicationHandle, api_key: &str, config: AgentConfig) -> AgentResult;

	fn on_start_session(&self, context: SessionContext<'_>) -> AgentResult;

	fn on_end_session(&self, context: SessionContext<'_>) -> AgentResult;

	fn on_page_view(&self) -> AgentResult;

	fn log_event(&self, event: &str, parameters: &StringMap) -> AgentResult;

	fn set_user_id(&self, user_id: &str) -> AgentResult;

	fn set_age(&self, age: i32) -> AgentResult;

	fn set_gender(&self, gender: i8) -> AgentResult;

	fn set_location(&self, latitude: f32, longitude: f32) -> AgentResult;
}

/// Configuration collected by an [`AgentBuilder`].
#[derive(Clone, Default)]
pub struct AgentConfig {
	pub continue_session_millis: Option<i64>,
	pub capture_uncaught_exceptions: Option<bool>,
	pub log_enabled: Option<bool>,
	pub log_level: Option<AgentLogLevel>,
	pub listener: Option<Arc<dyn SessionListener>>,
}

impl fmt::Debug for AgentConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("AgentConfig")
			.field("continue_session_millis", &self.continue_session_millis)
			.field("capture_uncaught_exceptions", &self.capture_uncaught_exceptions)
			.field("log_enabled", &self.log_enabled)
			.field("log_level", &self.log_level)
			.field("has_listener", &self.listener.is_some())
			.finish()
	}
}

/// A chained agent builder, finalized once with [`AgentBuilder::build`].
pub trait AgentBuilder {
	fn with_continue_session_millis(&mut self, millis: i64) -> &mut dyn AgentBuilder;

	fn with_capture_uncaught_exceptions(&mut self, enabled: bool) -> &mut dyn AgentBuilder;

	fn with_log_enabled(&mut self, enabled: bool) -> &mut dyn AgentBuilder;

	fn with_log_level(&mut self, level: AgentLogLevel) -> &mut dyn AgentBuilder;

	fn with_listener(&mut self, listener: Arc<dyn SessionListener>) -> &mut dyn AgentBuilder;

	fn build(self: Box<Self>, application: &ApplicationHandle, api_key: &str) -> AgentResult;
}

/// Produces a fresh [`AgentBuilder`].
pub trait AgentBuilderFactory: Send + Sync {
	fn create(&self) -> Box<dyn AgentBuilder>;
}

/// The production builder: accumulates an [`AgentConfig`] and finalizes it
/// through [`FlurryAgent::build`].
pub struct ConfigBuilder {
	agent: Arc<dyn FlurryAgent>,
	config: AgentConfig,
}

impl ConfigBuilder {
	pub fn new(agent: Arc<dyn FlurryAgent>) -> Self {
		Self {
			agent,
			config: AgentConfig::default(),
		}
	}

	pub fn config(&self) -> &AgentConfig {
		&self.config
	}
}

impl AgentBuilder for ConfigBuilder {
	fn with_continue_session_millis(&mut self, millis: i64) -> &mut dyn AgentBuilder {
		self.config.continue_session_millis = Some(millis);
		self
	}

	fn with_capture_uncaught_exceptions(&mut self, enabled: bool) -> &mut dyn AgentBuilder {
		self.config.capture_uncaught_exceptions = Some(enabled);
		self
	}

	fn with_log_enabled(&mut self, enabled: bool) -> &mut dyn AgentBuilder {
		self.config.log_enabled = Some(enabled);
		self
	}

	fn with_log_level(&mut self, level: AgentLogLevel) -> &mut dyn AgentBuilder {
		self.config.log_level = Some(level);
		self
	}

	fn with_listener(&mut self, listener: Arc<dyn SessionListener>) -> &mut dyn AgentBuilder {
		self.config.listener = Some(listener);
		self
	}

	fn build(self: Box<Self>, application: &ApplicationHandle, api_key: &str) -> AgentResult {
		let ConfigBuilder { agent, config } = *self;
		agent.build(application, api_key, config)
	}
}

/// The production [`AgentBuilderFactory`].
#[derive(Clone)]
pub struct ConfigBuilderFactory {
	agent: Arc<dyn FlurryAgent>,
}

impl ConfigBuilderFactory {
	pub fn new(agent: Arc<dyn FlurryAgent>) -> Self {
		Self { agent }
	}
}

impl AgentBuilderFactory for ConfigBuilderFactory {
	fn create(&self) -> Box<dyn AgentBuilder> {
		Box::new(ConfigBuilder::new(Arc::clone(&self.agent)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::testing::{AgentCall, RecordingAgent};

	#[test]
	fn log_level_codes_match_platform_priorities() {
		assert_eq!(AgentLogLevel::Verbose.code(), 2);
		assert_eq!(AgentLogLevel::Error.code(), 6);
		assert_eq!(AgentLogLevel::Verbose.to_string(), "VERBOSE");
	}

	#[test]
	fn config_builder_collects_chain() {
		let agent = Arc::new(RecordingAgent::new());
		let mut builder = ConfigBuilder::new(agent.clone());
		builder
			.with_continue_session_millis(20_000)
			.with_capture_uncaught_exceptions(true)
			.with_log_enabled(false)
			.with_log_level(AgentLogLevel::Verbose);

		assert_eq!(builder.config().continue_session_millis, Some(20_000));
		assert_eq!(builder.config().capture_uncaught_exceptions, Some(true));
		assert_eq!(builder.config().log_enabled, Some(false));
		assert_eq!(builder.config().log_level, Some(AgentLogLevel::Verbose));
		assert!(builder.config().listener.is_none());
	}

	#[test]
	fn config_builder_finalizes_through_agent() {
		let agent = Arc::new(RecordingAgent::new());
		let factory = ConfigBuilderFactory::new(agent.clone());

		let mut builder = factory.create();
		builder
			.with_continue_session_millis(10_000)
			.with_capture_uncaught_exceptions(false);
		builder
			.build(&ApplicationHandle::new("app"), "key")
			.unwrap();

		let calls = agent.calls();
		assert_eq!(calls.len(), 1);
		match &calls[0] {
			AgentCall::Build {
				application,
				api_key,
				config,
			} => {
				assert_eq!(application, "app");
				assert_eq!(api_key, "key");
				assert_eq!(config.continue_session_millis, Some(10_000));
				assert_eq!(config.capture_uncaught_exceptions, Some(false));
				assert_eq!(config.log_enabled, None);
			}
			other => panic!("unexpected call: {other:?}"),
		}
	}
}
