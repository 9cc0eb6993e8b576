// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Recording stand-ins for the Flurry agent and its builder.
//!
//! [`RecordingAgent`] records every call in order and can be told to fail a
//! named call. [`RecordingBuilderFactory`] hands out builders that record
//! the configuration chain instead of initializing anything.
//!
//! Only compiled with the `testing` feature.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use beacon_analytics_core::{ApplicationHandle, SessionContext, StringMap};

use crate::agent::{
	AgentBuilder, AgentBuilderFactory, AgentConfig, AgentLogLevel, AgentResult, FlurryAgent,
	SessionListener,
};
use crate::error::AgentError;

/// What a session call was made against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionTarget {
	Application(String),
	Activity(u64),
}

impl From<SessionContext<'_>> for SessionTarget {
	fn from(context: SessionContext<'_>) -> Self {
		match context {
			SessionContext::Application(app) => SessionTarget::Application(app.name().to_string()),
			SessionContext::Activity(activity) => SessionTarget::Activity(activity.id()),
		}
	}
}

/// The comparable part of an [`AgentConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedConfig {
	pub continue_session_millis: Option<i64>,
	pub capture_uncaught_exceptions: Option<bool>,
	pub log_enabled: Option<bool>,
	pub log_level: Option<AgentLogLevel>,
	pub has_listener: bool,
}

impl From<&AgentConfig> for RecordedConfig {
	fn from(config: &AgentConfig) -> Self {
		Self {
			continue_session_millis: config.continue_session_millis,
			capture_uncaught_exceptions: config.capture_uncaught_exceptions,
			log_enabled: config.log_enabled,
			log_level: config.log_level,
			has_listener: config.listener.is_some(),
		}
	}
}

/// A call made on a [`RecordingAgent`].
#[derive(Debug, Clone, PartialEq)]
pub enum AgentCall {
	SetContinueSessionMillis(i64),
	SetCaptureUncaughtExceptions(bool),
	SetReportLocation(bool),
	SetLogEnabled(bool),
	SetLogEvents(bool),
	Init {
		application: String,
		api_key: String,
	},
	Build {
		application: String,
		api_key: String,
		config: RecordedConfig,
	},
	StartSession(SessionTarget),
	EndSession(SessionTarget),
	PageView,
	LogEvent {
		event: String,
		parameters: StringMap,
	},
	SetUserId(String),
	SetAge(i32),
	SetGender(i8),
	SetLocation {
		latitude: f32,
		longitude: f32,
	},
}

impl AgentCall {
	/// The agent method name, as used by [`RecordingAgent::failing_on`].
	pub fn method(&self) -> &'static str {
		match self {
			AgentCall::SetContinueSessionMillis(_) => "setContinueSessionMillis",
			AgentCall::SetCaptureUncaughtExceptions(_) => "setCaptureUncaughtExceptions",
			AgentCall::SetReportLocation(_) => "setReportLocation",
			AgentCall::SetLogEnabled(_) => "setLogEnabled",
			AgentCall::SetLogEvents(_) => "setLogEvents",
			AgentCall::Init { .. } => "init",
			AgentCall::Build { .. } => "build",
			AgentCall::StartSession(_) => "onStartSession",
			AgentCall::EndSession(_) => "onEndSession",
			AgentCall::PageView => "onPageView",
			AgentCall::LogEvent { .. } => "logEvent",
			AgentCall::SetUserId(_) => "setUserId",
			AgentCall::SetAge(_) => "setAge",
			AgentCall::SetGender(_) => "setGender",
			AgentCall::SetLocation { .. } => "setLocation",
		}
	}
}

/// A [`FlurryAgent`] that records calls instead of talking to Flurry.
///
/// When a listener was supplied through `build`, it is notified on every
/// application-level `onStartSession`, the way the agent reports a started
/// session.
#[derive(Default)]
pub struct RecordingAgent {
	calls: Mutex<Vec<AgentCall>>,
	fail_on: Option<&'static str>,
	listener: Mutex<Option<Arc<dyn SessionListener>>>,
}

impl RecordingAgent {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes the named method fail with [`AgentError::Rejected`] without
	/// recording it.
	pub fn failing_on(mut self, method: &'static str) -> Self {
		self.fail_on = Some(method);
		self
	}

	/// Returns every recorded call, in order.
	pub fn calls(&self) -> Vec<AgentCall> {
		self.calls.lock().map(|c| c.clone()).unwrap_or_default()
	}

	/// Forgets recorded calls, e.g. those issued during construction.
	pub fn clear(&self) {
		if let Ok(mut calls) = self.calls.lock() {
			calls.clear();
		}
	}

	fn record(&self, call: AgentCall) -> AgentResult {
		let method = call.method();
		if self.fail_on == Some(method) {
			return Err(AgentError::Rejected {
				call: method,
				reason: "injected failure".to_string(),
			});
		}
		if let Ok(mut calls) = self.calls.lock() {
			calls.push(call);
		}
		Ok(())
	}
}

impl FlurryAgent for RecordingAgent {
	fn set_continue_session_millis(&self, millis: i64) -> AgentResult {
		self.record(AgentCall::SetContinueSessionMillis(millis))
	}

	fn set_capture_uncaught_exceptions(&self, enabled: bool) -> AgentResult {
		self.record(AgentCall::SetCaptureUncaughtExceptions(enabled))
	}

	fn set_report_location(&self, enabled: bool) -> AgentResult {
		self.record(AgentCall::SetReportLocation(enabled))
	}

	fn set_log_enabled(&self, enabled: bool) -> AgentResult {
		self.record(AgentCall::SetLogEnabled(enabled))
	}

	fn set_log_events(&self, enabled: bool) -> AgentResult {
		self.record(AgentCall::SetLogEvents(enabled))
	}

	fn init(&self, application: &ApplicationHandle, api_key: &str) -> AgentResult {
		self.record(AgentCall::Init {
			application: application.name().to_string(),
			api_key: api_key.to_string(),
		})
	}

	fn build(&self, application: &ApplicationHandle, api_key: &str, config: AgentConfig) -> AgentResult {
		self.record(AgentCall::Build {
			application: application.name().to_string(),
			api_key: api_key.to_string(),
			config: RecordedConfig::from(&config),
		})?;
		if let Ok(mut listener) = self.listener.lock() {
			*listener = config.listener;
		}
		Ok(())
	}

	fn on_start_session(&self, context: SessionContext<'_>) -> AgentResult {
		self.record(AgentCall::StartSession(context.into()))?;
		if context.is_application() {
			let listener = self.listener.lock().ok().and_then(|l| l.clone());
			if let Some(listener) = listener {
				listener.on_session_started();
			}
		}
		Ok(())
	}

	fn on_end_session(&self, context: SessionContext<'_>) -> AgentResult {
		self.record(AgentCall::EndSession(context.into()))
	}

	fn on_page_view(&self) -> AgentResult {
		self.record(AgentCall::PageView)
	}

	fn log_event(&self, event: &str, parameters: &StringMap) -> AgentResult {
		self.record(AgentCall::LogEvent {
			event: event.to_string(),
			parameters: parameters.clone(),
		})
	}

	fn set_user_id(&self, user_id: &str) -> AgentResult {
		self.record(AgentCall::SetUserId(user_id.to_string()))
	}

	fn set_age(&self, age: i32) -> AgentResult {
		self.record(AgentCall::SetAge(age))
	}

	fn set_gender(&self, gender: i8) -> AgentResult {
		self.record(AgentCall::SetGender(gender))
	}

	fn set_location(&self, latitude: f32, longitude: f32) -> AgentResult {
		self.record(AgentCall::SetLocation {
			latitude,
			longitude,
		})
	}
}

/// A call made on a builder from [`RecordingBuilderFactory`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuilderCall {
	ContinueSessionMillis(i64),
	CaptureUncaughtExceptions(bool),
	LogEnabled(bool),
	LogLevel(AgentLogLevel),
	Listener,
	Build { application: String, api_key: String },
}

#[derive(Default)]
struct BuilderLog {
	created: AtomicUsize,
	calls: Mutex<Vec<BuilderCall>>,
	listener: Mutex<Option<Arc<dyn SessionListener>>>,
}

impl BuilderLog {
	fn push(&self, call: BuilderCall) {
		if let Ok(mut calls) = self.calls.lock() {
			calls.push(call);
		}
	}
}

/// An [`AgentBuilderFactory`] whose builders only record what they are told.
///
/// Clones share the same record.
#[derive(Clone, Default)]
pub struct RecordingBuilderFactory {
	log: Arc<BuilderLog>,
	build_error: Option<AgentError>,
}

impl RecordingBuilderFactory {
	pub fn new() -> Self {
		Self::default()
	}

	/// Makes `build` fail with `error`.
	pub fn failing_build(mut self, error: AgentError) -> Self {
		self.build_error = Some(error);
		self
	}

	/// How many builders have been created.
	pub fn created(&self) -> usize {
		self.log.created.load(Ordering::SeqCst)
	}

	/// Every call made on any created builder, in order.
	pub fn calls(&self) -> Vec<BuilderCall> {
		self.log.calls.lock().map(|c| c.clone()).unwrap_or_default()
	}

	/// The listener passed to the last builder, if any.
	pub fn listener(&self) -> Option<Arc<dyn SessionListener>> {
		self.log.listener.lock().ok().and_then(|l| l.clone())
	}
}

impl AgentBuilderFactory for RecordingBuilderFactory {
	fn create(&self) -> Box<dyn AgentBuilder> {
		self.log.created.fetch_add(1, Ordering::SeqCst);
		Box::new(RecordingBuilder {
			log: Arc::clone(&self.log),
			build_error: self.build_error.clone(),
		})
	}
}

struct RecordingBuilder {
	log: Arc<BuilderLog>,
	build_error: Option<AgentError>,
}

impl AgentBuilder for RecordingBuilder {
	fn with_continue_session_millis(&mut self, millis: i64) -> &mut dyn AgentBuilder {
		self.log.push(BuilderCall::ContinueSessionMillis(millis));
		self
	}

	fn with_capture_uncaught_exceptions(&mut self, enabled: bool) -> &mut dyn AgentBuilder {
		self.log.push(BuilderCall::CaptureUncaughtExceptions(enabled));
		self
	}

	fn with_log_enabled(&mut self, enabled: bool) -> &mut dyn AgentBuilder {
		self.log.push(BuilderCall::LogEnabled(enabled));
		self
	}

	fn with_log_level(&mut self, level: AgentLogLevel) -> &mut dyn AgentBuilder {
		self.log.push(BuilderCall::LogLevel(level));
		self
	}

	fn with_listener(&mut self, listener: Arc<dyn SessionListener>) -> &mut dyn AgentBuilder {
		self.log.push(BuilderCall::Listener);
		if let Ok(mut slot) = self.log.listener.lock() {
			*slot = Some(listener);
		}
		self
	}

	fn build(self: Box<Self>, application: &ApplicationHandle, api_key: &str) -> AgentResult {
		self.log.push(BuilderCall::Build {
			application: application.name().to_string(),
			api_key: api_key.to_string(),
		});
		match self.build_error {
			Some(err) => Err(err),
			None => Ok(()),
		}
	}
}
