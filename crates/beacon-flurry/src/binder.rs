// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Construction-time binding of settings onto the Flurry agent.
//!
//! Two strategies produce an initialized agent:
//!
//! | Strategy | Calls |
//! |----------|-------|
//! | [`InitStrategy::DirectSetters`] | `setContinueSessionMillis`, `setCaptureUncaughtExceptions`, `setReportLocation`, `setLogEnabled`, `setLogEvents`, `init` |
//! | [`InitStrategy::Builder`] | `setReportLocation`, then a builder chain ending in `build` |
//!
//! The agent does not expose location reporting on its builder, so that flag
//! is always a direct call. Either way, binding finishes with one
//! application-level `onStartSession` so queued events can be delivered
//! before any activity reaches the foreground.

use std::fmt;
use std::sync::{Arc, OnceLock};

use beacon_analytics_core::{ApplicationHandle, Logger, SessionContext};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::agent::{AgentBuilderFactory, AgentLogLevel, FlurryAgent, SessionListener};
use crate::error::Result;
use crate::settings::{FlurrySettings, LogFlags};

/// How the agent is initialized.
#[derive(Clone)]
pub enum InitStrategy {
	/// Independent setters followed by `init`.
	DirectSetters,
	/// A builder obtained from the factory, chained and finalized with
	/// `build`.
	Builder(Arc<dyn AgentBuilderFactory>),
}

impl InitStrategy {
	pub fn builder(factory: impl AgentBuilderFactory + 'static) -> Self {
		InitStrategy::Builder(Arc::new(factory))
	}

	pub fn name(&self) -> &'static str {
		match self {
			InitStrategy::DirectSetters => "direct_setters",
			InitStrategy::Builder(_) => "builder",
		}
	}
}

impl fmt::Debug for InitStrategy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Records when the agent reports that its session has started.
#[derive(Debug, Default)]
pub struct SessionStartRecorder {
	started_at: OnceLock<DateTime<Utc>>,
}

impl SessionStartRecorder {
	pub fn new() -> Self {
		Self::default()
	}

	/// When the first destination session started, if it has.
	pub fn started_at(&self) -> Option<DateTime<Utc>> {
		self.started_at.get().copied()
	}
}

impl SessionListener for SessionStartRecorder {
	fn on_session_started(&self) {
		if self.started_at.set(Utc::now()).is_ok() {
			debug!("Flurry session started");
		}
	}
}

/// Applies [`FlurrySettings`] to an agent.
pub struct ConfigurationBinder<'a> {
	agent: &'a dyn FlurryAgent,
	logger: &'a Logger,
}

impl<'a> ConfigurationBinder<'a> {
	pub fn new(agent: &'a dyn FlurryAgent, logger: &'a Logger) -> Self {
		Self { agent, logger }
	}

	/// Initializes the agent with `strategy`, then opens the
	/// application-level session.
	pub fn bind(
		&self,
		settings: &FlurrySettings,
		application: &ApplicationHandle,
		strategy: &InitStrategy,
		recorder: &Arc<SessionStartRecorder>,
	) -> Result<()> {
		let flags = LogFlags::from_level(self.logger.level());

		match strategy {
			InitStrategy::DirectSetters => self.bind_direct(settings, application, flags)?,
			InitStrategy::Builder(factory) => {
				self.bind_with_builder(factory.as_ref(), settings, application, flags, recorder)?
			}
		}

		self
			.agent
			.on_start_session(SessionContext::Application(application))?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.onStartSession(context);"));

		Ok(())
	}

	fn bind_direct(
		&self,
		settings: &FlurrySettings,
		application: &ApplicationHandle,
		flags: LogFlags,
	) -> Result<()> {
		let millis = settings.continue_session_millis();
		self.agent.set_continue_session_millis(millis)?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.setContinueSessionMillis({millis});"));

		let capture = settings.capture_uncaught_exceptions();
		self.agent.set_capture_uncaught_exceptions(capture)?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.setCaptureUncaughtExceptions({capture});"));

		self.set_report_location(settings.report_location())?;

		self.agent.set_log_enabled(flags.log_enabled)?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.setLogEnabled({});", flags.log_enabled));

		self.agent.set_log_events(flags.log_events)?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.setLogEvents({});", flags.log_events));

		let api_key = settings.api_key();
		self.agent.init(application, api_key)?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.init(context, {api_key});"));

		Ok(())
	}

	fn bind_with_builder(
		&self,
		factory: &dyn AgentBuilderFactory,
		settings: &FlurrySettings,
		application: &ApplicationHandle,
		flags: LogFlags,
		recorder: &Arc<SessionStartRecorder>,
	) -> Result<()> {
		self.set_report_location(settings.report_location())?;

		let millis = settings.continue_session_millis();
		let capture = settings.capture_uncaught_exceptions();
		let listener: Arc<dyn SessionListener> = recorder.clone();

		let mut builder = factory.create();
		builder
			.with_continue_session_millis(millis)
			.with_capture_uncaught_exceptions(capture)
			.with_log_enabled(flags.log_enabled)
			.with_log_level(AgentLogLevel::Verbose)
			.with_listener(listener);

		let api_key = settings.api_key();
		builder.build(application, api_key)?;
		self.logger.verbose(format_args!(
			"new FlurryAgent.Builder()\
			.withContinueSessionMillis({millis})\
			.withCaptureUncaughtExceptions({capture})\
			.withLogEnabled({})\
			.withLogLevel({})\
			.withListener(listener)\
			.build(context, {api_key});",
			flags.log_enabled,
			AgentLogLevel::Verbose,
		));

		Ok(())
	}

	fn set_report_location(&self, report_location: bool) -> Result<()> {
		self.agent.set_report_location(report_location)?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.setReportLocation({report_location});"));
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use beacon_analytics_core::{LogLevel, MemoryLogSink, ValueMap};

	use crate::testing::{AgentCall, BuilderCall, RecordingAgent, RecordingBuilderFactory, SessionTarget};

	fn settings() -> FlurrySettings {
		FlurrySettings::from_value_map(
			&ValueMap::new()
				.put_value("apiKey", "foo")
				.put_value("sessionContinueSeconds", 20)
				.put_value("captureUncaughtExceptions", true)
				.put_value("reportLocation", false),
		)
		.unwrap()
	}

	fn verbose_logger() -> (Logger, Arc<MemoryLogSink>) {
		let sink = Arc::new(MemoryLogSink::new());
		(Logger::new("Flurry", LogLevel::Verbose).with_sink(sink.clone()), sink)
	}

	#[test]
	fn direct_setters_issue_ordered_sequence() {
		let agent = RecordingAgent::new();
		let (logger, sink) = verbose_logger();
		let app = ApplicationHandle::new("app");
		let recorder = Arc::new(SessionStartRecorder::new());

		ConfigurationBinder::new(&agent, &logger)
			.bind(&settings(), &app, &InitStrategy::DirectSetters, &recorder)
			.unwrap();

		assert_eq!(
			agent.calls(),
			vec![
				AgentCall::SetContinueSessionMillis(20_000),
				AgentCall::SetCaptureUncaughtExceptions(true),
				AgentCall::SetReportLocation(false),
				AgentCall::SetLogEnabled(true),
				AgentCall::SetLogEvents(true),
				AgentCall::Init {
					application: "app".to_string(),
					api_key: "foo".to_string(),
				},
				AgentCall::StartSession(SessionTarget::Application("app".to_string())),
			]
		);
		assert_eq!(
			sink.messages_for("Flurry"),
			vec![
				"FlurryAgent.setContinueSessionMillis(20000);",
				"FlurryAgent.setCaptureUncaughtExceptions(true);",
				"FlurryAgent.setReportLocation(false);",
				"FlurryAgent.setLogEnabled(true);",
				"FlurryAgent.setLogEvents(true);",
				"FlurryAgent.init(context, foo);",
				"FlurryAgent.onStartSession(context);",
			]
		);
	}

	#[test]
	fn builder_strategy_chains_configuration() {
		let agent = RecordingAgent::new();
		let factory = RecordingBuilderFactory::new();
		let (logger, sink) = verbose_logger();
		let app = ApplicationHandle::new("app");
		let recorder = Arc::new(SessionStartRecorder::new());

		ConfigurationBinder::new(&agent, &logger)
			.bind(&settings(), &app, &InitStrategy::builder(factory.clone()), &recorder)
			.unwrap();

		assert_eq!(factory.created(), 1);
		assert_eq!(
			factory.calls(),
			vec![
				BuilderCall::ContinueSessionMillis(20_000),
				BuilderCall::CaptureUncaughtExceptions(true),
				BuilderCall::LogEnabled(true),
				BuilderCall::LogLevel(AgentLogLevel::Verbose),
				BuilderCall::Listener,
				BuilderCall::Build {
					application: "app".to_string(),
					api_key: "foo".to_string(),
				},
			]
		);
		assert_eq!(
			agent.calls(),
			vec![
				AgentCall::SetReportLocation(false),
				AgentCall::StartSession(SessionTarget::Application("app".to_string())),
			]
		);
		assert_eq!(
			sink.messages_for("Flurry"),
			vec![
				"FlurryAgent.setReportLocation(false);",
				"new FlurryAgent.Builder().withContinueSessionMillis(20000)\
				.withCaptureUncaughtExceptions(true).withLogEnabled(true)\
				.withLogLevel(VERBOSE).withListener(listener).build(context, foo);",
				"FlurryAgent.onStartSession(context);",
			]
		);
	}

	#[test]
	fn log_flags_follow_logger_level() {
		let agent = RecordingAgent::new();
		let logger = Logger::new("Flurry", LogLevel::Debug);
		let app = ApplicationHandle::new("app");
		let recorder = Arc::new(SessionStartRecorder::new());

		ConfigurationBinder::new(&agent, &logger)
			.bind(&settings(), &app, &InitStrategy::DirectSetters, &recorder)
			.unwrap();

		let calls = agent.calls();
		assert!(calls.contains(&AgentCall::SetLogEnabled(true)));
		assert!(calls.contains(&AgentCall::SetLogEvents(false)));
	}

	#[test]
	fn failing_setter_stops_binding() {
		let agent = RecordingAgent::new().failing_on("setReportLocation");
		let (logger, _sink) = verbose_logger();
		let app = ApplicationHandle::new("app");
		let recorder = Arc::new(SessionStartRecorder::new());

		let result =
			ConfigurationBinder::new(&agent, &logger).bind(&settings(), &app, &InitStrategy::DirectSetters, &recorder);

		assert!(result.is_err());
		assert_eq!(
			agent.calls(),
			vec![
				AgentCall::SetContinueSessionMillis(20_000),
				AgentCall::SetCaptureUncaughtExceptions(true),
			]
		);
	}

	#[test]
	fn recorder_keeps_first_start() {
		let recorder = SessionStartRecorder::new();
		assert!(recorder.started_at().is_none());
		recorder.on_session_started();
		let first = recorder.started_at().unwrap();
		recorder.on_session_started();
		assert_eq!(recorder.started_at(), Some(first));
	}
}
