// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Translation of pipeline events into Flurry agent calls.
//!
//! | Event | Agent calls |
//! |-------|-------------|
//! | activity started | `onStartSession(activity)` |
//! | activity stopped | `onEndSession(activity)` |
//! | screen | `onPageView()`, `logEvent(name, properties)` |
//! | track | `logEvent(name, properties)` |
//! | identify | `setUserId`, then `setAge`, `setGender`, `setLocation` when present |
//!
//! Every call is mirrored to a verbose trace line. Handlers keep no state
//! between calls; a failing agent call aborts the rest of its handler.

use std::sync::Arc;

use beacon_analytics_core::{
	ActivityHandle, Analytics, IdentifyPayload, Integration, IntegrationFactory, Logger,
	ScreenPayload, SessionContext, StringMap, TrackPayload, ValueMap,
};
use chrono::{DateTime, Utc};
use tracing::info;

use crate::agent::{AgentResult, ConfigBuilderFactory, FlurryAgent};
use crate::binder::{ConfigurationBinder, InitStrategy, SessionStartRecorder};
use crate::error::{FlurryError, Result};
use crate::gender::Gender;
use crate::settings::FlurrySettings;
use crate::trace::{DisplayStringMap, JavaFloat};

/// The key Flurry's settings are stored under.
pub const FLURRY_KEY: &str = "Flurry";

/// The project configuration key holding per-integration settings.
const INTEGRATIONS_KEY: &str = "integrations";

/// A Flurry destination bound to one agent.
pub struct FlurryIntegration {
	agent: Arc<dyn FlurryAgent>,
	logger: Logger,
	settings: FlurrySettings,
	session: Arc<SessionStartRecorder>,
}

impl FlurryIntegration {
	/// Validates `settings`, initializes `agent` with `strategy` and opens
	/// the application-level session.
	///
	/// Fails before touching the agent if the settings are invalid.
	pub fn new(
		analytics: &Analytics,
		settings: &ValueMap,
		agent: Arc<dyn FlurryAgent>,
		strategy: InitStrategy,
	) -> Result<Self> {
		let logger = analytics.logger(FLURRY_KEY);
		let settings = FlurrySettings::from_value_map(settings)?;
		let session = Arc::new(SessionStartRecorder::new());

		ConfigurationBinder::new(agent.as_ref(), &logger).bind(
			&settings,
			analytics.application(),
			&strategy,
			&session,
		)?;

		info!(
			strategy = strategy.name(),
			continue_session_millis = settings.continue_session_millis(),
			report_location = settings.report_location(),
			"Flurry integration initialized"
		);

		Ok(Self {
			agent,
			logger,
			settings,
			session,
		})
	}

	pub fn settings(&self) -> &FlurrySettings {
		&self.settings
	}

	/// When the agent reported its first session start. Only tracked with
	/// [`InitStrategy::Builder`].
	pub fn session_started_at(&self) -> Option<DateTime<Utc>> {
		self.session.started_at()
	}

	/// Logs a failed agent call before handing the error back to the caller.
	fn forward(&self, result: AgentResult) -> Result<()> {
		result.map_err(|err| {
			self.logger.error(&err, format_args!("Flurry agent call failed"));
			FlurryError::Agent(err)
		})
	}

	fn log_event(&self, event: &str, properties: &StringMap) -> Result<()> {
		self.forward(self.agent.log_event(event, properties))?;
		self.logger.verbose(format_args!(
			"FlurryAgent.logEvent({event}, {});",
			DisplayStringMap(properties)
		));
		Ok(())
	}
}

impl Integration for FlurryIntegration {
	type Error = FlurryError;

	fn on_activity_started(&self, activity: &ActivityHandle) -> Result<()> {
		self.forward(self.agent.on_start_session(SessionContext::Activity(activity)))?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.onStartSession(activity);"));
		Ok(())
	}

	fn on_activity_stopped(&self, activity: &ActivityHandle) -> Result<()> {
		self.forward(self.agent.on_end_session(SessionContext::Activity(activity)))?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.onEndSession(activity);"));
		Ok(())
	}

	// TODO: the iOS integration only sends the page view for screens; drop
	// the logEvent call here once product confirms which one Flurry expects.
	fn screen(&self, screen: &ScreenPayload) -> Result<()> {
		self.forward(self.agent.on_page_view())?;
		self.logger.verbose(format_args!("FlurryAgent.onPageView();"));

		self.log_event(screen.event(), &screen.properties.to_string_map())
	}

	fn track(&self, track: &TrackPayload) -> Result<()> {
		self.log_event(&track.event, &track.properties.to_string_map())
	}

	fn identify(&self, identify: &IdentifyPayload) -> Result<()> {
		let user_id = identify.user_id.as_str();
		self.forward(self.agent.set_user_id(user_id))?;
		self
			.logger
			.verbose(format_args!("FlurryAgent.setUserId({user_id});"));

		let age = identify.traits.age();
		if age > 0 {
			self.forward(self.agent.set_age(age))?;
			self.logger.verbose(format_args!("FlurryAgent.setAge({age});"));
		}

		if let Some(gender) = identify
			.traits
			.gender()
			.and_then(|gender| Gender::classify(&gender))
		{
			let code = gender.code();
			self.forward(self.agent.set_gender(code))?;
			self
				.logger
				.verbose(format_args!("FlurryAgent.setGender({code});"));
		}

		if let Some(location) = identify.context.location() {
			let latitude = location.latitude as f32;
			let longitude = location.longitude as f32;
			self.forward(self.agent.set_location(latitude, longitude))?;
			self.logger.verbose(format_args!(
				"FlurryAgent.setLocation({}, {});",
				JavaFloat(latitude),
				JavaFloat(longitude)
			));
		}

		Ok(())
	}
}

/// Creates [`FlurryIntegration`]s against a shared agent.
#[derive(Clone)]
pub struct FlurryIntegrationFactory {
	agent: Arc<dyn FlurryAgent>,
	strategy: InitStrategy,
}

impl FlurryIntegrationFactory {
	/// Uses the builder strategy with the production builder factory.
	pub fn new(agent: Arc<dyn FlurryAgent>) -> Self {
		let strategy = InitStrategy::builder(ConfigBuilderFactory::new(Arc::clone(&agent)));
		Self { agent, strategy }
	}

	pub fn with_strategy(mut self, strategy: InitStrategy) -> Self {
		self.strategy = strategy;
		self
	}

	/// Creates the integration from a whole project configuration, reading
	/// the block stored under `integrations.Flurry`.
	///
	/// A project without that block has no API key to bind with and fails
	/// with [`FlurryError::MissingApiKey`].
	pub fn create_from_project(
		&self,
		project: &ValueMap,
		analytics: &Analytics,
	) -> Result<FlurryIntegration> {
		let settings = project
			.get_value_map(INTEGRATIONS_KEY)?
			.map(|integrations| integrations.get_value_map(FLURRY_KEY))
			.transpose()?
			.flatten()
			.ok_or(FlurryError::MissingApiKey)?;
		self.create(&settings, analytics)
	}
}

impl IntegrationFactory for FlurryIntegrationFactory {
	type Integration = FlurryIntegration;

	fn key(&self) -> &'static str {
		FLURRY_KEY
	}

	fn create(&self, settings: &ValueMap, analytics: &Analytics) -> Result<FlurryIntegration> {
		FlurryIntegration::new(
			analytics,
			settings,
			Arc::clone(&self.agent),
			self.strategy.clone(),
		)
	}
}
