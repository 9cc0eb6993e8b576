// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The host handle integrations are constructed with.

use std::sync::Arc;

use crate::handle::ApplicationHandle;
use crate::log::{LogLevel, LogSink, Logger};

/// What the pipeline exposes to an integration at construction time: the
/// application handle and a logger factory.
#[derive(Clone)]
pub struct Analytics {
	application: ApplicationHandle,
	log_level: LogLevel,
	log_sink: Option<Arc<dyn LogSink>>,
}

impl Analytics {
	pub fn builder(application: ApplicationHandle) -> AnalyticsBuilder {
		AnalyticsBuilder::new(application)
	}

	pub fn application(&self) -> &ApplicationHandle {
		&self.application
	}

	pub fn log_level(&self) -> LogLevel {
		self.log_level
	}

	/// Returns a logger tagged with an integration's key.
	pub fn logger(&self, tag: &str) -> Logger {
		let logger = Logger::new(tag, self.log_level);
		match &self.log_sink {
			Some(sink) => logger.with_sink(Arc::clone(sink)),
			None => logger,
		}
	}
}

impl std::fmt::Debug for Analytics {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Analytics")
			.field("application", &self.application)
			.field("log_level", &self.log_level)
			.finish()
	}
}

/// Builder for [`Analytics`].
pub struct AnalyticsBuilder {
	application: ApplicationHandle,
	log_level: LogLevel,
	log_sink: Option<Arc<dyn LogSink>>,
}

impl AnalyticsBuilder {
	pub fn new(application: ApplicationHandle) -> Self {
		Self {
			application,
			log_level: LogLevel::None,
			log_sink: None,
		}
	}

	/// Sets the host log level. Defaults to [`LogLevel::None`].
	pub fn log_level(mut self, level: LogLevel) -> Self {
		self.log_level = level;
		self
	}

	/// Forwards log lines that pass the level to `sink`.
	pub fn log_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
		self.log_sink = Some(sink);
		self
	}

	pub fn build(self) -> Analytics {
		Analytics {
			application: self.application,
			log_level: self.log_level,
			log_sink: self.log_sink,
		}
	}
}
