// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Host log level and the per-integration logger.
//!
//! Every message goes to `tracing`. Messages that pass the host's
//! [`LogLevel`] are also forwarded to an optional [`LogSink`], which is how
//! the verbose call trace of an integration is observed.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{error, trace};

/// How much the host wants integrations to log, ordered from quietest to
/// loudest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
	#[default]
	None,
	Info,
	Debug,
	Verbose,
}

impl LogLevel {
	pub fn as_str(&self) -> &'static str {
		match self {
			LogLevel::None => "none",
			LogLevel::Info => "info",
			LogLevel::Debug => "debug",
			LogLevel::Verbose => "verbose",
		}
	}

	/// Returns true if messages logged at `level` should be emitted.
	pub fn allows(&self, level: LogLevel) -> bool {
		level != LogLevel::None && *self >= level
	}
}

impl fmt::Display for LogLevel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.as_str())
	}
}

impl FromStr for LogLevel {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"none" => Ok(LogLevel::None),
			"info" => Ok(LogLevel::Info),
			"debug" => Ok(LogLevel::Debug),
			"verbose" => Ok(LogLevel::Verbose),
			_ => Err(format!("invalid log level: {s}")),
		}
	}
}

/// A single message that passed the host log level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceLine {
	pub tag: String,
	pub level: LogLevel,
	pub message: String,
}

/// Receives messages that pass the host log level.
pub trait LogSink: Send + Sync {
	fn record(&self, line: TraceLine);
}

/// A [`LogSink`] that keeps every line in memory.
#[derive(Debug, Default)]
pub struct MemoryLogSink {
	lines: Mutex<Vec<TraceLine>>,
}

impl MemoryLogSink {
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns a copy of all recorded lines.
	pub fn lines(&self) -> Vec<TraceLine> {
		self.lines.lock().map(|l| l.clone()).unwrap_or_default()
	}

	/// Returns the recorded messages for one tag, in order.
	pub fn messages_for(&self, tag: &str) -> Vec<String> {
		self
			.lines()
			.into_iter()
			.filter(|l| l.tag == tag)
			.map(|l| l.message)
			.collect()
	}

	pub fn clear(&self) {
		if let Ok(mut lines) = self.lines.lock() {
			lines.clear();
		}
	}
}

impl LogSink for MemoryLogSink {
	fn record(&self, line: TraceLine) {
		if let Ok(mut lines) = self.lines.lock() {
			lines.push(line);
		}
	}
}

/// A logger scoped to one integration.
#[derive(Clone)]
pub struct Logger {
	tag: String,
	level: LogLevel,
	sink: Option<Arc<dyn LogSink>>,
}

impl Logger {
	/// Creates a logger that only writes to `tracing`.
	pub fn new(tag: impl Into<String>, level: LogLevel) -> Self {
		Self {
			tag: tag.into(),
			level,
			sink: None,
		}
	}

	/// Attaches a sink (builder pattern).
	pub fn with_sink(mut self, sink: Arc<dyn LogSink>) -> Self {
		self.sink = Some(sink);
		self
	}

	pub fn tag(&self) -> &str {
		&self.tag
	}

	pub fn level(&self) -> LogLevel {
		self.level
	}

	/// Logs at [`LogLevel::Verbose`].
	pub fn verbose(&self, args: fmt::Arguments<'_>) {
		if self.level.allows(LogLevel::Verbose) {
			let message = args.to_string();
			trace!(integration = %self.tag, "{message}");
			self.forward(LogLevel::Verbose, message);
		}
	}

	/// Logs an error. Errors pass any level except [`LogLevel::None`].
	pub fn error(&self, err: &dyn std::error::Error, args: fmt::Arguments<'_>) {
		if self.level.allows(LogLevel::Info) {
			let message = format!("{args}: {err}");
			error!(integration = %self.tag, error = %err, "{args}");
			self.forward(LogLevel::Info, message);
		}
	}

	fn forward(&self, level: LogLevel, message: String) {
		if let Some(sink) = &self.sink {
			sink.record(TraceLine {
				tag: self.tag.clone(),
				level,
				message,
			});
		}
	}
}

impl fmt::Debug for Logger {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Logger")
			.field("tag", &self.tag)
			.field("level", &self.level)
			.field("has_sink", &self.sink.is_some())
			.finish()
	}
}
