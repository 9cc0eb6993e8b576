// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Opaque host handles.
//!
//! The host owns the application and its foreground activities. Integrations
//! only pass these handles through to destination session calls.

use std::fmt;

/// The process-level application handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApplicationHandle {
	name: String,
}

impl ApplicationHandle {
	pub fn new(name: impl Into<String>) -> Self {
		Self { name: name.into() }
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

/// A per-foreground-view handle.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityHandle {
	id: u64,
	name: String,
}

impl ActivityHandle {
	pub fn new(id: u64, name: impl Into<String>) -> Self {
		Self {
			id,
			name: name.into(),
		}
	}

	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}
}

/// What a destination session is opened or closed against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionContext<'a> {
	Application(&'a ApplicationHandle),
	Activity(&'a ActivityHandle),
}

impl SessionContext<'_> {
	pub fn is_application(&self) -> bool {
		matches!(self, SessionContext::Application(_))
	}
}

impl fmt::Display for SessionContext<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			SessionContext::Application(_) => write!(f, "application"),
			SessionContext::Activity(_) => write!(f, "activity"),
		}
	}
}
