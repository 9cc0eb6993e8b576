// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The callbacks a destination integration receives from the pipeline.

use crate::analytics::Analytics;
use crate::handle::ActivityHandle;
use crate::payload::{IdentifyPayload, ScreenPayload, TrackPayload};
use crate::value_map::ValueMap;

/// A destination integration.
///
/// Every callback defaults to a no-op so integrations only implement the
/// hooks their destination understands. Callbacks run synchronously on the
/// caller's thread; errors propagate to the caller without retry.
pub trait Integration {
	type Error: std::error::Error + Send + Sync + 'static;

	fn on_activity_created(&self, _activity: &ActivityHandle) -> Result<(), Self::Error> {
		Ok(())
	}

	fn on_activity_started(&self, _activity: &ActivityHandle) -> Result<(), Self::Error> {
		Ok(())
	}

	fn on_activity_resumed(&self, _activity: &ActivityHandle) -> Result<(), Self::Error> {
		Ok(())
	}

	fn on_activity_paused(&self, _activity: &ActivityHandle) -> Result<(), Self::Error> {
		Ok(())
	}

	fn on_activity_stopped(&self, _activity: &ActivityHandle) -> Result<(), Self::Error> {
		Ok(())
	}

	fn on_activity_destroyed(&self, _activity: &ActivityHandle) -> Result<(), Self::Error> {
		Ok(())
	}

	fn identify(&self, _identify: &IdentifyPayload) -> Result<(), Self::Error> {
		Ok(())
	}

	fn track(&self, _track: &TrackPayload) -> Result<(), Self::Error> {
		Ok(())
	}

	fn screen(&self, _screen: &ScreenPayload) -> Result<(), Self::Error> {
		Ok(())
	}

	fn alias(&self, _previous_id: &str, _user_id: &str) -> Result<(), Self::Error> {
		Ok(())
	}

	fn group(&self, _group_id: &str) -> Result<(), Self::Error> {
		Ok(())
	}

	fn flush(&self) -> Result<(), Self::Error> {
		Ok(())
	}

	fn reset(&self) -> Result<(), Self::Error> {
		Ok(())
	}
}

/// Creates an integration from its block of the project settings.
pub trait IntegrationFactory {
	type Integration: Integration;

	/// The key this integration's settings are stored under, e.g. `"Flurry"`.
	fn key(&self) -> &'static str;

	fn create(
		&self,
		settings: &ValueMap,
		analytics: &Analytics,
	) -> Result<Self::Integration, <Self::Integration as Integration>::Error>;
}
