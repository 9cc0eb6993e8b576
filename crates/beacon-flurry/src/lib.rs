// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Flurry destination for the Beacon analytics pipeline.
//!
//! [`FlurryIntegration`] receives pipeline callbacks and forwards them to a
//! [`FlurryAgent`], normalizing fields on the way (gender codes, positive ages
//! only, single-precision coordinates, string-only event parameters).
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use beacon_analytics_core::{Analytics, ApplicationHandle, Integration, IntegrationFactory, TrackPayload, ValueMap};
//! use beacon_flurry::testing::RecordingAgent;
//! use beacon_flurry::FlurryIntegrationFactory;
//!
//! let agent = Arc::new(RecordingAgent::new());
//! let analytics = Analytics::builder(ApplicationHandle::new("app")).build();
//! let settings = ValueMap::new().put_value("apiKey", "flurry_key");
//!
//! let flurry = FlurryIntegrationFactory::new(agent.clone()).create(&settings, &analytics)?;
//! flurry.track(&TrackPayload::new("Signed Up"))?;
//! # Ok::<(), beacon_flurry::FlurryError>(())
//! ```

pub mod agent;
pub mod binder;
mod error;
pub mod gender;
mod integration;
pub mod settings;
#[cfg(any(test, feature = "testing"))]
pub mod testing;
mod trace;

pub use agent::{
	AgentBuilder, AgentBuilderFactory, AgentConfig, AgentLogLevel, AgentResult, ConfigBuilder,
	ConfigBuilderFactory, FlurryAgent, SessionListener,
};
pub use binder::{ConfigurationBinder, InitStrategy, SessionStartRecorder};
pub use error::{AgentError, FlurryError, Result};
pub use gender::Gender;
pub use integration::{FlurryIntegration, FlurryIntegrationFactory, FLURRY_KEY};
pub use settings::{FlurrySettings, LogFlags};
