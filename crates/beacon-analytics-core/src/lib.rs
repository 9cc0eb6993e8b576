// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core types shared between the Beacon analytics pipeline and its
//! destination integrations.
//!
//! The pipeline itself (queueing, batching, delivery) lives elsewhere. This
//! crate only describes the boundary an integration sees:
//!
//! - [`ValueMap`]: the settings bundle an integration is constructed from
//! - [`Analytics`]: the host handle that hands out the application handle and
//!   per-integration [`Logger`]s
//! - Payloads: [`IdentifyPayload`], [`TrackPayload`], [`ScreenPayload`]
//! - [`Integration`] / [`IntegrationFactory`]: the callbacks an integration
//!   implements

pub mod analytics;
pub mod error;
pub mod handle;
pub mod integration;
pub mod log;
pub mod payload;
pub mod properties;
pub mod value_map;

pub use analytics::{Analytics, AnalyticsBuilder};
pub use error::{Result, SettingsError};
pub use handle::{ActivityHandle, ApplicationHandle, SessionContext};
pub use integration::{Integration, IntegrationFactory};
pub use log::{LogLevel, LogSink, Logger, MemoryLogSink, TraceLine};
pub use payload::{AnalyticsContext, IdentifyPayload, Location, ScreenPayload, TrackPayload, Traits};
pub use properties::{Properties, StringMap};
pub use value_map::ValueMap;
