//! # Core Runtime Module
//!
//! Foundational runtime infrastructure for the bridge SDK:
//! - Logging and tracing infrastructure
//! - SDK configuration and collaborator wiring
//!
//! ## Overview
//!
//! Every other core crate depends on this one for its configuration value and
//! logging conventions. Nothing here holds global mutable state apart from the
//! `tracing` subscriber installed by [`logging::init_logging`].

pub mod config;
pub mod error;
pub mod logging;

pub use config::{FeatureFlags, SdkConfig, SdkConfigBuilder};
pub use error::{Error, Result};
