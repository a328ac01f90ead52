//! # Host Bridge Traits
//!
//! Capabilities the host platform supplies to the SDK core.
//!
//! ## Overview
//!
//! The core never reaches for process-wide state. Everything it knows about the
//! host application (identity, registered URL schemes, installed companion
//! apps, networking, logging) arrives through the traits below, injected as
//! `Arc<dyn Trait>` when the SDK is configured.
//!
//! ## Traits
//!
//! ### Application identity
//! - [`AppConfiguration`](app::AppConfiguration) - App identifier and URL scheme suffix
//! - [`BundleInfo`](app::BundleInfo) - URL schemes registered in the host bundle
//!
//! ### Request security
//! - [`CipherKeyProvider`](cipher::CipherKeyProvider) - Source of the `cipher_key` query value
//!
//! ### Platform integration
//! - [`UrlOpener`](opener::UrlOpener) - "Can open" checks and URL hand-off
//! - [`HttpClient`](http::HttpClient) - Async HTTP for graph downloads
//! - [`LoggerSink`](log::LoggerSink) - Forward structured logs to host logging
//!
//! ## Platform Requirements
//!
//! | Platform | Implementation Crate | Status |
//! |----------|---------------------|--------|
//! | Desktop  | `bridge-desktop`    | ✅ Available |
//! | iOS      | Host-provided       | 📋 Planned |
//! | Android  | Host-provided       | 📋 Planned |
//!
//! ## Error Handling
//!
//! All bridge traits report failures through [`BridgeError`](error::BridgeError).
//! Adapters should convert platform errors and keep messages actionable.
//!
//! ## Thread Safety
//!
//! Every trait is bounded by [`PlatformSendSync`](platform::PlatformSendSync):
//! implementations are read concurrently from any thread that builds a bridge
//! request.

pub mod app;
pub mod cipher;
pub mod error;
pub mod http;
pub mod log;
pub mod opener;
pub mod platform;

pub use error::BridgeError;

pub use app::{
    expected_app_url_scheme, AppConfiguration, BundleInfo, StaticAppConfiguration,
    StaticBundleInfo,
};
pub use cipher::{CipherKeyProvider, StaticCipherKey};
pub use http::{HttpClient, HttpMethod, HttpRequest, HttpResponse, RetryPolicy};
pub use log::{ConsoleLogger, LogEntry, LogLevel, LoggerSink};
pub use opener::UrlOpener;
