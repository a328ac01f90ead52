//! # SDK Configuration Module
//!
//! Collects the host collaborators and settings the bridge core needs.
//!
//! ## Overview
//!
//! `SdkConfig` is built once at start-up with [`SdkConfigBuilder`] and then
//! shared read-only. It replaces any notion of a process-wide "current
//! settings" object: every component receives its collaborators through this
//! value.
//!
//! ## Required Dependencies
//!
//! - `AppConfiguration` - App identifier and URL scheme suffix
//! - `BundleInfo` - URL schemes registered by the host
//!
//! ## Optional Dependencies
//!
//! - `UrlOpener` - Needed to detect installed companion apps and to open URLs
//! - `HttpClient` - Needed by the profile picture loader
//! - `CipherKeyProvider` - Defaults to a per-session generated key
//!
//! When the `desktop-shims` feature is enabled, missing collaborators fall back
//! to the `bridge-desktop` adapters.
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_traits::{StaticAppConfiguration, StaticBundleInfo};
//! use core_runtime::config::SdkConfig;
//! use std::sync::Arc;
//!
//! let config = SdkConfig::builder()
//!     .app_configuration(Arc::new(StaticAppConfiguration::new("abc123")))
//!     .bundle_info(Arc::new(StaticBundleInfo::new(["fbabc123"])))
//!     .build()?;
//! ```

use crate::error::{Error, Result};
use bridge_traits::{AppConfiguration, BundleInfo, CipherKeyProvider, HttpClient, UrlOpener};
use std::sync::Arc;
use url::Url;

/// Host serving web dialogs.
pub const DEFAULT_WEB_DIALOG_HOST: &str = "m.facebook.com";

/// Host serving graph resources such as profile pictures.
pub const DEFAULT_GRAPH_HOST: &str = "graph.facebook.com";

/// SDK configuration.
///
/// Cheap to clone; all collaborators are reference counted.
#[derive(Clone)]
pub struct SdkConfig {
    /// App identifier and scheme suffix (required)
    pub app_configuration: Arc<dyn AppConfiguration>,

    /// Registered URL schemes (required)
    pub bundle_info: Arc<dyn BundleInfo>,

    /// Platform URL opener (optional)
    pub url_opener: Option<Arc<dyn UrlOpener>>,

    /// HTTP client for graph downloads (optional)
    pub http_client: Option<Arc<dyn HttpClient>>,

    /// Source of the `cipher_key` query value (optional)
    pub cipher_key_provider: Option<Arc<dyn CipherKeyProvider>>,

    /// Host used by the web dialog provider
    pub web_dialog_host: String,

    /// Host used for graph requests
    pub graph_host: String,

    pub features: FeatureFlags,
}

impl std::fmt::Debug for SdkConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SdkConfig")
            .field("app_identifier", &self.app_configuration.app_identifier())
            .field("bundle_info", &"BundleInfo { ... }")
            .field(
                "url_opener",
                &self.url_opener.as_ref().map(|_| "UrlOpener { ... }"),
            )
            .field(
                "http_client",
                &self.http_client.as_ref().map(|_| "HttpClient { ... }"),
            )
            .field(
                "cipher_key_provider",
                &self
                    .cipher_key_provider
                    .as_ref()
                    .map(|_| "CipherKeyProvider { ... }"),
            )
            .field("web_dialog_host", &self.web_dialog_host)
            .field("graph_host", &self.graph_host)
            .field("features", &self.features)
            .finish()
    }
}

/// Feature flags control which bridge variants are considered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Try native companion apps before web dialogs
    pub enable_native_bridge: bool,

    /// Fall back to web dialogs when no native app can be opened
    pub enable_web_fallback: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enable_native_bridge: true,
            enable_web_fallback: true,
        }
    }
}

impl SdkConfig {
    /// Creates a new builder for constructing an `SdkConfig`.
    pub fn builder() -> SdkConfigBuilder {
        SdkConfigBuilder::default()
    }

    /// Validates the configuration and returns an error if invalid.
    ///
    /// This checks:
    /// - Both hosts are bare, parsable host names
    /// - At least one bridge family is enabled
    /// - Native bridging has a `UrlOpener` to probe installed apps
    pub fn validate(&self) -> Result<()> {
        validate_host("web dialog host", &self.web_dialog_host)?;
        validate_host("graph host", &self.graph_host)?;

        if !self.features.enable_native_bridge && !self.features.enable_web_fallback {
            return Err(Error::Config(
                "Both native bridging and web fallback are disabled. \
                 Enable at least one bridge family."
                    .to_string(),
            ));
        }

        if self.features.enable_native_bridge && self.url_opener.is_none() {
            return Err(Error::Config(
                "Native bridging enabled but no UrlOpener provided. \
                 Disable the feature or inject a UrlOpener implementation."
                    .to_string(),
            ));
        }

        Ok(())
    }
}

fn validate_host(label: &str, host: &str) -> Result<()> {
    if host.is_empty() {
        return Err(Error::Config(format!("The {} cannot be empty", label)));
    }

    let parsed = Url::parse(&format!("https://{}", host))
        .map_err(|e| Error::Config(format!("Invalid {} '{}': {}", label, host, e)))?;

    if parsed.host_str() != Some(host) || parsed.path() != "/" {
        return Err(Error::Config(format!(
            "The {} must be a bare host name, got '{}'",
            label, host
        )));
    }

    Ok(())
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_app_configuration() -> Result<Arc<dyn AppConfiguration>> {
    Err(Error::CapabilityMissing {
        capability: "AppConfiguration".to_string(),
        message: "AppConfiguration implementation is required to read the app identifier. \
                 Desktop: enable the 'desktop-shims' feature to read BRIDGE_APP_ID. \
                 Mobile: inject an adapter over Info.plist / AndroidManifest.xml."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_app_configuration() -> Result<Arc<dyn AppConfiguration>> {
    use bridge_desktop::EnvAppConfiguration;

    let config: Arc<dyn AppConfiguration> = Arc::new(EnvAppConfiguration::from_env());
    Ok(config)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_bundle_info() -> Result<Arc<dyn BundleInfo>> {
    Err(Error::CapabilityMissing {
        capability: "BundleInfo".to_string(),
        message: "BundleInfo implementation is required to validate URL scheme registration. \
                 Desktop: enable the 'desktop-shims' feature to read a bundle manifest. \
                 Mobile: inject an adapter over the bundle's URL types."
            .to_string(),
    })
}

#[cfg(feature = "desktop-shims")]
fn provide_default_bundle_info() -> Result<Arc<dyn BundleInfo>> {
    use bridge_desktop::ManifestBundleInfo;

    let bundle = ManifestBundleInfo::from_env()
        .map_err(|e| Error::Internal(format!("Failed to load bundle manifest: {}", e)))?;
    let bundle: Arc<dyn BundleInfo> = Arc::new(bundle);
    Ok(bundle)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_url_opener() -> Option<Arc<dyn UrlOpener>> {
    None
}

#[cfg(feature = "desktop-shims")]
fn provide_default_url_opener() -> Option<Arc<dyn UrlOpener>> {
    use bridge_desktop::SystemUrlOpener;

    let opener: Arc<dyn UrlOpener> = Arc::new(SystemUrlOpener::from_env());
    Some(opener)
}

#[cfg(not(feature = "desktop-shims"))]
fn provide_default_http_client() -> Result<Option<Arc<dyn HttpClient>>> {
    Ok(None)
}

#[cfg(feature = "desktop-shims")]
fn provide_default_http_client() -> Result<Option<Arc<dyn HttpClient>>> {
    use bridge_desktop::ReqwestHttpClient;

    let client = ReqwestHttpClient::new()
        .map_err(|e| Error::Internal(format!("Failed to create HTTP client: {}", e)))?;
    let client: Arc<dyn HttpClient> = Arc::new(client);
    Ok(Some(client))
}

/// Builder for constructing [`SdkConfig`] instances.
#[derive(Default)]
pub struct SdkConfigBuilder {
    app_configuration: Option<Arc<dyn AppConfiguration>>,
    bundle_info: Option<Arc<dyn BundleInfo>>,
    url_opener: Option<Arc<dyn UrlOpener>>,
    http_client: Option<Arc<dyn HttpClient>>,
    cipher_key_provider: Option<Arc<dyn CipherKeyProvider>>,
    web_dialog_host: Option<String>,
    graph_host: Option<String>,
    features: FeatureFlags,
}

impl SdkConfigBuilder {
    /// Sets the app configuration (required).
    pub fn app_configuration(mut self, configuration: Arc<dyn AppConfiguration>) -> Self {
        self.app_configuration = Some(configuration);
        self
    }

    /// Sets the bundle info used to validate scheme registration (required).
    pub fn bundle_info(mut self, bundle: Arc<dyn BundleInfo>) -> Self {
        self.bundle_info = Some(bundle);
        self
    }

    /// Sets the URL opener.
    ///
    /// Without an opener every native variant reports itself unavailable.
    pub fn url_opener(mut self, opener: Arc<dyn UrlOpener>) -> Self {
        self.url_opener = Some(opener);
        self
    }

    /// Sets the HTTP client used for graph downloads.
    pub fn http_client(mut self, client: Arc<dyn HttpClient>) -> Self {
        self.http_client = Some(client);
        self
    }

    /// Sets the cipher key provider.
    pub fn cipher_key_provider(mut self, provider: Arc<dyn CipherKeyProvider>) -> Self {
        self.cipher_key_provider = Some(provider);
        self
    }

    /// Overrides the web dialog host.
    ///
    /// Default: `m.facebook.com`
    pub fn web_dialog_host(mut self, host: impl Into<String>) -> Self {
        self.web_dialog_host = Some(host.into());
        self
    }

    /// Overrides the graph host.
    ///
    /// Default: `graph.facebook.com`
    pub fn graph_host(mut self, host: impl Into<String>) -> Self {
        self.graph_host = Some(host.into());
        self
    }

    pub fn enable_native_bridge(mut self, enabled: bool) -> Self {
        self.features.enable_native_bridge = enabled;
        self
    }

    pub fn enable_web_fallback(mut self, enabled: bool) -> Self {
        self.features.enable_web_fallback = enabled;
        self
    }

    pub fn features(mut self, features: FeatureFlags) -> Self {
        self.features = features;
        self
    }

    /// Builds the configuration, filling platform defaults and validating.
    ///
    /// # Errors
    ///
    /// - [`Error::CapabilityMissing`] when a required collaborator is absent
    ///   and no platform default exists
    /// - [`Error::Config`] when validation fails
    pub fn build(self) -> Result<SdkConfig> {
        let app_configuration = match self.app_configuration {
            Some(configuration) => configuration,
            None => provide_default_app_configuration()?,
        };

        let bundle_info = match self.bundle_info {
            Some(bundle) => bundle,
            None => provide_default_bundle_info()?,
        };

        let url_opener = self.url_opener.or_else(provide_default_url_opener);

        let http_client = match self.http_client {
            Some(client) => Some(client),
            None => provide_default_http_client()?,
        };

        let config = SdkConfig {
            app_configuration,
            bundle_info,
            url_opener,
            http_client,
            cipher_key_provider: self.cipher_key_provider,
            web_dialog_host: self
                .web_dialog_host
                .unwrap_or_else(|| DEFAULT_WEB_DIALOG_HOST.to_string()),
            graph_host: self
                .graph_host
                .unwrap_or_else(|| DEFAULT_GRAPH_HOST.to_string()),
            features: self.features,
        };

        config.validate()?;

        Ok(config)
    }
}
