//! Host Application Identity
//!
//! Read-only access to the facts a host application registers with the
//! platform: its app identifier, an optional URL-scheme suffix, and the URL
//! schemes declared in its bundle metadata.
//!
//! # Platform Support
//!
//! - **iOS**: `Info.plist` (`FacebookAppID`, `FacebookUrlSchemeSuffix`,
//!   `CFBundleURLTypes`)
//! - **Android**: `AndroidManifest.xml` meta-data and intent filters
//! - **Desktop**: environment variables and a JSON bundle manifest
//!   (see `bridge-desktop`)

use serde::{Deserialize, Serialize};

use crate::{
    error::{BridgeError, Result},
    platform::PlatformSendSync,
};

/// Prefix of the URL scheme every host must register to receive bridge
/// callbacks.
pub const APP_URL_SCHEME_PREFIX: &str = "fb";

/// Host application configuration.
///
/// Implementations must be safe for concurrent reads; the core never writes
/// through this trait.
///
/// # Example
///
/// ```ignore
/// use bridge_traits::app::AppConfiguration;
///
/// fn describe(config: &dyn AppConfiguration) -> String {
///     config.app_identifier().unwrap_or_else(|| "<unset>".to_string())
/// }
/// ```
pub trait AppConfiguration: PlatformSendSync {
    /// The application identifier issued by the platform.
    fn app_identifier(&self) -> Option<String>;

    /// Suffix appended to the app URL scheme when several apps share one
    /// identifier.
    fn url_scheme_suffix(&self) -> Option<String>;

    /// Human readable application name.
    fn display_name(&self) -> Option<String> {
        None
    }
}

/// Builds the callback scheme a host must register: `fb<app_id><suffix>`.
///
/// Returns `None` when no app identifier is configured.
pub fn expected_app_url_scheme(config: &dyn AppConfiguration) -> Option<String> {
    let app_id = config.app_identifier().filter(|id| !id.is_empty())?;
    let suffix = config.url_scheme_suffix().unwrap_or_default();
    Some(format!("{}{}{}", APP_URL_SCHEME_PREFIX, app_id, suffix))
}

/// Host bundle metadata.
///
/// Only the registered URL schemes are exposed. Introspecting the bundle
/// itself is the adapter's business.
pub trait BundleInfo: PlatformSendSync {
    /// URL schemes declared by the host application.
    fn registered_url_schemes(&self) -> Vec<String>;

    /// Ensure the host registered the callback scheme derived from
    /// `configuration`.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::UrlSchemeNotRegistered`] when the scheme is
    /// missing or cannot be derived because no app identifier is configured.
    fn validate_registered_url_scheme(&self, configuration: &dyn AppConfiguration) -> Result<()> {
        let Some(expected) = expected_app_url_scheme(configuration) else {
            return Err(BridgeError::UrlSchemeNotRegistered {
                scheme: APP_URL_SCHEME_PREFIX.to_string(),
            });
        };

        let registered = self
            .registered_url_schemes()
            .iter()
            .any(|scheme| scheme.eq_ignore_ascii_case(&expected));

        if registered {
            Ok(())
        } else {
            Err(BridgeError::UrlSchemeNotRegistered { scheme: expected })
        }
    }
}

/// In-memory configuration, handy for hosts that resolve their settings up
/// front and for tests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticAppConfiguration {
    pub app_identifier: Option<String>,
    pub url_scheme_suffix: Option<String>,
    pub display_name: Option<String>,
}

impl StaticAppConfiguration {
    pub fn new(app_identifier: impl Into<String>) -> Self {
        Self {
            app_identifier: Some(app_identifier.into()),
            ..Self::default()
        }
    }

    pub fn with_url_scheme_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.url_scheme_suffix = Some(suffix.into());
        self
    }

    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }
}

impl AppConfiguration for StaticAppConfiguration {
    fn app_identifier(&self) -> Option<String> {
        self.app_identifier.clone()
    }

    fn url_scheme_suffix(&self) -> Option<String> {
        self.url_scheme_suffix.clone()
    }

    fn display_name(&self) -> Option<String> {
        self.display_name.clone()
    }
}

/// Fixed list of registered schemes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticBundleInfo {
    pub url_schemes: Vec<String>,
}

impl StaticBundleInfo {
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            url_schemes: schemes.into_iter().map(Into::into).collect(),
        }
    }
}

impl BundleInfo for StaticBundleInfo {
    fn registered_url_schemes(&self) -> Vec<String> {
        self.url_schemes.clone()
    }
}
