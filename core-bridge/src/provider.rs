//! URL providers.
//!
//! A provider turns action metadata into the base URL of a bridge request.
//! The request then layers authentication items on top and swaps in the
//! variant's scheme, so a provider only decides host, path and its own query
//! items.

use bridge_traits::{platform::PlatformSendSync, UrlOpener};
use std::sync::Arc;
use url::Url;

use crate::{
    error::{BridgeApiError, Result},
    query::{query_items, QueryItem},
    types::{ActionId, Parameters},
    url_builder::build_url,
};

/// Host of native dialog URLs (`<scheme>://dialog/<method>`).
pub const NATIVE_DIALOG_HOST: &str = "dialog";

/// Base URL returned by [`LegacyWebUrlProvider`].
pub const LEGACY_WEB_URL: &str = "https://www.facebook.com/";

/// Builds base request URLs for one family of bridge variants.
pub trait UrlProvider: PlatformSendSync {
    /// Build the base URL for an action.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeApiError::InvalidArgument`] when the inputs cannot
    /// describe a dialog (for example an empty method name).
    fn build_url(
        &self,
        action_id: &ActionId,
        method_name: &str,
        method_version: Option<&str>,
        parameters: &Parameters,
    ) -> Result<Url>;

    /// Whether URLs built by this provider can currently be opened.
    fn is_available(&self) -> bool;
}

fn bridge_args(action_id: &ActionId) -> Result<QueryItem> {
    let value = serde_json::to_string(&serde_json::json!({ "action_id": action_id.as_str() }))
        .map_err(|e| BridgeApiError::InvalidArgument(format!("bridge_args: {}", e)))?;
    Ok(QueryItem::new("bridge_args", value))
}

fn require_method_name(method_name: &str) -> Result<()> {
    if method_name.trim().is_empty() {
        return Err(BridgeApiError::InvalidArgument(
            "method name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

fn non_empty(version: Option<&str>) -> Option<&str> {
    version.map(str::trim).filter(|version| !version.is_empty())
}

/// Native companion app dialogs: `<scheme>://dialog/<method_name>`.
///
/// Query items, in order: `version` (when given), `bridge_args`,
/// `method_args`.
pub struct NativeUrlProvider {
    scheme: String,
    opener: Option<Arc<dyn UrlOpener>>,
}

impl NativeUrlProvider {
    pub fn new(scheme: impl Into<String>, opener: Option<Arc<dyn UrlOpener>>) -> Self {
        Self {
            scheme: scheme.into(),
            opener,
        }
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }
}

impl std::fmt::Debug for NativeUrlProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeUrlProvider")
            .field("scheme", &self.scheme)
            .field("opener", &self.opener.as_ref().map(|_| "UrlOpener { ... }"))
            .finish()
    }
}

impl UrlProvider for NativeUrlProvider {
    fn build_url(
        &self,
        action_id: &ActionId,
        method_name: &str,
        method_version: Option<&str>,
        parameters: &Parameters,
    ) -> Result<Url> {
        require_method_name(method_name)?;

        let mut items = Vec::with_capacity(3);
        if let Some(version) = non_empty(method_version) {
            items.push(QueryItem::new("version", version));
        }
        items.push(bridge_args(action_id)?);

        let method_args = serde_json::to_string(parameters)
            .map_err(|e| BridgeApiError::InvalidArgument(format!("method_args: {}", e)))?;
        items.push(QueryItem::new("method_args", method_args));

        build_url(&self.scheme, NATIVE_DIALOG_HOST, Some(method_name), &items).ok_or_else(|| {
            BridgeApiError::InvalidArgument(format!(
                "cannot build {} dialog URL for method '{}'",
                self.scheme, method_name
            ))
        })
    }

    fn is_available(&self) -> bool {
        self.opener
            .as_ref()
            .map_or(false, |opener| opener.can_open_scheme(&self.scheme))
    }
}

/// Legacy `https` dialogs. Always yields [`LEGACY_WEB_URL`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LegacyWebUrlProvider;

impl UrlProvider for LegacyWebUrlProvider {
    fn build_url(
        &self,
        _action_id: &ActionId,
        _method_name: &str,
        _method_version: Option<&str>,
        _parameters: &Parameters,
    ) -> Result<Url> {
        Url::parse(LEGACY_WEB_URL).map_err(|e| BridgeApiError::InvalidArgument(e.to_string()))
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Web dialogs: `https://<host>/<version>/dialog/<method_name>`.
///
/// Parameters become query items, followed by `bridge_args`.
#[derive(Debug, Clone)]
pub struct WebUrlProvider {
    host: String,
}

impl WebUrlProvider {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn host(&self) -> &str {
        &self.host
    }
}

impl UrlProvider for WebUrlProvider {
    fn build_url(
        &self,
        action_id: &ActionId,
        method_name: &str,
        method_version: Option<&str>,
        parameters: &Parameters,
    ) -> Result<Url> {
        require_method_name(method_name)?;

        let path = match non_empty(method_version) {
            Some(version) => format!("/{}/dialog/{}", version, method_name),
            None => format!("/dialog/{}", method_name),
        };

        let mut items = query_items(parameters);
        items.push(bridge_args(action_id)?);

        build_url("https", &self.host, Some(&path), &items).ok_or_else(|| {
            BridgeApiError::InvalidArgument(format!(
                "cannot build web dialog URL on host '{}'",
                self.host
            ))
        })
    }

    fn is_available(&self) -> bool {
        true
    }
}
