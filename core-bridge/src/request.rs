//! Bridge requests and final URL assembly.

use bridge_traits::{AppConfiguration, BridgeError, BundleInfo, CipherKeyProvider};
use core_runtime::SdkConfig;
use std::sync::Arc;
use url::Url;

use crate::{
    cipher::GeneratedCipherKey,
    error::{BridgeApiError, Result},
    provider::UrlProvider,
    query::QueryItem,
    registry::SchemeRegistry,
    types::{ActionId, Parameters},
    url_builder::{build_url, UrlComponents},
    variant::BridgeVariant,
};

/// Query item carrying the response encryption key.
pub const CIPHER_KEY_ITEM: &str = "cipher_key";

/// Query item carrying the host app identifier.
pub const APP_ID_ITEM: &str = "app_id";

/// Query item carrying the URL scheme suffix, present only when configured.
pub const SCHEME_SUFFIX_ITEM: &str = "scheme_suffix";

/// Read-only host collaborators a request consults while building its URL.
#[derive(Clone)]
pub struct BridgeContext {
    pub configuration: Arc<dyn AppConfiguration>,
    pub bundle: Arc<dyn BundleInfo>,
    pub cipher_key: Arc<dyn CipherKeyProvider>,
}

impl BridgeContext {
    pub fn new(
        configuration: Arc<dyn AppConfiguration>,
        bundle: Arc<dyn BundleInfo>,
        cipher_key: Arc<dyn CipherKeyProvider>,
    ) -> Self {
        Self {
            configuration,
            bundle,
            cipher_key,
        }
    }

    /// Take collaborators from `config`, generating a session cipher key when
    /// none was injected.
    pub fn from_config(config: &SdkConfig) -> Self {
        let cipher_key = config.cipher_key_provider.clone().unwrap_or_else(|| {
            let generated: Arc<dyn CipherKeyProvider> = Arc::new(GeneratedCipherKey::new());
            generated
        });

        Self::new(
            config.app_configuration.clone(),
            config.bundle_info.clone(),
            cipher_key,
        )
    }
}

impl std::fmt::Debug for BridgeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeContext")
            .field("app_identifier", &self.configuration.app_identifier())
            .finish_non_exhaustive()
    }
}

/// One bridge action, ready to be turned into a URL.
///
/// Immutable once built. [`request_url`](Self::request_url) may be called any
/// number of times and yields equivalent URLs while the collaborators report
/// the same values.
///
/// # Examples
///
/// ```
/// use bridge_traits::{StaticAppConfiguration, StaticBundleInfo, StaticCipherKey};
/// use core_bridge::{BridgeContext, BridgeRequest, BridgeVariant, SchemeRegistry, WebTarget};
/// use std::sync::Arc;
///
/// let context = BridgeContext::new(
///     Arc::new(StaticAppConfiguration::new("abc123")),
///     Arc::new(StaticBundleInfo::new(["fbabc123"])),
///     Arc::new(StaticCipherKey::new("foo")),
/// );
/// let registry = SchemeRegistry::standard(None, "m.facebook.com");
///
/// let request = BridgeRequest::builder(BridgeVariant::Web(WebTarget::Web), "share")
///     .method_version("v20.0")
///     .build(&registry, context)
///     .unwrap();
///
/// let url = request.request_url().unwrap();
/// assert_eq!(url.scheme(), "web");
/// assert_eq!(url.path(), "/v20.0/dialog/share");
/// ```
#[derive(Clone)]
pub struct BridgeRequest {
    action_id: ActionId,
    method_name: String,
    method_version: Option<String>,
    parameters: Parameters,
    user_info: Parameters,
    variant: BridgeVariant,
    scheme: String,
    provider: Arc<dyn UrlProvider>,
    context: BridgeContext,
}

impl BridgeRequest {
    pub fn builder(variant: BridgeVariant, method_name: impl Into<String>) -> BridgeRequestBuilder {
        BridgeRequestBuilder::new(variant, method_name)
    }

    /// Build a request with a fresh action id and no user info.
    ///
    /// Returns `None` when `registry` has no usable binding for `variant`.
    pub fn new(
        registry: &SchemeRegistry,
        context: BridgeContext,
        method_name: impl Into<String>,
        method_version: Option<&str>,
        parameters: Parameters,
        variant: BridgeVariant,
    ) -> Option<Self> {
        let mut builder = Self::builder(variant, method_name).parameters(parameters);
        if let Some(version) = method_version {
            builder = builder.method_version(version);
        }
        builder.build(registry, context)
    }

    pub fn action_id(&self) -> &ActionId {
        &self.action_id
    }

    pub fn method_name(&self) -> &str {
        &self.method_name
    }

    pub fn method_version(&self) -> Option<&str> {
        self.method_version.as_deref()
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// Caller data kept alongside the request; never sent.
    pub fn user_info(&self) -> &Parameters {
        &self.user_info
    }

    pub fn variant(&self) -> BridgeVariant {
        self.variant
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn provider(&self) -> &Arc<dyn UrlProvider> {
        &self.provider
    }

    /// Produce the final request URL.
    ///
    /// The provider's base URL is validated against the host registration,
    /// extended with `cipher_key`, `app_id` and (when configured)
    /// `scheme_suffix`, then re-emitted under the variant's scheme.
    ///
    /// The items are appended, not merged: a provider that already emits
    /// `cipher_key`, `app_id` or `scheme_suffix` ends up with duplicates, so
    /// providers must leave those names to this method.
    ///
    /// # Errors
    ///
    /// - [`BridgeApiError::InvalidArgument`] from the provider
    /// - [`BridgeApiError::UrlSchemeNotRegistered`] when the host did not
    ///   register `fb<app_id><suffix>`
    /// - [`BridgeApiError::InvalidAppId`] when no app identifier is configured
    /// - [`BridgeApiError::InvalidSourceUrl`] when the base URL has no host
    /// - [`BridgeApiError::UrlBuildingFailed`] when reassembly fails
    pub fn request_url(&self) -> Result<Url> {
        let base = self.provider.build_url(
            &self.action_id,
            &self.method_name,
            self.method_version.as_deref(),
            &self.parameters,
        )?;

        let configuration = self.context.configuration.as_ref();
        self.context
            .bundle
            .validate_registered_url_scheme(configuration)
            .map_err(|e| match e {
                BridgeError::UrlSchemeNotRegistered { scheme } => {
                    BridgeApiError::UrlSchemeNotRegistered(scheme)
                }
                other => BridgeApiError::UrlSchemeNotRegistered(other.to_string()),
            })?;

        let app_id = configuration
            .app_identifier()
            .filter(|id| !id.is_empty())
            .ok_or(BridgeApiError::InvalidAppId)?;

        let components = UrlComponents::decompose(&base)
            .ok_or_else(|| BridgeApiError::InvalidSourceUrl(base.to_string()))?;

        let mut items = components.query_items;
        items.push(QueryItem::new(
            CIPHER_KEY_ITEM,
            self.context.cipher_key.cipher_key(),
        ));
        items.push(QueryItem::new(APP_ID_ITEM, app_id));

        if let Some(suffix) = configuration
            .url_scheme_suffix()
            .filter(|suffix| !suffix.is_empty())
        {
            items.push(QueryItem::new(SCHEME_SUFFIX_ITEM, suffix));
        }

        build_url(
            &self.scheme,
            &components.host,
            Some(&components.path),
            &items,
        )
        .ok_or(BridgeApiError::UrlBuildingFailed)
    }
}

impl std::fmt::Debug for BridgeRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeRequest")
            .field("action_id", &self.action_id)
            .field("method_name", &self.method_name)
            .field("method_version", &self.method_version)
            .field("parameters", &self.parameters)
            .field("variant", &self.variant)
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Builder for [`BridgeRequest`].
#[derive(Debug, Clone)]
pub struct BridgeRequestBuilder {
    variant: BridgeVariant,
    method_name: String,
    method_version: Option<String>,
    action_id: Option<ActionId>,
    parameters: Parameters,
    user_info: Parameters,
}

impl BridgeRequestBuilder {
    fn new(variant: BridgeVariant, method_name: impl Into<String>) -> Self {
        Self {
            variant,
            method_name: method_name.into(),
            method_version: None,
            action_id: None,
            parameters: Parameters::new(),
            user_info: Parameters::new(),
        }
    }

    pub fn method_version(mut self, version: impl Into<String>) -> Self {
        self.method_version = Some(version.into());
        self
    }

    /// Use a caller-supplied action id instead of a generated one.
    pub fn action_id(mut self, action_id: impl Into<ActionId>) -> Self {
        self.action_id = Some(action_id.into());
        self
    }

    pub fn parameters(mut self, parameters: Parameters) -> Self {
        self.parameters = parameters;
        self
    }

    pub fn user_info(mut self, user_info: Parameters) -> Self {
        self.user_info = user_info;
        self
    }

    /// Resolve the variant in `registry` and freeze the request.
    ///
    /// Returns `None` when the variant has no binding or the binding's scheme
    /// is empty.
    pub fn build(self, registry: &SchemeRegistry, context: BridgeContext) -> Option<BridgeRequest> {
        let binding = registry.resolve(self.variant)?;
        if binding.scheme.is_empty() {
            return None;
        }

        Some(BridgeRequest {
            action_id: self.action_id.unwrap_or_default(),
            method_name: self.method_name,
            method_version: self.method_version,
            parameters: self.parameters,
            user_info: self.user_info,
            variant: self.variant,
            scheme: binding.scheme.clone(),
            provider: binding.provider.clone(),
            context,
        })
    }
}
