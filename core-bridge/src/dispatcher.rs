//! # Bridge Dispatcher
//!
//! Picks an invokable bridge variant, builds the request and hands the final
//! URL to the host's [`UrlOpener`].
//!
//! ## Overview
//!
//! The dispatcher owns the [`SchemeRegistry`] and the collaborators taken from
//! [`SdkConfig`]. Variant selection honours [`FeatureFlags`]: native variants
//! are only considered with native bridging enabled, web variants only with
//! web fallback enabled. Within those, the first variant whose provider
//! reports itself available wins.
//!
//! URLs are logged without their query; the cipher key never reaches a log
//! event.
//!
//! [`FeatureFlags`]: core_runtime::FeatureFlags

use bridge_traits::UrlOpener;
use core_runtime::{logging::strip_query, SdkConfig};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{BridgeApiError, Result},
    registry::{SchemeBinding, SchemeRegistry},
    request::{BridgeContext, BridgeRequest},
    types::Parameters,
    variant::{BridgeVariant, NativeTarget, WebTarget},
};

/// Native app first, current web dialogs as fallback.
pub const DEFAULT_VARIANT_PREFERENCE: [BridgeVariant; 2] = [
    BridgeVariant::Native(NativeTarget::Facebook),
    BridgeVariant::Web(WebTarget::Web),
];

pub struct BridgeDispatcher {
    config: SdkConfig,
    registry: SchemeRegistry,
    context: BridgeContext,
}

impl BridgeDispatcher {
    /// Dispatcher over the standard registry.
    pub fn new(config: SdkConfig) -> Self {
        let registry =
            SchemeRegistry::standard(config.url_opener.clone(), config.web_dialog_host.clone());
        Self::with_registry(config, registry)
    }

    /// Dispatcher over a caller-supplied registry.
    pub fn with_registry(config: SdkConfig, registry: SchemeRegistry) -> Self {
        let context = BridgeContext::from_config(&config);
        Self {
            config,
            registry,
            context,
        }
    }

    pub fn config(&self) -> &SdkConfig {
        &self.config
    }

    pub fn registry(&self) -> &SchemeRegistry {
        &self.registry
    }

    /// Add or replace a binding after construction.
    pub fn register(&mut self, variant: BridgeVariant, binding: SchemeBinding) {
        if let Some(previous) = self.registry.register(variant, binding) {
            debug!(variant = %variant, previous_scheme = %previous.scheme, "Replaced scheme binding");
        }
    }

    /// Build a request for `variant` with a fresh action id.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeApiError::UnsupportedVariant`] when the registry cannot
    /// resolve `variant`.
    pub fn request(
        &self,
        method_name: &str,
        method_version: Option<&str>,
        parameters: Parameters,
        variant: BridgeVariant,
    ) -> Result<BridgeRequest> {
        BridgeRequest::new(
            &self.registry,
            self.context.clone(),
            method_name,
            method_version,
            parameters,
            variant,
        )
        .ok_or(BridgeApiError::UnsupportedVariant(variant))
    }

    /// First variant of `preferred` that the feature flags permit and whose
    /// provider is available.
    pub fn select_variant(&self, preferred: &[BridgeVariant]) -> Option<BridgeVariant> {
        let features = self.config.features;

        preferred.iter().copied().find(|variant| {
            let permitted = match variant {
                BridgeVariant::Native(_) => features.enable_native_bridge,
                BridgeVariant::Web(_) => features.enable_web_fallback,
            };

            permitted
                && self
                    .registry
                    .resolve(*variant)
                    .map_or(false, SchemeBinding::is_available)
        })
    }

    /// Build the request URL and open it.
    ///
    /// Returns the opener's answer: `false` when the platform declined.
    ///
    /// # Errors
    ///
    /// Any [`BridgeRequest::request_url`] error, or
    /// [`BridgeApiError::OpenFailed`] when no opener is configured or the
    /// opener reports a failure.
    #[instrument(
        skip(self, request),
        fields(action_id = %request.action_id(), variant = %request.variant())
    )]
    pub async fn open(&self, request: &BridgeRequest) -> Result<bool> {
        let url = request.request_url().map_err(|e| {
            warn!(error = %e, "Failed to build bridge URL");
            e
        })?;

        let opener: &Arc<dyn UrlOpener> = self.config.url_opener.as_ref().ok_or_else(|| {
            warn!("No UrlOpener configured");
            BridgeApiError::OpenFailed("no UrlOpener configured".to_string())
        })?;

        debug!(url = strip_query(url.as_str()), "Opening bridge URL");

        match opener.open_url(&url).await {
            Ok(opened) => {
                info!(opened, "Bridge URL handed to platform");
                Ok(opened)
            }
            Err(e) => {
                warn!(error = %e, "Platform failed to open bridge URL");
                Err(BridgeApiError::OpenFailed(e.to_string()))
            }
        }
    }

    /// Select a variant from `preferred`, build the request and open it.
    ///
    /// Returns the request that was opened so the caller can match the reply
    /// by action id.
    ///
    /// # Errors
    ///
    /// [`BridgeApiError::UnsupportedVariant`] naming the first preferred
    /// variant when none is usable, otherwise as [`open`](Self::open).
    pub async fn dispatch(
        &self,
        method_name: &str,
        method_version: Option<&str>,
        parameters: Parameters,
        preferred: &[BridgeVariant],
    ) -> Result<(BridgeRequest, bool)> {
        let Some(variant) = self.select_variant(preferred) else {
            let requested = preferred
                .first()
                .copied()
                .unwrap_or(DEFAULT_VARIANT_PREFERENCE[0]);
            warn!(method_name, "No available bridge variant");
            return Err(BridgeApiError::UnsupportedVariant(requested));
        };

        debug!(variant = %variant, method_name, "Selected bridge variant");

        let request = self.request(method_name, method_version, parameters, variant)?;
        let opened = self.open(&request).await?;
        Ok((request, opened))
    }
}

impl std::fmt::Debug for BridgeDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BridgeDispatcher")
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
