//! Variant to scheme/provider table.

use bridge_traits::UrlOpener;
use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    provider::{LegacyWebUrlProvider, NativeUrlProvider, UrlProvider, WebUrlProvider},
    variant::{BridgeVariant, NativeTarget, WebTarget},
};

/// Scheme and provider a variant resolves to.
#[derive(Clone)]
pub struct SchemeBinding {
    pub scheme: String,
    pub provider: Arc<dyn UrlProvider>,
}

impl SchemeBinding {
    pub fn new(scheme: impl Into<String>, provider: Arc<dyn UrlProvider>) -> Self {
        Self {
            scheme: scheme.into(),
            provider,
        }
    }

    /// Whether the provider can currently produce an openable URL.
    pub fn is_available(&self) -> bool {
        self.provider.is_available()
    }
}

impl std::fmt::Debug for SchemeBinding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemeBinding")
            .field("scheme", &self.scheme)
            .finish_non_exhaustive()
    }
}

/// Table of bridge variants.
///
/// The request algorithm only ever calls [`resolve`](Self::resolve), so new
/// variants or overrides are a [`register`](Self::register) call away.
#[derive(Debug, Clone, Default)]
pub struct SchemeRegistry {
    bindings: HashMap<BridgeVariant, SchemeBinding>,
}

impl SchemeRegistry {
    /// A registry without any binding.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard table: native variants probe `opener`, `Web/Web` targets
    /// `web_host`.
    pub fn standard(opener: Option<Arc<dyn UrlOpener>>, web_host: impl Into<String>) -> Self {
        let web_host = web_host.into();
        let mut registry = Self::empty();

        for target in [
            NativeTarget::Facebook,
            NativeTarget::Messenger,
            NativeTarget::MasqueradePlayer,
        ] {
            let variant = BridgeVariant::Native(target);
            let provider = NativeUrlProvider::new(variant.scheme(), opener.clone());
            registry.register(
                variant,
                SchemeBinding::new(variant.scheme(), Arc::new(provider)),
            );
        }

        let https = BridgeVariant::Web(WebTarget::Https);
        registry.register(
            https,
            SchemeBinding::new(https.scheme(), Arc::new(LegacyWebUrlProvider)),
        );

        let web = BridgeVariant::Web(WebTarget::Web);
        registry.register(
            web,
            SchemeBinding::new(web.scheme(), Arc::new(WebUrlProvider::new(web_host))),
        );

        registry
    }

    /// Add or replace the binding of `variant`. Returns the previous binding.
    pub fn register(
        &mut self,
        variant: BridgeVariant,
        binding: SchemeBinding,
    ) -> Option<SchemeBinding> {
        self.bindings.insert(variant, binding)
    }

    pub fn resolve(&self, variant: BridgeVariant) -> Option<&SchemeBinding> {
        self.bindings.get(&variant)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_table() {
        let registry = SchemeRegistry::standard(None, "m.facebook.com");
        assert_eq!(registry.len(), BridgeVariant::ALL.len());

        for variant in BridgeVariant::ALL {
            let binding = registry.resolve(variant).unwrap();
            assert_eq!(binding.scheme, variant.scheme());
        }
    }

    #[test]
    fn test_native_unavailable_without_opener() {
        let registry = SchemeRegistry::standard(None, "m.facebook.com");

        assert!(!registry
            .resolve(BridgeVariant::Native(NativeTarget::Facebook))
            .unwrap()
            .is_available());
        assert!(registry
            .resolve(BridgeVariant::Web(WebTarget::Https))
            .unwrap()
            .is_available());
        assert!(registry
            .resolve(BridgeVariant::Web(WebTarget::Web))
            .unwrap()
            .is_available());
    }

    #[test]
    fn test_empty_registry_resolves_nothing() {
        let registry = SchemeRegistry::empty();
        assert!(registry.is_empty());
        assert!(registry
            .resolve(BridgeVariant::Web(WebTarget::Https))
            .is_none());
    }

    #[test]
    fn test_register_replaces_binding() {
        let mut registry = SchemeRegistry::standard(None, "m.facebook.com");
        let variant = BridgeVariant::Web(WebTarget::Web);

        let previous = registry.register(
            variant,
            SchemeBinding::new("web", Arc::new(WebUrlProvider::new("example.com"))),
        );

        assert!(previous.is_some());
        assert_eq!(registry.len(), BridgeVariant::ALL.len());
    }
}
