//! Dispatcher tests: variant selection, request building and URL hand-off.

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result as BridgeResult},
    StaticAppConfiguration, StaticBundleInfo, StaticCipherKey, UrlOpener,
};
use core_bridge::{
    parameters, BridgeApiError, BridgeDispatcher, BridgeVariant, NativeTarget, ParameterValue,
    Parameters, SchemeBinding, WebTarget, WebUrlProvider, DEFAULT_VARIANT_PREFERENCE,
};
use core_runtime::SdkConfig;
use mockall::mock;
use std::sync::Arc;
use url::Url;

mock! {
    Opener {}

    #[async_trait]
    impl UrlOpener for Opener {
        fn can_open_scheme(&self, scheme: &str) -> bool;
        async fn open_url(&self, url: &Url) -> BridgeResult<bool>;
    }
}

fn config(opener: Option<MockOpener>) -> SdkConfig {
    let mut builder = SdkConfig::builder()
        .app_configuration(Arc::new(StaticAppConfiguration::new("abc123")))
        .bundle_info(Arc::new(StaticBundleInfo::new(["fbabc123"])))
        .cipher_key_provider(Arc::new(StaticCipherKey::new("secret-key")));

    match opener {
        Some(opener) => builder = builder.url_opener(Arc::new(opener)),
        None => builder = builder.enable_native_bridge(false),
    }

    builder.build().expect("valid test configuration")
}

#[test]
fn test_select_prefers_installed_native_app() {
    let mut opener = MockOpener::new();
    opener
        .expect_can_open_scheme()
        .returning(|scheme: &str| scheme == "fbauth2");

    let dispatcher = BridgeDispatcher::new(config(Some(opener)));

    assert_eq!(
        dispatcher.select_variant(&DEFAULT_VARIANT_PREFERENCE),
        Some(BridgeVariant::Native(NativeTarget::Facebook))
    );
}

#[test]
fn test_select_falls_back_to_web() {
    let mut opener = MockOpener::new();
    opener.expect_can_open_scheme().return_const(false);

    let dispatcher = BridgeDispatcher::new(config(Some(opener)));

    assert_eq!(
        dispatcher.select_variant(&DEFAULT_VARIANT_PREFERENCE),
        Some(BridgeVariant::Web(WebTarget::Web))
    );
}

#[test]
fn test_select_honours_feature_flags() {
    let dispatcher = BridgeDispatcher::new(config(None));

    assert_eq!(
        dispatcher.select_variant(&[
            BridgeVariant::Native(NativeTarget::Messenger),
            BridgeVariant::Web(WebTarget::Https),
        ]),
        Some(BridgeVariant::Web(WebTarget::Https))
    );
    assert_eq!(
        dispatcher.select_variant(&[BridgeVariant::Native(NativeTarget::Messenger)]),
        None
    );
}

#[test]
fn test_select_skips_web_when_fallback_disabled() {
    let mut opener = MockOpener::new();
    opener.expect_can_open_scheme().return_const(false);

    let config = SdkConfig::builder()
        .app_configuration(Arc::new(StaticAppConfiguration::new("abc123")))
        .bundle_info(Arc::new(StaticBundleInfo::new(["fbabc123"])))
        .url_opener(Arc::new(opener))
        .enable_web_fallback(false)
        .build()
        .unwrap();
    let dispatcher = BridgeDispatcher::new(config);

    assert_eq!(dispatcher.select_variant(&DEFAULT_VARIANT_PREFERENCE), None);
}

#[test]
fn test_request_uses_configured_web_host() {
    let config = SdkConfig::builder()
        .app_configuration(Arc::new(StaticAppConfiguration::new("abc123")))
        .bundle_info(Arc::new(StaticBundleInfo::new(["fbabc123"])))
        .enable_native_bridge(false)
        .web_dialog_host("dialogs.example.com")
        .build()
        .unwrap();
    let dispatcher = BridgeDispatcher::new(config);

    let request = dispatcher
        .request(
            "share",
            Some("v20.0"),
            Parameters::new(),
            BridgeVariant::Web(WebTarget::Web),
        )
        .unwrap();
    let url = request.request_url().unwrap();

    assert_eq!(url.host_str(), Some("dialogs.example.com"));
    assert!(url
        .query_pairs()
        .any(|(name, value)| name == "app_id" && value == "abc123"));
    // Generated per dispatcher when none is injected
    assert!(url.query_pairs().any(|(name, _)| name == "cipher_key"));
}

#[test]
fn test_register_overrides_binding() {
    let mut dispatcher = BridgeDispatcher::new(config(None));
    dispatcher.register(
        BridgeVariant::Web(WebTarget::Web),
        SchemeBinding::new("web", Arc::new(WebUrlProvider::new("override.example.com"))),
    );

    let url = dispatcher
        .request("share", None, Parameters::new(), BridgeVariant::Web(WebTarget::Web))
        .unwrap()
        .request_url()
        .unwrap();

    assert_eq!(url.host_str(), Some("override.example.com"));
}

#[tokio::test]
async fn test_open_hands_url_to_opener() {
    let mut opener = MockOpener::new();
    opener.expect_can_open_scheme().return_const(true);
    opener
        .expect_open_url()
        .withf(|url: &Url| {
            url.scheme() == "fbauth2"
                && url.path() == "/share"
                && url
                    .query_pairs()
                    .any(|(name, value)| name == "cipher_key" && value == "secret-key")
        })
        .times(1)
        .returning(|_| Ok(true));

    let dispatcher = BridgeDispatcher::new(config(Some(opener)));
    let request = dispatcher
        .request(
            "share",
            None,
            parameters([("href", ParameterValue::from("https://example.com"))]),
            BridgeVariant::Native(NativeTarget::Facebook),
        )
        .unwrap();

    assert!(dispatcher.open(&request).await.unwrap());
}

#[tokio::test]
async fn test_open_maps_opener_failure() {
    let mut opener = MockOpener::new();
    opener.expect_can_open_scheme().return_const(true);
    opener
        .expect_open_url()
        .returning(|_| Err(BridgeError::OperationFailed("no handler".to_string())));

    let dispatcher = BridgeDispatcher::new(config(Some(opener)));
    let request = dispatcher
        .request(
            "share",
            None,
            Parameters::new(),
            BridgeVariant::Native(NativeTarget::Messenger),
        )
        .unwrap();

    let result = dispatcher.open(&request).await;

    assert!(matches!(result, Err(BridgeApiError::OpenFailed(message)) if message.contains("no handler")));
}

#[tokio::test]
async fn test_open_without_opener_fails() {
    // The builder may install a platform opener; clear it explicitly.
    let mut config = config(None);
    config.url_opener = None;
    let dispatcher = BridgeDispatcher::new(config);
    let request = dispatcher
        .request(
            "share",
            None,
            Parameters::new(),
            BridgeVariant::Web(WebTarget::Https),
        )
        .unwrap();

    let result = dispatcher.open(&request).await;

    assert!(matches!(result, Err(BridgeApiError::OpenFailed(_))));
}

#[tokio::test]
async fn test_open_surfaces_url_errors_without_opening() {
    let mut opener = MockOpener::new();
    opener.expect_can_open_scheme().return_const(true);
    opener.expect_open_url().never();

    let config = SdkConfig::builder()
        .app_configuration(Arc::new(StaticAppConfiguration::new("abc123")))
        .bundle_info(Arc::new(StaticBundleInfo::default()))
        .url_opener(Arc::new(opener))
        .build()
        .unwrap();
    let dispatcher = BridgeDispatcher::new(config);
    let request = dispatcher
        .request(
            "share",
            None,
            Parameters::new(),
            BridgeVariant::Native(NativeTarget::Facebook),
        )
        .unwrap();

    let result = dispatcher.open(&request).await;

    assert_eq!(
        result,
        Err(BridgeApiError::UrlSchemeNotRegistered("fbabc123".to_string()))
    );
}

#[tokio::test]
async fn test_dispatch_selects_and_opens() {
    let mut opener = MockOpener::new();
    opener.expect_can_open_scheme().return_const(false);
    opener
        .expect_open_url()
        .withf(|url: &Url| url.scheme() == "web")
        .times(1)
        .returning(|_| Ok(true));

    let dispatcher = BridgeDispatcher::new(config(Some(opener)));
    let (request, opened) = dispatcher
        .dispatch("share", Some("v20.0"), Parameters::new(), &DEFAULT_VARIANT_PREFERENCE)
        .await
        .unwrap();

    assert!(opened);
    assert_eq!(request.variant(), BridgeVariant::Web(WebTarget::Web));
}

#[tokio::test]
async fn test_dispatch_without_usable_variant() {
    let dispatcher = BridgeDispatcher::new(config(None));

    let result = dispatcher
        .dispatch(
            "share",
            None,
            Parameters::new(),
            &[BridgeVariant::Native(NativeTarget::MasqueradePlayer)],
        )
        .await;

    assert!(matches!(
        result,
        Err(BridgeApiError::UnsupportedVariant(BridgeVariant::Native(
            NativeTarget::MasqueradePlayer
        )))
    ));
}
