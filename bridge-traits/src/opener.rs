//! URL Opening Abstraction
//!
//! Hands finished bridge URLs to the platform and answers whether a companion
//! app is installed for a given scheme.

use url::Url;

use crate::{error::Result, platform::PlatformSendSync};

/// Platform URL opener.
///
/// # Platform Support
///
/// - **iOS**: `UIApplication.canOpenURL` / `open(_:options:)`
/// - **Android**: `PackageManager.resolveActivity` / `startActivity`
/// - **Desktop**: `open`, `xdg-open` or `start`
///
/// # Example
///
/// ```ignore
/// use bridge_traits::opener::UrlOpener;
///
/// async fn launch(opener: &dyn UrlOpener, url: &url::Url) -> bool {
///     opener.can_open_scheme(url.scheme()) && opener.open_url(url).await.unwrap_or(false)
/// }
/// ```
#[cfg_attr(target_arch = "wasm32", async_trait::async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait::async_trait)]
pub trait UrlOpener: PlatformSendSync {
    /// Whether a handler for `scheme` can currently be invoked.
    ///
    /// Must be cheap; it is consulted while choosing a bridge variant.
    fn can_open_scheme(&self, scheme: &str) -> bool;

    /// Open `url` with the platform handler.
    ///
    /// Returns `Ok(false)` when the platform declined to open the URL.
    async fn open_url(&self, url: &Url) -> Result<bool>;
}
