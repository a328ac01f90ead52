//! # Core Bridge
//!
//! Bridge API requests and the URLs that carry them to companion apps and web
//! dialogs.
//!
//! ## Overview
//!
//! A caller describes an action (method name, optional version, parameters)
//! and a target [`BridgeVariant`]. The [`SchemeRegistry`] resolves the variant
//! to a URL scheme and a [`UrlProvider`]; the resulting [`BridgeRequest`]
//! builds the provider's base URL, checks that the host registered its
//! callback scheme and appends the authentication items:
//!
//! ```text
//! provider base URL ──► registration check ──► + cipher_key, app_id[, scheme_suffix]
//!                                                 │
//!                                                 ▼
//!                                  <variant scheme>://<host><path>?<items>
//! ```
//!
//! [`BridgeDispatcher`] sits on top: it chooses an available variant, builds
//! the request and hands the URL to the host's `UrlOpener`.
//!
//! ## Variants
//!
//! | Variant | Scheme | Provider |
//! |---------|--------|----------|
//! | `Native(Facebook)` | `fbauth2` | [`NativeUrlProvider`] |
//! | `Native(Messenger)` | `fb-messenger-share-api` | [`NativeUrlProvider`] |
//! | `Native(MasqueradePlayer)` | `msqrdplayer` | [`NativeUrlProvider`] |
//! | `Web(Https)` | `https` | [`LegacyWebUrlProvider`] |
//! | `Web(Web)` | `web` | [`WebUrlProvider`] |
//!
//! ## Thread Safety
//!
//! Requests are immutable and `Send + Sync`; URL construction is synchronous
//! and touches only read-only collaborators.

pub mod cipher;
pub mod dispatcher;
pub mod error;
pub mod provider;
pub mod query;
pub mod registry;
pub mod request;
pub mod types;
pub mod url_builder;
pub mod variant;

pub use cipher::GeneratedCipherKey;
pub use dispatcher::{BridgeDispatcher, DEFAULT_VARIANT_PREFERENCE};
pub use error::{BridgeApiError, Result};
pub use provider::{LegacyWebUrlProvider, NativeUrlProvider, UrlProvider, WebUrlProvider};
pub use query::{parameters_from_query_items, query_items, same_query_items, QueryItem};
pub use registry::{SchemeBinding, SchemeRegistry};
pub use request::{
    BridgeContext, BridgeRequest, BridgeRequestBuilder, APP_ID_ITEM, CIPHER_KEY_ITEM,
    SCHEME_SUFFIX_ITEM,
};
pub use types::{parameters, ActionId, ParameterValue, Parameters};
pub use url_builder::{build_url, UrlComponents};
pub use variant::{BridgeVariant, NativeTarget, WebTarget};
