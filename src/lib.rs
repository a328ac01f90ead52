//! Workspace façade crate.
//!
//! Re-exports the workspace crates under one name so host applications can
//! depend on `app-bridge-sdk` and pick features instead of wiring each crate
//! individually:
//!
//! - `desktop-shims` (default): fall back to the `bridge-desktop` adapters for
//!   collaborators the host does not inject
//! - `profile` (default): the profile picture loader

pub use bridge_traits;
pub use core_bridge;
pub use core_runtime;

#[cfg(feature = "profile")]
pub use core_profile;

/// Types most hosts need to configure the SDK and open bridge requests.
pub mod prelude {
    pub use bridge_traits::{
        AppConfiguration, BundleInfo, CipherKeyProvider, HttpClient, LoggerSink,
        StaticAppConfiguration, StaticBundleInfo, StaticCipherKey, UrlOpener,
    };
    pub use core_bridge::{
        parameters, ActionId, BridgeApiError, BridgeDispatcher, BridgeRequest, BridgeVariant,
        NativeTarget, ParameterValue, Parameters, WebTarget, DEFAULT_VARIANT_PREFERENCE,
    };
    pub use core_runtime::logging::{init_logging, LoggingConfig};
    pub use core_runtime::{SdkConfig, SdkConfigBuilder};

    #[cfg(feature = "profile")]
    pub use core_profile::{PictureMode, PictureRequest, ProfilePictureLoader, RefreshOutcome};
}
