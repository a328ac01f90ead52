//! # Desktop Bridge Implementations
//!
//! Default implementations of bridge traits for desktop platforms
//! (macOS, Windows, Linux), used during development and in desktop hosts.
//!
//! ## Overview
//!
//! - `AppConfiguration` from `BRIDGE_*` environment variables
//! - `BundleInfo` from a JSON manifest shaped like the `CFBundleURLTypes`
//!   section of an `Info.plist`
//! - `UrlOpener` delegating to `open` / `xdg-open` / `start`
//! - `HttpClient` using `reqwest`
//!
//! ## Usage
//!
//! ```ignore
//! use bridge_desktop::{EnvAppConfiguration, ManifestBundleInfo, SystemUrlOpener};
//!
//! let configuration = EnvAppConfiguration::from_env();
//! let bundle = ManifestBundleInfo::from_env()?;
//! let opener = SystemUrlOpener::from_env();
//! ```

mod bundle;
mod config;
mod http;
mod opener;

pub use bundle::ManifestBundleInfo;
pub use config::EnvAppConfiguration;
pub use http::ReqwestHttpClient;
pub use opener::SystemUrlOpener;
