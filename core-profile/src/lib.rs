//! # Core Profile
//!
//! Profile picture loading for the bridge SDK's profile view.
//!
//! A [`PictureRequest`] names the profile and the desired size and crop; the
//! [`ProfilePictureLoader`] downloads the matching image from the graph host
//! through the host's `HttpClient` and caches it until the request changes.

pub mod error;
pub mod loader;
pub mod picture;

pub use error::{ProfileError, Result};
pub use loader::{ProfilePicture, ProfilePictureLoader, RefreshOutcome};
pub use picture::{PictureMode, PictureRequest, DEFAULT_PICTURE_SIZE};
