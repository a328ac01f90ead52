//! Thread-safety bounds shared by every bridge trait.
//!
//! Host adapters are handed out as `Arc<dyn Trait>` and read from whichever
//! thread builds a bridge request. Native targets therefore demand
//! `Send + Sync`; `wasm32` runs single-threaded and browser handles cannot
//! satisfy those bounds, so the marker collapses to nothing there.

/// `Send + Sync` on native targets, no bound on `wasm32`.
#[cfg(not(target_arch = "wasm32"))]
pub trait PlatformSendSync: Send + Sync {}

#[cfg(not(target_arch = "wasm32"))]
impl<T> PlatformSendSync for T where T: Send + Sync {}

#[cfg(target_arch = "wasm32")]
pub trait PlatformSendSync {}

#[cfg(target_arch = "wasm32")]
impl<T> PlatformSendSync for T {}
