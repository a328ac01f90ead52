//! Cipher key capability.
//!
//! Every bridge URL carries a `cipher_key` the companion app uses to encrypt
//! its response. Where the key comes from (a fixed value, a per-session random
//! key, a platform keystore) is the host's choice.

use crate::platform::PlatformSendSync;

/// Supplies the `cipher_key` query value for bridge requests.
///
/// Must return the same value for the lifetime of a request so that repeated
/// URL construction is stable.
pub trait CipherKeyProvider: PlatformSendSync {
    fn cipher_key(&self) -> String;
}

/// A fixed cipher key.
#[derive(Clone, PartialEq, Eq)]
pub struct StaticCipherKey(String);

impl StaticCipherKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }
}

impl std::fmt::Debug for StaticCipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticCipherKey([REDACTED])")
    }
}

impl CipherKeyProvider for StaticCipherKey {
    fn cipher_key(&self) -> String {
        self.0.clone()
    }
}
