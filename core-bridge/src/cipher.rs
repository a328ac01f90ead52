//! Generated cipher keys.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use bridge_traits::CipherKeyProvider;
use rand::RngCore;

/// Number of random bytes behind a generated key.
pub const CIPHER_KEY_LEN: usize = 16;

/// A random key drawn once at construction.
///
/// Every call to [`cipher_key`](CipherKeyProvider::cipher_key) returns the same
/// value, so URLs built from one provider agree with each other.
#[derive(Clone)]
pub struct GeneratedCipherKey {
    key: String,
}

impl GeneratedCipherKey {
    pub fn new() -> Self {
        let mut bytes = [0u8; CIPHER_KEY_LEN];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self {
            key: URL_SAFE_NO_PAD.encode(bytes),
        }
    }
}

impl Default for GeneratedCipherKey {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for GeneratedCipherKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("GeneratedCipherKey([REDACTED])")
    }
}

impl CipherKeyProvider for GeneratedCipherKey {
    fn cipher_key(&self) -> String {
        self.key.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_stable() {
        let provider = GeneratedCipherKey::new();
        assert_eq!(provider.cipher_key(), provider.cipher_key());
    }

    #[test]
    fn test_key_shape() {
        let key = GeneratedCipherKey::new().cipher_key();

        // 16 bytes, unpadded base64
        assert_eq!(key.len(), 22);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(URL_SAFE_NO_PAD.decode(&key).unwrap().len(), CIPHER_KEY_LEN);
    }

    #[test]
    fn test_keys_differ_between_providers() {
        assert_ne!(
            GeneratedCipherKey::new().cipher_key(),
            GeneratedCipherKey::new().cipher_key()
        );
    }

    #[test]
    fn test_debug_hides_key() {
        let provider = GeneratedCipherKey::new();
        assert!(!format!("{:?}", provider).contains(&provider.cipher_key()));
    }
}
