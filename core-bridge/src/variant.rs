//! Bridge variants and their URL schemes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Companion apps reachable through a native URL scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NativeTarget {
    /// The main Facebook app
    Facebook,
    /// Messenger share extension
    Messenger,
    /// MSQRD player
    MasqueradePlayer,
}

/// Web-hosted dialog flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WebTarget {
    /// Legacy `https` dialogs
    Https,
    /// Current web dialogs
    Web,
}

/// Where a bridge request is sent.
///
/// The variant alone decides the final URL scheme and which URL provider
/// builds the base URL.
///
/// # Examples
///
/// ```
/// use core_bridge::{BridgeVariant, NativeTarget};
///
/// let variant = BridgeVariant::Native(NativeTarget::Messenger);
/// assert_eq!(variant.scheme(), "fb-messenger-share-api");
/// assert_eq!(variant.as_str(), "native/messenger");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BridgeVariant {
    Native(NativeTarget),
    Web(WebTarget),
}

impl BridgeVariant {
    /// Every variant with a standard binding.
    pub const ALL: [BridgeVariant; 5] = [
        BridgeVariant::Native(NativeTarget::Facebook),
        BridgeVariant::Native(NativeTarget::Messenger),
        BridgeVariant::Native(NativeTarget::MasqueradePlayer),
        BridgeVariant::Web(WebTarget::Https),
        BridgeVariant::Web(WebTarget::Web),
    ];

    /// The scheme the final request URL is emitted with.
    pub fn scheme(&self) -> &'static str {
        match self {
            BridgeVariant::Native(NativeTarget::Facebook) => "fbauth2",
            BridgeVariant::Native(NativeTarget::Messenger) => "fb-messenger-share-api",
            BridgeVariant::Native(NativeTarget::MasqueradePlayer) => "msqrdplayer",
            BridgeVariant::Web(WebTarget::Https) => "https",
            BridgeVariant::Web(WebTarget::Web) => "web",
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, BridgeVariant::Native(_))
    }

    pub fn is_web(&self) -> bool {
        matches!(self, BridgeVariant::Web(_))
    }

    /// Stable identifier used in logs and configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            BridgeVariant::Native(NativeTarget::Facebook) => "native/facebook",
            BridgeVariant::Native(NativeTarget::Messenger) => "native/messenger",
            BridgeVariant::Native(NativeTarget::MasqueradePlayer) => "native/msqrd_player",
            BridgeVariant::Web(WebTarget::Https) => "web/https",
            BridgeVariant::Web(WebTarget::Web) => "web/web",
        }
    }

    /// Parse an identifier produced by [`as_str`](Self::as_str).
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|variant| variant.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for BridgeVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scheme_table() {
        let schemes: Vec<&str> = BridgeVariant::ALL.iter().map(|v| v.scheme()).collect();
        assert_eq!(
            schemes,
            vec![
                "fbauth2",
                "fb-messenger-share-api",
                "msqrdplayer",
                "https",
                "web"
            ]
        );
    }

    #[test]
    fn test_variant_family() {
        assert!(BridgeVariant::Native(NativeTarget::Facebook).is_native());
        assert!(!BridgeVariant::Native(NativeTarget::Facebook).is_web());
        assert!(BridgeVariant::Web(WebTarget::Https).is_web());
    }

    #[test]
    fn test_parse_round_trips_identifiers() {
        for variant in BridgeVariant::ALL {
            assert_eq!(BridgeVariant::parse(variant.as_str()), Some(variant));
        }
        assert_eq!(
            BridgeVariant::parse(" WEB/HTTPS "),
            Some(BridgeVariant::Web(WebTarget::Https))
        );
        assert_eq!(BridgeVariant::parse("native/whatsapp"), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            BridgeVariant::Native(NativeTarget::MasqueradePlayer).to_string(),
            "native/msqrd_player"
        );
    }
}
