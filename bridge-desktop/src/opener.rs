//! URL opener delegating to the desktop shell

use async_trait::async_trait;
use bridge_traits::{
    error::{BridgeError, Result},
    opener::UrlOpener,
};
use std::collections::HashSet;
use tokio::process::Command;
use tracing::{debug, warn};
use url::Url;

const HANDLERS_VAR: &str = "BRIDGE_URL_HANDLERS";

/// Desktop URL opener.
///
/// Desktop shells cannot report whether a custom scheme has a handler, so
/// the set of openable schemes is declared up front. `http` and `https` are
/// always openable through the default browser.
#[derive(Debug, Clone)]
pub struct SystemUrlOpener {
    handlers: HashSet<String>,
}

impl SystemUrlOpener {
    pub fn new<I, S>(schemes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut handlers: HashSet<String> = ["http", "https"]
            .into_iter()
            .map(str::to_string)
            .collect();
        handlers.extend(
            schemes
                .into_iter()
                .map(|scheme| scheme.into().to_ascii_lowercase()),
        );
        Self { handlers }
    }

    /// Read extra handler schemes from `BRIDGE_URL_HANDLERS` (comma separated).
    pub fn from_env() -> Self {
        let extra = std::env::var(HANDLERS_VAR).unwrap_or_default();
        Self::new(
            extra
                .split(',')
                .map(str::trim)
                .filter(|scheme| !scheme.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>(),
        )
    }

    fn command_for(url: &Url) -> Command {
        #[cfg(target_os = "macos")]
        {
            let mut command = Command::new("open");
            command.arg(url.as_str());
            command
        }

        #[cfg(target_os = "windows")]
        {
            let mut command = Command::new("cmd");
            command.args(["/C", "start", "", url.as_str()]);
            command
        }

        #[cfg(not(any(target_os = "macos", target_os = "windows")))]
        {
            let mut command = Command::new("xdg-open");
            command.arg(url.as_str());
            command
        }
    }
}

impl Default for SystemUrlOpener {
    fn default() -> Self {
        Self::new(Vec::<String>::new())
    }
}

#[async_trait]
impl UrlOpener for SystemUrlOpener {
    fn can_open_scheme(&self, scheme: &str) -> bool {
        self.handlers.contains(&scheme.to_ascii_lowercase())
    }

    async fn open_url(&self, url: &Url) -> Result<bool> {
        if !self.can_open_scheme(url.scheme()) {
            debug!(scheme = url.scheme(), "No desktop handler for scheme");
            return Ok(false);
        }

        let status = Self::command_for(url)
            .status()
            .await
            .map_err(|e| BridgeError::OperationFailed(format!("Failed to launch opener: {}", e)))?;

        if !status.success() {
            warn!(scheme = url.scheme(), code = ?status.code(), "Desktop opener failed");
        }

        Ok(status.success())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_web_schemes_always_openable() {
        let opener = SystemUrlOpener::default();

        assert!(opener.can_open_scheme("https"));
        assert!(opener.can_open_scheme("HTTP"));
        assert!(!opener.can_open_scheme("fbauth2"));
    }

    #[test]
    fn test_declared_handlers() {
        let opener = SystemUrlOpener::new(["FBAuth2", "msqrdplayer"]);

        assert!(opener.can_open_scheme("fbauth2"));
        assert!(opener.can_open_scheme("msqrdplayer"));
        assert!(!opener.can_open_scheme("fb-messenger-share-api"));
    }

    #[tokio::test]
    async fn test_unknown_scheme_is_not_launched() {
        let opener = SystemUrlOpener::default();
        let url = Url::parse("fb-messenger-share-api://dialog/share").unwrap();

        assert!(!opener.open_url(&url).await.unwrap());
    }
}
