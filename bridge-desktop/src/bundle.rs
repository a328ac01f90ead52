//! Bundle metadata from a JSON manifest
//!
//! The manifest mirrors the URL-type section of an `Info.plist`:
//!
//! ```json
//! {
//!   "CFBundleURLTypes": [
//!     { "CFBundleURLName": "main", "CFBundleURLSchemes": ["fbabc123"] }
//!   ]
//! }
//! ```

use bridge_traits::{
    app::BundleInfo,
    error::{BridgeError, Result},
};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

const MANIFEST_VAR: &str = "BRIDGE_BUNDLE_MANIFEST";
const URL_SCHEMES_VAR: &str = "BRIDGE_URL_SCHEMES";
const MANIFEST_FILE: &str = "bundle.json";
const CONFIG_SUBDIR: &str = "app-bridge";

#[derive(Debug, Default, Deserialize)]
struct Manifest {
    #[serde(rename = "CFBundleURLTypes", default)]
    url_types: Vec<UrlType>,
}

#[derive(Debug, Deserialize)]
struct UrlType {
    #[serde(rename = "CFBundleURLSchemes", default)]
    schemes: Vec<String>,
}

/// `BundleInfo` backed by a manifest loaded at construction.
#[derive(Debug, Clone, Default)]
pub struct ManifestBundleInfo {
    schemes: Vec<String>,
}

impl ManifestBundleInfo {
    /// Parse a manifest document.
    pub fn from_json(json: &str) -> Result<Self> {
        let manifest: Manifest = serde_json::from_str(json).map_err(|e| {
            BridgeError::OperationFailed(format!("Invalid bundle manifest: {}", e))
        })?;

        let schemes = manifest
            .url_types
            .into_iter()
            .flat_map(|url_type| url_type.schemes)
            .filter(|scheme| !scheme.is_empty())
            .collect();

        Ok(Self { schemes })
    }

    /// Load a manifest file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let bundle = Self::from_json(&json)?;
        debug!(
            path = ?path,
            schemes = bundle.schemes.len(),
            "Loaded bundle manifest"
        );
        Ok(bundle)
    }

    /// Resolve the manifest the way desktop hosts are configured:
    ///
    /// 1. `BRIDGE_BUNDLE_MANIFEST` pointing at a manifest file
    /// 2. `BRIDGE_URL_SCHEMES` as a comma separated list
    /// 3. `<config dir>/app-bridge/bundle.json` if it exists
    /// 4. otherwise no registered schemes
    pub fn from_env() -> Result<Self> {
        if let Ok(path) = std::env::var(MANIFEST_VAR) {
            return Self::from_path(Path::new(&path));
        }

        if let Ok(list) = std::env::var(URL_SCHEMES_VAR) {
            return Ok(Self::from_scheme_list(&list));
        }

        match default_manifest_path() {
            Some(path) if path.exists() => Self::from_path(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a comma separated scheme list.
    pub fn from_scheme_list(list: &str) -> Self {
        let schemes = list
            .split(',')
            .map(str::trim)
            .filter(|scheme| !scheme.is_empty())
            .map(str::to_string)
            .collect();
        Self { schemes }
    }
}

fn default_manifest_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_SUBDIR).join(MANIFEST_FILE))
}

impl BundleInfo for ManifestBundleInfo {
    fn registered_url_schemes(&self) -> Vec<String> {
        self.schemes.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bridge_traits::StaticAppConfiguration;

    #[test]
    fn test_from_json() {
        let bundle = ManifestBundleInfo::from_json(
            r#"{
                "CFBundleURLTypes": [
                    { "CFBundleURLName": "main", "CFBundleURLSchemes": ["myapp"] },
                    { "CFBundleURLSchemes": ["fbabc123", ""] }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(bundle.registered_url_schemes(), vec!["myapp", "fbabc123"]);
        assert!(bundle
            .validate_registered_url_scheme(&StaticAppConfiguration::new("abc123"))
            .is_ok());
    }

    #[test]
    fn test_from_json_without_url_types() {
        let bundle = ManifestBundleInfo::from_json("{}").unwrap();
        assert!(bundle.registered_url_schemes().is_empty());
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(ManifestBundleInfo::from_json("not json").is_err());
    }

    #[test]
    fn test_from_scheme_list() {
        let bundle = ManifestBundleInfo::from_scheme_list(" fbabc123, ,myapp ");
        assert_eq!(bundle.registered_url_schemes(), vec!["fbabc123", "myapp"]);
    }

    #[test]
    fn test_from_missing_path() {
        let result = ManifestBundleInfo::from_path(Path::new("/nonexistent/bundle.json"));
        assert!(matches!(result, Err(BridgeError::Io(_))));
    }
}
