//! Profile picture requests.

use core_bridge::{build_url, QueryItem};
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Edge length used when the caller does not pick a size.
pub const DEFAULT_PICTURE_SIZE: u32 = 100;

/// Crop/size preset understood by the graph `picture` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PictureMode {
    Square,
    #[default]
    Normal,
    Album,
    Small,
    Large,
}

impl PictureMode {
    /// Value of the `type` query item.
    pub fn as_str(&self) -> &'static str {
        match self {
            PictureMode::Square => "square",
            PictureMode::Normal => "normal",
            PictureMode::Album => "album",
            PictureMode::Small => "small",
            PictureMode::Large => "large",
        }
    }
}

impl fmt::Display for PictureMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What picture to show. Without a profile id the view shows a placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PictureRequest {
    pub profile_id: Option<String>,
    pub mode: PictureMode,
    pub width: u32,
    pub height: u32,
}

impl Default for PictureRequest {
    fn default() -> Self {
        Self {
            profile_id: None,
            mode: PictureMode::default(),
            width: DEFAULT_PICTURE_SIZE,
            height: DEFAULT_PICTURE_SIZE,
        }
    }
}

impl PictureRequest {
    pub fn new(profile_id: impl Into<String>) -> Self {
        Self {
            profile_id: Some(profile_id.into()),
            ..Self::default()
        }
    }

    pub fn with_mode(mut self, mode: PictureMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// The profile id, if it is set and non-empty.
    pub fn profile_id(&self) -> Option<&str> {
        self.profile_id.as_deref().filter(|id| !id.is_empty())
    }

    /// `https://<graph_host>/<profile_id>/picture?type=..&width=..&height=..[&access_token=..]`
    ///
    /// Returns `None` for placeholder requests and for ids or hosts that do
    /// not form a valid URL.
    ///
    /// ```
    /// use core_profile::{PictureMode, PictureRequest};
    ///
    /// let url = PictureRequest::new("4")
    ///     .with_mode(PictureMode::Square)
    ///     .with_size(64, 64)
    ///     .url("graph.facebook.com", None)
    ///     .unwrap();
    ///
    /// assert_eq!(url.as_str(), "https://graph.facebook.com/4/picture?type=square&width=64&height=64");
    /// ```
    pub fn url(&self, graph_host: &str, access_token: Option<&str>) -> Option<Url> {
        let profile_id = self.profile_id()?;
        if profile_id.contains(['/', '?', '#']) {
            return None;
        }

        let mut items = vec![
            QueryItem::new("type", self.mode.as_str()),
            QueryItem::new("width", self.width.to_string()),
            QueryItem::new("height", self.height.to_string()),
        ];
        if let Some(token) = access_token.filter(|token| !token.is_empty()) {
            items.push(QueryItem::new("access_token", token));
        }

        build_url(
            "https",
            graph_host,
            Some(&format!("/{}/picture", profile_id)),
            &items,
        )
    }
}
