//! # Profile Picture Loader
//!
//! Keeps the picture for one [`PictureRequest`] fresh.
//!
//! ## Overview
//!
//! Callers update the request as the view changes (profile, size, mode) and
//! call [`ProfilePictureLoader::refresh`] whenever the picture may be stale.
//! Only one fetch runs at a time:
//!
//! - a refresh while a fetch is running just marks the picture as needing
//!   an update and returns [`RefreshOutcome::Coalesced`]
//! - the running fetch re-runs once for the latest request before it
//!   finishes
//! - a refresh for an unchanged request is answered from the cache
//!
//! The internal lock is never held across an `.await`.

use bridge_traits::{HttpClient, HttpRequest};
use bytes::Bytes;
use core_runtime::{logging::strip_query, Error as RuntimeError, SdkConfig};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::{
    error::{ProfileError, Result},
    picture::PictureRequest,
};

const PICTURE_TIMEOUT: Duration = Duration::from_secs(30);

/// A downloaded picture and the request that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfilePicture {
    pub request: PictureRequest,
    pub data: Bytes,
    pub content_type: Option<String>,
}

/// Result of [`ProfilePictureLoader::refresh`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Another refresh is running and will pick up the latest request
    Coalesced,
    /// The cached picture already matches the request
    UpToDate,
    /// No profile id; the cache was cleared
    Placeholder,
    /// A new picture was downloaded
    Updated,
}

#[derive(Debug, Default)]
struct LoaderState {
    request: PictureRequest,
    access_token: Option<String>,
    picture: Option<ProfilePicture>,
    /// Token the cached picture was downloaded with.
    picture_token: Option<String>,
    needs_update: bool,
    in_flight: bool,
}

impl LoaderState {
    /// Whether the cache reflects the current request and access token.
    fn is_current(&self) -> bool {
        match (&self.picture, self.request.profile_id()) {
            (Some(picture), Some(_)) => {
                picture.request == self.request && self.picture_token == self.access_token
            }
            (None, None) => true,
            _ => false,
        }
    }
}

/// Clears the in-flight flag even when the refresh future is dropped.
struct InFlight<'a> {
    state: &'a Mutex<LoaderState>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        lock(self.state).in_flight = false;
    }
}

fn lock(state: &Mutex<LoaderState>) -> MutexGuard<'_, LoaderState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// State-driven profile picture cache.
pub struct ProfilePictureLoader {
    http_client: Arc<dyn HttpClient>,
    graph_host: String,
    state: Mutex<LoaderState>,
}

impl ProfilePictureLoader {
    pub fn new(http_client: Arc<dyn HttpClient>, graph_host: impl Into<String>) -> Self {
        Self {
            http_client,
            graph_host: graph_host.into(),
            state: Mutex::new(LoaderState {
                needs_update: true,
                ..LoaderState::default()
            }),
        }
    }

    /// Loader using the configured HTTP client and graph host.
    ///
    /// # Errors
    ///
    /// Returns [`RuntimeError::CapabilityMissing`] when `config` has no
    /// `HttpClient`.
    pub fn from_config(config: &SdkConfig) -> core_runtime::Result<Self> {
        let http_client =
            config
                .http_client
                .clone()
                .ok_or_else(|| RuntimeError::CapabilityMissing {
                    capability: "HttpClient".to_string(),
                    message: "The profile picture loader downloads images over HTTP. \
                              Inject an HttpClient or enable the 'desktop-shims' feature."
                        .to_string(),
                })?;

        Ok(Self::new(http_client, config.graph_host.clone()))
    }

    pub fn graph_host(&self) -> &str {
        &self.graph_host
    }

    pub fn request(&self) -> PictureRequest {
        lock(&self.state).request.clone()
    }

    /// Replace the request. Returns `true` and marks the picture as needing an
    /// update only if the request changed.
    pub fn set_request(&self, request: PictureRequest) -> bool {
        let mut state = lock(&self.state);
        if state.request == request {
            return false;
        }
        state.request = request;
        state.needs_update = true;
        true
    }

    /// Replace the access token sent with picture downloads.
    pub fn set_access_token(&self, access_token: Option<String>) -> bool {
        let mut state = lock(&self.state);
        if state.access_token == access_token {
            return false;
        }
        state.access_token = access_token;
        state.needs_update = true;
        true
    }

    pub fn needs_update(&self) -> bool {
        lock(&self.state).needs_update
    }

    pub fn is_loading(&self) -> bool {
        lock(&self.state).in_flight
    }

    /// The cached picture, if any.
    pub fn picture(&self) -> Option<ProfilePicture> {
        lock(&self.state).picture.clone()
    }

    /// Bring the cached picture in line with the current request.
    ///
    /// # Errors
    ///
    /// Download failures are returned and leave the picture marked as needing
    /// an update, so the next refresh retries.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<RefreshOutcome> {
        {
            let mut state = lock(&self.state);
            if state.in_flight {
                debug!("Picture fetch already running, coalescing");
                state.needs_update = true;
                return Ok(RefreshOutcome::Coalesced);
            }
            if !state.needs_update && state.is_current() {
                return Ok(RefreshOutcome::UpToDate);
            }
            state.in_flight = true;
        }
        let _in_flight = InFlight { state: &self.state };

        loop {
            let (request, access_token) = {
                let mut state = lock(&self.state);
                state.needs_update = false;
                (state.request.clone(), state.access_token.clone())
            };

            let outcome = self.load(&request, access_token.as_deref()).await;

            let mut state = lock(&self.state);
            let outcome = match outcome {
                Ok(Some(picture)) => {
                    state.picture = Some(picture);
                    state.picture_token = access_token;
                    RefreshOutcome::Updated
                }
                Ok(None) => {
                    state.picture = None;
                    state.picture_token = None;
                    RefreshOutcome::Placeholder
                }
                Err(e) => {
                    state.needs_update = true;
                    return Err(e);
                }
            };

            if state.needs_update && !state.is_current() {
                debug!("Request or token changed during fetch, loading again");
                continue;
            }

            state.needs_update = false;
            return Ok(outcome);
        }
    }

    /// Download the picture for `request`; `None` for placeholder requests.
    async fn load(
        &self,
        request: &PictureRequest,
        access_token: Option<&str>,
    ) -> Result<Option<ProfilePicture>> {
        let Some(profile_id) = request.profile_id() else {
            debug!("No profile id, showing placeholder");
            return Ok(None);
        };

        let url = request
            .url(&self.graph_host, access_token)
            .ok_or_else(|| ProfileError::InvalidUrl(profile_id.to_string()))?;

        debug!(url = strip_query(url.as_str()), "Downloading profile picture");

        let http_request = HttpRequest::get(url.as_str())
            .header("Accept", "image/*")
            .timeout(PICTURE_TIMEOUT);

        let response = self.http_client.execute(http_request).await.map_err(|e| {
            warn!(error = %e, "Profile picture download failed");
            ProfileError::Http(e)
        })?;

        if response.status != 200 {
            warn!(status = response.status, "Unexpected profile picture status");
            return Err(ProfileError::BadStatus(response.status));
        }

        if response.body.is_empty() {
            return Err(ProfileError::EmptyBody);
        }

        info!(bytes = response.body.len(), "Profile picture updated");

        Ok(Some(ProfilePicture {
            request: request.clone(),
            content_type: response.header("Content-Type").map(str::to_string),
            data: response.body,
        }))
    }
}

impl std::fmt::Debug for ProfilePictureLoader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = lock(&self.state);
        f.debug_struct("ProfilePictureLoader")
            .field("graph_host", &self.graph_host)
            .field("request", &state.request)
            .field("needs_update", &state.needs_update)
            .field("in_flight", &state.in_flight)
            .finish_non_exhaustive()
    }
}
