use bridge_traits::BridgeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProfileError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] BridgeError),

    #[error("Unexpected HTTP status {0}")]
    BadStatus(u16),

    #[error("Picture response had an empty body")]
    EmptyBody,

    #[error("Cannot build picture URL for profile '{0}'")]
    InvalidUrl(String),
}

pub type Result<T> = std::result::Result<T, ProfileError>;
