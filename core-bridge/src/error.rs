use thiserror::Error;

use crate::variant::BridgeVariant;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeApiError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("URL scheme not registered: {0}")]
    UrlSchemeNotRegistered(String),

    #[error("App identifier is not configured")]
    InvalidAppId,

    #[error("Invalid source URL: {0}")]
    InvalidSourceUrl(String),

    #[error("Failed to build bridge URL")]
    UrlBuildingFailed,

    #[error("No URL provider registered for {0}")]
    UnsupportedVariant(BridgeVariant),

    #[error("Failed to open bridge URL: {0}")]
    OpenFailed(String),
}

pub type Result<T> = std::result::Result<T, BridgeApiError>;
