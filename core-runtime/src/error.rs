use thiserror::Error;

/// Errors raised while wiring the SDK together.
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid settings: hosts, feature flags, log filters
    #[error("Configuration error: {0}")]
    Config(String),

    /// A required host collaborator was neither injected nor defaultable
    #[error("Capability missing: {capability} - {message}")]
    CapabilityMissing { capability: String, message: String },

    /// A platform default could not be constructed
    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
