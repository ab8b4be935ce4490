//! Error types for grant and node URL parsing.

use thiserror::Error;

/// Errors produced while parsing access grants and node URLs.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GrantError {
    /// The grant string is not valid base64url.
    #[error("access grant is not valid base64")]
    Encoding,

    /// The grant carries an unknown version tag.
    #[error("unknown access grant version: {0}")]
    UnknownVersion(u8),

    /// The grant payload did not deserialize.
    #[error("access grant payload did not deserialize")]
    Deserialize,

    /// The grant payload failed to serialize.
    #[error("access grant payload failed to serialize")]
    Serialize,

    /// The grant does not embed a satellite address.
    #[error("access grant is missing a satellite address")]
    MissingSatellite,

    /// The grant does not embed a usable API key.
    #[error("access grant is missing an API key")]
    MissingApiKey,

    /// A node URL failed to parse.
    #[error("invalid node URL '{url}': {reason}")]
    InvalidNodeUrl {
        /// The offending input.
        url: String,
        /// What was wrong with it.
        reason: &'static str,
    },
}

/// Result alias for grant operations.
pub type Result<T> = std::result::Result<T, GrantError>;
