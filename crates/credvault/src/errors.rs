//! The error surface of the credential database.

use credvault_crypto::CryptoError;
use credvault_grant::GrantError;
use credvault_storage::StorageError;
use thiserror::Error;

/// Errors surfaced to callers of [`Database`](crate::Database).
///
/// Absent and invalidated records both surface as `NotFound`; the
/// distinction is deliberately hidden so callers cannot probe whether an
/// invalidated key ever existed.
#[derive(Debug, Error)]
pub enum Error {
    /// The encryption key failed to decode: wrong length, bad base32, or a
    /// bad version tag.
    #[error("malformed encryption key: {0}")]
    MalformedKey(#[source] CryptoError),

    /// The access grant failed to parse.
    #[error("malformed access grant: {0}")]
    MalformedGrant(#[from] GrantError),

    /// The grant's satellite is not on the allow-list.
    #[error("access grant contains disallowed satellite '{0}'")]
    DisallowedSatellite(String),

    /// A record already exists for this encryption key. Retry the deposit
    /// with a freshly generated key.
    #[error("a record already exists for this encryption key")]
    AlreadyExists,

    /// No live record under this encryption key.
    #[error("record not found")]
    NotFound,

    /// A stored ciphertext failed AEAD authentication: tampering, or the
    /// wrong key for this record.
    #[error("stored record failed authentication")]
    Corrupt,

    /// RNG failure, encryption failure, or an unexpected store error.
    #[error("internal error: {0}")]
    Internal(String),

    /// The backing store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

impl Error {
    /// Whether a caller can reasonably retry the failed operation.
    /// `AlreadyExists` needs a fresh encryption key; `Unavailable` wants
    /// backoff first.
    pub fn retriable(&self) -> bool {
        matches!(self, Error::AlreadyExists | Error::Unavailable(_))
    }
}

impl From<CryptoError> for Error {
    fn from(err: CryptoError) -> Self {
        match err {
            CryptoError::EncodedLength { .. }
            | CryptoError::InvalidBase32
            | CryptoError::VersionMismatch => Error::MalformedKey(err),
            CryptoError::Rng | CryptoError::Encryption => Error::Internal(err.to_string()),
            CryptoError::Decryption => Error::Corrupt,
        }
    }
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::AlreadyExists => Error::AlreadyExists,
            StorageError::Invalidated => Error::NotFound,
            StorageError::Unavailable(message) => Error::Unavailable(message),
            StorageError::Backend(message) => Error::Internal(message),
        }
    }
}

/// Result alias for database operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retriable_kinds() {
        assert!(Error::AlreadyExists.retriable());
        assert!(Error::Unavailable("down".into()).retriable());
        assert!(!Error::NotFound.retriable());
        assert!(!Error::Corrupt.retriable());
        assert!(!Error::DisallowedSatellite("sat".into()).retriable());
    }

    #[test]
    fn test_invalidated_surfaces_as_not_found() {
        assert!(matches!(
            Error::from(StorageError::Invalidated),
            Error::NotFound
        ));
    }

    #[test]
    fn test_decryption_surfaces_as_corrupt() {
        assert!(matches!(Error::from(CryptoError::Decryption), Error::Corrupt));
    }

    #[test]
    fn test_key_decode_failures_surface_as_malformed_key() {
        for err in [
            CryptoError::EncodedLength { expected: 28, got: 3 },
            CryptoError::InvalidBase32,
            CryptoError::VersionMismatch,
        ] {
            assert!(matches!(Error::from(err), Error::MalformedKey(_)));
        }
    }
}
