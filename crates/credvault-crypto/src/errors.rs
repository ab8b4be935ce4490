//! Error types for key decoding and envelope operations.

use thiserror::Error;

/// Errors produced by the codec, key types, and AEAD envelope.
///
/// Decode failures (`EncodedLength`, `InvalidBase32`, `VersionMismatch`)
/// correspond to a malformed key on the wire. `Decryption` covers every
/// AEAD authentication failure; callers receive no detail about whether the
/// key or the ciphertext was at fault.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The encoded string has the wrong length for the expected key type.
    #[error("encoded key length expected to be {expected}, was {got}")]
    EncodedLength {
        /// Expected encoded length in characters.
        expected: usize,
        /// Actual length of the input.
        got: usize,
    },

    /// The string is not valid unpadded base32.
    #[error("key is not valid base32")]
    InvalidBase32,

    /// The decoded bytes did not start with the expected version tag.
    #[error("key did not start with the expected version byte")]
    VersionMismatch,

    /// The operating system's randomness source failed.
    #[error("randomness source failed")]
    Rng,

    /// AEAD encryption failed.
    #[error("encryption failed")]
    Encryption,

    /// AEAD decryption failed: wrong key, tampered ciphertext, or a
    /// corrupted authentication tag.
    #[error("decryption failed")]
    Decryption,
}

/// Result alias for crypto operations.
pub type Result<T> = std::result::Result<T, CryptoError>;
