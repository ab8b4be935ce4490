//! Version-tagged base32 wire codec.
//!
//! Key material travels as RFC 4648 base32 without padding, produced in
//! lowercase and decoded case-insensitively. A one-byte version tag is
//! prepended to the raw bytes before encoding so that key types can be told
//! apart on the wire and future formats can be introduced without ambiguity.
//!
//! The tag namespace currently assigns 77 to encryption keys and 78 to
//! secret keys. New keying material must take a new tag rather than re-use
//! one.

use data_encoding::BASE32_NOPAD;
use zeroize::Zeroize;

use crate::errors::{CryptoError, Result};

/// Encoded length of an encryption key: base32 of 17 bytes, no padding.
pub const ENCRYPTION_KEY_ENCODED_LEN: usize = 28;

/// Encode `data` with a one-byte version tag as lowercase unpadded base32.
pub fn encode_versioned(version: u8, data: &[u8]) -> String {
    let mut tagged = Vec::with_capacity(1 + data.len());
    tagged.push(version);
    tagged.extend_from_slice(data);
    let encoded = BASE32_NOPAD.encode(&tagged).to_lowercase();
    tagged.zeroize();
    encoded
}

/// Decode a version-tagged base32 string, verifying both the exact encoded
/// length and the version tag. Returns the raw bytes after the tag.
pub fn decode_versioned(version: u8, encoded_len: usize, encoded: &str) -> Result<Vec<u8>> {
    if encoded.len() != encoded_len {
        return Err(CryptoError::EncodedLength {
            expected: encoded_len,
            got: encoded.len(),
        });
    }

    let mut tagged = BASE32_NOPAD
        .decode(encoded.to_uppercase().as_bytes())
        .map_err(|_| CryptoError::InvalidBase32)?;

    if tagged.first() != Some(&version) {
        tagged.zeroize();
        return Err(CryptoError::VersionMismatch);
    }

    let raw = tagged[1..].to_vec();
    tagged.zeroize();
    Ok(raw)
}
