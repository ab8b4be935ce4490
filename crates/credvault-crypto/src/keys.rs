//! Key material for the credential database.
//!
//! Three types live here:
//!
//! - [`EncryptionKey`], the 16-byte user secret every record is encrypted
//!   under. The service consumes it but never persists or logs it.
//! - [`SecretKey`], the 32-byte signing secret the service mints at put
//!   time, returns once, and stores only in encrypted form.
//! - [`KeyHash`], SHA-256 of the raw encryption key bytes; the lookup key
//!   in the record store, and the only key-derived value safe to log.

use std::fmt;

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};
use zeroize::Zeroize;

use crate::codec::{decode_versioned, encode_versioned, ENCRYPTION_KEY_ENCODED_LEN};
use crate::errors::{CryptoError, Result};

/// Version tag prepended to an encryption key before base32 encoding.
pub const ENCRYPTION_KEY_VERSION: u8 = 77;

/// Version tag prepended to a secret key before base32 encoding.
pub const SECRET_KEY_VERSION: u8 = 78;

/// Size of an encryption key in bytes.
pub const ENCRYPTION_KEY_LEN: usize = 16;

/// Size of a secret key in bytes.
pub const SECRET_KEY_LEN: usize = 32;

/// Size of a key hash in bytes (SHA-256 output).
pub const KEY_HASH_LEN: usize = 32;

/// Encoded length of a secret key: base32 of 33 bytes, no padding.
pub const SECRET_KEY_ENCODED_LEN: usize = 53;

/// Size of the AES-256-GCM cipher key derived from an encryption key.
pub(crate) const CIPHER_KEY_LEN: usize = 32;

// ---------------------------------------------------------------------------
// EncryptionKey
// ---------------------------------------------------------------------------

/// The user-held secret an access grant and secret key are encrypted with.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct EncryptionKey([u8; ENCRYPTION_KEY_LEN]);

impl EncryptionKey {
    /// Mint a new random encryption key from the OS CSPRNG.
    ///
    /// Clients normally generate their own keys; this exists for tooling
    /// and tests.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; ENCRYPTION_KEY_LEN];
        OsRng.try_fill_bytes(&mut bytes).map_err(|_| CryptoError::Rng)?;
        Ok(Self(bytes))
    }

    /// Construct an encryption key from raw bytes.
    pub fn from_bytes(bytes: [u8; ENCRYPTION_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode an encryption key from its 28-character lowercase base32 wire
    /// form. Accepts uppercase input for robustness.
    pub fn from_base32(encoded: &str) -> Result<Self> {
        let mut raw = decode_versioned(
            ENCRYPTION_KEY_VERSION,
            ENCRYPTION_KEY_ENCODED_LEN,
            encoded,
        )?;
        let mut bytes = [0u8; ENCRYPTION_KEY_LEN];
        bytes.copy_from_slice(&raw);
        raw.zeroize();
        Ok(Self(bytes))
    }

    /// Encode the key as 28 lowercase base32 characters with version tag 77.
    pub fn to_base32(&self) -> String {
        encode_versioned(ENCRYPTION_KEY_VERSION, &self.0)
    }

    /// The SHA-256 hash of the raw key bytes (the version tag is not
    /// hashed). This is the record store's lookup key.
    pub fn hash(&self) -> KeyHash {
        KeyHash(Sha256::digest(self.0).into())
    }

    /// Derive the 32-byte AES-GCM cipher key: the 16 key bytes left-aligned
    /// in a zeroed buffer. The zero-pad is deliberate; see the envelope
    /// module notes.
    pub(crate) fn cipher_key(&self) -> [u8; CIPHER_KEY_LEN] {
        let mut cipher_key = [0u8; CIPHER_KEY_LEN];
        cipher_key[..ENCRYPTION_KEY_LEN].copy_from_slice(&self.0);
        cipher_key
    }
}

impl fmt::Debug for EncryptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EncryptionKey([REDACTED])")
    }
}

// ---------------------------------------------------------------------------
// SecretKey
// ---------------------------------------------------------------------------

/// The signing secret minted by the service at put time.
///
/// Returned to the depositor exactly once; afterwards it exists only as
/// ciphertext inside the stored record.
#[derive(Clone, PartialEq, Eq)]
pub struct SecretKey([u8; SECRET_KEY_LEN]);

impl SecretKey {
    /// Mint a new random secret key from the OS CSPRNG.
    pub fn generate() -> Result<Self> {
        let mut bytes = [0u8; SECRET_KEY_LEN];
        OsRng.try_fill_bytes(&mut bytes).map_err(|_| CryptoError::Rng)?;
        Ok(Self(bytes))
    }

    /// Construct a secret key from raw bytes.
    pub fn from_bytes(bytes: [u8; SECRET_KEY_LEN]) -> Self {
        Self(bytes)
    }

    /// Decode a secret key from its lowercase base32 wire form.
    pub fn from_base32(encoded: &str) -> Result<Self> {
        let mut raw = decode_versioned(SECRET_KEY_VERSION, SECRET_KEY_ENCODED_LEN, encoded)?;
        let mut bytes = [0u8; SECRET_KEY_LEN];
        bytes.copy_from_slice(&raw);
        raw.zeroize();
        Ok(Self(bytes))
    }

    /// Encode the key as lowercase base32 with version tag 78.
    pub fn to_base32(&self) -> String {
        encode_versioned(SECRET_KEY_VERSION, &self.0)
    }

    /// Borrow the raw key bytes, e.g. to feed an S3 request signer.
    pub fn as_bytes(&self) -> &[u8; SECRET_KEY_LEN] {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SecretKey([REDACTED])")
    }
}

impl Drop for SecretKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

// ---------------------------------------------------------------------------
// KeyHash
// ---------------------------------------------------------------------------

/// SHA-256 digest of an encryption key; the lookup key in the record store.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyHash([u8; KEY_HASH_LEN]);

impl KeyHash {
    /// Construct a key hash from raw digest bytes.
    pub fn from_bytes(bytes: [u8; KEY_HASH_LEN]) -> Self {
        Self(bytes)
    }

    /// Borrow the raw digest bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_HASH_LEN] {
        &self.0
    }

    /// Abbreviated hex form (first 8 bytes) for log lines.
    pub fn abbrev(&self) -> String {
        hex::encode(&self.0[..8])
    }
}

impl fmt::Display for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&hex::encode(self.0))
    }
}

impl fmt::Debug for KeyHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyHash({})", self.abbrev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryption_key_base32_roundtrip() {
        let key = EncryptionKey::generate().unwrap();
        let encoded = key.to_base32();
        assert_eq!(encoded.len(), ENCRYPTION_KEY_ENCODED_LEN);
        let decoded = EncryptionKey::from_base32(&encoded).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_encryption_key_decodes_uppercase() {
        let key = EncryptionKey::from_bytes([0x5a; 16]);
        let decoded = EncryptionKey::from_base32(&key.to_base32().to_uppercase()).unwrap();
        assert_eq!(decoded, key);
    }

    #[test]
    fn test_encryption_key_rejects_secret_key_tag() {
        let encoded = encode_versioned(SECRET_KEY_VERSION, &[1u8; 16]);
        assert_eq!(
            EncryptionKey::from_base32(&encoded).unwrap_err(),
            CryptoError::VersionMismatch
        );
    }

    #[test]
    fn test_encryption_key_rejects_single_char_mutations() {
        let key = EncryptionKey::from_bytes(*b"0123456789abcdef");
        let encoded = key.to_base32();

        for i in 0..encoded.len() {
            let mut mutated: Vec<char> = encoded.chars().collect();
            // Swap to a different alphabet character; '0' is outside the
            // base32 alphabet, 'x' is inside it.
            mutated[i] = if mutated[i] == 'x' { '0' } else { 'x' };
            let mutated: String = mutated.into_iter().collect();

            match EncryptionKey::from_base32(&mutated) {
                Err(_) => {}
                // A mutation may still decode to *some* 17 bytes; it must
                // then at least not produce the original key.
                Ok(other) => assert_ne!(other, key, "mutation at {i} decoded to the same key"),
            }
        }
    }

    #[test]
    fn test_key_hash_is_sha256_of_raw_bytes() {
        let key = EncryptionKey::from_bytes([3u8; 16]);
        let expected: [u8; 32] = Sha256::digest([3u8; 16]).into();
        assert_eq!(key.hash().as_bytes(), &expected);
    }

    #[test]
    fn test_generate_produces_distinct_keys() {
        let a = EncryptionKey::generate().unwrap();
        let b = EncryptionKey::generate().unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_cipher_key_is_zero_padded() {
        let key = EncryptionKey::from_bytes([0xff; 16]);
        let cipher_key = key.cipher_key();
        assert_eq!(&cipher_key[..16], &[0xff; 16]);
        assert_eq!(&cipher_key[16..], &[0u8; 16]);
    }

    #[test]
    fn test_secret_key_base32_roundtrip() {
        let secret = SecretKey::generate().unwrap();
        let encoded = secret.to_base32();
        assert_eq!(encoded.len(), SECRET_KEY_ENCODED_LEN);
        assert_eq!(encoded, encoded.to_lowercase());
        let decoded = SecretKey::from_base32(&encoded).unwrap();
        assert_eq!(decoded, secret);
    }

    #[test]
    fn test_debug_redacts_key_material() {
        let key = EncryptionKey::from_bytes([0xaa; 16]);
        let secret = SecretKey::from_bytes([0xbb; 32]);
        assert_eq!(format!("{key:?}"), "EncryptionKey([REDACTED])");
        assert_eq!(format!("{secret:?}"), "SecretKey([REDACTED])");
    }
}
