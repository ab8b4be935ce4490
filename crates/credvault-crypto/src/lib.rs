//! # credvault-crypto
//!
//! Cryptographic primitives for the credvault credential database: the key
//! material types (`EncryptionKey`, `SecretKey`, `KeyHash`), the
//! version-tagged base32 wire codec, and the AES-GCM envelope that protects
//! stored records.
//!
//! The envelope deliberately uses fixed per-field nonces; that choice is
//! only sound because the database layer guarantees an encryption key is
//! accepted at most once. See [`envelope`] for the full contract.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod codec;
pub mod envelope;
pub mod errors;
pub mod keys;

pub use codec::{decode_versioned, encode_versioned, ENCRYPTION_KEY_ENCODED_LEN};
pub use errors::{CryptoError, Result};
pub use keys::{
    EncryptionKey, KeyHash, SecretKey, ENCRYPTION_KEY_LEN, ENCRYPTION_KEY_VERSION, KEY_HASH_LEN,
    SECRET_KEY_ENCODED_LEN, SECRET_KEY_LEN, SECRET_KEY_VERSION,
};
