//! AES-GCM envelope for stored records.
//!
//! Both ciphertexts in a record are produced under the same 32-byte cipher
//! key, derived from the 16-byte encryption key by left-aligned copy into a
//! zeroed buffer. The zero-pad is intentional (compatibility with the
//! client-side encryption library's key type); the effective strength of
//! the envelope is 128 bits.
//!
//! Nonces are fixed per field, not random:
//!
//! - the secret-key ciphertext uses the all-zero nonce,
//! - the access-grant ciphertext uses nonce byte 0 = 1, rest zero.
//!
//! This is sound only because the record store's atomic put-if-absent
//! contract guarantees each encryption key encrypts exactly one secret-key
//! plaintext and one grant plaintext for the lifetime of the system. Any
//! backend that allows overwrite must switch to random nonces stored with
//! the ciphertext.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use zeroize::Zeroize;

use crate::errors::{CryptoError, Result};
use crate::keys::{EncryptionKey, SecretKey, SECRET_KEY_LEN};

/// Nonce length for AES-256-GCM (96 bits).
pub const NONCE_LEN: usize = 12;

/// Fixed nonce for the secret-key ciphertext.
const SECRET_KEY_NONCE: [u8; NONCE_LEN] = [0; NONCE_LEN];

/// Fixed nonce for the access-grant ciphertext.
const ACCESS_GRANT_NONCE: [u8; NONCE_LEN] = [1, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0, 0];

fn cipher(key: &EncryptionKey) -> Aes256Gcm {
    let mut cipher_key = key.cipher_key();
    let cipher = Aes256Gcm::new(&cipher_key.into());
    cipher_key.zeroize();
    cipher
}

/// Encrypt the minted secret key under the user's encryption key.
pub fn encrypt_secret_key(key: &EncryptionKey, secret: &SecretKey) -> Result<Vec<u8>> {
    cipher(key)
        .encrypt(Nonce::from_slice(&SECRET_KEY_NONCE), secret.as_bytes().as_slice())
        .map_err(|_| CryptoError::Encryption)
}

/// Decrypt a stored secret-key ciphertext.
pub fn decrypt_secret_key(key: &EncryptionKey, ciphertext: &[u8]) -> Result<SecretKey> {
    let mut plaintext = cipher(key)
        .decrypt(Nonce::from_slice(&SECRET_KEY_NONCE), ciphertext)
        .map_err(|_| CryptoError::Decryption)?;

    if plaintext.len() != SECRET_KEY_LEN {
        plaintext.zeroize();
        return Err(CryptoError::Decryption);
    }

    let mut bytes = [0u8; SECRET_KEY_LEN];
    bytes.copy_from_slice(&plaintext);
    plaintext.zeroize();
    Ok(SecretKey::from_bytes(bytes))
}

/// Encrypt the access-grant string under the user's encryption key.
pub fn encrypt_access_grant(key: &EncryptionKey, grant: &[u8]) -> Result<Vec<u8>> {
    cipher(key)
        .encrypt(Nonce::from_slice(&ACCESS_GRANT_NONCE), grant)
        .map_err(|_| CryptoError::Encryption)
}

/// Decrypt a stored access-grant ciphertext.
pub fn decrypt_access_grant(key: &EncryptionKey, ciphertext: &[u8]) -> Result<Vec<u8>> {
    cipher(key)
        .decrypt(Nonce::from_slice(&ACCESS_GRANT_NONCE), ciphertext)
        .map_err(|_| CryptoError::Decryption)
}
