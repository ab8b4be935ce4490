//! The stored record aggregate.

use serde::{Deserialize, Serialize};

/// One deposited credential, as persisted by a backend.
///
/// Both ciphertexts must always decrypt under the encryption key whose
/// hash is the record's store key. The exact persistence serialization is
/// the backend's concern; the serde derives are provided so backends may
/// pick their own codec.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// The satellite node URL exactly as embedded in the grant, node-ID
    /// prefix included. The allow-list compares after stripping.
    pub satellite_address: String,

    /// Head identifier of the grant's API key, recorded so operators can
    /// invalidate by API key without possessing the encryption key.
    pub macaroon_head: Vec<u8>,

    /// Ciphertext of the 32-byte secret key.
    pub encrypted_secret_key: Vec<u8>,

    /// Ciphertext of the access-grant string.
    pub encrypted_access_grant: Vec<u8>,

    /// Whether the grant was deposited with publicly-shareable intent.
    pub public: bool,
}
