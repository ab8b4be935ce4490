//! Macaroon-backed API keys.
//!
//! An API key is a macaroon: a head identifier, a chain of caveat bytes,
//! and a tail authenticator. The credential database never evaluates
//! caveats or verifies tails; it only records the head so operators can
//! later invalidate every credential minted from one API key without
//! possessing any encryption key.

use serde::{Deserialize, Serialize};

use crate::errors::{GrantError, Result};

/// An API key embedded in an access grant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiKey {
    head: Vec<u8>,
    caveats: Vec<Vec<u8>>,
    tail: Vec<u8>,
}

impl ApiKey {
    /// Construct an API key from its macaroon parts.
    pub fn new(head: Vec<u8>, caveats: Vec<Vec<u8>>, tail: Vec<u8>) -> Self {
        Self { head, caveats, tail }
    }

    /// The head identifier, derived at mint time from the macaroon's
    /// non-caveat portion. Stable across caveat additions.
    pub fn head(&self) -> &[u8] {
        &self.head
    }

    /// The caveat chain, opaque to this service.
    pub fn caveats(&self) -> &[Vec<u8>] {
        &self.caveats
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.head.is_empty() || self.tail.is_empty() {
            return Err(GrantError::MissingApiKey);
        }
        Ok(())
    }
}
