//! Access grants: the serialized credential deposited with the service.
//!
//! Wire form: `base64url_no_pad([version || bincode(payload)])`. The
//! payload carries the satellite node URL, the API key macaroon, and the
//! client's 32-byte root encryption key. Only the first two are ever
//! inspected here; the root key is opaque cargo that must never appear in
//! logs or debug output.

use std::fmt;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::{Deserialize, Serialize};

use crate::errors::{GrantError, Result};
use crate::macaroon::ApiKey;
use crate::node_url::NodeUrl;

/// Version tag for the v1 access-grant serialization.
pub const ACCESS_GRANT_VERSION: u8 = 1;

/// Size of the root encryption key embedded in a grant.
pub const ROOT_KEY_LEN: usize = 32;

#[derive(Serialize, Deserialize)]
struct GrantPayload {
    satellite_address: String,
    api_key: ApiKey,
    root_key: [u8; ROOT_KEY_LEN],
}

/// A parsed access grant.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessGrant {
    satellite_address: NodeUrl,
    api_key: ApiKey,
    root_key: [u8; ROOT_KEY_LEN],
}

impl AccessGrant {
    /// Assemble a grant from its parts. Used by client tooling and tests;
    /// the service itself only parses.
    pub fn new(satellite_address: NodeUrl, api_key: ApiKey, root_key: [u8; ROOT_KEY_LEN]) -> Self {
        Self {
            satellite_address,
            api_key,
            root_key,
        }
    }

    /// Parse a grant from its wire form.
    pub fn parse(input: &str) -> Result<Self> {
        let raw = URL_SAFE_NO_PAD
            .decode(input)
            .map_err(|_| GrantError::Encoding)?;

        let (&version, payload_bytes) = raw.split_first().ok_or(GrantError::Deserialize)?;
        if version != ACCESS_GRANT_VERSION {
            return Err(GrantError::UnknownVersion(version));
        }

        let payload: GrantPayload =
            bincode::deserialize(payload_bytes).map_err(|_| GrantError::Deserialize)?;

        if payload.satellite_address.is_empty() {
            return Err(GrantError::MissingSatellite);
        }
        let satellite_address = NodeUrl::parse(&payload.satellite_address)?;
        payload.api_key.validate()?;

        Ok(Self {
            satellite_address,
            api_key: payload.api_key,
            root_key: payload.root_key,
        })
    }

    /// Serialize the grant to its wire form.
    pub fn serialize(&self) -> Result<String> {
        let payload = GrantPayload {
            satellite_address: self.satellite_address.to_string(),
            api_key: self.api_key.clone(),
            root_key: self.root_key,
        };
        let mut raw = vec![ACCESS_GRANT_VERSION];
        raw.extend(bincode::serialize(&payload).map_err(|_| GrantError::Serialize)?);
        Ok(URL_SAFE_NO_PAD.encode(raw))
    }

    /// The satellite this grant was issued against.
    pub fn satellite_address(&self) -> &NodeUrl {
        &self.satellite_address
    }

    /// The embedded API key.
    pub fn api_key(&self) -> &ApiKey {
        &self.api_key
    }
}

impl fmt::Debug for AccessGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessGrant")
            .field("satellite_address", &self.satellite_address)
            .field("api_key", &self.api_key)
            .field("root_key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_grant() -> AccessGrant {
        AccessGrant::new(
            NodeUrl::parse("12EayRS2V1k@sat1.example.test:7777").unwrap(),
            ApiKey::new(vec![0xaa; 32], vec![], vec![0xbb; 32]),
            [0xcc; ROOT_KEY_LEN],
        )
    }

    #[test]
    fn test_serialize_parse_roundtrip() {
        let grant = test_grant();
        let parsed = AccessGrant::parse(&grant.serialize().unwrap()).unwrap();
        assert_eq!(parsed, grant);
        assert_eq!(
            parsed.satellite_address().to_string(),
            "12EayRS2V1k@sat1.example.test:7777"
        );
        assert_eq!(parsed.api_key().head(), &[0xaa; 32]);
    }

    #[test]
    fn test_parse_rejects_bad_base64() {
        assert_eq!(
            AccessGrant::parse("not!valid!base64!").unwrap_err(),
            GrantError::Encoding
        );
    }

    #[test]
    fn test_parse_rejects_empty_input() {
        assert_eq!(AccessGrant::parse("").unwrap_err(), GrantError::Deserialize);
    }

    #[test]
    fn test_parse_rejects_unknown_version() {
        let mut raw = URL_SAFE_NO_PAD.decode(test_grant().serialize().unwrap()).unwrap();
        raw[0] = 2;
        let err = AccessGrant::parse(&URL_SAFE_NO_PAD.encode(raw)).unwrap_err();
        assert_eq!(err, GrantError::UnknownVersion(2));
    }

    #[test]
    fn test_parse_rejects_truncated_payload() {
        let encoded = test_grant().serialize().unwrap();
        let raw = URL_SAFE_NO_PAD.decode(&encoded).unwrap();
        let truncated = URL_SAFE_NO_PAD.encode(&raw[..raw.len() / 2]);
        assert_eq!(
            AccessGrant::parse(&truncated).unwrap_err(),
            GrantError::Deserialize
        );
    }

    #[test]
    fn test_parse_rejects_empty_api_key_head() {
        let grant = AccessGrant::new(
            NodeUrl::parse("sat1.example.test:7777").unwrap(),
            ApiKey::new(vec![], vec![], vec![1; 32]),
            [0; ROOT_KEY_LEN],
        );
        assert_eq!(
            AccessGrant::parse(&grant.serialize().unwrap()).unwrap_err(),
            GrantError::MissingApiKey
        );
    }

    #[test]
    fn test_debug_redacts_root_key() {
        let output = format!("{:?}", test_grant());
        assert!(output.contains("[REDACTED]"));
        assert!(!output.contains("204")); // 0xcc
    }
}
