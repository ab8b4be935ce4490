//! Satellite allow-list.
//!
//! Operators configure the satellites they trust as node URLs. Node IDs
//! may rotate or differ across environments, so only the `host:port`
//! address component is kept; membership checks strip the grant's node ID
//! the same way. Read-only after construction; operators restart the
//! process to change it.

use std::collections::HashSet;

use credvault_grant::{GrantError, NodeUrl};

/// The set of satellite addresses access grants may originate from.
#[derive(Debug, Clone)]
pub struct SatelliteAllowList {
    addresses: HashSet<String>,
}

impl SatelliteAllowList {
    /// Build the allow-list from configured node URLs, reducing each to
    /// its bare `host:port` address.
    pub fn from_node_urls<S: AsRef<str>>(urls: &[S]) -> Result<Self, GrantError> {
        let mut addresses = HashSet::with_capacity(urls.len());
        for url in urls {
            addresses.insert(NodeUrl::parse(url.as_ref())?.address);
        }
        Ok(Self { addresses })
    }

    /// Whether a grant from this satellite is permitted.
    pub fn permits(&self, satellite: &NodeUrl) -> bool {
        self.addresses.contains(&satellite.address)
    }

    /// Number of allow-listed satellites.
    pub fn len(&self) -> usize {
        self.addresses.len()
    }

    /// Whether the allow-list is empty (and will therefore reject every
    /// deposit).
    pub fn is_empty(&self) -> bool {
        self.addresses.is_empty()
    }
}
