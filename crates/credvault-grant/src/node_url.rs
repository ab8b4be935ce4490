//! Node URLs: `nodeID@host:port` addresses of storage-network nodes.
//!
//! Satellites are addressed by a node URL whose node-ID component may
//! rotate or differ across environments. The bare `host:port` address is
//! the part operators actually vet, so the allow-list compares addresses
//! after stripping the ID. Records keep the full URL as embedded in the
//! grant.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{GrantError, Result};

/// A parsed node URL: an optional node ID plus a `host:port` address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeUrl {
    /// The node's identity, when the URL carries one.
    pub node_id: Option<String>,
    /// The bare `host:port` network address.
    pub address: String,
}

impl NodeUrl {
    /// Parse a node URL of the form `[nodeID@]host:port`.
    pub fn parse(input: &str) -> Result<Self> {
        let invalid = |reason| GrantError::InvalidNodeUrl {
            url: input.to_string(),
            reason,
        };

        let (node_id, address) = match input.split_once('@') {
            Some((id, addr)) => {
                if id.is_empty() {
                    return Err(invalid("empty node ID before '@'"));
                }
                (Some(id.to_string()), addr)
            }
            None => (None, input),
        };

        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| invalid("missing port"))?;
        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        if port.parse::<u16>().is_err() {
            return Err(invalid("port is not a number"));
        }

        Ok(Self {
            node_id,
            address: address.to_string(),
        })
    }
}

impl FromStr for NodeUrl {
    type Err = GrantError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for NodeUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.node_id {
            Some(id) => write!(f, "{}@{}", id, self.address),
            None => f.write_str(&self.address),
        }
    }
}
