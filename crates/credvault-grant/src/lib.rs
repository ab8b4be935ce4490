//! # credvault-grant
//!
//! The access-grant credential format consumed by the credvault database.
//!
//! An access grant is an opaque, version-tagged serialization produced by
//! client tooling. It embeds everything a gateway needs to act on a user's
//! behalf: the satellite address, an API key (a macaroon), and the client's
//! root encryption key. The credential database only ever inspects the
//! satellite address and the API key's head; the rest stays opaque.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod access;
pub mod errors;
pub mod macaroon;
pub mod node_url;

pub use access::{AccessGrant, ACCESS_GRANT_VERSION, ROOT_KEY_LEN};
pub use errors::{GrantError, Result};
pub use macaroon::ApiKey;
pub use node_url::NodeUrl;
