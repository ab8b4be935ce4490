//! # credvault
//!
//! Credential database for a decentralized object-storage gateway.
//!
//! Users deposit an access grant encrypted under a short encryption key
//! and receive a service-minted signing secret; an S3 gateway that later
//! proves knowledge of the encryption key gets the decrypted grant and the
//! secret back. This crate is the database at the center of that exchange:
//! it validates grants against a satellite allow-list, seals them in an
//! AES-GCM envelope, and stores them in a pluggable key/value backend
//! keyed by the SHA-256 hash of the encryption key.
//!
//! The HTTP front-end, TLS termination, and process launcher live
//! elsewhere; they drive the five operations on [`Database`] and map
//! [`Error`] kinds onto their own status codes.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod allowlist;
pub mod config;
pub mod database;
pub mod errors;

pub use allowlist::SatelliteAllowList;
pub use config::Config;
pub use database::{AccessEntry, Database};
pub use errors::{Error, Result};

// The types callers exchange with the database.
pub use credvault_crypto::{EncryptionKey, KeyHash, SecretKey};
pub use credvault_storage::{KeyValueStore, MemoryStore, Record};
