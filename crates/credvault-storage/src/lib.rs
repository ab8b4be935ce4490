//! # credvault-storage
//!
//! The record store contract the credential database is built on, plus an
//! in-memory reference backend.
//!
//! The single non-negotiable in this contract is `put`'s atomicity: the
//! envelope's fixed-nonce discipline is only safe because no encryption
//! key is ever accepted twice. Any backend implementing [`KeyValueStore`]
//! must provide put-if-absent, not upsert.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod memory;
pub mod record;
pub mod traits;

pub use errors::{Result, StorageError};
pub use memory::MemoryStore;
pub use record::Record;
pub use traits::KeyValueStore;
