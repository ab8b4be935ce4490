//! The database facade: the five operations everything else drives.

use credvault_crypto::{envelope, EncryptionKey, SecretKey};
use credvault_grant::AccessGrant;
use credvault_storage::{KeyValueStore, Record};

use crate::allowlist::SatelliteAllowList;
use crate::errors::{Error, Result};

/// What a successful [`Database::get`] hands back to the gateway.
#[derive(Debug)]
pub struct AccessEntry {
    /// The decrypted access grant, exactly as deposited.
    pub access_grant: String,
    /// Whether the grant was deposited with publicly-shareable intent.
    pub public: bool,
    /// The signing secret minted at deposit time.
    pub secret_key: SecretKey,
}

/// The credential database: validates, encrypts, and stores deposited
/// access grants, keyed by the hash of the user's encryption key.
///
/// Thread-safe for concurrent calls with distinct encryption keys; there
/// are no internal locks. Safety derives from the store's atomic
/// put-if-absent contract and the allow-list being immutable.
pub struct Database<S> {
    store: S,
    allowed_satellites: SatelliteAllowList,
}

impl<S: KeyValueStore> Database<S> {
    /// Construct the database over a store and an already-built
    /// allow-list.
    pub fn new(store: S, allowed_satellites: SatelliteAllowList) -> Self {
        Self {
            store,
            allowed_satellites,
        }
    }

    /// Deposit an access grant encrypted under `key`; returns the minted
    /// signing secret.
    ///
    /// `AlreadyExists` means this encryption key has been used before;
    /// the caller must retry with a fresh one. Nothing about the previous
    /// deposit is disclosed.
    pub async fn put(
        &self,
        key: &EncryptionKey,
        access_grant: &str,
        public: bool,
    ) -> Result<SecretKey> {
        let grant = AccessGrant::parse(access_grant)?;

        let satellite = grant.satellite_address();
        if !self.allowed_satellites.permits(satellite) {
            return Err(Error::DisallowedSatellite(satellite.to_string()));
        }

        let secret_key = SecretKey::generate()?;
        let encrypted_secret_key = envelope::encrypt_secret_key(key, &secret_key)?;
        let encrypted_access_grant = envelope::encrypt_access_grant(key, access_grant.as_bytes())?;

        // TODO: verify the API key against the satellite before accepting
        // the grant.
        let record = Record {
            satellite_address: satellite.to_string(),
            macaroon_head: grant.api_key().head().to_vec(),
            encrypted_secret_key,
            encrypted_access_grant,
            public,
        };

        let key_hash = key.hash();
        self.store.put(key_hash, record).await?;

        tracing::info!(
            key_hash = %key_hash.abbrev(),
            satellite = %satellite.address,
            public,
            "access grant deposited"
        );

        Ok(secret_key)
    }

    /// Retrieve and decrypt the record deposited under `key`.
    ///
    /// Absent and invalidated records are indistinguishable: both are
    /// `NotFound`. An AEAD failure is `Corrupt`: tampering or a wrong
    /// key, never misdirected to another record.
    pub async fn get(&self, key: &EncryptionKey) -> Result<AccessEntry> {
        let key_hash = key.hash();
        let record = self
            .store
            .get(&key_hash)
            .await?
            .ok_or(Error::NotFound)?;

        let secret_key = envelope::decrypt_secret_key(key, &record.encrypted_secret_key)?;
        let grant_bytes = envelope::decrypt_access_grant(key, &record.encrypted_access_grant)?;
        let access_grant = String::from_utf8(grant_bytes).map_err(|_| Error::Corrupt)?;

        tracing::debug!(key_hash = %key_hash.abbrev(), "access grant retrieved");

        Ok(AccessEntry {
            access_grant,
            public: record.public,
            secret_key,
        })
    }

    /// Remove the record deposited under `key`. Succeeds whether or not
    /// one existed.
    pub async fn delete(&self, key: &EncryptionKey) -> Result<()> {
        let key_hash = key.hash();
        self.store.delete(&key_hash).await?;
        tracing::info!(key_hash = %key_hash.abbrev(), "record deleted");
        Ok(())
    }

    /// Mark the record deposited under `key` as invalid. Later `get` calls
    /// return `NotFound`; the stored reason stays auditable in the
    /// backend.
    pub async fn invalidate(&self, key: &EncryptionKey, reason: &str) -> Result<()> {
        let key_hash = key.hash();
        self.store.invalidate(&key_hash, reason).await?;
        tracing::info!(key_hash = %key_hash.abbrev(), reason, "record invalidated");
        Ok(())
    }

    /// Round-trip the backing store.
    pub async fn ping(&self) -> Result<()> {
        self.store.ping().await?;
        Ok(())
    }
}
