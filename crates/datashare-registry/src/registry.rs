//! The Registry: access-controlled records over a substrate.
//!
//! Four operations, one access rule. `check_access`, `read` and
//! `enumerate` all decide membership through [`Record::is_accessible_by`],
//! so for any record and party they agree.

use std::sync::Arc;

use datashare_core::{Encoding, PartyId, Record, RecordId};
use datashare_store::{KeyRange, Substrate};

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryConfig {
    /// How records are encoded as substrate values.
    pub encoding: Encoding,
}

/// The main Registry struct.
///
/// Provides:
/// - Create-once publication of records
/// - Membership checks against a record's allow-list
/// - Authorized single-record reads
/// - Authorized enumeration over the whole store
///
/// The registry holds no state of its own beyond its configuration; each
/// call runs to completion against the substrate. Concurrency control and
/// isolation between writers are the substrate's job.
pub struct Registry<S: Substrate> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: RegistryConfig,
}

impl<S: Substrate> Registry<S> {
    /// Create a new registry instance.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write Path
    // ─────────────────────────────────────────────────────────────────────────

    /// Publish a new record under its id.
    ///
    /// Fails with `Duplicate` if anything is already stored under the id,
    /// even a byte-identical record. Exactly one substrate write on success,
    /// none on failure.
    pub async fn create(&self, record: &Record) -> Result<()> {
        let key = record.id.as_str();

        if self.store.has(key).await? {
            tracing::warn!(record_id = %record.id, "rejected duplicate record");
            return Err(RegistryError::Duplicate(record.id.clone()));
        }

        let value = self
            .config
            .encoding
            .encode(record)
            .map_err(RegistryError::Serialization)?;

        self.store.put(key, value).await?;

        tracing::info!(
            record_id = %record.id,
            owner = %record.owner,
            allowed = record.allowed.len(),
            "record created"
        );
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read Path
    // ─────────────────────────────────────────────────────────────────────────

    /// Check whether `party` may read record `id`.
    pub async fn check_access(&self, id: &RecordId, party: &PartyId) -> Result<bool> {
        let record = self.load(id).await?;
        let granted = record.is_accessible_by(party);

        tracing::debug!(record_id = %id, party = %party, granted, "access evaluated");
        Ok(granted)
    }

    /// Read record `id` on behalf of `requester`.
    ///
    /// An unauthorized requester gets `Forbidden` and nothing else: no field
    /// of the record leaves this function.
    pub async fn read(&self, id: &RecordId, requester: &PartyId) -> Result<Record> {
        let record = self.load(id).await?;

        if !record.is_accessible_by(requester) {
            tracing::warn!(record_id = %id, party = %requester, "read denied");
            return Err(RegistryError::Forbidden {
                id: id.clone(),
                party: requester.clone(),
            });
        }

        tracing::debug!(record_id = %id, party = %requester, "record read");
        Ok(record)
    }

    /// List every record `requester` may read, in substrate key order.
    ///
    /// Scans the whole keyspace. The first undecodable value aborts the
    /// whole listing.
    pub async fn enumerate(&self, requester: &PartyId) -> Result<Vec<Record>> {
        let mut scan = self.store.scan_range(&KeyRange::full()).await?;

        let mut visible = Vec::new();
        for entry in scan.by_ref() {
            let pair = entry?;
            let record = self.decode(&pair.key, &pair.value)?;
            if record.is_accessible_by(requester) {
                visible.push(record);
            }
        }

        let scanned = scan.yielded();
        scan.close();

        tracing::info!(
            party = %requester,
            scanned,
            visible = visible.len(),
            "records enumerated"
        );
        Ok(visible)
    }

    /// Fetch and decode a record, or `NotFound`.
    async fn load(&self, id: &RecordId) -> Result<Record> {
        let bytes = self
            .store
            .get(id.as_str())
            .await?
            .ok_or_else(|| RegistryError::NotFound(id.clone()))?;

        self.decode(id.as_str(), &bytes)
    }

    fn decode(&self, key: &str, bytes: &[u8]) -> Result<Record> {
        self.config.encoding.decode(bytes).map_err(|source| {
            tracing::warn!(key, error = %source, "stored value is not a record");
            RegistryError::Corrupt {
                key: key.to_owned(),
                source,
            }
        })
    }
}
