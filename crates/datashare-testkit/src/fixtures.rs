//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use bytes::Bytes;

use datashare_core::{PartyId, Record, RecordId};
use datashare_registry::{Registry, RegistryConfig};
use datashare_store::MemoryStore;

/// A registry over a fresh in-memory store.
pub struct TestFixture {
    pub registry: Registry<MemoryStore>,
}

impl TestFixture {
    /// Create a fixture with the default configuration.
    pub fn new() -> Self {
        Self::with_config(RegistryConfig::default())
    }

    /// Create a fixture with a custom configuration.
    pub fn with_config(config: RegistryConfig) -> Self {
        Self {
            registry: Registry::new(MemoryStore::new(), config),
        }
    }

    /// Publish a record whose pointer is the content address of `content`.
    pub async fn publish(
        &self,
        id: &str,
        owner: &str,
        content: &[u8],
        allowed: &str,
    ) -> datashare_registry::Result<Record> {
        let record = Record::new(id, owner, content_pointer(content), "fixture", allowed);
        self.registry.create(&record).await?;
        Ok(record)
    }

    /// Publish every record in order, stopping at the first failure.
    pub async fn publish_all(&self, records: &[Record]) -> datashare_registry::Result<()> {
        for record in records {
            self.registry.create(record).await?;
        }
        Ok(())
    }

    /// Write raw bytes straight into the substrate, bypassing the registry.
    pub async fn plant_raw(&self, key: &str, value: &'static [u8]) -> datashare_store::Result<()> {
        use datashare_store::Substrate;
        self.registry
            .store()
            .put(key, Bytes::from_static(value))
            .await
    }

    /// Ids visible to `party` via enumeration, in order.
    pub async fn visible_ids(&self, party: &str) -> datashare_registry::Result<Vec<RecordId>> {
        let records = self.registry.enumerate(&PartyId::from(party)).await?;
        Ok(records.into_iter().map(|r| r.id).collect())
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A content-address pointer for `content`: `b3:` plus the hex Blake3 digest.
pub fn content_pointer(content: &[u8]) -> String {
    format!("b3:{}", hex::encode(blake3::hash(content).as_bytes()))
}

/// A small multi-party data set.
///
/// | id         | allowed                 |
/// |------------|-------------------------|
/// | `lab-001`  | `HospB`                 |
/// | `lab-002`  | `HospC, HospD`          |
/// | `mri-001`  | ` HospB , HospC `       |
/// | `sealed`   | (empty)                 |
pub fn sample_records() -> Vec<Record> {
    vec![
        Record::new(
            "lab-001",
            "HospA",
            content_pointer(b"blood panel"),
            "Blood panel",
            "HospB",
        ),
        Record::new(
            "lab-002",
            "HospA",
            content_pointer(b"lipid panel"),
            "Lipid panel",
            "HospC, HospD",
        ),
        Record::new(
            "mri-001",
            "HospA",
            content_pointer(b"knee mri"),
            "Knee MRI",
            " HospB , HospC ",
        ),
        Record::new("sealed", "HospA", content_pointer(b"sealed"), "Nobody", ""),
    ]
}
