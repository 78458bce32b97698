//! The record: the only entity in the registry.
//!
//! A record is created once and never changed. Its field names on disk are
//! the ones existing deployments already write, so stored data stays
//! readable.

use serde::{Deserialize, Serialize};

use crate::acl::AllowList;
use crate::types::{PartyId, RecordId};

/// A published pointer to externally stored content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// Unique identifier, also the storage key.
    #[serde(rename = "dataID")]
    pub id: RecordId,

    /// The publishing party. A label only: it grants no access.
    #[serde(rename = "hospitalA")]
    pub owner: PartyId,

    /// Opaque content location (e.g. a content hash).
    #[serde(rename = "ipfsHash")]
    pub pointer: String,

    /// Free text.
    pub description: String,

    /// Parties permitted to resolve the pointer.
    #[serde(rename = "allowedHospitals")]
    pub allowed: AllowList,
}

impl Record {
    /// Create a new record.
    pub fn new(
        id: impl Into<RecordId>,
        owner: impl Into<PartyId>,
        pointer: impl Into<String>,
        description: impl Into<String>,
        allowed: impl Into<AllowList>,
    ) -> Self {
        Self {
            id: id.into(),
            owner: owner.into(),
            pointer: pointer.into(),
            description: description.into(),
            allowed: allowed.into(),
        }
    }

    /// Check whether `party` may read this record.
    pub fn is_accessible_by(&self, party: &PartyId) -> bool {
        self.allowed.permits(party)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_owner_is_not_implicitly_allowed() {
        let record = Record::new("rec1", "HospA", "hash123", "notes", "HospB, HospC");
        assert!(!record.is_accessible_by(&PartyId::from("HospA")));
        assert!(record.is_accessible_by(&PartyId::from("HospB")));
    }

    #[test]
    fn test_json_field_names() {
        let record = Record::new("rec1", "HospA", "hash123", "notes", "HospB, HospC");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["dataID"], "rec1");
        assert_eq!(value["hospitalA"], "HospA");
        assert_eq!(value["ipfsHash"], "hash123");
        assert_eq!(value["description"], "notes");
        assert_eq!(value["allowedHospitals"], "HospB, HospC");
    }

    #[test]
    fn test_reads_existing_document() {
        let json = r#"{"dataID":"d-7","hospitalA":"HospitalA","ipfsHash":"QmXoyp","description":"MRI","allowedHospitals":"HospitalB,HospitalC"}"#;
        let record: Record = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, RecordId::from("d-7"));
        assert_eq!(record.pointer, "QmXoyp");
        assert_eq!(record.allowed.len(), 2);
        assert!(record.is_accessible_by(&PartyId::from("HospitalC")));
    }
}
