//! Strong type definitions for the Datashare registry.
//!
//! Identifiers are opaque strings, wrapped in newtypes so a record id can
//! never be passed where a party is expected.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a record, chosen by its creator.
///
/// Used verbatim as the storage key. Uniqueness is enforced by the store,
/// never derived from content.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(String);

impl RecordId {
    /// Create a new RecordId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({:?})", self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RecordId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a party (publisher or reader).
///
/// The registry takes this as given: binding it to an authenticated caller
/// is the job of whatever layer invokes the registry.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PartyId(String);

impl PartyId {
    /// Create a new PartyId.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PartyId({:?})", self.0)
    }
}

impl fmt::Display for PartyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PartyId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PartyId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for PartyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_id_display() {
        let id = RecordId::from("rec1");
        assert_eq!(format!("{}", id), "rec1");
        assert_eq!(id.as_str(), "rec1");
    }

    #[test]
    fn test_party_id_debug() {
        let party = PartyId::new("HospB");
        let debug = format!("{:?}", party);
        assert_eq!(debug, "PartyId(\"HospB\")");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id = RecordId::from("rec1");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"rec1\"");

        let party: PartyId = serde_json::from_str("\"HospC\"").unwrap();
        assert_eq!(party, PartyId::from("HospC"));
    }

    #[test]
    fn test_record_id_ordering_is_bytewise() {
        let mut ids = vec![
            RecordId::from("b"),
            RecordId::from("B"),
            RecordId::from("a"),
            RecordId::from("a1"),
        ];
        ids.sort();
        let sorted: Vec<&str> = ids.iter().map(RecordId::as_str).collect();
        assert_eq!(sorted, vec!["B", "a", "a1", "b"]);
    }
}
