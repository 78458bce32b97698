//! Persisted encodings for records.
//!
//! Both encodings are self-describing and keyed by field name:
//!
//! - `Json`: the form existing deployments write (serde_json)
//! - `Cbor`: a string-keyed CBOR map with the same field names (ciborium)

use bytes::Bytes;

use crate::error::CoreError;
use crate::record::Record;

/// How records are encoded as substrate values.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    #[default]
    Json,
    Cbor,
}

impl Encoding {
    /// Encode a record for storage.
    pub fn encode(self, record: &Record) -> Result<Bytes, CoreError> {
        match self {
            Encoding::Json => serde_json::to_vec(record)
                .map(Bytes::from)
                .map_err(|e| CoreError::Encode(e.to_string())),
            Encoding::Cbor => {
                let mut buf = Vec::new();
                ciborium::into_writer(record, &mut buf)
                    .map_err(|e| CoreError::Encode(e.to_string()))?;
                Ok(Bytes::from(buf))
            }
        }
    }

    /// Decode a stored value into a record.
    pub fn decode(self, bytes: &[u8]) -> Result<Record, CoreError> {
        match self {
            Encoding::Json => {
                serde_json::from_slice(bytes).map_err(|e| CoreError::Decode(e.to_string()))
            }
            Encoding::Cbor => {
                ciborium::from_reader(bytes).map_err(|e| CoreError::Decode(e.to_string()))
            }
        }
    }

    /// Short name, for logs.
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Json => "json",
            Encoding::Cbor => "cbor",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PartyId;

    fn sample() -> Record {
        Record::new("rec1", "HospA", "hash123", "notes", " HospB,HospC ,, ")
    }

    #[test]
    fn test_allow_list_string_survives_both_encodings() {
        for encoding in [Encoding::Json, Encoding::Cbor] {
            let bytes = encoding.encode(&sample()).unwrap();
            let decoded = encoding.decode(&bytes).unwrap();

            assert_eq!(decoded, sample(), "{} changed the record", encoding.name());
            assert_eq!(decoded.allowed.as_raw(), " HospB,HospC ,, ");
        }
    }

    #[test]
    fn test_json_is_plain_object() {
        let bytes = Encoding::Json.encode(&sample()).unwrap();
        let text = std::str::from_utf8(&bytes).unwrap();
        assert!(text.starts_with("{\"dataID\":\"rec1\""));
    }

    #[test]
    fn test_garbage_fails_to_decode() {
        let result = Encoding::Json.decode(b"not json");
        assert!(matches!(result, Err(CoreError::Decode(_))));

        let result = Encoding::Cbor.decode(&[0xff, 0x00, 0x13]);
        assert!(matches!(result, Err(CoreError::Decode(_))));
    }

    #[test]
    fn test_missing_field_fails_to_decode() {
        let json = br#"{"dataID":"rec1","hospitalA":"HospA","ipfsHash":"h","description":"d"}"#;
        assert!(matches!(Encoding::Json.decode(json), Err(CoreError::Decode(_))));
    }

    #[test]
    fn test_encodings_are_not_interchangeable() {
        let cbor = Encoding::Cbor.encode(&sample()).unwrap();
        assert!(Encoding::Json.decode(&cbor).is_err());
    }

    #[test]
    fn test_decoded_record_evaluates_access() {
        let bytes = Encoding::Cbor.encode(&sample()).unwrap();
        let record = Encoding::Cbor.decode(&bytes).unwrap();
        assert!(record.is_accessible_by(&PartyId::from("HospC")));
        assert!(!record.is_accessible_by(&PartyId::from("HospA")));
    }
}
