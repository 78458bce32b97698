//! Error types for the Registry.

use datashare_core::{CoreError, PartyId, RecordId};
use datashare_store::StoreError;
use thiserror::Error;

/// Errors that can occur during Registry operations.
///
/// Every error ends the operation that raised it. Nothing is retried here.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The substrate failed a read, write or scan.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// A record could not be encoded for storage.
    #[error("serialization error: {0}")]
    Serialization(#[source] CoreError),

    /// A stored value could not be decoded into a record.
    #[error("corrupt record under key {key}: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: CoreError,
    },

    /// A record with this id already exists.
    #[error("record {0} already exists")]
    Duplicate(RecordId),

    /// No record with this id.
    #[error("record {0} does not exist")]
    NotFound(RecordId),

    /// The requesting party is not on the record's allow-list.
    ///
    /// Carries only what the caller already supplied.
    #[error("party {party} is not permitted to read record {id}")]
    Forbidden { id: RecordId, party: PartyId },
}

/// The error conditions a caller can distinguish.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    SubstrateIo,
    Serialization,
    DuplicateRecord,
    NotFound,
    Forbidden,
}

impl RegistryError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            RegistryError::Store(_) => ErrorKind::SubstrateIo,
            RegistryError::Serialization(_) | RegistryError::Corrupt { .. } => {
                ErrorKind::Serialization
            }
            RegistryError::Duplicate(_) => ErrorKind::DuplicateRecord,
            RegistryError::NotFound(_) => ErrorKind::NotFound,
            RegistryError::Forbidden { .. } => ErrorKind::Forbidden,
        }
    }
}

/// Result type for Registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
