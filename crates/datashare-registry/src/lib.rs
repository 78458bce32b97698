//! # Datashare Registry
//!
//! An access-controlled data-sharing registry. One party publishes a pointer
//! to externally stored content together with a description and the list of
//! parties allowed to resolve it. Other parties can check or fetch the
//! pointer only if they are on that list.
//!
//! ## Overview
//!
//! - **Create**: publish a record under a fresh id (create-once)
//! - **CheckAccess**: is this party on the record's allow-list?
//! - **Read**: fetch the full record, if the requester is allowed
//! - **Enumerate**: every record the requester is allowed to read
//!
//! ## Key Concepts
//!
//! - **Record**: Immutable once created. There is no update or delete.
//! - **Allow-list**: Comma-separated parties, trimmed, matched exactly.
//! - **Owner**: A label on the record. It does not grant access.
//! - **Caller identity**: Taken as given. Authenticating it is the job of
//!   whatever invokes the registry.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use datashare_registry::{Registry, RegistryConfig};
//! use datashare_registry::core::{PartyId, Record, RecordId};
//! use datashare_registry::store::SqliteStore;
//!
//! async fn example() {
//!     let store = SqliteStore::open("registry.db").unwrap();
//!     let registry = Registry::new(store, RegistryConfig::default());
//!
//!     let record = Record::new("rec1", "HospA", "hash123", "notes", "HospB, HospC");
//!     registry.create(&record).await.unwrap();
//!
//!     let id = RecordId::from("rec1");
//!     assert!(registry.check_access(&id, &PartyId::from("HospB")).await.unwrap());
//!
//!     let fetched = registry.read(&id, &PartyId::from("HospC")).await.unwrap();
//!     assert_eq!(fetched.pointer, "hash123");
//!
//!     let visible = registry.enumerate(&PartyId::from("HospB")).await.unwrap();
//!     assert_eq!(visible.len(), 1);
//! }
//! ```
//!
//! ## Re-exports
//!
//! - `datashare_registry::core` - Data model and access evaluation
//! - `datashare_registry::store` - Substrate trait and backends

pub mod dispatch;
pub mod error;
pub mod registry;

// Re-export component crates
pub use datashare_core as core;
pub use datashare_store as store;

// Re-export main types for convenience
pub use dispatch::{DispatchError, Invocation};
pub use error::{ErrorKind, RegistryError, Result};
pub use registry::{Registry, RegistryConfig};

// Re-export commonly used core types
pub use datashare_core::{is_authorized, AllowList, Encoding, PartyId, Record, RecordId};
