//! # Datashare Core
//!
//! Pure primitives for the Datashare registry: records, allow-lists, and
//! the record codec.
//!
//! This crate contains no I/O, no storage, no networking. It is pure
//! computation over the record data model.
//!
//! ## Key Types
//!
//! - [`Record`] - A published pointer plus the parties allowed to resolve it
//! - [`RecordId`] - Creator-chosen identifier, used as the storage key
//! - [`PartyId`] - Opaque identifier of a participating party
//! - [`AllowList`] - The parsed access-control list of a record
//! - [`Encoding`] - Self-describing persisted form of a record
//!
//! ## Access Evaluation
//!
//! Membership is decided by [`is_authorized`]: split the allow-list on `,`,
//! trim each entry, and compare exactly (case-sensitive). Every read path in
//! the registry goes through this one definition.

pub mod acl;
pub mod codec;
pub mod error;
pub mod record;
pub mod types;

pub use acl::{is_authorized, AllowList, DELIMITER};
pub use codec::Encoding;
pub use error::CoreError;
pub use record::Record;
pub use types::{PartyId, RecordId};
