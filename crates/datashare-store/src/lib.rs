//! # Datashare Store
//!
//! The substrate contract for the Datashare registry: a key-value store
//! with ordered range scans. Provides a trait-based interface with SQLite
//! and in-memory implementations.
//!
//! ## Overview
//!
//! The registry never touches storage directly. It asks the [`Substrate`]
//! for four things: get a value, put a value, check existence, and scan a
//! key range in order. Durability, ordering across writers and isolation
//! all belong to the backend.
//!
//! ## Key Types
//!
//! - [`Substrate`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`KeyRange`] - Half-open key interval, empty bounds are open
//! - [`RangeScan`] - Owned, ordered scan result, released on drop
//!
//! ## Usage
//!
//! ```rust,no_run
//! use bytes::Bytes;
//! use datashare_store::{KeyRange, SqliteStore, Substrate};
//!
//! async fn example() {
//!     let store = SqliteStore::open("registry.db").unwrap();
//!
//!     store.put("rec1", Bytes::from_static(b"{}")).await.unwrap();
//!     assert!(store.has("rec1").await.unwrap());
//!
//!     let scan = store.scan_range(&KeyRange::full()).await.unwrap();
//!     for entry in scan {
//!         let pair = entry.unwrap();
//!         println!("{} => {} bytes", pair.key, pair.value.len());
//!     }
//! }
//! ```
//!
//! ## Design Notes
//!
//! - **Byte-wise key order**: both backends order keys by their UTF-8 bytes
//! - **Snapshot scans**: a scan reads one consistent view of the range
//! - **Plain puts**: `put` overwrites; create-once is the registry's rule

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{KeyRange, KvPair, RangeScan, Substrate};
