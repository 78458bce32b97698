//! # Datashare Testkit
//!
//! Testing utilities for the Datashare registry.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: A registry over a fresh in-memory store, sample records,
//!   and content-address pointers
//! - **Generators**: Proptest strategies for parties, allow-lists, and records
//! - **Faults**: A substrate wrapper that fails on demand and counts open scans
//!
//! ## Test Fixtures
//!
//! ```rust
//! use datashare_testkit::fixtures::{content_pointer, TestFixture};
//!
//! let fixture = TestFixture::new();
//! let pointer = content_pointer(b"scan.dcm");
//! assert!(pointer.starts_with("b3:"));
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use datashare_testkit::generators::{party_id, record};
//!
//! proptest! {
//!     #[test]
//!     fn listed_party_is_allowed(r in record()) {
//!         for p in r.allowed.parties() {
//!             prop_assert!(r.is_accessible_by(p));
//!         }
//!     }
//! }
//! ```

pub mod faults;
pub mod fixtures;
pub mod generators;

pub use faults::{Fault, FaultyStore};
pub use fixtures::{content_pointer, sample_records, TestFixture};
pub use generators::{allow_list, party_id, record, record_id, record_set};
