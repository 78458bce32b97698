//! Allow-lists and access evaluation.
//!
//! A record's access-control list is persisted as one delimited string.
//! [`AllowList`] keeps that string verbatim and parses it once into an
//! ordered sequence of parties. Parsing rules:
//!
//! - split on [`DELIMITER`]
//! - trim surrounding whitespace from each entry
//! - drop entries that are empty after trimming
//! - keep order and duplicates, never case-fold
//!
//! Matching is exact string equality against the trimmed entries.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::PartyId;

/// Separator between party identifiers in a persisted allow-list.
pub const DELIMITER: char = ',';

/// Iterate the effective entries of a raw allow-list.
fn entries(raw: &str) -> impl Iterator<Item = &str> {
    raw.split(DELIMITER)
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Decide whether `party` appears in the raw allow-list `allowed`.
///
/// Pure and side-effect free. An empty party never matches, because empty
/// entries are discarded during parsing.
pub fn is_authorized(allowed: &str, party: &str) -> bool {
    entries(allowed).any(|entry| entry == party)
}

/// The parsed access-control list of a record.
///
/// Serializes back to exactly the string it was built from, so a stored
/// record round-trips byte-for-byte.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct AllowList {
    raw: String,
    parties: Vec<PartyId>,
}

impl AllowList {
    /// Parse a delimited allow-list.
    pub fn parse(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let parties = entries(&raw).map(PartyId::from).collect();
        Self { raw, parties }
    }

    /// Check whether `party` may resolve the record.
    pub fn permits(&self, party: &PartyId) -> bool {
        self.parties.iter().any(|p| p == party)
    }

    /// The effective entries, in listed order.
    pub fn parties(&self) -> &[PartyId] {
        &self.parties
    }

    /// Number of effective entries (duplicates counted).
    pub fn len(&self) -> usize {
        self.parties.len()
    }

    /// True when no party can resolve the record.
    pub fn is_empty(&self) -> bool {
        self.parties.is_empty()
    }

    /// The persisted string, unchanged.
    pub fn as_raw(&self) -> &str {
        &self.raw
    }
}

impl From<String> for AllowList {
    fn from(raw: String) -> Self {
        Self::parse(raw)
    }
}

impl From<&str> for AllowList {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<AllowList> for String {
    fn from(list: AllowList) -> Self {
        list.raw
    }
}

impl fmt::Debug for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.parties.iter()).finish()
    }
}

impl fmt::Display for AllowList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
