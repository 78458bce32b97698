//! Substrate trait: the abstract interface the registry persists through.
//!
//! This trait allows the registry to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, StoreError};

/// A half-open key interval `[start, end)`.
///
/// An empty bound is open on that side, so `KeyRange::full()` (both bounds
/// empty) covers the entire keyspace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRange {
    /// Inclusive lower bound, or empty for unbounded.
    pub start: String,
    /// Exclusive upper bound, or empty for unbounded.
    pub end: String,
}

impl KeyRange {
    /// A range with explicit bounds.
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
        }
    }

    /// The entire keyspace.
    pub fn full() -> Self {
        Self::default()
    }

    /// Whether `key` falls inside the range.
    pub fn contains(&self, key: &str) -> bool {
        (self.start.is_empty() || key >= self.start.as_str())
            && (self.end.is_empty() || key < self.end.as_str())
    }
}

/// One stored entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KvPair {
    pub key: String,
    pub value: Bytes,
}

/// The result of a range scan: entries in ascending key order.
///
/// Items are fallible because a backend may fail part-way through. The scan
/// owns whatever the backend acquired for it and releases it when dropped,
/// so early returns from a consumer cannot leak it. [`RangeScan::close`]
/// releases explicitly.
pub struct RangeScan {
    range: KeyRange,
    entries: Box<dyn Iterator<Item = Result<KvPair>> + Send>,
    yielded: usize,
}

impl RangeScan {
    /// Wrap backend entries for `range`.
    pub fn new<I>(range: KeyRange, entries: I) -> Self
    where
        I: IntoIterator<Item = Result<KvPair>>,
        I::IntoIter: Send + 'static,
    {
        Self {
            range,
            entries: Box::new(entries.into_iter()),
            yielded: 0,
        }
    }

    /// Number of entries handed out so far.
    pub fn yielded(&self) -> usize {
        self.yielded
    }

    /// Release the scan now.
    pub fn close(self) {}
}

impl Iterator for RangeScan {
    type Item = Result<KvPair>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.entries.next()?;
        self.yielded += 1;
        Some(item)
    }
}

impl Drop for RangeScan {
    fn drop(&mut self) {
        tracing::trace!(
            start = %self.range.start,
            end = %self.range.end,
            yielded = self.yielded,
            "range scan released"
        );
    }
}

impl fmt::Debug for RangeScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeScan")
            .field("range", &self.range)
            .field("yielded", &self.yielded)
            .finish_non_exhaustive()
    }
}

/// The Substrate trait: async interface for keyed persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
///
/// # Design Notes
///
/// - **Non-empty keys**: `put` rejects the empty key with `InvalidKey`.
/// - **Overwrite on put**: the substrate has no create-once rule of its own.
/// - **Ordered scans**: `scan_range` yields ascending byte-wise key order
///   over a single consistent view.
#[async_trait]
pub trait Substrate: Send + Sync {
    /// Get the value stored under `key`, if any.
    async fn get(&self, key: &str) -> Result<Option<Bytes>>;

    /// Store `value` under `key`.
    async fn put(&self, key: &str, value: Bytes) -> Result<()>;

    /// Check whether `key` holds a value.
    async fn has(&self, key: &str) -> Result<bool>;

    /// Scan all entries whose keys fall in `range`.
    async fn scan_range(&self, range: &KeyRange) -> Result<RangeScan>;
}

#[async_trait]
impl<S: Substrate + ?Sized> Substrate for Arc<S> {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        (**self).get(key).await
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        (**self).put(key, value).await
    }

    async fn has(&self, key: &str) -> Result<bool> {
        (**self).has(key).await
    }

    async fn scan_range(&self, range: &KeyRange) -> Result<RangeScan> {
        (**self).scan_range(range).await
    }
}

/// Reject keys the substrate cannot store.
pub(crate) fn check_key(key: &str) -> Result<()> {
    if key.is_empty() {
        return Err(StoreError::InvalidKey("key must not be empty".into()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_range_contains_everything() {
        let range = KeyRange::full();
        assert_eq!(range, KeyRange::new("", ""));
        assert!(range.contains("a"));
        assert!(range.contains("\u{10ffff}"));
    }

    #[test]
    fn test_range_is_half_open() {
        let range = KeyRange::new("b", "d");
        assert!(!range.contains("a"));
        assert!(range.contains("b"));
        assert!(range.contains("c9"));
        assert!(!range.contains("d"));
    }

    #[test]
    fn test_open_bounds() {
        assert!(KeyRange::new("m", "").contains("zzz"));
        assert!(!KeyRange::new("m", "").contains("a"));
        assert!(KeyRange::new("", "m").contains("a"));
        assert!(!KeyRange::new("", "m").contains("m"));
    }

    #[test]
    fn test_scan_counts_yielded_entries() {
        let entries = vec![
            Ok(KvPair {
                key: "a".into(),
                value: Bytes::from_static(b"1"),
            }),
            Ok(KvPair {
                key: "b".into(),
                value: Bytes::from_static(b"2"),
            }),
        ];
        let mut scan = RangeScan::new(KeyRange::full(), entries);

        assert_eq!(scan.next().unwrap().unwrap().key, "a");
        assert_eq!(scan.yielded(), 1);
        scan.close();
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(check_key(""), Err(StoreError::InvalidKey(_))));
        assert!(check_key(" ").is_ok());
    }
}
