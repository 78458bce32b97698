//! In-memory implementation of the Substrate trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::BTreeMap;
use std::ops::Bound;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::{Result, StoreError};
use crate::traits::{check_key, KeyRange, KvPair, RangeScan, Substrate};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
/// Keys live in a `BTreeMap`, which orders `String` keys byte-wise.
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Bytes>>,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
        }
    }

    /// Number of stored entries.
    pub fn len(&self) -> Result<usize> {
        Ok(self.read()?.len())
    }

    /// Whether the store holds no entries.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.read()?.is_empty())
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, BTreeMap<String, Bytes>>> {
        self.entries
            .read()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, BTreeMap<String, Bytes>>> {
        self.entries
            .write()
            .map_err(|e| StoreError::Unavailable(format!("lock poisoned: {}", e)))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Substrate for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        Ok(self.read()?.get(key).cloned())
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        check_key(key)?;
        self.write()?.insert(key.to_owned(), value);
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        Ok(self.read()?.contains_key(key))
    }

    async fn scan_range(&self, range: &KeyRange) -> Result<RangeScan> {
        let entries = self.read()?;

        let lower = if range.start.is_empty() {
            Bound::Unbounded
        } else {
            Bound::Included(range.start.as_str())
        };

        // Snapshot under the read lock; the lock is gone before the caller iterates.
        let snapshot: Vec<Result<KvPair>> = entries
            .range::<str, _>((lower, Bound::Unbounded))
            .take_while(|(key, _)| range.end.is_empty() || key.as_str() < range.end.as_str())
            .map(|(key, value)| {
                Ok(KvPair {
                    key: key.clone(),
                    value: value.clone(),
                })
            })
            .collect();

        Ok(RangeScan::new(range.clone(), snapshot))
    }
}
