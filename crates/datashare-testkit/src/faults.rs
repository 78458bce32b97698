//! Fault injection for substrate-failure tests.
//!
//! [`FaultyStore`] wraps any substrate, fails the operations you arm, and
//! counts scans that have been handed out but not yet released.

use std::collections::HashSet;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::Bytes;

use datashare_store::{KeyRange, KvPair, RangeScan, Result, StoreError, Substrate};

/// An operation that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Fault {
    Get,
    Put,
    Has,
    /// Fail before the scan starts.
    Scan,
    /// Fail when the scan reaches this zero-based entry.
    ScanEntry(usize),
}

/// A substrate wrapper with switchable failures.
pub struct FaultyStore<S> {
    inner: S,
    armed: Mutex<HashSet<Fault>>,
    open_scans: Arc<AtomicUsize>,
    puts: AtomicUsize,
}

impl<S: Substrate> FaultyStore<S> {
    /// Wrap `inner` with no faults armed.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            armed: Mutex::new(HashSet::new()),
            open_scans: Arc::new(AtomicUsize::new(0)),
            puts: AtomicUsize::new(0),
        }
    }

    /// Make `fault` fire on every matching call until cleared.
    pub fn arm(&self, fault: Fault) {
        self.armed_set().insert(fault);
    }

    /// Disarm everything.
    pub fn clear(&self) {
        self.armed_set().clear();
    }

    /// Scans handed out and not yet dropped.
    pub fn open_scans(&self) -> usize {
        self.open_scans.load(Ordering::SeqCst)
    }

    /// Successful puts forwarded to the inner store.
    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    /// The wrapped substrate.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    fn armed_set(&self) -> std::sync::MutexGuard<'_, HashSet<Fault>> {
        // A panicking test thread may poison the lock; the set is still usable.
        self.armed.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn is_armed(&self, fault: Fault) -> bool {
        self.armed_set().contains(&fault)
    }

    fn fail_at_entry(&self) -> Option<usize> {
        self.armed_set().iter().find_map(|f| match f {
            Fault::ScanEntry(n) => Some(*n),
            _ => None,
        })
    }
}

fn injected(op: &str) -> StoreError {
    StoreError::Io(io::Error::other(format!("injected {op} failure")))
}

/// Counts itself open until dropped.
struct ScanTicket(Arc<AtomicUsize>);

impl Drop for ScanTicket {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct TrackedEntries {
    inner: RangeScan,
    fail_at: Option<usize>,
    index: usize,
    _ticket: ScanTicket,
}

impl Iterator for TrackedEntries {
    type Item = Result<KvPair>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.fail_at == Some(self.index) {
            self.index += 1;
            return Some(Err(injected("scan entry")));
        }
        self.index += 1;
        self.inner.next()
    }
}

#[async_trait]
impl<S: Substrate> Substrate for FaultyStore<S> {
    async fn get(&self, key: &str) -> Result<Option<Bytes>> {
        if self.is_armed(Fault::Get) {
            return Err(injected("get"));
        }
        self.inner.get(key).await
    }

    async fn put(&self, key: &str, value: Bytes) -> Result<()> {
        if self.is_armed(Fault::Put) {
            return Err(injected("put"));
        }
        self.inner.put(key, value).await?;
        self.puts.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn has(&self, key: &str) -> Result<bool> {
        if self.is_armed(Fault::Has) {
            return Err(injected("has"));
        }
        self.inner.has(key).await
    }

    async fn scan_range(&self, range: &KeyRange) -> Result<RangeScan> {
        if self.is_armed(Fault::Scan) {
            return Err(injected("scan"));
        }
        let inner = self.inner.scan_range(range).await?;

        self.open_scans.fetch_add(1, Ordering::SeqCst);
        let tracked = TrackedEntries {
            inner,
            fail_at: self.fail_at_entry(),
            index: 0,
            _ticket: ScanTicket(Arc::clone(&self.open_scans)),
        };

        Ok(RangeScan::new(range.clone(), tracked))
    }
}
