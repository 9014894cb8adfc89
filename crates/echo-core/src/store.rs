//! Request storage contract and the in-memory reference store.
//!
//! The engine never performs its own storage I/O; it operates on records a
//! store hands it. The contract requires per-record mutual exclusion for
//! writes: `complete`/`revert`/field edits on one id must never interleave.
//! Reads may observe a slightly stale snapshot.
//!
//! [`MemoryStore`] is the reference implementation, used by the CLI and by
//! tests. Its single mutex is coarser than a per-record lock but satisfies
//! the same guarantee.

use echo_model::{EchoRequest, RequestId};
use std::collections::BTreeMap;
use std::sync::Mutex;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("no request with id {id}")]
    NotFound { id: RequestId },
}

/// Storage collaborator for echo requests, keyed by id.
pub trait RequestStore {
    /// Reserve the next id. Ids are monotonic and never reused, including
    /// after deletion.
    fn allocate_id(&self) -> RequestId;

    /// Insert a newly created record under its (previously allocated) id.
    fn insert(&self, request: EchoRequest);

    fn get(&self, id: RequestId) -> Option<EchoRequest>;

    /// Apply a mutation to one record under the store's write lock. The
    /// closure's error is passed through untouched; the record is only
    /// persisted when it returns `Ok`.
    fn update<E>(
        &self,
        id: RequestId,
        mutate: impl FnOnce(&mut EchoRequest) -> Result<(), E>,
    ) -> Result<Result<(), E>, StoreError>;

    /// Remove a record. The id stays burned.
    fn delete(&self, id: RequestId) -> Result<(), StoreError>;

    /// Snapshot of all records, ordered by id.
    fn snapshot(&self) -> Vec<EchoRequest>;
}

#[derive(Debug)]
struct MemoryStoreInner {
    next_id: u64,
    records: BTreeMap<RequestId, EchoRequest>,
}

impl Default for MemoryStoreInner {
    fn default() -> Self {
        Self {
            next_id: 1,
            records: BTreeMap::new(),
        }
    }
}

/// In-memory store with a monotonic id counter.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryStoreInner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from previously persisted records, continuing the id
    /// sequence from `next_id`. Ids below the counter are never handed out
    /// again even when their records are gone.
    pub fn from_records(next_id: u64, records: impl IntoIterator<Item = EchoRequest>) -> Self {
        let records: BTreeMap<RequestId, EchoRequest> =
            records.into_iter().map(|r| (r.id, r)).collect();
        let highest = records.keys().next_back().map_or(0, |id| id.value());
        Self {
            inner: Mutex::new(MemoryStoreInner {
                next_id: next_id.max(highest + 1),
                records,
            }),
        }
    }

    /// The next id that [`RequestStore::allocate_id`] would return.
    pub fn next_id(&self) -> u64 {
        self.lock().next_id
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, MemoryStoreInner> {
        // A poisoned lock means a panic mid-mutation; the data is a plain
        // map, so continuing with it is safe.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl RequestStore for MemoryStore {
    fn allocate_id(&self) -> RequestId {
        let mut inner = self.lock();
        let id = RequestId::new(inner.next_id);
        inner.next_id += 1;
        id
    }

    fn insert(&self, request: EchoRequest) {
        self.lock().records.insert(request.id, request);
    }

    fn get(&self, id: RequestId) -> Option<EchoRequest> {
        self.lock().records.get(&id).cloned()
    }

    fn update<E>(
        &self,
        id: RequestId,
        mutate: impl FnOnce(&mut EchoRequest) -> Result<(), E>,
    ) -> Result<Result<(), E>, StoreError> {
        let mut inner = self.lock();
        // Mutate a copy; a closure that errors part-way through must leave
        // the stored record untouched.
        let mut record = inner
            .records
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound { id })?;
        let outcome = mutate(&mut record);
        if outcome.is_ok() {
            inner.records.insert(id, record);
        }
        Ok(outcome)
    }

    fn delete(&self, id: RequestId) -> Result<(), StoreError> {
        self.lock()
            .records
            .remove(&id)
            .map(|_| ())
            .ok_or(StoreError::NotFound { id })
    }

    fn snapshot(&self) -> Vec<EchoRequest> {
        self.lock().records.values().cloned().collect()
    }
}
