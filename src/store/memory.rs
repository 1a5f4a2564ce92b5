//! In-memory record store.

use super::{sort_newest_first, RecordStore, Session};
use crate::error::{Result, StoreErrorKind, TrackboardError};
use crate::model::{Record, RecordId};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Records held in memory. Useful for tests and demos; `fail_deletes` and
/// `fail_fetches` simulate an unavailable backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<Vec<Record>>,
    fail_deletes: AtomicBool,
    fail_fetches: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new(records: Vec<Record>) -> Self {
        Self {
            records: Mutex::new(records),
            ..Self::default()
        }
    }

    /// Make subsequent deletes fail.
    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    /// Make subsequent fetches fail.
    pub fn set_fail_fetches(&self, fail: bool) {
        self.fail_fetches.store(fail, Ordering::SeqCst);
    }

    /// Number of records currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Record>> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RecordStore for MemoryStore {
    fn fetch_all(&self, _session: &Session) -> Result<Vec<Record>> {
        if self.fail_fetches.load(Ordering::SeqCst) {
            return Err(TrackboardError::store(
                "fetching records",
                StoreErrorKind::Unavailable("simulated outage".into()),
            ));
        }
        let mut records = self.lock().clone();
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn delete(&self, _session: &Session, id: RecordId) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(TrackboardError::store(
                format!("deleting record {id}"),
                StoreErrorKind::Unavailable("simulated outage".into()),
            ));
        }
        let mut records = self.lock();
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(TrackboardError::store(
                format!("deleting record {id}"),
                StoreErrorKind::NotFound(id.0),
            ));
        }
        Ok(())
    }

    fn name(&self) -> String {
        "memory".to_string()
    }
}
