//! JSON file record store, for offline use and fixtures.

use super::{sort_newest_first, RecordStore, Session};
use crate::error::{ErrorContext, Result, StoreErrorKind, TrackboardError};
use crate::model::{Record, RecordId};
use crate::pipeline::write_bytes_atomic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Records stored as a JSON array in a single file.
///
/// Deletes rewrite the file atomically. The session is accepted but not
/// checked; the file system is the access boundary.
pub struct FileStore {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<Vec<Record>> {
        let content = std::fs::read_to_string(&self.path)
            .map_err(|e| TrackboardError::io(&self.path, e))?;
        serde_json::from_str::<Vec<Record>>(&content)
            .with_context(|| format!("reading {}", self.path.display()))
    }
}

impl RecordStore for FileStore {
    fn fetch_all(&self, _session: &Session) -> Result<Vec<Record>> {
        let mut records = self.read()?;
        sort_newest_first(&mut records);
        Ok(records)
    }

    fn delete(&self, _session: &Session, id: RecordId) -> Result<()> {
        let _guard = self
            .write_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        let mut records = self.read()?;
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(TrackboardError::store(
                format!("deleting from {}", self.path.display()),
                StoreErrorKind::NotFound(id.0),
            ));
        }

        let json = serde_json::to_vec_pretty(&records)?;
        write_bytes_atomic(&self.path, &json).map_err(|e| {
            TrackboardError::store(
                format!("rewriting {}", self.path.display()),
                StoreErrorKind::Unavailable(format!("{e:#}")),
            )
        })
    }

    fn name(&self) -> String {
        self.path.display().to_string()
    }
}
