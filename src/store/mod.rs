//! Upstream collaborators: the record store and the asset source.
//!
//! The dashboard only talks to these through the [`RecordStore`] and
//! [`AssetSource`] traits, so tests and demos can swap the REST backend for
//! a JSON file or an in-memory set.

mod asset;
mod file;
mod memory;
mod rest;

pub use asset::{AssetSource, FileAssetSource, HttpAssetSource};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use rest::{RestStore, RestStoreConfig};

use crate::error::{Result, TrackboardError};
use crate::model::{Record, RecordId};
use std::fmt;

/// Environment variable holding the session's access token.
pub const ACCESS_TOKEN_ENV: &str = "TRACKBOARD_ACCESS_TOKEN";

/// An authenticated session, required for every store operation.
///
/// Obtaining the token (sign-in, refresh) happens elsewhere; the dashboard
/// only needs proof that one exists.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    access_token: String,
}

impl Session {
    /// Wrap an access token. Blank tokens are rejected.
    pub fn new(access_token: impl Into<String>) -> Result<Self> {
        let access_token = access_token.into().trim().to_string();
        if access_token.is_empty() {
            return Err(TrackboardError::session("access token is empty"));
        }
        Ok(Self { access_token })
    }

    /// Read the token from [`ACCESS_TOKEN_ENV`].
    pub fn from_env() -> Result<Self> {
        let token = std::env::var(ACCESS_TOKEN_ENV).map_err(|_| {
            TrackboardError::session(format!("{ACCESS_TOKEN_ENV} is not set"))
        })?;
        Self::new(token)
    }

    #[must_use]
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Source of truth for records.
///
/// # Example
///
/// ```ignore
/// use trackboard::store::{RecordStore, MemoryStore, Session};
///
/// let store = MemoryStore::new(records);
/// let session = Session::new("token")?;
/// let all = store.fetch_all(&session)?;
/// store.delete(&session, all[0].id)?;
/// ```
pub trait RecordStore: Send + Sync {
    /// Fetch every record, newest entry first.
    fn fetch_all(&self, session: &Session) -> Result<Vec<Record>>;

    /// Delete a record by id.
    fn delete(&self, session: &Session, id: RecordId) -> Result<()>;

    /// Short human-readable description of the backend.
    fn name(&self) -> String;
}

/// Order records by entry timestamp, newest first. Records without an entry
/// date go last; ties keep their stored order.
pub(crate) fn sort_newest_first(records: &mut [Record]) {
    records.sort_by(|a, b| b.entry_date.cmp(&a.entry_date));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_rejects_blank() {
        assert!(Session::new("   ").is_err());
        assert!(Session::new("abc").is_ok());
    }

    #[test]
    fn test_session_debug_redacts() {
        let session = Session::new("secret-token").expect("valid");
        let debug = format!("{session:?}");
        assert!(!debug.contains("secret-token"));
        assert_eq!(session.access_token(), "secret-token");
    }

    #[test]
    fn test_sort_newest_first() {
        let mut records: Vec<Record> = (1..=3).map(Record::new).collect();
        records[0].entry_date = Some("2024-01-01".into());
        records[2].entry_date = Some("2024-06-01".into());
        sort_newest_first(&mut records);
        let ids: Vec<i64> = records.iter().map(|r| r.id.0).collect();
        assert_eq!(ids, vec![3, 1, 2]);
    }
}
