//! CLI command handlers.
//!
//! This module provides testable command handlers that are invoked by main.rs.
//! Each handler implements the business logic for a specific CLI subcommand
//! and returns the process exit code.

mod dashboard;
mod delete;
mod export;
mod list;

pub use dashboard::{run_dashboard, DashboardConfig};
pub use delete::{run_delete, DeleteConfig};
pub use export::{run_export, ExportCommandConfig};
pub use list::{run_list, ListConfig, ListFormat};

use crate::config::AppConfig;
use crate::dashboard::{Dashboard, LoadOutcome};
use crate::error::{Result, TrackboardError};
use crate::store::{
    AssetSource, FileAssetSource, FileStore, HttpAssetSource, RecordStore, RestStore, Session,
    ACCESS_TOKEN_ENV,
};

/// Token used for file-backed sessions when none is configured.
const LOCAL_SESSION_TOKEN: &str = "local";

/// The collaborators a command talks to, resolved from configuration.
pub struct Backend {
    pub store: Box<dyn RecordStore>,
    pub assets: Box<dyn AssetSource>,
    pub session: Session,
}

impl Backend {
    /// Resolve store, asset source and session.
    ///
    /// A configured `source_file` selects the JSON file store; otherwise the
    /// REST store is used and a store URL is required.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let store: Box<dyn RecordStore> = match (&config.store.source_file, config.store.rest_config()) {
            (Some(path), _) => Box::new(FileStore::new(path)),
            (None, Some(rest)) => Box::new(RestStore::new(rest)?),
            (None, None) => {
                return Err(TrackboardError::config(
                    "no record source: set store.url (or TRACKBOARD_URL), or pass --source <file.json>",
                ));
            }
        };

        Ok(Self {
            store,
            assets: asset_source(config)?,
            session: session_for(config)?,
        })
    }

    /// Fetch into a fresh dashboard, warning on stderr when degraded.
    pub fn load_dashboard(&self, quiet: bool) -> (Dashboard, LoadOutcome) {
        let mut dashboard = Dashboard::new();
        let outcome = dashboard.load(self.store.as_ref(), &self.session);
        if let LoadOutcome::Degraded(reason) = &outcome
            && !quiet
        {
            eprintln!("Warning: could not load records, showing an empty set ({reason})");
        }
        (dashboard, outcome)
    }
}

fn session_for(config: &AppConfig) -> Result<Session> {
    match (&config.store.access_token, &config.store.source_file) {
        (Some(token), _) => Session::new(token.as_str()),
        (None, Some(_)) => Session::new(LOCAL_SESSION_TOKEN),
        (None, None) => Err(TrackboardError::session(format!(
            "no access token; sign in and set {ACCESS_TOKEN_ENV}"
        ))),
    }
}

/// Local directory first, then an explicit asset URL, then the store URL,
/// falling back to the working directory.
fn asset_source(config: &AppConfig) -> Result<Box<dyn AssetSource>> {
    if let Some(dir) = &config.export.asset_dir {
        return Ok(Box::new(FileAssetSource::new(dir)));
    }
    let timeout = config.store.timeout();
    if let Some(url) = &config.export.asset_base_url {
        return Ok(Box::new(HttpAssetSource::new(url.as_str(), timeout)?));
    }
    match (&config.store.source_file, &config.store.url) {
        (None, Some(url)) => Ok(Box::new(HttpAssetSource::new(url.as_str(), timeout)?)),
        _ => Ok(Box::new(FileAssetSource::new("."))),
    }
}
