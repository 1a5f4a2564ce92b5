//! PostgREST-style HTTP record store.

use super::{RecordStore, Session};
use crate::error::{Result, StoreErrorKind, TrackboardError};
use crate::model::{Record, RecordId};
use reqwest::blocking::{Client, RequestBuilder, Response};
use std::time::Duration;

/// REST store configuration.
#[derive(Debug, Clone)]
pub struct RestStoreConfig {
    /// Project base URL, e.g. `https://xyz.supabase.co`
    pub base_url: String,
    /// Public API key sent as the `apikey` header
    pub api_key: String,
    /// Table holding the records
    pub table: String,
    /// Column used for newest-first ordering
    pub order_column: String,
    /// Primary key column used for deletes
    pub id_column: String,
    /// Request timeout
    pub timeout: Duration,
}

impl Default for RestStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            table: "projects".to_string(),
            order_column: "data_entrada".to_string(),
            id_column: "id".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// HTTP client for the upstream table.
pub struct RestStore {
    client: Client,
    config: RestStoreConfig,
}

/// Helper to convert reqwest errors to store errors
fn network_error(msg: &str, err: reqwest::Error) -> TrackboardError {
    TrackboardError::store(msg, StoreErrorKind::Network(err.to_string()))
}

/// Turn a non-2xx response into an API error carrying the body text.
fn check_status(context: &str, response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().unwrap_or_default();
    Err(TrackboardError::store(
        context,
        StoreErrorKind::Api {
            status: status.as_u16(),
            message: body,
        },
    ))
}

impl RestStore {
    /// Create a new REST store.
    pub fn new(config: RestStoreConfig) -> Result<Self> {
        if config.base_url.trim().is_empty() {
            return Err(TrackboardError::config("store URL is not set"));
        }
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| network_error("Failed to create HTTP client", e))?;

        Ok(Self { client, config })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.config.base_url.trim_end_matches('/'),
            self.config.table
        )
    }

    /// URL listing every record, newest first.
    #[must_use]
    pub fn list_url(&self) -> String {
        format!(
            "{}?select=*&order={}.desc",
            self.table_url(),
            self.config.order_column
        )
    }

    /// URL addressing a single record.
    #[must_use]
    pub fn record_url(&self, id: RecordId) -> String {
        format!("{}?{}=eq.{}", self.table_url(), self.config.id_column, id)
    }

    fn authorize(&self, request: RequestBuilder, session: &Session) -> RequestBuilder {
        request
            .header("apikey", &self.config.api_key)
            .bearer_auth(session.access_token())
    }
}

impl RecordStore for RestStore {
    fn fetch_all(&self, session: &Session) -> Result<Vec<Record>> {
        let url = self.list_url();
        tracing::debug!("GET {}", url);

        let response = self
            .authorize(self.client.get(&url), session)
            .send()
            .map_err(|e| network_error("Failed to fetch records", e))?;
        let response = check_status("fetching records", response)?;

        response.json::<Vec<Record>>().map_err(|e| {
            TrackboardError::store(
                "parsing records",
                StoreErrorKind::InvalidResponse(e.to_string()),
            )
        })
    }

    fn delete(&self, session: &Session, id: RecordId) -> Result<()> {
        let url = self.record_url(id);
        tracing::debug!("DELETE {}", url);

        let response = self
            .authorize(self.client.delete(&url), session)
            .send()
            .map_err(|e| network_error("Failed to delete record", e))?;
        check_status(&format!("deleting record {id}"), response)?;
        Ok(())
    }

    fn name(&self) -> String {
        self.table_url()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> RestStore {
        RestStore::new(RestStoreConfig {
            base_url: "https://example.test/".to_string(),
            api_key: "anon".to_string(),
            ..RestStoreConfig::default()
        })
        .expect("client builds")
    }

    #[test]
    fn test_config_defaults() {
        let config = RestStoreConfig::default();
        assert_eq!(config.order_column, "data_entrada");
        assert_eq!(config.id_column, "id");
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_urls() {
        let store = store();
        assert_eq!(
            store.list_url(),
            "https://example.test/rest/v1/projects?select=*&order=data_entrada.desc"
        );
        assert_eq!(
            store.record_url(RecordId(42)),
            "https://example.test/rest/v1/projects?id=eq.42"
        );
    }

    #[test]
    fn test_missing_url_is_config_error() {
        let err = RestStore::new(RestStoreConfig::default())
            .err()
            .expect("empty URL rejected");
        assert!(matches!(err, TrackboardError::Config(_)));
    }
}
