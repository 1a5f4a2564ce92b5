//! Branding asset sources.

use crate::error::{ExportErrorKind, Result, TrackboardError};
use reqwest::blocking::Client;
use std::path::PathBuf;
use std::time::Duration;

/// Fetches static assets (the report logo) by relative path.
pub trait AssetSource: Send + Sync {
    fn fetch(&self, path: &str) -> Result<Vec<u8>>;
}

fn asset_error(path: &str, message: impl Into<String>) -> TrackboardError {
    TrackboardError::export(
        format!("fetching asset {path}"),
        ExportErrorKind::Asset(message.into()),
    )
}

/// Assets served over HTTP from a base URL.
pub struct HttpAssetSource {
    client: Client,
    base_url: String,
}

impl HttpAssetSource {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| asset_error("client", e.to_string()))?;
        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    #[must_use]
    pub fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

impl AssetSource for HttpAssetSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let url = self.url_for(path);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| asset_error(path, e.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(asset_error(path, format!("HTTP {}", status.as_u16())));
        }
        let bytes = response
            .bytes()
            .map_err(|e| asset_error(path, e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

/// Assets read from a local directory.
#[derive(Debug, Clone)]
pub struct FileAssetSource {
    root: PathBuf,
}

impl FileAssetSource {
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl AssetSource for FileAssetSource {
    fn fetch(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.root.join(path.trim_start_matches('/'));
        std::fs::read(&full).map_err(|e| asset_error(path, format!("{}: {e}", full.display())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_url_joining() {
        let source = HttpAssetSource::new("https://cdn.example.test/", Duration::from_secs(5))
            .expect("client builds");
        assert_eq!(source.url_for("/logo.png"), "https://cdn.example.test/logo.png");
    }

    #[test]
    fn test_file_source() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("logo.png"), [1u8, 2, 3]).expect("seed");
        let source = FileAssetSource::new(dir.path());
        assert_eq!(source.fetch("logo.png").expect("read"), vec![1, 2, 3]);
        assert!(matches!(
            source.fetch("missing.png"),
            Err(TrackboardError::Export {
                source: ExportErrorKind::Asset(_),
                ..
            })
        ));
    }
}
