//! Configuration types for trackboard.
//!
//! Provides structured configuration for the record store, exports and the
//! terminal dashboard.

use super::defaults::{
    default_footer, DEFAULT_CSV_FILE_NAME, DEFAULT_ID_COLUMN, DEFAULT_LOGO_PATH,
    DEFAULT_ORDER_COLUMN, DEFAULT_PDF_FILE_NAME, DEFAULT_TABLE, DEFAULT_TIMEOUT_SECS,
    DEFAULT_TITLE, DEFAULT_XLSX_FILE_NAME,
};
use crate::reports::{FooterColumn, ReportFormat};
use crate::store::RestStoreConfig;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Unified Application Configuration
// ============================================================================

/// Unified application configuration that can be loaded from CLI args or config files.
///
/// It can be constructed from CLI arguments, config files, or both (with CLI
/// overriding file settings).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppConfig {
    /// Upstream record store
    pub store: StoreConfig,
    /// Export output and branding
    pub export: ExportConfig,
    /// TUI-specific configuration
    pub tui: TuiConfig,
}

impl AppConfig {
    /// Create a new `AppConfig` with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an `AppConfig` builder.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }
}

// ============================================================================
// Builder for AppConfig
// ============================================================================

/// Builder for constructing `AppConfig` with fluent API.
#[derive(Debug, Default)]
#[must_use]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    /// Set the store base URL.
    pub fn store_url(mut self, url: impl Into<String>) -> Self {
        self.config.store.url = Some(url.into());
        self
    }

    /// Set the store API key.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.store.api_key = Some(key.into());
        self
    }

    /// Read records from a local JSON file instead of the REST store.
    pub fn source_file(mut self, path: Option<PathBuf>) -> Self {
        self.config.store.source_file = path;
        self
    }

    /// Set the export directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.export.output_dir = dir.into();
        self
    }

    /// Set the document title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.config.export.title = title.into();
        self
    }

    /// Set the TUI theme.
    pub fn theme(mut self, theme: impl Into<String>) -> Self {
        self.config.tui.theme = theme.into();
        self
    }

    /// Build the `AppConfig`.
    #[must_use]
    pub fn build(self) -> AppConfig {
        self.config
    }
}

// ============================================================================
// Store Configuration
// ============================================================================

/// Upstream record store settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the REST endpoint (env: `TRACKBOARD_URL`)
    pub url: Option<String>,
    /// Public API key (env: `TRACKBOARD_API_KEY`)
    pub api_key: Option<String>,
    /// Session access token (env: `TRACKBOARD_ACCESS_TOKEN`); prefer the
    /// environment over storing it in a file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
    /// Table holding the records
    pub table: String,
    /// Column used for newest-first ordering
    pub order_column: String,
    /// Primary key column
    pub id_column: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
    /// Read records from this JSON file instead of the REST endpoint
    pub source_file: Option<PathBuf>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: None,
            api_key: None,
            access_token: None,
            table: DEFAULT_TABLE.to_string(),
            order_column: DEFAULT_ORDER_COLUMN.to_string(),
            id_column: DEFAULT_ID_COLUMN.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            source_file: None,
        }
    }
}

impl StoreConfig {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// REST client settings, if a URL is configured.
    #[must_use]
    pub fn rest_config(&self) -> Option<RestStoreConfig> {
        let base_url = self.url.clone().filter(|u| !u.trim().is_empty())?;
        Some(RestStoreConfig {
            base_url,
            api_key: self.api_key.clone().unwrap_or_default(),
            table: self.table.clone(),
            order_column: self.order_column.clone(),
            id_column: self.id_column.clone(),
            timeout: self.timeout(),
        })
    }
}

// ============================================================================
// Export Configuration
// ============================================================================

/// Export output and branding settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory exported files are written to
    pub output_dir: PathBuf,
    /// PDF file name
    pub pdf_file_name: String,
    /// Spreadsheet file name
    pub xlsx_file_name: String,
    /// CSV file name
    pub csv_file_name: String,
    /// Document title printed in the PDF header
    pub title: String,
    /// Relative path of the branding image; omit to export without a logo
    pub logo_path: Option<String>,
    /// Base URL assets are fetched from (defaults to the store URL)
    pub asset_base_url: Option<String>,
    /// Local directory assets are read from; takes precedence over the URL
    pub asset_dir: Option<PathBuf>,
    /// Footer contact columns (up to three)
    pub footer: Vec<FooterColumn>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            pdf_file_name: DEFAULT_PDF_FILE_NAME.to_string(),
            xlsx_file_name: DEFAULT_XLSX_FILE_NAME.to_string(),
            csv_file_name: DEFAULT_CSV_FILE_NAME.to_string(),
            title: DEFAULT_TITLE.to_string(),
            logo_path: Some(DEFAULT_LOGO_PATH.to_string()),
            asset_base_url: None,
            asset_dir: None,
            footer: default_footer(),
        }
    }
}

impl ExportConfig {
    /// File name configured for a format. Formats without a configured name
    /// use `tracking_report.<ext>`.
    #[must_use]
    pub fn file_name(&self, format: ReportFormat) -> String {
        match format {
            ReportFormat::Pdf => self.pdf_file_name.clone(),
            ReportFormat::Xlsx => self.xlsx_file_name.clone(),
            ReportFormat::Csv => self.csv_file_name.clone(),
            other => format!("tracking_report.{}", other.extension()),
        }
    }

    /// Full output path for a format.
    #[must_use]
    pub fn output_path(&self, format: ReportFormat) -> PathBuf {
        self.output_dir.join(self.file_name(format))
    }
}

// ============================================================================
// TUI Preferences (persisted)
// ============================================================================

/// TUI preferences that persist across sessions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TuiPreferences {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
}

impl Default for TuiPreferences {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
        }
    }
}

impl TuiPreferences {
    /// Get the path to the preferences file.
    #[must_use]
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("trackboard").join("preferences.json"))
    }

    /// Load preferences from disk, or return defaults if not found.
    #[must_use]
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|p| std::fs::read_to_string(p).ok())
            .and_then(|s| serde_json::from_str(&s).ok())
            .unwrap_or_default()
    }

    /// Save preferences to disk.
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(path) = Self::config_path() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            let json = serde_json::to_string_pretty(self)
                .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
            std::fs::write(path, json)?;
        }
        Ok(())
    }
}

// ============================================================================
// TUI Configuration
// ============================================================================

/// TUI-specific configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct TuiConfig {
    /// Theme name: "dark", "light", or "high-contrast"
    pub theme: String,
    /// Enable mouse support
    pub mouse_enabled: bool,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            mouse_enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.export.pdf_file_name, "tracking_report.pdf");
        assert_eq!(config.export.xlsx_file_name, "tracking_report.xlsx");
        assert_eq!(config.export.logo_path.as_deref(), Some("logo.png"));
        assert_eq!(config.store.timeout(), Duration::from_secs(30));
        assert!(config.store.rest_config().is_none());
    }

    #[test]
    fn test_builder() {
        let config = AppConfig::builder()
            .store_url("https://db.example.test")
            .api_key("anon")
            .output_dir("/tmp/out")
            .theme("light")
            .build();
        let rest = config.store.rest_config().expect("url configured");
        assert_eq!(rest.base_url, "https://db.example.test");
        assert_eq!(rest.api_key, "anon");
        assert_eq!(
            config.export.output_path(ReportFormat::Pdf),
            PathBuf::from("/tmp/out/tracking_report.pdf")
        );
        assert_eq!(config.tui.theme, "light");
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config: AppConfig =
            serde_yaml::from_str("export:\n  title: Weekly\n").expect("valid yaml");
        assert_eq!(config.export.title, "Weekly");
        assert_eq!(config.export.pdf_file_name, "tracking_report.pdf");
        assert_eq!(config.store.table, "projects");
    }
}
