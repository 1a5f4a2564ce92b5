//! Configuration validation for trackboard.
//!
//! Provides validation traits and implementations for all configuration types.

use super::defaults::MAX_FOOTER_COLUMNS;
use super::types::{AppConfig, ExportConfig, StoreConfig, TuiConfig};

// ============================================================================
// Configuration Error
// ============================================================================

/// Error type for configuration validation.
#[derive(Debug, Clone)]
pub struct ConfigError {
    /// The field that failed validation
    pub field: String,
    /// Description of the validation error
    pub message: String,
}

impl ConfigError {
    fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Validation Trait
// ============================================================================

/// Trait for validatable configuration types.
pub trait Validatable {
    /// Validate the configuration, returning any errors found.
    fn validate(&self) -> Vec<ConfigError>;

    /// Check if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }
}

// ============================================================================
// Validation Implementations
// ============================================================================

impl Validatable for AppConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        errors.extend(self.store.validate());
        errors.extend(self.export.validate());
        errors.extend(self.tui.validate());
        errors
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

impl Validatable for StoreConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Some(ref url) = self.url
            && !is_http_url(url)
        {
            errors.push(ConfigError::new(
                "store.url",
                format!("URL must start with http:// or https://, got '{url}'"),
            ));
        }

        if self.timeout_secs == 0 {
            errors.push(ConfigError::new(
                "store.timeout_secs",
                "Timeout must be at least 1 second",
            ));
        }

        for (field, value) in [
            ("store.table", &self.table),
            ("store.order_column", &self.order_column),
            ("store.id_column", &self.id_column),
        ] {
            if value.trim().is_empty() {
                errors.push(ConfigError::new(field, "Must not be empty"));
            }
        }

        if let Some(ref path) = self.source_file
            && !path.exists()
        {
            errors.push(ConfigError::new(
                "store.source_file",
                format!("File does not exist: {}", path.display()),
            ));
        }

        errors
    }
}

impl Validatable for ExportConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        for (field, name) in [
            ("export.pdf_file_name", &self.pdf_file_name),
            ("export.xlsx_file_name", &self.xlsx_file_name),
            ("export.csv_file_name", &self.csv_file_name),
        ] {
            if name.trim().is_empty() {
                errors.push(ConfigError::new(field, "File name must not be empty"));
            } else if name.contains(['/', '\\']) {
                errors.push(ConfigError::new(
                    field,
                    format!("'{name}' must be a bare file name; use export.output_dir for the directory"),
                ));
            }
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            errors.push(ConfigError::new(
                "export.output_dir",
                format!("{} is not a directory", self.output_dir.display()),
            ));
        }

        if let Some(ref url) = self.asset_base_url
            && !is_http_url(url)
        {
            errors.push(ConfigError::new(
                "export.asset_base_url",
                format!("URL must start with http:// or https://, got '{url}'"),
            ));
        }

        if self.footer.len() > MAX_FOOTER_COLUMNS {
            errors.push(ConfigError::new(
                "export.footer",
                format!(
                    "At most {MAX_FOOTER_COLUMNS} footer columns fit on the page, got {}",
                    self.footer.len()
                ),
            ));
        }

        errors
    }
}

impl Validatable for TuiConfig {
    fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();
        let valid_themes = ["dark", "light", "high-contrast"];
        if !valid_themes.contains(&self.theme.as_str()) {
            errors.push(ConfigError::new(
                "tui.theme",
                format!(
                    "Invalid theme '{}'. Valid options: {}",
                    self.theme,
                    valid_themes.join(", ")
                ),
            ));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reports::FooterColumn;

    #[test]
    fn test_default_config_is_valid() {
        let config = AppConfig::default();
        assert!(config.is_valid(), "{:?}", config.validate());
    }

    #[test]
    fn test_invalid_store_url() {
        let config = AppConfig::builder().store_url("db.example.test").build();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "store.url");
    }

    #[test]
    fn test_zero_timeout() {
        let mut config = StoreConfig::default();
        config.timeout_secs = 0;
        assert!(config
            .validate()
            .iter()
            .any(|e| e.field == "store.timeout_secs"));
    }

    #[test]
    fn test_file_name_with_directory() {
        let mut config = ExportConfig::default();
        config.pdf_file_name = "out/report.pdf".to_string();
        let errors = config.validate();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "export.pdf_file_name");
    }

    #[test]
    fn test_too_many_footer_columns() {
        let mut config = ExportConfig::default();
        config.footer.push(FooterColumn::new("Extra", &["x"]));
        assert!(!config.is_valid());
    }

    #[test]
    fn test_invalid_theme() {
        let config = TuiConfig {
            theme: "neon".to_string(),
            ..TuiConfig::default()
        };
        let errors = config.validate();
        assert!(errors[0].to_string().starts_with("tui.theme: Invalid theme 'neon'"));
    }
}
