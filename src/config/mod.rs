//! Configuration module for trackboard.
//!
//! This module provides a unified configuration system with:
//! - Type-safe configuration structures
//! - Validation for all configuration values
//! - YAML config file loading and discovery
//! - CLI argument merging
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use trackboard::config::AppConfig;
//!
//! // Use defaults
//! let config = AppConfig::default();
//!
//! // Use builder
//! let config = AppConfig::builder()
//!     .store_url("https://example.supabase.co")
//!     .output_dir("./exports")
//!     .build();
//!
//! // Load from file
//! use trackboard::config::file::load_or_default;
//! let (config, loaded_from) = load_or_default(None);
//! ```
//!
//! # Configuration File
//!
//! Place a `.trackboard.yaml` file in your project root or `~/.config/trackboard/`:
//!
//! ```yaml
//! store:
//!   url: https://example.supabase.co
//! export:
//!   title: Weekly Tracking
//!   logo_path: logo.png
//! ```

mod defaults;
pub mod file;
mod types;
mod validation;

pub use defaults::{
    default_footer, DEFAULT_PDF_FILE_NAME, DEFAULT_TITLE, DEFAULT_XLSX_FILE_NAME,
    MAX_FOOTER_COLUMNS,
};
pub use types::{
    AppConfig, AppConfigBuilder, ExportConfig, StoreConfig, TuiConfig, TuiPreferences,
};
pub use validation::{ConfigError, Validatable};

pub use file::{
    discover_config_file, generate_example_config, generate_full_example_config, load_config_file,
    load_or_default, user_config_dir, ConfigFileError, CONFIG_FILE_NAMES,
};

/// Generate a JSON Schema for the `AppConfig` configuration format.
///
/// This schema documents all configuration options that can be set in
/// `.trackboard.yaml` config files. It can be used by editors for
/// validation and autocompletion.
pub fn generate_json_schema() -> Result<String, serde_json::Error> {
    let schema = schemars::schema_for!(AppConfig);
    serde_json::to_string_pretty(&schema)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_schema_lists_sections() {
        let schema = generate_json_schema().unwrap();
        for section in ["store", "export", "tui", "footer"] {
            assert!(schema.contains(section), "schema missing {section}");
        }
    }
}
