//! Configuration file loading and discovery.
//!
//! Supports loading configuration from YAML files with automatic discovery.

use super::types::AppConfig;
use std::path::{Path, PathBuf};

// ============================================================================
// Configuration File Discovery
// ============================================================================

/// Standard config file names to search for.
pub const CONFIG_FILE_NAMES: &[&str] = &[
    ".trackboard.yaml",
    ".trackboard.yml",
    "trackboard.yaml",
    "trackboard.yml",
];

/// Discover a config file by searching standard locations.
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Current directory
/// 3. Git repository root (if in a repo)
/// 4. User config directory (~/.config/trackboard/)
/// 5. Home directory
#[must_use]
pub fn discover_config_file(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path
        && path.exists()
    {
        return Some(path.to_path_buf());
    }

    if let Ok(cwd) = std::env::current_dir()
        && let Some(path) = find_config_in_dir(&cwd)
    {
        return Some(path);
    }

    if let Some(git_root) = find_git_root()
        && let Some(path) = find_config_in_dir(&git_root)
    {
        return Some(path);
    }

    if let Some(path) = user_config_dir().and_then(|dir| find_config_in_dir(&dir)) {
        return Some(path);
    }

    if let Some(home) = dirs::home_dir()
        && let Some(path) = find_config_in_dir(&home)
    {
        return Some(path);
    }

    None
}

/// `~/.config/trackboard` on Linux, the platform equivalent elsewhere.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("trackboard"))
}

/// Find a config file in a specific directory.
fn find_config_in_dir(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.exists())
}

/// Find the git repository root by walking up the directory tree.
fn find_git_root() -> Option<PathBuf> {
    let cwd = std::env::current_dir().ok()?;
    let mut current = cwd.as_path();

    loop {
        if current.join(".git").exists() {
            return Some(current.to_path_buf());
        }
        current = current.parent()?;
    }
}

// ============================================================================
// Configuration File Loading
// ============================================================================

/// Error type for config file operations.
#[derive(Debug)]
pub enum ConfigFileError {
    /// File not found
    NotFound(PathBuf),
    /// IO error reading file
    Io(std::io::Error),
    /// YAML parsing error
    Parse(serde_yaml::Error),
}

impl std::fmt::Display for ConfigFileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(path) => {
                write!(f, "Config file not found: {}", path.display())
            }
            Self::Io(e) => write!(f, "Failed to read config file: {e}"),
            Self::Parse(e) => write!(f, "Failed to parse config file: {e}"),
        }
    }
}

impl std::error::Error for ConfigFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotFound(_) => None,
            Self::Io(e) => Some(e),
            Self::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for ConfigFileError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigFileError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Parse(err)
    }
}

/// Load an `AppConfig` from a YAML file.
pub fn load_config_file(path: &Path) -> Result<AppConfig, ConfigFileError> {
    if !path.exists() {
        return Err(ConfigFileError::NotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = serde_yaml::from_str(&content)?;
    Ok(config)
}

/// Load config from discovered file, or return default.
#[must_use]
pub fn load_or_default(explicit_path: Option<&Path>) -> (AppConfig, Option<PathBuf>) {
    discover_config_file(explicit_path).map_or_else(
        || (AppConfig::default(), None),
        |path| match load_config_file(&path) {
            Ok(config) => (config, Some(path)),
            Err(e) => {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                (AppConfig::default(), None)
            }
        },
    )
}

// ============================================================================
// Configuration Merging
// ============================================================================

impl AppConfig {
    /// Merge another config into this one, with `other` taking precedence.
    ///
    /// Only values that differ from the defaults are taken from `other`, so
    /// CLI overrides built from `AppConfig::default()` layer cleanly over a
    /// file config.
    pub fn merge(&mut self, other: &Self) {
        let defaults = Self::default();

        // Store config
        if other.store.url.is_some() {
            self.store.url.clone_from(&other.store.url);
        }
        if other.store.api_key.is_some() {
            self.store.api_key.clone_from(&other.store.api_key);
        }
        if other.store.access_token.is_some() {
            self.store.access_token.clone_from(&other.store.access_token);
        }
        if other.store.source_file.is_some() {
            self.store.source_file.clone_from(&other.store.source_file);
        }
        if other.store.table != defaults.store.table {
            self.store.table.clone_from(&other.store.table);
        }
        if other.store.order_column != defaults.store.order_column {
            self.store.order_column.clone_from(&other.store.order_column);
        }
        if other.store.id_column != defaults.store.id_column {
            self.store.id_column.clone_from(&other.store.id_column);
        }
        if other.store.timeout_secs != defaults.store.timeout_secs {
            self.store.timeout_secs = other.store.timeout_secs;
        }

        // Export config
        if other.export.output_dir != defaults.export.output_dir {
            self.export.output_dir.clone_from(&other.export.output_dir);
        }
        if other.export.pdf_file_name != defaults.export.pdf_file_name {
            self.export.pdf_file_name.clone_from(&other.export.pdf_file_name);
        }
        if other.export.xlsx_file_name != defaults.export.xlsx_file_name {
            self.export.xlsx_file_name.clone_from(&other.export.xlsx_file_name);
        }
        if other.export.csv_file_name != defaults.export.csv_file_name {
            self.export.csv_file_name.clone_from(&other.export.csv_file_name);
        }
        if other.export.title != defaults.export.title {
            self.export.title.clone_from(&other.export.title);
        }
        if other.export.logo_path != defaults.export.logo_path {
            self.export.logo_path.clone_from(&other.export.logo_path);
        }
        if other.export.asset_base_url.is_some() {
            self.export.asset_base_url.clone_from(&other.export.asset_base_url);
        }
        if other.export.asset_dir.is_some() {
            self.export.asset_dir.clone_from(&other.export.asset_dir);
        }
        if other.export.footer != defaults.export.footer {
            self.export.footer.clone_from(&other.export.footer);
        }

        // TUI config
        if other.tui.theme != defaults.tui.theme {
            self.tui.theme.clone_from(&other.tui.theme);
        }
        if !other.tui.mouse_enabled {
            self.tui.mouse_enabled = false;
        }
    }

    /// Load from file and merge with CLI overrides.
    #[must_use]
    pub fn from_file_with_overrides(
        config_path: Option<&Path>,
        cli_overrides: &Self,
    ) -> (Self, Option<PathBuf>) {
        let (mut config, loaded_from) = load_or_default(config_path);
        config.merge(cli_overrides);
        (config, loaded_from)
    }
}

// ============================================================================
// Example Config Generation
// ============================================================================

/// Generate an example config file content.
#[must_use]
pub fn generate_example_config() -> String {
    let example = AppConfig::default();
    format!(
        r"# trackboard configuration
# Place this file at .trackboard.yaml in your project root or ~/.config/trackboard/

{}
",
        serde_yaml::to_string(&example).unwrap_or_default()
    )
}

/// Generate a commented example config with all options.
#[must_use]
pub fn generate_full_example_config() -> String {
    r"# trackboard configuration file
# ==============================
#
# Place it at:
#   - .trackboard.yaml in your project root
#   - ~/.config/trackboard/trackboard.yaml for global config
#
# CLI arguments and environment variables always override file settings.

# Record store
store:
  # REST endpoint base URL (env: TRACKBOARD_URL)
  # url: https://example.supabase.co
  # Public API key (env: TRACKBOARD_API_KEY)
  # api_key: anon-key
  # The access token is read from TRACKBOARD_ACCESS_TOKEN; avoid storing it here
  table: projects
  order_column: data_entrada
  id_column: id
  timeout_secs: 30
  # Read records from a JSON file instead of the REST endpoint
  # source_file: ./records.json

# Exports
export:
  output_dir: .
  pdf_file_name: tracking_report.pdf
  xlsx_file_name: tracking_report.xlsx
  csv_file_name: tracking_report.csv
  title: Tracking Report
  # Branding image, fetched relative to asset_dir or asset_base_url.
  # Remove to export without a logo.
  logo_path: logo.png
  # asset_base_url: https://example.test/static
  # asset_dir: ./assets
  # Up to three footer columns
  footer:
    - heading: Address
      lines:
        - 1 Example Street
    - heading: Sales
      lines:
        - sales@example.test
    - heading: Support
      lines:
        - support@example.test

# TUI configuration
tui:
  # Theme: dark, light, high-contrast
  theme: dark
  mouse_enabled: true
"
    .to_string()
}

// ============================================================================
// Tests
// ============================================================================
