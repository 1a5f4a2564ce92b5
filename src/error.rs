//! Unified error types for trackboard.
//!
//! This module provides the error hierarchy for the library, with rich
//! context for debugging and user-friendly messages.

use crate::reports::ReportError;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for trackboard operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TrackboardError {
    /// Errors talking to the upstream record store
    #[error("Record store operation failed: {context}")]
    Store {
        context: String,
        #[source]
        source: StoreErrorKind,
    },

    /// Errors while producing an export
    #[error("Export failed: {context}")]
    Export {
        context: String,
        #[source]
        source: ExportErrorKind,
    },

    /// Missing or unusable session
    #[error("Session error: {0}")]
    Session(String),

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific record store error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreErrorKind {
    #[error("Network error: {0}")]
    Network(String),

    #[error("API request failed with status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Record {0} not found")]
    NotFound(i64),

    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

/// Specific export error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ExportErrorKind {
    #[error("Rendering failed: {0}")]
    Render(#[source] ReportError),

    #[error("Could not write output: {0}")]
    Write(String),

    #[error("Asset fetch failed: {0}")]
    Asset(String),
}

// ============================================================================
// Result type alias
// ============================================================================

/// Convenient Result type for trackboard operations
pub type Result<T> = std::result::Result<T, TrackboardError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl TrackboardError {
    /// Create a store error with context
    pub fn store(context: impl Into<String>, source: StoreErrorKind) -> Self {
        Self::Store {
            context: context.into(),
            source,
        }
    }

    /// Create an export error with context
    pub fn export(context: impl Into<String>, source: ExportErrorKind) -> Self {
        Self::Export {
            context: context.into(),
            source,
        }
    }

    /// Create a session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether the error came from the network layer rather than the data.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(
            self,
            Self::Store {
                source: StoreErrorKind::Network(_),
                ..
            }
        )
    }
}

// ============================================================================
// Conversions from existing error types
// ============================================================================

impl From<std::io::Error> for TrackboardError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for TrackboardError {
    fn from(err: serde_json::Error) -> Self {
        Self::store(
            "decoding records",
            StoreErrorKind::InvalidResponse(err.to_string()),
        )
    }
}

impl From<ReportError> for TrackboardError {
    fn from(err: ReportError) -> Self {
        Self::export("rendering report", ExportErrorKind::Render(err))
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// The context string is prepended to the error's existing context, so a
/// failure reads as the path through the code that led to it.
///
/// # Example
///
/// ```ignore
/// use trackboard::error::ErrorContext;
///
/// let records = store
///     .fetch_all(&session)
///     .with_context(|| format!("loading from {}", store.name()))?;
/// ```
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure (lazy evaluation).
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<TrackboardError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

/// Add context to an error, chaining with any existing context.
fn add_context_to_error(err: TrackboardError, new_ctx: &str) -> TrackboardError {
    match err {
        TrackboardError::Store {
            context: existing,
            source,
        } => TrackboardError::Store {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TrackboardError::Export {
            context: existing,
            source,
        } => TrackboardError::Export {
            context: chain_context(new_ctx, &existing),
            source,
        },
        TrackboardError::Io {
            path,
            message,
            source,
        } => TrackboardError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        TrackboardError::Session(msg) => TrackboardError::Session(chain_context(new_ctx, &msg)),
        TrackboardError::Config(msg) => TrackboardError::Config(chain_context(new_ctx, &msg)),
        TrackboardError::Validation(msg) => {
            TrackboardError::Validation(chain_context(new_ctx, &msg))
        }
    }
}

/// Chain two context strings together.
///
/// If the existing context is empty, returns just the new context.
/// Otherwise, returns "`new_context`: `existing_context`".
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;

    /// Convert None to an error with context from a closure.
    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| TrackboardError::Validation(context.into()))
    }

    fn with_context_none<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.ok_or_else(|| TrackboardError::Validation(f().into()))
    }
}
