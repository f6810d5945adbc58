//! Application layer errors.
//!
//! These errors represent failures of collaborators (introspection, catalog
//! sources, sinks), not violations of the domain model.
//! Domain errors are `DomainError` from `crate::domain`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors raised while orchestrating detection and traversal.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The introspection collaborator failed to answer a query.
    #[error("Introspection failed: {reason}")]
    Introspection { reason: String },

    /// A catalog source could not be loaded.
    #[error("Catalog source '{locator}' failed: {reason}")]
    CatalogSource { locator: String, reason: String },

    /// The line sink rejected output.
    #[error("Output sink failed: {reason}")]
    Sink { reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Introspection { reason } => vec![
                format!("The codebase model could not answer: {}", reason),
                "Check that the model file is complete and consistent".into(),
            ],
            Self::CatalogSource { locator, .. } => vec![
                format!("Failed to load catalog: {}", locator),
                "Check that the file exists and is valid JSON or TOML".into(),
                "Use --no-builtin to isolate problems with local catalogs".into(),
            ],
            Self::Sink { .. } => vec![
                "Output could not be written".into(),
                "Check that stdout is not closed (e.g. a broken pipe)".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Introspection { .. } => ErrorCategory::Internal,
            Self::CatalogSource { .. } => ErrorCategory::Configuration,
            Self::Sink { .. } => ErrorCategory::Internal,
        }
    }
}
