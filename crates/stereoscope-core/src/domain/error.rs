// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (detection results are memoized and replayed)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Reference Errors
    // ========================================================================
    #[error("Unknown {kind} '{name}'")]
    UnknownElement { kind: ElementKind, name: String },

    // ========================================================================
    // Data Errors
    // ========================================================================
    #[error("Invalid catalog: {0}")]
    InvalidCatalog(String),

    #[error("Invalid codebase model: {0}")]
    InvalidModel(String),
}

impl DomainError {
    /// Shorthand for an [`DomainError::UnknownElement`].
    pub fn unknown(kind: ElementKind, name: impl Into<String>) -> Self {
        Self::UnknownElement {
            kind,
            name: name.into(),
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownElement { kind, name } => vec![
                format!("No {} named '{}' is known to the codebase model", kind, name),
                "Check the spelling and the fully qualified name".into(),
                "Try: stereoscope tree --model <FILE> to list known elements".into(),
            ],
            Self::InvalidCatalog(msg) => vec![
                format!("Catalog problem: {}", msg),
                "Every group needs an 'id'; every stereotype needs an 'id'".into(),
            ],
            Self::InvalidModel(msg) => vec![
                format!("Model problem: {}", msg),
                "Types must reference declared packages and markers".into(),
            ],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownElement { .. } => ErrorCategory::NotFound,
            Self::InvalidCatalog(_) | Self::InvalidModel(_) => ErrorCategory::Validation,
        }
    }
}

/// The three element kinds the engine classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    Package,
    Type,
    Method,
}

impl std::fmt::Display for ElementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Package => "package",
            Self::Type => "type",
            Self::Method => "method",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
}
