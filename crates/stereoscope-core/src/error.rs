//! Unified error handling for Stereoscope Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stereoscope Core operations.
///
/// Cloneable so memoized detection results can be replayed.
#[derive(Debug, Error, Clone)]
pub enum StereoError {
    /// Errors from the domain layer (invalid references, bad catalog data).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (collaborator failures).
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl StereoError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Shorthand for an introspection failure.
    pub fn introspection(reason: impl Into<String>) -> Self {
        ApplicationError::Introspection {
            reason: reason.into(),
        }
        .into()
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StereoResult<T> = Result<T, StereoError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ElementKind;

    #[test]
    fn unknown_element_is_not_found() {
        let err: StereoError = DomainError::unknown(ElementKind::Type, "com.acme.Order").into();

        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.to_string().contains("com.acme.Order"));
        assert!(err.suggestions().iter().any(|s| s.contains("com.acme.Order")));
    }

    #[test]
    fn catalog_source_failure_is_configuration() {
        let err: StereoError = ApplicationError::CatalogSource {
            locator: "file:///tmp/stereotypes.json".into(),
            reason: "expected value".into(),
        }
        .into();

        assert_eq!(err.category(), ErrorCategory::Configuration);
    }

    #[test]
    fn introspection_shorthand() {
        let err = StereoError::introspection("boom");
        assert!(matches!(
            err,
            StereoError::Application(ApplicationError::Introspection { .. })
        ));
    }
}
