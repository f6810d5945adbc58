// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Stereoscope.
//!
//! Pure value types with no I/O: stereotypes, groups, markers and the
//! catalog. Detection and traversal live in `crate::application`.
//!
//! ## Invariants
//!
//! - **Immutable snapshots**: `Stereotypes` and `StereotypeGroups` never change after construction
//! - **Ordering-based identity**: two stereotypes are the same iff `(priority, id)` match
//! - **Parent-first groups**: a group always precedes its descendants
//! - **Additive catalogs**: merging never removes or overwrites entries
//!
pub mod catalog;
pub mod classification;
pub mod error;
pub mod group;
pub mod marker;
pub mod stereotype;

pub use catalog::{Catalog, CatalogBuilder, StereotypeDefinition};
pub use classification::{Classification, ClassificationSection, UNGROUPED_LABEL};
pub use error::{DomainError, ElementKind, ErrorCategory};
pub use group::{GroupType, StereotypeGroup, StereotypeGroups, is_ancestor, is_same_or_descendant};
pub use marker::{Marker, StereotypeDeclaration};
pub use stereotype::{Stereotype, Stereotypes, default_display_name};
