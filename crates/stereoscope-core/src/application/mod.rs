//! Application layer for Stereoscope.
//!
//! This layer contains:
//! - **Factory**: The detection contract and its two implementations
//! - **Services**: Use case orchestration (CatalogService, TreeWalker)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Value types and their rules live in `crate::domain`.

pub mod error;
pub mod factory;
pub mod ports;
pub mod services;

pub use factory::{
    CacheCounts, CachingStereotypeFactory, IntrospectingStereotypeFactory, StereotypeFactory,
};

pub use services::{CatalogService, TreeWalker, WalkFailure, WalkOptions, WalkReport};

// Re-export port traits (for adapter implementation)
pub use ports::{
    CatalogSource, Introspector, LineSink, MethodExtractor, NodeHandler, PackageExtractor,
    TypeExtractor,
};

pub use error::ApplicationError;
