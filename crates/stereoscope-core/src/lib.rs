//! Stereoscope Core - stereotype detection and cataloging engine.
//!
//! This crate classifies code elements (packages, types, methods) into
//! architectural roles ("stereotypes") from the markers they carry, and
//! renders a classified tree of a codebase. It follows hexagonal (ports and
//! adapters) architecture: the analyzed codebase is reached only through
//! the [`Introspector`](application::ports::Introspector) port.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │         stereoscope-cli (CLI)           │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   Factory + Services (application)      │
//! │  Caching / Introspecting factories,     │
//! │  CatalogService, TreeWalker             │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ Introspector, CatalogSource, Extractors │
//! │        NodeHandler, LineSink            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   stereoscope-adapters (Infrastructure) │
//! │ CodebaseModel, catalog loaders, sinks   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │        Domain Layer (Pure Logic)        │
//! │ Stereotype(s), Group(s), Catalog        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use stereoscope_core::prelude::*;
//!
//! let catalog = Arc::new(CatalogService::new().with_source(builtin).load()?);
//! let factory = CachingStereotypeFactory::new(
//!     IntrospectingStereotypeFactory::new(model, catalog.clone()),
//! );
//! let stereotypes = factory.from_type(&order)?;
//! println!("{}", stereotypes.primary().map(|s| s.display_name()).unwrap_or("-"));
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        CachingStereotypeFactory, CatalogService, IntrospectingStereotypeFactory,
        StereotypeFactory, TreeWalker, WalkOptions, WalkReport,
        ports::{
            CatalogSource, Introspector, LineSink, MethodExtractor, NodeHandler, PackageExtractor,
            TypeExtractor,
        },
    };
    pub use crate::domain::{
        Catalog, Classification, GroupType, Marker, Stereotype, StereotypeDeclaration,
        StereotypeDefinition, StereotypeGroup, StereotypeGroups, Stereotypes,
    };
    pub use crate::error::{StereoError, StereoResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
