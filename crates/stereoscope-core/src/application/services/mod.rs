//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "assemble the catalog" or "render the tree".

pub mod catalog_service;
pub mod tree_walker;

pub use catalog_service::CatalogService;
pub use tree_walker::{TreeWalker, WalkFailure, WalkOptions, WalkReport};
