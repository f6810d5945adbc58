//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `stereoscope-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Introspector`: Structural queries against the analyzed codebase
//!   - `CatalogSource`: Where catalog entries come from
//!   - `PackageExtractor` / `TypeExtractor` / `MethodExtractor`: Tree shape
//!   - `NodeHandler`: Node label formatting
//!   - `LineSink`: Rendered tree output
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `StereotypeFactory` (see `crate::application::factory`)

pub mod output;

pub use output::{
    CatalogSource, Introspector, LineSink, MethodExtractor, NodeHandler, PackageExtractor,
    TypeExtractor,
};
