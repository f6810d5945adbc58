//! Infrastructure adapters for Stereoscope.
//!
//! This crate implements the ports defined in `stereoscope-core::application::ports`.
//! It contains all file formats and I/O operations.

pub mod builtin_catalog;
pub mod catalog_loader;
pub mod format;
pub mod handler;
pub mod model;
pub mod sink;

// Re-export commonly used adapters
pub use builtin_catalog::{BUILTIN_SOURCE, BuiltinCatalog};
pub use catalog_loader::{CatalogDirectoryScanner, CatalogDocument, CatalogFile, source_for};
pub use format::{Format, FormatError};
pub use handler::DefaultNodeHandler;
pub use model::{CodebaseModel, MethodRef, PackageRef, TypeRef};
pub use sink::{BufferSink, WriterSink};
