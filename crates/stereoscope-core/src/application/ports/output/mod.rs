//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what detection and traversal need from the analyzed
//! codebase and from the surrounding tool. The `stereoscope-adapters` crate
//! provides implementations.

use std::fmt::Debug;
use std::hash::Hash;

use crate::domain::{Catalog, Classification, Marker, StereotypeDeclaration};
use crate::error::StereoResult;

/// Port for structural queries against the analyzed codebase.
///
/// Element handles are opaque to detection; they only need to be cheap to
/// clone and usable as cache keys.
///
/// Implemented by:
/// - `stereoscope_adapters::model::CodebaseModel` (JSON/TOML model files)
pub trait Introspector {
    type Package: Clone + Eq + Hash + Debug;
    type Type: Clone + Eq + Hash + Debug;
    type Method: Clone + Eq + Hash + Debug;

    /// Markers directly attached to a package.
    fn package_markers(&self, package: &Self::Package) -> StereoResult<Vec<Marker>>;

    /// Markers directly attached to a type.
    fn type_markers(&self, ty: &Self::Type) -> StereoResult<Vec<Marker>>;

    /// Markers directly attached to a method.
    fn method_markers(&self, method: &Self::Method) -> StereoResult<Vec<Marker>>;

    /// Capability types a type directly extends or implements.
    fn capabilities(&self, ty: &Self::Type) -> StereoResult<Vec<Self::Type>>;

    /// The package a type lives in, if any.
    fn package_of(&self, ty: &Self::Type) -> StereoResult<Option<Self::Package>>;

    /// Fully qualified name of a type.
    fn type_name(&self, ty: &Self::Type) -> StereoResult<String>;

    /// The stereotype declaration a type carries on itself, if any.
    fn type_declaration(&self, ty: &Self::Type) -> StereoResult<Option<StereotypeDeclaration>>;

    /// Markers attached to a marker's own definition.
    fn meta_markers(&self, marker: &Marker) -> StereoResult<Vec<Marker>>;

    /// The stereotype declaration a marker carries on its definition, if any.
    fn marker_declaration(&self, marker: &Marker) -> StereoResult<Option<StereotypeDeclaration>>;
}

impl<I: Introspector + ?Sized> Introspector for &I {
    type Package = I::Package;
    type Type = I::Type;
    type Method = I::Method;

    fn package_markers(&self, package: &Self::Package) -> StereoResult<Vec<Marker>> {
        (**self).package_markers(package)
    }

    fn type_markers(&self, ty: &Self::Type) -> StereoResult<Vec<Marker>> {
        (**self).type_markers(ty)
    }

    fn method_markers(&self, method: &Self::Method) -> StereoResult<Vec<Marker>> {
        (**self).method_markers(method)
    }

    fn capabilities(&self, ty: &Self::Type) -> StereoResult<Vec<Self::Type>> {
        (**self).capabilities(ty)
    }

    fn package_of(&self, ty: &Self::Type) -> StereoResult<Option<Self::Package>> {
        (**self).package_of(ty)
    }

    fn type_name(&self, ty: &Self::Type) -> StereoResult<String> {
        (**self).type_name(ty)
    }

    fn type_declaration(&self, ty: &Self::Type) -> StereoResult<Option<StereotypeDeclaration>> {
        (**self).type_declaration(ty)
    }

    fn meta_markers(&self, marker: &Marker) -> StereoResult<Vec<Marker>> {
        (**self).meta_markers(marker)
    }

    fn marker_declaration(&self, marker: &Marker) -> StereoResult<Option<StereotypeDeclaration>> {
        (**self).marker_declaration(marker)
    }
}

/// Port for a single origin of catalog entries.
///
/// Implemented by:
/// - `stereoscope_adapters::catalog_loader::CatalogFile` (JSON or TOML file)
/// - `stereoscope_adapters::builtin_catalog::BuiltinCatalog` (bundled defaults)
pub trait CatalogSource {
    /// Human-readable location, used in logs and errors.
    fn locator(&self) -> String;

    fn load(&self) -> StereoResult<Catalog>;
}

/// Child packages of a package.
pub trait PackageExtractor<P> {
    fn child_packages(&self, package: &P) -> StereoResult<Vec<P>>;
}

/// Types directly contained in a package.
pub trait TypeExtractor<P, T> {
    fn types_in(&self, package: &P) -> StereoResult<Vec<T>>;
}

/// Methods declared by a type.
pub trait MethodExtractor<T, M> {
    fn methods_of(&self, ty: &T) -> StereoResult<Vec<M>>;
}

impl<P, F> PackageExtractor<P> for F
where
    F: Fn(&P) -> StereoResult<Vec<P>>,
{
    fn child_packages(&self, package: &P) -> StereoResult<Vec<P>> {
        self(package)
    }
}

impl<P, T, F> TypeExtractor<P, T> for F
where
    F: Fn(&P) -> StereoResult<Vec<T>>,
{
    fn types_in(&self, package: &P) -> StereoResult<Vec<T>> {
        self(package)
    }
}

impl<T, M, F> MethodExtractor<T, M> for F
where
    F: Fn(&T) -> StereoResult<Vec<M>>,
{
    fn methods_of(&self, ty: &T) -> StereoResult<Vec<M>> {
        self(ty)
    }
}

/// Produces the label shown for each tree node.
pub trait NodeHandler<P, T, M> {
    fn package_label(&self, package: &P, classification: &Classification) -> String;

    fn type_label(&self, ty: &T, classification: &Classification) -> String;

    fn method_label(&self, method: &M, classification: &Classification) -> String;
}

/// Receives rendered tree lines.
///
/// Implemented by:
/// - `stereoscope_adapters::sink::BufferSink` (in-memory, for tests)
/// - `stereoscope_adapters::sink::WriterSink` (any `io::Write`)
pub trait LineSink {
    /// Write one line at the given nesting depth (0 for the root).
    fn write_line(&mut self, depth: usize, text: &str) -> StereoResult<()>;
}
