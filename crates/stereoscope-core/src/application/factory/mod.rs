//! Stereotype detection.
//!
//! [`StereotypeFactory`] is the lookup contract the rest of the tool talks
//! to. Two implementations ship with the core:
//!
//! - [`IntrospectingStereotypeFactory`]: resolves markers through an
//!   [`Introspector`](crate::application::ports::Introspector) and a catalog
//! - [`CachingStereotypeFactory`]: memoizes any other factory

pub mod caching;
pub mod introspecting;

pub use caching::{CacheCounts, CachingStereotypeFactory};
pub use introspecting::IntrospectingStereotypeFactory;

use crate::domain::Stereotypes;
use crate::error::StereoResult;

/// Maps packages, types and methods to the stereotypes they carry.
///
/// Elements without applicable markers yield [`Stereotypes::EMPTY`].
/// Implementations are deterministic for a fixed catalog and codebase;
/// errors only report failures of the underlying collaborators.
pub trait StereotypeFactory {
    type Package;
    type Type;
    type Method;

    fn from_package(&self, package: &Self::Package) -> StereoResult<Stereotypes>;

    /// Includes the stereotypes of the enclosing package after the type's own.
    fn from_type(&self, ty: &Self::Type) -> StereoResult<Stereotypes>;

    fn from_method(&self, method: &Self::Method) -> StereoResult<Stereotypes>;

    /// [`Self::from_type`], taking the package's stereotypes from `packages`.
    ///
    /// Wrappers pass their own package lookup so that package results are
    /// shared across every type of that package.
    fn from_type_with(
        &self,
        ty: &Self::Type,
        _packages: &dyn Fn(&Self::Package) -> StereoResult<Stereotypes>,
    ) -> StereoResult<Stereotypes> {
        self.from_type(ty)
    }
}

impl<F: StereotypeFactory + ?Sized> StereotypeFactory for &F {
    type Package = F::Package;
    type Type = F::Type;
    type Method = F::Method;

    fn from_package(&self, package: &Self::Package) -> StereoResult<Stereotypes> {
        (**self).from_package(package)
    }

    fn from_type(&self, ty: &Self::Type) -> StereoResult<Stereotypes> {
        (**self).from_type(ty)
    }

    fn from_method(&self, method: &Self::Method) -> StereoResult<Stereotypes> {
        (**self).from_method(method)
    }

    fn from_type_with(
        &self,
        ty: &Self::Type,
        packages: &dyn Fn(&Self::Package) -> StereoResult<Stereotypes>,
    ) -> StereoResult<Stereotypes> {
        (**self).from_type_with(ty, packages)
    }
}
