//! Memoizing wrapper around any [`StereotypeFactory`].

use std::cell::RefCell;
use std::collections::HashMap;
use std::hash::Hash;

use tracing::trace;

use crate::application::factory::StereotypeFactory;
use crate::domain::Stereotypes;
use crate::error::StereoResult;

/// Number of memoized entries per element kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheCounts {
    pub packages: usize,
    pub types: usize,
    pub methods: usize,
}

/// Remembers the result of the first successful lookup of every element.
///
/// There is no eviction; entries live as long as the adapter. The caches use
/// `RefCell`, so the adapter is not `Sync`. Wrap it in a `Mutex` to share it
/// between threads. Failed lookups are not cached and will be retried.
pub struct CachingStereotypeFactory<F>
where
    F: StereotypeFactory,
{
    delegate: F,
    packages: RefCell<HashMap<F::Package, Stereotypes>>,
    types: RefCell<HashMap<F::Type, Stereotypes>>,
    methods: RefCell<HashMap<F::Method, Stereotypes>>,
}

impl<F> CachingStereotypeFactory<F>
where
    F: StereotypeFactory,
    F::Package: Hash + Eq + Clone,
    F::Type: Hash + Eq + Clone,
    F::Method: Hash + Eq + Clone,
{
    pub fn new(delegate: F) -> Self {
        Self {
            delegate,
            packages: RefCell::new(HashMap::new()),
            types: RefCell::new(HashMap::new()),
            methods: RefCell::new(HashMap::new()),
        }
    }

    pub fn delegate(&self) -> &F {
        &self.delegate
    }

    pub fn cached_counts(&self) -> CacheCounts {
        CacheCounts {
            packages: self.packages.borrow().len(),
            types: self.types.borrow().len(),
            methods: self.methods.borrow().len(),
        }
    }

    /// Drop the caches and hand back the wrapped factory.
    pub fn into_inner(self) -> F {
        self.delegate
    }
}

impl<F> StereotypeFactory for CachingStereotypeFactory<F>
where
    F: StereotypeFactory,
    F::Package: Hash + Eq + Clone,
    F::Type: Hash + Eq + Clone,
    F::Method: Hash + Eq + Clone,
{
    type Package = F::Package;
    type Type = F::Type;
    type Method = F::Method;

    fn from_package(&self, package: &Self::Package) -> StereoResult<Stereotypes> {
        memoize(&self.packages, package, "package", || {
            self.delegate.from_package(package)
        })
    }

    /// Package stereotypes needed by the type come from this adapter's
    /// package cache.
    fn from_type(&self, ty: &Self::Type) -> StereoResult<Stereotypes> {
        memoize(&self.types, ty, "type", || {
            self.delegate
                .from_type_with(ty, &|package| self.from_package(package))
        })
    }

    fn from_method(&self, method: &Self::Method) -> StereoResult<Stereotypes> {
        memoize(&self.methods, method, "method", || {
            self.delegate.from_method(method)
        })
    }
}

fn memoize<K, C>(
    cache: &RefCell<HashMap<K, Stereotypes>>,
    key: &K,
    kind: &'static str,
    compute: C,
) -> StereoResult<Stereotypes>
where
    K: Hash + Eq + Clone,
    C: FnOnce() -> StereoResult<Stereotypes>,
{
    if let Some(hit) = cache.borrow().get(key) {
        trace!(kind, "stereotype cache hit");
        return Ok(hit.clone());
    }

    let computed = compute()?;
    cache.borrow_mut().insert(key.clone(), computed.clone());
    Ok(computed)
}
