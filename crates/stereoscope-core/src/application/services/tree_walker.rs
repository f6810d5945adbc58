//! Tree Walker - classified, depth-first rendering of a package hierarchy.
//!
//! The walker only traverses and classifies. Children come from the
//! extractor ports, stereotypes from a [`StereotypeFactory`], labels from a
//! [`NodeHandler`] and output goes to a [`LineSink`].

use std::fmt::Display;

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::{
    application::{
        factory::StereotypeFactory,
        ports::{LineSink, MethodExtractor, NodeHandler, PackageExtractor, TypeExtractor},
    },
    domain::{Catalog, Classification, Stereotypes},
    error::StereoResult,
};

/// Knobs for a single walk.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkOptions {
    /// Namespace prefixes under which stereotype groups are coalesced.
    pub groupers: Vec<String>,
    /// Abort on the first failed detection instead of annotating the node.
    pub fail_fast: bool,
    /// Render stereotyped methods below their type.
    pub show_methods: bool,
}

/// A node whose detection failed while the walk continued.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WalkFailure {
    pub element: String,
    pub message: String,
}

/// What a walk visited.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct WalkReport {
    pub packages: usize,
    pub types: usize,
    pub methods: usize,
    pub stereotyped_types: usize,
    pub failures: Vec<WalkFailure>,
}

impl WalkReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Fold the report of another walk (e.g. a second root) into this one.
    pub fn merge(&mut self, other: WalkReport) {
        self.packages += other.packages;
        self.types += other.types;
        self.methods += other.methods;
        self.stereotyped_types += other.stereotyped_types;
        self.failures.extend(other.failures);
    }
}

/// Depth-first walker over packages, their types and (optionally) methods.
pub struct TreeWalker<'a, F: StereotypeFactory> {
    factory: &'a F,
    catalog: &'a Catalog,
    packages: &'a dyn PackageExtractor<F::Package>,
    types: &'a dyn TypeExtractor<F::Package, F::Type>,
    methods: Option<&'a dyn MethodExtractor<F::Type, F::Method>>,
    options: WalkOptions,
}

impl<'a, F> TreeWalker<'a, F>
where
    F: StereotypeFactory,
    F::Package: Display,
    F::Type: Display,
    F::Method: Display,
{
    pub fn new(
        factory: &'a F,
        catalog: &'a Catalog,
        packages: &'a dyn PackageExtractor<F::Package>,
        types: &'a dyn TypeExtractor<F::Package, F::Type>,
    ) -> Self {
        Self {
            factory,
            catalog,
            packages,
            types,
            methods: None,
            options: WalkOptions::default(),
        }
    }

    pub fn with_methods(mut self, methods: &'a dyn MethodExtractor<F::Type, F::Method>) -> Self {
        self.methods = Some(methods);
        self
    }

    pub fn with_options(mut self, options: WalkOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &WalkOptions {
        &self.options
    }

    /// Walk from `root`, writing one line per rendered node.
    ///
    /// Extractor and sink failures abort the walk. Detection failures abort
    /// only with `fail_fast`; otherwise they are reported and rendered.
    #[instrument(skip_all, fields(root = %root, fail_fast = self.options.fail_fast))]
    pub fn walk<H>(
        &self,
        root: &F::Package,
        handler: &H,
        sink: &mut dyn LineSink,
    ) -> StereoResult<WalkReport>
    where
        H: NodeHandler<F::Package, F::Type, F::Method> + ?Sized,
    {
        let mut report = WalkReport::default();
        self.walk_package(root, 0, handler, sink, &mut report)?;
        debug!(
            packages = report.packages,
            types = report.types,
            failures = report.failures.len(),
            "Walk finished"
        );
        Ok(report)
    }

    fn walk_package<H>(
        &self,
        package: &F::Package,
        depth: usize,
        handler: &H,
        sink: &mut dyn LineSink,
        report: &mut WalkReport,
    ) -> StereoResult<()>
    where
        H: NodeHandler<F::Package, F::Type, F::Method> + ?Sized,
    {
        report.packages += 1;
        let classification = self.classify(self.factory.from_package(package), package, report)?;
        sink.write_line(depth, &handler.package_label(package, &classification))?;

        for ty in self.types.types_in(package)? {
            report.types += 1;
            let classification = self.classify(self.factory.from_type(&ty), &ty, report)?;
            if !classification.is_empty() {
                report.stereotyped_types += 1;
            }
            sink.write_line(depth + 1, &handler.type_label(&ty, &classification))?;

            if self.options.show_methods {
                self.walk_methods(&ty, depth + 2, handler, sink, report)?;
            }
        }

        for child in self.packages.child_packages(package)? {
            self.walk_package(&child, depth + 1, handler, sink, report)?;
        }
        Ok(())
    }

    fn walk_methods<H>(
        &self,
        ty: &F::Type,
        depth: usize,
        handler: &H,
        sink: &mut dyn LineSink,
        report: &mut WalkReport,
    ) -> StereoResult<()>
    where
        H: NodeHandler<F::Package, F::Type, F::Method> + ?Sized,
    {
        let Some(extractor) = self.methods else {
            return Ok(());
        };

        for method in extractor.methods_of(ty)? {
            report.methods += 1;
            let classification = self.classify(self.factory.from_method(&method), &method, report)?;
            if classification.is_empty() && classification.failure().is_none() {
                continue;
            }
            sink.write_line(depth, &handler.method_label(&method, &classification))?;
        }
        Ok(())
    }

    fn classify(
        &self,
        detected: StereoResult<Stereotypes>,
        element: &dyn Display,
        report: &mut WalkReport,
    ) -> StereoResult<Classification> {
        match detected {
            Ok(stereotypes) => Ok(Classification::classify(
                stereotypes,
                self.catalog,
                &self.options.groupers,
            )),
            Err(err) if !self.options.fail_fast => {
                let element = element.to_string();
                warn!(element = %element, error = %err, "Stereotype detection failed, continuing");
                report.failures.push(WalkFailure {
                    element,
                    message: err.to_string(),
                });
                Ok(Classification::failed(err.to_string()))
            }
            Err(err) => Err(err),
        }
    }
}
