//! Catalog Service - assembles the run's catalog from its sources.
//!
//! Sources are merged in registration order. Earlier sources win on
//! conflicting ids, so the built-in catalog is usually registered first and
//! project files can only add to it.

use tracing::{debug, info, instrument};

use crate::{application::ports::CatalogSource, domain::Catalog, error::StereoResult};

/// Ordered list of catalog sources.
#[derive(Default)]
pub struct CatalogService {
    sources: Vec<Box<dyn CatalogSource>>,
}

impl CatalogService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a source after all previously registered ones.
    pub fn with_source(mut self, source: Box<dyn CatalogSource>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn add_source(&mut self, source: Box<dyn CatalogSource>) {
        self.sources.push(source);
    }

    pub fn locators(&self) -> Vec<String> {
        self.sources.iter().map(|s| s.locator()).collect()
    }

    /// Load every source and merge them into one catalog.
    ///
    /// The first failing source aborts loading.
    #[instrument(skip_all, fields(sources = self.sources.len()))]
    pub fn load(&self) -> StereoResult<Catalog> {
        let mut catalog = Catalog::empty();
        for source in &self.sources {
            let loaded = source.load()?;
            debug!(
                locator = %source.locator(),
                groups = loaded.groups().len(),
                stereotypes = loaded.definitions().len(),
                "Catalog source loaded"
            );
            catalog = catalog.merge(&loaded);
        }
        info!(
            groups = catalog.groups().len(),
            stereotypes = catalog.definitions().len(),
            "Catalog assembled"
        );
        Ok(catalog)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ApplicationError;
    use crate::domain::{StereotypeDefinition, StereotypeGroup};
    use crate::error::StereoError;

    struct Fixed(&'static str, Catalog);

    impl CatalogSource for Fixed {
        fn locator(&self) -> String {
            self.0.to_string()
        }

        fn load(&self) -> StereoResult<Catalog> {
            Ok(self.1.clone())
        }
    }

    struct Broken;

    impl CatalogSource for Broken {
        fn locator(&self) -> String {
            "file:///broken.json".into()
        }

        fn load(&self) -> StereoResult<Catalog> {
            Err(ApplicationError::CatalogSource {
                locator: self.locator(),
                reason: "unexpected end of input".into(),
            }
            .into())
        }
    }

    fn single(group: &str, name: &str, stereotype: &str) -> Catalog {
        Catalog::builder()
            .group(StereotypeGroup::new(group, name))
            .stereotype(StereotypeDefinition::new(stereotype).with_group(group))
            .build()
            .unwrap()
    }

    #[test]
    fn sources_merge_in_order() {
        let service = CatalogService::new()
            .with_source(Box::new(Fixed("builtin", single("ddd", "DDD", "ddd.Entity"))))
            .with_source(Box::new(Fixed("local", single("ddd", "Local DDD", "app.Thing"))));

        let catalog = service.load().unwrap();

        assert_eq!(service.locators(), vec!["builtin", "local"]);
        assert_eq!(catalog.group("ddd").unwrap().display_name(), "DDD");
        assert!(catalog.definition("ddd.Entity").is_some());
        assert!(catalog.definition("app.Thing").is_some());
        assert_eq!(catalog.group_ids_for("app.Thing"), &["ddd".to_string()]);
    }

    #[test]
    fn no_sources_yield_empty_catalog() {
        assert!(CatalogService::new().load().unwrap().is_empty());
    }

    #[test]
    fn failing_source_aborts() {
        let mut service = CatalogService::new();
        service.add_source(Box::new(Broken));

        let err = service.load().unwrap_err();
        assert!(matches!(
            err,
            StereoError::Application(ApplicationError::CatalogSource { .. })
        ));
    }
}
