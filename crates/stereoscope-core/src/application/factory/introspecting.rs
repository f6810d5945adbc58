//! Detection driven by an [`Introspector`] and a [`Catalog`].
//!
//! A type's stereotypes are assembled in this order, merged first-seen-wins:
//!
//! 1. what the type declares itself (or the catalog binds to its name)
//! 2. its direct markers, each expanded through meta-markers
//! 3. stereotypes of its capabilities, most specific first
//! 4. stereotypes of its package
//!
//! Marker and capability recursion carry visited sets, so cyclic marker
//! graphs and diamond-shaped capability hierarchies terminate.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::factory::StereotypeFactory;
use crate::application::ports::Introspector;
use crate::domain::{
    Catalog, Marker, Stereotype, StereotypeDeclaration, StereotypeDefinition, Stereotypes,
    default_display_name,
};
use crate::error::StereoResult;

pub struct IntrospectingStereotypeFactory<I> {
    introspector: I,
    catalog: Arc<Catalog>,
    local_only: bool,
}

impl<I: Introspector> IntrospectingStereotypeFactory<I> {
    pub fn new(introspector: I, catalog: Arc<Catalog>) -> Self {
        Self {
            introspector,
            catalog,
            local_only: false,
        }
    }

    /// When enabled, non-inherited stereotypes found on capabilities stay on
    /// the capability and are not reported for implementing types.
    pub fn local_only(mut self, enabled: bool) -> Self {
        self.local_only = enabled;
        self
    }

    // ── Own stereotypes ──────────────────────────────────────────────────────

    fn own_stereotypes(&self, ty: &I::Type) -> StereoResult<Stereotypes> {
        let name = self.introspector.type_name(ty)?;

        let mut own = match self.introspector.type_declaration(ty)? {
            Some(declaration) => Stereotypes::of(self.declared_stereotype(&name, &declaration)),
            None => self
                .catalog
                .definition_for_assignable(&name)
                .map(|definition| Stereotypes::of(self.defined_stereotype(definition)))
                .unwrap_or_default(),
        };

        for marker in self.introspector.type_markers(ty)? {
            own = own.and(&self.resolve_marker(&marker)?);
        }
        Ok(own)
    }

    fn markers_to_stereotypes(&self, markers: Vec<Marker>) -> StereoResult<Stereotypes> {
        let mut result = Stereotypes::default();
        for marker in markers {
            result = result.and(&self.resolve_marker(&marker)?);
        }
        Ok(result)
    }

    // ── Marker resolution ────────────────────────────────────────────────────

    /// Stereotypes a marker stands for: its own, then those of its meta-markers.
    fn resolve_marker(&self, marker: &Marker) -> StereoResult<Stereotypes> {
        let mut visited = HashSet::new();
        let mut found = Vec::new();
        self.collect_marker(marker, &mut visited, &mut found)?;
        Ok(Stereotypes::new(found))
    }

    fn collect_marker(
        &self,
        marker: &Marker,
        visited: &mut HashSet<Marker>,
        found: &mut Vec<Stereotype>,
    ) -> StereoResult<()> {
        if !visited.insert(marker.clone()) {
            debug!(marker = %marker, "marker already visited, stopping");
            return Ok(());
        }

        match self.introspector.marker_declaration(marker)? {
            Some(declaration) => found.push(self.declared_stereotype(marker.name(), &declaration)),
            None => {
                if let Some(definition) = self.catalog.definition_for_annotation(marker.name()) {
                    found.push(self.defined_stereotype(definition));
                }
            }
        }

        for meta in self.introspector.meta_markers(marker)? {
            self.collect_marker(&meta, visited, found)?;
        }
        Ok(())
    }

    // ── Capabilities ─────────────────────────────────────────────────────────

    fn capability_stereotypes(&self, ty: &I::Type) -> StereoResult<Stereotypes> {
        let mut visited = HashSet::new();
        visited.insert(ty.clone());
        let mut result = Stereotypes::default();
        self.collect_capabilities(ty, &mut visited, &mut result)?;
        Ok(result)
    }

    fn collect_capabilities(
        &self,
        ty: &I::Type,
        visited: &mut HashSet<I::Type>,
        result: &mut Stereotypes,
    ) -> StereoResult<()> {
        for capability in self.introspector.capabilities(ty)? {
            if !visited.insert(capability.clone()) {
                continue;
            }
            *result = result.and(&self.own_stereotypes(&capability)?);
            self.collect_capabilities(&capability, visited, result)?;
        }
        Ok(())
    }

    // ── Stereotype construction ──────────────────────────────────────────────

    fn declared_stereotype(&self, carrier: &str, declaration: &StereotypeDeclaration) -> Stereotype {
        let id = declaration
            .id
            .clone()
            .unwrap_or_else(|| carrier.to_string());
        let name = declaration
            .name
            .clone()
            .or_else(|| {
                self.catalog
                    .definition(&id)
                    .and_then(StereotypeDefinition::name)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| default_display_name(&id));

        self.enrich(
            Stereotype::new(id, name)
                .with_priority(declaration.priority)
                .with_groups(declaration.groups.iter().cloned())
                .inherited(declaration.inherited),
        )
    }

    fn defined_stereotype(&self, definition: &StereotypeDefinition) -> Stereotype {
        self.enrich(definition.to_stereotype())
    }

    /// Declared group ids first, then catalog groups in prioritized order.
    fn enrich(&self, stereotype: Stereotype) -> Stereotype {
        let catalog_groups = self.catalog.groups_for(stereotype.id());
        if catalog_groups.is_empty() {
            return stereotype;
        }
        let groups: Vec<String> = stereotype
            .groups()
            .iter()
            .cloned()
            .chain(catalog_groups.ids().into_iter().map(str::to_string))
            .collect();
        stereotype.with_groups(groups)
    }
}

impl<I: Introspector> StereotypeFactory for IntrospectingStereotypeFactory<I> {
    type Package = I::Package;
    type Type = I::Type;
    type Method = I::Method;

    #[instrument(level = "debug", skip(self))]
    fn from_package(&self, package: &I::Package) -> StereoResult<Stereotypes> {
        let markers = self.introspector.package_markers(package)?;
        self.markers_to_stereotypes(markers)
    }

    fn from_type(&self, ty: &I::Type) -> StereoResult<Stereotypes> {
        self.from_type_with(ty, &|package| self.from_package(package))
    }

    #[instrument(level = "debug", skip(self, packages))]
    fn from_type_with(
        &self,
        ty: &I::Type,
        packages: &dyn Fn(&I::Package) -> StereoResult<Stereotypes>,
    ) -> StereoResult<Stereotypes> {
        let own = self.own_stereotypes(ty)?;

        let mut inherited = self.capability_stereotypes(ty)?;
        if self.local_only {
            inherited = inherited.filter(Stereotype::is_inherited);
        }

        let package = match self.introspector.package_of(ty)? {
            Some(package) => packages(&package)?,
            None => Stereotypes::EMPTY,
        };

        let result = own.and(&inherited).and(&package);
        debug!(count = result.len(), stereotypes = %result, "type classified");
        Ok(result)
    }

    #[instrument(level = "debug", skip(self))]
    fn from_method(&self, method: &I::Method) -> StereoResult<Stereotypes> {
        let markers = self.introspector.method_markers(method)?;
        self.markers_to_stereotypes(markers)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, ElementKind, StereotypeGroup};
    use crate::error::StereoError;
    use std::collections::HashMap;

    /// Types and markers keyed by name; packages are plain strings.
    #[derive(Default)]
    struct Fixture {
        type_markers: HashMap<&'static str, Vec<&'static str>>,
        marker_declarations: HashMap<&'static str, StereotypeDeclaration>,
        meta: HashMap<&'static str, Vec<&'static str>>,
    }

    impl Introspector for Fixture {
        type Package = String;
        type Type = String;
        type Method = String;

        fn package_markers(&self, _: &String) -> StereoResult<Vec<Marker>> {
            Ok(Vec::new())
        }

        fn type_markers(&self, ty: &String) -> StereoResult<Vec<Marker>> {
            self.type_markers
                .get(ty.as_str())
                .map(|m| m.iter().map(|&n| Marker::new(n)).collect())
                .ok_or_else(|| DomainError::unknown(ElementKind::Type, ty.clone()).into())
        }

        fn method_markers(&self, _: &String) -> StereoResult<Vec<Marker>> {
            Ok(Vec::new())
        }

        fn capabilities(&self, _: &String) -> StereoResult<Vec<String>> {
            Ok(Vec::new())
        }

        fn package_of(&self, _: &String) -> StereoResult<Option<String>> {
            Ok(None)
        }

        fn type_name(&self, ty: &String) -> StereoResult<String> {
            Ok(ty.clone())
        }

        fn type_declaration(&self, _: &String) -> StereoResult<Option<StereotypeDeclaration>> {
            Ok(None)
        }

        fn meta_markers(&self, marker: &Marker) -> StereoResult<Vec<Marker>> {
            Ok(self
                .meta
                .get(marker.name())
                .map(|m| m.iter().map(|&n| Marker::new(n)).collect())
                .unwrap_or_default())
        }

        fn marker_declaration(&self, marker: &Marker) -> StereoResult<Option<StereotypeDeclaration>> {
            Ok(self.marker_declarations.get(marker.name()).cloned())
        }
    }

    fn catalog() -> Arc<Catalog> {
        Arc::new(
            Catalog::builder()
                .group(StereotypeGroup::new("ddd", "DDD"))
                .group(StereotypeGroup::new("ddd.building", "Building Blocks"))
                .stereotype(
                    StereotypeDefinition::new("ddd.Entity")
                        .with_name("Entity (DDD)")
                        .with_group("ddd.building")
                        .with_annotated("org.jmolecules.ddd.annotation.Entity"),
                )
                .membership("ddd.Entity", "ddd")
                .build()
                .unwrap(),
        )
    }

    #[test]
    fn catalog_annotation_binding_is_enriched_with_groups() {
        let mut fixture = Fixture::default();
        fixture
            .type_markers
            .insert("Order", vec!["org.jmolecules.ddd.annotation.Entity"]);

        let factory = IntrospectingStereotypeFactory::new(fixture, catalog());
        let result = factory.from_type(&"Order".to_string()).unwrap();

        let entity = result.get("ddd.Entity").unwrap();
        assert_eq!(entity.display_name(), "Entity (DDD)");
        assert_eq!(entity.groups(), &["ddd.building".to_string(), "ddd".to_string()]);
    }

    #[test]
    fn declaration_defaults_come_from_catalog_then_id() {
        let mut fixture = Fixture::default();
        fixture.type_markers.insert("A", vec!["x.Entity", "x.Plain"]);
        fixture
            .marker_declarations
            .insert("x.Entity", StereotypeDeclaration::new().id("ddd.Entity").group("custom"));
        fixture
            .marker_declarations
            .insert("x.Plain", StereotypeDeclaration::new());

        let factory = IntrospectingStereotypeFactory::new(fixture, catalog());
        let result = factory.from_type(&"A".to_string()).unwrap();

        assert_eq!(result.ids(), vec!["ddd.Entity", "x.Plain"]);
        let entity = result.get("ddd.Entity").unwrap();
        assert_eq!(entity.display_name(), "Entity (DDD)");
        assert_eq!(
            entity.groups(),
            &["custom".to_string(), "ddd".to_string(), "ddd.building".to_string()]
        );
        let plain = result.get("x.Plain").unwrap();
        assert_eq!(plain.display_name(), "Plain");
        assert!(plain.groups().is_empty());
    }

    #[test]
    fn meta_markers_resolve_transitively_and_stop_on_cycles() {
        let mut fixture = Fixture::default();
        fixture.type_markers.insert("Svc", vec!["app.UseCase"]);
        fixture.meta.insert("app.UseCase", vec!["app.Service"]);
        fixture.meta.insert("app.Service", vec!["app.UseCase", "app.Service"]);
        fixture
            .marker_declarations
            .insert("app.Service", StereotypeDeclaration::new().id("app.Service"));

        let factory = IntrospectingStereotypeFactory::new(fixture, Arc::new(Catalog::empty()));
        let result = factory.from_type(&"Svc".to_string()).unwrap();

        assert_eq!(result.ids(), vec!["app.Service"]);
    }

    #[test]
    fn unknown_type_fails_fast() {
        let factory = IntrospectingStereotypeFactory::new(Fixture::default(), catalog());

        let err = factory.from_type(&"Ghost".to_string()).unwrap_err();
        assert!(matches!(
            err,
            StereoError::Domain(DomainError::UnknownElement { .. })
        ));
    }
}
