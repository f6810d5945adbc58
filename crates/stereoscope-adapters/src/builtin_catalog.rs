//! The default catalog that ships with Stereoscope.
//!
//! It covers the jMolecules vocabulary: DDD building blocks, domain events
//! and the layered, onion and hexagonal architecture styles. Stereotypes are
//! bound both to the jMolecules annotations (`annotated`) and, where
//! jMolecules offers them, to the type-based interfaces (`assignable`).
//!
//! Architecture stereotypes get a higher priority number than design ones,
//! so a type's primary stereotype is its DDD role when it has one.

use stereoscope_core::{
    application::ports::CatalogSource,
    domain::{Catalog, GroupType, StereotypeDefinition, StereotypeGroup},
    error::StereoResult,
};

/// Source locator stamped onto every built-in entry.
pub const BUILTIN_SOURCE: &str = "builtin:jmolecules";

const DDD_ANNOTATION: &str = "org.jmolecules.ddd.annotation";
const DDD_TYPES: &str = "org.jmolecules.ddd.types";
const EVENT_ANNOTATION: &str = "org.jmolecules.event.annotation";
const EVENT_TYPES: &str = "org.jmolecules.event.types";
const LAYERED: &str = "org.jmolecules.architecture.layered";
const ONION: &str = "org.jmolecules.architecture.onion.classical";
const HEXAGONAL: &str = "org.jmolecules.architecture.hexagonal";

/// [`CatalogSource`] for the bundled catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuiltinCatalog;

impl BuiltinCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Build the catalog without going through the port.
    pub fn catalog() -> StereoResult<Catalog> {
        let mut builder = Catalog::builder();
        for group in groups() {
            builder = builder.group(group.with_source(BUILTIN_SOURCE));
        }
        for definition in definitions() {
            builder = builder.stereotype(definition.with_source(BUILTIN_SOURCE));
        }
        Ok(builder.build()?)
    }
}

impl CatalogSource for BuiltinCatalog {
    fn locator(&self) -> String {
        BUILTIN_SOURCE.to_string()
    }

    fn load(&self) -> StereoResult<Catalog> {
        Self::catalog()
    }
}

fn groups() -> Vec<StereotypeGroup> {
    vec![
        StereotypeGroup::new("ddd", "DDD").with_type(GroupType::Design),
        StereotypeGroup::new("event", "Events").with_type(GroupType::Design),
        StereotypeGroup::new("architecture", "Architecture")
            .with_type(GroupType::Architecture)
            .with_priority(100),
        StereotypeGroup::new("architecture.layered", "Layers")
            .with_type(GroupType::Architecture)
            .with_priority(100),
        StereotypeGroup::new("architecture.onion", "Onion")
            .with_type(GroupType::Architecture)
            .with_priority(110),
        StereotypeGroup::new("architecture.hexagonal", "Hexagonal")
            .with_type(GroupType::Architecture)
            .with_priority(120),
    ]
}

fn definitions() -> Vec<StereotypeDefinition> {
    let mut definitions = Vec::new();

    // DDD building blocks: annotation and type-based flavours.
    for (name, typed, priority) in [
        ("AggregateRoot", true, 0),
        ("Entity", true, 10),
        ("ValueObject", true, 10),
        ("Identity", false, 20),
        ("Repository", true, 0),
        ("Service", false, 0),
        ("Factory", false, 0),
        ("Module", false, 30),
        ("BoundedContext", false, 30),
    ] {
        let mut definition = StereotypeDefinition::new(format!("ddd.{name}"))
            .with_group("ddd")
            .with_priority(priority)
            .with_annotated(format!("{DDD_ANNOTATION}.{name}"));
        if typed {
            definition = definition.with_assignable(format!("{DDD_TYPES}.{name}"));
        }
        definitions.push(definition);
    }
    definitions.push(
        StereotypeDefinition::new("ddd.Identifier")
            .with_group("ddd")
            .with_priority(20)
            .with_assignable(format!("{DDD_TYPES}.Identifier")),
    );
    definitions.push(
        StereotypeDefinition::new("ddd.Association")
            .with_group("ddd")
            .with_priority(20)
            .with_assignable(format!("{DDD_TYPES}.Association")),
    );

    // Domain events.
    definitions.push(
        StereotypeDefinition::new("event.DomainEvent")
            .with_group("event")
            .with_annotated(format!("{EVENT_ANNOTATION}.DomainEvent"))
            .with_assignable(format!("{EVENT_TYPES}.DomainEvent")),
    );
    for name in ["DomainEventHandler", "DomainEventPublisher", "Externalized"] {
        definitions.push(
            StereotypeDefinition::new(format!("event.{name}"))
                .with_group("event")
                .with_priority(10)
                .with_annotated(format!("{EVENT_ANNOTATION}.{name}")),
        );
    }

    // Architecture styles. Layer and ring markers sit on packages and are
    // inherited by the types in them.
    for name in [
        "InterfaceLayer",
        "ApplicationLayer",
        "DomainLayer",
        "InfrastructureLayer",
    ] {
        definitions.push(
            StereotypeDefinition::new(format!("architecture.layered.{name}"))
                .with_group("architecture.layered")
                .with_priority(100)
                .with_annotated(format!("{LAYERED}.{name}")),
        );
    }
    for name in [
        "DomainModelRing",
        "DomainServiceRing",
        "ApplicationServiceRing",
        "InfrastructureRing",
    ] {
        definitions.push(
            StereotypeDefinition::new(format!("architecture.onion.{name}"))
                .with_group("architecture.onion")
                .with_priority(110)
                .with_annotated(format!("{ONION}.{name}")),
        );
    }
    for (name, inherited) in [
        ("Application", true),
        ("Port", false),
        ("PrimaryPort", false),
        ("SecondaryPort", false),
        ("Adapter", true),
        ("PrimaryAdapter", true),
        ("SecondaryAdapter", true),
    ] {
        definitions.push(
            StereotypeDefinition::new(format!("architecture.hexagonal.{name}"))
                .with_group("architecture.hexagonal")
                .with_priority(120)
                .with_inherited(inherited)
                .with_annotated(format!("{HEXAGONAL}.{name}")),
        );
    }

    definitions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_catalog_builds() {
        let catalog = BuiltinCatalog::new().load().unwrap();

        assert!(!catalog.is_empty());
        assert!(catalog.groups().iter().all(|g| g.source() == BUILTIN_SOURCE));
        assert!(catalog.definitions().iter().all(|d| d.source() == BUILTIN_SOURCE));
    }

    #[test]
    fn architecture_groups_follow_their_parent() {
        let catalog = BuiltinCatalog::catalog().unwrap();
        let ids = catalog.groups().ids();

        let parent = ids.iter().position(|&id| id == "architecture").unwrap();
        for child in [
            "architecture.layered",
            "architecture.onion",
            "architecture.hexagonal",
        ] {
            assert!(ids.iter().position(|&id| id == child).unwrap() > parent);
        }
        assert_eq!(
            catalog
                .groups()
                .by_type(GroupType::Design)
                .map(|g| g.id())
                .collect::<Vec<_>>(),
            vec!["ddd", "event"]
        );
    }

    #[test]
    fn jmolecules_markers_are_bound() {
        let catalog = BuiltinCatalog::catalog().unwrap();

        let root = catalog
            .definition_for_annotation("org.jmolecules.ddd.annotation.AggregateRoot")
            .unwrap();
        assert_eq!(root.id(), "ddd.AggregateRoot");
        assert_eq!(root.display_name(), "Aggregate Root");
        assert_eq!(
            catalog
                .definition_for_assignable("org.jmolecules.ddd.types.AggregateRoot")
                .map(|d| d.id()),
            Some("ddd.AggregateRoot")
        );
        assert_eq!(
            catalog
                .definition_for_annotation("org.jmolecules.architecture.layered.DomainLayer")
                .map(|d| d.id()),
            Some("architecture.layered.DomainLayer")
        );
        assert!(
            !catalog
                .definition("architecture.hexagonal.PrimaryPort")
                .unwrap()
                .is_inherited()
        );
    }

    #[test]
    fn architecture_stereotypes_rank_after_ddd() {
        let catalog = BuiltinCatalog::catalog().unwrap();

        let layer = catalog.definition("architecture.layered.DomainLayer").unwrap();
        let entity = catalog.definition("ddd.Entity").unwrap();
        assert!(entity.to_stereotype() < layer.to_stereotype());
    }
}
