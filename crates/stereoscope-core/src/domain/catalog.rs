//! The stereotype catalog: groups, group memberships, and stereotype
//! definitions bound to marker names.
//!
//! A catalog is assembled once per run from one or more sources (the
//! built-in default plus project-local files) and is read-only afterwards.
//! Later sources may add groups, definitions and memberships; they never
//! replace what an earlier source declared.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::domain::error::DomainError;
use crate::domain::group::{StereotypeGroup, StereotypeGroups};
use crate::domain::stereotype::{Stereotype, default_display_name};

// ── StereotypeDefinition ──────────────────────────────────────────────────────

/// A stereotype declared by the catalog rather than by code.
///
/// Elements are classified with it when they carry one of the `annotated`
/// markers, or when they are (or implement) one of the `assignable` types.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StereotypeDefinition {
    id: String,
    name: Option<String>,
    groups: Vec<String>,
    priority: i32,
    inherited: bool,
    assignable: Vec<String>,
    annotated: Vec<String>,
    source: String,
}

impl StereotypeDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: None,
            groups: Vec::new(),
            priority: 0,
            inherited: true,
            assignable: Vec::new(),
            annotated: Vec::new(),
            source: String::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }

    pub fn with_assignable(mut self, type_name: impl Into<String>) -> Self {
        self.assignable.push(type_name.into());
        self
    }

    pub fn with_annotated(mut self, marker_name: impl Into<String>) -> Self {
        self.annotated.push(marker_name.into());
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// The declared display name, if any.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The declared display name, or one derived from the id.
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| default_display_name(&self.id))
    }

    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    pub fn is_inherited(&self) -> bool {
        self.inherited
    }

    /// Capability type names that carry this stereotype.
    pub fn assignable(&self) -> &[String] {
        &self.assignable
    }

    /// Annotation-like marker names that carry this stereotype.
    pub fn annotated(&self) -> &[String] {
        &self.annotated
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// The stereotype this definition produces, without catalog groups.
    pub fn to_stereotype(&self) -> Stereotype {
        Stereotype::new(self.id.clone(), self.display_name())
            .with_priority(self.priority)
            .with_groups(self.groups.iter().cloned())
            .inherited(self.inherited)
    }
}

// ── Catalog ───────────────────────────────────────────────────────────────────

/// Read-only registry mapping stereotype ids to their groups.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    groups: StereotypeGroups,
    definitions: Vec<StereotypeDefinition>,
    memberships: HashMap<String, Vec<String>>,
    by_id: HashMap<String, usize>,
    by_annotation: HashMap<String, usize>,
    by_assignable: HashMap<String, usize>,
}

impl Catalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builder() -> CatalogBuilder {
        CatalogBuilder::default()
    }

    /// Combine with a later source. Entries of `self` win on conflicts.
    pub fn merge(&self, later: &Catalog) -> Catalog {
        let mut builder = CatalogBuilder::from_catalog(self);
        builder.absorb(later);
        builder.assemble()
    }

    /// All groups in prioritized order.
    pub fn groups(&self) -> &StereotypeGroups {
        &self.groups
    }

    pub fn group(&self, id: &str) -> Option<&StereotypeGroup> {
        self.groups.get(id)
    }

    pub fn definitions(&self) -> &[StereotypeDefinition] {
        &self.definitions
    }

    pub fn definition(&self, stereotype_id: &str) -> Option<&StereotypeDefinition> {
        self.by_id.get(stereotype_id).map(|&i| &self.definitions[i])
    }

    /// The definition bound to an annotation-like marker name.
    pub fn definition_for_annotation(&self, marker_name: &str) -> Option<&StereotypeDefinition> {
        self.by_annotation
            .get(marker_name)
            .map(|&i| &self.definitions[i])
    }

    /// The definition bound to a capability type name.
    pub fn definition_for_assignable(&self, type_name: &str) -> Option<&StereotypeDefinition> {
        self.by_assignable
            .get(type_name)
            .map(|&i| &self.definitions[i])
    }

    /// Group ids a stereotype id is a member of, in declaration order.
    ///
    /// Unknown ids yield an empty slice.
    pub fn group_ids_for(&self, stereotype_id: &str) -> &[String] {
        self.memberships
            .get(stereotype_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Catalog groups for a stereotype id. Unknown ids yield no groups.
    pub fn groups_for(&self, stereotype_id: &str) -> StereotypeGroups {
        self.resolve_groups(self.group_ids_for(stereotype_id).iter())
    }

    /// Catalog groups for a detected stereotype: its declared groups plus its
    /// catalog memberships. Declared ids missing from the catalog are skipped.
    pub fn groups_of(&self, stereotype: &Stereotype) -> StereotypeGroups {
        self.resolve_groups(
            stereotype
                .groups()
                .iter()
                .chain(self.group_ids_for(stereotype.id())),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.definitions.is_empty()
    }

    fn resolve_groups<'a>(&self, ids: impl Iterator<Item = &'a String>) -> StereotypeGroups {
        ids.filter_map(|id| self.groups.get(id).cloned()).collect()
    }
}

// ── CatalogBuilder ────────────────────────────────────────────────────────────

/// Accumulates groups and definitions, first declaration wins.
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    groups: Vec<StereotypeGroup>,
    definitions: Vec<StereotypeDefinition>,
    memberships: Vec<(String, String)>,
}

impl CatalogBuilder {
    fn from_catalog(catalog: &Catalog) -> Self {
        let mut builder = Self::default();
        builder.absorb(catalog);
        builder
    }

    fn absorb(&mut self, catalog: &Catalog) {
        self.groups.extend(catalog.groups.iter().cloned());
        self.definitions.extend(catalog.definitions.iter().cloned());
        for (stereotype, groups) in &catalog.memberships {
            for group in groups {
                self.memberships.push((stereotype.clone(), group.clone()));
            }
        }
    }

    pub fn group(mut self, group: StereotypeGroup) -> Self {
        self.groups.push(group);
        self
    }

    pub fn stereotype(mut self, definition: StereotypeDefinition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Record that `stereotype_id` belongs to `group_id`.
    pub fn membership(mut self, stereotype_id: impl Into<String>, group_id: impl Into<String>) -> Self {
        self.memberships
            .push((stereotype_id.into(), group_id.into()));
        self
    }

    /// Validate and build.
    pub fn build(self) -> Result<Catalog, DomainError> {
        if let Some(group) = self.groups.iter().find(|g| g.id().trim().is_empty()) {
            return Err(DomainError::InvalidCatalog(format!(
                "group with empty id (name '{}')",
                group.display_name()
            )));
        }
        if self.definitions.iter().any(|d| d.id().trim().is_empty()) {
            return Err(DomainError::InvalidCatalog(
                "stereotype definition with empty id".into(),
            ));
        }
        Ok(self.assemble())
    }

    fn assemble(self) -> Catalog {
        let groups = StereotypeGroups::new(self.groups);

        let mut definitions: Vec<StereotypeDefinition> = Vec::new();
        let mut by_id = HashMap::new();
        let mut by_annotation = HashMap::new();
        let mut by_assignable = HashMap::new();
        let mut memberships: HashMap<String, Vec<String>> = HashMap::new();

        let mut add_membership = |stereotype: &str, group: &str| {
            let entry = memberships.entry(stereotype.to_string()).or_default();
            if !entry.iter().any(|g| g == group) {
                entry.push(group.to_string());
            }
        };

        for definition in self.definitions {
            if by_id.contains_key(definition.id()) {
                debug!(id = %definition.id(), "ignoring duplicate stereotype definition");
                continue;
            }
            let index = definitions.len();
            by_id.insert(definition.id().to_string(), index);
            for marker in definition.annotated() {
                by_annotation.entry(marker.clone()).or_insert(index);
            }
            for type_name in definition.assignable() {
                by_assignable.entry(type_name.clone()).or_insert(index);
            }
            for group in definition.groups() {
                add_membership(definition.id(), group);
            }
            definitions.push(definition);
        }

        for (stereotype, group) in &self.memberships {
            add_membership(stereotype, group);
        }

        Catalog {
            groups,
            definitions,
            memberships,
            by_id,
            by_annotation,
            by_assignable,
        }
    }
}
