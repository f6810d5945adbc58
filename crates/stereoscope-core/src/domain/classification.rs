//! Grouped view of an element's stereotypes, as handed to node handlers.

use std::fmt;

use crate::domain::catalog::Catalog;
use crate::domain::group::is_same_or_descendant;
use crate::domain::stereotype::{Stereotype, Stereotypes};

/// Label used for stereotypes that belong to no group.
pub const UNGROUPED_LABEL: &str = "Other";

/// Stereotypes sharing one display label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationSection {
    label: String,
    stereotypes: Vec<Stereotype>,
}

impl ClassificationSection {
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn stereotypes(&self) -> &[Stereotype] {
        &self.stereotypes
    }
}

impl fmt::Display for ClassificationSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<_> = self.stereotypes.iter().map(Stereotype::display_name).collect();
        write!(f, "{}: {}", self.label, names.join(", "))
    }
}

/// An element's stereotypes, coalesced into labeled sections.
///
/// A group whose id equals or descends from one of the configured groupers
/// is reported under that grouper's label; any other group under its own
/// display name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    stereotypes: Stereotypes,
    sections: Vec<ClassificationSection>,
    failure: Option<String>,
}

impl Classification {
    pub fn classify(stereotypes: Stereotypes, catalog: &Catalog, groupers: &[String]) -> Self {
        let mut sections: Vec<ClassificationSection> = Vec::new();

        for stereotype in &stereotypes {
            let mut labels: Vec<String> = Vec::new();
            for group_id in group_ids(stereotype, catalog) {
                let label = label_for(&group_id, catalog, groupers);
                if !labels.contains(&label) {
                    labels.push(label);
                }
            }
            if labels.is_empty() {
                labels.push(UNGROUPED_LABEL.to_string());
            }

            for label in labels {
                match sections.iter_mut().find(|s| s.label == label) {
                    Some(section) => {
                        if !section.stereotypes.contains(stereotype) {
                            section.stereotypes.push(stereotype.clone());
                        }
                    }
                    None => sections.push(ClassificationSection {
                        label,
                        stereotypes: vec![stereotype.clone()],
                    }),
                }
            }
        }

        Self {
            stereotypes,
            sections,
            failure: None,
        }
    }

    /// A node whose detection failed; rendered with the failure message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn stereotypes(&self) -> &Stereotypes {
        &self.stereotypes
    }

    pub fn sections(&self) -> &[ClassificationSection] {
        &self.sections
    }

    pub fn failure(&self) -> Option<&str> {
        self.failure.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.stereotypes.is_empty()
    }

    /// One compact line: `DDD: Aggregate Root | Layers: Domain Layer`.
    pub fn summary(&self) -> String {
        self.sections
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(" | ")
    }
}

/// Catalog groups in prioritized order, then declared ids the catalog lacks.
fn group_ids(stereotype: &Stereotype, catalog: &Catalog) -> Vec<String> {
    let mut ids: Vec<String> = catalog
        .groups_of(stereotype)
        .iter()
        .map(|g| g.id().to_string())
        .collect();
    for declared in stereotype.groups() {
        if !ids.contains(declared) {
            ids.push(declared.clone());
        }
    }
    ids
}

fn label_for(group_id: &str, catalog: &Catalog, groupers: &[String]) -> String {
    let namespace = groupers
        .iter()
        .find(|prefix| is_same_or_descendant(group_id, prefix))
        .map(String::as_str)
        .unwrap_or(group_id);

    catalog
        .group(namespace)
        .map(|g| g.display_name().to_string())
        .unwrap_or_else(|| namespace.to_string())
}
