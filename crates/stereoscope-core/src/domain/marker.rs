//! Markers and the stereotype declarations they may carry.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A declarative, annotation-like tag attached to a code element.
///
/// The marker's name is its fully qualified type name
/// (e.g. `org.jmolecules.ddd.annotation.AggregateRoot`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Marker(String);

impl Marker {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Marker {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// What an element declares about itself when it is a stereotype carrier.
///
/// Every attribute is optional: a missing `id` falls back to the carrier's
/// name, a missing `name` to the catalog definition or the id's last segment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StereotypeDeclaration {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub groups: Vec<String>,
    #[serde(default)]
    pub priority: i32,
    #[serde(default = "default_inherited")]
    pub inherited: bool,
}

fn default_inherited() -> bool {
    true
}

impl Default for StereotypeDeclaration {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            groups: Vec::new(),
            priority: 0,
            inherited: true,
        }
    }
}

impl StereotypeDeclaration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }
}
