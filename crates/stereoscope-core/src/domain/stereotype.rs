//! Stereotype value objects: a single classification and an ordered
//! collection of them.
//!
//! # Equality
//!
//! A [`Stereotype`] is identified by `(priority, id)` and nothing else. `Ord`,
//! `PartialEq` and `Hash` all agree on that pair, so two stereotypes with the
//! same priority and identifier are the *same element* even when their
//! display names or groups differ. [`Stereotypes`] deduplicates through
//! `Ord::cmp`, never through a separate equality notion.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

// ── Stereotype ────────────────────────────────────────────────────────────────

/// One detected classification, e.g. `ddd.AggregateRoot`.
#[derive(Debug, Clone, Serialize)]
pub struct Stereotype {
    id: String,
    #[serde(rename = "name")]
    display_name: String,
    groups: Vec<String>,
    priority: i32,
    inherited: bool,
}

impl Stereotype {
    /// Create a stereotype with default priority (0), no groups, inherited.
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            groups: Vec::new(),
            priority: 0,
            inherited: true,
        }
    }

    /// Create a stereotype whose display name is derived from the identifier.
    ///
    /// `ddd.AggregateRoot` becomes `Aggregate Root`.
    pub fn from_id(id: impl Into<String>) -> Self {
        let id = id.into();
        let display_name = default_display_name(&id);
        Self::new(id, display_name)
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.groups = Vec::new();
        for group in groups {
            let group = group.into();
            if !self.groups.contains(&group) {
                self.groups.push(group);
            }
        }
        self
    }

    pub fn inherited(mut self, inherited: bool) -> Self {
        self.inherited = inherited;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
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

    /// Whether this stereotype is a member of `group` or one of its descendants.
    pub fn is_in_group(&self, group: &str) -> bool {
        self.groups
            .iter()
            .any(|g| crate::domain::group::is_same_or_descendant(g, group))
    }
}

impl PartialEq for Stereotype {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Stereotype {}

impl Hash for Stereotype {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.priority.hash(state);
        self.id.hash(state);
    }
}

impl PartialOrd for Stereotype {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Stereotype {
    fn cmp(&self, other: &Self) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl fmt::Display for Stereotype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_name)
    }
}

/// Derive a human label from the last segment of a dotted identifier.
///
/// CamelCase words are split: `PrimaryPort` → `Primary Port`.
pub fn default_display_name(id: &str) -> String {
    let simple = id.rsplit(['.', '$']).next().unwrap_or(id);

    let mut out = String::with_capacity(simple.len() + 4);
    let mut prev: Option<char> = None;
    for c in simple.chars() {
        if let Some(p) = prev {
            if c.is_uppercase() && (p.is_lowercase() || p.is_ascii_digit()) {
                out.push(' ');
            }
        }
        out.push(c);
        prev = Some(c);
    }
    out
}

// ── Stereotypes ───────────────────────────────────────────────────────────────

/// An immutable collection of [`Stereotype`]s without ordering-equal duplicates.
///
/// Elements keep the order in which they were first seen. Detection relies on
/// that: own stereotypes precede capability-derived ones, which precede the
/// package's. Use [`Stereotypes::sorted`] for natural ordering and
/// [`Stereotypes::primary`] for the minimum.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Stereotypes {
    inner: Vec<Stereotype>,
}

impl Stereotypes {
    /// The empty collection: "no classification".
    pub const EMPTY: Stereotypes = Stereotypes { inner: Vec::new() };

    pub fn new<I>(stereotypes: I) -> Self
    where
        I: IntoIterator<Item = Stereotype>,
    {
        let mut result = Self::default();
        for stereotype in stereotypes {
            result.push_unique(stereotype);
        }
        result
    }

    pub fn of(stereotype: Stereotype) -> Self {
        Self {
            inner: vec![stereotype],
        }
    }

    /// The minimum element under natural ordering.
    pub fn primary(&self) -> Option<&Stereotype> {
        self.inner.iter().min()
    }

    /// First-seen-wins union: `self` in its order, then every element of
    /// `other` that is not already present.
    pub fn and(&self, other: &Stereotypes) -> Stereotypes {
        if other.is_empty() {
            return self.clone();
        }
        let mut merged = self.clone();
        for stereotype in &other.inner {
            merged.push_unique(stereotype.clone());
        }
        merged
    }

    /// Keep only the elements matching `predicate`, preserving order.
    pub fn filter(&self, predicate: impl Fn(&Stereotype) -> bool) -> Stereotypes {
        Stereotypes {
            inner: self.inner.iter().filter(|&s| predicate(s)).cloned().collect(),
        }
    }

    pub fn contains(&self, stereotype: &Stereotype) -> bool {
        self.inner
            .iter()
            .any(|s| s.cmp(stereotype) == Ordering::Equal)
    }

    pub fn get(&self, id: &str) -> Option<&Stereotype> {
        self.inner.iter().find(|s| s.id() == id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Stereotype> {
        self.inner.iter()
    }

    /// Elements in natural ordering (priority, then identifier).
    pub fn sorted(&self) -> Vec<&Stereotype> {
        let mut sorted: Vec<_> = self.inner.iter().collect();
        sorted.sort();
        sorted
    }

    pub fn ids(&self) -> Vec<&str> {
        self.inner.iter().map(Stereotype::id).collect()
    }

    pub fn display_names(&self) -> Vec<&str> {
        self.inner.iter().map(Stereotype::display_name).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn push_unique(&mut self, stereotype: Stereotype) -> bool {
        if self.contains(&stereotype) {
            return false;
        }
        self.inner.push(stereotype);
        true
    }
}

impl FromIterator<Stereotype> for Stereotypes {
    fn from_iter<I: IntoIterator<Item = Stereotype>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for Stereotypes {
    type Item = Stereotype;
    type IntoIter = std::vec::IntoIter<Stereotype>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a Stereotypes {
    type Item = &'a Stereotype;
    type IntoIter = std::slice::Iter<'a, Stereotype>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

impl fmt::Display for Stereotypes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display_names().join(", "))
    }
}
