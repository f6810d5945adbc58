//! Catalog groups: hierarchical namespaces that categorize stereotypes.
//!
//! # Prioritized ordering
//!
//! Group ids are dot-delimited (`spring.web.rest`). An ancestor always comes
//! before its descendants, whatever their numeric priorities. Groups without
//! an ancestor/descendant relationship order by ascending priority, then id.
//!
//! The pairwise rule is not transitive across unrelated hierarchies (`foo`
//! at 20, `foo.bar` at 10 and `baz` at 15 form a cycle), so it is not an
//! `Ord` impl. [`StereotypeGroups`] establishes the order by walking groups
//! in priority order and emitting every not-yet-emitted ancestor first.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

// ── GroupType ─────────────────────────────────────────────────────────────────

/// What kind of concern a group describes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupType {
    #[serde(alias = "ARCHITECTURE")]
    Architecture,
    #[serde(alias = "DESIGN")]
    Design,
    #[default]
    #[serde(alias = "TECHNOLOGY")]
    Technology,
}

impl GroupType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Architecture => "architecture",
            Self::Design => "design",
            Self::Technology => "technology",
        }
    }
}

impl fmt::Display for GroupType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "architecture" | "arch" => Ok(Self::Architecture),
            "design" => Ok(Self::Design),
            "technology" | "tech" => Ok(Self::Technology),
            other => Err(DomainError::InvalidCatalog(format!(
                "unknown group type: {other}"
            ))),
        }
    }
}

// ── Namespace helpers ─────────────────────────────────────────────────────────

/// `true` if `ancestor` is a strict dot-segment prefix of `id`.
///
/// `a` is an ancestor of `a.b`, but not of `ab` nor of `a` itself.
pub fn is_ancestor(ancestor: &str, id: &str) -> bool {
    id.len() > ancestor.len()
        && id.starts_with(ancestor)
        && id.as_bytes()[ancestor.len()] == b'.'
}

/// `true` if `id` equals `namespace` or lives below it.
pub fn is_same_or_descendant(id: &str, namespace: &str) -> bool {
    id == namespace || is_ancestor(namespace, id)
}

// ── StereotypeGroup ───────────────────────────────────────────────────────────

/// A catalog entry for a namespace of stereotypes.
#[derive(Debug, Clone, Serialize)]
pub struct StereotypeGroup {
    id: String,
    #[serde(rename = "name")]
    display_name: String,
    #[serde(rename = "type")]
    group_type: GroupType,
    priority: i32,
    source: String,
}

impl StereotypeGroup {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            group_type: GroupType::default(),
            priority: 0,
            source: String::new(),
        }
    }

    pub fn with_type(mut self, group_type: GroupType) -> Self {
        self.group_type = group_type;
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn group_type(&self) -> GroupType {
        self.group_type
    }

    pub fn priority(&self) -> i32 {
        self.priority
    }

    /// Where this group was declared (e.g. `builtin:jmolecules`, `file:///...`).
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn is_ancestor_of(&self, other: &StereotypeGroup) -> bool {
        is_ancestor(&self.id, &other.id)
    }

    /// Pairwise prioritized comparison; see the module docs.
    pub fn prioritized_cmp(&self, other: &StereotypeGroup) -> Ordering {
        if self.is_ancestor_of(other) {
            Ordering::Less
        } else if other.is_ancestor_of(self) {
            Ordering::Greater
        } else {
            self.priority_cmp(other)
        }
    }

    fn priority_cmp(&self, other: &StereotypeGroup) -> Ordering {
        self.priority
            .cmp(&other.priority)
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialEq for StereotypeGroup {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for StereotypeGroup {}

impl std::hash::Hash for StereotypeGroup {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for StereotypeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.id)
    }
}

// ── StereotypeGroups ──────────────────────────────────────────────────────────

/// An immutable, prioritized collection of groups, unique by id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct StereotypeGroups {
    inner: Vec<StereotypeGroup>,
}

impl StereotypeGroups {
    pub const EMPTY: StereotypeGroups = StereotypeGroups { inner: Vec::new() };

    /// Build a prioritized collection. The first occurrence of an id wins.
    pub fn new<I>(groups: I) -> Self
    where
        I: IntoIterator<Item = StereotypeGroup>,
    {
        let mut unique: Vec<StereotypeGroup> = Vec::new();
        for group in groups {
            if !unique.iter().any(|g| g.id == group.id) {
                unique.push(group);
            }
        }
        Self {
            inner: prioritize(unique),
        }
    }

    /// Union with `other`; groups already present are kept as they are.
    pub fn and(&self, other: &StereotypeGroups) -> StereotypeGroups {
        if other.is_empty() {
            return self.clone();
        }
        Self::new(self.inner.iter().chain(other.inner.iter()).cloned())
    }

    /// Groups of the given type, in prioritized order.
    pub fn by_type(&self, group_type: GroupType) -> impl Iterator<Item = &StereotypeGroup> {
        self.inner
            .iter()
            .filter(move |g| g.group_type == group_type)
    }

    pub fn get(&self, id: &str) -> Option<&StereotypeGroup> {
        self.inner.iter().find(|g| g.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// The first group in prioritized order.
    pub fn primary(&self) -> Option<&StereotypeGroup> {
        self.inner.first()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.inner.iter().map(StereotypeGroup::id).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StereotypeGroup> {
        self.inner.iter()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// Priority order with every ancestor hoisted ahead of its descendants.
fn prioritize(groups: Vec<StereotypeGroup>) -> Vec<StereotypeGroup> {
    let mut order: Vec<usize> = (0..groups.len()).collect();
    order.sort_by(|&a, &b| groups[a].priority_cmp(&groups[b]));

    let mut emitted = vec![false; groups.len()];
    let mut result = Vec::with_capacity(groups.len());

    fn emit(
        index: usize,
        groups: &[StereotypeGroup],
        order: &[usize],
        emitted: &mut [bool],
        result: &mut Vec<usize>,
    ) {
        if emitted[index] {
            return;
        }
        for &candidate in order {
            if groups[candidate].is_ancestor_of(&groups[index]) {
                emit(candidate, groups, order, emitted, result);
            }
        }
        emitted[index] = true;
        result.push(index);
    }

    for &index in &order {
        emit(index, &groups, &order, &mut emitted, &mut result);
    }

    let mut slots: Vec<Option<StereotypeGroup>> = groups.into_iter().map(Some).collect();
    result
        .into_iter()
        .filter_map(|index| slots[index].take())
        .collect()
}

impl FromIterator<StereotypeGroup> for StereotypeGroups {
    fn from_iter<I: IntoIterator<Item = StereotypeGroup>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl IntoIterator for StereotypeGroups {
    type Item = StereotypeGroup;
    type IntoIter = std::vec::IntoIter<StereotypeGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a StereotypeGroups {
    type Item = &'a StereotypeGroup;
    type IntoIter = std::slice::Iter<'a, StereotypeGroup>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(id: &str, priority: i32) -> StereotypeGroup {
        StereotypeGroup::new(id, id).with_priority(priority)
    }

    // ========================================================================
    // Namespace helpers
    // ========================================================================

    #[test]
    fn ancestor_is_segment_prefix() {
        assert!(is_ancestor("a", "a.b"));
        assert!(is_ancestor("a.b", "a.b.c"));
        assert!(!is_ancestor("a", "a"));
        assert!(!is_ancestor("a", "ab"));
        assert!(!is_ancestor("a.b", "a"));
    }

    // ========================================================================
    // Pairwise ordering
    // ========================================================================

    #[test]
    fn ancestor_beats_priority() {
        let foo = group("foo", 20);
        let bar = group("foo.bar", 10);

        assert_eq!(foo.prioritized_cmp(&bar), Ordering::Less);
        assert_eq!(bar.prioritized_cmp(&foo), Ordering::Greater);
    }

    #[test]
    fn unrelated_groups_order_by_priority_then_id() {
        assert_eq!(group("b", 0).prioritized_cmp(&group("a", 1)), Ordering::Less);
        assert_eq!(group("a", 0).prioritized_cmp(&group("b", 0)), Ordering::Less);
    }

    // ========================================================================
    // StereotypeGroups
    // ========================================================================

    #[test]
    fn collection_puts_parent_first() {
        let groups = StereotypeGroups::new([group("foo.bar", 10), group("foo", 20)]);
        assert_eq!(groups.ids(), vec!["foo", "foo.bar"]);
    }

    #[test]
    fn collection_handles_non_transitive_triples() {
        let groups =
            StereotypeGroups::new([group("baz", 15), group("foo.bar", 10), group("foo", 20)]);

        let ids = groups.ids();
        let pos = |id: &str| ids.iter().position(|i| *i == id).unwrap();

        assert_eq!(ids.len(), 3);
        assert!(pos("foo") < pos("foo.bar"));
    }

    #[test]
    fn collection_orders_deep_hierarchies() {
        let groups = StereotypeGroups::new([
            group("a.b.c", -5),
            group("x", 0),
            group("a.b", 3),
            group("a", 7),
        ]);

        assert_eq!(groups.ids(), vec!["a", "a.b", "a.b.c", "x"]);
    }

    #[test]
    fn collection_keeps_first_occurrence_of_id() {
        let groups = StereotypeGroups::new([
            StereotypeGroup::new("ddd", "DDD").with_source("first"),
            StereotypeGroup::new("ddd", "Other").with_source("second"),
        ]);

        assert_eq!(groups.len(), 1);
        assert_eq!(groups.get("ddd").unwrap().source(), "first");
    }

    #[test]
    fn by_type_filters_and_preserves_order() {
        let groups = StereotypeGroups::new([
            group("c", 3).with_type(GroupType::Architecture),
            group("a", 1).with_type(GroupType::Architecture),
            group("b", 2).with_type(GroupType::Design),
            group("d", 0),
        ]);

        let arch: Vec<_> = groups.by_type(GroupType::Architecture).map(|g| g.id()).collect();
        let tech: Vec<_> = groups.by_type(GroupType::Technology).map(|g| g.id()).collect();

        assert_eq!(arch, vec!["a", "c"]);
        assert_eq!(tech, vec!["d"]);
    }

    #[test]
    fn and_unions_and_reprioritizes() {
        let left = StereotypeGroups::new([group("foo.bar", 0)]);
        let right = StereotypeGroups::new([group("foo", 50), group("foo.bar", 99)]);

        let merged = left.and(&right);

        assert_eq!(merged.ids(), vec!["foo", "foo.bar"]);
        assert_eq!(merged.get("foo.bar").unwrap().priority(), 0);
    }

    #[test]
    fn and_with_empty_is_identity() {
        let groups = StereotypeGroups::new([group("a", 0), group("b", 1)]);
        assert_eq!(groups.and(&StereotypeGroups::EMPTY), groups);
    }

    #[test]
    fn group_type_parses_case_insensitively() {
        assert_eq!("ARCHITECTURE".parse::<GroupType>().unwrap(), GroupType::Architecture);
        assert_eq!("design".parse::<GroupType>().unwrap(), GroupType::Design);
        assert!("nonsense".parse::<GroupType>().is_err());
        assert_eq!(GroupType::default(), GroupType::Technology);
    }
}
