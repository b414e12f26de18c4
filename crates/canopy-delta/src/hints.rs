use canopy_value::Value;

use crate::breadcrumb::{Breadcrumb, Segment};

/// Caller-supplied policy parameterizing the diff algorithm.
///
/// A hints object lives for a single `create_delta` call. It never owns tree
/// data and must not retain `Value` references beyond the call; it may keep
/// its own bookkeeping across the queries within one diff.
///
/// The save system and the replication layer supply different
/// implementations: a save policy typically treats absence and emptiness as
/// interchangeable, a network policy typically forbids deleting keys the
/// peer relies on.
pub trait DeltaHints {
    /// Skip diffing entirely at this path, treating the node as unchanged.
    /// Escape hatch for fields a policy declares always-irrelevant.
    fn should_bypass(&self, _path: &Breadcrumb<'_>) -> bool {
        false
    }

    /// May a key present in the base but missing from the target be deleted?
    /// When this returns false the key is silently kept.
    fn can_delete_key(&self, _key: &str, _path: &Breadcrumb<'_>) -> bool {
        true
    }

    /// Find the base-sequence index this target element should be diffed
    /// against, or `None` to store the element as a literal.
    ///
    /// Returning `None` for an element that is structurally identical to
    /// some base element is allowed: it trades delta size for matching cost,
    /// and that trade belongs to the policy.
    fn sequence_match(
        &self,
        base: &[Value],
        element: &Value,
        index: usize,
        path: &Breadcrumb<'_>,
    ) -> Option<usize>;

    /// Whether a pure reordering of this sequence is a real change. When
    /// false, a delta that merely permutes the base collapses to no-op.
    fn sequence_order_matters(&self, _path: &Breadcrumb<'_>) -> bool {
        true
    }

    /// Whether absence and an empty container count as equal at this path.
    fn null_empty_equivalent(&self, _path: &Breadcrumb<'_>) -> bool {
        false
    }
}

/// The conservative default policy: sequence elements match by position,
/// order matters, all deletions are allowed, absence and emptiness differ.
#[derive(Clone, Copy, Debug, Default)]
pub struct PositionalHints;

impl DeltaHints for PositionalHints {
    fn sequence_match(
        &self,
        base: &[Value],
        _element: &Value,
        index: usize,
        _path: &Breadcrumb<'_>,
    ) -> Option<usize> {
        (index < base.len()).then_some(index)
    }
}

/// Matches sequence elements by structural equality.
///
/// Prefers the same position when it still matches (so unchanged sequences
/// collapse to a single run), then falls back to the first equal base
/// element.
#[derive(Clone, Copy, Debug)]
pub struct IdentityHints {
    ordered: bool,
}

impl IdentityHints {
    /// Identity matching where reordering is a real change.
    pub fn new() -> Self {
        Self { ordered: true }
    }

    /// Identity matching where pure reordering collapses to no-op.
    pub fn unordered() -> Self {
        Self { ordered: false }
    }
}

impl Default for IdentityHints {
    fn default() -> Self {
        Self::new()
    }
}

impl DeltaHints for IdentityHints {
    fn sequence_match(
        &self,
        base: &[Value],
        element: &Value,
        index: usize,
        _path: &Breadcrumb<'_>,
    ) -> Option<usize> {
        if base.get(index).is_some_and(|candidate| candidate == element) {
            return Some(index);
        }
        base.iter().position(|candidate| candidate == element)
    }

    fn sequence_order_matters(&self, _path: &Breadcrumb<'_>) -> bool {
        self.ordered
    }
}

/// Matches sequence elements by a stable identity field, the way entity
/// replication does: an element matches the base element whose `id_key`
/// entry is equal, regardless of position.
///
/// Elements that are not maps, or that lack the identity field, never match
/// and are stored as literals.
#[derive(Clone, Debug)]
pub struct KeyedHints {
    id_key: String,
    ordered: bool,
    null_empty_equivalent: bool,
    protected_keys: Vec<String>,
    bypass_keys: Vec<String>,
}

impl KeyedHints {
    pub fn new(id_key: impl Into<String>) -> Self {
        Self {
            id_key: id_key.into(),
            ordered: true,
            null_empty_equivalent: false,
            protected_keys: Vec::new(),
            bypass_keys: Vec::new(),
        }
    }

    /// Whether pure reorderings are real changes (default: yes).
    pub fn ordered(mut self, ordered: bool) -> Self {
        self.ordered = ordered;
        self
    }

    /// Treat absence and empty containers as equal (default: no).
    pub fn null_empty_equivalent(mut self, equivalent: bool) -> Self {
        self.null_empty_equivalent = equivalent;
        self
    }

    /// Never emit a deletion for this map key, anywhere in the tree.
    pub fn protect_key(mut self, key: impl Into<String>) -> Self {
        self.protected_keys.push(key.into());
        self
    }

    /// Always treat map entries with this key as unchanged.
    pub fn bypass_key(mut self, key: impl Into<String>) -> Self {
        self.bypass_keys.push(key.into());
        self
    }
}

impl DeltaHints for KeyedHints {
    fn should_bypass(&self, path: &Breadcrumb<'_>) -> bool {
        match path.segment() {
            Some(Segment::Key(key)) => self.bypass_keys.iter().any(|k| k == key),
            _ => false,
        }
    }

    fn can_delete_key(&self, key: &str, _path: &Breadcrumb<'_>) -> bool {
        !self.protected_keys.iter().any(|k| k == key)
    }

    fn sequence_match(
        &self,
        base: &[Value],
        element: &Value,
        _index: usize,
        _path: &Breadcrumb<'_>,
    ) -> Option<usize> {
        let id = element.get(&self.id_key);
        if id.is_absent() {
            return None;
        }
        base.iter()
            .position(|candidate| candidate.get(&self.id_key) == id)
    }

    fn sequence_order_matters(&self, _path: &Breadcrumb<'_>) -> bool {
        self.ordered
    }

    fn null_empty_equivalent(&self, _path: &Breadcrumb<'_>) -> bool {
        self.null_empty_equivalent
    }
}
