use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ValueError, ValueResult};
use crate::kind::Kind;
use crate::refid::RefId;
use crate::vector::{Vector2f, Vector2i};

/// Tolerance used for float equality on values and vectors.
pub const FLOAT_EPSILON: f32 = 1e-5;

/// Shared immutable absent value returned by missing-key lookups.
static ABSENT: Value = Value::Absent;

/// A dynamic value-tree node.
///
/// `Value` is a closed sum type: exactly one variant is active at a time,
/// containers own their children deeply (cloning a value deep-copies its
/// subtree), and reassigning a variant drops the previous payload. The four
/// delta-only variants ([`Noop`](Value::Noop), [`Delete`](Value::Delete),
/// [`IndexRange`](Value::IndexRange) and the delta containers) are only
/// valid inside a delta produced by the diff engine, never inside plain
/// data.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub enum Value {
    /// The absence state ("never set").
    #[default]
    Absent,
    Bool(bool),
    Int(i32),
    Int64(i64),
    Ref(RefId),
    Float(f32),
    Vector2i(Vector2i),
    Vector2f(Vector2f),
    String(String),
    Bytes(Vec<u8>),
    Sequence(Vec<Value>),
    Map(BTreeMap<String, Value>),
    /// Delta-only: no change at this node. Also usable as a skip sentinel in
    /// the `to` tree handed to the diff engine.
    Noop,
    /// Delta-only: remove this key from the base map.
    Delete,
    /// Delta-only: copy `len` elements starting at `start` from the base
    /// sequence, unchanged.
    IndexRange { start: u32, len: u32 },
    /// Delta-only: per-key map diff. `anchor` remembers the base sequence
    /// index this node was diffed against (-1 under a map key or at root).
    DeltaMap {
        entries: BTreeMap<String, Value>,
        anchor: i64,
    },
    /// Delta-only: element-wise sequence diff. See `DeltaMap` for `anchor`.
    DeltaSequence { items: Vec<Value>, anchor: i64 },
}

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= FLOAT_EPSILON
}

fn mismatch(expected: Kind, actual: &Value) -> ValueError {
    ValueError::TypeMismatch {
        expected,
        actual: actual.kind(),
    }
}

impl Value {
    /// The variant discriminant of this node.
    pub fn kind(&self) -> Kind {
        match self {
            Self::Absent => Kind::Absent,
            Self::Bool(_) => Kind::Bool,
            Self::Int(_) => Kind::Int,
            Self::Int64(_) => Kind::Int64,
            Self::Ref(_) => Kind::Ref,
            Self::Float(_) => Kind::Float,
            Self::Vector2i(_) => Kind::Vector2i,
            Self::Vector2f(_) => Kind::Vector2f,
            Self::String(_) => Kind::String,
            Self::Bytes(_) => Kind::Bytes,
            Self::Sequence(_) => Kind::Sequence,
            Self::Map(_) => Kind::Map,
            Self::Noop => Kind::Noop,
            Self::Delete => Kind::Delete,
            Self::IndexRange { .. } => Kind::IndexRange,
            Self::DeltaMap { .. } => Kind::DeltaMap,
            Self::DeltaSequence { .. } => Kind::DeltaSequence,
        }
    }

    /// An empty map value.
    pub fn map() -> Self {
        Self::Map(BTreeMap::new())
    }

    /// An empty sequence value.
    pub fn seq() -> Self {
        Self::Sequence(Vec::new())
    }

    /// Returns `true` if this node is in the absence state.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// Returns `true` if this node is a delta-only variant.
    pub fn is_delta(&self) -> bool {
        self.kind().is_delta()
    }

    /// Returns `true` for absence and for empty maps/sequences.
    ///
    /// The diff engine uses this to treat "never set" and "set to empty" as
    /// interchangeable when a hints policy opts in.
    pub fn is_null_or_empty(&self) -> bool {
        match self {
            Self::Absent => true,
            Self::Sequence(items) => items.is_empty(),
            Self::Map(entries) => entries.is_empty(),
            _ => false,
        }
    }

    /// Move the payload out, leaving this node in the absence state.
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Number of children: map entries or sequence elements, 0 otherwise.
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(items) => items.len(),
            Self::Map(entries) => entries.len(),
            _ => 0,
        }
    }

    /// Returns `true` if [`len`](Self::len) is 0.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- scalar accessors ------------------------------------------------

    /// Read as a bool. Bool/Int/Int64/Float/Ref coerce (non-zero is true).
    pub fn as_bool(&self) -> ValueResult<bool> {
        match self {
            Self::Bool(v) => Ok(*v),
            Self::Int(v) => Ok(*v != 0),
            Self::Int64(v) => Ok(*v != 0),
            Self::Float(v) => Ok(*v != 0.0),
            Self::Ref(r) => Ok(!r.is_none()),
            other => Err(mismatch(Kind::Bool, other)),
        }
    }

    /// Read as a 32-bit int. Bool is 0/1, floats truncate, an absent
    /// reference reads as -1.
    pub fn as_int(&self) -> ValueResult<i32> {
        match self {
            Self::Int(v) => Ok(*v),
            Self::Int64(v) => Ok(*v as i32),
            Self::Float(v) => Ok(*v as i32),
            Self::Bool(v) => Ok(i32::from(*v)),
            Self::Ref(r) => Ok(r.raw() as i32),
            other => Err(mismatch(Kind::Int, other)),
        }
    }

    /// Read as a 64-bit int, with the same coercions as [`as_int`](Self::as_int).
    pub fn as_int64(&self) -> ValueResult<i64> {
        match self {
            Self::Int64(v) => Ok(*v),
            Self::Int(v) => Ok(i64::from(*v)),
            Self::Float(v) => Ok(*v as i64),
            Self::Bool(v) => Ok(i64::from(*v)),
            Self::Ref(r) => Ok(r.raw()),
            other => Err(mismatch(Kind::Int64, other)),
        }
    }

    /// Read as a float. Ints widen, bool is 0.0/1.0.
    pub fn as_float(&self) -> ValueResult<f32> {
        match self {
            Self::Float(v) => Ok(*v),
            Self::Int(v) => Ok(*v as f32),
            Self::Int64(v) => Ok(*v as f32),
            Self::Bool(v) => Ok(if *v { 1.0 } else { 0.0 }),
            Self::Ref(r) => Ok(r.raw() as f32),
            other => Err(mismatch(Kind::Float, other)),
        }
    }

    /// Read as a reference id. Ints convert; everything else mismatches.
    pub fn as_ref_id(&self) -> ValueResult<RefId> {
        match self {
            Self::Ref(r) => Ok(*r),
            Self::Int(v) => Ok(RefId::new(i64::from(*v))),
            Self::Int64(v) => Ok(RefId::new(*v)),
            other => Err(mismatch(Kind::Ref, other)),
        }
    }

    /// Like [`as_bool`](Self::as_bool), but absence yields `default`.
    pub fn as_bool_or(&self, default: bool) -> ValueResult<bool> {
        match self {
            Self::Absent => Ok(default),
            other => other.as_bool(),
        }
    }

    /// Like [`as_int`](Self::as_int), but absence yields `default`.
    pub fn as_int_or(&self, default: i32) -> ValueResult<i32> {
        match self {
            Self::Absent => Ok(default),
            other => other.as_int(),
        }
    }

    /// Like [`as_int64`](Self::as_int64), but absence yields `default`.
    pub fn as_int64_or(&self, default: i64) -> ValueResult<i64> {
        match self {
            Self::Absent => Ok(default),
            other => other.as_int64(),
        }
    }

    /// Like [`as_float`](Self::as_float), but absence yields `default`.
    pub fn as_float_or(&self, default: f32) -> ValueResult<f32> {
        match self {
            Self::Absent => Ok(default),
            other => other.as_float(),
        }
    }

    /// Like [`as_ref_id`](Self::as_ref_id), but absence yields [`RefId::NONE`].
    pub fn as_ref_id_or_none(&self) -> ValueResult<RefId> {
        match self {
            Self::Absent => Ok(RefId::NONE),
            other => other.as_ref_id(),
        }
    }

    // --- exact-variant accessors ------------------------------------------

    /// Borrow the string payload.
    pub fn as_str(&self) -> ValueResult<&str> {
        match self {
            Self::String(s) => Ok(s),
            other => Err(mismatch(Kind::String, other)),
        }
    }

    /// Like [`as_str`](Self::as_str), but absence yields `default`.
    pub fn as_str_or<'a>(&'a self, default: &'a str) -> ValueResult<&'a str> {
        match self {
            Self::Absent => Ok(default),
            other => other.as_str(),
        }
    }

    /// Borrow the byte payload.
    pub fn as_bytes(&self) -> ValueResult<&[u8]> {
        match self {
            Self::Bytes(b) => Ok(b),
            other => Err(mismatch(Kind::Bytes, other)),
        }
    }

    /// Borrow the sequence elements.
    pub fn as_sequence(&self) -> ValueResult<&[Value]> {
        match self {
            Self::Sequence(items) => Ok(items),
            other => Err(mismatch(Kind::Sequence, other)),
        }
    }

    /// Borrow the map entries.
    pub fn as_map(&self) -> ValueResult<&BTreeMap<String, Value>> {
        match self {
            Self::Map(entries) => Ok(entries),
            other => Err(mismatch(Kind::Map, other)),
        }
    }

    // --- vector accessors --------------------------------------------------

    /// Read as a 2D int vector: from either native vector variant, or a
    /// 2-element numeric sequence.
    pub fn as_vector2i(&self) -> ValueResult<Vector2i> {
        match self {
            Self::Vector2i(v) => Ok(*v),
            Self::Vector2f(v) => Ok(v.to_i()),
            Self::Sequence(_) => {
                let [x, y] = self.int_elements::<2>()?;
                Ok(Vector2i::new(x, y))
            }
            other => Err(mismatch(Kind::Vector2i, other)),
        }
    }

    /// Read as a 2D float vector: from either native vector variant, or a
    /// 2-element numeric sequence.
    pub fn as_vector2f(&self) -> ValueResult<Vector2f> {
        match self {
            Self::Vector2f(v) => Ok(*v),
            Self::Vector2i(v) => Ok(v.to_f()),
            Self::Sequence(_) => {
                let [x, y] = self.float_elements::<2>()?;
                Ok(Vector2f::new(x, y))
            }
            other => Err(mismatch(Kind::Vector2f, other)),
        }
    }

    /// Read a 3-element numeric sequence as an int triple.
    pub fn as_vector3i(&self) -> ValueResult<[i32; 3]> {
        self.int_elements::<3>()
    }

    /// Read a 3-element numeric sequence as a float triple.
    pub fn as_vector3f(&self) -> ValueResult<[f32; 3]> {
        self.float_elements::<3>()
    }

    /// Read a 4-element numeric sequence as an int quad.
    pub fn as_vector4i(&self) -> ValueResult<[i32; 4]> {
        self.int_elements::<4>()
    }

    /// Read a 4-element numeric sequence as a float quad.
    pub fn as_vector4f(&self) -> ValueResult<[f32; 4]> {
        self.float_elements::<4>()
    }

    /// Read exactly `N` numeric elements out of a sequence.
    fn int_elements<const N: usize>(&self) -> ValueResult<[i32; N]> {
        let items = self.as_sequence()?;
        if items.len() != N {
            return Err(ValueError::IndexOutOfRange {
                index: N - 1,
                len: items.len(),
            });
        }
        let mut out = [0i32; N];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item.as_int()?;
        }
        Ok(out)
    }

    fn float_elements<const N: usize>(&self) -> ValueResult<[f32; N]> {
        let items = self.as_sequence()?;
        if items.len() != N {
            return Err(ValueError::IndexOutOfRange {
                index: N - 1,
                len: items.len(),
            });
        }
        let mut out = [0f32; N];
        for (slot, item) in out.iter_mut().zip(items) {
            *slot = item.as_float()?;
        }
        Ok(out)
    }

    // --- container access ----------------------------------------------------

    /// Look up a map key, returning a shared absent value when the key is
    /// missing or when this node is not a map. The returned reference is
    /// immutable and `'static`; writes go through [`get_mut`](Self::get_mut)
    /// or [`insert`](Self::insert).
    pub fn get(&self, key: &str) -> &Value {
        match self {
            Self::Map(entries) => entries.get(key).unwrap_or(&ABSENT),
            _ => &ABSENT,
        }
    }

    /// Mutable map lookup that auto-creates missing keys as absent entries.
    /// An absent receiver becomes an empty map first.
    pub fn get_mut(&mut self, key: &str) -> ValueResult<&mut Value> {
        if self.is_absent() {
            *self = Self::map();
        }
        match self {
            Self::Map(entries) => Ok(entries.entry(key.to_string()).or_insert(Value::Absent)),
            other => Err(mismatch(Kind::Map, other)),
        }
    }

    /// Bounds-checked positional access into a sequence.
    pub fn at(&self, index: usize) -> ValueResult<&Value> {
        let items = self.as_sequence()?;
        items.get(index).ok_or(ValueError::IndexOutOfRange {
            index,
            len: items.len(),
        })
    }

    /// Bounds-checked mutable positional access into a sequence.
    pub fn at_mut(&mut self, index: usize) -> ValueResult<&mut Value> {
        match self {
            Self::Sequence(items) => {
                let len = items.len();
                items
                    .get_mut(index)
                    .ok_or(ValueError::IndexOutOfRange { index, len })
            }
            other => Err(mismatch(Kind::Sequence, other)),
        }
    }

    /// Insert a map entry. An absent receiver becomes an empty map first.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> ValueResult<()> {
        if self.is_absent() {
            *self = Self::map();
        }
        match self {
            Self::Map(entries) => {
                entries.insert(key.into(), value.into());
                Ok(())
            }
            other => Err(mismatch(Kind::Map, other)),
        }
    }

    /// Append a sequence element. An absent receiver becomes an empty
    /// sequence first.
    pub fn push(&mut self, value: impl Into<Value>) -> ValueResult<()> {
        if self.is_absent() {
            *self = Self::seq();
        }
        match self {
            Self::Sequence(items) => {
                items.push(value.into());
                Ok(())
            }
            other => Err(mismatch(Kind::Sequence, other)),
        }
    }
}

/// Structural equality with the documented numeric promotions.
///
/// Same-variant comparison is payload equality, with floats (and float
/// vectors) compared within [`FLOAT_EPSILON`]. Across variants, only
/// Int↔Float (epsilon), Int↔Bool (0/1), and Vector2i↔Vector2f (per
/// component) are equivalent; no other cross-variant equality exists.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Absent, Absent) | (Noop, Noop) | (Delete, Delete) => true,
            (Bool(a), Bool(b)) => a == b,
            (Int(a), Int(b)) => a == b,
            (Int64(a), Int64(b)) => a == b,
            (Ref(a), Ref(b)) => a == b,
            (Float(a), Float(b)) => approx_eq(*a, *b),
            (Vector2i(a), Vector2i(b)) => a == b,
            (Vector2f(a), Vector2f(b)) => a.approx_eq(b),
            (String(a), String(b)) => a == b,
            (Bytes(a), Bytes(b)) => a == b,
            (Sequence(a), Sequence(b)) => a == b,
            (Map(a), Map(b)) => a == b,
            (
                IndexRange { start: s1, len: l1 },
                IndexRange { start: s2, len: l2 },
            ) => s1 == s2 && l1 == l2,
            (
                DeltaMap { entries: e1, anchor: a1 },
                DeltaMap { entries: e2, anchor: a2 },
            ) => a1 == a2 && e1 == e2,
            (
                DeltaSequence { items: i1, anchor: a1 },
                DeltaSequence { items: i2, anchor: a2 },
            ) => a1 == a2 && i1 == i2,
            // Documented cross-variant equivalences.
            (Int(i), Float(f)) | (Float(f), Int(i)) => approx_eq(*i as f32, *f),
            (Int(i), Bool(b)) | (Bool(b), Int(i)) => *i == i32::from(*b),
            (Vector2i(v), Vector2f(w)) | (Vector2f(w), Vector2i(v)) => w.approx_eq(&v.to_f()),
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<RefId> for Value {
    fn from(v: RefId) -> Self {
        Self::Ref(v)
    }
}

impl From<Vector2i> for Value {
    fn from(v: Vector2i) -> Self {
        Self::Vector2i(v)
    }
}

impl From<Vector2f> for Value {
    fn from(v: Vector2f) -> Self {
        Self::Vector2f(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Self::Sequence(v)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(v: BTreeMap<String, Value>) -> Self {
        Self::Map(v)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl FromIterator<(String, Value)> for Value {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self::Map(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_of(pairs: &[(&str, Value)]) -> Value {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn default_is_absent() {
        assert!(Value::default().is_absent());
    }

    #[test]
    fn numeric_coercion() {
        assert_eq!(Value::Float(4.9).as_int().unwrap(), 4);
        assert_eq!(Value::Int(3).as_float().unwrap(), 3.0);
        assert_eq!(Value::Bool(true).as_int().unwrap(), 1);
        assert_eq!(Value::Int64(1 << 40).as_int64().unwrap(), 1 << 40);
        assert!(Value::Int(2).as_bool().unwrap());
        assert!(!Value::Int(0).as_bool().unwrap());
    }

    #[test]
    fn absent_ref_reads_as_minus_one() {
        assert_eq!(Value::Ref(RefId::NONE).as_int().unwrap(), -1);
        assert_eq!(Value::Ref(RefId::NONE).as_int64().unwrap(), -1);
        assert!(!Value::Ref(RefId::NONE).as_bool().unwrap());
    }

    #[test]
    fn wrong_variant_access_fails() {
        let err = Value::map().as_int().unwrap_err();
        assert_eq!(
            err,
            ValueError::TypeMismatch {
                expected: Kind::Int,
                actual: Kind::Map,
            }
        );
        assert!(Value::Int(1).as_str().is_err());
        assert!(Value::String("x".into()).as_bytes().is_err());
    }

    #[test]
    fn defaults_only_apply_to_absence() {
        assert_eq!(Value::Absent.as_int_or(7).unwrap(), 7);
        assert_eq!(Value::Int(3).as_int_or(7).unwrap(), 3);
        // A wrong variant is still an error, not a default.
        assert!(Value::String("x".into()).as_int_or(7).is_err());
        assert_eq!(Value::Absent.as_str_or("fallback").unwrap(), "fallback");
        assert_eq!(Value::Absent.as_ref_id_or_none().unwrap(), RefId::NONE);
    }

    #[test]
    fn vector_accessors() {
        let v2 = Value::Vector2i(Vector2i::new(1, 2));
        assert_eq!(v2.as_vector2f().unwrap(), Vector2f::new(1.0, 2.0));

        let seq: Value = vec![Value::Int(1), Value::Float(2.0), Value::Int(3)]
            .into_iter()
            .collect();
        assert_eq!(seq.as_vector3f().unwrap(), [1.0, 2.0, 3.0]);
        assert_eq!(seq.as_vector3i().unwrap(), [1, 2, 3]);
        assert!(seq.as_vector4f().is_err());

        let quad: Value = vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]
            .into_iter()
            .collect();
        assert_eq!(quad.as_vector4i().unwrap(), [1, 2, 3, 4]);

        let pair: Value = vec![Value::Int(5), Value::Int(6)].into_iter().collect();
        assert_eq!(pair.as_vector2i().unwrap(), Vector2i::new(5, 6));
    }

    #[test]
    fn map_get_returns_absent_for_missing_keys() {
        let m = map_of(&[("x", Value::Int(1))]);
        assert_eq!(m.get("x").as_int().unwrap(), 1);
        assert!(m.get("missing").is_absent());
        // Non-map reads are total too.
        assert!(Value::Int(1).get("x").is_absent());
    }

    #[test]
    fn get_mut_auto_creates() {
        let mut v = Value::Absent;
        *v.get_mut("spawned").unwrap() = Value::Bool(true);
        assert!(v.get("spawned").as_bool().unwrap());
        // Existing keys come back by reference.
        *v.get_mut("spawned").unwrap() = Value::Bool(false);
        assert!(!v.get("spawned").as_bool().unwrap());

        assert!(Value::Int(1).get_mut("x").is_err());
    }

    #[test]
    fn sequence_access_is_bounds_checked() {
        let seq: Value = vec![Value::Int(1), Value::Int(2)].into_iter().collect();
        assert_eq!(seq.at(1).unwrap().as_int().unwrap(), 2);
        assert_eq!(
            seq.at(5).unwrap_err(),
            ValueError::IndexOutOfRange { index: 5, len: 2 }
        );
        assert!(Value::Int(1).at(0).is_err());
    }

    #[test]
    fn insert_and_push_vivify_absence() {
        let mut m = Value::Absent;
        m.insert("hp", 100).unwrap();
        assert_eq!(m.get("hp").as_int().unwrap(), 100);

        let mut s = Value::Absent;
        s.push(1).unwrap();
        s.push("two").unwrap();
        assert_eq!(s.len(), 2);

        assert!(Value::Bool(true).clone().insert("k", 1).is_err());
        assert!(Value::Bool(true).clone().push(1).is_err());
    }

    #[test]
    fn take_leaves_absence() {
        let mut v = Value::String("owned".into());
        let taken = v.take();
        assert_eq!(taken.as_str().unwrap(), "owned");
        assert!(v.is_absent());
    }

    #[test]
    fn null_or_empty() {
        assert!(Value::Absent.is_null_or_empty());
        assert!(Value::map().is_null_or_empty());
        assert!(Value::seq().is_null_or_empty());
        assert!(!Value::Int(0).is_null_or_empty());
        assert!(!map_of(&[("k", Value::Absent)]).is_null_or_empty());
    }

    #[test]
    fn same_variant_equality() {
        assert_eq!(Value::Float(1.0), Value::Float(1.000001));
        assert_ne!(Value::Float(1.0), Value::Float(1.1));
        assert_eq!(
            Value::Bytes(vec![1, 2, 3]),
            Value::Bytes(vec![1, 2, 3])
        );
        assert_eq!(
            map_of(&[("a", Value::Int(1))]),
            map_of(&[("a", Value::Int(1))])
        );
        assert_ne!(
            map_of(&[("a", Value::Int(1))]),
            map_of(&[("a", Value::Int(2))])
        );
    }

    #[test]
    fn cross_variant_equivalence() {
        assert_eq!(Value::Int(4), Value::Float(4.0));
        assert_eq!(Value::Float(4.0), Value::Int(4));
        assert_eq!(Value::Int(1), Value::Bool(true));
        assert_eq!(Value::Int(0), Value::Bool(false));
        assert_eq!(
            Value::Vector2i(Vector2i::new(1, 2)),
            Value::Vector2f(Vector2f::new(1.0, 2.0))
        );
    }

    #[test]
    fn no_other_cross_variant_equality() {
        assert_ne!(Value::Int(4), Value::Int64(4));
        assert_ne!(Value::Int64(1), Value::Bool(true));
        assert_ne!(Value::Int(0), Value::Absent);
        assert_ne!(Value::String("1".into()), Value::Int(1));
        assert_ne!(Value::Ref(RefId::new(4)), Value::Int(4));
    }

    #[test]
    fn clone_is_deep() {
        let original = map_of(&[("items", vec![Value::Int(1)].into_iter().collect())]);
        let mut copy = original.clone();
        copy.get_mut("items").unwrap().push(2).unwrap();
        assert_eq!(original.get("items").len(), 1);
        assert_eq!(copy.get("items").len(), 2);
    }

    #[test]
    fn delta_variants_compare_structurally() {
        let a = Value::IndexRange { start: 0, len: 3 };
        let b = Value::IndexRange { start: 0, len: 3 };
        let c = Value::IndexRange { start: 1, len: 3 };
        assert_eq!(a, b);
        assert_ne!(a, c);

        let d1 = Value::DeltaSequence {
            items: vec![a.clone()],
            anchor: 2,
        };
        let d2 = Value::DeltaSequence {
            items: vec![b],
            anchor: 3,
        };
        assert_ne!(d1, d2);
    }

    #[test]
    fn serde_json_roundtrip() {
        let v = map_of(&[
            ("name", Value::from("turret")),
            ("pos", Value::Vector2f(Vector2f::new(1.5, -2.0))),
            ("tags", vec![Value::from("a"), Value::from("b")].into_iter().collect()),
        ]);
        let json = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(v, back);
    }
}
