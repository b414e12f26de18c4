use std::fmt;

use serde::{Deserialize, Serialize};

/// Variant discriminant for [`Value`](crate::Value).
///
/// Each kind carries a stable single-byte wire tag. Tags are part of the
/// serialized format and must never be renumbered within a format version.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    /// The absence state ("never set").
    Absent,
    Bool,
    Int,
    Int64,
    /// Opaque reference identifier.
    Ref,
    Float,
    Vector2i,
    Vector2f,
    String,
    Bytes,
    Sequence,
    Map,
    /// Delta-only: no change at this node.
    Noop,
    /// Delta-only: remove this key from the base map.
    Delete,
    /// Delta-only: copy a contiguous run of base sequence elements.
    IndexRange,
    /// Delta-only: structural map diff.
    DeltaMap,
    /// Delta-only: structural sequence diff.
    DeltaSequence,
}

impl Kind {
    /// The wire tag byte for this kind.
    pub fn tag(&self) -> u8 {
        match self {
            Self::Absent => 0x00,
            Self::Bool => 0x01,
            Self::Int => 0x02,
            Self::Int64 => 0x03,
            Self::Ref => 0x04,
            Self::Float => 0x05,
            Self::Vector2i => 0x06,
            Self::Vector2f => 0x07,
            Self::String => 0x08,
            Self::Bytes => 0x09,
            Self::Sequence => 0x0a,
            Self::Map => 0x0b,
            Self::Noop => 0x0c,
            Self::Delete => 0x0d,
            Self::IndexRange => 0x0e,
            Self::DeltaMap => 0x0f,
            Self::DeltaSequence => 0x10,
        }
    }

    /// Parse a wire tag byte back into a kind.
    pub fn from_tag(tag: u8) -> Option<Self> {
        match tag {
            0x00 => Some(Self::Absent),
            0x01 => Some(Self::Bool),
            0x02 => Some(Self::Int),
            0x03 => Some(Self::Int64),
            0x04 => Some(Self::Ref),
            0x05 => Some(Self::Float),
            0x06 => Some(Self::Vector2i),
            0x07 => Some(Self::Vector2f),
            0x08 => Some(Self::String),
            0x09 => Some(Self::Bytes),
            0x0a => Some(Self::Sequence),
            0x0b => Some(Self::Map),
            0x0c => Some(Self::Noop),
            0x0d => Some(Self::Delete),
            0x0e => Some(Self::IndexRange),
            0x0f => Some(Self::DeltaMap),
            0x10 => Some(Self::DeltaSequence),
            _ => None,
        }
    }

    /// Returns `true` for the delta-only kinds, which are valid inside a
    /// delta tree but never inside plain data.
    pub fn is_delta(&self) -> bool {
        matches!(
            self,
            Self::Noop | Self::Delete | Self::IndexRange | Self::DeltaMap | Self::DeltaSequence
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Absent => "absent",
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Int64 => "int64",
            Self::Ref => "ref",
            Self::Float => "float",
            Self::Vector2i => "vector2i",
            Self::Vector2f => "vector2f",
            Self::String => "string",
            Self::Bytes => "bytes",
            Self::Sequence => "sequence",
            Self::Map => "map",
            Self::Noop => "noop",
            Self::Delete => "delete",
            Self::IndexRange => "index-range",
            Self::DeltaMap => "delta-map",
            Self::DeltaSequence => "delta-sequence",
        };
        write!(f, "{name}")
    }
}
