use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque reference identifier.
///
/// A `RefId` names an externally-resolved entity (an asset, an entity slot,
/// a prefab). The value core never interprets it beyond equality; identity
/// resolution belongs to the replication layer. The absent reference is
/// encoded as -1 on the wire.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RefId(i64);

impl RefId {
    /// The absent reference ("points at nothing").
    pub const NONE: Self = Self(-1);

    /// Create a reference id from a raw value.
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns `true` if this is the absent reference.
    pub fn is_none(&self) -> bool {
        self.0 == -1
    }

    /// The raw identifier value (-1 when absent).
    pub fn raw(&self) -> i64 {
        self.0
    }
}

impl Default for RefId {
    fn default() -> Self {
        Self::NONE
    }
}

impl From<i64> for RefId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl From<RefId> for i64 {
    fn from(id: RefId) -> Self {
        id.0
    }
}

impl fmt::Debug for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RefId({})", self.0)
    }
}

impl fmt::Display for RefId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            write!(f, "#none")
        } else {
            write!(f, "#{}", self.0)
        }
    }
}
