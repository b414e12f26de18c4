use canopy_value::{Kind, Value};

use crate::digest::Digest;

/// Errors from structural hashing.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum HashError {
    /// A delta-only variant was found inside the tree being hashed. Deltas
    /// are ephemeral and have no content identity.
    #[error("cannot hash delta variant: {kind}")]
    DeltaVariant { kind: Kind },
}

/// Convenience alias for hash results.
pub type HashResult<T> = Result<T, HashError>;

/// Domain-separated structural hasher for value trees.
///
/// Each hasher carries a domain tag that is prepended to every computation,
/// so trees hashed for different purposes (asset cache vs. replication
/// snapshot) never collide by construction.
pub struct TreeHasher {
    domain: &'static str,
}

impl TreeHasher {
    /// Hasher for plain value trees.
    pub const VALUE: Self = Self {
        domain: "canopy-value-v1",
    };
    /// Hasher for replication snapshot trees.
    pub const SNAPSHOT: Self = Self {
        domain: "canopy-snapshot-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }

    /// Hash a whole tree into a digest.
    pub fn digest(&self, value: &Value) -> HashResult<Digest> {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        feed_value(&mut hasher, value)?;
        Ok(Digest::from_hash(*hasher.finalize().as_bytes()))
    }
}

/// Feed one node's structural content into a running hasher.
///
/// The stream is the node's wire tag followed by its payload: scalars as
/// fixed-width big-endian bytes, strings and bytes as length plus raw
/// content, sequences as length plus each element, and maps as each
/// key/value pair in stored order — skipping entries whose value is absent,
/// so two maps differing only in present-but-absent keys hash identically.
pub fn feed_value(hasher: &mut blake3::Hasher, value: &Value) -> HashResult<()> {
    if value.is_delta() {
        return Err(HashError::DeltaVariant { kind: value.kind() });
    }
    hasher.update(&[value.kind().tag()]);
    match value {
        Value::Absent => {}
        Value::Bool(v) => {
            hasher.update(&[u8::from(*v)]);
        }
        Value::Int(v) => {
            hasher.update(&v.to_be_bytes());
        }
        Value::Int64(v) => {
            hasher.update(&v.to_be_bytes());
        }
        Value::Ref(r) => {
            hasher.update(&r.raw().to_be_bytes());
        }
        Value::Float(v) => {
            hasher.update(&v.to_be_bytes());
        }
        Value::Vector2i(v) => {
            hasher.update(&v.x.to_be_bytes());
            hasher.update(&v.y.to_be_bytes());
        }
        Value::Vector2f(v) => {
            hasher.update(&v.x.to_be_bytes());
            hasher.update(&v.y.to_be_bytes());
        }
        Value::String(s) => {
            hasher.update(&(s.len() as u32).to_be_bytes());
            hasher.update(s.as_bytes());
        }
        Value::Bytes(b) => {
            hasher.update(&(b.len() as u32).to_be_bytes());
            hasher.update(b);
        }
        Value::Sequence(items) => {
            hasher.update(&(items.len() as u32).to_be_bytes());
            for item in items {
                feed_value(hasher, item)?;
            }
        }
        Value::Map(entries) => {
            for (key, entry) in entries {
                if entry.is_absent() {
                    continue;
                }
                hasher.update(&(key.len() as u32).to_be_bytes());
                hasher.update(key.as_bytes());
                feed_value(hasher, entry)?;
            }
        }
        // is_delta() rejected these above.
        Value::Noop
        | Value::Delete
        | Value::IndexRange { .. }
        | Value::DeltaMap { .. }
        | Value::DeltaSequence { .. } => unreachable!(),
    }
    Ok(())
}
