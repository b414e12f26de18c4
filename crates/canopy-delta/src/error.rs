use thiserror::Error;

use canopy_value::Kind;

/// Errors from delta creation and application.
///
/// A mismatched delta application fails loudly rather than producing a
/// divergent tree: divergence between replicated peers is worse than a
/// dropped packet.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeltaError {
    /// A delta-only variant was applied in a context where the base does
    /// not match (delta-map on a non-map, index range outside a delta
    /// sequence, anchor outside the base, ...).
    #[error("invalid delta shape at {path}: {detail}")]
    InvalidDeltaShape { path: String, detail: String },

    /// A delta-only variant appeared inside one of the plain input trees
    /// handed to `create_delta`.
    #[error("delta-only variant {kind} in input tree at {path}")]
    DeltaVariantInInput { path: String, kind: Kind },
}

/// Convenience alias for delta results.
pub type DeltaResult<T> = Result<T, DeltaError>;
