use thiserror::Error;

use crate::kind::Kind;

/// Errors produced by value access and coercion.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    /// An accessor was called on a variant it cannot coerce from.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch { expected: Kind, actual: Kind },

    /// A positional sequence access fell outside the sequence.
    #[error("index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Convenience alias for value results.
pub type ValueResult<T> = Result<T, ValueError>;
