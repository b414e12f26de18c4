use thiserror::Error;

/// Errors from encoding or decoding the binary format.
///
/// Every corruption variant carries the byte offset at which decoding
/// failed, so a bad save file or network packet is diagnosable without a
/// debugger.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// An unrecognized type tag — format corruption or version skew.
    #[error("unknown node type tag {tag:#04x} at offset {offset}")]
    UnknownNodeType { tag: u8, offset: usize },

    /// The envelope carries a version this build does not understand.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u32),

    /// Input ended mid-payload.
    #[error("unexpected end of input at offset {offset} (needed {needed} more bytes)")]
    UnexpectedEof { offset: usize, needed: usize },

    /// A string payload was not valid UTF-8.
    #[error("invalid UTF-8 in string at offset {offset}")]
    InvalidUtf8 { offset: usize },

    /// A declared length or count exceeds the remaining input.
    #[error("declared length {len} at offset {offset} exceeds remaining input")]
    LengthOverflow { offset: usize, len: usize },

    /// Extra bytes after the root node.
    #[error("{remaining} trailing bytes after root node")]
    TrailingBytes { remaining: usize },
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
