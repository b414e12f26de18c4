//! Binary wire format for Canopy value trees.
//!
//! The format is a versioned envelope (one big-endian `u32`) followed by one
//! recursively encoded node: a single tag byte, then the variant's canonical
//! payload. Scalars are fixed-width big-endian, strings and bytes are
//! length-prefixed, containers are count-prefixed, and the delta containers
//! carry one trailing auxiliary integer. Deltas are persisted and
//! transmitted, so the encoding is deterministic and byte-stable within a
//! format version.
//!
//! # Key Functions
//!
//! - [`serialize`] — Encode a tree (plain or delta) into bytes
//! - [`deserialize`] — Decode bytes back into a tree, failing loudly on
//!   unknown tags, truncation, version skew, or trailing garbage

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{CodecError, CodecResult};
pub use reader::deserialize;
pub use writer::{serialize, FORMAT_VERSION};
