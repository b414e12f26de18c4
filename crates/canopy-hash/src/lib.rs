//! Structural content hashing for Canopy value trees.
//!
//! Feeds a [`Value`](canopy_value::Value)'s structural content into a
//! running BLAKE3 stream, producing a [`Digest`] usable as a cache key or
//! for cheap equality. This is not a security boundary; it exists so that
//! two trees with the same logical content always produce the same digest
//! across runs.
//!
//! # Key Types
//!
//! - [`TreeHasher`] — Domain-separated hasher over a whole tree
//! - [`Digest`] — 32-byte content digest with hex display
//! - [`feed_value`] — Streaming feed of a single node into a raw hasher

pub mod digest;
pub mod hasher;

pub use digest::Digest;
pub use hasher::{feed_value, HashError, HashResult, TreeHasher};
