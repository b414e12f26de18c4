//! Foundation value-tree type for Canopy.
//!
//! This crate provides [`Value`], the tagged-union node type that backs
//! configuration files, prefab/scene data, save-game state, and entity
//! replication streams. Every other Canopy crate depends on `canopy-value`.
//!
//! # Key Types
//!
//! - [`Value`] — Recursive sum type over scalars, vectors, strings, bytes,
//!   sequences, maps, and the delta-only variants used by the diff engine
//! - [`Kind`] — Variant discriminant with a stable wire tag
//! - [`RefId`] — Opaque reference identifier (absent encodes as -1)
//! - [`Vector2i`] / [`Vector2f`] — 2D integer and float vectors
//! - [`ValueError`] — Type-mismatch and out-of-range access failures

pub mod error;
pub mod kind;
pub mod refid;
pub mod value;
pub mod vector;

pub use error::{ValueError, ValueResult};
pub use kind::Kind;
pub use refid::RefId;
pub use value::{Value, FLOAT_EPSILON};
pub use vector::{Vector2f, Vector2i};
