//! Diff/patch engine for Canopy value trees.
//!
//! [`create_delta`] compares two trees and produces a minimal, replayable
//! delta; [`apply_delta`] reconstructs the target tree from a base tree plus
//! that delta. The algorithm is parameterized by a caller-supplied
//! [`DeltaHints`] policy: which paths to bypass, which map keys may be
//! deleted, how to match old-to-new sequence elements, whether sequence
//! order matters, and whether absence and emptiness are interchangeable.
//!
//! Deltas are ordinary [`Value`](canopy_value::Value) trees built from the
//! delta-only variants, so they serialize through `canopy-codec` like any
//! other tree.
//!
//! # Key Types
//!
//! - [`create_delta`] / [`apply_delta`] — The diff and patch entry points
//! - [`DeltaHints`] — Pluggable diff policy
//! - [`PositionalHints`] / [`IdentityHints`] / [`KeyedHints`] — Stock policies
//! - [`Breadcrumb`] — The path from the root to the node being diffed

pub mod apply;
pub mod breadcrumb;
pub mod create;
pub mod error;
pub mod hints;

pub use apply::apply_delta;
pub use breadcrumb::{Breadcrumb, Segment};
pub use create::create_delta;
pub use error::{DeltaError, DeltaResult};
pub use hints::{DeltaHints, IdentityHints, KeyedHints, PositionalHints};
