//! # Stowage Core
//!
//! Decimal-exact geometry primitives for the stowage 3D bin packing engine.
//!
//! This crate provides the foundational types shared by every packing
//! component: 3D vectors and axis-aligned volumes with 90° rotations,
//! projection-based overlap tests, and the common error type.
//!
//! All coordinates, sizes and derived quantities are [`Decimal`], not
//! floats: placement search builds positions out of many small additions
//! and must not accumulate rounding error.
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod error;
pub mod vector;
pub mod volume;

// Re-exports
pub use error::{Error, Result};
pub use rust_decimal::Decimal;
pub use vector::{Vector3, AXIS_X, AXIS_Y, AXIS_Z};
pub use volume::{intersect, rect_intersect, Volume};
