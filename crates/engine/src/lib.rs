//! # Stowage Engine
//!
//! Constraint-driven heuristic 3D bin packing.
//!
//! Given a batch of items (rectangular volumes with weight and
//! priority) and a fleet of bin models (dimensions, weight cap, dead
//! volumes), the engine computes an assignment of items to bin
//! instances with concrete positions and orientations, honoring an
//! ordered, short-circuiting list of feasibility constraints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rust_decimal_macros::dec;
//! use stowage_engine::{
//!     base_packer, fits_inside_bin, no_overlap, weight_within_limit,
//!     BinModel, Packer, Vector3,
//! };
//!
//! let model = Arc::new(
//!     BinModel::new("container", Vector3::new(dec!(2), dec!(2), dec!(2)), dec!(100))
//!         .with_constraints(vec![
//!             weight_within_limit(),
//!             fits_inside_bin(),
//!             no_overlap(),
//!         ]),
//! );
//!
//! let mut packer = Packer::new()
//!     .with_algorithm(base_packer())
//!     .with_default_model(model);
//! packer.add_batch(items);
//! packer.pack(&[])?;
//! let stats = packer.calculate_statistics()?;
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization/deserialization support

pub mod algorithm;
pub mod bin;
pub mod constraint;
pub mod item;
pub mod packer;
pub mod placement;
pub mod registry;

// Re-exports
pub use algorithm::{
    all_lay, all_stand, base_packer, big_lay_small_stand, AlgorithmFn, PackRequest,
    PackingAlgorithm,
};
pub use bin::{Bin, BinModel, PruneReport};
pub use constraint::{
    fits_inside_bin, is_supported, no_overlap, weight_within_limit, Constraint, ConstraintFn,
};
pub use item::Item;
pub use packer::{PackStats, Packer};
pub use placement::{try_fit, FitOptions, PackOutcome};
pub use registry::{AlgorithmRegistry, ConstraintRegistry};
pub use stowage_core::{intersect, rect_intersect, Decimal, Error, Result, Vector3, Volume};
