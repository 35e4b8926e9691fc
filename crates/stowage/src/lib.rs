//! # Stowage
//!
//! Constraint-driven 3D bin packing decision engine.
//!
//! Given a catalog of items and a fleet of bin models, stowage computes
//! an assignment of items to bin instances with concrete 3D placements
//! that satisfies an ordered, pluggable set of feasibility constraints.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use rust_decimal_macros::dec;
//! use stowage::engine::{base_packer, BinModel, Item, Packer};
//! use stowage::core::{Vector3, Volume};
//!
//! let model = Arc::new(BinModel::new(
//!     "container",
//!     Vector3::new(dec!(10), dec!(4), dec!(6)),
//!     dec!(200),
//! ));
//!
//! let mut packer = Packer::new()
//!     .with_algorithm(base_packer())
//!     .with_default_model(model);
//! packer.add_batch(items);
//! packer.pack(&[])?;
//! println!("{:?}", packer.calculate_statistics()?);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support

/// Geometry primitives and the shared error type.
pub use stowage_core as core;

/// Entities, constraints, heuristics and the packer.
pub use stowage_engine as engine;

// Re-export commonly used types at root level
pub use stowage_engine::{
    Bin, BinModel, Constraint, Error, Item, PackOutcome, PackStats, Packer, PackingAlgorithm,
    Result,
};
