//! Explicit constraint and algorithm catalogs.
//!
//! Registries are plain values owned by the caller, not process-wide
//! state: build one, register what you need, and hand the looked-up
//! entries to the packer. The core engine only ever consumes ordered
//! constraint lists and a selected algorithm, never a registry itself.

use std::collections::HashMap;

use rust_decimal_macros::dec;

use crate::algorithm::{all_lay, all_stand, base_packer, big_lay_small_stand, PackingAlgorithm};
use crate::constraint::{
    fits_inside_bin, is_supported, no_overlap, weight_within_limit, Constraint,
};

/// A catalog of constraints by name.
#[derive(Debug, Clone, Default)]
pub struct ConstraintRegistry {
    entries: HashMap<String, Constraint>,
}

impl ConstraintRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the four ready-made constraints:
    /// `weight_within_limit`, `fits_inside_bin`, `no_overlap` and
    /// `is_supported` (no falling, half-area support threshold).
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for constraint in [
            weight_within_limit(),
            fits_inside_bin(),
            no_overlap(),
            is_supported(false, dec!(0.5)),
        ] {
            registry.register(constraint);
        }
        registry
    }

    /// Registers a constraint under its own name, returning the entry
    /// it replaced, if any.
    pub fn register(&mut self, constraint: Constraint) -> Option<Constraint> {
        self.entries
            .insert(constraint.name().to_string(), constraint)
    }

    /// Looks up a constraint by name.
    pub fn get(&self, name: &str) -> Option<&Constraint> {
        self.entries.get(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered constraints.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A catalog of packing algorithms by name.
#[derive(Debug, Clone, Default)]
pub struct AlgorithmRegistry {
    entries: HashMap<String, PackingAlgorithm>,
}

impl AlgorithmRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry pre-loaded with the four ready-made strategies with
    /// their default parameters: `base_packer`, `all_stand`, `all_lay`
    /// and `big_lay_small_stand` (volume threshold 0.5), all without
    /// full rotation.
    pub fn standard() -> Self {
        let mut registry = Self::new();
        for algorithm in [
            base_packer(),
            all_stand(false),
            all_lay(false),
            big_lay_small_stand(dec!(0.5), false),
        ] {
            registry.register(algorithm);
        }
        registry
    }

    /// Registers an algorithm under its own name, returning the entry
    /// it replaced, if any.
    pub fn register(&mut self, algorithm: PackingAlgorithm) -> Option<PackingAlgorithm> {
        self.entries.insert(algorithm.name().to_string(), algorithm)
    }

    /// Looks up an algorithm by name.
    pub fn get(&self, name: &str) -> Option<&PackingAlgorithm> {
        self.entries.get(name)
    }

    /// Returns the registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.entries.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered algorithms.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
