//! The packing orchestrator.

use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_core::{Error, Result};

use crate::algorithm::{PackRequest, PackingAlgorithm};
use crate::bin::{Bin, BinModel};
use crate::constraint::Constraint;
use crate::item::Item;
use crate::placement::PackOutcome;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a computed configuration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PackStats {
    /// Number of bins that hold at least one item.
    pub bins_used: usize,
    /// Total number of placed items.
    pub items_loaded: usize,
    /// Sum of the placed items' volumes.
    pub loaded_volume: Decimal,
    /// Sum of the used bins' accumulated weights.
    pub loaded_weight: Decimal,
    /// Loaded volume over the usable volume of every used bin.
    pub average_utilization: Decimal,
}

/// Aggregate root: a fleet of bins, a pending item batch, a fallback
/// bin model, the selected algorithm and the last computed
/// configuration.
///
/// [`pack`](Packer::pack) mutates the packer in place: the pending
/// batch and the fleet are consumed and reordered by the algorithm, so
/// a packer must not be shared across threads while packing runs.
#[derive(Debug, Default)]
pub struct Packer {
    fleet: Vec<Bin>,
    items: Vec<Item>,
    default_model: Option<Arc<BinModel>>,
    algorithm: Option<PackingAlgorithm>,
    current_configuration: Vec<Bin>,
    unfitted: Vec<Item>,
}

impl Packer {
    /// Creates an empty packer. Every instance owns fresh containers.
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the packing algorithm.
    pub fn with_algorithm(mut self, algorithm: PackingAlgorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    /// Sets the model used to open extra bins once the fleet runs out.
    pub fn with_default_model(mut self, model: Arc<BinModel>) -> Self {
        self.default_model = Some(model);
        self
    }

    /// Replaces the selected algorithm, returning the previous one.
    pub fn set_algorithm(&mut self, algorithm: PackingAlgorithm) -> Option<PackingAlgorithm> {
        self.algorithm.replace(algorithm)
    }

    /// Sets the fallback bin model.
    pub fn set_default_model(&mut self, model: Arc<BinModel>) {
        self.default_model = Some(model);
    }

    /// Adds a bin to the fleet.
    pub fn add_bin(&mut self, bin: Bin) {
        self.fleet.push(bin);
    }

    /// Adds a whole fleet of bins.
    pub fn add_fleet(&mut self, fleet: impl IntoIterator<Item = Bin>) {
        self.fleet.extend(fleet);
    }

    /// Adds a batch of items to the pending list.
    pub fn add_batch(&mut self, batch: impl IntoIterator<Item = Item>) {
        self.items.extend(batch);
    }

    /// Clears the fleet.
    pub fn reset_fleet(&mut self) {
        self.fleet.clear();
    }

    /// Clears the pending items.
    pub fn reset_items(&mut self) {
        self.items.clear();
    }

    /// Clears the computed configuration and the unfitted set.
    pub fn reset_configuration(&mut self) {
        self.current_configuration.clear();
        self.unfitted.clear();
    }

    /// Returns the pending fleet.
    pub fn fleet(&self) -> &[Bin] {
        &self.fleet
    }

    /// Returns the pending items.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the last computed configuration.
    pub fn current_configuration(&self) -> &[Bin] {
        &self.current_configuration
    }

    /// Returns the items the last run could not place anywhere.
    pub fn unfitted_items(&self) -> &[Item] {
        &self.unfitted
    }

    /// Runs the selected algorithm over the pending fleet and batch.
    ///
    /// Fails with [`Error::Config`] when no algorithm is selected. On
    /// success the pending fleet and items have been consumed and the
    /// configuration and unfitted set replaced.
    pub fn pack(&mut self, extra_constraints: &[Constraint]) -> Result<()> {
        let algorithm = self
            .algorithm
            .clone()
            .ok_or_else(|| Error::Config("no packing algorithm selected".into()))?;

        let request = PackRequest {
            fleet: std::mem::take(&mut self.fleet),
            items: std::mem::take(&mut self.items),
            constraints: extra_constraints.to_vec(),
            default_model: self.default_model.clone(),
        };
        let outcome = algorithm.run(request);
        self.current_configuration = outcome.bins;
        self.unfitted = outcome.unfitted;
        Ok(())
    }

    /// Probes the selected algorithm against one fresh bin per given
    /// model, using clones of the pending items. The packer's own
    /// fleet, batch and configuration are untouched.
    pub fn pack_on_models(
        &self,
        models: &[Arc<BinModel>],
        extra_constraints: &[Constraint],
    ) -> Result<PackOutcome> {
        let algorithm = self
            .algorithm
            .as_ref()
            .ok_or_else(|| Error::Config("no packing algorithm selected".into()))?;

        let fleet = models
            .iter()
            .enumerate()
            .map(|(id, model)| Bin::new(id, Arc::clone(model)))
            .collect();
        let request = PackRequest {
            fleet,
            items: self.items.clone(),
            constraints: extra_constraints.to_vec(),
            default_model: None,
        };
        Ok(algorithm.run(request))
    }

    /// Derives statistics from the current configuration.
    ///
    /// Fails with [`Error::NoData`] when no bin was used: an average
    /// utilization over zero bins is undefined, not zero.
    pub fn calculate_statistics(&self) -> Result<PackStats> {
        if self.current_configuration.is_empty() {
            return Err(Error::NoData);
        }

        let mut items_loaded = 0;
        let mut loaded_volume = Decimal::ZERO;
        let mut loaded_weight = Decimal::ZERO;
        let mut configuration_volume = Decimal::ZERO;
        for bin in &self.current_configuration {
            items_loaded += bin.items().len();
            loaded_volume += bin.items().iter().map(Item::volume).sum::<Decimal>();
            loaded_weight += bin.weight();
            configuration_volume += bin.volume();
        }
        if configuration_volume.is_zero() {
            return Err(Error::NoData);
        }

        Ok(PackStats {
            bins_used: self.current_configuration.len(),
            items_loaded,
            loaded_volume,
            loaded_weight,
            average_utilization: loaded_volume / configuration_volume,
        })
    }
}
