//! Bin templates and loadable bin instances.

use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_core::{Error, Vector3, Volume};

use crate::constraint::Constraint;
use crate::item::Item;

/// An immutable bin template: dimensions, weight cap, the ordered
/// constraints every insertion must satisfy, and the dead volumes that
/// can never be packed into (wheel wells, structural obstructions).
///
/// Models are shared read-only between bin instances via [`Arc`].
#[derive(Debug, Clone)]
pub struct BinModel {
    name: String,
    size: Vector3,
    max_weight: Decimal,
    constraints: Vec<Constraint>,
    dead_volumes: Vec<Volume>,
}

impl BinModel {
    /// Creates a new model with no constraints and no dead volumes.
    pub fn new(name: impl Into<String>, size: Vector3, max_weight: Decimal) -> Self {
        Self {
            name: name.into(),
            size,
            max_weight,
            constraints: Vec::new(),
            dead_volumes: Vec::new(),
        }
    }

    /// Sets the constraint list. Constraints are kept sorted ascending
    /// by weight so evaluation runs the cheapest checks first.
    pub fn with_constraints(mut self, mut constraints: Vec<Constraint>) -> Self {
        constraints.sort();
        self.constraints = constraints;
        self
    }

    /// Sets the dead volumes.
    pub fn with_dead_volumes(mut self, dead_volumes: Vec<Volume>) -> Self {
        self.dead_volumes = dead_volumes;
        self
    }

    /// Returns the model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the interior dimensions.
    pub fn size(&self) -> &Vector3 {
        &self.size
    }

    /// Returns the maximum loadable weight.
    pub fn max_weight(&self) -> Decimal {
        self.max_weight
    }

    /// Returns the ordered constraint list.
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// Returns the dead volumes.
    pub fn dead_volumes(&self) -> &[Volume] {
        &self.dead_volumes
    }

    /// Usable volume: the raw box volume minus every dead volume.
    pub fn volume(&self) -> Decimal {
        let dead: Decimal = self.dead_volumes.iter().map(Volume::volume).sum();
        self.size.x() * self.size.y() * self.size.z() - dead
    }

    /// Validates dimensions, weight cap and dead-volume placement.
    pub fn validate(&self) -> Result<(), Error> {
        for axis in 0..3 {
            if self.size[axis] < Decimal::ZERO {
                return Err(Error::InvalidModel(format!(
                    "size of '{}' on axis {} is negative",
                    self.name, axis
                )));
            }
        }
        if self.max_weight < Decimal::ZERO {
            return Err(Error::InvalidModel(format!(
                "maximum weight of '{}' cannot be negative",
                self.name
            )));
        }
        for dead in &self.dead_volumes {
            dead.validate()
                .map_err(|e| Error::InvalidModel(format!("dead volume of '{}': {}", self.name, e)))?;
            for axis in 0..3 {
                let start = dead.position()[axis];
                if start < Decimal::ZERO || start + dead.size()[axis] > self.size[axis] {
                    return Err(Error::InvalidModel(format!(
                        "dead volume of '{}' sticks out of the bin on axis {}",
                        self.name, axis
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A mutable bin instance bound to a shared [`BinModel`].
///
/// The item list keeps insertion order, which is the placement order;
/// `weight` always equals the sum of the loaded items' weights.
#[derive(Debug, Clone)]
pub struct Bin {
    id: usize,
    model: Arc<BinModel>,
    items: Vec<Item>,
    weight: Decimal,
}

/// Dry-run partition of a bin's items against a single constraint.
#[derive(Debug)]
pub struct PruneReport<'a> {
    /// Items that satisfy the constraint.
    pub pass: Vec<&'a Item>,
    /// Items that fail it.
    pub not_pass: Vec<&'a Item>,
}

impl Bin {
    /// Creates an empty bin instance of the given model.
    pub fn new(id: usize, model: Arc<BinModel>) -> Self {
        Self {
            id,
            model,
            items: Vec::new(),
            weight: Decimal::ZERO,
        }
    }

    /// Returns the instance id. Ids carry no uniqueness guarantee.
    pub fn id(&self) -> usize {
        self.id
    }

    /// Returns the model this bin was instantiated from.
    pub fn model(&self) -> &BinModel {
        &self.model
    }

    /// Returns the interior dimensions.
    pub fn size(&self) -> &Vector3 {
        self.model.size()
    }

    /// Returns the maximum loadable weight.
    pub fn max_weight(&self) -> Decimal {
        self.model.max_weight()
    }

    /// Usable volume of the model.
    pub fn volume(&self) -> Decimal {
        self.model.volume()
    }

    /// Returns the loaded items in placement order.
    pub fn items(&self) -> &[Item] {
        &self.items
    }

    /// Returns the accumulated weight.
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// True when nothing is loaded.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn satisfies(&self, item: &mut Item, extra_constraints: &[Constraint]) -> bool {
        extra_constraints
            .iter()
            .chain(self.model.constraints())
            .all(|constraint| constraint.check(self, item))
    }

    /// Tries to load the item at its current position and orientation.
    ///
    /// `extra_constraints` are evaluated first, then the model's own
    /// ordered list; evaluation short-circuits on the first failure. On
    /// success the item is appended and the bin weight grows by the
    /// item's weight. On failure the item is handed back unchanged: the
    /// candidate position is evaluated against a snapshot, so a support
    /// snap performed during evaluation is only committed when every
    /// constraint passed.
    pub fn put_item(&mut self, mut item: Item, extra_constraints: &[Constraint]) -> Result<(), Item> {
        let snapshot = *item.position();
        if self.satisfies(&mut item, extra_constraints) {
            self.weight += item.weight();
            self.items.push(item);
            Ok(())
        } else {
            item.set_position(snapshot);
            Err(item)
        }
    }

    /// Removes the first item with the given name and returns it.
    ///
    /// Every remaining item is re-validated against the model
    /// constraints and evicted when it no longer holds, cascading until
    /// the load is consistent again. Evicted items are logged at `warn`
    /// and dropped; only the explicitly removed item is returned.
    pub fn remove_item(&mut self, name: &str) -> Option<Item> {
        let index = self.items.iter().position(|item| item.name() == name)?;
        let removed = self.items.remove(index);
        self.weight -= removed.weight();
        self.revalidate();
        Some(removed)
    }

    fn revalidate(&mut self) {
        let mut index = 0;
        while index < self.items.len() {
            let mut item = self.items.remove(index);
            self.weight -= item.weight();
            let snapshot = *item.position();
            if self.satisfies(&mut item, &[]) {
                self.weight += item.weight();
                self.items.insert(index, item);
                index += 1;
            } else {
                item.set_position(snapshot);
                log::warn!(
                    "evicting item '{}' from bin {}: model constraints no longer hold",
                    item.name(),
                    self.id
                );
                // an eviction can strand items checked earlier, rescan
                index = 0;
            }
        }
    }

    /// Dry-run: partitions the loaded items into pass / not-pass against
    /// one constraint. The bin is not mutated; each item is probed
    /// through a clone, and the probe is evaluated against the bin as
    /// loaded (the probed item itself is not excluded from the scan).
    pub fn prune(&self, constraint: &Constraint) -> PruneReport<'_> {
        let mut pass = Vec::new();
        let mut not_pass = Vec::new();
        for item in &self.items {
            let mut probe = item.clone();
            if constraint.check(self, &mut probe) {
                pass.push(item);
            } else {
                not_pass.push(item);
            }
        }
        PruneReport { pass, not_pass }
    }
}
