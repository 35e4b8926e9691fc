//! Ordered feasibility constraints.
//!
//! A constraint is a named predicate over a candidate `(bin, item)`
//! pair. Its weight is the evaluation-order key, not a domain weight:
//! cheap checks carry low weights and run first so the expensive ones
//! are short-circuited away.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_core::{intersect, rect_intersect, AXIS_X, AXIS_Y, AXIS_Z};

use crate::bin::Bin;
use crate::item::Item;

/// Predicate evaluated against a candidate placement.
///
/// The item is passed mutably because [`is_supported`] may snap its y
/// position onto a support surface; see [`Bin::put_item`] for how that
/// mutation is committed or rolled back.
pub type ConstraintFn = Arc<dyn Fn(&Bin, &mut Item) -> bool + Send + Sync>;

/// A named, weighted feasibility predicate with its parameters bound.
#[derive(Clone)]
pub struct Constraint {
    name: String,
    weight: u32,
    predicate: ConstraintFn,
}

impl Constraint {
    /// Creates a constraint from a predicate.
    pub fn new(name: impl Into<String>, weight: u32, predicate: ConstraintFn) -> Self {
        Self {
            name: name.into(),
            weight,
            predicate,
        }
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the evaluation-order weight.
    pub fn weight(&self) -> u32 {
        self.weight
    }

    /// Evaluates the predicate.
    pub fn check(&self, bin: &Bin, item: &mut Item) -> bool {
        (self.predicate)(bin, item)
    }
}

impl fmt::Debug for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Constraint")
            .field("name", &self.name)
            .field("weight", &self.weight)
            .finish()
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constraint {} weight({})", self.name, self.weight)
    }
}

impl PartialEq for Constraint {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.name == other.name
    }
}

impl Eq for Constraint {}

impl PartialOrd for Constraint {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Constraint {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .cmp(&other.weight)
            .then_with(|| self.name.cmp(&other.name))
    }
}

/// Rejects the item when loading it would exceed the bin's weight cap.
pub fn weight_within_limit() -> Constraint {
    Constraint::new(
        "weight_within_limit",
        5,
        Arc::new(|bin: &Bin, item: &mut Item| bin.weight() + item.weight() <= bin.max_weight()),
    )
}

/// Rejects the item when any part of it would stick out of the bin at
/// its current position and orientation.
pub fn fits_inside_bin() -> Constraint {
    Constraint::new(
        "fits_inside_bin",
        10,
        Arc::new(|bin: &Bin, item: &mut Item| {
            (0..3).all(|axis| {
                item.position()[axis] >= Decimal::ZERO
                    && item.position()[axis] <= bin.size()[axis] - item.size()[axis]
            })
        }),
    )
}

/// Rejects the item when it would intersect a dead volume of the model
/// or an already-loaded item.
pub fn no_overlap() -> Constraint {
    Constraint::new(
        "no_overlap",
        15,
        Arc::new(|bin: &Bin, item: &mut Item| {
            bin.model()
                .dead_volumes()
                .iter()
                .all(|dead| !intersect(dead, item.bounds()))
                && bin
                    .items()
                    .iter()
                    .all(|other| !intersect(other.bounds(), item.bounds()))
        }),
    )
}

/// Requires the item to rest on something: the floor, dead volumes, or
/// loaded items together covering more than `minimum_support` of its
/// base area.
///
/// Occupants whose minimum corner lies strictly below the item's y are
/// candidate supporters; those whose top surface rises above the item
/// are skipped (a vertical overlap is [`no_overlap`]'s concern, and a
/// fall must never lift the item). Supporters sharing the single
/// highest top surface cooperate, summing their overlap fractions. The
/// floor acts as a full-area supporter at height zero.
///
/// With `allow_item_fall` the item's y is snapped down onto the highest
/// support surface before the threshold test, mutating its position
/// even when the constraint is evaluated speculatively.
pub fn is_supported(allow_item_fall: bool, minimum_support: Decimal) -> Constraint {
    Constraint::new(
        "is_supported",
        20,
        Arc::new(move |bin: &Bin, item: &mut Item| {
            let base_area = item.base_area();
            if base_area == Decimal::ZERO {
                return false;
            }
            let item_y = item.position().y();
            // until a real supporter shows up, the floor carries everything
            let mut support = Decimal::ONE;
            let mut highest_surface = Decimal::ZERO;

            let occupants = bin
                .model()
                .dead_volumes()
                .iter()
                .chain(bin.items().iter().map(Item::bounds));
            for occupant in occupants {
                if occupant.position().y() >= item_y {
                    continue;
                }
                let surface = occupant.position().y() + occupant.height();
                if surface > item_y {
                    continue;
                }
                let overlap = rect_intersect(occupant, item.bounds(), AXIS_X, AXIS_Z) / base_area;
                if overlap == Decimal::ZERO {
                    continue;
                }
                match surface.cmp(&highest_surface) {
                    Ordering::Greater => {
                        highest_surface = surface;
                        support = overlap;
                    }
                    Ordering::Equal => support += overlap,
                    Ordering::Less => {}
                }
            }

            if highest_surface == item_y {
                support > minimum_support
            } else if !allow_item_fall {
                false
            } else if support > minimum_support {
                let mut position = *item.position();
                position[AXIS_Y] = highest_surface;
                item.set_position(position);
                true
            } else {
                false
            }
        }),
    )
}
