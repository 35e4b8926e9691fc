//! The shared anchor-and-rotate placement search.
//!
//! Every packing strategy drives the same primitive: walk the corners
//! of the already-loaded items, offset along one axis at a time, and at
//! each anchor rotate the candidate through its orientations until
//! [`Bin::put_item`] accepts one.

use std::sync::Arc;

use rust_decimal::Decimal;
use stowage_core::{Vector3, AXIS_X, AXIS_Y, AXIS_Z};

use crate::bin::{Bin, BinModel};
use crate::constraint::Constraint;
use crate::item::Item;

/// Controls how [`try_fit`] walks anchors and orientations.
#[derive(Debug, Clone, Copy)]
pub struct FitOptions {
    /// Order in which anchor offsets are generated from each occupant.
    pub axis_order: [usize; 3],
    /// Also try anchors offset in the negative direction of each axis.
    pub negative_offsets: bool,
    /// Run all eight orientation attempts at each anchor instead of the
    /// four spanned by the horizontal and vertical flips alone.
    pub full_rotation: bool,
}

impl FitOptions {
    /// The first-fit walk: axes x, y, z with positive offsets only.
    pub fn basic() -> Self {
        Self {
            axis_order: [AXIS_X, AXIS_Y, AXIS_Z],
            negative_offsets: false,
            full_rotation: false,
        }
    }

    /// The extended walk: axes x, z, y with offsets in both directions.
    pub fn extended(full_rotation: bool) -> Self {
        Self {
            axis_order: [AXIS_X, AXIS_Z, AXIS_Y],
            negative_offsets: true,
            full_rotation,
        }
    }
}

/// Tries every orientation of `item` with its minimum corner at
/// `position`. The four-attempt walk flips through both rotation
/// degrees of freedom and ends back at the entry orientation; with
/// `full_rotation` a combined-flag tilt opens a second round of four
/// that reaches the remaining axis-aligned orientations.
fn attempt_orientations(
    bin: &mut Bin,
    mut item: Item,
    position: Vector3,
    constraints: &[Constraint],
    full_rotation: bool,
) -> Result<(), Item> {
    item.set_position(position);
    let rounds = if full_rotation { 2 } else { 1 };
    for round in 0..rounds {
        for _horizontal in 0..2 {
            for _vertical in 0..2 {
                match bin.put_item(item, constraints) {
                    Ok(()) => return Ok(()),
                    Err(rejected) => item = rejected,
                }
                item.rotate90(false, true);
            }
            item.rotate90(true, false);
        }
        if round + 1 < rounds {
            item.rotate90(true, true);
        }
    }
    if full_rotation {
        // the tilt is a three-cycle; two more applications restore the
        // entry orientation
        item.rotate90(true, true);
        item.rotate90(true, true);
    }
    Err(item)
}

/// Tries to place `item` against the loaded occupants of `bin`.
///
/// For each occupant, for each axis in the configured order, the
/// candidate's minimum corner is anchored at the occupant's corner
/// offset by the occupant's extent along that axis; each anchor runs
/// the orientation walk. The first accepted pose wins. On failure the
/// item is handed back with position and orientation untouched.
pub fn try_fit(
    bin: &mut Bin,
    mut item: Item,
    constraints: &[Constraint],
    options: &FitOptions,
) -> Result<(), Item> {
    let original_position = *item.position();

    let anchors: Vec<(Vector3, Vector3)> = bin
        .items()
        .iter()
        .map(|occupant| (*occupant.position(), *occupant.size()))
        .collect();

    let directions: &[Decimal] = if options.negative_offsets {
        &[Decimal::ONE, Decimal::NEGATIVE_ONE]
    } else {
        &[Decimal::ONE]
    };

    for (pivot, extent) in anchors {
        for &axis in &options.axis_order {
            for &direction in directions {
                let mut candidate = pivot;
                candidate[axis] += extent[axis] * direction;
                match attempt_orientations(bin, item, candidate, constraints, options.full_rotation)
                {
                    Ok(()) => return Ok(()),
                    Err(rejected) => item = rejected,
                }
            }
        }
    }

    item.set_position(original_position);
    Err(item)
}

/// Outcome of one packing run: the filled bins in the order they were
/// closed, plus every item that fit nowhere.
#[derive(Debug, Default)]
pub struct PackOutcome {
    /// Bins that accepted at least one item.
    pub bins: Vec<Bin>,
    /// Items no opened bin accepted.
    pub unfitted: Vec<Item>,
}

impl PackOutcome {
    /// Total number of placed items.
    pub fn items_loaded(&self) -> usize {
        self.bins.iter().map(|bin| bin.items().len()).sum()
    }

    /// True when nothing was left over.
    pub fn all_placed(&self) -> bool {
        self.unfitted.is_empty()
    }
}

/// The open/fill/close loop shared by every packing strategy.
///
/// Constraints are sorted ascending by weight and the fleet ascending
/// by usable volume; the smallest available bin is opened first, and a
/// fresh default-model bin is opened once the fleet runs out. Every
/// still-unplaced item is offered to the open bin (at the origin when
/// the bin is empty, through [`try_fit`] otherwise). The loop ends when
/// all items are placed, when no bin can be opened, or when a freshly
/// opened bin accepts nothing.
pub(crate) fn run_pack(
    mut fleet: Vec<Bin>,
    mut items: Vec<Item>,
    mut constraints: Vec<Constraint>,
    default_model: Option<Arc<BinModel>>,
    options: FitOptions,
) -> PackOutcome {
    constraints.sort();
    fleet.sort_by_key(Bin::volume);

    let mut configuration: Vec<Bin> = Vec::new();
    let mut unfitted: Vec<Item> = Vec::new();

    while !items.is_empty() {
        let mut bin = if !fleet.is_empty() {
            fleet.remove(0)
        } else if let Some(model) = &default_model {
            Bin::new(configuration.len(), Arc::clone(model))
        } else {
            unfitted.append(&mut items);
            break;
        };
        log::debug!(
            "opened bin {} ({}) with {} item(s) pending",
            bin.id(),
            bin.model().name(),
            items.len()
        );

        for mut item in items.drain(..) {
            let placed = if bin.is_empty() {
                item.set_position(Vector3::zero());
                bin.put_item(item, &constraints)
            } else {
                try_fit(&mut bin, item, &constraints, &options)
            };
            if let Err(rejected) = placed {
                unfitted.push(rejected);
            }
        }

        if bin.is_empty() {
            // a fresh bin that accepts nothing means the rest is infeasible
            break;
        }
        items = std::mem::take(&mut unfitted);
        configuration.push(bin);
    }

    if !unfitted.is_empty() {
        log::warn!("{} item(s) could not be placed in any bin", unfitted.len());
    }
    PackOutcome {
        bins: configuration,
        unfitted,
    }
}
