//! Interchangeable packing strategies.
//!
//! A strategy is a named function from a [`PackRequest`] to a
//! [`PackOutcome`], with its extra parameters (rotation policy, volume
//! threshold) bound at construction. All of them drive the shared
//! open/fill/close loop in [`crate::placement`]; they differ in how
//! items are pre-oriented and ordered before the search starts.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;

use crate::bin::{Bin, BinModel};
use crate::constraint::Constraint;
use crate::item::Item;
use crate::placement::{run_pack, FitOptions, PackOutcome};

/// Everything a strategy needs for one run.
///
/// The fleet and the item batch are consumed: bins are opened and
/// filled, items move into them or into the unfitted set.
pub struct PackRequest {
    /// Pre-built bin instances to fill, smallest first.
    pub fleet: Vec<Bin>,
    /// The batch to place.
    pub items: Vec<Item>,
    /// Constraints applied in addition to each model's own list.
    pub constraints: Vec<Constraint>,
    /// Model for extra bins once the fleet is exhausted.
    pub default_model: Option<Arc<BinModel>>,
}

/// Strategy function with its parameters bound.
pub type AlgorithmFn = Arc<dyn Fn(PackRequest) -> PackOutcome + Send + Sync>;

/// A named packing strategy.
#[derive(Clone)]
pub struct PackingAlgorithm {
    name: String,
    run: AlgorithmFn,
}

impl PackingAlgorithm {
    /// Creates a strategy from a function.
    pub fn new(name: impl Into<String>, run: AlgorithmFn) -> Self {
        Self {
            name: name.into(),
            run,
        }
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Executes the strategy.
    pub fn run(&self, request: PackRequest) -> PackOutcome {
        (self.run)(request)
    }
}

impl fmt::Debug for PackingAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PackingAlgorithm")
            .field("name", &self.name)
            .finish()
    }
}

/// First-fit search over items in ascending volume order.
pub fn base_packer() -> PackingAlgorithm {
    PackingAlgorithm::new(
        "base_packer",
        Arc::new(|mut request: PackRequest| {
            request.items.sort_by_key(Item::volume);
            run_pack(
                request.fleet,
                request.items,
                request.constraints,
                request.default_model,
                FitOptions::basic(),
            )
        }),
    )
}

/// Stands every item on its smallest face before packing.
///
/// Items are ordered by descending smallest-face area, descending
/// volume breaking ties.
pub fn all_stand(full_rotation: bool) -> PackingAlgorithm {
    PackingAlgorithm::new(
        "all_stand",
        Arc::new(move |mut request: PackRequest| {
            for item in &mut request.items {
                let axes = item.shortest_surface();
                item.set_bottom_surface(axes);
            }
            // two stable passes: the key applied last is primary
            request.items.sort_by(|a, b| b.volume().cmp(&a.volume()));
            request
                .items
                .sort_by(|a, b| b.base_area().cmp(&a.base_area()));
            run_pack(
                request.fleet,
                request.items,
                request.constraints,
                request.default_model,
                FitOptions::extended(full_rotation),
            )
        }),
    )
}

/// Lays every item on its largest face before packing.
///
/// Items are ordered by descending largest-face area, ascending volume
/// breaking ties.
pub fn all_lay(full_rotation: bool) -> PackingAlgorithm {
    PackingAlgorithm::new(
        "all_lay",
        Arc::new(move |mut request: PackRequest| {
            for item in &mut request.items {
                let axes = item.widest_surface();
                item.set_bottom_surface(axes);
            }
            request.items.sort_by(|a, b| a.volume().cmp(&b.volume()));
            request
                .items
                .sort_by(|a, b| b.base_area().cmp(&a.base_area()));
            run_pack(
                request.fleet,
                request.items,
                request.constraints,
                request.default_model,
                FitOptions::extended(full_rotation),
            )
        }),
    )
}

/// Stands items smaller than `volume_threshold` on their smallest face
/// and lays everything else on its largest face, packing big items
/// first.
pub fn big_lay_small_stand(volume_threshold: Decimal, full_rotation: bool) -> PackingAlgorithm {
    PackingAlgorithm::new(
        "big_lay_small_stand",
        Arc::new(move |mut request: PackRequest| {
            for item in &mut request.items {
                let axes = if item.volume() < volume_threshold {
                    item.shortest_surface()
                } else {
                    item.widest_surface()
                };
                item.set_bottom_surface(axes);
            }
            request.items.sort_by(|a, b| b.volume().cmp(&a.volume()));
            run_pack(
                request.fleet,
                request.items,
                request.constraints,
                request.default_model,
                FitOptions::extended(full_rotation),
            )
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constraint::{fits_inside_bin, is_supported, no_overlap, weight_within_limit};
    use rust_decimal_macros::dec;
    use stowage_core::{Vector3, Volume};

    fn standard_constraints() -> Vec<Constraint> {
        vec![
            weight_within_limit(),
            fits_inside_bin(),
            no_overlap(),
            is_supported(false, dec!(0.5)),
        ]
    }

    fn cube_model(edge: Decimal, max_weight: Decimal) -> Arc<BinModel> {
        Arc::new(BinModel::new(
            "cube",
            Vector3::new(edge, edge, edge),
            max_weight,
        ))
    }

    fn unit_item(name: &str, weight: Decimal) -> Item {
        Item::new(
            name,
            Volume::new(Vector3::new(dec!(1), dec!(1), dec!(1))),
            weight,
        )
    }

    fn brick(name: &str, x: Decimal, y: Decimal, z: Decimal) -> Item {
        Item::new(name, Volume::new(Vector3::new(x, y, z)), dec!(1))
    }

    #[test]
    fn test_base_packer_fills_a_cube() {
        let items: Vec<Item> = (0..8)
            .map(|i| unit_item(&format!("I{}", i), dec!(1)))
            .collect();
        let request = PackRequest {
            fleet: vec![Bin::new(0, cube_model(dec!(2), dec!(100)))],
            items,
            constraints: standard_constraints(),
            default_model: None,
        };

        let outcome = base_packer().run(request);
        assert_eq!(outcome.bins.len(), 1);
        assert_eq!(outcome.items_loaded(), 8);
        assert!(outcome.all_placed());

        let bin = &outcome.bins[0];
        assert_eq!(bin.weight(), dec!(8));
        for (i, a) in bin.items().iter().enumerate() {
            for b in bin.items().iter().skip(i + 1) {
                assert!(!stowage_core::intersect(a.bounds(), b.bounds()));
            }
        }
    }

    #[test]
    fn test_base_packer_opens_smallest_bins_first() {
        let fleet = vec![
            Bin::new(10, cube_model(dec!(3), dec!(100))),
            Bin::new(20, cube_model(dec!(1), dec!(100))),
        ];
        let request = PackRequest {
            fleet,
            items: vec![unit_item("A", dec!(1))],
            constraints: standard_constraints(),
            default_model: None,
        };

        let outcome = base_packer().run(request);
        assert_eq!(outcome.bins.len(), 1);
        assert_eq!(outcome.bins[0].id(), 20);
    }

    #[test]
    fn test_base_packer_abandons_when_nothing_fits() {
        let request = PackRequest {
            fleet: Vec::new(),
            items: vec![brick("big", dec!(5), dec!(5), dec!(5))],
            constraints: standard_constraints(),
            default_model: Some(cube_model(dec!(1), dec!(100))),
        };

        let outcome = base_packer().run(request);
        assert!(outcome.bins.is_empty());
        assert_eq!(outcome.unfitted.len(), 1);
        assert_eq!(outcome.unfitted[0].name(), "big");
    }

    #[test]
    fn test_all_stand_puts_the_smallest_face_down() {
        let request = PackRequest {
            fleet: Vec::new(),
            items: vec![brick("A", dec!(2), dec!(1), dec!(3))],
            constraints: standard_constraints(),
            default_model: Some(cube_model(dec!(4), dec!(100))),
        };

        let outcome = all_stand(false).run(request);
        assert_eq!(outcome.items_loaded(), 1);
        let placed = &outcome.bins[0].items()[0];
        // smallest face is 2x1, so the 3 edge stands upright
        assert_eq!(*placed.size(), Vector3::new(dec!(2), dec!(3), dec!(1)));
        assert_eq!(placed.base_area(), dec!(2));
    }

    #[test]
    fn test_all_lay_puts_the_widest_face_down() {
        let request = PackRequest {
            fleet: Vec::new(),
            items: vec![brick("A", dec!(2), dec!(1), dec!(3))],
            constraints: standard_constraints(),
            default_model: Some(cube_model(dec!(4), dec!(100))),
        };

        let outcome = all_lay(false).run(request);
        assert_eq!(outcome.items_loaded(), 1);
        let placed = &outcome.bins[0].items()[0];
        // widest face is 2x3, already the base: no rotation happens
        assert_eq!(*placed.size(), Vector3::new(dec!(2), dec!(1), dec!(3)));
        assert_eq!(placed.base_area(), dec!(6));
    }

    #[test]
    fn test_all_stand_orders_by_face_area_then_volume() {
        // wide has the larger standing face, slim the smaller one
        let wide = brick("wide", dec!(2), dec!(2), dec!(4));
        let slim = brick("slim", dec!(1), dec!(1), dec!(5));
        let request = PackRequest {
            fleet: Vec::new(),
            items: vec![slim, wide],
            constraints: standard_constraints(),
            default_model: Some(cube_model(dec!(10), dec!(100))),
        };

        let outcome = all_stand(false).run(request);
        assert_eq!(outcome.items_loaded(), 2);
        assert_eq!(outcome.bins[0].items()[0].name(), "wide");
        assert_eq!(outcome.bins[0].items()[1].name(), "slim");
    }

    #[test]
    fn test_big_lay_small_stand_splits_on_the_threshold() {
        // volume 6 lies down, volume 0.375 stands up
        let big = brick("big", dec!(2), dec!(1), dec!(3));
        let small = Item::new(
            "small",
            Volume::new(Vector3::new(dec!(1), dec!(0.25), dec!(1.5))),
            dec!(1),
        );
        let request = PackRequest {
            fleet: Vec::new(),
            items: vec![small, big],
            constraints: standard_constraints(),
            default_model: Some(cube_model(dec!(6), dec!(100))),
        };

        let outcome = big_lay_small_stand(dec!(1), false).run(request);
        assert_eq!(outcome.items_loaded(), 2);
        let bin = &outcome.bins[0];
        // big first (descending volume), lying on its 2x3 face
        assert_eq!(bin.items()[0].name(), "big");
        assert_eq!(*bin.items()[0].size(), Vector3::new(dec!(2), dec!(1), dec!(3)));
        // small stands on its 1x0.25 face
        let small_placed = &bin.items()[1];
        assert_eq!(small_placed.name(), "small");
        assert_eq!(small_placed.base_area(), dec!(0.25));
    }
}
