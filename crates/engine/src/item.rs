//! Packable items.

use rust_decimal::Decimal;
use stowage_core::{Error, Vector3, Volume};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A named rectangular item with a weight and a packing priority.
///
/// An item owns its [`Volume`]; the same geometry type also describes
/// dead volumes inside bins. Ownership of the item itself moves with
/// placement: it lives in the pending batch or in exactly one [`Bin`],
/// never both.
///
/// [`Bin`]: crate::bin::Bin
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Item {
    name: String,
    volume: Volume,
    weight: Decimal,
    priority: u32,
}

impl Item {
    /// Creates a new item.
    pub fn new(name: impl Into<String>, volume: Volume, weight: Decimal) -> Self {
        Self {
            name: name.into(),
            volume,
            weight,
            priority: 0,
        }
    }

    /// Sets the packing priority. Placement geometry ignores it; it is
    /// an ordering hint for algorithms.
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Returns the name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the weight.
    pub fn weight(&self) -> Decimal {
        self.weight
    }

    /// Returns the priority.
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Returns the occupied region.
    pub fn bounds(&self) -> &Volume {
        &self.volume
    }

    /// Returns the size.
    pub fn size(&self) -> &Vector3 {
        self.volume.size()
    }

    /// Returns the minimum-corner position.
    pub fn position(&self) -> &Vector3 {
        self.volume.position()
    }

    /// Moves the minimum corner.
    pub fn set_position(&mut self, position: Vector3) {
        self.volume.set_position(position);
    }

    /// Volumetric occupation.
    pub fn volume(&self) -> Decimal {
        self.volume.volume()
    }

    /// Area of the base (x-z) face in the current orientation.
    pub fn base_area(&self) -> Decimal {
        self.volume.width() * self.volume.depth()
    }

    /// Rotates the item by 90° on the requested planes.
    pub fn rotate90(&mut self, horizontal: bool, vertical: bool) {
        self.volume.rotate90(horizontal, vertical);
    }

    /// Returns the axis pair spanning the smallest-area face.
    pub fn shortest_surface(&self) -> (usize, usize) {
        self.volume.shortest_surface()
    }

    /// Returns the axis pair spanning the largest-area face.
    pub fn widest_surface(&self) -> (usize, usize) {
        self.volume.widest_surface()
    }

    /// Rotates the item so the face spanned by `axes` becomes its base.
    pub fn set_bottom_surface(&mut self, axes: (usize, usize)) {
        self.volume.set_bottom_surface(axes);
    }

    /// Validates size and weight.
    pub fn validate(&self) -> Result<(), Error> {
        self.volume.validate()?;
        if self.weight < Decimal::ZERO {
            return Err(Error::InvalidGeometry(format!(
                "weight of '{}' cannot be negative",
                self.name
            )));
        }
        Ok(())
    }

    /// Rounds size, position and weight to `dp` decimal places.
    pub fn round_dp(&mut self, dp: u32) {
        self.volume.round_dp(dp);
        self.weight = self.weight.round_dp(dp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(name: &str, x: Decimal, y: Decimal, z: Decimal, weight: Decimal) -> Item {
        Item::new(name, Volume::new(Vector3::new(x, y, z)), weight)
    }

    #[test]
    fn test_item_volume() {
        let it = item("A", dec!(1), dec!(2), dec!(3), dec!(1));
        assert_eq!(it.volume(), dec!(6));
        assert_eq!(it.base_area(), dec!(3));
    }

    #[test]
    fn test_validation() {
        assert!(item("A", dec!(1), dec!(2), dec!(3), dec!(1)).validate().is_ok());
        assert!(item("B", dec!(1), dec!(2), dec!(3), dec!(-1))
            .validate()
            .is_err());
        assert!(item("C", dec!(-1), dec!(2), dec!(3), dec!(1))
            .validate()
            .is_err());
    }

    #[test]
    fn test_round_dp() {
        let mut it = item("A", dec!(1.1111), dec!(2.2222), dec!(3.3333), dec!(1.1111));
        it.round_dp(2);
        assert_eq!(*it.size(), Vector3::new(dec!(1.11), dec!(2.22), dec!(3.33)));
        assert_eq!(it.weight(), dec!(1.11));
    }

    #[test]
    fn test_rotation_delegates_to_size() {
        let mut it = item("A", dec!(1), dec!(2), dec!(3), dec!(1));
        it.set_position(Vector3::new(dec!(1), dec!(0), dec!(0)));
        it.rotate90(false, true);
        assert_eq!(*it.size(), Vector3::new(dec!(1), dec!(3), dec!(2)));
        assert_eq!(*it.position(), Vector3::new(dec!(1), dec!(0), dec!(0)));
    }
}
