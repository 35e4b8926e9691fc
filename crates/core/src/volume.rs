//! Axis-aligned occupied regions and their overlap tests.

use rust_decimal::Decimal;

use crate::error::{Error, Result};
use crate::vector::{Vector3, AXIS_X, AXIS_Y, AXIS_Z};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// An axis-aligned box occupying space.
///
/// `position` is the minimum corner, not the centroid; all placement
/// logic builds on that convention. Rotation only permutes the size
/// components, so a `Volume` stays axis-aligned under every supported
/// orientation.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Volume {
    size: Vector3,
    position: Vector3,
}

impl Volume {
    /// Creates a volume of the given size positioned at the origin.
    pub fn new(size: Vector3) -> Self {
        Self {
            size,
            position: Vector3::zero(),
        }
    }

    /// Sets the minimum-corner position.
    pub fn with_position(mut self, position: Vector3) -> Self {
        self.position = position;
        self
    }

    /// Returns the size.
    pub fn size(&self) -> &Vector3 {
        &self.size
    }

    /// Returns the minimum-corner position.
    pub fn position(&self) -> &Vector3 {
        &self.position
    }

    /// Moves the minimum corner.
    pub fn set_position(&mut self, position: Vector3) {
        self.position = position;
    }

    /// Returns the extent along x.
    pub fn width(&self) -> Decimal {
        self.size.x()
    }

    /// Returns the extent along y.
    pub fn height(&self) -> Decimal {
        self.size.y()
    }

    /// Returns the extent along z.
    pub fn depth(&self) -> Decimal {
        self.size.z()
    }

    /// Volumetric occupation.
    pub fn volume(&self) -> Decimal {
        self.size.x() * self.size.y() * self.size.z()
    }

    /// Rotates the box by 90° on the requested planes.
    ///
    /// Only `size` is permuted; `position` never changes.
    pub fn rotate90(&mut self, horizontal: bool, vertical: bool) {
        self.size.rotate90(horizontal, vertical);
    }

    fn find_surface(&self, smallest: bool) -> (usize, usize) {
        let better = |a: Decimal, b: Decimal| if smallest { a < b } else { a > b };
        let mut ax1 = 0;
        let mut ax2 = 1;
        let mut v1 = self.size[ax1];
        let mut v2 = self.size[ax2];
        for axis in 1..3 {
            let dim = self.size[axis];
            if better(dim, v1) {
                ax2 = ax1;
                ax1 = axis;
                v2 = v1;
                v1 = dim;
            } else if better(dim, v2) {
                ax2 = axis;
                v2 = dim;
            }
        }
        (ax1, ax2)
    }

    /// Returns the axis pair spanning the smallest-area face.
    ///
    /// Ties break deterministically by the scan order of the axes.
    pub fn shortest_surface(&self) -> (usize, usize) {
        self.find_surface(true)
    }

    /// Returns the axis pair spanning the largest-area face.
    ///
    /// Ties break deterministically by the scan order of the axes.
    pub fn widest_surface(&self) -> (usize, usize) {
        self.find_surface(false)
    }

    /// Rotates the box so the face spanned by `axes` becomes the base
    /// (x-z) plane.
    pub fn set_bottom_surface(&mut self, axes: (usize, usize)) {
        match axes.0 + axes.1 {
            // x-y face down
            1 => self.rotate90(false, true),
            // y-z face down
            3 => self.rotate90(true, true),
            // x-z face is already the base
            _ => {}
        }
    }

    /// Checks the size invariant: no component may be negative.
    pub fn validate(&self) -> Result<()> {
        for axis in 0..3 {
            if self.size[axis] < Decimal::ZERO {
                return Err(Error::InvalidGeometry(format!(
                    "size component on axis {} is negative",
                    axis
                )));
            }
        }
        Ok(())
    }

    /// Rounds size and position to `dp` decimal places.
    pub fn round_dp(&mut self, dp: u32) {
        self.size.round_dp(dp);
        self.position.round_dp(dp);
    }
}

/// Overlap area of two volumes projected onto the plane spanned by the
/// given axes.
///
/// Centers are derived from the minimum corners, so the result is
/// symmetric in `a` and `b`. A zero area means no overlap on that
/// projection.
pub fn rect_intersect(a: &Volume, b: &Volume, axis1: usize, axis2: usize) -> Decimal {
    let mut area = Decimal::ONE;
    for axis in [axis1, axis2] {
        let center_a = a.position[axis] + a.size[axis] / Decimal::TWO;
        let center_b = b.position[axis] + b.size[axis] / Decimal::TWO;
        let distance = (center_b - center_a).abs();
        let overlap = ((a.size[axis] + b.size[axis]) / Decimal::TWO - distance).max(Decimal::ZERO);
        area *= overlap;
    }
    area
}

/// 3D intersection test: true iff the projections onto all three axis
/// pairs overlap with non-zero area.
pub fn intersect(a: &Volume, b: &Volume) -> bool {
    rect_intersect(a, b, AXIS_X, AXIS_Y) != Decimal::ZERO
        && rect_intersect(a, b, AXIS_Y, AXIS_Z) != Decimal::ZERO
        && rect_intersect(a, b, AXIS_X, AXIS_Z) != Decimal::ZERO
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn vol(x: Decimal, y: Decimal, z: Decimal) -> Volume {
        Volume::new(Vector3::new(x, y, z))
    }

    #[test]
    fn test_volume() {
        let v = vol(dec!(3), dec!(2), dec!(1));
        assert_eq!(v.volume(), dec!(6));
        assert_eq!(*v.position(), Vector3::zero());
    }

    #[test]
    fn test_rect_intersect_coincident() {
        let a = vol(dec!(3), dec!(2), dec!(1));
        let b = vol(dec!(3), dec!(2), dec!(1));
        assert_eq!(rect_intersect(&a, &b, AXIS_X, AXIS_Y), dec!(6));
        assert_eq!(rect_intersect(&a, &b, AXIS_X, AXIS_Z), dec!(3));
        assert_eq!(rect_intersect(&a, &b, AXIS_Y, AXIS_Z), dec!(2));
    }

    #[test]
    fn test_rect_intersect_touching_is_zero() {
        let a = vol(dec!(3), dec!(2), dec!(1));
        let b = vol(dec!(3), dec!(2), dec!(1))
            .with_position(Vector3::new(dec!(3), dec!(2), dec!(1)));
        assert_eq!(rect_intersect(&a, &b, AXIS_X, AXIS_Y), Decimal::ZERO);
        assert_eq!(rect_intersect(&a, &b, AXIS_X, AXIS_Z), Decimal::ZERO);
        assert_eq!(rect_intersect(&a, &b, AXIS_Y, AXIS_Z), Decimal::ZERO);
        assert!(!intersect(&a, &b));
    }

    #[test]
    fn test_rect_intersect_symmetric() {
        let a = vol(dec!(2), dec!(1), dec!(3)).with_position(Vector3::new(
            dec!(0.5),
            dec!(0),
            dec!(1),
        ));
        let b = vol(dec!(1), dec!(4), dec!(1));
        assert_eq!(
            rect_intersect(&a, &b, AXIS_X, AXIS_Y),
            rect_intersect(&b, &a, AXIS_X, AXIS_Y)
        );
        assert_eq!(
            rect_intersect(&a, &b, AXIS_Y, AXIS_Z),
            rect_intersect(&b, &a, AXIS_Y, AXIS_Z)
        );
    }

    #[test]
    fn test_intersect_partial_overlap() {
        let a = vol(dec!(2), dec!(2), dec!(2));
        let b = vol(dec!(2), dec!(2), dec!(2))
            .with_position(Vector3::new(dec!(1), dec!(1), dec!(1)));
        assert!(intersect(&a, &b));
    }

    #[test]
    fn test_surfaces() {
        let v = vol(dec!(3), dec!(2), dec!(1));
        assert_eq!(v.widest_surface(), (0, 1));
        assert_eq!(v.shortest_surface(), (2, 1));
    }

    #[test]
    fn test_set_bottom_surface_widest() {
        let mut v = vol(dec!(3), dec!(2), dec!(1));
        let axes = v.widest_surface();
        let area = v.size()[axes.0] * v.size()[axes.1];
        v.set_bottom_surface(axes);
        assert_eq!(v.width() * v.depth(), area);
    }

    #[test]
    fn test_set_bottom_surface_shortest() {
        let mut v = vol(dec!(3), dec!(2), dec!(1));
        let axes = v.shortest_surface();
        let area = v.size()[axes.0] * v.size()[axes.1];
        v.set_bottom_surface(axes);
        assert_eq!(v.width() * v.depth(), area);
    }

    #[test]
    fn test_rotation_keeps_position() {
        let mut v = vol(dec!(3), dec!(2), dec!(1))
            .with_position(Vector3::new(dec!(1), dec!(1), dec!(1)));
        v.rotate90(true, false);
        assert_eq!(*v.position(), Vector3::new(dec!(1), dec!(1), dec!(1)));
        assert_eq!(*v.size(), Vector3::new(dec!(1), dec!(2), dec!(3)));
    }

    #[test]
    fn test_validate() {
        assert!(vol(dec!(1), dec!(0), dec!(2)).validate().is_ok());
        assert!(vol(dec!(1), dec!(-1), dec!(2)).validate().is_err());
    }
}
