use crate::math::Point3;
use crate::operations::query::Aabb;

/// Axis-aligned outline used for the cheap overlap tests of the broad phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingOutline {
    min: Point3,
    max: Point3,
}

impl BoundingOutline {
    /// Creates an outline from two opposite corners, in any order.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    #[must_use]
    pub fn min(&self) -> Point3 {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// Tests whether two outlines intersect.
    ///
    /// With a non-negative `tolerance`, outlines that touch, or are apart by
    /// at most `tolerance`, intersect. With a negative `tolerance` they must
    /// overlap by more than its magnitude on every axis, so outlines that
    /// merely share a face do not intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            let overlap = self.max[axis].min(other.max[axis]) - self.min[axis].max(other.min[axis]);
            if tolerance < 0.0 {
                overlap > -tolerance
            } else {
                overlap + tolerance >= 0.0
            }
        })
    }

    /// Tests whether `other` lies inside this outline grown by `tolerance`
    /// on every side.
    #[must_use]
    pub fn contains(&self, other: &Self, tolerance: f64) -> bool {
        (0..3).all(|axis| {
            other.min[axis] >= self.min[axis] - tolerance
                && other.max[axis] <= self.max[axis] + tolerance
        })
    }
}

impl From<&Aabb> for BoundingOutline {
    fn from(aabb: &Aabb) -> Self {
        Self::new(aabb.min, aabb.max)
    }
}
