use crate::error::GeometryError;
use crate::math::{Point3, TOLERANCE};

/// An axis-aligned box, the building block of a rectilinear solid.
///
/// A cell always has a strictly positive extent on every axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    min: Point3,
    max: Point3,
}

impl Cell {
    /// Creates a cell from two opposite corners, in any order.
    ///
    /// # Errors
    ///
    /// Returns an error if a coordinate is not finite or the box is flat
    /// along any axis.
    pub fn new(a: Point3, b: Point3) -> Result<Self, GeometryError> {
        if !(a.coords.iter().chain(b.coords.iter()).all(|c| c.is_finite())) {
            return Err(GeometryError::NonFinite("cell corner"));
        }
        let min = a.inf(&b);
        let max = a.sup(&b);
        let extent = max - min;
        if extent.iter().any(|&e| e <= TOLERANCE) {
            return Err(GeometryError::Degenerate(format!(
                "cell extent {:?} is flat",
                [extent.x, extent.y, extent.z]
            )));
        }
        Ok(Self { min, max })
    }

    /// Builds a cell from bounds already known to be ordered and non-flat,
    /// such as two adjacent grid lines.
    pub(crate) fn from_bounds(min: Point3, max: Point3) -> Self {
        debug_assert!((0..3).all(|axis| min[axis] < max[axis]));
        Self { min, max }
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> Point3 {
        self.min
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> Point3 {
        self.max
    }

    /// Volume of the box.
    #[must_use]
    pub fn volume(&self) -> f64 {
        let extent = self.max - self.min;
        extent.x * extent.y * extent.z
    }
}
