use crate::error::Result;
use crate::math::Point3;
use crate::topology::{Cell, SolidData, SolidId, SolidStore};

/// Creates a box solid from two corner points.
pub struct MakeBox {
    min_corner: Point3,
    max_corner: Point3,
}

impl MakeBox {
    /// Creates a new `MakeBox` operation.
    #[must_use]
    pub fn new(min_corner: Point3, max_corner: Point3) -> Self {
        Self {
            min_corner,
            max_corner,
        }
    }

    /// Creates a box of the given edge lengths centered on `center`.
    #[must_use]
    pub fn centered(center: Point3, size: [f64; 3]) -> Self {
        let half = nalgebra::Vector3::from(size) / 2.0;
        Self::new(center - half, center + half)
    }

    /// Builds the box without storing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the corners are not finite or the box is flat.
    pub fn build(&self) -> Result<SolidData> {
        let cell = Cell::new(self.min_corner, self.max_corner)?;
        Ok(SolidData::new(vec![cell]))
    }

    /// Executes the operation, creating the box in the solid store.
    ///
    /// # Errors
    ///
    /// Returns an error if the corners are not finite or the box is flat.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        Ok(store.add_solid(self.build()?))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::{GeoclashError, GeometryError};

    #[test]
    fn centered_box_corners() {
        let solid = MakeBox::centered(Point3::new(1.0, 0.0, 0.0), [2.0, 1.0, 4.0])
            .build()
            .unwrap();
        assert_eq!(solid.cells[0].min(), Point3::new(0.0, -0.5, -2.0));
        assert_eq!(solid.cells[0].max(), Point3::new(2.0, 0.5, 2.0));
    }

    #[test]
    fn flat_box_fails() {
        let mut store = SolidStore::new();
        let result = MakeBox::new(Point3::origin(), Point3::new(1.0, 0.0, 1.0)).execute(&mut store);
        assert!(matches!(
            result,
            Err(GeoclashError::Geometry(GeometryError::Degenerate(_)))
        ));
        assert!(store.is_empty());
    }
}
