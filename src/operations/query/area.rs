use crate::error::Result;
use crate::operations::grid::Grid;
use crate::topology::{SolidData, SolidId, SolidStore};

/// Computes the total surface area of a solid.
///
/// The area is exact: the solid is decomposed on its own grid and every
/// facet separating occupied from free space is summed once, so faces
/// buried where overlapping cells meet do not count.
pub struct Area {
    solid: SolidId,
}

impl Area {
    /// Creates a new `Area` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the total surface area.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &SolidStore) -> Result<f64> {
        Ok(surface_area(store.solid(self.solid)?))
    }
}

/// Surface area of a detached solid.
#[must_use]
pub fn surface_area(solid: &SolidData) -> f64 {
    let grid = Grid::build(&[solid]);
    grid.boundary(&grid.occupancy(solid)).area
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_area() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0))
            .execute(&mut store)
            .unwrap();

        let area = Area::new(solid).execute(&store).unwrap();
        // 2*(2*3 + 2*4 + 3*4) = 2*(6+8+12) = 52
        assert!((area - 52.0).abs() < 1e-9, "expected 52.0, got {area}");
    }

    #[test]
    fn empty_solid_has_zero_area() {
        assert!(surface_area(&SolidData::empty()).abs() < f64::EPSILON);
    }
}
