use crate::error::Result;
use crate::operations::grid::Grid;
use crate::topology::{SolidData, SolidId, SolidStore};

/// Computes the volume of a solid.
///
/// Overlapping cells are resolved on the solid's grid, so shared regions
/// count once.
pub struct Volume {
    solid: SolidId,
}

impl Volume {
    /// Creates a new `Volume` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the volume.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &SolidStore) -> Result<f64> {
        Ok(volume(store.solid(self.solid)?))
    }
}

/// Volume of a detached solid.
#[must_use]
pub fn volume(solid: &SolidData) -> f64 {
    let grid = Grid::build(&[solid]);
    grid.volume(&grid.occupancy(solid))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::{MakeBox, MakeSolid};

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn box_volume() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0))
            .execute(&mut store)
            .unwrap();

        let volume = Volume::new(solid).execute(&store).unwrap();
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
    }

    #[test]
    fn offset_box_volume() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(1.0, 2.0, 3.0), p(3.0, 5.0, 7.0))
            .execute(&mut store)
            .unwrap();

        let volume = Volume::new(solid).execute(&store).unwrap();
        // 2 * 3 * 4 = 24
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
    }

    #[test]
    fn overlapping_parts_count_once() {
        let mut store = SolidStore::new();
        let solid = MakeSolid::new(vec![
            (p(0.0, 0.0, 0.0), p(2.0, 2.0, 2.0)),
            (p(1.0, 1.0, 1.0), p(3.0, 3.0, 3.0)),
        ])
        .execute(&mut store)
        .unwrap();

        let volume = Volume::new(solid).execute(&store).unwrap();
        assert!((volume - 15.0).abs() < 1e-9, "expected 15.0, got {volume}");
    }
}
