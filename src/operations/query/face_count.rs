use crate::error::Result;
use crate::operations::grid::Grid;
use crate::topology::{SolidData, SolidId, SolidStore};

/// Counts the faces of a solid.
///
/// A face is a maximal connected planar region of the boundary with one
/// outward normal. Coplanar parts that meet along an edge merge into one
/// face; parts that meet only at a corner stay separate.
pub struct FaceCount {
    solid: SolidId,
}

impl FaceCount {
    /// Creates a new `FaceCount` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the number of faces.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &SolidStore) -> Result<u32> {
        Ok(face_count(store.solid(self.solid)?))
    }
}

/// Face count of a detached solid.
#[must_use]
pub fn face_count(solid: &SolidData) -> u32 {
    let grid = Grid::build(&[solid]);
    grid.boundary(&grid.occupancy(solid)).faces
}
