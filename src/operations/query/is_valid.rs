use crate::math::TOLERANCE;
use crate::topology::{SolidId, SolidStore};

/// Validates the geometric consistency of a solid.
///
/// A valid solid is present in the store, has at least one cell, and every
/// cell has finite, ordered, non-flat bounds.
pub struct IsValid {
    solid: SolidId,
}

impl IsValid {
    /// Creates a new `IsValid` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the validation, returning `true` if the solid is valid.
    #[must_use]
    pub fn execute(&self, store: &SolidStore) -> bool {
        let Ok(solid) = store.solid(self.solid) else {
            return false;
        };
        !solid.is_empty()
            && solid.cells.iter().all(|cell| {
                let (min, max) = (cell.min(), cell.max());
                (0..3).all(|axis| {
                    min[axis].is_finite() && max[axis].is_finite() && max[axis] - min[axis] > TOLERANCE
                })
            })
    }
}
