use crate::error::Result;
use crate::topology::{SolidId, SolidStore};

use super::engine::boolean_execute;
use super::select::BooleanOp;

/// Computes the boolean intersection of two solids.
pub struct Intersect {
    solid_a: SolidId,
    solid_b: SolidId,
}

impl Intersect {
    /// Creates a new `Intersect` operation.
    #[must_use]
    pub fn new(solid_a: SolidId, solid_b: SolidId) -> Self {
        Self { solid_a, solid_b }
    }

    /// Executes the intersection, creating the result solid in the solid store.
    ///
    /// Solids that do not share volume produce the empty solid.
    ///
    /// # Errors
    ///
    /// Returns an error if either solid is missing or the operation fails.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        let result = boolean_execute(
            store.solid(self.solid_a)?,
            store.solid(self.solid_b)?,
            BooleanOp::Intersect,
        )?;
        Ok(store.add_solid(result))
    }
}
