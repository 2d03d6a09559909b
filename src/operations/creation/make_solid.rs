use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{Cell, SolidData, SolidId, SolidStore};

/// Creates a composite rectilinear solid from box parts.
///
/// Parts may overlap or touch; the solid is their union.
pub struct MakeSolid {
    parts: Vec<(Point3, Point3)>,
}

impl MakeSolid {
    /// Creates a new `MakeSolid` operation from `(min, max)` corner pairs.
    #[must_use]
    pub fn new(parts: Vec<(Point3, Point3)>) -> Self {
        Self { parts }
    }

    /// Builds the solid without storing it.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no parts or any part is degenerate.
    pub fn build(&self) -> Result<SolidData> {
        if self.parts.is_empty() {
            return Err(OperationError::InvalidInput("solid needs at least one part".into()).into());
        }
        let cells = self
            .parts
            .iter()
            .map(|&(a, b)| Cell::new(a, b))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(SolidData::new(cells))
    }

    /// Executes the operation, creating the solid in the solid store.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no parts or any part is degenerate.
    pub fn execute(&self, store: &mut SolidStore) -> Result<SolidId> {
        Ok(store.add_solid(self.build()?))
    }
}
