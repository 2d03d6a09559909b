use crate::error::Result;
use crate::math::Vector3;
use crate::topology::{SolidId, SolidStore};

use super::Placement;

/// Translates a solid by a displacement vector.
pub struct Translate {
    solid: SolidId,
    displacement: Vector3,
}

impl Translate {
    /// Creates a new `Translate` operation.
    #[must_use]
    pub fn new(solid: SolidId, displacement: Vector3) -> Self {
        Self {
            solid,
            displacement,
        }
    }

    /// Executes the translation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let solid = store.solid_mut(self.solid)?;
        *solid = Placement::translation(self.displacement).apply(solid);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;

    #[test]
    fn translate_box() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();

        Translate::new(solid, Vector3::new(3.0, -1.0, 0.5))
            .execute(&mut store)
            .unwrap();

        let cell = store.solid(solid).unwrap().cells[0];
        assert_eq!(cell.min(), Point3::new(3.0, -1.0, 0.5));
        assert_eq!(cell.max(), Point3::new(4.0, 0.0, 1.5));
    }
}
