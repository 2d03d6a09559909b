use crate::error::Result;
use crate::math::{Point3, Vector3};
use crate::topology::{SolidId, SolidStore};

use super::Placement;

/// Rotates a solid by whole quarter turns about a vertical axis.
pub struct Rotate {
    solid: SolidId,
    axis_origin: Point3,
    quarter_turns: i32,
}

impl Rotate {
    /// Creates a new `Rotate` operation.
    ///
    /// * `axis_origin` - A point on the vertical rotation axis.
    /// * `quarter_turns` - Counter-clockwise quarter turns seen from +Z;
    ///   negative values turn clockwise.
    #[must_use]
    pub fn new(solid: SolidId, axis_origin: Point3, quarter_turns: i32) -> Self {
        Self {
            solid,
            axis_origin,
            quarter_turns,
        }
    }

    /// The equivalent placement: move the axis to the origin, turn, move back.
    #[must_use]
    pub fn placement(&self) -> Placement {
        let to_origin = Placement::translation(-self.axis_origin.coords);
        let turn = Placement::new(self.quarter_turns, Vector3::zeros());
        let back = Placement::translation(self.axis_origin.coords);
        back.then_inner(&turn).then_inner(&to_origin)
    }

    /// Executes the rotation, modifying the solid in-place.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is not in the store.
    pub fn execute(&self, store: &mut SolidStore) -> Result<()> {
        let placement = self.placement();
        let solid = store.solid_mut(self.solid)?;
        *solid = placement.apply(solid);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::operations::creation::MakeBox;
    use crate::operations::query::Volume;

    fn p(x: f64, y: f64, z: f64) -> Point3 {
        Point3::new(x, y, z)
    }

    #[test]
    fn rotate_about_offset_axis() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(1.0, 0.0, 0.0), p(3.0, 1.0, 1.0))
            .execute(&mut store)
            .unwrap();

        Rotate::new(solid, p(1.0, 0.0, 0.0), 1)
            .execute(&mut store)
            .unwrap();

        let cell = store.solid(solid).unwrap().cells[0];
        assert_eq!(cell.min(), p(0.0, 0.0, 0.0));
        assert_eq!(cell.max(), p(1.0, 2.0, 1.0));
    }

    #[test]
    fn full_turn_preserves_volume() {
        let mut store = SolidStore::new();
        let solid = MakeBox::new(p(0.0, 0.0, 0.0), p(2.0, 3.0, 4.0))
            .execute(&mut store)
            .unwrap();

        Rotate::new(solid, p(5.0, 5.0, 0.0), 4)
            .execute(&mut store)
            .unwrap();

        let volume = Volume::new(solid).execute(&store).unwrap();
        assert!((volume - 24.0).abs() < 1e-9, "expected 24.0, got {volume}");
        let cell = store.solid(solid).unwrap().cells[0];
        assert_eq!(cell.min(), p(0.0, 0.0, 0.0));
    }
}
