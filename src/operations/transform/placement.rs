use crate::math::{Point3, Vector3};
use crate::topology::{Cell, SolidData};

/// A rigid placement that keeps rectilinear solids rectilinear.
///
/// Applies a rotation by `quarter_turns × 90°` counter-clockwise about +Z
/// through the origin, then a translation. This covers the placements of
/// repeated components in a plan (families dropped at a location, rotated
/// to face a wall).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    quarter_turns: u8,
    translation: Vector3,
}

/// Hashable identity of a [`Placement`], compared bit for bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PlacementKey {
    quarter_turns: u8,
    translation: [u64; 3],
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    /// The placement that leaves geometry unchanged.
    #[must_use]
    pub fn identity() -> Self {
        Self {
            quarter_turns: 0,
            translation: Vector3::zeros(),
        }
    }

    /// Creates a placement from a signed number of quarter turns and a translation.
    #[must_use]
    pub fn new(quarter_turns: i32, translation: Vector3) -> Self {
        Self {
            quarter_turns: normalize_turns(quarter_turns),
            translation,
        }
    }

    /// A pure translation.
    #[must_use]
    pub fn translation(translation: Vector3) -> Self {
        Self::new(0, translation)
    }

    /// Quarter turns about +Z, in `0..4`.
    #[must_use]
    pub fn quarter_turns(&self) -> u8 {
        self.quarter_turns
    }

    /// Translation applied after the rotation.
    #[must_use]
    pub fn offset(&self) -> Vector3 {
        self.translation
    }

    /// Returns `true` for the identity placement.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.quarter_turns == 0 && self.translation == Vector3::zeros()
    }

    /// Composes two placements: the result applies `inner` first, then `self`.
    #[must_use]
    pub fn then_inner(&self, inner: &Self) -> Self {
        Self {
            quarter_turns: (self.quarter_turns + inner.quarter_turns) % 4,
            translation: self.rotate_vector(&inner.translation) + self.translation,
        }
    }

    /// Applies the placement to a point.
    #[must_use]
    pub fn apply_point(&self, point: &Point3) -> Point3 {
        Point3::from(self.rotate_vector(&point.coords) + self.translation)
    }

    /// Applies the placement to every cell of a solid.
    #[must_use]
    pub fn apply(&self, solid: &SolidData) -> SolidData {
        if self.is_identity() {
            return solid.clone();
        }
        let cells = solid
            .cells
            .iter()
            .map(|cell| {
                let a = self.apply_point(&cell.min());
                let b = self.apply_point(&cell.max());
                Cell::from_bounds(a.inf(&b), a.sup(&b))
            })
            .collect();
        SolidData::new(cells)
    }

    /// Bitwise identity of the placement, usable as a hash key.
    #[must_use]
    pub fn key(&self) -> PlacementKey {
        PlacementKey {
            quarter_turns: self.quarter_turns,
            translation: [
                self.translation.x.to_bits(),
                self.translation.y.to_bits(),
                self.translation.z.to_bits(),
            ],
        }
    }

    fn rotate_vector(&self, v: &Vector3) -> Vector3 {
        match self.quarter_turns {
            1 => Vector3::new(-v.y, v.x, v.z),
            2 => Vector3::new(-v.x, -v.y, v.z),
            3 => Vector3::new(v.y, -v.x, v.z),
            _ => *v,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn normalize_turns(turns: i32) -> u8 {
    turns.rem_euclid(4) as u8
}
