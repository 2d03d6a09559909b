use crate::error::{OperationError, Result};
use crate::math::Point3;
use crate::topology::{SolidData, SolidId, SolidStore};

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner of the bounding box.
    pub min: Point3,
    /// Maximum corner of the bounding box.
    pub max: Point3,
}

impl Aabb {
    /// Creates a box from two opposite corners, in any order.
    #[must_use]
    pub fn new(a: Point3, b: Point3) -> Self {
        Self {
            min: a.inf(&b),
            max: a.sup(&b),
        }
    }

    /// Smallest box enclosing both `self` and `other`.
    #[must_use]
    pub fn merged(&self, other: &Self) -> Self {
        Self {
            min: self.min.inf(&other.min),
            max: self.max.sup(&other.max),
        }
    }
}

/// Computes the axis-aligned bounding box of a solid.
pub struct BoundingBox {
    solid: SolidId,
}

impl BoundingBox {
    /// Creates a new `BoundingBox` query.
    #[must_use]
    pub fn new(solid: SolidId) -> Self {
        Self { solid }
    }

    /// Executes the query, returning the AABB.
    ///
    /// # Errors
    ///
    /// Returns an error if the solid is missing or empty.
    pub fn execute(&self, store: &SolidStore) -> Result<Aabb> {
        solid_aabb(store.solid(self.solid)?).ok_or_else(|| {
            OperationError::InvalidInput("empty solid has no bounding box".into()).into()
        })
    }
}

/// Bounding box of a detached solid, `None` for the empty solid.
#[must_use]
pub fn solid_aabb(solid: &SolidData) -> Option<Aabb> {
    solid
        .cells
        .iter()
        .map(|cell| Aabb::new(cell.min(), cell.max()))
        .reduce(|acc, aabb| acc.merged(&aabb))
}
