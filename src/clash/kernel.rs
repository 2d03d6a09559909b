use crate::error::Result;
use crate::operations::boolean::{boolean_execute, BooleanOp};
use crate::operations::query;
use crate::topology::SolidData;

/// The geometry operations the clash evaluator depends on.
///
/// Implementations must be shareable across the rayon pool. A kernel that
/// wraps a non-reentrant engine serializes calls internally.
pub trait GeometryKernel: Sync {
    /// Boolean union of two solids.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot compute the union.
    fn union(&self, a: &SolidData, b: &SolidData) -> Result<SolidData>;

    /// Boolean intersection of two solids. Solids that share no volume
    /// intersect in the empty solid.
    ///
    /// # Errors
    ///
    /// Returns an error if the engine cannot compute the intersection.
    fn intersect(&self, a: &SolidData, b: &SolidData) -> Result<SolidData>;

    fn surface_area(&self, solid: &SolidData) -> f64;

    fn face_count(&self, solid: &SolidData) -> u32;

    fn volume(&self, solid: &SolidData) -> f64;
}

/// Exact kernel for rectilinear solids, built on the grid boolean engine.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectilinearKernel;

impl GeometryKernel for RectilinearKernel {
    fn union(&self, a: &SolidData, b: &SolidData) -> Result<SolidData> {
        boolean_execute(a, b, BooleanOp::Union)
    }

    fn intersect(&self, a: &SolidData, b: &SolidData) -> Result<SolidData> {
        boolean_execute(a, b, BooleanOp::Intersect)
    }

    fn surface_area(&self, solid: &SolidData) -> f64 {
        query::surface_area(solid)
    }

    fn face_count(&self, solid: &SolidData) -> u32 {
        query::face_count(solid)
    }

    fn volume(&self, solid: &SolidData) -> f64 {
        query::volume(solid)
    }
}

impl<K: GeometryKernel + ?Sized> GeometryKernel for &K {
    fn union(&self, a: &SolidData, b: &SolidData) -> Result<SolidData> {
        (**self).union(a, b)
    }

    fn intersect(&self, a: &SolidData, b: &SolidData) -> Result<SolidData> {
        (**self).intersect(a, b)
    }

    fn surface_area(&self, solid: &SolidData) -> f64 {
        (**self).surface_area(solid)
    }

    fn face_count(&self, solid: &SolidData) -> u32 {
        (**self).face_count(solid)
    }

    fn volume(&self, solid: &SolidData) -> f64 {
        (**self).volume(solid)
    }
}
