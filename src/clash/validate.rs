use crate::math::round_to;
use crate::topology::SolidData;

use super::kernel::GeometryKernel;

/// Why a union was rejected as evidence of contact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rejection {
    /// The union kept all of the operands' surface area.
    Area { union: f64, sum: f64 },
    /// The union kept all of the operands' faces.
    Faces { union: u32, sum: u32 },
}

/// Decides whether a union shows the two operands really merged.
///
/// Solids that overlap or share a face lose boundary where they merge, so
/// their union has less surface area and fewer faces than the operands
/// together. A union of solids that are apart, or that meet only along an
/// edge or at a corner, keeps everything and is rejected.
#[derive(Debug, Clone, Copy)]
pub struct UnionValidator {
    area_precision: u32,
}

impl UnionValidator {
    /// Creates a validator comparing areas rounded to `area_precision` decimals.
    #[must_use]
    pub fn new(area_precision: u32) -> Self {
        Self { area_precision }
    }

    /// Runs the area check, then the face-count check.
    ///
    /// # Errors
    ///
    /// Returns the first failed check.
    pub fn check<K: GeometryKernel + ?Sized>(
        &self,
        kernel: &K,
        a: &SolidData,
        b: &SolidData,
        union: &SolidData,
    ) -> Result<(), Rejection> {
        let union_area = round_to(kernel.surface_area(union), self.area_precision);
        let sum_area = round_to(
            kernel.surface_area(a) + kernel.surface_area(b),
            self.area_precision,
        );
        if union_area >= sum_area {
            return Err(Rejection::Area {
                union: union_area,
                sum: sum_area,
            });
        }

        let union_faces = kernel.face_count(union);
        let sum_faces = kernel.face_count(a).saturating_add(kernel.face_count(b));
        if union_faces >= sum_faces {
            return Err(Rejection::Faces {
                union: union_faces,
                sum: sum_faces,
            });
        }

        Ok(())
    }
}
