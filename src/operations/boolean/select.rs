/// The type of boolean operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BooleanOp {
    Union,
    Subtract,
    Intersect,
}

/// Decides whether a grid cell belongs to the result, given whether it lies
/// inside solid A and inside solid B.
///
/// | in A | in B | Union | Subtract(A-B) | Intersect |
/// |------|------|-------|---------------|-----------|
/// | no   | no   | -     | -             | -         |
/// | yes  | no   | keep  | keep          | -         |
/// | no   | yes  | keep  | -             | -         |
/// | yes  | yes  | keep  | -             | keep      |
#[must_use]
pub fn keep_cell(in_a: bool, in_b: bool, op: BooleanOp) -> bool {
    match op {
        BooleanOp::Union => in_a || in_b,
        BooleanOp::Subtract => in_a && !in_b,
        BooleanOp::Intersect => in_a && in_b,
    }
}
