mod engine;
mod intersect_op;
mod select;
mod union;

pub use engine::boolean_execute;
pub use intersect_op::Intersect;
pub use select::BooleanOp;
pub use union::Union;
