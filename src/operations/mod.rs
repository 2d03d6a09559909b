pub mod boolean;
pub mod creation;
pub(crate) mod grid;
pub mod query;
pub mod transform;
