mod placement;
mod rotate;
mod translate;

pub use placement::{Placement, PlacementKey};
pub use rotate::Rotate;
pub use translate::Translate;
