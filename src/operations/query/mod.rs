mod area;
mod bounding_box;
mod face_count;
mod is_valid;
mod volume;

pub use area::{surface_area, Area};
pub use bounding_box::{solid_aabb, Aabb, BoundingBox};
pub use face_count::{face_count, FaceCount};
pub use is_valid::IsValid;
pub use volume::{volume, Volume};
