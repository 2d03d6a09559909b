//! Clash detection between model elements.
//!
//! A run culls candidates by bounding box, flattens the survivors' geometry
//! trees into world-space solids, and classifies every pair of solids owned
//! by different elements with exact booleans.

pub mod broad_phase;
pub mod detector;
pub mod element;
pub mod evaluate;
pub mod extract;
pub mod geometry;
pub mod kernel;
pub mod method;
pub mod model;
pub mod outline;
pub mod selection;
pub mod validate;

pub use broad_phase::BroadPhase;
pub use detector::{ClashDetector, ClashReport, ClashSet};
pub use element::{Category, Element, ElementId, ElementKind};
pub use evaluate::{ClashEvaluator, ClashStats, Evaluation, PairOutcome};
pub use extract::{ElementSolid, GeometryExtractor, SolidKey};
pub use geometry::{GeometryInstance, GeometryNode};
pub use kernel::{GeometryKernel, RectilinearKernel};
pub use method::{Method, UnknownMethod};
pub use model::{is_default_candidate, ElementSource, Model};
pub use outline::BoundingOutline;
pub use selection::{RecordingSink, SelectionSink};
pub use validate::{Rejection, UnionValidator};
