use std::sync::Arc;

use crate::operations::transform::Placement;
use crate::topology::SolidId;

/// A node of an element's geometry tree.
#[derive(Debug, Clone)]
pub enum GeometryNode {
    /// A solid stored in the model's solid store.
    Solid(SolidId),
    /// A placed copy of a shared symbol tree.
    Instance(GeometryInstance),
    /// An ordered group of nodes.
    Container(Vec<GeometryNode>),
    /// A curve (axis line, sketch); carries no volume.
    Curve,
    /// A primitive the pipeline does not interpret.
    Unsupported,
}

/// A symbol tree placed in the model.
///
/// The symbol is shared between every placement of the same component, so
/// its solids stay in symbol coordinates until the placement is applied.
#[derive(Debug, Clone)]
pub struct GeometryInstance {
    pub placement: Placement,
    pub symbol: Arc<GeometryNode>,
}

impl GeometryNode {
    #[must_use]
    pub fn solid(id: SolidId) -> Self {
        Self::Solid(id)
    }

    #[must_use]
    pub fn instance(placement: Placement, symbol: Arc<GeometryNode>) -> Self {
        Self::Instance(GeometryInstance { placement, symbol })
    }

    #[must_use]
    pub fn container(children: Vec<GeometryNode>) -> Self {
        Self::Container(children)
    }
}
