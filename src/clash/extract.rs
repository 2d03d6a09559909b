use std::collections::HashSet;

use tracing::{debug, warn};

use crate::operations::transform::{Placement, PlacementKey};
use crate::topology::{SolidData, SolidId, SolidStore};

use super::element::{Element, ElementId};
use super::geometry::GeometryNode;

/// Identity of a resolved solid: the stored source solid and the
/// accumulated placement it was resolved under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SolidKey {
    pub source: SolidId,
    pub placement: PlacementKey,
}

/// A world-space solid paired with the element that owns it.
#[derive(Debug, Clone)]
pub struct ElementSolid {
    pub element: ElementId,
    pub key: SolidKey,
    pub solid: SolidData,
}

/// Flattens geometry trees into world-space solids.
pub struct GeometryExtractor<'a> {
    store: &'a SolidStore,
    max_depth: usize,
}

impl<'a> GeometryExtractor<'a> {
    /// Creates an extractor resolving solids from `store`, following at most
    /// `max_depth` levels of nested instances.
    #[must_use]
    pub fn new(store: &'a SolidStore, max_depth: usize) -> Self {
        Self { store, max_depth }
    }

    /// Collects every solid reachable from the element's geometry root.
    ///
    /// Curves, unsupported primitives, dangling solid references and empty
    /// solids are skipped. A solid reached twice under the same accumulated
    /// placement is returned once.
    #[must_use]
    pub fn extract(&self, element: &Element) -> Vec<ElementSolid> {
        let Some(root) = element.geometry() else {
            return Vec::new();
        };

        let mut seen: HashSet<SolidKey> = HashSet::new();
        let mut solids = Vec::new();
        let mut stack: Vec<(&GeometryNode, Placement, usize)> =
            vec![(root, Placement::identity(), 0)];

        while let Some((node, placement, depth)) = stack.pop() {
            match node {
                GeometryNode::Solid(id) => {
                    let key = SolidKey {
                        source: *id,
                        placement: placement.key(),
                    };
                    if seen.contains(&key) {
                        continue;
                    }
                    let Ok(data) = self.store.solid(*id) else {
                        debug!(element = %element.id(), "skipping dangling solid reference");
                        continue;
                    };
                    if data.is_empty() {
                        debug!(element = %element.id(), "skipping empty solid");
                        continue;
                    }
                    seen.insert(key);
                    solids.push(ElementSolid {
                        element: element.id(),
                        key,
                        solid: placement.apply(data),
                    });
                }
                GeometryNode::Instance(instance) => {
                    if depth >= self.max_depth {
                        warn!(
                            element = %element.id(),
                            max_depth = self.max_depth,
                            "instance nesting too deep, skipping subtree"
                        );
                        continue;
                    }
                    stack.push((
                        instance.symbol.as_ref(),
                        placement.then_inner(&instance.placement),
                        depth + 1,
                    ));
                }
                GeometryNode::Container(children) => {
                    // Reversed so children pop in document order
                    stack.extend(children.iter().rev().map(|child| (child, placement, depth)));
                }
                GeometryNode::Curve | GeometryNode::Unsupported => {}
            }
        }

        solids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::math::{Point3, Vector3};
    use crate::operations::creation::MakeBox;
    use crate::operations::query::{solid_aabb, volume};

    fn unit_box(store: &mut SolidStore) -> SolidId {
        MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute(store)
            .unwrap()
    }

    #[test]
    fn element_without_geometry_yields_nothing() {
        let store = SolidStore::new();
        let element = Element::new(ElementId(1));
        assert!(GeometryExtractor::new(&store, 8).extract(&element).is_empty());
    }

    #[test]
    fn duplicate_references_are_extracted_once() {
        let mut store = SolidStore::new();
        let solid = unit_box(&mut store);
        let element = Element::new(ElementId(1)).with_geometry(GeometryNode::container(vec![
            GeometryNode::solid(solid),
            GeometryNode::Curve,
            GeometryNode::solid(solid),
            GeometryNode::Unsupported,
        ]));

        let solids = GeometryExtractor::new(&store, 8).extract(&element);
        assert_eq!(solids.len(), 1);
        assert_eq!(solids[0].element, ElementId(1));
    }

    #[test]
    fn nested_instances_compose_placements() {
        let mut store = SolidStore::new();
        let solid = unit_box(&mut store);

        let symbol = Arc::new(GeometryNode::solid(solid));
        let inner = Arc::new(GeometryNode::instance(
            Placement::translation(Vector3::new(2.0, 0.0, 0.0)),
            symbol,
        ));
        let root = GeometryNode::instance(Placement::new(1, Vector3::new(0.0, 0.0, 5.0)), inner);
        let element = Element::new(ElementId(3)).with_geometry(root);

        let solids = GeometryExtractor::new(&store, 8).extract(&element);
        assert_eq!(solids.len(), 1);
        let aabb = solid_aabb(&solids[0].solid).unwrap();
        assert_eq!(aabb.min, Point3::new(-1.0, 2.0, 5.0));
        assert_eq!(aabb.max, Point3::new(0.0, 3.0, 6.0));
        assert!((volume(&solids[0].solid) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn same_symbol_at_two_placements_yields_two_solids() {
        let mut store = SolidStore::new();
        let solid = unit_box(&mut store);
        let symbol = Arc::new(GeometryNode::solid(solid));
        let element = Element::new(ElementId(4)).with_geometry(GeometryNode::container(vec![
            GeometryNode::instance(Placement::identity(), Arc::clone(&symbol)),
            GeometryNode::instance(Placement::translation(Vector3::x() * 3.0), symbol),
        ]));

        let solids = GeometryExtractor::new(&store, 8).extract(&element);
        assert_eq!(solids.len(), 2);
        assert_ne!(solids[0].key, solids[1].key);
    }

    #[test]
    fn dangling_and_empty_solids_are_skipped() {
        let mut store = SolidStore::new();
        let dangling = unit_box(&mut store);
        store.remove_solid(dangling);
        let empty = store.add_solid(SolidData::empty());

        let element = Element::new(ElementId(5)).with_geometry(GeometryNode::container(vec![
            GeometryNode::solid(dangling),
            GeometryNode::solid(empty),
        ]));
        assert!(GeometryExtractor::new(&store, 8).extract(&element).is_empty());
    }

    #[test]
    fn depth_limit_cuts_deep_nesting() {
        let mut store = SolidStore::new();
        let solid = unit_box(&mut store);

        let mut node = GeometryNode::solid(solid);
        for _ in 0..4 {
            node = GeometryNode::instance(Placement::identity(), Arc::new(node));
        }
        let element = Element::new(ElementId(6)).with_geometry(node);

        assert!(GeometryExtractor::new(&store, 3).extract(&element).is_empty());
        assert_eq!(GeometryExtractor::new(&store, 4).extract(&element).len(), 1);
    }
}
