use std::collections::HashMap;

use crate::operations::query::{solid_aabb, Aabb};
use crate::topology::SolidStore;

use super::element::{Category, Element, ElementId, ElementKind};
use super::extract::GeometryExtractor;

/// Read access to a building model.
pub trait ElementSource {
    /// Every element, in a stable order.
    fn elements(&self) -> &[Element];

    /// Looks up an element by id.
    fn element(&self, id: ElementId) -> Option<&Element>;

    /// The store resolving the elements' solid references.
    fn solids(&self) -> &SolidStore;

    /// Elements checked when the caller names none.
    fn default_candidates(&self, include_furniture: bool) -> Vec<&Element> {
        self.elements()
            .iter()
            .filter(|element| is_default_candidate(element, include_furniture))
            .collect()
    }
}

/// The default candidate policy.
///
/// Placed elements of the building categories are candidates, as are family
/// instances of any category other than furniture. Furniture is admitted only
/// when `include_furniture` is set.
#[must_use]
pub fn is_default_candidate(element: &Element, include_furniture: bool) -> bool {
    if element.kind() == ElementKind::Type {
        return false;
    }
    let category = element.category();
    if category.is_some_and(|c| Category::BUILDING.contains(&c)) {
        return true;
    }
    element.is_family_instance()
        && (include_furniture || !category.is_some_and(Category::is_furniture))
}

/// In-memory model: a solid store plus elements in insertion order.
#[derive(Debug, Default)]
pub struct Model {
    solids: SolidStore,
    elements: Vec<Element>,
    index: HashMap<ElementId, usize>,
}

impl Model {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable access to the solid store, for building geometry.
    pub fn solids_mut(&mut self) -> &mut SolidStore {
        &mut self.solids
    }

    /// Adds an element, replacing any element with the same id.
    ///
    /// Returns the replaced element.
    pub fn add(&mut self, element: Element) -> Option<Element> {
        match self.index.get(&element.id()) {
            Some(&slot) => Some(std::mem::replace(&mut self.elements[slot], element)),
            None => {
                self.index.insert(element.id(), self.elements.len());
                self.elements.push(element);
                None
            }
        }
    }

    /// Adds an element whose bounding box is fitted to its resolved solids.
    ///
    /// An element with no resolvable solids ends up without a bounding box.
    pub fn add_fitted(&mut self, mut element: Element, max_depth: usize) -> Option<Element> {
        let fitted = GeometryExtractor::new(&self.solids, max_depth)
            .extract(&element)
            .iter()
            .filter_map(|entry| solid_aabb(&entry.solid))
            .reduce(|acc, aabb: Aabb| acc.merged(&aabb));
        element.set_bounding_box(fitted);
        self.add(element)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl ElementSource for Model {
    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn element(&self, id: ElementId) -> Option<&Element> {
        self.index.get(&id).map(|&slot| &self.elements[slot])
    }

    fn solids(&self) -> &SolidStore {
        &self.solids
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::clash::geometry::GeometryNode;
    use crate::math::Point3;
    use crate::operations::creation::MakeBox;

    fn ids(elements: &[&Element]) -> Vec<u64> {
        elements.iter().map(|e| e.id().0).collect()
    }

    fn policy_model() -> Model {
        let mut model = Model::new();
        model.add(Element::new(ElementId(1)).with_category(Category::Walls));
        model.add(Element::new(ElementId(2)).with_category(Category::Walls).as_type());
        model.add(Element::new(ElementId(3)).with_category(Category::Ducts));
        model.add(
            Element::new(ElementId(4))
                .with_category(Category::Ducts)
                .as_family_instance(),
        );
        model.add(
            Element::new(ElementId(5))
                .with_category(Category::Furniture)
                .as_family_instance(),
        );
        model.add(
            Element::new(ElementId(6))
                .with_category(Category::FurnitureSystems)
                .as_family_instance(),
        );
        model.add(Element::new(ElementId(7)).as_family_instance());
        model
    }

    #[test]
    fn default_policy() {
        let model = policy_model();
        assert_eq!(ids(&model.default_candidates(false)), vec![1, 4, 7]);
    }

    #[test]
    fn furniture_flag_widens_policy() {
        let model = policy_model();
        assert_eq!(ids(&model.default_candidates(true)), vec![1, 4, 5, 6, 7]);
    }

    #[test]
    fn lookup_and_replace() {
        let mut model = Model::new();
        assert!(model.add(Element::new(ElementId(1)).named("first")).is_none());
        let old = model.add(Element::new(ElementId(1)).named("second")).unwrap();
        assert_eq!(old.name(), Some("first"));
        assert_eq!(model.len(), 1);
        assert_eq!(model.element(ElementId(1)).unwrap().name(), Some("second"));
        assert!(model.element(ElementId(2)).is_none());
    }

    #[test]
    fn fitted_bounds_cover_all_solids() {
        let mut model = Model::new();
        let a = MakeBox::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0))
            .execute(model.solids_mut())
            .unwrap();
        let b = MakeBox::new(Point3::new(3.0, -1.0, 0.0), Point3::new(4.0, 0.0, 2.0))
            .execute(model.solids_mut())
            .unwrap();
        model.add_fitted(
            Element::new(ElementId(1)).with_geometry(GeometryNode::container(vec![
                GeometryNode::solid(a),
                GeometryNode::solid(b),
            ])),
            64,
        );
        model.add_fitted(Element::new(ElementId(2)).with_geometry(GeometryNode::Curve), 64);

        let bounds = model.element(ElementId(1)).unwrap().bounding_box().unwrap();
        assert_eq!(bounds.min, Point3::new(0.0, -1.0, 0.0));
        assert_eq!(bounds.max, Point3::new(4.0, 1.0, 2.0));
        assert!(model.element(ElementId(2)).unwrap().bounding_box().is_none());
    }
}
