use std::fmt;

use serde::{Deserialize, Serialize};

use crate::operations::query::Aabb;

use super::geometry::GeometryNode;

/// Stable identity of a model element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub u64);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Whether an element is placed in the model or only defines a type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ElementKind {
    #[default]
    Instance,
    Type,
}

/// Model categories the clash pipeline distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Walls,
    WallFoundations,
    Floors,
    Ceilings,
    Railings,
    Roofs,
    RoofSoffits,
    Stairs,
    Columns,
    StructuralFraming,
    Doors,
    Windows,
    Ducts,
    Pipes,
    MechanicalEquipment,
    GenericModels,
    Furniture,
    FurnitureSystems,
}

impl Category {
    /// Structural and architectural categories checked by default.
    pub const BUILDING: [Self; 8] = [
        Self::Walls,
        Self::WallFoundations,
        Self::Floors,
        Self::Ceilings,
        Self::Railings,
        Self::Roofs,
        Self::RoofSoffits,
        Self::Stairs,
    ];

    /// Returns `true` for the furniture categories, which are only checked on request.
    #[must_use]
    pub fn is_furniture(self) -> bool {
        matches!(self, Self::Furniture | Self::FurnitureSystems)
    }
}

/// A model element as seen by the clash pipeline.
///
/// Elements are read-only inputs: the pipeline classifies them but never
/// changes them.
#[derive(Debug, Clone)]
pub struct Element {
    id: ElementId,
    name: Option<String>,
    category: Option<Category>,
    kind: ElementKind,
    family_instance: bool,
    bounding_box: Option<Aabb>,
    geometry: Option<GeometryNode>,
}

impl Element {
    /// Creates a placed element with no category, bounds or geometry.
    #[must_use]
    pub fn new(id: ElementId) -> Self {
        Self {
            id,
            name: None,
            category: None,
            kind: ElementKind::Instance,
            family_instance: false,
            bounding_box: None,
            geometry: None,
        }
    }

    #[must_use]
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Marks the element as a type definition.
    #[must_use]
    pub fn as_type(mut self) -> Self {
        self.kind = ElementKind::Type;
        self
    }

    /// Marks the element as a placed instance of a loadable family.
    #[must_use]
    pub fn as_family_instance(mut self) -> Self {
        self.family_instance = true;
        self
    }

    #[must_use]
    pub fn with_bounding_box(mut self, bounding_box: Aabb) -> Self {
        self.bounding_box = Some(bounding_box);
        self
    }

    #[must_use]
    pub fn with_geometry(mut self, geometry: GeometryNode) -> Self {
        self.geometry = Some(geometry);
        self
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn category(&self) -> Option<Category> {
        self.category
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_family_instance(&self) -> bool {
        self.family_instance
    }

    /// The element's bounding box, if the model provides one.
    pub fn bounding_box(&self) -> Option<&Aabb> {
        self.bounding_box.as_ref()
    }

    /// The root of the element's geometry tree.
    pub fn geometry(&self) -> Option<&GeometryNode> {
        self.geometry.as_ref()
    }

    pub(crate) fn set_bounding_box(&mut self, bounding_box: Option<Aabb>) {
        self.bounding_box = bounding_box;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_fields() {
        let element = Element::new(ElementId(7))
            .named("Basic Wall")
            .with_category(Category::Walls);

        assert_eq!(element.id(), ElementId(7));
        assert_eq!(element.name(), Some("Basic Wall"));
        assert_eq!(element.category(), Some(Category::Walls));
        assert_eq!(element.kind(), ElementKind::Instance);
        assert!(element.bounding_box().is_none());
        assert!(element.geometry().is_none());
    }

    #[test]
    fn furniture_categories() {
        assert!(Category::Furniture.is_furniture());
        assert!(Category::FurnitureSystems.is_furniture());
        assert!(!Category::Walls.is_furniture());
        assert!(!Category::BUILDING.iter().any(|c| c.is_furniture()));
    }

    #[test]
    fn id_display() {
        assert_eq!(ElementId(42).to_string(), "#42");
    }
}
