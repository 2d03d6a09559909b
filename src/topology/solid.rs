use super::cell::Cell;

slotmap::new_key_type! {
    /// Unique identifier for a solid in the solid store.
    pub struct SolidId;
}

/// Data associated with a rectilinear solid.
///
/// The solid is the union of its cells. Cells may overlap; every query
/// resolves the union exactly, so overlapping cells never count twice.
/// A solid without cells is the empty solid.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SolidData {
    /// The boxes whose union is the solid.
    pub cells: Vec<Cell>,
}

impl SolidData {
    /// Creates a solid from its cells.
    #[must_use]
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// The empty solid.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns `true` if the solid has no cells.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
