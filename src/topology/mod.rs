pub mod cell;
pub mod solid;

pub use cell::Cell;
pub use solid::{SolidData, SolidId};

use crate::error::TopologyError;
use slotmap::SlotMap;

/// Central arena that owns all model solids.
///
/// Geometry trees reference solids through typed IDs (generational indices),
/// so one solid can be shared by many instances without copying it.
#[derive(Debug, Default)]
pub struct SolidStore {
    solids: SlotMap<SolidId, SolidData>,
}

impl SolidStore {
    /// Creates a new, empty solid store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a solid and returns its ID.
    pub fn add_solid(&mut self, data: SolidData) -> SolidId {
        self.solids.insert(data)
    }

    /// Returns a reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid(&self, id: SolidId) -> Result<&SolidData, TopologyError> {
        self.solids
            .get(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Returns a mutable reference to the solid data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the store.
    pub fn solid_mut(&mut self, id: SolidId) -> Result<&mut SolidData, TopologyError> {
        self.solids
            .get_mut(id)
            .ok_or_else(|| TopologyError::EntityNotFound("solid".into()))
    }

    /// Removes a solid, returning its data if it was present.
    pub fn remove_solid(&mut self, id: SolidId) -> Option<SolidData> {
        self.solids.remove(id)
    }

    /// Number of solids in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.solids.len()
    }

    /// Returns `true` if the store holds no solids.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.solids.is_empty()
    }
}
