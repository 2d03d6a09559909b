use tracing::{instrument, trace};

use crate::error::{OperationError, Result};
use crate::operations::grid::Grid;
use crate::topology::SolidData;

use super::select::{keep_cell, BooleanOp};

/// Largest grid, in cells, a single boolean is allowed to allocate.
const MAX_GRID_CELLS: usize = 1 << 24;

/// Executes a boolean operation on two solids.
///
/// Both solids are decomposed on a shared coordinate-compressed grid, the
/// cells are selected per [`keep_cell`], and the kept cells are reassembled
/// into a new solid. An empty selection yields the empty solid, so the
/// intersection of two solids that only touch is valid and has zero volume.
///
/// # Errors
///
/// Returns an error if the shared grid would exceed the allocation limit.
#[instrument(level = "trace", skip_all, fields(op = ?op, cells_a = a.cells.len(), cells_b = b.cells.len()))]
pub fn boolean_execute(a: &SolidData, b: &SolidData, op: BooleanOp) -> Result<SolidData> {
    // Empty operands need no grid
    if a.is_empty() || b.is_empty() {
        return Ok(match op {
            BooleanOp::Union if a.is_empty() => b.clone(),
            BooleanOp::Union | BooleanOp::Subtract => a.clone(),
            BooleanOp::Intersect => SolidData::empty(),
        });
    }

    let grid = Grid::build(&[a, b]);
    let [nx, ny, nz] = grid.dims();
    let total = nx
        .checked_mul(ny)
        .and_then(|n| n.checked_mul(nz))
        .filter(|&n| n <= MAX_GRID_CELLS)
        .ok_or_else(|| {
            OperationError::Failed(format!(
                "boolean grid {nx}x{ny}x{nz} exceeds {MAX_GRID_CELLS} cells"
            ))
        })?;
    trace!(total, "decomposed operands");

    let in_a = grid.occupancy(a);
    let in_b = grid.occupancy(b);
    let kept = in_a.combine(&in_b, |x, y| keep_cell(x, y, op));

    Ok(grid.to_solid(&kept))
}
