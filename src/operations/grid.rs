//! Coordinate-compressed occupancy grid over rectilinear solids.
//!
//! Every cell boundary of the participating solids becomes a grid line. Each
//! grid cell is then either fully inside or fully outside every participating
//! solid, which makes booleans and measurements exact.

use crate::math::{sorted_unique, Point3, TOLERANCE};
use crate::topology::{Cell, SolidData};

/// Grid lines along the three axes.
#[derive(Debug, Clone)]
pub(crate) struct Grid {
    lines: [Vec<f64>; 3],
}

/// Which grid cells a solid (or a boolean combination) occupies.
#[derive(Debug, Clone)]
pub(crate) struct Occupancy {
    dims: [usize; 3],
    filled: Vec<bool>,
}

/// Area and face count of a solid's boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BoundaryStats {
    pub area: f64,
    pub faces: u32,
}

impl Grid {
    /// Builds the grid spanned by all cell boundaries of `solids`.
    pub fn build(solids: &[&SolidData]) -> Self {
        let lines = [0, 1, 2].map(|axis| {
            let coords: Vec<f64> = solids
                .iter()
                .flat_map(|solid| solid.cells.iter())
                .flat_map(|cell| [cell.min()[axis], cell.max()[axis]])
                .collect();
            sorted_unique(&coords)
        });
        Self { lines }
    }

    /// Number of grid cells along each axis.
    pub fn dims(&self) -> [usize; 3] {
        [0, 1, 2].map(|axis| self.lines[axis].len().saturating_sub(1))
    }

    /// Width of grid cell `index` along `axis`.
    fn width(&self, axis: usize, index: usize) -> f64 {
        self.lines[axis][index + 1] - self.lines[axis][index]
    }

    /// Index of the grid line matching `value` (within tolerance).
    fn line_index(&self, axis: usize, value: f64) -> usize {
        self.lines[axis].partition_point(|&line| line < value - TOLERANCE)
    }

    /// Marks the grid cells covered by `solid`.
    pub fn occupancy(&self, solid: &SolidData) -> Occupancy {
        let mut occupancy = Occupancy::empty(self.dims());
        for cell in &solid.cells {
            let lo = [0, 1, 2].map(|axis| self.line_index(axis, cell.min()[axis]));
            let hi = [0, 1, 2].map(|axis| self.line_index(axis, cell.max()[axis]));
            for ix in lo[0]..hi[0] {
                for iy in lo[1]..hi[1] {
                    for iz in lo[2]..hi[2] {
                        occupancy.set([ix, iy, iz]);
                    }
                }
            }
        }
        occupancy
    }

    /// Total volume of the occupied grid cells.
    pub fn volume(&self, occupancy: &Occupancy) -> f64 {
        let [nx, ny, nz] = occupancy.dims;
        let mut volume = 0.0;
        for ix in 0..nx {
            for iy in 0..ny {
                for iz in 0..nz {
                    if occupancy.get([ix, iy, iz]) {
                        volume += self.width(0, ix) * self.width(1, iy) * self.width(2, iz);
                    }
                }
            }
        }
        volume
    }

    /// Measures the boundary between occupied and free space.
    ///
    /// A face is a maximal 4-connected region of boundary facets lying in one
    /// grid plane with the same outward normal, so coplanar facets left over
    /// from a merge count as a single face.
    pub fn boundary(&self, occupancy: &Occupancy) -> BoundaryStats {
        let dims = occupancy.dims;
        let mut area = 0.0;
        let mut faces = 0u32;

        for axis in 0..3 {
            let (u_axis, v_axis) = ((axis + 1) % 3, (axis + 2) % 3);
            let (nu, nv) = (dims[u_axis], dims[v_axis]);

            for k in 0..=dims[axis] {
                // +1: outward normal along +axis, -1: along -axis, 0: no facet.
                let mut orientation = vec![0i8; nu * nv];
                for u in 0..nu {
                    for v in 0..nv {
                        let at = |k: usize| {
                            let mut index = [0; 3];
                            index[axis] = k;
                            index[u_axis] = u;
                            index[v_axis] = v;
                            occupancy.get(index)
                        };
                        let below = k > 0 && at(k - 1);
                        let above = k < dims[axis] && at(k);
                        if below != above {
                            orientation[u * nv + v] = if below { 1 } else { -1 };
                            area += self.width(u_axis, u) * self.width(v_axis, v);
                        }
                    }
                }
                faces += count_regions(&orientation, nu, nv);
            }
        }

        BoundaryStats { area, faces }
    }

    /// Converts an occupancy back into a solid, merging runs along Z.
    pub fn to_solid(&self, occupancy: &Occupancy) -> SolidData {
        let [nx, ny, nz] = occupancy.dims;
        let mut cells = Vec::new();
        for ix in 0..nx {
            for iy in 0..ny {
                let mut iz = 0;
                while iz < nz {
                    if !occupancy.get([ix, iy, iz]) {
                        iz += 1;
                        continue;
                    }
                    let start = iz;
                    while iz < nz && occupancy.get([ix, iy, iz]) {
                        iz += 1;
                    }
                    cells.push(Cell::from_bounds(
                        Point3::new(self.lines[0][ix], self.lines[1][iy], self.lines[2][start]),
                        Point3::new(self.lines[0][ix + 1], self.lines[1][iy + 1], self.lines[2][iz]),
                    ));
                }
            }
        }
        SolidData::new(cells)
    }
}

impl Occupancy {
    fn empty(dims: [usize; 3]) -> Self {
        Self {
            dims,
            filled: vec![false; dims[0] * dims[1] * dims[2]],
        }
    }

    fn offset(&self, [ix, iy, iz]: [usize; 3]) -> usize {
        (ix * self.dims[1] + iy) * self.dims[2] + iz
    }

    fn set(&mut self, index: [usize; 3]) {
        let offset = self.offset(index);
        self.filled[offset] = true;
    }

    fn get(&self, index: [usize; 3]) -> bool {
        self.filled[self.offset(index)]
    }

    /// Combines two occupancies of the same grid cell by cell.
    pub fn combine(&self, other: &Self, keep: impl Fn(bool, bool) -> bool) -> Self {
        debug_assert_eq!(self.dims, other.dims);
        Self {
            dims: self.dims,
            filled: self
                .filled
                .iter()
                .zip(&other.filled)
                .map(|(&a, &b)| keep(a, b))
                .collect(),
        }
    }
}

/// Counts 4-connected regions of equal non-zero values in a `nu × nv` plane.
fn count_regions(orientation: &[i8], nu: usize, nv: usize) -> u32 {
    let mut visited = vec![false; orientation.len()];
    let mut regions = 0;
    let mut stack = Vec::new();

    for start in 0..orientation.len() {
        if orientation[start] == 0 || visited[start] {
            continue;
        }
        regions += 1;
        let sign = orientation[start];
        visited[start] = true;
        stack.push(start);

        while let Some(current) = stack.pop() {
            let (u, v) = (current / nv, current % nv);
            let mut neighbors = Vec::with_capacity(4);
            if u > 0 {
                neighbors.push(current - nv);
            }
            if u + 1 < nu {
                neighbors.push(current + nv);
            }
            if v > 0 {
                neighbors.push(current - 1);
            }
            if v + 1 < nv {
                neighbors.push(current + 1);
            }
            for next in neighbors {
                if !visited[next] && orientation[next] == sign {
                    visited[next] = true;
                    stack.push(next);
                }
            }
        }
    }
    regions
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cell(min: [f64; 3], max: [f64; 3]) -> Cell {
        Cell::new(Point3::from(min), Point3::from(max)).unwrap()
    }

    #[test]
    fn overlapping_cells_count_once() {
        let solid = SolidData::new(vec![
            cell([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]),
            cell([1.0, 0.0, 0.0], [3.0, 1.0, 1.0]),
        ]);
        let grid = Grid::build(&[&solid]);
        let occupancy = grid.occupancy(&solid);

        assert_relative_eq!(grid.volume(&occupancy), 3.0);
        let stats = grid.boundary(&occupancy);
        assert_relative_eq!(stats.area, 2.0 * (3.0 + 3.0 + 1.0));
        assert_eq!(stats.faces, 6);
    }

    #[test]
    fn l_shape_has_eight_faces() {
        let solid = SolidData::new(vec![
            cell([0.0, 0.0, 0.0], [2.0, 1.0, 1.0]),
            cell([0.0, 1.0, 0.0], [1.0, 2.0, 1.0]),
        ]);
        let grid = Grid::build(&[&solid]);
        let stats = grid.boundary(&grid.occupancy(&solid));
        assert_eq!(stats.faces, 8);
        // Top + bottom: 3 each; sides: perimeter 8 × height 1.
        assert_relative_eq!(stats.area, 14.0);
    }

    #[test]
    fn to_solid_merges_z_runs() {
        let solid = SolidData::new(vec![
            cell([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]),
            cell([0.0, 0.0, 1.0], [1.0, 1.0, 2.0]),
        ]);
        let grid = Grid::build(&[&solid]);
        let rebuilt = grid.to_solid(&grid.occupancy(&solid));
        assert_eq!(rebuilt.cells.len(), 1);
        assert_relative_eq!(rebuilt.cells[0].max().z, 2.0);
    }

    #[test]
    fn empty_solid_has_no_boundary() {
        let solid = SolidData::empty();
        let grid = Grid::build(&[&solid]);
        let occupancy = grid.occupancy(&solid);
        assert_eq!(grid.dims(), [0, 0, 0]);
        assert_relative_eq!(grid.volume(&occupancy), 0.0);
        assert_eq!(grid.boundary(&occupancy).faces, 0);
    }
}
