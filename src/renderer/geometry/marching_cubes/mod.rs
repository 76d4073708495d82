//! Single-cell marching cubes.
//!
//! [`polygonise`] turns the eight corner samples of one grid cell into a
//! small triangle patch. It is a pure function of its inputs; the adaptive
//! sampler in [`super::isosurface`] decides which cells to visit.

mod tables;

use glam::Vec3;
pub use tables::{EDGE_TABLE, TRI_TABLE};

use super::mesh::{RenderType, Vertex};

/// Corner pair joined by each of the 12 cube edges.
pub const EDGE_CORNERS: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];

/// Lattice offset of each corner relative to the cell's minimum corner.
pub const CORNER_OFFSETS: [[u32; 3]; 8] = [
    [0, 0, 0],
    [1, 0, 0],
    [1, 1, 0],
    [0, 1, 0],
    [0, 0, 1],
    [1, 0, 1],
    [1, 1, 1],
    [0, 1, 1],
];

/// Most unique vertices a single cell can emit (one per edge).
pub const MAX_CELL_VERTICES: usize = 12;
/// Most triangles a single cell can emit.
pub const MAX_CELL_TRIANGLES: usize = 5;

/// Eight corner positions and samples, in [`CORNER_OFFSETS`] order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridCell {
    /// Corner positions.
    pub positions: [Vec3; 8],
    /// Field value at each corner.
    pub values: [f32; 8],
}

impl GridCell {
    /// Smallest and largest corner sample. NaN samples poison both bounds
    /// so the cell never straddles any isovalue.
    #[must_use]
    pub fn value_range(&self) -> (f32, f32) {
        if self.values.iter().any(|v| v.is_nan()) {
            return (f32::NAN, f32::NAN);
        }
        self.values.iter().fold(
            (f32::INFINITY, f32::NEG_INFINITY),
            |(lo, hi), &v| (lo.min(v), hi.max(v)),
        )
    }
}

/// Triangle patch produced by one cell, stored inline.
#[derive(Debug, Clone, Copy)]
pub struct CellMesh {
    vertices: [Vertex; MAX_CELL_VERTICES],
    vertex_count: usize,
    triangles: [[u32; 3]; MAX_CELL_TRIANGLES],
    triangle_count: usize,
}

impl Default for CellMesh {
    fn default() -> Self {
        Self {
            vertices: [bytemuck::Zeroable::zeroed(); MAX_CELL_VERTICES],
            vertex_count: 0,
            triangles: [[0; 3]; MAX_CELL_TRIANGLES],
            triangle_count: 0,
        }
    }
}

impl CellMesh {
    /// Deduplicated vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices[..self.vertex_count]
    }

    /// Triangles indexing into [`Self::vertices`].
    #[must_use]
    pub fn triangles(&self) -> &[[u32; 3]] {
        &self.triangles[..self.triangle_count]
    }

    /// Whether the cell produced no triangles.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.triangle_count == 0
    }
}

/// Configuration index: bit `i` is set iff corner `i` is below `isovalue`.
#[must_use]
pub fn cube_index(values: &[f32; 8], isovalue: f32) -> usize {
    let mut index = 0;
    for (i, &v) in values.iter().enumerate() {
        if v < isovalue {
            index |= 1 << i;
        }
    }
    index
}

/// Crossing point of `isovalue` along one cube edge.
///
/// Endpoints are ordered by value first, so the two cells sharing a lattice
/// edge compute the same point bit for bit.
fn edge_crossing(cell: &GridCell, edge: usize, isovalue: f32) -> Vec3 {
    let [mut a, mut b] = EDGE_CORNERS[edge];
    if cell.values[a] > cell.values[b] {
        std::mem::swap(&mut a, &mut b);
    }
    let (p1, p2) = (cell.positions[a], cell.positions[b]);
    let (v1, v2) = (cell.values[a], cell.values[b]);
    let t = (isovalue - v1) / (v2 - v1);
    p2 * t + p1 * (1.0 - t)
}

/// Triangulate one cell at `isovalue`, tagging every vertex with `color`.
#[must_use]
pub fn polygonise(cell: &GridCell, isovalue: f32, color: [f32; 3]) -> CellMesh {
    let mut mesh = CellMesh::default();
    let index = cube_index(&cell.values, isovalue);
    let edges = EDGE_TABLE[index];
    if edges == 0 {
        return mesh;
    }

    // Local slot per crossed edge, assigned on first use
    let mut remap = [u32::MAX; 12];
    for (edge, slot) in remap.iter_mut().enumerate() {
        if edges & (1 << edge) == 0 {
            continue;
        }
        *slot = mesh.vertex_count as u32;
        mesh.vertices[mesh.vertex_count] = Vertex::new(
            edge_crossing(cell, edge, isovalue),
            color,
            Vec3::ZERO,
            RenderType::Isosurface,
        );
        mesh.vertex_count += 1;
    }

    for tri in TRI_TABLE[index].chunks_exact(3) {
        let [a, b, c] = [tri[0], tri[1], tri[2]];
        if a < 0 || mesh.triangle_count == MAX_CELL_TRIANGLES {
            break;
        }
        mesh.triangles[mesh.triangle_count] = [
            remap[a as usize],
            remap[b as usize],
            remap[c as usize],
        ];
        mesh.triangle_count += 1;
    }
    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_cell(values: [f32; 8]) -> GridCell {
        let positions = CORNER_OFFSETS.map(|[x, y, z]| {
            Vec3::new(x as f32, y as f32, z as f32)
        });
        GridCell { positions, values }
    }

    #[test]
    fn uniform_cells_are_empty() {
        let inside = polygonise(&unit_cell([-1.0; 8]), 0.0, [1.0; 3]);
        let outside = polygonise(&unit_cell([1.0; 8]), 0.0, [1.0; 3]);
        assert!(inside.is_empty());
        assert!(outside.is_empty());
        assert!(inside.vertices().is_empty());
    }

    #[test]
    fn single_corner_gives_one_triangle_on_its_edges() {
        let mut values = [1.0; 8];
        values[0] = -1.0;
        let mesh = polygonise(&unit_cell(values), 0.0, [0.0, 0.0, 1.0]);

        assert_eq!(mesh.triangles().len(), 1);
        assert_eq!(mesh.vertices().len(), 3);
        let mut points: Vec<[f32; 3]> =
            mesh.vertices().iter().map(|v| v.position).collect();
        points.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_eq!(
            points,
            vec![[0.0, 0.0, 0.5], [0.0, 0.5, 0.0], [0.5, 0.0, 0.0]]
        );
        for v in mesh.vertices() {
            assert_eq!(v.color, [0.0, 0.0, 1.0]);
            assert_eq!(v.normal, [0.0; 3]);
            assert_eq!(v.render_type, RenderType::Isosurface as u32);
        }
    }

    #[test]
    fn planar_cut_crosses_vertical_edges_halfway() {
        let values = [-1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0, 1.0];
        let mesh = polygonise(&unit_cell(values), 0.0, [1.0, 0.0, 0.0]);

        assert_eq!(mesh.triangles().len(), 2);
        assert_eq!(mesh.vertices().len(), 4);
        for v in mesh.vertices() {
            assert_eq!(v.position[2], 0.5);
        }
    }

    #[test]
    fn crossing_interpolates_toward_the_isovalue() {
        let mut values = [1.0; 8];
        values[0] = -3.0;
        let mesh = polygonise(&unit_cell(values), 0.0, [1.0; 3]);
        // t = (0 - (-3)) / (1 - (-3)) along each edge from corner 0
        for v in mesh.vertices() {
            let sum: f32 = v.position.iter().sum();
            assert!((sum - 0.75).abs() < 1e-6);
        }
    }

    #[test]
    fn shared_edges_are_emitted_once() {
        // Alternating corners exercise the busiest configurations
        let values = [-1.0, 1.0, -1.0, 1.0, 1.0, -1.0, 1.0, -1.0];
        let mesh = polygonise(&unit_cell(values), 0.0, [1.0; 3]);
        assert!(mesh.vertices().len() <= MAX_CELL_VERTICES);
        assert!(mesh.triangles().len() <= MAX_CELL_TRIANGLES);

        let used = EDGE_TABLE[cube_index(&values, 0.0)].count_ones();
        assert_eq!(mesh.vertices().len(), used as usize);
        for tri in mesh.triangles() {
            assert!(tri.iter().all(|&i| (i as usize) < mesh.vertices().len()));
        }
    }

    #[test]
    fn nan_samples_poison_the_value_range() {
        let mut values = [0.5; 8];
        values[3] = f32::NAN;
        let (lo, hi) = unit_cell(values).value_range();
        assert!(lo.is_nan() && hi.is_nan());
        assert_eq!(unit_cell([0.5; 8]).value_range(), (0.5, 0.5));
    }

    #[test]
    fn table_masks_match_sign_changes() {
        for (index, &mask) in EDGE_TABLE.iter().enumerate() {
            for (edge, [a, b]) in EDGE_CORNERS.iter().enumerate() {
                let crosses = ((index >> a) & 1) != ((index >> b) & 1);
                assert_eq!(mask & (1 << edge) != 0, crosses);
            }
        }
    }
}
