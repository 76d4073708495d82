//! Canonical primitive meshes instanced by the ball-and-stick assembler.
//!
//! Both tables are built once on first use and shared read-only for the
//! lifetime of the process. Triangles are wound clockwise when seen from
//! outside; the assembler swaps two indices per triangle when emitting.

use std::sync::LazyLock;

use glam::Vec3;
use rustc_hash::FxHashMap;

/// Icosahedron subdivision passes for the atom sphere.
pub const SPHERE_SUBDIVISIONS: u32 = 2;
/// Segments around the bond cylinder.
pub const CYLINDER_SEGMENTS: u32 = 12;
/// Radius of the canonical bond cylinder.
pub const CYLINDER_RADIUS: f32 = 0.5;
/// Length of the canonical bond cylinder along +Y.
pub const CYLINDER_HEIGHT: f32 = 2.0;

/// Unit-radius icosphere centered at the origin (162 vertices).
pub static UNIT_SPHERE: LazyLock<PrimitiveMesh> =
    LazyLock::new(|| PrimitiveMesh::icosphere(SPHERE_SUBDIVISIONS));

/// Capped cylinder of radius 0.5 spanning y in [0, 2] (28 vertices).
pub static BOND_CYLINDER: LazyLock<PrimitiveMesh> =
    LazyLock::new(|| PrimitiveMesh::capped_cylinder(CYLINDER_SEGMENTS));

/// Positions plus triangle list of a primitive.
#[derive(Debug, Clone, PartialEq)]
pub struct PrimitiveMesh {
    /// Object-space positions.
    pub vertices: Vec<Vec3>,
    /// Triangles, clockwise seen from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl PrimitiveMesh {
    /// Icosahedron with each face split into four `subdivisions` times,
    /// vertices projected onto the unit sphere.
    #[must_use]
    pub fn icosphere(subdivisions: u32) -> Self {
        let phi = (1.0 + 5.0_f32.sqrt()) * 0.5;
        let mut vertices: Vec<Vec3> = [
            [-1.0, phi, 0.0],
            [1.0, phi, 0.0],
            [-1.0, -phi, 0.0],
            [1.0, -phi, 0.0],
            [0.0, -1.0, phi],
            [0.0, 1.0, phi],
            [0.0, -1.0, -phi],
            [0.0, 1.0, -phi],
            [phi, 0.0, -1.0],
            [phi, 0.0, 1.0],
            [-phi, 0.0, -1.0],
            [-phi, 0.0, 1.0],
        ]
        .iter()
        .map(|&p| Vec3::from_array(p).normalize())
        .collect();

        let mut triangles: Vec<[u32; 3]> = vec![
            [0, 5, 11],
            [0, 1, 5],
            [0, 7, 1],
            [0, 10, 7],
            [0, 11, 10],
            [1, 9, 5],
            [5, 4, 11],
            [11, 2, 10],
            [10, 6, 7],
            [7, 8, 1],
            [3, 4, 9],
            [3, 2, 4],
            [3, 6, 2],
            [3, 8, 6],
            [3, 9, 8],
            [4, 5, 9],
            [2, 11, 4],
            [6, 10, 2],
            [8, 7, 6],
            [9, 1, 8],
        ];

        for _ in 0..subdivisions {
            let mut midpoints: FxHashMap<(u32, u32), u32> =
                FxHashMap::default();
            let mut midpoint = |a: u32, b: u32| -> u32 {
                let key = (a.min(b), a.max(b));
                *midpoints.entry(key).or_insert_with(|| {
                    let mid = (vertices[a as usize] + vertices[b as usize])
                        .normalize();
                    vertices.push(mid);
                    (vertices.len() - 1) as u32
                })
            };

            triangles = triangles
                .iter()
                .flat_map(|&[a, b, c]| {
                    let ab = midpoint(a, b);
                    let bc = midpoint(b, c);
                    let ca = midpoint(c, a);
                    [[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]
                })
                .collect();
        }

        Self {
            vertices,
            triangles,
        }
    }

    /// Cylinder of radius [`CYLINDER_RADIUS`] from y = 0 to
    /// [`CYLINDER_HEIGHT`], closed by flat caps.
    ///
    /// Layout: bottom center, bottom ring (`segments + 1` vertices with a
    /// duplicated seam), top center, top ring.
    #[must_use]
    pub fn capped_cylinder(segments: u32) -> Self {
        let ring_len = segments + 1;
        let ring = |y: f32| {
            (0..ring_len).map(move |i| {
                let angle = std::f32::consts::TAU * i as f32 / segments as f32;
                let (sin, cos) = angle.sin_cos();
                Vec3::new(CYLINDER_RADIUS * cos, y, CYLINDER_RADIUS * sin)
            })
        };

        let bottom_center = 0;
        let bottom_ring = 1;
        let top_center = bottom_ring + ring_len;
        let top_ring = top_center + 1;

        let mut vertices = Vec::with_capacity(2 * (ring_len as usize + 1));
        vertices.push(Vec3::ZERO);
        vertices.extend(ring(0.0));
        vertices.push(Vec3::new(0.0, CYLINDER_HEIGHT, 0.0));
        vertices.extend(ring(CYLINDER_HEIGHT));

        let mut triangles = Vec::with_capacity(4 * segments as usize);
        for i in 0..segments {
            let (b0, b1) = (bottom_ring + i, bottom_ring + i + 1);
            let (t0, t1) = (top_ring + i, top_ring + i + 1);
            triangles.push([bottom_center, b1, b0]);
            triangles.push([top_center, t0, t1]);
            triangles.push([b0, b1, t0]);
            triangles.push([b1, t1, t0]);
        }

        Self {
            vertices,
            triangles,
        }
    }

    /// Number of vertices.
    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }
}
