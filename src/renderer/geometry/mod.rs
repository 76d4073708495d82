//! Triangle geometry for a trajectory frame.
//!
//! Everything here writes into a [`mesh::MeshBuffers`]: atom spheres and
//! bond cylinders instanced from fixed primitives, and orbital lobes
//! extracted with adaptive marching cubes.

/// Sphere and half-cylinder instancing for atoms and bonds.
pub mod ball_and_stick;
/// Adaptive octree sampling of the orbital field.
pub mod isosurface;
/// Lookup tables and single-cell triangulation.
pub mod marching_cubes;
/// Vertex format and capacity-guarded output buffers.
pub mod mesh;
/// Canonical icosphere and capped cylinder.
pub mod primitives;
