//! Whole-frame mesh generation: ball-and-stick, then orbital lobes.

use crate::error::OrbvizError;
use crate::molecule::Frame;
use crate::options::Options;
use crate::renderer::geometry::ball_and_stick::BallAndStickAssembler;
use crate::renderer::geometry::isosurface::IsosurfaceSampler;
use crate::renderer::geometry::mesh::MeshBuffers;

/// Build the complete mesh of `frame` into fresh buffers.
///
/// Atoms and bonds come first, followed by the orbital isosurface (if
/// enabled). `sampler` is reconfigured from `options.orbital` and keeps its
/// pools for the next call.
///
/// # Errors
///
/// Returns [`OrbvizError::CapacityExceeded`] if the frame needs more
/// vertices than the index type can address.
pub fn generate_frame_mesh(
    frame: &Frame,
    options: &Options,
    sampler: &mut IsosurfaceSampler,
) -> Result<MeshBuffers, OrbvizError> {
    generate_frame_mesh_into(frame, options, sampler, MeshBuffers::new())
}

/// Like [`generate_frame_mesh`], appending into caller-provided buffers
/// (which set the capacity limit).
///
/// # Errors
///
/// Returns [`OrbvizError::CapacityExceeded`] when `mesh` fills up.
pub fn generate_frame_mesh_into(
    frame: &Frame,
    options: &Options,
    sampler: &mut IsosurfaceSampler,
    mut mesh: MeshBuffers,
) -> Result<MeshBuffers, OrbvizError> {
    BallAndStickAssembler::assemble(frame, &options.bonds, &mut mesh)?;
    let solid_vertices = mesh.vertex_count();

    if sampler.options() != &options.orbital {
        sampler.set_options(&options.orbital);
    }
    sampler.render_orbital(frame, &mut mesh)?;

    log::debug!(
        "frame mesh: {} solid + {} isosurface vertices, {} triangles",
        solid_vertices,
        mesh.vertex_count() - solid_vertices,
        mesh.triangle_count()
    );
    Ok(mesh)
}

#[cfg(test)]
mod tests {
    use glam::Vec3;

    use super::*;
    use crate::molecule::{Atom, AtomicOrbital, GaussianPrimitive};
    use crate::renderer::geometry::mesh::RenderType;
    use crate::renderer::geometry::primitives::{BOND_CYLINDER, UNIT_SPHERE};

    fn hydrogen_molecule() -> Frame {
        let atoms = vec![
            Atom::new(1, Vec3::new(-0.37, 0.0, 0.0)),
            Atom::new(1, Vec3::new(0.37, 0.0, 0.0)),
        ];
        let orbitals = atoms
            .iter()
            .map(|a| AtomicOrbital {
                center: a.position,
                quantum_number: 0,
                primitive_count: 1,
            })
            .collect();
        let primitives = vec![
            GaussianPrimitive {
                exponent: 0.5,
                contraction: 1.0,
            };
            2
        ];
        Frame::new(atoms, orbitals, primitives, vec![0.6, 0.6]).unwrap()
    }

    #[test]
    fn solids_precede_the_isosurface() {
        let options = Options::default();
        let mut sampler = IsosurfaceSampler::new(&options.orbital);
        let mesh =
            generate_frame_mesh(&hydrogen_molecule(), &options, &mut sampler)
                .unwrap();

        let solids = 2 * UNIT_SPHERE.vertex_count()
            + 2 * BOND_CYLINDER.vertex_count();
        assert!(mesh.vertex_count() > solids);
        let (solid, iso) = mesh.vertices.split_at(solids);
        assert!(solid
            .iter()
            .all(|v| v.render_type == RenderType::Solid as u32));
        assert!(iso
            .iter()
            .all(|v| v.render_type == RenderType::Isosurface as u32));
        assert!(mesh
            .indices
            .iter()
            .all(|&i| (i as usize) < mesh.vertex_count()));
    }

    #[test]
    fn disabled_orbital_leaves_only_solids() {
        let mut options = Options::default();
        options.orbital.enabled = false;
        let mut sampler = IsosurfaceSampler::new(&options.orbital);
        let mesh =
            generate_frame_mesh(&hydrogen_molecule(), &options, &mut sampler)
                .unwrap();
        assert_eq!(
            mesh.vertex_count(),
            2 * UNIT_SPHERE.vertex_count() + 2 * BOND_CYLINDER.vertex_count()
        );
    }

    #[test]
    fn capacity_failure_is_reported() {
        let options = Options::default();
        let mut sampler = IsosurfaceSampler::new(&options.orbital);
        let err = generate_frame_mesh_into(
            &hydrogen_molecule(),
            &options,
            &mut sampler,
            MeshBuffers::with_capacity_limit(100),
        )
        .unwrap_err();
        assert!(matches!(err, OrbvizError::CapacityExceeded { .. }));
    }
}
