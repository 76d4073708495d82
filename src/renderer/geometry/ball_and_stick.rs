//! Ball-and-stick mesh assembly.
//!
//! Atoms become scaled copies of [`UNIT_SPHERE`]; each bond becomes two
//! copies of [`BOND_CYLINDER`], one per endpoint, each covering half the
//! bond in that endpoint's color. Primitive tables are clockwise seen from
//! outside, so every emitted triangle has its last two indices swapped.

use glam::{Mat3, Vec3};

use super::mesh::{MeshBuffers, RenderType, Vertex};
use super::primitives::{PrimitiveMesh, BOND_CYLINDER, UNIT_SPHERE};
use crate::error::OrbvizError;
use crate::kernel::bonds::{infer_bonds, Bond};
use crate::molecule::{Atom, Frame};
use crate::options::BondOptions;

/// Below this `|ref × d|` the bond is treated as parallel to the reference
/// axis.
const PARALLEL_EPSILON: f32 = 1e-4;

/// Builds sphere and cylinder instances into a shared [`MeshBuffers`].
#[derive(Debug, Clone, Copy)]
pub struct BallAndStickAssembler {
    bond_radius: f32,
}

impl Default for BallAndStickAssembler {
    fn default() -> Self {
        Self::new(&BondOptions::default())
    }
}

impl BallAndStickAssembler {
    /// Assembler drawing bonds with `options.bond_radius`.
    #[must_use]
    pub fn new(options: &BondOptions) -> Self {
        Self {
            bond_radius: options.bond_radius,
        }
    }

    /// Infer bonds for `frame` and append its atoms, then its bonds.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] before the first instance
    /// that does not fit.
    pub fn assemble(
        frame: &Frame,
        options: &BondOptions,
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError> {
        let bonds = infer_bonds(frame.atoms(), options.cutoff_scale);
        log::debug!(
            "ball-and-stick: {} atoms, {} bonds",
            frame.atoms().len(),
            bonds.len()
        );
        Self::append_atoms(frame.atoms(), out)?;
        Self::new(options).append_bonds(&bonds, out)
    }

    /// One sphere per atom, scaled by its van der Waals radius.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] before the first sphere
    /// that does not fit.
    pub fn append_atoms(
        atoms: &[Atom],
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError> {
        for atom in atoms {
            push_instance(out, &UNIT_SPHERE, |p| {
                Vertex::new(
                    atom.position + atom.vdw_radius * p,
                    atom.color,
                    p,
                    RenderType::Solid,
                )
            })?;
        }
        Ok(())
    }

    /// Two half cylinders per bond. Zero-length bonds are skipped.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] before the first cylinder
    /// that does not fit.
    pub fn append_bonds(
        &self,
        bonds: &[Bond],
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError> {
        for bond in bonds {
            let length = bond.length();
            if length <= f32::EPSILON {
                log::debug!(
                    "ball-and-stick: skipping zero-length bond at {}",
                    bond.endpoints[0]
                );
                continue;
            }
            let [pos_a, pos_b] = bond.endpoints;
            self.push_half_bond(pos_a, pos_b, length, bond.colors[0], out)?;
            self.push_half_bond(pos_b, pos_a, length, bond.colors[1], out)?;
        }
        Ok(())
    }

    /// Cylinder from `from` covering half the way toward `toward`.
    fn push_half_bond(
        &self,
        from: Vec3,
        toward: Vec3,
        length: f32,
        color: [f32; 3],
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError> {
        let rotation = bond_frame((toward - from) / length);
        let scale = Vec3::new(self.bond_radius, length / 4.0, self.bond_radius);
        push_instance(out, &BOND_CYLINDER, |p| {
            Vertex::new(
                from + rotation * (p * scale),
                color,
                rotation * Vec3::new(p.x, 0.0, p.z),
                RenderType::Solid,
            )
        })
    }
}

/// Rotation taking +Y onto `direction` (unit length).
///
/// Columns are `[ref × d, d, (ref × d) × d]` with `ref = +Z`, or `+X` when
/// the bond runs along Z.
fn bond_frame(direction: Vec3) -> Mat3 {
    let mut side = Vec3::Z.cross(direction);
    if side.length() < PARALLEL_EPSILON {
        side = Vec3::X.cross(direction);
    }
    let side = side.normalize();
    Mat3::from_cols(side, direction, side.cross(direction).normalize())
}

/// Append one transformed copy of `mesh`, checking capacity first.
fn push_instance(
    out: &mut MeshBuffers,
    mesh: &PrimitiveMesh,
    vertex: impl Fn(Vec3) -> Vertex,
) -> Result<(), OrbvizError> {
    out.reserve_vertices(mesh.vertex_count())?;
    let base = out.vertex_count() as u32;
    out.vertices.extend(mesh.vertices.iter().map(|&p| vertex(p)));
    out.indices.extend(
        mesh.triangles
            .iter()
            .flat_map(|&[a, b, c]| [base + a, base + c, base + b]),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(mesh: &MeshBuffers, index: u32) -> Vec3 {
        Vec3::from_array(mesh.vertices[index as usize].position)
    }

    /// Every triangle in `tris` faces away from `center`.
    fn assert_outward(mesh: &MeshBuffers, tris: &[u32], center: Vec3) {
        for tri in tris.chunks_exact(3) {
            let [a, b, c] = [0, 1, 2].map(|n| position(mesh, tri[n]));
            let normal = (b - a).cross(c - a);
            let centroid = (a + b + c) / 3.0;
            assert!(normal.dot(centroid - center) > 0.0);
        }
    }

    #[test]
    fn atoms_get_disjoint_sphere_instances() {
        let atoms: Vec<Atom> = (0..3)
            .map(|i| Atom::new(6, Vec3::new(10.0 * i as f32, 0.0, 0.0)))
            .collect();
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::append_atoms(&atoms, &mut mesh).unwrap();

        let (verts, tris) = (162, 320);
        assert_eq!(mesh.vertex_count(), 3 * verts);
        assert_eq!(mesh.triangle_count(), 3 * tris);
        for (n, chunk) in mesh.indices.chunks(3 * tris).enumerate() {
            let lo = (n * verts) as u32;
            let hi = lo + verts as u32;
            assert!(chunk.iter().all(|&i| (lo..hi).contains(&i)));
        }
    }

    #[test]
    fn spheres_face_outward_at_vdw_radius() {
        let atom = Atom::new(8, Vec3::new(1.0, 2.0, 3.0));
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::append_atoms(&[atom], &mut mesh).unwrap();

        assert_outward(&mesh, &mesh.indices, atom.position);
        for v in &mesh.vertices {
            let p = Vec3::from_array(v.position);
            let normal = Vec3::from_array(v.normal);
            assert!((p.distance(atom.position) - atom.vdw_radius).abs() < 1e-4);
            assert!((normal.length() - 1.0).abs() < 1e-5);
            assert_eq!(v.color, atom.color);
            assert_eq!(v.render_type, RenderType::Solid as u32);
        }
    }

    #[test]
    fn bond_halves_meet_in_the_middle() {
        let bond = Bond {
            endpoints: [Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0)],
            colors: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        };
        let options = BondOptions::default();
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::new(&options)
            .append_bonds(&[bond], &mut mesh)
            .unwrap();

        let half = BOND_CYLINDER.vertex_count();
        assert_eq!(mesh.vertex_count(), 2 * half);
        let (first, second) = mesh.vertices.split_at(half);
        for v in first {
            assert!(v.position[0] >= -1e-5 && v.position[0] <= 1.0 + 1e-5);
            assert_eq!(v.color, [1.0, 0.0, 0.0]);
        }
        for v in second {
            assert!(v.position[0] >= 1.0 - 1e-5 && v.position[0] <= 2.0 + 1e-5);
            assert_eq!(v.color, [0.0, 1.0, 0.0]);
        }
        for v in &mesh.vertices {
            let radial = v.position[1].hypot(v.position[2]);
            assert!(radial <= options.bond_radius * 0.5 + 1e-5);
        }
    }

    #[test]
    fn bond_cylinders_face_outward() {
        let bond = Bond {
            endpoints: [Vec3::new(0.5, -1.0, 0.2), Vec3::new(1.5, 0.3, 1.0)],
            colors: [[1.0; 3]; 2],
        };
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::new(&BondOptions::default())
            .append_bonds(&[bond], &mut mesh)
            .unwrap();

        let [a, b] = bond.endpoints;
        let quarter = (b - a) / 4.0;
        let (first, second) = mesh.indices.split_at(mesh.indices.len() / 2);
        assert_outward(&mesh, first, a + quarter);
        assert_outward(&mesh, second, b - quarter);
    }

    #[test]
    fn bond_along_z_uses_fallback_axis() {
        let bond = Bond {
            endpoints: [Vec3::ZERO, Vec3::new(0.0, 0.0, 1.5)],
            colors: [[1.0; 3]; 2],
        };
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::new(&BondOptions::default())
            .append_bonds(&[bond], &mut mesh)
            .unwrap();

        assert_eq!(mesh.vertex_count(), 2 * BOND_CYLINDER.vertex_count());
        for v in &mesh.vertices {
            assert!(v.position.iter().all(|c| c.is_finite()));
            assert!(v.normal.iter().all(|c| c.is_finite()));
        }
    }

    #[test]
    fn bond_frame_is_a_rotation() {
        for d in [Vec3::X, Vec3::Z, -Vec3::Z, Vec3::new(1.0, 2.0, -3.0)] {
            let d = d.normalize();
            let m = bond_frame(d);
            assert!((m * Vec3::Y).abs_diff_eq(d, 1e-6));
            assert!((m.determinant() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn zero_length_bonds_are_skipped() {
        let bond = Bond {
            endpoints: [Vec3::ONE; 2],
            colors: [[1.0; 3]; 2],
        };
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::default()
            .append_bonds(&[bond], &mut mesh)
            .unwrap();
        assert!(mesh.is_empty());
    }

    #[test]
    fn assemble_emits_atoms_then_bonds() {
        let frame = Frame::from_atoms(vec![
            Atom::new(1, Vec3::ZERO),
            Atom::new(1, Vec3::new(0.74, 0.0, 0.0)),
            Atom::new(1, Vec3::new(10.0, 0.0, 0.0)),
        ]);
        let mut mesh = MeshBuffers::new();
        BallAndStickAssembler::assemble(
            &frame,
            &BondOptions::default(),
            &mut mesh,
        )
        .unwrap();

        let spheres = 3 * UNIT_SPHERE.vertex_count();
        assert_eq!(
            mesh.vertex_count(),
            spheres + 2 * BOND_CYLINDER.vertex_count()
        );
    }

    #[test]
    fn capacity_is_checked_per_instance() {
        let atoms = vec![Atom::new(6, Vec3::ZERO), Atom::new(6, Vec3::X * 5.0)];
        let mut mesh = MeshBuffers::with_capacity_limit(200);
        let err = BallAndStickAssembler::append_atoms(&atoms, &mut mesh)
            .unwrap_err();

        assert!(matches!(
            err,
            OrbvizError::CapacityExceeded {
                required: 324,
                capacity: 200
            }
        ));
        // The first sphere fit and is intact
        assert_eq!(mesh.vertex_count(), 162);
        assert_eq!(mesh.triangle_count(), 320);
    }
}
