//! Distance-based bond inference.

use glam::Vec3;

use crate::molecule::Atom;

/// Default tolerance factor on the summed bond radii.
pub const DEFAULT_CUTOFF_SCALE: f32 = 1.3;

/// A bond between two atoms, captured by value.
///
/// Bonds are recomputed on every geometry rebuild and never refer back to
/// the atoms they came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    /// `[pos_a, pos_b]` in angstroms.
    pub endpoints: [Vec3; 2],
    /// `[color_a, color_b]`.
    pub colors: [[f32; 3]; 2],
}

impl Bond {
    /// Distance between the two endpoints.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.endpoints[0].distance(self.endpoints[1])
    }
}

/// Whether two atoms are close enough to be bonded.
///
/// True iff the squared distance is strictly below
/// `(cutoff_scale * (bond_radius_a + bond_radius_b))²`.
#[must_use]
pub fn is_bonded(a: &Atom, b: &Atom, cutoff_scale: f32) -> bool {
    let cutoff = cutoff_scale * (a.bond_radius + b.bond_radius);
    a.position.distance_squared(b.position) < cutoff * cutoff
}

/// All bonded pairs `i < j`, by exhaustive pairwise scan.
#[must_use]
pub fn infer_bonds(atoms: &[Atom], cutoff_scale: f32) -> Vec<Bond> {
    let mut bonds = Vec::new();
    for (i, a) in atoms.iter().enumerate() {
        for b in &atoms[i + 1..] {
            if is_bonded(a, b, cutoff_scale) {
                bonds.push(Bond {
                    endpoints: [a.position, b.position],
                    colors: [a.color, b.color],
                });
            }
        }
    }
    bonds
}

#[cfg(test)]
mod tests {
    use rand::seq::SliceRandom;

    use super::*;

    fn atom_at(x: f32, bond_radius: f32) -> Atom {
        Atom::with_radii(6, Vec3::new(x, 0.0, 0.0), 1.7, bond_radius)
    }

    #[test]
    fn pair_at_one_angstrom_is_bonded() {
        let a = atom_at(0.0, 0.5);
        let b = atom_at(1.0, 0.5);
        assert!(is_bonded(&a, &b, DEFAULT_CUTOFF_SCALE));
        assert_eq!(infer_bonds(&[a, b], DEFAULT_CUTOFF_SCALE).len(), 1);
    }

    #[test]
    fn pair_at_two_angstroms_is_not_bonded() {
        let a = atom_at(0.0, 0.5);
        let b = atom_at(2.0, 0.5);
        assert!(!is_bonded(&a, &b, DEFAULT_CUTOFF_SCALE));
        assert!(infer_bonds(&[a, b], DEFAULT_CUTOFF_SCALE).is_empty());
    }

    #[test]
    fn cutoff_is_strict() {
        // A pair sitting exactly on the cutoff is not bonded
        let a = atom_at(0.0, 0.5);
        let b = atom_at(1.25, 0.5);
        assert!(is_bonded(&a, &b, 1.3));
        assert!(!is_bonded(&a, &b, 1.25));
    }

    #[test]
    fn bonded_is_symmetric() {
        let atoms: Vec<Atom> = (0..6)
            .map(|i| {
                Atom::new(
                    [1, 6, 7, 8, 16, 17][i],
                    Vec3::new(i as f32 * 0.9, (i % 2) as f32 * 0.4, 0.0),
                )
            })
            .collect();
        for a in &atoms {
            for b in &atoms {
                assert_eq!(
                    is_bonded(a, b, DEFAULT_CUTOFF_SCALE),
                    is_bonded(b, a, DEFAULT_CUTOFF_SCALE)
                );
            }
        }
    }

    #[test]
    fn bonds_capture_endpoint_values() {
        let mut a = atom_at(0.0, 0.5);
        a.color = [1.0, 0.0, 0.0];
        let mut b = atom_at(0.8, 0.5);
        b.color = [0.0, 1.0, 0.0];
        let bonds = infer_bonds(&[a, b], DEFAULT_CUTOFF_SCALE);
        assert_eq!(bonds[0].endpoints, [a.position, b.position]);
        assert_eq!(bonds[0].colors, [a.color, b.color]);
        assert!((bonds[0].length() - 0.8).abs() < 1e-6);
    }

    #[test]
    fn no_self_bonds_even_for_coincident_atoms() {
        let atoms = [atom_at(0.0, 0.5)];
        assert!(infer_bonds(&atoms, DEFAULT_CUTOFF_SCALE).is_empty());

        // Two distinct atoms at the same spot are still one pair
        let atoms = [atom_at(0.0, 0.5), atom_at(0.0, 0.5)];
        assert_eq!(infer_bonds(&atoms, DEFAULT_CUTOFF_SCALE).len(), 1);
    }

    #[test]
    fn bond_set_is_independent_of_atom_order() {
        // Methane-like cluster plus a distant atom
        let mut atoms = vec![
            Atom::new(6, Vec3::ZERO),
            Atom::new(1, Vec3::new(0.63, 0.63, 0.63)),
            Atom::new(1, Vec3::new(-0.63, -0.63, 0.63)),
            Atom::new(1, Vec3::new(-0.63, 0.63, -0.63)),
            Atom::new(1, Vec3::new(0.63, -0.63, -0.63)),
            Atom::new(8, Vec3::new(10.0, 0.0, 0.0)),
        ];

        let key = |bonds: &[Bond]| {
            let mut pairs: Vec<[[i64; 3]; 2]> = bonds
                .iter()
                .map(|b| {
                    let q = |v: Vec3| {
                        [
                            (v.x * 1000.0).round() as i64,
                            (v.y * 1000.0).round() as i64,
                            (v.z * 1000.0).round() as i64,
                        ]
                    };
                    let mut pair = [q(b.endpoints[0]), q(b.endpoints[1])];
                    pair.sort_unstable();
                    pair
                })
                .collect();
            pairs.sort_unstable();
            pairs
        };

        let reference = key(&infer_bonds(&atoms, DEFAULT_CUTOFF_SCALE));
        assert_eq!(reference.len(), 4);

        let mut rng = rand::rng();
        for _ in 0..10 {
            atoms.shuffle(&mut rng);
            let shuffled = key(&infer_bonds(&atoms, DEFAULT_CUTOFF_SCALE));
            assert_eq!(shuffled, reference);
        }
    }
}
