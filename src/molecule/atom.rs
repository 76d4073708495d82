//! Atoms with species-resolved color and radii.

use glam::Vec3;

use super::element::Element;

/// One atom of a trajectory frame.
///
/// Color and radii are resolved from the species when the atom is created
/// and never change afterwards; frames only hand out shared references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Atom {
    /// Atomic number (0 = dummy atom).
    pub atomic_number: u32,
    /// Position in angstroms.
    pub position: Vec3,
    /// RGB display color.
    pub color: [f32; 3],
    /// Van-der-Waals radius in angstroms (sphere size).
    pub vdw_radius: f32,
    /// Bond radius in angstroms (bond cutoff).
    pub bond_radius: f32,
}

impl Atom {
    /// Atom whose color and radii come from the element table.
    #[must_use]
    pub fn new(atomic_number: u32, position: Vec3) -> Self {
        let elem = Element(atomic_number);
        Self {
            atomic_number,
            position,
            color: elem.cpk_color(),
            vdw_radius: elem.vdw_radius(),
            bond_radius: elem.bond_radius(),
        }
    }

    /// Atom with explicit radii; color still comes from the species.
    #[must_use]
    pub fn with_radii(
        atomic_number: u32,
        position: Vec3,
        vdw_radius: f32,
        bond_radius: f32,
    ) -> Self {
        Self {
            vdw_radius,
            bond_radius,
            ..Self::new(atomic_number, position)
        }
    }

    /// Species of this atom.
    #[must_use]
    pub fn element(&self) -> Element {
        Element(self.atomic_number)
    }
}
