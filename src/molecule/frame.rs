//! One trajectory frame: atoms plus the basis data of the rendered orbital.

use glam::Vec3;

use super::atom::Atom;
use crate::error::OrbvizError;
use crate::kernel::orbital::{OrbitalBasis, OrbitalShape};

/// A basis-function shell centered on a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtomicOrbital {
    /// Shell center in angstroms.
    pub center: Vec3,
    /// Angular shape code, see [`OrbitalShape::from_code`].
    pub quantum_number: i32,
    /// How many entries of the frame's primitive array belong to this shell.
    pub primitive_count: usize,
}

impl AtomicOrbital {
    /// Decoded shape, or `None` for unsupported codes (f shells and up).
    #[must_use]
    pub fn shape(&self) -> Option<OrbitalShape> {
        OrbitalShape::from_code(self.quantum_number)
    }
}

/// One Gaussian term of a contracted shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GaussianPrimitive {
    /// Gaussian exponent (bohr⁻²).
    pub exponent: f32,
    /// Contraction coefficient.
    pub contraction: f32,
}

/// Atoms, shells, primitives and MO coefficients of one trajectory frame.
///
/// The four arrays are owned together and dropped together. Shells claim
/// primitives in order: shell `i` owns the `primitive_count` entries that
/// follow those of shell `i - 1`.
#[derive(Debug)]
pub struct Frame {
    atoms: Vec<Atom>,
    orbitals: Vec<AtomicOrbital>,
    primitives: Vec<GaussianPrimitive>,
    mo_coefficients: Vec<f32>,
}

impl Frame {
    /// Assemble a frame, checking that the arrays agree with each other.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::InconsistentFrame`] when the coefficient
    /// count differs from the shell count, or the shells claim a different
    /// number of primitives than were supplied.
    pub fn new(
        atoms: Vec<Atom>,
        orbitals: Vec<AtomicOrbital>,
        primitives: Vec<GaussianPrimitive>,
        mo_coefficients: Vec<f32>,
    ) -> Result<Self, OrbvizError> {
        if mo_coefficients.len() != orbitals.len() {
            return Err(OrbvizError::InconsistentFrame(format!(
                "{} MO coefficients for {} atomic orbitals",
                mo_coefficients.len(),
                orbitals.len()
            )));
        }
        let claimed: usize = orbitals.iter().map(|ao| ao.primitive_count).sum();
        if claimed != primitives.len() {
            return Err(OrbvizError::InconsistentFrame(format!(
                "atomic orbitals claim {claimed} primitives, {} given",
                primitives.len()
            )));
        }
        Ok(Self {
            atoms,
            orbitals,
            primitives,
            mo_coefficients,
        })
    }

    /// Frame with atoms only (no orbital to render).
    #[must_use]
    pub fn from_atoms(atoms: Vec<Atom>) -> Self {
        Self {
            atoms,
            orbitals: Vec::new(),
            primitives: Vec::new(),
            mo_coefficients: Vec::new(),
        }
    }

    /// Atoms of this frame.
    #[must_use]
    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Atomic orbital shells of this frame.
    #[must_use]
    pub fn orbitals(&self) -> &[AtomicOrbital] {
        &self.orbitals
    }

    /// Flat primitive array shared by all shells.
    #[must_use]
    pub fn primitives(&self) -> &[GaussianPrimitive] {
        &self.primitives
    }

    /// One coefficient per shell for the rendered molecular orbital.
    #[must_use]
    pub fn mo_coefficients(&self) -> &[f32] {
        &self.mo_coefficients
    }

    /// Borrowed view used by the orbital evaluator.
    #[must_use]
    pub fn orbital_basis(&self) -> OrbitalBasis<'_> {
        OrbitalBasis {
            orbitals: &self.orbitals,
            primitives: &self.primitives,
            coefficients: &self.mo_coefficients,
        }
    }

    /// Number of shells whose shape code the evaluator cannot handle.
    #[must_use]
    pub fn unsupported_shell_count(&self) -> usize {
        self.orbitals.iter().filter(|ao| ao.shape().is_none()).count()
    }
}

/// Ordered sequence of frames, read-only once loaded.
#[derive(Debug, Default)]
pub struct Trajectory {
    frames: Vec<Frame>,
}

impl Trajectory {
    /// Wrap already-loaded frames.
    #[must_use]
    pub fn new(frames: Vec<Frame>) -> Self {
        Self { frames }
    }

    /// Frame at `index`, if any.
    #[must_use]
    pub fn frame(&self, index: usize) -> Option<&Frame> {
        self.frames.get(index)
    }

    /// All frames in order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether the trajectory has no frames.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}
