//! Molecular-orbital amplitude from contracted Cartesian Gaussian shells.
//!
//! Positions are in angstroms; everything inside the Gaussian (exponential
//! and angular polynomial) is in bohr.

use glam::Vec3;

use super::ScalarField;
use crate::molecule::{AtomicOrbital, GaussianPrimitive};

/// Bohr per angstrom.
pub const ANGSTROM_TO_BOHR: f32 = 1.889_725_989;

/// Which molecular orbital the coefficient array describes. Only this one
/// orbital is ever rendered.
pub const OCCUPIED_ORBITAL_INDEX: usize = 0;

/// `(2/π)^(3/4)`
const S_NORM: f32 = 0.712_705_47;
/// `(128/π³)^(1/4)`
const P_NORM: f32 = 1.425_410_9;
/// `(2048/π³)^(1/4)`
const D_NORM: f32 = 2.850_821_9;

/// Angular shape of a Cartesian Gaussian shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OrbitalShape {
    /// Spherical, code 0.
    S,
    /// Code 1.
    Px,
    /// Code 2.
    Py,
    /// Code 3.
    Pz,
    /// Code 4.
    Dxy,
    /// Code 5.
    Dxz,
    /// Code 6.
    Dyz,
    /// Code 7.
    Dxx,
    /// Code 8.
    Dyy,
    /// Code 9.
    Dzz,
}

impl OrbitalShape {
    /// Decode a shell's quantum-number code. Codes outside `0..=9` (f shells
    /// and beyond) are unsupported.
    #[must_use]
    pub const fn from_code(code: i32) -> Option<Self> {
        Some(match code {
            0 => Self::S,
            1 => Self::Px,
            2 => Self::Py,
            3 => Self::Pz,
            4 => Self::Dxy,
            5 => Self::Dxz,
            6 => Self::Dyz,
            7 => Self::Dxx,
            8 => Self::Dyy,
            9 => Self::Dzz,
            _ => return None,
        })
    }

    /// Angular momentum quantum number `l`.
    #[must_use]
    pub const fn angular_momentum(self) -> u32 {
        match self {
            Self::S => 0,
            Self::Px | Self::Py | Self::Pz => 1,
            _ => 2,
        }
    }

    /// Normalization constant for a primitive with the given exponent.
    fn normalization(self, exponent: f32) -> f32 {
        match self {
            Self::S => S_NORM * exponent.powf(0.75),
            Self::Px | Self::Py | Self::Pz => P_NORM * exponent.powf(1.25),
            Self::Dxy | Self::Dxz | Self::Dyz => D_NORM * exponent.powf(1.75),
            Self::Dxx | Self::Dyy | Self::Dzz => {
                D_NORM * exponent.powf(1.75) / 3.0
            }
        }
    }

    /// Angular polynomial of a displacement given in bohr.
    fn polynomial(self, d: Vec3) -> f32 {
        match self {
            Self::S => 1.0,
            Self::Px => d.x,
            Self::Py => d.y,
            Self::Pz => d.z,
            Self::Dxy => d.x * d.y,
            Self::Dxz => d.x * d.z,
            Self::Dyz => d.y * d.z,
            Self::Dxx => d.x * d.x,
            Self::Dyy => d.y * d.y,
            Self::Dzz => d.z * d.z,
        }
    }
}

/// Everything needed to evaluate one molecular orbital.
#[derive(Debug, Clone, Copy)]
pub struct OrbitalBasis<'a> {
    /// Shells, in the order they claim primitives.
    pub orbitals: &'a [AtomicOrbital],
    /// Flat primitive array.
    pub primitives: &'a [GaussianPrimitive],
    /// MO coefficients, `orbitals.len()` per molecular orbital.
    pub coefficients: &'a [f32],
}

/// Orbital amplitude at `point` (angstroms).
///
/// Returns `NaN` if any shell has an unsupported shape, or if the shells
/// claim more primitives or coefficients than the basis holds.
#[must_use]
pub fn evaluate(point: Vec3, basis: &OrbitalBasis<'_>) -> f32 {
    let coefficients = basis
        .coefficients
        .chunks(basis.orbitals.len().max(1))
        .nth(OCCUPIED_ORBITAL_INDEX)
        .unwrap_or_default();
    let mut psi = 0.0;
    let mut cursor = 0;

    for (i, ao) in basis.orbitals.iter().enumerate() {
        let Some(shape) = ao.shape() else {
            return f32::NAN;
        };
        let end = cursor + ao.primitive_count;
        let (Some(prims), Some(&c)) =
            (basis.primitives.get(cursor..end), coefficients.get(i))
        else {
            return f32::NAN;
        };
        cursor = end;

        let d = (point - ao.center) * ANGSTROM_TO_BOHR;
        let r2 = d.length_squared();
        let angular = shape.polynomial(d);

        for prim in prims {
            psi += c
                * prim.contraction
                * shape.normalization(prim.exponent)
                * angular
                * (-prim.exponent * r2).exp();
        }
    }

    psi
}

impl ScalarField for OrbitalBasis<'_> {
    fn value_at(&self, point: Vec3) -> f32 {
        evaluate(point, self)
    }
}

#[cfg(test)]
mod tests {
    use std::f32::consts::PI;

    use super::*;

    const ALPHA: f32 = 0.8;
    const CONTRACTION: f32 = 0.6;
    const COEFF: f32 = 0.9;

    fn single_shell(code: i32) -> (Vec<AtomicOrbital>, Vec<GaussianPrimitive>) {
        (
            vec![AtomicOrbital {
                center: Vec3::ZERO,
                quantum_number: code,
                primitive_count: 1,
            }],
            vec![GaussianPrimitive {
                exponent: ALPHA,
                contraction: CONTRACTION,
            }],
        )
    }

    fn eval_single(code: i32, point: Vec3) -> f32 {
        let (orbitals, primitives) = single_shell(code);
        let coefficients = [COEFF];
        let basis = OrbitalBasis {
            orbitals: &orbitals,
            primitives: &primitives,
            coefficients: &coefficients,
        };
        evaluate(point, &basis)
    }

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() <= 1e-5 * expected.abs().max(1e-6),
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn shape_codes_decode() {
        assert_eq!(OrbitalShape::from_code(0), Some(OrbitalShape::S));
        assert_eq!(OrbitalShape::from_code(3), Some(OrbitalShape::Pz));
        assert_eq!(OrbitalShape::from_code(9), Some(OrbitalShape::Dzz));
        assert_eq!(OrbitalShape::from_code(10), None);
        assert_eq!(OrbitalShape::from_code(-1), None);
        assert_eq!(OrbitalShape::Dxy.angular_momentum(), 2);
    }

    #[test]
    fn s_shell_peak_matches_closed_form() {
        let peak = eval_single(0, Vec3::ZERO);
        let expected = COEFF * CONTRACTION * (2.0 * ALPHA / PI).powf(0.75);
        assert_close(peak, expected);
    }

    #[test]
    fn s_shell_decays_to_one_over_e() {
        let peak = eval_single(0, Vec3::ZERO);
        // exp(-alpha * r_bohr^2) == 1/e at r_bohr = 1/sqrt(alpha)
        let r = 1.0 / ALPHA.sqrt() / ANGSTROM_TO_BOHR;
        let value = eval_single(0, Vec3::new(0.0, r, 0.0));
        assert_close(value, peak / std::f32::consts::E);
    }

    #[test]
    fn value_vanishes_far_from_all_shells() {
        for code in 0..10 {
            let v = eval_single(code, Vec3::new(1.0e3, -2.0e3, 5.0e2));
            assert!(v.abs() < 1e-30, "code {code} gave {v}");
        }
    }

    #[test]
    fn p_shell_is_odd_along_its_axis() {
        let plus = eval_single(1, Vec3::new(0.5, 0.0, 0.0));
        let minus = eval_single(1, Vec3::new(-0.5, 0.0, 0.0));
        assert!(plus > 0.0);
        assert_close(minus, -plus);
        // Nodal plane perpendicular to x
        assert_eq!(eval_single(1, Vec3::new(0.0, 0.7, 0.2)), 0.0);
    }

    #[test]
    fn p_shell_uses_bohr_displacement() {
        let x = 0.3;
        let xb = x * ANGSTROM_TO_BOHR;
        let expected = COEFF
            * CONTRACTION
            * (128.0 * ALPHA.powi(5) / PI.powi(3)).powf(0.25)
            * xb
            * (-ALPHA * xb * xb).exp();
        assert_close(eval_single(1, Vec3::new(x, 0.0, 0.0)), expected);
    }

    #[test]
    fn d_shell_normalizations() {
        let p = Vec3::new(0.2, 0.3, -0.4);
        let d = p * ANGSTROM_TO_BOHR;
        let radial = COEFF * CONTRACTION * (-ALPHA * d.length_squared()).exp();
        let n = (2048.0 * ALPHA.powi(7) / PI.powi(3)).powf(0.25);

        assert_close(eval_single(4, p), radial * n * d.x * d.y);
        assert_close(eval_single(5, p), radial * n * d.x * d.z);
        assert_close(eval_single(6, p), radial * n * d.y * d.z);
        assert_close(eval_single(7, p), radial * n / 3.0 * d.x * d.x);
        assert_close(eval_single(8, p), radial * n / 3.0 * d.y * d.y);
        assert_close(eval_single(9, p), radial * n / 3.0 * d.z * d.z);
    }

    #[test]
    fn unsupported_shape_is_nan() {
        assert!(eval_single(10, Vec3::ZERO).is_nan());
        assert!(eval_single(64, Vec3::new(1.0, 0.0, 0.0)).is_nan());
    }

    #[test]
    fn shells_consume_primitives_in_order() {
        let orbitals = vec![
            AtomicOrbital {
                center: Vec3::ZERO,
                quantum_number: 0,
                primitive_count: 2,
            },
            AtomicOrbital {
                center: Vec3::new(1.0, 0.0, 0.0),
                quantum_number: 0,
                primitive_count: 1,
            },
        ];
        let primitives = vec![
            GaussianPrimitive {
                exponent: 3.0,
                contraction: 0.2,
            },
            GaussianPrimitive {
                exponent: 0.5,
                contraction: 0.7,
            },
            GaussianPrimitive {
                exponent: 1.2,
                contraction: 1.0,
            },
        ];
        let coefficients = [0.4, -0.6];
        let basis = OrbitalBasis {
            orbitals: &orbitals,
            primitives: &primitives,
            coefficients: &coefficients,
        };

        let point = Vec3::new(0.3, 0.1, 0.0);
        let s = |center: Vec3, alpha: f32| {
            let r2 = ((point - center) * ANGSTROM_TO_BOHR).length_squared();
            (2.0 * alpha / PI).powf(0.75) * (-alpha * r2).exp()
        };
        let first = 0.2 * s(Vec3::ZERO, 3.0) + 0.7 * s(Vec3::ZERO, 0.5);
        let second = s(orbitals[1].center, 1.2);
        let expected = 0.4 * first - 0.6 * second;
        assert_close(evaluate(point, &basis), expected);
        assert_close(basis.value_at(point), expected);
    }

    #[test]
    fn truncated_primitive_array_is_nan() {
        let orbitals = vec![AtomicOrbital {
            center: Vec3::ZERO,
            quantum_number: 0,
            primitive_count: 3,
        }];
        let primitives = vec![GaussianPrimitive {
            exponent: 1.0,
            contraction: 1.0,
        }];
        let basis = OrbitalBasis {
            orbitals: &orbitals,
            primitives: &primitives,
            coefficients: &[1.0],
        };
        assert!(evaluate(Vec3::ZERO, &basis).is_nan());
    }
}
