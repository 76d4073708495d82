//! Per-frame molecular kernels: bond inference and orbital evaluation.

pub mod bonds;
pub mod orbital;

use glam::Vec3;

/// A scalar field sampled by the isosurface extractor.
pub trait ScalarField {
    /// Field value at `point`.
    fn value_at(&self, point: Vec3) -> f32;
}

impl<F: Fn(Vec3) -> f32> ScalarField for F {
    fn value_at(&self, point: Vec3) -> f32 {
        self(point)
    }
}
