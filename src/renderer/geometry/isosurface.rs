//! Adaptive isosurface extraction for molecular orbital lobes.
//!
//! A coarse lattice covers the padded bounding box of the atoms. Cells whose
//! corner samples straddle `+threshold` or `-threshold` are split into
//! 2x2x2 children until the finest level, where they are triangulated with
//! [`polygonise`]. Empty space is rejected after one coarse evaluation.
//!
//! All lattice points are addressed by integer coordinates on the finest
//! level, so a point shared by neighboring cells (at any level) always has
//! the same position and therefore the same sample.

use glam::{UVec3, Vec3};

use super::marching_cubes::{polygonise, GridCell, CORNER_OFFSETS};
use super::mesh::MeshBuffers;
use crate::error::OrbvizError;
use crate::kernel::ScalarField;
use crate::molecule::Frame;
use crate::options::OrbitalOptions;

/// Deepest supported refinement (levels including the top grid).
pub const MAX_OCTREE_LEVEL: u32 = 8;
/// Most top-level cells along one axis; finer resolutions are clamped.
pub const MAX_TOP_LEVEL_CELLS: u32 = 128;

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Box from explicit corners.
    #[must_use]
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Tightest box around `points`, or `None` when there are none.
    #[must_use]
    pub fn from_points(points: impl IntoIterator<Item = Vec3>) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Self::new(p, p),
                Some(b) => Self::new(b.min.min(p), b.max.max(p)),
            })
        })
    }

    /// Box grown by `margin` on every side.
    #[must_use]
    pub fn padded(&self, margin: f32) -> Self {
        Self::new(self.min - Vec3::splat(margin), self.max + Vec3::splat(margin))
    }

    /// Edge lengths.
    #[must_use]
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }
}

/// One lattice level being scanned: `dims` cells starting at finest-lattice
/// coordinate `base`, each `step` finest cells wide.
#[derive(Debug, Clone, Copy)]
struct Level {
    base: UVec3,
    dims: UVec3,
    step: u32,
    depth: usize,
}

impl Level {
    fn sample_count(&self) -> usize {
        let n = self.dims + UVec3::ONE;
        n.x as usize * n.y as usize * n.z as usize
    }

    fn sample_index(&self, i: u32, j: u32, k: u32) -> usize {
        let n = self.dims + UVec3::ONE;
        i as usize + n.x as usize * (j as usize + n.y as usize * k as usize)
    }
}

/// One extracted isovalue and how its triangles are oriented.
#[derive(Debug, Clone, Copy)]
struct Lobe {
    iso: f32,
    color: [f32; 3],
    /// Interior lies below `iso`, so table triangles face inward.
    flip: bool,
}

impl Lobe {
    fn append_patch(
        &self,
        cell: &GridCell,
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError> {
        let patch = polygonise(cell, self.iso, self.color);
        let flip = self.flip;
        out.append_indexed(
            patch.vertices(),
            patch.triangles().iter().map(move |&[a, b, c]| {
                if flip { [a, c, b] } else { [a, b, c] }
            }),
        )
    }
}

/// Adaptive marching-cubes sampler.
///
/// Keeps one evaluation pool per octree depth; a depth's pool is reused by
/// every cell refined at that depth, so repeated frames do not allocate
/// once the pools have grown.
#[derive(Debug, Clone)]
pub struct IsosurfaceSampler {
    options: OrbitalOptions,
    pools: Vec<Vec<f32>>,
    origin: Vec3,
    finest_unit: Vec3,
}

impl IsosurfaceSampler {
    /// Sampler configured from orbital options.
    #[must_use]
    pub fn new(options: &OrbitalOptions) -> Self {
        Self {
            options: options.clone(),
            pools: Vec::new(),
            origin: Vec3::ZERO,
            finest_unit: Vec3::ZERO,
        }
    }

    /// Options this sampler extracts with.
    #[must_use]
    pub fn options(&self) -> &OrbitalOptions {
        &self.options
    }

    /// Replace the options, keeping the pools.
    pub fn set_options(&mut self, options: &OrbitalOptions) {
        self.options = options.clone();
    }

    fn levels(&self) -> u32 {
        self.options.octree_level.clamp(1, MAX_OCTREE_LEVEL)
    }

    /// Extract the `±threshold` isosurfaces of `field` inside `bounds`,
    /// appending triangles to `out`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] before the first patch
    /// that would overflow `out`; patches appended before that stay.
    pub fn sample<F>(
        &mut self,
        field: &F,
        bounds: Aabb,
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError>
    where
        F: ScalarField + ?Sized,
    {
        let extent = bounds.extent();
        if !extent.is_finite() || extent.min_element() <= 0.0 {
            log::debug!("isosurface: degenerate bounds {bounds:?}, skipping");
            return Ok(());
        }

        let dims = self.top_level_dims(extent);
        let levels = self.levels();
        let top_step = 1_u32 << (levels - 1);

        self.origin = bounds.min;
        self.finest_unit = extent / dims.as_vec3() / top_step as f32;
        if self.pools.len() < levels as usize {
            self.pools.resize_with(levels as usize, Vec::new);
        }

        let top = Level {
            base: UVec3::ZERO,
            dims,
            step: top_step,
            depth: levels as usize - 1,
        };
        self.sample_level(field, top, out)
    }

    /// Top-level cell counts for a box of `extent`, at most
    /// [`MAX_TOP_LEVEL_CELLS`] per axis.
    fn top_level_dims(&self, extent: Vec3) -> UVec3 {
        let resolution = self.options.top_level_minimal_resolution;
        if !resolution.is_finite() || resolution <= 0.0 {
            return UVec3::ONE;
        }
        let cells = (extent / resolution).ceil();
        let limit = MAX_TOP_LEVEL_CELLS as f32;
        if cells.max_element() > limit {
            log::debug!(
                "isosurface: {cells} top-level cells at resolution \
                 {resolution}, clamping to {MAX_TOP_LEVEL_CELLS} per axis"
            );
        }
        cells.clamp(Vec3::ONE, Vec3::splat(limit)).as_uvec3()
    }

    /// World position of a finest-lattice coordinate.
    fn lattice_point(&self, coord: UVec3) -> Vec3 {
        self.origin + self.finest_unit * coord.as_vec3()
    }

    fn sample_level<F>(
        &mut self,
        field: &F,
        level: Level,
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError>
    where
        F: ScalarField + ?Sized,
    {
        let mut pool = std::mem::take(&mut self.pools[level.depth]);
        pool.clear();
        pool.reserve(level.sample_count());
        for k in 0..=level.dims.z {
            for j in 0..=level.dims.y {
                for i in 0..=level.dims.x {
                    let coord = level.base + UVec3::new(i, j, k) * level.step;
                    pool.push(field.value_at(self.lattice_point(coord)));
                }
            }
        }

        let result = self.visit_cells(field, level, &pool, out);
        self.pools[level.depth] = pool;
        result
    }

    fn visit_cells<F>(
        &mut self,
        field: &F,
        level: Level,
        pool: &[f32],
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError>
    where
        F: ScalarField + ?Sized,
    {
        let lobes = self.lobes();
        for k in 0..level.dims.z {
            for j in 0..level.dims.y {
                for i in 0..level.dims.x {
                    let cell = self.gather_cell(level, pool, i, j, k);
                    let (lo, hi) = cell.value_range();
                    let straddles =
                        |lobe: &Lobe| lo < lobe.iso && lobe.iso < hi;
                    if !lobes.iter().any(straddles) {
                        continue;
                    }

                    if level.depth == 0 {
                        for lobe in lobes.iter().filter(|&l| straddles(l)) {
                            lobe.append_patch(&cell, out)?;
                        }
                    } else {
                        let child = Level {
                            base: level.base
                                + UVec3::new(i, j, k) * level.step,
                            dims: UVec3::splat(2),
                            step: level.step / 2,
                            depth: level.depth - 1,
                        };
                        self.sample_level(field, child, out)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn lobes(&self) -> [Lobe; 2] {
        let threshold = self.options.isosurface_threshold;
        [
            Lobe {
                iso: threshold,
                color: self.options.positive_color,
                flip: false,
            },
            Lobe {
                iso: -threshold,
                color: self.options.negative_color,
                flip: true,
            },
        ]
    }

    fn gather_cell(
        &self,
        level: Level,
        pool: &[f32],
        i: u32,
        j: u32,
        k: u32,
    ) -> GridCell {
        let mut positions = [Vec3::ZERO; 8];
        let mut values = [0.0; 8];
        for (corner, [di, dj, dk]) in CORNER_OFFSETS.iter().enumerate() {
            let (ci, cj, ck) = (i + di, j + dj, k + dk);
            let coord = level.base + UVec3::new(ci, cj, ck) * level.step;
            positions[corner] = self.lattice_point(coord);
            values[corner] = pool[level.sample_index(ci, cj, ck)];
        }
        GridCell { positions, values }
    }

    /// Append the occupied-orbital lobes of `frame` to `out`.
    ///
    /// The sampled region is the atoms' bounding box padded by
    /// `bounding_box_additional_extension`.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] if `out` fills up.
    pub fn render_orbital(
        &mut self,
        frame: &Frame,
        out: &mut MeshBuffers,
    ) -> Result<(), OrbvizError> {
        if !self.options.enabled {
            return Ok(());
        }
        let Some(bounds) =
            Aabb::from_points(frame.atoms().iter().map(|a| a.position))
        else {
            log::debug!("isosurface: frame has no atoms, nothing to sample");
            return Ok(());
        };

        let unsupported = frame.unsupported_shell_count();
        if unsupported > 0 {
            log::warn!(
                "isosurface: {unsupported} shell(s) with unsupported angular \
                 momentum; affected regions will be missing"
            );
        }

        let bounds =
            bounds.padded(self.options.bounding_box_additional_extension);
        let before = out.triangle_count();
        let basis = frame.orbital_basis();
        self.sample(&basis, bounds, out)?;
        log::debug!(
            "isosurface: {} triangles over {:?}",
            out.triangle_count() - before,
            bounds.extent()
        );
        Ok(())
    }
}

/// Append the orbital lobes of `frame` using a one-off sampler.
///
/// # Errors
///
/// Returns [`OrbvizError::CapacityExceeded`] if `out` fills up.
pub fn render_orbital(
    frame: &Frame,
    options: &OrbitalOptions,
    out: &mut MeshBuffers,
) -> Result<(), OrbvizError> {
    IsosurfaceSampler::new(options).render_orbital(frame, out)
}
