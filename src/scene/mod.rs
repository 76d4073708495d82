//! Playback scene: a trajectory, its clock, and the mesh of the visible
//! frame.
//!
//! The mesh is rebuilt only when the visible frame changes. A rebuild
//! either replaces the mesh wholesale or leaves the previous one in place.

mod mesh_gen;

pub use mesh_gen::{generate_frame_mesh, generate_frame_mesh_into};
use web_time::Instant;

use crate::error::OrbvizError;
use crate::molecule::Trajectory;
use crate::options::Options;
use crate::renderer::geometry::isosurface::IsosurfaceSampler;
use crate::renderer::geometry::mesh::{MeshBuffers, INDEX_CAPACITY};
use crate::util::trajectory::TrajectoryPlayer;

/// Trajectory plus the geometry of its currently visible frame.
#[derive(Debug)]
pub struct Scene {
    trajectory: Trajectory,
    player: TrajectoryPlayer,
    options: Options,
    sampler: IsosurfaceSampler,
    mesh: MeshBuffers,
    /// Vertex limit applied to each rebuild.
    mesh_capacity: usize,
    /// Bumped on every successful rebuild.
    mesh_generation: u64,
    /// Generation last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Scene over `trajectory`, with playback starting at `now`.
    #[must_use]
    pub fn new(trajectory: Trajectory, options: Options, now: Instant) -> Self {
        let player =
            TrajectoryPlayer::new(trajectory.len(), &options.playback, now);
        let sampler = IsosurfaceSampler::new(&options.orbital);
        Self {
            trajectory,
            player,
            options,
            sampler,
            mesh: MeshBuffers::new(),
            mesh_capacity: INDEX_CAPACITY,
            mesh_generation: 0,
            rendered_generation: 0,
        }
    }

    /// Advance the clock; rebuild the mesh if the visible frame changed.
    ///
    /// Returns `Ok(true)` when a new mesh is available.
    ///
    /// # Errors
    ///
    /// Propagates the rebuild error; the previous mesh stays current.
    pub fn update(&mut self, now: Instant) -> Result<bool, OrbvizError> {
        let Some(index) = self.player.tick(now) else {
            return Ok(false);
        };
        self.rebuild(index)?;
        Ok(true)
    }

    /// Rebuild the mesh of frame `index`.
    ///
    /// On failure the previous mesh and generation are kept.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::CapacityExceeded`] if the frame needs more
    /// vertices than the mesh capacity.
    pub fn rebuild(&mut self, index: usize) -> Result<(), OrbvizError> {
        let Some(frame) = self.trajectory.frame(index) else {
            log::debug!("scene: frame {index} out of range");
            return Ok(());
        };
        let buffers = MeshBuffers::with_capacity_limit(self.mesh_capacity);
        match generate_frame_mesh_into(
            frame,
            &self.options,
            &mut self.sampler,
            buffers,
        ) {
            Ok(mesh) => {
                self.mesh = mesh;
                self.mesh_generation += 1;
                Ok(())
            }
            Err(e) => {
                log::warn!("scene: frame {index} mesh rebuild failed: {e}");
                Err(e)
            }
        }
    }

    /// Replace the options. Playback settings apply immediately; geometry
    /// settings apply from the next rebuild, which is forced.
    pub fn set_options(&mut self, options: Options) {
        self.player
            .set_frame_interval(options.playback.frame_interval_secs);
        self.player.set_looping(options.playback.looping);
        self.options = options;
        self.player.invalidate();
    }

    /// Limit the vertex count of future rebuilds (clamped to the `u32`
    /// index range).
    pub fn set_mesh_capacity(&mut self, capacity: usize) {
        self.mesh_capacity = capacity.min(INDEX_CAPACITY);
    }

    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Mesh of the last successfully built frame.
    #[must_use]
    pub fn mesh(&self) -> &MeshBuffers {
        &self.mesh
    }

    /// Number of successful rebuilds so far.
    #[must_use]
    pub fn mesh_generation(&self) -> u64 {
        self.mesh_generation
    }

    /// Whether the mesh changed since the last [`Self::mark_rendered`].
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.mesh_generation != self.rendered_generation
    }

    /// Mark the current mesh as uploaded.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.mesh_generation;
    }

    /// The trajectory being played.
    #[must_use]
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Playback clock.
    #[must_use]
    pub fn player(&self) -> &TrajectoryPlayer {
        &self.player
    }

    /// Mutable playback clock (pause, looping).
    pub fn player_mut(&mut self) -> &mut TrajectoryPlayer {
        &mut self.player
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec3;
    use web_time::Duration;

    use super::*;
    use crate::molecule::{Atom, Frame};

    fn frame(offset: f32) -> Frame {
        Frame::from_atoms(vec![
            Atom::new(6, Vec3::new(offset, 0.0, 0.0)),
            Atom::new(8, Vec3::new(offset + 1.2, 0.0, 0.0)),
        ])
    }

    fn scene(frames: usize, now: Instant) -> Scene {
        let trajectory =
            Trajectory::new((0..frames).map(|i| frame(i as f32)).collect());
        Scene::new(trajectory, Options::default(), now)
    }

    #[test]
    fn rebuilds_only_on_frame_change() {
        let t0 = Instant::now();
        let mut scene = scene(3, t0);
        assert!(scene.update(t0).unwrap());
        assert_eq!(scene.mesh_generation(), 1);
        assert!(!scene.update(t0 + Duration::from_millis(40)).unwrap());
        assert_eq!(scene.mesh_generation(), 1);

        assert!(scene.update(t0 + Duration::from_millis(110)).unwrap());
        assert_eq!(scene.mesh_generation(), 2);
        let x = scene.mesh().vertices[0].position[0];
        assert!(x > 0.0);
    }

    #[test]
    fn dirty_tracking() {
        let t0 = Instant::now();
        let mut scene = scene(1, t0);
        assert!(!scene.is_dirty());
        let _ = scene.update(t0).unwrap();
        assert!(scene.is_dirty());
        scene.mark_rendered();
        assert!(!scene.is_dirty());
    }

    #[test]
    fn failed_rebuild_keeps_previous_mesh() {
        let t0 = Instant::now();
        let mut scene = scene(2, t0);
        scene.rebuild(0).unwrap();
        let before = scene.mesh().clone();

        scene.set_mesh_capacity(100);
        let err = scene.rebuild(1).unwrap_err();
        assert!(matches!(err, OrbvizError::CapacityExceeded { .. }));
        assert_eq!(scene.mesh(), &before);
        assert_eq!(scene.mesh_generation(), 1);

        // Out-of-range frames are a no-op
        scene.rebuild(7).unwrap();
        assert_eq!(scene.mesh_generation(), 1);
    }

    #[test]
    fn empty_trajectory_never_builds() {
        let t0 = Instant::now();
        let mut scene = scene(0, t0);
        assert!(!scene.update(t0).unwrap());
        assert!(scene.mesh().is_empty());
    }

    #[test]
    fn option_change_forces_rebuild() {
        let t0 = Instant::now();
        let mut scene = scene(1, t0);
        let _ = scene.update(t0).unwrap();
        let atoms_only = scene.mesh().vertex_count();

        let mut options = Options::default();
        options.bonds.cutoff_scale = 0.1;
        scene.set_options(options);
        assert!(scene.update(t0).unwrap());
        assert!(scene.mesh().vertex_count() < atoms_only);
    }
}
