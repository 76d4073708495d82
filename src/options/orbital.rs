use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Molecular orbital isosurface options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Orbital", inline)]
#[serde(default)]
pub struct OrbitalOptions {
    /// Extract the orbital isosurface at all.
    #[schemars(title = "Show Orbital")]
    pub enabled: bool,
    /// Number of grid levels, including the top-level grid. 1 disables
    /// refinement.
    #[schemars(title = "Octree Levels", range(min = 1, max = 8))]
    pub octree_level: u32,
    /// Absolute isovalue; lobes are extracted at `+threshold` and
    /// `-threshold`.
    #[schemars(
        title = "Isovalue",
        range(min = 0.005, max = 0.5),
        extend("step" = 0.005)
    )]
    pub isosurface_threshold: f32,
    /// Padding added around the atoms' bounding box, in angstroms.
    #[schemars(skip)]
    pub bounding_box_additional_extension: f32,
    /// Largest allowed top-level cell edge, in angstroms. Must be finite
    /// and positive; the top grid is capped at
    /// [`MAX_TOP_LEVEL_CELLS`](crate::renderer::geometry::isosurface::MAX_TOP_LEVEL_CELLS)
    /// cells per axis whatever the value.
    #[schemars(skip)]
    pub top_level_minimal_resolution: f32,
    /// RGB color of the positive lobe.
    #[schemars(skip)]
    pub positive_color: [f32; 3],
    /// RGB color of the negative lobe.
    #[schemars(skip)]
    pub negative_color: [f32; 3],
}

impl Default for OrbitalOptions {
    fn default() -> Self {
        Self {
            enabled: true,
            octree_level: 3,
            isosurface_threshold: 0.08,
            bounding_box_additional_extension: 3.0,
            top_level_minimal_resolution: 0.5,
            positive_color: [1.0, 0.0, 0.0],
            negative_color: [0.0, 0.0, 1.0],
        }
    }
}
