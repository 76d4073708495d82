use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kernel::bonds::DEFAULT_CUTOFF_SCALE;

/// Bond detection and bond cylinder options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Bonds", inline)]
#[serde(default)]
pub struct BondOptions {
    /// Tolerance factor applied to the summed bond radii of an atom pair.
    #[schemars(
        title = "Cutoff Scale",
        range(min = 0.5, max = 2.5),
        extend("step" = 0.05)
    )]
    pub cutoff_scale: f32,
    /// Bond cylinder radius in angstroms.
    #[schemars(
        title = "Bond Radius",
        range(min = 0.05, max = 1.0),
        extend("step" = 0.01)
    )]
    pub bond_radius: f32,
}

impl Default for BondOptions {
    fn default() -> Self {
        Self {
            cutoff_scale: DEFAULT_CUTOFF_SCALE,
            bond_radius: 0.3,
        }
    }
}
