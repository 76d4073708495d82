//! Centralized geometry/playback options with TOML preset support.
//!
//! All tweakable settings (bond detection, orbital isosurface extraction,
//! trajectory playback) are consolidated here. Options serialize to/from
//! TOML so presets can live next to a trajectory.

mod bonds;
mod orbital;
mod playback;

use std::path::Path;

pub use bonds::BondOptions;
pub use orbital::OrbitalOptions;
pub use playback::PlaybackOptions;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::OrbvizError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[orbital]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Bond detection and bond cylinder parameters.
    pub bonds: BondOptions,
    /// Orbital isosurface parameters.
    pub orbital: OrbitalOptions,
    /// Trajectory playback parameters.
    pub playback: PlaybackOptions,
}

impl Options {
    /// Generate JSON Schema describing the UI-exposed options.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::Io`] if the file cannot be read, or
    /// [`OrbvizError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, OrbvizError> {
        let content = std::fs::read_to_string(path).map_err(OrbvizError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from a TOML string. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::OptionsParse`] on malformed TOML or a
    /// non-positive `top_level_minimal_resolution`.
    pub fn from_toml(content: &str) -> Result<Self, OrbvizError> {
        let options: Self = toml::from_str(content)
            .map_err(|e| OrbvizError::OptionsParse(e.to_string()))?;
        let resolution = options.orbital.top_level_minimal_resolution;
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(OrbvizError::OptionsParse(format!(
                "orbital.top_level_minimal_resolution must be positive, \
                 got {resolution}"
            )));
        }
        Ok(options)
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`OrbvizError::Io`] if the file or its parent directory
    /// cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), OrbvizError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| OrbvizError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(OrbvizError::Io)?;
        }
        std::fs::write(path, content).map_err(OrbvizError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::geometry::isosurface::MAX_OCTREE_LEVEL;

    #[test]
    fn default_round_trips_through_toml() {
        let opts = Options::default();
        let toml_str = toml::to_string_pretty(&opts).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();
        assert_eq!(opts, parsed);
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let toml_str = r"
[orbital]
octree_level = 1
";
        let opts = Options::from_toml(toml_str).unwrap();
        assert_eq!(opts.orbital.octree_level, 1);
        // Everything else should be default
        assert_eq!(opts.orbital.isosurface_threshold, 0.08);
        assert_eq!(opts.bonds.cutoff_scale, 1.3);
        assert_eq!(opts.playback.frame_interval_secs, 0.1);
    }

    #[test]
    fn malformed_toml_is_an_options_error() {
        let err = Options::from_toml("[orbital\noctree_level = ").unwrap_err();
        assert!(matches!(err, OrbvizError::OptionsParse(_)));
    }

    #[test]
    fn non_positive_resolution_is_rejected() {
        for value in ["0.0", "-0.5", "nan", "inf"] {
            let toml_str =
                format!("[orbital]\ntop_level_minimal_resolution = {value}\n");
            let err = Options::from_toml(&toml_str).unwrap_err();
            assert!(matches!(err, OrbvizError::OptionsParse(_)));
        }
        let ok = Options::from_toml(
            "[orbital]\ntop_level_minimal_resolution = 1e-30\n",
        )
        .unwrap();
        assert_eq!(ok.orbital.top_level_minimal_resolution, 1e-30);
    }

    #[test]
    fn save_then_load_preserves_values() {
        let dir = std::env::temp_dir()
            .join(format!("orbviz-options-{}", std::process::id()));
        let path = dir.join("presets").join("wide.toml");

        let mut opts = Options::default();
        opts.orbital.bounding_box_additional_extension = 5.0;
        opts.bonds.bond_radius = 0.2;
        opts.save(&path).unwrap();

        let loaded = Options::load(&path).unwrap();
        assert_eq!(loaded, opts);
        assert_eq!(
            Options::list_presets(&dir.join("presets")),
            vec!["wide".to_owned()]
        );

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn schema_has_expected_properties() {
        let schema_value =
            serde_json::to_value(Options::json_schema()).unwrap();
        let props = schema_value["properties"].as_object().unwrap();

        assert!(props.contains_key("bonds"));
        assert!(props.contains_key("orbital"));
        assert!(props.contains_key("playback"));

        // Orbital should expose its tunables but not the colors
        let orbital = &props["orbital"]["properties"];
        assert!(orbital.get("octree_level").is_some());
        assert!(orbital.get("isosurface_threshold").is_some());
        assert!(orbital.get("positive_color").is_none());

        // Advertised level range matches what the sampler accepts
        let levels = &orbital["octree_level"];
        assert_eq!(levels["minimum"], 1);
        assert_eq!(levels["maximum"], MAX_OCTREE_LEVEL);
    }
}
