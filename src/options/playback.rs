use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Trajectory playback options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Playback", inline)]
#[serde(default)]
pub struct PlaybackOptions {
    /// Seconds each trajectory frame stays on screen.
    #[schemars(
        title = "Frame Interval",
        range(min = 0.01, max = 2.0),
        extend("step" = 0.01)
    )]
    pub frame_interval_secs: f32,
    /// Restart from the first frame after the last one.
    #[schemars(title = "Loop")]
    pub looping: bool,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            frame_interval_secs: 0.1,
            looping: true,
        }
    }
}
