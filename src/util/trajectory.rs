//! Trajectory playback clock.
//!
//! Maps wall-clock time onto a frame index so that geometry is rebuilt only
//! when the visible frame actually changes.

use web_time::{Duration, Instant};

use crate::options::PlaybackOptions;

/// Shortest accepted frame interval.
const MIN_FRAME_INTERVAL: Duration = Duration::from_millis(1);

/// Frame sequencer driven by elapsed time since playback started.
#[derive(Debug, Clone)]
pub struct TrajectoryPlayer {
    frame_count: usize,
    start: Instant,
    frame_interval: Duration,
    looping: bool,
    /// Elapsed time frozen at the moment playback was paused.
    paused_at: Option<Duration>,
    last_frame_rendered: Option<usize>,
}

impl TrajectoryPlayer {
    /// Player over `frame_count` frames, started at `now`.
    #[must_use]
    pub fn new(
        frame_count: usize,
        options: &PlaybackOptions,
        now: Instant,
    ) -> Self {
        let mut player = Self {
            frame_count,
            start: now,
            frame_interval: MIN_FRAME_INTERVAL,
            looping: options.looping,
            paused_at: None,
            last_frame_rendered: None,
        };
        player.set_frame_interval(options.frame_interval_secs);
        player
    }

    /// Frame visible at `now`, or `None` for an empty trajectory.
    #[must_use]
    pub fn frame_at(&self, now: Instant) -> Option<usize> {
        if self.frame_count == 0 {
            return None;
        }
        let elapsed = self
            .paused_at
            .unwrap_or_else(|| now.saturating_duration_since(self.start));
        let step = (elapsed.as_nanos() / self.frame_interval.as_nanos())
            .min(usize::MAX as u128) as usize;
        Some(if self.looping {
            step % self.frame_count
        } else {
            step.min(self.frame_count - 1)
        })
    }

    /// Return the frame to render if it differs from the last one returned.
    pub fn tick(&mut self, now: Instant) -> Option<usize> {
        let frame = self.frame_at(now)?;
        if self.last_frame_rendered == Some(frame) {
            return None;
        }
        self.last_frame_rendered = Some(frame);
        Some(frame)
    }

    /// Pause or resume. Resuming continues from the paused frame.
    pub fn toggle_playback(&mut self, now: Instant) {
        match self.paused_at.take() {
            Some(elapsed) => {
                self.start = now.checked_sub(elapsed).unwrap_or(now);
            }
            None => {
                self.paused_at = Some(now.saturating_duration_since(self.start));
            }
        }
    }

    /// Seconds per frame (clamped to at least one millisecond).
    pub fn set_frame_interval(&mut self, secs: f32) {
        let secs = if secs.is_finite() { secs.max(0.0) } else { 0.0 };
        let micros = (f64::from(secs) * 1e6).round() as u64;
        self.frame_interval =
            Duration::from_micros(micros).max(MIN_FRAME_INTERVAL);
    }

    /// Enable or disable looping at the end of the trajectory.
    pub fn set_looping(&mut self, looping: bool) {
        self.looping = looping;
    }

    /// Forget the last rendered frame so the next tick fires again.
    pub fn invalidate(&mut self) {
        self.last_frame_rendered = None;
    }

    /// Index of the frame last returned by [`Self::tick`].
    #[must_use]
    pub fn last_frame_rendered(&self) -> Option<usize> {
        self.last_frame_rendered
    }

    /// Total number of frames.
    #[must_use]
    pub fn total_frames(&self) -> usize {
        self.frame_count
    }

    /// Whether the clock is advancing.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.paused_at.is_none()
    }
}
