//! Click-triggered flip animation

use std::f32::consts::PI;
use std::time::Duration;

use crate::config::{flip::*, motion::REST_YAW};

/// Cubic ease-in-out over `[0, 1]`
pub fn ease_in_out_cubic(t: f32) -> f32 {
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
    }
}

/// A single in-flight flip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipAnimation {
    pub started_at: Duration,
    pub start_yaw: f32,
    pub target_yaw: f32,
}

/// Where the flip stands at a given instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlipSample {
    /// Linear progress, clamped to `[0, 1]`
    pub progress: f32,
    pub yaw: f32,
    /// Transient roll added on top of the smoothed roll
    pub wobble: f32,
}

impl FlipSample {
    pub fn finished(&self) -> bool {
        self.progress >= 1.0
    }
}

impl FlipAnimation {
    /// Start a flip from `yaw`. A front-facing (negative) yaw spins a full
    /// turn, anything else returns to the resting yaw.
    pub fn begin(now: Duration, yaw: f32) -> Self {
        let target_yaw = if yaw < 0.0 { FULL_TURN_YAW } else { REST_YAW };
        Self {
            started_at: now,
            start_yaw: yaw,
            target_yaw,
        }
    }

    pub fn progress(&self, now: Duration) -> f32 {
        let elapsed = now.saturating_sub(self.started_at);
        (elapsed.as_secs_f32() / DURATION.as_secs_f32()).min(1.0)
    }

    pub fn sample(&self, now: Duration) -> FlipSample {
        let progress = self.progress(now);
        let t = ease_in_out_cubic(progress);
        let wobble = if progress >= 1.0 {
            0.0
        } else {
            (progress * PI).sin() * WOBBLE_AMPLITUDE
        };

        FlipSample {
            progress,
            yaw: self.start_yaw + (self.target_yaw - self.start_yaw) * t,
            wobble,
        }
    }
}
