//! Book orientation and exponential smoothing

use crate::config::motion::*;

/// Orientation of the book in radians (applied in XYZ order)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation {
    /// Rotation around X
    pub pitch: f32,
    /// Rotation around Y
    pub yaw: f32,
    /// Rotation around Z
    pub roll: f32,
}

impl Rotation {
    /// Orientation the book returns to when nobody is hovering it
    pub const REST: Rotation = Rotation {
        pitch: REST_PITCH,
        yaw: REST_YAW,
        roll: REST_ROLL,
    };

    pub const fn new(pitch: f32, yaw: f32, roll: f32) -> Self {
        Self { pitch, yaw, roll }
    }

    /// Target orientation for a pointer at normalized `(x, y)` in `[-1, 1]`
    pub fn from_pointer(x: f32, y: f32) -> Self {
        Self {
            pitch: y * PITCH_GAIN,
            yaw: x * YAW_GAIN,
            roll: x * ROLL_GAIN,
        }
    }

    /// Close `factor` of the gap to `target` on every axis
    pub fn smooth_towards(&mut self, target: Rotation, factor: f32) {
        self.pitch += (target.pitch - self.pitch) * factor;
        self.yaw += (target.yaw - self.yaw) * factor;
        self.roll += (target.roll - self.roll) * factor;
    }

    /// Largest per-axis distance to `other`
    pub fn max_gap(&self, other: Rotation) -> f32 {
        (self.pitch - other.pitch)
            .abs()
            .max((self.yaw - other.yaw).abs())
            .max((self.roll - other.roll).abs())
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::REST
    }
}
