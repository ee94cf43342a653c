//! Configuration constants and settings for the cover renderer
//!
//! This module contains all tunable parameters: the motion model, the flip
//! animation, the book geometry and palette, the stage (camera), frame rates
//! and compression. Runtime input is limited to [`CoverSettings`].

use serde::{Deserialize, Serialize};

/// Default width of the cover container in pixels
pub const DEFAULT_WIDTH: u32 = 400;

/// Default height of the cover container in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// Target frames per second for the Bevy render loop
pub const TARGET_FPS: f64 = 60.0;

/// Number of pre-roll frames to skip before starting output
/// This allows the scene to fully load and stabilize
pub const PRE_ROLL_FRAMES: u32 = 30;

/// Initialization input for the cover renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverSettings {
    /// Container width in pixels
    pub width: u32,
    /// Container height in pixels
    pub height: u32,
    /// Cover texture, relative to [`assets::ASSET_DIR`]
    pub texture: String,
}

impl Default for CoverSettings {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            texture: assets::COVER_TEXTURE.to_string(),
        }
    }
}

/// Pointer-driven motion settings
pub mod motion {
    /// Fraction of the remaining gap closed every frame
    pub const SMOOTHING_FACTOR: f32 = 0.1;

    /// Amplitude of the idle floating motion (scene units)
    pub const FLOAT_AMPLITUDE: f32 = 0.05;

    /// Angular speed of the idle floating motion (radians per second)
    pub const FLOAT_SPEED: f32 = 0.6;

    /// Target yaw per unit of normalized pointer x
    pub const YAW_GAIN: f32 = 0.5;

    /// Target pitch per unit of normalized pointer y
    pub const PITCH_GAIN: f32 = 0.3;

    /// Target roll per unit of normalized pointer x
    pub const ROLL_GAIN: f32 = 0.05;

    /// Resting orientation
    pub const REST_PITCH: f32 = 0.1;
    pub const REST_YAW: f32 = -0.3;
    pub const REST_ROLL: f32 = 0.02;
}

/// Flip animation settings
pub mod flip {
    use std::time::Duration;

    /// Length of one flip
    pub const DURATION: Duration = Duration::from_millis(1000);

    /// Peak of the roll wobble applied mid-flip (radians)
    pub const WOBBLE_AMPLITUDE: f32 = 0.1;

    /// Yaw a flip turns to when it starts from a front-facing (negative) yaw
    pub const FULL_TURN_YAW: f32 = 2.0 * std::f32::consts::PI;
}

/// Book geometry and palette
pub mod book {
    /// Cover width (scene units)
    pub const WIDTH: f32 = 2.0;

    /// Cover height (scene units)
    pub const HEIGHT: f32 = 3.0;

    /// Spine thickness (scene units)
    pub const DEPTH: f32 = 0.4;

    /// Front face colour until the cover texture is installed (sRGB)
    pub const FRONT_COLOR: [f32; 3] = [0.72, 0.25, 0.08];

    /// Back cover colour (sRGB)
    pub const BACK_COLOR: [f32; 3] = [0.55, 0.18, 0.06];

    /// Spine colour (sRGB)
    pub const SPINE_COLOR: [f32; 3] = [0.42, 0.13, 0.04];

    /// Page edge colour (sRGB)
    pub const PAGE_COLOR: [f32; 3] = [0.96, 0.94, 0.88];
}

/// Camera and floor placement
pub mod stage {
    /// Vertical field of view (degrees)
    pub const FOV_DEGREES: f32 = 45.0;

    /// Camera distance along +Z
    pub const CAMERA_DISTANCE: f32 = 6.0;

    /// Height of the shadow plane below the book centre
    pub const FLOOR_Y: f32 = -1.9;

    /// Side length of the shadow plane
    pub const FLOOR_SIZE: f32 = 8.0;

    /// Background clear colour (sRGB)
    pub const CLEAR_COLOR: [f32; 3] = [0.05, 0.08, 0.12];
}

/// Asset locations
pub mod assets {
    /// Directory the asset server reads from
    pub const ASSET_DIR: &str = "assets";

    /// Default cover texture
    pub const COVER_TEXTURE: &str = "cover.png";
}

/// Performance monitoring settings
pub mod performance {
    /// Interval for printing performance stats (seconds)
    pub const STATS_PRINT_INTERVAL: f64 = 2.0;

    /// Number of frame timing samples to keep for averaging
    pub const FRAME_TIMING_SAMPLES: usize = 60;
}

/// Image compression settings
pub mod compression {
    /// JPEG quality level (0-100, higher = better quality but larger size)
    pub const JPEG_QUALITY: u8 = 85;
}
