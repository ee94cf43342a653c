//! Bevy plugins
//!
//! This module contains custom Bevy plugins that extend the engine's
//! functionality for the cover renderer.

pub mod cover_motion;
pub mod image_copy;

pub use cover_motion::CoverMotionPlugin;
pub use image_copy::ImageCopyPlugin;
