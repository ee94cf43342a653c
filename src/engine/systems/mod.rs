//! Bevy systems
//!
//! This module contains all the systems that operate on the cover scene's
//! entities and resources in the Bevy ECS.

pub mod animation;
pub mod frame_extraction;
pub mod input;
pub mod lifecycle;
pub mod scene;
pub mod texture;
pub mod viewport;

pub use animation::animate_cover;
pub use frame_extraction::extract_and_process_frame;
pub use input::apply_cover_input;
pub use lifecycle::exit_on_shutdown;
pub use scene::{setup_render_target, spawn_cover_scene};
pub use texture::install_cover_texture;
pub use viewport::{apply_viewport_to_camera, resize_render_target};
