//! Bridge layer between the host and Bevy
//!
//! This module handles all communication between the host surface and the
//! Bevy rendering backend: shared state and frame encoding are always
//! available, Tauri command handlers and the custom protocol come with the
//! `desktop` feature.

pub mod encoding;
pub mod shared_state;

#[cfg(feature = "desktop")]
pub mod commands;
#[cfg(feature = "desktop")]
pub mod protocol;

// Re-export commonly used types
pub use shared_state::{
    BridgeHandles, Frame, SharedCoverInput, SharedFrameBuffer, SharedPerfStats,
};
