//! Rust Universe cover: an interactive 3D book cover
//!
//! A lit, six-faced book floats in an offscreen Bevy scene, leans towards the
//! pointer while hovered and flips over on click. The host (a Tauri web view,
//! or a headless tool) feeds pointer events in and receives rendered frames.
//!
//! Architecture:
//! - Bevy runs in a background thread with NO window (true headless mode)
//! - GPU texture -> Buffer -> CPU channel -> host frame buffer
//! - Host events are queued and applied at the start of the next frame
//! - Frames reach the web view via a custom protocol (JPEG) or Base64 RGBA
//!
//! # Module Structure
//!
//! - `config`: Configuration constants and settings
//! - `cover`: Renderer-independent motion model (smoothing, float, flip)
//! - `engine`: Bevy engine integration
//!   - `components`: ECS components
//!   - `resources`: Global resources
//!   - `plugins`: Cover motion and GPU readback plugins
//!   - `systems`: Scene, input, animation, viewport and frame systems
//!   - `app`: Application setup and render thread ownership
//! - `tauri_bridge`: Bridge layer between the host and Bevy
//!   - `shared_state`: Thread-safe data structures
//!   - `encoding`: Frame encoding
//!   - `commands`: Tauri command handlers (`desktop` feature)
//!   - `protocol`: Custom protocol handlers (`desktop` feature)

#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

pub mod config;
pub mod cover;
pub mod engine;
pub mod error;
pub mod tauri_bridge;

pub use config::CoverSettings;
pub use cover::{CoverInput, CoverState, Viewport};
pub use engine::{CoverRenderer, FrameClock};
pub use error::CoverError;
pub use tauri_bridge::BridgeHandles;

/// Main entry point for the Tauri application
#[cfg(feature = "desktop")]
#[cfg_attr(mobile, tauri::mobile_entry_point)]
pub fn run() {
    let bridge = BridgeHandles::default();

    // Start Bevy in background thread; keeps rendering until the process exits
    let _renderer = CoverRenderer::start(CoverSettings::default(), bridge.clone());

    // Clone for the custom protocol handler
    let protocol_buffer = bridge.frames.clone();
    let protocol_perf_stats = bridge.stats.clone();

    // Build and run Tauri application
    let result = tauri::Builder::default()
        .plugin(tauri_plugin_opener::init())
        .manage(bridge.frames)
        .manage(bridge.stats)
        .manage(bridge.input)
        // Register custom protocol "frame://" for direct binary transfer
        // This bypasses Tauri IPC JSON serialization completely!
        .register_asynchronous_uri_scheme_protocol("frame", move |_ctx, request, responder| {
            let buffer = protocol_buffer.clone();
            let perf_stats = protocol_perf_stats.clone();

            // Handle the request in a separate thread to avoid blocking
            std::thread::spawn(move || {
                // For Tauri v2, URL format is: http://frame.localhost/path
                let response = tauri_bridge::protocol::handle_frame_protocol(
                    request.uri().path(),
                    &buffer,
                    &perf_stats,
                );
                responder.respond(response);
            });
        })
        .invoke_handler(tauri::generate_handler![
            tauri_bridge::commands::get_frame,
            tauri_bridge::commands::get_render_size,
            tauri_bridge::commands::get_performance_stats,
            tauri_bridge::commands::pointer_enter,
            tauri_bridge::commands::pointer_leave,
            tauri_bridge::commands::pointer_move,
            tauri_bridge::commands::cover_click,
            tauri_bridge::commands::resize_viewport,
        ])
        .run(tauri::generate_context!());

    if let Err(e) = result {
        bevy::log::error!("Tauri error: {e}");
    }
}
