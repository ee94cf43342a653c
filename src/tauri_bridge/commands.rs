//! Tauri command handlers
//!
//! This module contains all the Tauri command functions that can be invoked
//! from the frontend JavaScript code. Pointer commands only queue events;
//! the render thread applies them at the start of its next frame.

use base64::{engine::general_purpose::STANDARD, Engine};
use tauri::State;

use super::shared_state::{
    FrameResponse, PerformanceStats, SharedCoverInput, SharedFrameBuffer, SharedPerfStats,
};
use crate::cover::CoverInput;
use crate::error::CoverError;

fn queue(state: &SharedCoverInput, input: CoverInput) -> Result<(), String> {
    state.push(input).map_err(|e| e.to_string())
}

/// Get the current rendered frame as Base64-encoded RGBA data
#[tauri::command]
pub fn get_frame(
    state: State<SharedFrameBuffer>,
    perf_state: State<SharedPerfStats>,
) -> Result<FrameResponse, String> {
    let cmd_start = std::time::Instant::now();

    let frame = state
        .latest()
        .and_then(|frame| frame.ok_or(CoverError::NoFrame))
        .map_err(|e| e.to_string())?;
    let data_fetch_time = cmd_start.elapsed().as_secs_f64() * 1000.0;

    // Measure Base64 encoding time
    let encode_start = std::time::Instant::now();
    let base64_data = STANDARD.encode(&frame.rgba);
    let encode_time = encode_start.elapsed().as_secs_f64() * 1000.0;

    // Update perf stats
    if let Ok(mut stats) = perf_state.0.lock() {
        stats.tauri_get_frame_ms = data_fetch_time;
        stats.tauri_serialize_ms = encode_time;
    }

    Ok(FrameResponse {
        data: base64_data,
        width: frame.width,
        height: frame.height,
    })
}

/// Get the size of the latest rendered frame
#[tauri::command]
pub fn get_render_size(state: State<SharedFrameBuffer>) -> Result<(u32, u32), String> {
    match state.latest().map_err(|e| e.to_string())? {
        Some(frame) => Ok((frame.width, frame.height)),
        None => Err(CoverError::NoFrame.to_string()),
    }
}

/// Get performance statistics
#[tauri::command]
pub fn get_performance_stats(state: State<SharedPerfStats>) -> Result<PerformanceStats, String> {
    state.snapshot().map_err(|e| e.to_string())
}

#[tauri::command]
pub fn pointer_enter(state: State<SharedCoverInput>) -> Result<(), String> {
    queue(&state, CoverInput::PointerEnter)
}

#[tauri::command]
pub fn pointer_leave(state: State<SharedCoverInput>) -> Result<(), String> {
    queue(&state, CoverInput::PointerLeave)
}

/// Pointer position in container pixels
#[tauri::command]
pub fn pointer_move(state: State<SharedCoverInput>, x: f32, y: f32) -> Result<(), String> {
    queue(&state, CoverInput::PointerMove { x, y })
}

#[tauri::command]
pub fn cover_click(state: State<SharedCoverInput>) -> Result<(), String> {
    queue(&state, CoverInput::Click)
}

#[tauri::command]
pub fn resize_viewport(
    state: State<SharedCoverInput>,
    width: u32,
    height: u32,
) -> Result<(), String> {
    queue(&state, CoverInput::Resize { width, height })
}
