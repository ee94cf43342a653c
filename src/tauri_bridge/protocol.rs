//! Custom protocol handlers for efficient data transfer
//!
//! This module implements the `frame://` custom protocol for direct binary
//! transfer of render frames, bypassing Tauri's IPC JSON serialization.

use bevy::log::warn;
use tauri::http::{Response as HttpResponse, StatusCode};

use super::encoding::encode_jpeg;
use super::shared_state::{Frame, SharedFrameBuffer, SharedPerfStats};
use crate::config::compression::JPEG_QUALITY;

type Response = HttpResponse<Vec<u8>>;

/// Handle requests to the custom `frame://` protocol
///
/// Supported endpoints:
/// - `frame` or `frame.jpg`: JPEG-compressed frame
/// - `frame.raw`: Raw RGBA frame
/// - `stats`: Performance statistics as JSON
pub fn handle_frame_protocol(
    uri_path: &str,
    buffer: &SharedFrameBuffer,
    perf_stats: &SharedPerfStats,
) -> Response {
    match uri_path.trim_start_matches('/') {
        "frame" | "frame.jpg" => with_frame(buffer, handle_jpeg_frame),
        "frame.raw" => with_frame(buffer, handle_raw_frame),
        "stats" => handle_stats(perf_stats),
        _ => text(StatusCode::NOT_FOUND, "Not Found"),
    }
}

fn with_frame(buffer: &SharedFrameBuffer, handler: fn(Frame) -> Response) -> Response {
    match buffer.latest() {
        Ok(Some(frame)) => handler(frame),
        Ok(None) => text(StatusCode::SERVICE_UNAVAILABLE, "Frame not ready"),
        Err(e) => text(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn handle_jpeg_frame(frame: Frame) -> Response {
    match encode_jpeg(&frame, JPEG_QUALITY) {
        Ok(jpeg) => frame_response("image/jpeg", frame.width, frame.height, jpeg),
        Err(e) => {
            warn!("JPEG encoding failed: {e}");
            text(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string())
        }
    }
}

fn handle_raw_frame(frame: Frame) -> Response {
    frame_response(
        "application/octet-stream",
        frame.width,
        frame.height,
        frame.rgba,
    )
}

fn handle_stats(perf_stats: &SharedPerfStats) -> Response {
    match perf_stats.snapshot() {
        Ok(stats) => {
            let json = serde_json::to_vec(&stats).unwrap_or_default();
            build(
                HttpResponse::builder()
                    .status(StatusCode::OK)
                    .header("Content-Type", "application/json")
                    .header("Access-Control-Allow-Origin", "*"),
                json,
            )
        }
        Err(e) => text(StatusCode::INTERNAL_SERVER_ERROR, &e.to_string()),
    }
}

fn frame_response(content_type: &str, width: u32, height: u32, body: Vec<u8>) -> Response {
    build(
        HttpResponse::builder()
            .status(StatusCode::OK)
            .header("Content-Type", content_type)
            .header("X-Frame-Width", width.to_string())
            .header("X-Frame-Height", height.to_string())
            .header("Access-Control-Allow-Origin", "*")
            .header(
                "Access-Control-Expose-Headers",
                "X-Frame-Width, X-Frame-Height",
            ),
        body,
    )
}

fn text(status: StatusCode, message: &str) -> Response {
    build(
        HttpResponse::builder()
            .status(status)
            .header("Content-Type", "text/plain"),
        message.as_bytes().to_vec(),
    )
}

fn build(builder: tauri::http::response::Builder, body: Vec<u8>) -> Response {
    builder.body(body).unwrap_or_else(|e| {
        warn!("Invalid protocol response: {e}");
        let mut response = HttpResponse::new(Vec::new());
        *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
        response
    })
}
