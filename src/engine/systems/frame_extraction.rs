//! Frame extraction system
//!
//! This module handles extracting rendered frames from the GPU and
//! publishing them to the host.

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};

use crate::config::performance::*;
use crate::engine::resources::{
    FrameBufferRes, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes, PreRollFrames,
    PublishedFrames, RenderTargetHandle,
};
use crate::tauri_bridge::Frame;

/// Extract and process frame data from the render pipeline
#[allow(clippy::too_many_arguments)]
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    target: Option<Res<RenderTargetHandle>>,
    images: Res<Assets<Image>>,
    mut count: ResMut<PublishedFrames>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(b) = buffer else { return };

    // Wait for scene to be fully rendered
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    // Frame rate limiting - skip if not enough time has passed
    let now = std::time::Instant::now();
    let elapsed = now.duration_since(frame_limiter.last_frame_time);
    if elapsed < frame_limiter.min_frame_interval {
        // Drain the receiver but don't process - too early for next frame
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    let frame_start = std::time::Instant::now();

    // Keep only the latest frame from the render world
    let receive_start = std::time::Instant::now();
    let mut image_data = Vec::new();
    while let Ok(data) = receiver.try_recv() {
        image_data = data;
    }
    let receive_time = receive_start.elapsed().as_secs_f64() * 1000.0;

    if image_data.is_empty() {
        return;
    }

    let process_start = std::time::Instant::now();
    // Oversized viewports render into a smaller target
    let Some(target_image) = target.as_ref().and_then(|t| images.get(&t.0)) else {
        return;
    };
    let (width, height) = (target_image.width(), target_image.height());
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(width as usize * 4);
    let Some(rgba) = remove_row_padding(&image_data, width, height, aligned_row_bytes) else {
        // Frames already in flight during a resize have the old size
        debug!(
            "Dropping {} byte frame that does not fit {}x{}",
            image_data.len(),
            width,
            height
        );
        return;
    };
    let process_time = process_start.elapsed().as_secs_f64() * 1000.0;
    let data_size = rgba.len();

    if let Err(e) = b.0.publish(Frame { width, height, rgba }) {
        warn!("Failed to publish frame: {e}");
        return;
    }
    count.0 += 1;

    let total_time = frame_start.elapsed().as_secs_f64() * 1000.0;
    timings.frame_times.push(total_time);

    // Keep only last N samples for averaging
    if timings.frame_times.len() > FRAME_TIMING_SAMPLES {
        timings.frame_times.remove(0);
    }
    let avg_time = timings.frame_times.iter().sum::<f64>() / timings.frame_times.len() as f64;

    // Update performance stats
    if let Some(perf_res) = &perf_stats {
        if let Ok(mut stats) = perf_res.0 .0.lock() {
            stats.gpu_transfer_ms = receive_time;
            stats.data_processing_ms = process_time;
            stats.frame_encoding_ms = total_time;
            stats.frame_count = count.0;
            stats.data_size_kb = data_size as f64 / 1024.0;
            stats.bevy_fps = if avg_time > 0.0 { 1000.0 / avg_time } else { 0.0 };
        }
    }

    // Print detailed stats periodically
    let current_time = time.elapsed_secs_f64();
    if current_time - timings.last_print_time >= STATS_PRINT_INTERVAL {
        let max_time = timings.frame_times.iter().cloned().fold(0.0f64, f64::max);
        let min_time = timings.frame_times.iter().cloned().fold(f64::MAX, f64::min);

        info!(
            "Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Total: {:.2}ms | Avg: {:.2}ms (Min: {:.2}ms, Max: {:.2}ms) | Size: {:.1}KB",
            count.0,
            receive_time,
            process_time,
            total_time,
            avg_time,
            min_time,
            max_time,
            data_size as f64 / 1024.0
        );
        timings.last_print_time = current_time;
    }
}

/// Remove GPU buffer row padding, returning tightly packed RGBA data
///
/// Returns `None` unless `data` is exactly `height` rows of `aligned_row_bytes`.
pub fn remove_row_padding(
    data: &[u8],
    width: u32,
    height: u32,
    aligned_row_bytes: usize,
) -> Option<Vec<u8>> {
    let row_bytes = width as usize * 4;
    if data.is_empty() || aligned_row_bytes < row_bytes {
        return None;
    }

    if data.len() != aligned_row_bytes * height as usize {
        return None;
    }

    let rgba_data = if row_bytes == aligned_row_bytes {
        data.to_vec()
    } else {
        data.chunks(aligned_row_bytes)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes])
            .cloned()
            .collect()
    };

    Some(rgba_data)
}
