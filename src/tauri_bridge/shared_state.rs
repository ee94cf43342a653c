//! Shared state structures for communication between the host and Bevy
//!
//! This module defines thread-safe data structures that allow bidirectional
//! communication between the host surface (Tauri or a headless tool) and the
//! Bevy render backend.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

use crate::cover::CoverInput;
use crate::error::Result;

// =============================================================================
// Frame Buffer
// =============================================================================

/// One rendered frame as tightly packed RGBA8 (4 bytes per pixel)
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

/// Thread-safe latest-frame slot shared between Bevy and the host
#[derive(Clone, Default)]
pub struct SharedFrameBuffer(pub Arc<Mutex<Option<Frame>>>);

impl SharedFrameBuffer {
    pub fn publish(&self, frame: Frame) -> Result<()> {
        *self.0.lock()? = Some(frame);
        Ok(())
    }

    /// Copy of the latest frame, if one has been rendered
    pub fn latest(&self) -> Result<Option<Frame>> {
        Ok(self.0.lock()?.clone())
    }
}

/// Frame response containing Base64-encoded RGBA pixel data
#[derive(Serialize, Deserialize)]
pub struct FrameResponse {
    /// Base64-encoded RGBA pixel data (avoids slow JSON array serialization)
    pub data: String,
    pub width: u32,
    pub height: u32,
}

// =============================================================================
// Cover Input
// =============================================================================

/// Host events waiting for the next frame
///
/// The host appends, the renderer drains once per frame in arrival order.
#[derive(Clone, Default)]
pub struct SharedCoverInput(pub Arc<Mutex<Vec<CoverInput>>>);

impl SharedCoverInput {
    pub fn push(&self, input: CoverInput) -> Result<()> {
        self.0.lock()?.push(input);
        Ok(())
    }

    pub fn drain(&self) -> Result<Vec<CoverInput>> {
        Ok(std::mem::take(&mut *self.0.lock()?))
    }
}

// =============================================================================
// Performance Statistics
// =============================================================================

/// Performance statistics for debugging and monitoring
#[derive(Serialize, Deserialize, Clone, Default, Debug)]
pub struct PerformanceStats {
    // Backend (Bevy/Rust) timings
    pub gpu_transfer_ms: f64,
    pub data_processing_ms: f64,
    pub frame_encoding_ms: f64,
    pub bevy_fps: f64,
    pub frame_count: u32,
    pub data_size_kb: f64,
    // Host command timings
    pub tauri_get_frame_ms: f64,
    pub tauri_serialize_ms: f64,
}

/// Thread-safe performance statistics
#[derive(Clone, Default)]
pub struct SharedPerfStats(pub Arc<Mutex<PerformanceStats>>);

impl SharedPerfStats {
    pub fn snapshot(&self) -> Result<PerformanceStats> {
        Ok(self.0.lock()?.clone())
    }
}

// =============================================================================
// Bridge
// =============================================================================

/// Every handle the renderer shares with its host
#[derive(Clone, Default)]
pub struct BridgeHandles {
    pub frames: SharedFrameBuffer,
    pub input: SharedCoverInput,
    pub stats: SharedPerfStats,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drain_preserves_order_and_empties_queue() {
        let queue = SharedCoverInput::default();
        queue.push(CoverInput::PointerEnter).unwrap();
        queue.push(CoverInput::PointerMove { x: 1.0, y: 2.0 }).unwrap();
        queue.push(CoverInput::Click).unwrap();

        let drained = queue.drain().unwrap();
        assert_eq!(
            drained,
            vec![
                CoverInput::PointerEnter,
                CoverInput::PointerMove { x: 1.0, y: 2.0 },
                CoverInput::Click,
            ]
        );
        assert!(queue.drain().unwrap().is_empty());
    }

    #[test]
    fn latest_frame_replaces_previous() {
        let buffer = SharedFrameBuffer::default();
        assert_eq!(buffer.latest().unwrap(), None);

        buffer
            .publish(Frame { width: 1, height: 1, rgba: vec![0, 0, 0, 255] })
            .unwrap();
        buffer
            .publish(Frame { width: 1, height: 1, rgba: vec![255, 255, 255, 255] })
            .unwrap();

        let latest = buffer.latest().unwrap().unwrap();
        assert_eq!(latest.rgba, vec![255, 255, 255, 255]);
    }
}
