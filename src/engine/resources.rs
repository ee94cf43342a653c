//! Bevy resource definitions
//!
//! This module contains all global resources used by Bevy systems.
//! Resources are singleton data that can be accessed by any system.

use bevy::prelude::*;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;

use crate::cover::{CoverState, Viewport};
use crate::tauri_bridge::shared_state::{SharedCoverInput, SharedFrameBuffer, SharedPerfStats};

// =============================================================================
// Cover Motion
// =============================================================================

/// Motion state of the book
#[derive(Resource, Default, Deref, DerefMut)]
pub struct CoverStateRes(pub CoverState);

/// Current size of the container the cover is rendered into
#[derive(Resource, Deref, DerefMut)]
pub struct ViewportRes(pub Viewport);

/// Resource to hold the shared host input queue in Bevy
#[derive(Resource)]
pub struct CoverInputRes(pub SharedCoverInput);

/// Raised by the owner of the render thread to ask the app to exit
#[derive(Resource, Clone, Default)]
pub struct ShutdownSignal(pub Arc<AtomicBool>);

impl ShutdownSignal {
    pub fn raise(&self) {
        self.0.store(true, Ordering::Release);
    }

    pub fn is_raised(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

// =============================================================================
// Scene Assets
// =============================================================================

/// Cover texture that is still loading, and the material waiting for it
#[derive(Resource)]
pub struct PendingCoverTexture {
    pub image: Handle<Image>,
    pub material: Handle<StandardMaterial>,
}

// =============================================================================
// Rendering
// =============================================================================

/// Handle to the offscreen render target texture
#[derive(Resource)]
pub struct RenderTargetHandle(pub Handle<Image>);

/// Shared frame buffer resource for Bevy
#[derive(Resource, Clone)]
pub struct FrameBufferRes(pub SharedFrameBuffer);

// =============================================================================
// Frame Management
// =============================================================================

/// Counter for total frames published
#[derive(Resource, Default)]
pub struct PublishedFrames(pub u32);

/// Number of pre-roll frames to skip before starting output
#[derive(Resource, Default)]
pub struct PreRollFrames(pub u32);

/// Frame rate limiter to control output FPS
#[derive(Resource)]
pub struct FrameRateLimiter {
    pub last_frame_time: std::time::Instant,
    pub min_frame_interval: Duration,
}

impl FrameRateLimiter {
    pub fn new(target_fps: f64) -> Self {
        Self {
            last_frame_time: std::time::Instant::now(),
            min_frame_interval: Duration::from_secs_f64(1.0 / target_fps),
        }
    }
}

// =============================================================================
// Performance Monitoring
// =============================================================================

/// Performance timing tracker for frame processing
#[derive(Resource, Default)]
pub struct FrameTimings {
    pub last_print_time: f64,
    pub frame_times: Vec<f64>,
}

/// Shared performance statistics resource
#[derive(Resource)]
pub struct PerfStatsRes(pub SharedPerfStats);

// =============================================================================
// Channel Communication (Main World <-> Render World)
// =============================================================================

use crossbeam_channel::{Receiver, Sender};

/// Receives data from render world
#[derive(Resource, Deref)]
pub struct MainWorldReceiver(pub Receiver<Vec<u8>>);

/// Sends data to main world
#[derive(Resource, Deref)]
pub struct RenderWorldSender(pub Sender<Vec<u8>>);
