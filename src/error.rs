//! Crate error type
//!
//! Only the host-facing plumbing (shared state, frame encoding, renderer
//! lifecycle, snapshot tool) reports errors. The motion model and scene
//! systems degrade and log instead.

use std::sync::PoisonError;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoverError {
    #[error("shared state lock poisoned")]
    LockPoisoned,

    #[error("no frame yet (scene still loading)")]
    NoFrame,

    #[error("frame data is {actual} bytes, expected {expected} for {width}x{height}")]
    FrameSize {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("render thread panicked")]
    RenderThread,

    #[error("renderer not started: container is {width}x{height}")]
    EmptyContainer { width: u32, height: u32 },

    #[error("timed out waiting for {0} frames")]
    Timeout(u32),
}

impl<T> From<PoisonError<T>> for CoverError {
    fn from(_: PoisonError<T>) -> Self {
        CoverError::LockPoisoned
    }
}

pub type Result<T, E = CoverError> = std::result::Result<T, E>;
