//! Cover motion plugin
//!
//! Everything that moves the book and needs no GPU: host input, the motion
//! model, and the camera aspect ratio. Usable on its own with
//! `MinimalPlugins` for headless runs and tests.

use bevy::prelude::*;

use crate::cover::Viewport;
use crate::engine::resources::{CoverStateRes, ViewportRes};
use crate::engine::systems::{
    animate_cover, apply_cover_input, apply_viewport_to_camera, exit_on_shutdown,
};

/// System sets of a cover frame, run in declaration order
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum CoverSystems {
    /// Apply queued host events
    Input,
    /// Advance the motion model and pose the book
    Animate,
    /// Propagate viewport changes to the camera and render target
    Viewport,
}

pub struct CoverMotionPlugin {
    pub viewport: Viewport,
}

impl Plugin for CoverMotionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CoverStateRes>()
            .insert_resource(ViewportRes(self.viewport))
            .configure_sets(
                Update,
                (CoverSystems::Input, CoverSystems::Animate, CoverSystems::Viewport).chain(),
            )
            .add_systems(Update, apply_cover_input.in_set(CoverSystems::Input))
            .add_systems(Update, animate_cover.in_set(CoverSystems::Animate))
            .add_systems(Update, apply_viewport_to_camera.in_set(CoverSystems::Viewport))
            .add_systems(Last, exit_on_shutdown);
    }
}
