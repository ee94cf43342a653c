//! Bevy application setup and execution
//!
//! This module handles the creation and configuration of the Bevy app,
//! including plugin registration, system scheduling and the lifetime of the
//! render thread.

use bevy::{
    app::{App, ScheduleRunnerPlugin},
    prelude::*,
    time::TimeUpdateStrategy,
    window::ExitCondition,
};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use crate::config::{assets::ASSET_DIR, CoverSettings, PRE_ROLL_FRAMES, TARGET_FPS};
use crate::cover::Viewport;
use crate::engine::plugins::cover_motion::CoverSystems;
use crate::engine::plugins::{CoverMotionPlugin, ImageCopyPlugin};
use crate::engine::resources::*;
use crate::engine::systems::scene::CoverTexturePath;
use crate::engine::systems::*;
use crate::error::{CoverError, Result};
use crate::tauri_bridge::BridgeHandles;

/// Source of frame ticks for the render loop
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FrameClock {
    /// One update per display refresh, timed by the wall clock
    Display { fps: f64 },
    /// Every update advances time by exactly `step`, however long it took
    Fixed { step: Duration },
}

impl Default for FrameClock {
    fn default() -> Self {
        FrameClock::Display { fps: TARGET_FPS }
    }
}

impl FrameClock {
    /// How long the schedule runner waits between updates
    pub fn runner_wait(&self) -> Duration {
        match self {
            FrameClock::Display { fps } => Duration::from_secs_f64(1.0 / fps),
            FrameClock::Fixed { .. } => Duration::ZERO,
        }
    }

    /// Configure how the app's clock advances. Must be called after the time
    /// plugin has been added.
    pub fn install_time(self, app: &mut App) {
        if let FrameClock::Fixed { step } = self {
            app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
        }
    }
}

/// Create and configure the Bevy application
pub fn create_app(settings: &CoverSettings, bridge: BridgeHandles, clock: FrameClock) -> App {
    let mut app = App::new();

    // Use DefaultPlugins but configure for headless operation
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: None,
                exit_condition: ExitCondition::DontExit,
                ..default()
            })
            .set(AssetPlugin {
                file_path: ASSET_DIR.to_string(),
                ..default()
            })
            .set(ImagePlugin::default_linear()),
    );

    // Add schedule runner for controlled frame rate
    app.add_plugins(ScheduleRunnerPlugin::run_loop(clock.runner_wait()));
    clock.install_time(&mut app);

    // Add custom plugins
    app.add_plugins(ImageCopyPlugin);
    app.add_plugins(CoverMotionPlugin {
        viewport: Viewport::new(settings.width, settings.height),
    });

    // Register systems
    app.add_systems(Startup, (spawn_cover_scene, setup_render_target).chain());
    app.add_systems(Update, install_cover_texture);
    app.add_systems(
        Update,
        resize_render_target
            .in_set(CoverSystems::Viewport)
            .after(apply_viewport_to_camera),
    );
    app.add_systems(Last, extract_and_process_frame);

    // Insert resources
    app.insert_resource(CoverTexturePath(settings.texture.clone()));
    app.insert_resource(CoverInputRes(bridge.input));
    app.insert_resource(FrameBufferRes(bridge.frames));
    app.insert_resource(PerfStatsRes(bridge.stats));
    app.insert_resource(PublishedFrames::default());
    app.insert_resource(PreRollFrames(PRE_ROLL_FRAMES));
    app.insert_resource(FrameTimings::default());
    app.insert_resource(FrameRateLimiter::new(TARGET_FPS));

    info!("Cover app configured (headless offscreen rendering)");
    app
}

/// Owner of the cover's render thread
///
/// The app runs until [`CoverRenderer::stop`] is called. Dropping the
/// renderer asks the loop to exit without waiting for it.
pub struct CoverRenderer {
    shutdown: ShutdownSignal,
    thread: Option<JoinHandle<()>>,
}

impl CoverRenderer {
    /// Start rendering into a container of `settings.width` x
    /// `settings.height`. An empty container creates nothing and returns
    /// `None`.
    pub fn start(settings: CoverSettings, bridge: BridgeHandles) -> Option<CoverRenderer> {
        Self::start_with_clock(settings, bridge, FrameClock::default())
    }

    pub fn start_with_clock(
        settings: CoverSettings,
        bridge: BridgeHandles,
        clock: FrameClock,
    ) -> Option<CoverRenderer> {
        if !Viewport::new(settings.width, settings.height).is_renderable() {
            debug!(
                "Cover container is {}x{}, not rendering",
                settings.width, settings.height
            );
            return None;
        }

        let shutdown = ShutdownSignal::default();
        let signal = shutdown.clone();
        let thread = thread::Builder::new()
            .name("cover-render".into())
            .spawn(move || {
                let mut app = create_app(&settings, bridge, clock);
                app.insert_resource(signal);
                info!("Running cover render loop...");
                app.run();
            });

        match thread {
            Ok(thread) => Some(CoverRenderer {
                shutdown,
                thread: Some(thread),
            }),
            Err(e) => {
                warn!("Failed to spawn cover render thread: {e}");
                None
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.thread
            .as_ref()
            .is_some_and(|thread| !thread.is_finished())
    }

    /// Ask the render loop to exit and wait for it
    pub fn stop(mut self) -> Result<()> {
        self.shutdown.raise();
        match self.thread.take() {
            Some(thread) => thread.join().map_err(|_| CoverError::RenderThread),
            None => Ok(()),
        }
    }
}

impl Drop for CoverRenderer {
    fn drop(&mut self) {
        self.shutdown.raise();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_container_starts_nothing() {
        let settings = CoverSettings {
            width: 0,
            height: 600,
            ..CoverSettings::default()
        };
        assert!(CoverRenderer::start(settings, BridgeHandles::default()).is_none());

        let settings = CoverSettings {
            width: 400,
            height: 0,
            ..CoverSettings::default()
        };
        assert!(CoverRenderer::start(settings, BridgeHandles::default()).is_none());
    }
}
