//! App lifecycle system

use bevy::prelude::*;

use crate::engine::resources::ShutdownSignal;

/// Exit the app once the owner of the render thread raises the shutdown signal
pub fn exit_on_shutdown(
    signal: Option<Res<ShutdownSignal>>,
    mut app_exit_writer: MessageWriter<AppExit>,
) {
    if signal.is_some_and(|signal| signal.is_raised()) {
        info!("Shutdown requested, exiting render loop");
        app_exit_writer.write(AppExit::Success);
    }
}
