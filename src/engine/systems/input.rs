//! Host input system
//!
//! Drains the events queued by the host since the last frame and applies
//! them, in arrival order, to the cover state and the viewport.

use bevy::prelude::*;

use crate::cover::{CoverInput, Viewport};
use crate::engine::resources::{CoverInputRes, CoverStateRes, ViewportRes};

pub fn apply_cover_input(
    input: Option<Res<CoverInputRes>>,
    time: Res<Time>,
    mut cover: ResMut<CoverStateRes>,
    mut viewport: ResMut<ViewportRes>,
) {
    let Some(input) = input else {
        return;
    };

    let events = match input.0.drain() {
        Ok(events) => events,
        Err(e) => {
            warn!("Dropping cover input: {e}");
            return;
        }
    };

    for event in events {
        match event {
            CoverInput::PointerEnter => cover.pointer_enter(),
            CoverInput::PointerLeave => cover.pointer_leave(),
            CoverInput::PointerMove { x, y } => {
                let (x, y) = viewport.normalize(x, y);
                cover.pointer_move(x, y);
            }
            CoverInput::Click => {
                if !cover.click(time.elapsed()) {
                    debug!("Flip in progress, click ignored");
                }
            }
            CoverInput::Resize { width, height } => {
                let next = Viewport::new(width, height);
                if !next.is_renderable() {
                    debug!("Ignoring resize to {width}x{height}");
                } else if viewport.0 != next {
                    viewport.0 = next;
                }
            }
        }
    }
}
