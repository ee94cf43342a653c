//! Animation systems
//!
//! This module advances the cover's motion model once per frame and writes
//! the resulting pose onto the book.

use bevy::{prelude::*, time::Time};

use crate::engine::components::BookCover;
use crate::engine::resources::CoverStateRes;
use crate::engine::systems::scene::pose_transform;

/// Smooth, float and flip the book marked with [`BookCover`]
pub fn animate_cover(
    time: Res<Time>,
    mut cover: ResMut<CoverStateRes>,
    mut query: Query<&mut Transform, With<BookCover>>,
) {
    let pose = cover.advance(time.elapsed());
    for mut transform in query.iter_mut() {
        *transform = pose_transform(&pose);
    }
}
