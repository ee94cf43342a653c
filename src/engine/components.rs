//! Bevy component definitions
//!
//! This module contains all component markers and data structures used
//! to tag and identify entities in the Bevy ECS (Entity Component System).

use bevy::prelude::*;

/// Marker component for the cover camera
///
/// The camera renders into an offscreen texture instead of a window, and its
/// aspect ratio follows the viewport.
#[derive(Component)]
pub struct CoverCamera;

/// Marker component for the book root
///
/// The motion systems write the cover pose into this entity's transform;
/// the six faces are its children.
#[derive(Component)]
pub struct BookCover;

/// One of the six faces of the book
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookFace {
    /// +Z, carries the cover texture
    Front,
    /// -Z
    Back,
    /// -X
    Spine,
    /// +X
    ForeEdge,
    /// +Y
    TopEdge,
    /// -Y
    BottomEdge,
}

impl BookFace {
    pub const ALL: [BookFace; 6] = [
        BookFace::Front,
        BookFace::Back,
        BookFace::Spine,
        BookFace::ForeEdge,
        BookFace::TopEdge,
        BookFace::BottomEdge,
    ];
}

/// Marker component for the floor that catches the book's shadow
#[derive(Component)]
pub struct ShadowPlane;
