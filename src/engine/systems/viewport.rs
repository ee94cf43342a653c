//! Viewport systems
//!
//! Keeps the camera projection and the offscreen render target in step with
//! the container size.

use bevy::{prelude::*, render::renderer::RenderDevice};

use crate::engine::components::CoverCamera;
use crate::engine::plugins::image_copy::ImageCopier;
use crate::engine::resources::{RenderTargetHandle, ViewportRes};
use crate::engine::systems::scene::render_target_size;

/// Match the camera's aspect ratio to the viewport
pub fn apply_viewport_to_camera(
    viewport: Res<ViewportRes>,
    mut cameras: Query<&mut Projection, With<CoverCamera>>,
) {
    if !viewport.is_changed() {
        return;
    }

    for mut projection in cameras.iter_mut() {
        if let Projection::Perspective(perspective) = projection.as_mut() {
            perspective.aspect_ratio = viewport.aspect_ratio();
        }
    }
}

/// Resize the render target and replace its readback buffer
pub fn resize_render_target(
    mut commands: Commands,
    viewport: Res<ViewportRes>,
    target: Option<Res<RenderTargetHandle>>,
    mut images: ResMut<Assets<Image>>,
    copiers: Query<Entity, With<ImageCopier>>,
    render_device: Res<RenderDevice>,
) {
    if !viewport.is_changed() {
        return;
    }
    let Some(target) = target else {
        return;
    };
    let Some(image) = images.get_mut(&target.0) else {
        return;
    };

    let size = render_target_size(&viewport, &render_device);
    if image.width() == size.width && image.height() == size.height {
        return;
    }
    image.resize(size);

    for entity in copiers.iter() {
        commands.entity(entity).despawn();
    }
    commands.spawn(ImageCopier::new(target.0.clone(), size, &render_device));

    info!("Render target resized to {}x{}", size.width, size.height);
}
