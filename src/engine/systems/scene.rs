//! Scene setup system
//!
//! This module handles the initial setup of the 3D scene. The scene itself
//! (camera, lighting rig, six-faced book and the floor that catches its
//! shadow) needs no GPU. The offscreen render target and its readback buffer
//! are created separately once the scene exists.

use std::f32::consts::{FRAC_PI_2, PI};

use bevy::{
    asset::Assets,
    camera::RenderTarget,
    core_pipeline::tonemapping::Tonemapping,
    image::Image,
    math::{primitives::Rectangle, Quat, Vec3},
    pbr::{MeshMaterial3d, StandardMaterial},
    prelude::*,
    render::{
        render_resource::{Extent3d, TextureFormat, TextureUsages},
        renderer::RenderDevice,
    },
};

use crate::config::{book, stage};
use crate::cover::CoverPose;
use crate::engine::components::{BookCover, BookFace, CoverCamera, ShadowPlane};
use crate::engine::plugins::image_copy::ImageCopier;
use crate::engine::resources::{CoverStateRes, PendingCoverTexture, RenderTargetHandle, ViewportRes};

/// Asset path of the cover texture requested at startup
#[derive(Resource, Clone)]
pub struct CoverTexturePath(pub String);

fn srgb([r, g, b]: [f32; 3]) -> Color {
    Color::srgb(r, g, b)
}

/// Rotation that turns a +Z facing rectangle into `face`, and where it sits
pub fn face_placement(face: BookFace) -> (Quat, Vec3, Vec2) {
    let (w, h, d) = (book::WIDTH, book::HEIGHT, book::DEPTH);
    match face {
        BookFace::Front => (Quat::IDENTITY, Vec3::new(0.0, 0.0, d / 2.0), Vec2::new(w, h)),
        BookFace::Back => (Quat::from_rotation_y(PI), Vec3::new(0.0, 0.0, -d / 2.0), Vec2::new(w, h)),
        BookFace::Spine => (
            Quat::from_rotation_y(-FRAC_PI_2),
            Vec3::new(-w / 2.0, 0.0, 0.0),
            Vec2::new(d, h),
        ),
        BookFace::ForeEdge => (
            Quat::from_rotation_y(FRAC_PI_2),
            Vec3::new(w / 2.0, 0.0, 0.0),
            Vec2::new(d, h),
        ),
        BookFace::TopEdge => (
            Quat::from_rotation_x(-FRAC_PI_2),
            Vec3::new(0.0, h / 2.0, 0.0),
            Vec2::new(w, d),
        ),
        BookFace::BottomEdge => (
            Quat::from_rotation_x(FRAC_PI_2),
            Vec3::new(0.0, -h / 2.0, 0.0),
            Vec2::new(w, d),
        ),
    }
}

fn face_material(face: BookFace) -> StandardMaterial {
    let (color, roughness) = match face {
        BookFace::Front => (book::FRONT_COLOR, 0.55),
        BookFace::Back => (book::BACK_COLOR, 0.6),
        BookFace::Spine => (book::SPINE_COLOR, 0.6),
        BookFace::ForeEdge | BookFace::TopEdge | BookFace::BottomEdge => (book::PAGE_COLOR, 0.9),
    };
    StandardMaterial {
        base_color: srgb(color),
        perceptual_roughness: roughness,
        ..default()
    }
}

/// Transform of the book root for a pose
pub fn pose_transform(pose: &CoverPose) -> Transform {
    let rotation = Quat::from_euler(
        EulerRot::XYZ,
        pose.rotation.pitch,
        pose.rotation.yaw,
        pose.rotation.roll + pose.wobble,
    );
    Transform::from_xyz(0.0, pose.offset_y, 0.0).with_rotation(rotation)
}

/// Render-target size for a viewport on this device
///
/// Textures larger than the device allows would fail validation, so oversized
/// viewports are scaled down to fit.
pub fn render_target_size(viewport: &ViewportRes, render_device: &RenderDevice) -> Extent3d {
    let max_dimension = render_device.limits().max_texture_dimension_2d;
    let fitted = viewport.fit_within(max_dimension);
    if fitted != viewport.0 {
        debug!(
            "Viewport {}x{} exceeds the {} px texture limit, rendering at {}x{}",
            viewport.width, viewport.height, max_dimension, fitted.width, fitted.height
        );
    }

    Extent3d {
        width: fitted.width,
        height: fitted.height,
        depth_or_array_layers: 1,
    }
}

/// Create the offscreen render target and point the cover camera at it
pub fn setup_render_target(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    render_device: Res<RenderDevice>,
    viewport: Res<ViewportRes>,
    mut cameras: Query<&mut Camera, With<CoverCamera>>,
) {
    let size = render_target_size(&viewport, &render_device);

    // Create render target texture
    let mut render_target_image =
        Image::new_target_texture(size.width, size.height, TextureFormat::bevy_default());
    render_target_image.texture_descriptor.usage |= TextureUsages::COPY_SRC;
    let render_target_image_handle = images.add(render_target_image);

    commands.insert_resource(RenderTargetHandle(render_target_image_handle.clone()));

    // Spawn image copier for GPU-to-CPU transfer
    commands.spawn(ImageCopier::new(
        render_target_image_handle.clone(),
        size,
        &render_device,
    ));

    for mut camera in cameras.iter_mut() {
        camera.target = RenderTarget::Image(render_target_image_handle.clone().into());
    }

    info!("Render target ready ({}x{})", size.width, size.height);
}

/// Spawn the camera, book, floor and lights, and request the cover texture
pub fn spawn_cover_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    viewport: Res<ViewportRes>,
    texture_path: Res<CoverTexturePath>,
    cover: Res<CoverStateRes>,
) {
    info!("Setting up cover scene ({}x{})", viewport.width, viewport.height);

    commands.spawn((
        Camera3d::default(),
        Camera {
            clear_color: ClearColorConfig::Custom(srgb(stage::CLEAR_COLOR)),
            ..default()
        },
        Projection::from(PerspectiveProjection {
            fov: stage::FOV_DEGREES.to_radians(),
            aspect_ratio: viewport.aspect_ratio(),
            ..default()
        }),
        Tonemapping::None,
        Transform::from_xyz(0.0, 0.0, stage::CAMERA_DISTANCE).looking_at(Vec3::ZERO, Vec3::Y),
        CoverCamera,
    ));

    // Book: one root carrying the pose, six single-material faces
    let mut front_material = None;
    commands
        .spawn((
            pose_transform(&cover.pose()),
            Visibility::default(),
            BookCover,
        ))
        .with_children(|book| {
            for face in BookFace::ALL {
                let (rotation, translation, extent) = face_placement(face);
                let material = materials.add(face_material(face));
                if face == BookFace::Front {
                    front_material = Some(material.clone());
                }
                book.spawn((
                    Mesh3d(meshes.add(Rectangle::new(extent.x, extent.y))),
                    MeshMaterial3d(material),
                    Transform::from_translation(translation).with_rotation(rotation),
                    face,
                ));
            }
        });

    if let Some(material) = front_material {
        let image = asset_server.load::<Image>(texture_path.0.clone());
        commands.insert_resource(PendingCoverTexture { image, material });
    }

    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(stage::FLOOR_SIZE, stage::FLOOR_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::srgb(0.12, 0.15, 0.2),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, stage::FLOOR_Y, 0.0),
        ShadowPlane,
    ));

    // Key light
    commands.spawn((
        DirectionalLight {
            illuminance: 6000.0,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(3.0, 5.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Warm fill from the front left
    commands.spawn((
        PointLight {
            intensity: 900_000.0,
            color: Color::srgb(1.0, 0.85, 0.7),
            ..default()
        },
        Transform::from_xyz(-4.0, 2.0, 5.0),
    ));

    // Cool rim light from behind
    commands.spawn((
        PointLight {
            intensity: 600_000.0,
            color: Color::srgb(0.4, 0.6, 1.0),
            ..default()
        },
        Transform::from_xyz(2.0, 3.0, -4.0),
    ));

    info!("Cover scene setup complete");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cover::Rotation;

    #[test]
    fn faces_point_outwards() {
        for face in BookFace::ALL {
            let (rotation, translation, _) = face_placement(face);
            let normal = rotation * Vec3::Z;
            let outward = translation.normalize();
            assert!(
                normal.dot(outward) > 0.999,
                "{face:?} normal {normal:?} vs {outward:?}"
            );
        }
    }

    #[test]
    fn pose_sets_float_offset_and_wobble() {
        let pose = CoverPose {
            rotation: Rotation::new(0.0, 0.0, 0.0),
            wobble: 0.1,
            offset_y: 0.04,
        };
        let transform = pose_transform(&pose);
        assert_eq!(transform.translation, Vec3::new(0.0, 0.04, 0.0));
        let (_, _, roll) = transform.rotation.to_euler(EulerRot::XYZ);
        assert!((roll - 0.1).abs() < 1e-5);
    }
}
