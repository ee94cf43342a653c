//! Headless runs of the cover scene and motion plugin, driven through the host
//! queue

use std::f32::consts::PI;
use std::thread;
use std::time::Duration;

use bevy::prelude::*;
use rust_universe_cover_lib::config::{book, stage};
use rust_universe_cover_lib::cover::Rotation;
use rust_universe_cover_lib::engine::components::{BookCover, BookFace, CoverCamera, ShadowPlane};
use rust_universe_cover_lib::engine::resources::{
    CoverInputRes, CoverStateRes, PendingCoverTexture, ShutdownSignal, ViewportRes,
};
use rust_universe_cover_lib::engine::systems::scene::CoverTexturePath;
use rust_universe_cover_lib::engine::systems::{install_cover_texture, spawn_cover_scene};
use rust_universe_cover_lib::engine::{CoverMotionPlugin, FrameClock};
use rust_universe_cover_lib::tauri_bridge::SharedCoverInput;
use rust_universe_cover_lib::{CoverInput, Viewport};

fn scene_app(width: u32, height: u32, texture: &str) -> (App, SharedCoverInput) {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()));
    app.init_asset::<Mesh>()
        .init_asset::<Image>()
        .init_asset::<StandardMaterial>();
    FrameClock::Fixed {
        step: Duration::from_millis(16),
    }
    .install_time(&mut app);
    app.add_plugins(CoverMotionPlugin {
        viewport: Viewport::new(width, height),
    });

    let input = SharedCoverInput::default();
    app.insert_resource(CoverInputRes(input.clone()));
    app.insert_resource(CoverTexturePath(texture.to_string()));
    app.add_systems(Startup, spawn_cover_scene);
    app.add_systems(Update, install_cover_texture);

    (app, input)
}

fn cover_app(width: u32, height: u32) -> (App, SharedCoverInput) {
    scene_app(width, height, "cover.png")
}

fn count<F: bevy::ecs::query::QueryFilter>(app: &mut App) -> usize {
    let mut query = app.world_mut().query_filtered::<Entity, F>();
    query.iter(app.world()).count()
}

fn front_material(app: &mut App) -> StandardMaterial {
    let mut query = app
        .world_mut()
        .query::<(&BookFace, &MeshMaterial3d<StandardMaterial>)>();
    let handle = query
        .iter(app.world())
        .find(|(face, _)| **face == BookFace::Front)
        .map(|(_, material)| material.0.clone())
        .expect("front face");
    app.world()
        .resource::<Assets<StandardMaterial>>()
        .get(&handle)
        .expect("front material")
        .clone()
}

fn camera_aspect(app: &mut App) -> f32 {
    let mut query = app
        .world_mut()
        .query_filtered::<&Projection, With<CoverCamera>>();
    match query.single(app.world()).expect("one cover camera") {
        Projection::Perspective(perspective) => perspective.aspect_ratio,
        other => panic!("unexpected projection {other:?}"),
    }
}

fn book_transform(app: &mut App) -> Transform {
    let mut query = app
        .world_mut()
        .query_filtered::<&Transform, With<BookCover>>();
    *query.single(app.world()).expect("one book")
}

fn cover(app: &App) -> &CoverStateRes {
    app.world().resource::<CoverStateRes>()
}

#[test]
fn scene_is_built_after_first_frame() {
    let (mut app, _input) = cover_app(400, 600);
    app.update();

    let mut books = app
        .world_mut()
        .query_filtered::<(Entity, &Children), With<BookCover>>();
    let (book, children) = books.single(app.world()).expect("one book");
    assert_eq!(children.len(), 6);

    let mut faces = app.world_mut().query::<(&BookFace, &ChildOf)>();
    let seen: Vec<BookFace> = faces
        .iter(app.world())
        .filter(|(_, child_of)| child_of.parent() == book)
        .map(|(face, _)| *face)
        .collect();
    assert_eq!(seen.len(), 6);
    for face in BookFace::ALL {
        assert!(seen.contains(&face), "missing {face:?}");
    }

    assert_eq!(count::<With<ShadowPlane>>(&mut app), 1);
    assert_eq!(
        count::<With<DirectionalLight>>(&mut app) + count::<With<PointLight>>(&mut app),
        3
    );

    let mut cameras = app
        .world_mut()
        .query_filtered::<&Projection, With<CoverCamera>>();
    match cameras.single(app.world()).expect("one cover camera") {
        Projection::Perspective(perspective) => {
            assert!((perspective.fov - stage::FOV_DEGREES.to_radians()).abs() < 1e-6);
            assert!((perspective.aspect_ratio - 400.0 / 600.0).abs() < 1e-6);
        }
        other => panic!("unexpected projection {other:?}"),
    }
}

#[test]
fn missing_texture_keeps_flat_front_face() {
    let (mut app, _input) = scene_app(400, 600, "missing-cover.png");
    app.update();
    assert!(app.world().contains_resource::<PendingCoverTexture>());

    // Asset loads finish on the IO task pool
    let mut frames = 0;
    while app.world().contains_resource::<PendingCoverTexture>() {
        assert!(frames < 500, "texture load never settled");
        thread::sleep(Duration::from_millis(5));
        app.update();
        frames += 1;
    }

    let material = front_material(&mut app);
    let [r, g, b] = book::FRONT_COLOR;
    assert_eq!(material.base_color, Color::srgb(r, g, b));
    assert!(material.base_color_texture.is_none());
}

#[test]
fn hover_scenario_converges_on_pointer_target() {
    let (mut app, input) = cover_app(400, 600);

    app.update();
    assert!((camera_aspect(&mut app) - 400.0 / 600.0).abs() < 1e-6);

    input.push(CoverInput::PointerEnter).unwrap();
    input.push(CoverInput::PointerMove { x: 300.0, y: 150.0 }).unwrap();
    app.update();
    assert_eq!(cover(&app).target().yaw, 0.25);
    assert!((cover(&app).target().pitch - 0.15).abs() < 1e-6);

    for _ in 0..99 {
        app.update();
    }

    let yaw = cover(&app).current().yaw;
    assert!(
        (yaw - 0.25).abs() <= 0.9f32.powi(100),
        "yaw {yaw} still far from 0.25"
    );

    let (_, book_yaw, _) = book_transform(&mut app).rotation.to_euler(EulerRot::XYZ);
    assert!((book_yaw - 0.25).abs() < 1e-3);
}

#[test]
fn pointer_moves_are_ignored_until_hovered() {
    let (mut app, input) = cover_app(400, 600);
    input.push(CoverInput::PointerMove { x: 400.0, y: 0.0 }).unwrap();
    app.update();
    assert_eq!(cover(&app).target(), Rotation::REST);
}

#[test]
fn leaving_twice_matches_leaving_once() {
    let (mut app, input) = cover_app(400, 600);
    input.push(CoverInput::PointerEnter).unwrap();
    input.push(CoverInput::PointerMove { x: 0.0, y: 0.0 }).unwrap();
    input.push(CoverInput::PointerLeave).unwrap();
    app.update();
    let once = cover(&app).target();

    input.push(CoverInput::PointerLeave).unwrap();
    app.update();
    assert_eq!(cover(&app).target(), once);
    assert_eq!(once, Rotation::REST);
    assert!(!cover(&app).is_hovering());
}

#[test]
fn second_click_does_not_restart_flip() {
    let (mut app, input) = cover_app(400, 600);
    app.update();

    input.push(CoverInput::Click).unwrap();
    app.update();
    let started_at = cover(&app).flip().expect("flip started").started_at;

    input.push(CoverInput::Click).unwrap();
    app.update();
    assert_eq!(
        cover(&app).flip().expect("still flipping").started_at,
        started_at
    );

    let mut frames = 0;
    while cover(&app).is_flipping() {
        app.update();
        frames += 1;
        assert!(frames < 200, "flip never finished");
    }

    // One second at 16ms per frame
    assert!((55..=70).contains(&frames), "flip took {frames} frames");
    assert!((cover(&app).current().yaw - 2.0 * PI).abs() < 1e-5);
    assert_eq!(cover(&app).pose().wobble, 0.0);
}

#[test]
fn resize_updates_aspect_and_ignores_empty_sizes() {
    let (mut app, input) = cover_app(400, 600);
    app.update();

    input
        .push(CoverInput::Resize {
            width: 800,
            height: 600,
        })
        .unwrap();
    app.update();
    assert!((camera_aspect(&mut app) - 800.0 / 600.0).abs() < 1e-6);

    input
        .push(CoverInput::Resize {
            width: 0,
            height: 600,
        })
        .unwrap();
    app.update();
    assert_eq!(app.world().resource::<ViewportRes>().0, Viewport::new(800, 600));
    assert!((camera_aspect(&mut app) - 800.0 / 600.0).abs() < 1e-6);
}

#[test]
fn shutdown_signal_exits_app() {
    let (mut app, _input) = cover_app(400, 600);
    let signal = ShutdownSignal::default();
    app.insert_resource(signal.clone());

    app.update();
    assert!(app.should_exit().is_none());

    signal.raise();
    app.update();
    assert_eq!(app.should_exit(), Some(AppExit::Success));
}
