use bevy::prelude::*;
use bevy::math::bounding::Aabb2d;
use bevy::window::{WindowPlugin, PrimaryWindow};
use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy_egui::EguiPlugin;
use bevy_rts_camera::*;

pub mod config;
pub mod systems;


// import modules here
use config::CAMERA_FAR;
use systems::mesh::TownGenerationPlugin;
use systems::lighting::LightingPlugin;
use systems::scenery::SceneryPlugin;

use crate::systems::interaction;
use crate::systems::ui::UIPlugin;

fn main() -> bevy::app::AppExit {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Street Town".into(),
                mode: bevy::window::WindowMode::Windowed,
                resolution: bevy::window::WindowResolution::new(1920.0, 1080.0),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(EguiPlugin::default())
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(RtsCameraPlugin)

        // my custom plugins
        .add_plugins(SceneryPlugin)
        .add_plugins(LightingPlugin)
        .add_plugins(TownGenerationPlugin)
        .add_plugins(UIPlugin)

        .add_systems(Startup, (start, maximize_window))
        .add_systems(Update, (handle_exit, interaction::handle_mouse_interaction))
        .run()
}

fn maximize_window(mut windows: Query<&mut Window, With<PrimaryWindow>>) {
    for mut window in windows.iter_mut() {
        window.set_maximized(true);
    }
}

// application entry point here
fn start(
    mut commands: Commands
) {
    // spawn camera, far plane pushed out so the sky dome stays visible
    commands.spawn((
        RtsCamera {
            bounds: Aabb2d::new(
                Vec2::ZERO,
                Vec2::new(150.0, 150.0),
            ),
            min_angle: 0.5,
            height_max: 180.0,
            ..default()
        },
        RtsCameraControls {
            key_up: KeyCode::KeyW,
            key_down: KeyCode::KeyS,
            key_left: KeyCode::KeyA,
            key_right: KeyCode::KeyD,
            key_rotate_left: KeyCode::F24,  // Q and E are left free
            key_rotate_right: KeyCode::F23,
            pan_speed: 40.0,
            zoom_sensitivity: 0.15,
            edge_pan_width: 0.0,
            ..default()
        },
        Projection::Perspective(PerspectiveProjection {
            far: CAMERA_FAR,
            ..default()
        }),
    ));
}

// application exit
fn handle_exit(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}
