// the static world around the houses: ground, two crossing roads, a center marker and the sky
// none of it is pickable, every node is tagged as scenery

use bevy::prelude::*;
use bevy::pbr::{NotShadowCaster, NotShadowReceiver};
use bevy::render::render_resource::Face;

use crate::config::*;
use crate::systems::mesh::{hex_color, NodeTag};
use crate::systems::mesh::mesh_gen::paint_sky_gradient;

pub struct SceneryPlugin;

impl Plugin for SceneryPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(ClearColor(hex_color(BACKGROUND_COLOR)))
            .add_systems(Startup, spawn_scenery);
    }
}

pub fn sky_top_color() -> Color {
    Color::hsl(SKY_TOP_HUE, 1.0, 0.6)
}

pub fn sky_mesh() -> Mesh {
    let mut mesh = Sphere::new(SKY_RADIUS).mesh().uv(32, 15);
    paint_sky_gradient(&mut mesh, sky_top_color(), hex_color(SKY_BOTTOM_COLOR), SKY_OFFSET, SKY_EXPONENT);
    mesh
}

// road plates, one along each axis
pub fn road_transforms() -> [Transform; 2] {
    let along_z = Transform::from_xyz(0.0, ROAD_LEVEL, 0.0);
    let along_x = along_z.with_rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2));
    [along_z, along_x]
}

fn spawn_scenery(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // ground
    commands.spawn((
        NodeTag::Scenery,
        Mesh3d(meshes.add(Plane3d::default().mesh().size(GROUND_SIZE, GROUND_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(GROUND_COLOR),
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::from_xyz(0.0, GROUND_LEVEL, 0.0),
    ));

    // roads
    let road_mesh = meshes.add(Plane3d::default().mesh().size(ROAD_WIDTH, GROUND_SIZE));
    let road_material = materials.add(StandardMaterial {
        base_color: hex_color(ROAD_COLOR),
        perceptual_roughness: 1.0,
        ..default()
    });
    for transform in road_transforms() {
        commands.spawn((
            NodeTag::Scenery,
            Mesh3d(road_mesh.clone()),
            MeshMaterial3d(road_material.clone()),
            transform,
        ));
    }

    // center marker where the roads cross
    commands.spawn((
        NodeTag::Scenery,
        Mesh3d(meshes.add(Cuboid::from_length(CENTER_CUBE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: hex_color(CENTER_CUBE_COLOR),
            ..default()
        })),
        Transform::from_xyz(0.0, CENTER_CUBE_HEIGHT, 0.0),
    ));

    // sky dome, seen from the inside and unaffected by the lights
    commands.spawn((
        NodeTag::Scenery,
        Mesh3d(meshes.add(sky_mesh())),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: Color::WHITE,
            unlit: true,
            cull_mode: Some(Face::Front),
            fog_enabled: false,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
        NotShadowReceiver,
    ));

    debug!("Scenery spawned");
}
