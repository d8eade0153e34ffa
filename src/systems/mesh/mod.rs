// this is the entry point for the town generation plugin
use bevy::prelude::*;

use crate::config::*;

pub mod geometry;
pub mod mesh_gen;
pub mod parts;
pub mod house;
pub mod registry;
pub mod street;
pub mod town;

pub use house::{build, hex_color, ConfigDefaulted, NodeTag, PartHit, RawStyle, StyleConfig, Structure};
pub use parts::{DoorType, PartKind, WindowType};
pub use registry::{Hit, PickableRegistry, StructureId};
pub use street::{default_street_plan, populate_lane, populate_town, StreetLane, StylePalette, TownLayout};

// resources
#[derive(Resource)]
pub struct Seed(pub u64);

// town generation parameters
#[derive(Resource, Clone, Debug)]
pub struct TownParams {
    pub palette: StylePalette,
    pub lanes: Vec<StreetLane>,
}

impl Default for TownParams {
    fn default() -> Self {
        Self {
            palette: StylePalette::default(),
            lanes: default_street_plan(),
        }
    }
}

// Event for regeneration
#[derive(Event)]
pub struct RegenerateEvent {
    pub seed: u64,
}

// main plugin for generation
pub struct TownGenerationPlugin;

impl Plugin for TownGenerationPlugin {
    fn build(&self, app: &mut App) {
        app
            .insert_resource(Seed(INITIAL_SEED))
            .insert_resource(TownParams::default())
            .insert_resource(PickableRegistry::default())
            .add_event::<RegenerateEvent>()

            // add startup town generation pipeline
            .add_systems(Startup, |mut commands: Commands,
                                   mut meshes: ResMut<Assets<Mesh>>,
                                   mut materials: ResMut<Assets<StandardMaterial>>,
                                   seed: Res<Seed>,
                                   params: Res<TownParams>,
                                   mut registry: ResMut<PickableRegistry>| {
                town::generate_town(&mut commands, &mut meshes, &mut materials, seed.0, &params, &mut registry);
            })
            .add_systems(Update, town::handle_regeneration);
    }
}
