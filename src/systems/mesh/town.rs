use bevy::prelude::*;

use super::*;
use super::parts::Shape;

// entity hierarchy components
// lanes, houses and parts carry a `Name` with their label, address or part kind
#[derive(Component)]
pub struct Town {
    pub seed: u64,
    pub houses: usize,
}

#[derive(Component)]
pub struct Lane;

// links the house entity back to its registry entry
#[derive(Component)]
pub struct House {
    pub id: StructureId,
}

#[derive(Component)]
pub struct HousePart;

// meshes and materials shared between houses
// shapes and colors are few, a linear lookup is enough
#[derive(Default)]
struct AssetCache {
    meshes: Vec<(Shape, Handle<Mesh>)>,
    materials: Vec<(Color, Handle<StandardMaterial>)>,
}

impl AssetCache {
    fn mesh(&mut self, shape: Shape, meshes: &mut Assets<Mesh>) -> Handle<Mesh> {
        if let Some((_, handle)) = self.meshes.iter().find(|(s, _)| *s == shape) {
            return handle.clone();
        }
        let handle = meshes.add(shape.mesh());
        self.meshes.push((shape, handle.clone()));
        handle
    }

    fn material(&mut self, color: Color, materials: &mut Assets<StandardMaterial>) -> Handle<StandardMaterial> {
        if let Some((_, handle)) = self.materials.iter().find(|(c, _)| *c == color) {
            return handle.clone();
        }
        // flat parts are seen from both sides
        let handle = materials.add(StandardMaterial {
            base_color: color,
            alpha_mode: AlphaMode::Opaque,
            double_sided: true,
            cull_mode: None,
            ..default()
        });
        self.materials.push((color, handle.clone()));
        handle
    }
}

pub fn generate_town(
    commands: &mut Commands,
    meshes: &mut ResMut<Assets<Mesh>>,
    materials: &mut ResMut<Assets<StandardMaterial>>,
    seed: u64,
    params: &TownParams,
    registry: &mut ResMut<PickableRegistry>,
) {
    let layout = populate_town(&params.lanes, &params.palette, seed);
    info!("Town generated with seed {}: {} houses on {} lanes", seed, layout.registry.len(), layout.streets.len());

    // spawn town entity
    let town_entity = commands.spawn((
        Town { seed, houses: layout.registry.len() },
        Transform::default(),
        Visibility::default(),
    )).id();

    let mut cache = AssetCache::default();

    for street in &layout.streets {
        let lane_entity = commands.spawn((
            Lane,
            Name::new(street.label.clone()),
            Transform::default(),
            Visibility::default(),
        )).id();
        commands.entity(town_entity).add_children(&[lane_entity]);

        // collect house entities for this lane
        let mut house_entities = Vec::with_capacity(street.houses.len());

        for &id in &street.houses {
            let Some(structure) = layout.registry.get(id) else { continue };
            let Some(address) = structure.address() else { continue };

            // create main house entity (parent)
            let house_entity = commands.spawn((
                House { id },
                Name::new(address.to_string()),
                structure.tag(),
                structure.transform(),
                Visibility::default(),
            )).id();

            for part in structure.parts() {
                let material = cache.material(part.color, materials);
                let part_entity = commands.spawn((
                    HousePart,
                    Name::new(format!("{:?}", part.kind)),
                    part.transform,
                    Visibility::default(),
                )).id();

                let piece_entities: Vec<Entity> = part.pieces.iter()
                    .map(|piece| {
                        commands.spawn((
                            Mesh3d(cache.mesh(piece.shape, meshes)),
                            MeshMaterial3d(material.clone()),
                            piece.transform,
                        )).id()
                    })
                    .collect();

                commands.entity(part_entity).add_children(&piece_entities);
                commands.entity(house_entity).add_children(&[part_entity]);
            }

            house_entities.push(house_entity);
        }

        // add house entities as children of lane entity
        commands.entity(lane_entity).add_children(&house_entities);
    }

    debug!("{} meshes and {} materials shared across the town", cache.meshes.len(), cache.materials.len());

    // picking now sees exactly the houses that were just spawned
    **registry = layout.registry;
}

pub fn handle_regeneration(
    mut commands: Commands,
    mut events: EventReader<RegenerateEvent>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut seed: ResMut<Seed>,
    params: Res<TownParams>,
    mut registry: ResMut<PickableRegistry>,
    query: Query<Entity, With<Town>>,
) {
    // several requests in one frame collapse into the last one
    let Some(event) = events.read().last() else { return };

    // cleanup existing town, children are despawned with it
    for entity in query.iter() {
        commands.entity(entity).try_despawn();
    }

    seed.0 = event.seed;
    generate_town(&mut commands, &mut meshes, &mut materials, event.seed, &params, &mut registry);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_reuses_meshes_per_shape() {
        let mut meshes = Assets::<Mesh>::default();
        let mut cache = AssetCache::default();
        let a = cache.mesh(Shape::Disc { radius: 0.5 }, &mut meshes);
        let b = cache.mesh(Shape::Disc { radius: 0.5 }, &mut meshes);
        let c = cache.mesh(Shape::Disc { radius: 0.25 }, &mut meshes);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(cache.meshes.len(), 2);
    }

    #[test]
    fn cache_reuses_materials_per_color() {
        let mut materials = Assets::<StandardMaterial>::default();
        let mut cache = AssetCache::default();
        let a = cache.material(hex_color(0x537d90), &mut materials);
        let b = cache.material(hex_color(0x537d90), &mut materials);
        assert_eq!(a, b);
        let material = materials.get(&a).map(|m| (m.double_sided, m.cull_mode));
        assert_eq!(material, Some((true, None)));
    }
}
