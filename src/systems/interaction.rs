// house selection
// a click is turned into a camera ray, tested against every registered house,
// and the nearest house's address is shown on the address card

use bevy::prelude::*;
use bevy::window::{Window, PrimaryWindow};
use bevy_egui::EguiContexts;
use bevy_rts_camera::RtsCamera;

use crate::systems::mesh::{PickableRegistry, StructureId, NodeTag};
use crate::systems::mesh::town::House;

/// Outcome of a pick, both fields are `None` on a miss
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PickResult {
    pub structure: Option<StructureId>,
    pub address: Option<String>,
}

impl PickResult {
    pub fn miss() -> Self {
        Self::default()
    }

    pub fn is_miss(&self) -> bool {
        self.structure.is_none()
    }
}

/// Anything that can turn a normalized device point into a world ray
pub trait PickCamera {
    fn viewport_size(&self) -> Option<Vec2>;
    fn ndc_to_ray(&self, ndc: Vec2) -> Option<Ray3d>;
}

pub struct CameraView<'a> {
    pub camera: &'a Camera,
    pub transform: &'a GlobalTransform,
}

impl PickCamera for CameraView<'_> {
    fn viewport_size(&self) -> Option<Vec2> {
        self.camera.logical_viewport_size()
    }

    fn ndc_to_ray(&self, ndc: Vec2) -> Option<Ray3d> {
        // reverse z: the near plane is at depth 1
        let near = self.camera.ndc_to_world(self.transform, ndc.extend(1.0))?;
        let far = self.camera.ndc_to_world(self.transform, ndc.extend(f32::EPSILON))?;
        let direction = Dir3::new(far - near).ok()?;
        Some(Ray3d { origin: near, direction })
    }
}

// screen pixels (origin top left, y down) to NDC (origin center, y up)
pub fn screen_to_ndc(screen_pos: Vec2, viewport: Vec2) -> Vec2 {
    Vec2::new(
        screen_pos.x / viewport.x * 2.0 - 1.0,
        1.0 - screen_pos.y / viewport.y * 2.0,
    )
}

/// Resolves a world ray to the nearest house and its address
pub fn pick_ray(ray: Ray3d, registry: &PickableRegistry) -> PickResult {
    let Some(hit) = registry.raycast(ray) else {
        return PickResult::miss();
    };

    // walk from the hit part up to its owning house
    let Some(owner) = registry.get(hit.structure) else {
        return PickResult::miss();
    };
    if owner.tag() != NodeTag::Structure {
        return PickResult::miss();
    }
    let Some(address) = owner.address() else {
        return PickResult::miss();
    };

    debug!("picked {:?} of {}", hit.part.kind, address);
    PickResult {
        structure: Some(hit.structure),
        address: Some(address.to_string()),
    }
}

pub fn pick(screen_pos: Vec2, camera: &impl PickCamera, registry: &PickableRegistry) -> PickResult {
    let Some(viewport) = camera.viewport_size() else {
        return PickResult::miss();
    };
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return PickResult::miss();
    }

    let ndc = screen_to_ndc(screen_pos, viewport);
    match camera.ndc_to_ray(ndc) {
        Some(ray) => pick_ray(ray, registry),
        None => PickResult::miss(),
    }
}

/// The floating address label, positioned in screen pixels
#[derive(Resource, Default, Debug, Clone, PartialEq)]
pub struct AddressCard {
    pub address: Option<String>,
    pub left: f32,
    pub top: f32,
}

impl AddressCard {
    pub fn show(&mut self, address: String, at: Vec2) {
        self.address = Some(address);
        self.left = at.x;
        self.top = at.y;
    }

    pub fn hide(&mut self) {
        self.address = None;
    }

    pub fn is_visible(&self) -> bool {
        self.address.is_some()
    }
}

// left click on a house shows its address, a click on anything else hides the card
pub fn handle_mouse_interaction(
    mut contexts: EguiContexts,
    mut card: ResMut<AddressCard>,
    registry: Res<PickableRegistry>,
    windows: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform), With<RtsCamera>>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    houses: Query<(Entity, &House)>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }

    // clicks on the egui panels are not meant for the scene
    if let Ok(ctx) = contexts.ctx_mut() {
        if ctx.is_pointer_over_area() {
            return;
        }
    }

    let Ok(window) = windows.single() else { return };
    let Ok((camera, camera_transform)) = camera_query.single() else { return };
    let Some(cursor_pos) = window.cursor_position() else { return };

    let view = CameraView { camera, transform: camera_transform };
    match pick(cursor_pos, &view, &registry) {
        PickResult { structure: Some(id), address: Some(address) } => {
            info!("Address: {}", address);
            if let Some((entity, _)) = houses.iter().find(|(_, house)| house.id == id) {
                debug!("Picked house entity {:?}", entity);
            }
            card.show(address, cursor_pos);
        }
        _ => card.hide(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::systems::mesh::{build, StyleConfig};

    // orthographic-style camera: every pixel shoots straight down -Z
    struct FlatCamera {
        size: Vec2,
        half_extent: Vec2,
        z: f32,
    }

    impl PickCamera for FlatCamera {
        fn viewport_size(&self) -> Option<Vec2> {
            Some(self.size)
        }

        fn ndc_to_ray(&self, ndc: Vec2) -> Option<Ray3d> {
            Some(Ray3d {
                origin: (ndc * self.half_extent).extend(self.z),
                direction: Dir3::NEG_Z,
            })
        }
    }

    fn single_house_registry() -> PickableRegistry {
        let mut registry = PickableRegistry::default();
        registry.register(build(&StyleConfig::default()).placed(Vec3::ZERO, 0.0, "Elm Row 4".into()));
        registry
    }

    #[test]
    fn ndc_corners_and_center() {
        let viewport = Vec2::new(800.0, 600.0);
        assert_eq!(screen_to_ndc(Vec2::new(400.0, 300.0), viewport), Vec2::ZERO);
        assert_eq!(screen_to_ndc(Vec2::ZERO, viewport), Vec2::new(-1.0, 1.0));
        assert_eq!(screen_to_ndc(viewport, viewport), Vec2::new(1.0, -1.0));
    }

    #[test]
    fn empty_registry_misses() {
        let ray = Ray3d { origin: Vec3::Z * 10.0, direction: Dir3::NEG_Z };
        assert_eq!(pick_ray(ray, &PickableRegistry::default()), PickResult::miss());
    }

    #[test]
    fn ray_past_the_house_misses() {
        let registry = single_house_registry();
        let ray = Ray3d { origin: Vec3::new(50.0, 0.0, 10.0), direction: Dir3::NEG_Z };
        let result = pick_ray(ray, &registry);
        assert!(result.is_miss());
        assert_eq!(result.address, None);
    }

    #[test]
    fn door_window_and_base_all_resolve_to_the_house() {
        let registry = single_house_registry();
        for x in [0.5, -0.75, 1.3] {
            let ray = Ray3d { origin: Vec3::new(x, 0.1, 10.0), direction: Dir3::NEG_Z };
            let result = pick_ray(ray, &registry);
            assert_eq!(result.structure, Some(StructureId(0)), "x = {x}");
            assert_eq!(result.address.as_deref(), Some("Elm Row 4"));
        }
    }

    #[test]
    fn screen_point_goes_through_the_camera() {
        let registry = single_house_registry();
        let camera = FlatCamera { size: Vec2::new(200.0, 200.0), half_extent: Vec2::splat(10.0), z: 20.0 };
        // pixel (100, 100) is the viewport center, straight at the house
        let hit = pick(Vec2::new(100.0, 100.0), &camera, &registry);
        assert_eq!(hit.address.as_deref(), Some("Elm Row 4"));
        // top left corner is far from it
        assert!(pick(Vec2::ZERO, &camera, &registry).is_miss());
    }

    #[test]
    fn degenerate_viewport_misses() {
        let registry = single_house_registry();
        let camera = FlatCamera { size: Vec2::ZERO, half_extent: Vec2::splat(10.0), z: 20.0 };
        assert!(pick(Vec2::ZERO, &camera, &registry).is_miss());
    }

    #[test]
    fn pick_is_idempotent() {
        let registry = single_house_registry();
        let ray = Ray3d { origin: Vec3::new(0.5, 0.0, 10.0), direction: Dir3::NEG_Z };
        assert_eq!(pick_ray(ray, &registry), pick_ray(ray, &registry));
    }

    #[test]
    fn address_card_show_and_hide() {
        let mut card = AddressCard::default();
        assert!(!card.is_visible());
        card.show("Elm Row 4".into(), Vec2::new(12.0, 34.0));
        assert!(card.is_visible());
        assert_eq!((card.left, card.top), (12.0, 34.0));
        card.hide();
        assert!(!card.is_visible());
    }
}
