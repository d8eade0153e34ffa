// street layout
// tiles houses along lanes, numbers them and registers them for picking

use std::num::NonZeroU32;

use bevy::prelude::*;
use rand::prelude::*;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Uniform};

use crate::config::*;
use super::house::{build, RawStyle, StyleConfig};
use super::registry::{PickableRegistry, StructureId};

/// One side of a street: a row of evenly spaced house slots
#[derive(Clone, Debug, PartialEq)]
pub struct StreetLane {
    pub label: String,
    pub origin: Vec2,        // world (x, z) of slot 0
    pub heading: f32,        // yaw of the lane axis, 0 = +X
    pub axis_rotation: f32,  // yaw of every house on the lane
    pub instance_count: usize,
    pub spacing: f32,
    pub address_start: u32,
    pub address_step: NonZeroU32,
}

// a zero step would number every house on the lane the same
pub fn address_step(step: u32) -> NonZeroU32 {
    NonZeroU32::new(step).unwrap_or_else(|| {
        warn!("address step 0 would repeat addresses, using 1");
        NonZeroU32::MIN
    })
}

impl From<&LanePlan> for StreetLane {
    fn from(plan: &LanePlan) -> Self {
        Self {
            label: plan.label.to_string(),
            origin: Vec2::new(plan.origin.0, plan.origin.1),
            heading: plan.heading,
            axis_rotation: plan.facing,
            instance_count: plan.count,
            spacing: plan.spacing,
            address_start: plan.address_start,
            address_step: address_step(plan.address_step),
        }
    }
}

impl StreetLane {
    /// World position of slot `index`
    pub fn slot_position(&self, index: usize) -> Vec3 {
        let along = Quat::from_rotation_y(self.heading) * Vec3::X * (index as f32 * self.spacing);
        Vec3::new(self.origin.x, 0.0, self.origin.y) + along
    }

    pub fn address(&self, index: usize) -> String {
        let number = self.address_start as u64 + index as u64 * self.address_step.get() as u64;
        format!("{} {}", self.label, number)
    }
}

pub fn default_street_plan() -> Vec<StreetLane> {
    STREET_PLAN.iter().map(StreetLane::from).collect()
}

/// Randomization policy for house styles
/// door and window styles are listed by name and resolved like any other style input
/// the base color is reused for the gables so each house reads as one material
#[derive(Clone, Debug, PartialEq)]
pub struct StylePalette {
    pub base_colors: Vec<u32>,
    pub roof_colors: Vec<u32>,
    pub door_colors: Vec<u32>,
    pub window_color: u32,
    pub door_types: Vec<String>,
    pub window_types: Vec<String>,
    pub scale_range: (f32, f32),
}

impl Default for StylePalette {
    fn default() -> Self {
        Self {
            base_colors: BASE_COLORS.to_vec(),
            roof_colors: ROOF_COLORS.to_vec(),
            door_colors: DOOR_COLORS.to_vec(),
            window_color: WINDOW_COLOR,
            door_types: DOOR_TYPES.iter().map(|name| name.to_string()).collect(),
            window_types: WINDOW_TYPES.iter().map(|name| name.to_string()).collect(),
            scale_range: (SCALE_MIN, SCALE_MAX),
        }
    }
}

impl StylePalette {
    // empty lists leave the field unset so it takes the default style value
    pub fn sample_raw<R: Rng + ?Sized>(&self, rng: &mut R) -> RawStyle {
        let base_color = self.base_colors.choose(rng).copied();
        let roof_color = self.roof_colors.choose(rng).copied();
        let door_color = self.door_colors.choose(rng).copied();
        let (lo, hi) = self.scale_range;
        let scale = match Uniform::new_inclusive(lo, hi) {
            Ok(range) => Some(range.sample(rng)),
            Err(_) => None,
        };
        let door_type = self.door_types.choose(rng).cloned();
        let window_type = self.window_types.choose(rng).cloned();

        RawStyle {
            base_color,
            tri_color: base_color,
            roof_color,
            door_color,
            window_color: Some(self.window_color),
            door_type,
            window_type,
            scale,
        }
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> StyleConfig {
        let (style, _) = StyleConfig::from_raw(&self.sample_raw(rng));
        style
    }
}

/// Builds and registers every house of a lane
/// # Returns the lane's own houses, in placement order
pub fn populate_lane<R: Rng + ?Sized>(
    lane: &StreetLane,
    palette: &StylePalette,
    rng: &mut R,
    registry: &mut PickableRegistry,
) -> Vec<StructureId> {
    let mut houses = Vec::with_capacity(lane.instance_count);

    for i in 0..lane.instance_count {
        let style = palette.sample(rng);
        let address = lane.address(i);
        debug!("House created with address: {}", address);

        let structure = build(&style).placed(lane.slot_position(i), lane.axis_rotation, address);
        houses.push(registry.register(structure));
    }

    houses
}

/// Houses placed along one lane
#[derive(Clone, Debug, PartialEq)]
pub struct Street {
    pub label: String,
    pub houses: Vec<StructureId>,
}

/// A generated town: the shared registry plus the per-lane collections
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TownLayout {
    pub registry: PickableRegistry,
    pub streets: Vec<Street>,
}

// lanes are filled in order from one seeded generator, so a seed always gives the same town
pub fn populate_town(lanes: &[StreetLane], palette: &StylePalette, seed: u64) -> TownLayout {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut layout = TownLayout::default();

    for lane in lanes {
        let houses = populate_lane(lane, palette, &mut rng, &mut layout.registry);
        info!("{}: placed {} houses", lane.label, houses.len());
        layout.streets.push(Street { label: lane.label.clone(), houses });
    }

    layout
}
