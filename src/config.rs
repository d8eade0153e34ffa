// Configuration file, all measurements in scene units (an unscaled house base is 3 x 2 x 4)
// This controls the initial generation parameter settings

use std::f32::consts::{FRAC_PI_2, FRAC_PI_8, PI};

pub const INITIAL_SEED: u64 = 1512086461918454205;

// House style palettes (hex sRGB)
pub const BASE_COLORS: [u32; 5] = [0xffff99, 0x6699ff, 0xffccff, 0x9999ff, 0x33ffcc];
pub const ROOF_COLORS: [u32; 3] = [0x537d90, 0xff9966, 0x666666];
pub const DOOR_COLORS: [u32; 2] = [0x3333ff, 0xffcc33];
pub const WINDOW_COLOR: u32 = 0x537d90;
// style names drawn at random; triangular windows are only set explicitly
pub const DOOR_TYPES: [&str; 2] = ["simple", "fancy"];
pub const WINDOW_TYPES: [&str; 2] = ["rectangular", "circular"];

// default style, used whenever an input value is missing or not recognised
pub const DEFAULT_BASE_COLOR: u32 = 0xffffff;
pub const DEFAULT_TRI_COLOR: u32 = 0xffffff;
pub const DEFAULT_ROOF_COLOR: u32 = 0x202020;
pub const DEFAULT_DOOR_COLOR: u32 = 0xff0000;
pub const DEFAULT_WINDOW_COLOR: u32 = 0x537d90;
pub const DEFAULT_SCALE: f32 = 1.0;

// uniform house scale range
pub const SCALE_MIN: f32 = 0.75;
pub const SCALE_MAX: f32 = 1.25;

// Street plan
// origin is the world (x, z) of the first slot, heading is the yaw of the lane axis
// (0 = +X), facing is the yaw given to every house on the lane
pub struct LanePlan {
    pub label: &'static str,
    pub origin: (f32, f32),
    pub heading: f32,
    pub facing: f32,
    pub count: usize,
    pub spacing: f32,
    pub address_start: u32,
    pub address_step: u32,
}

pub const STREET_PLAN: [LanePlan; 8] = [
    LanePlan { label: "North Street", origin: (-30.0, 8.0), heading: 0.0, facing: PI, count: 7, spacing: 8.0, address_start: 1, address_step: 2 },
    // continues the odd/even counter of the lane above
    LanePlan { label: "North Street", origin: (-30.0, -8.0), heading: 0.0, facing: 0.0, count: 9, spacing: 6.0, address_start: 15, address_step: 2 },
    LanePlan { label: "South Street", origin: (6.0, 8.0), heading: 0.0, facing: PI, count: 9, spacing: 8.0, address_start: 1, address_step: 2 },
    LanePlan { label: "South Street", origin: (6.0, -8.0), heading: 0.0, facing: 0.0, count: 10, spacing: 6.0, address_start: 2, address_step: 2 },
    LanePlan { label: "West Street", origin: (15.0, 99.0), heading: FRAC_PI_2, facing: PI + FRAC_PI_2, count: 10, spacing: 8.0, address_start: 1, address_step: 2 },
    LanePlan { label: "West Street", origin: (-15.0, 99.0), heading: FRAC_PI_2, facing: FRAC_PI_2, count: 10, spacing: 8.0, address_start: 2, address_step: 2 },
    LanePlan { label: "East Street", origin: (-15.0, -99.0), heading: PI + FRAC_PI_2, facing: FRAC_PI_2, count: 10, spacing: 8.0, address_start: 1, address_step: 2 },
    LanePlan { label: "East Street", origin: (15.0, -99.0), heading: PI + FRAC_PI_2, facing: PI + FRAC_PI_2, count: 15, spacing: 5.0, address_start: 2, address_step: 2 },
];

// Scenery
pub const GROUND_SIZE: f32 = 2500.0;
pub const GROUND_LEVEL: f32 = -1.0;
pub const GROUND_COLOR: u32 = 0x228b22;
pub const ROAD_WIDTH: f32 = 12.0;
pub const ROAD_LEVEL: f32 = -0.9; // just above the ground to avoid z-fighting
pub const ROAD_COLOR: u32 = 0x808080;
pub const CENTER_CUBE_SIZE: f32 = 5.0;
pub const CENTER_CUBE_HEIGHT: f32 = 1.5;
pub const CENTER_CUBE_COLOR: u32 = 0xfab74b;
pub const BACKGROUND_COLOR: u32 = 0x99ffff;

// skydome gradient
pub const SKY_RADIUS: f32 = 4000.0;
pub const SKY_TOP_HUE: f32 = 216.0;       // degrees, full saturation, lightness 0.6
pub const SKY_BOTTOM_COLOR: u32 = 0xffffff;
pub const SKY_OFFSET: f32 = 33.0;
pub const SKY_EXPONENT: f32 = 0.6;

// Lighting
pub const STATIC_SUN_POSITION: [f32; 3] = [50.0, 70.0, 70.0];
pub const STATIC_SUN_INTENSITY: f32 = 0.6;
pub const STATIC_AMBIENT_INTENSITY: f32 = 1.0;
pub const DAY_STEP: f32 = 0.001;     // day_time advance per frame, one day is 1.0
pub const MIN_SUN_ANGLE: f32 = FRAC_PI_8;
pub const MAX_SUN_ANGLE: f32 = PI - FRAC_PI_8;
pub const SUN_ORBIT_RADIUS: f32 = 500.0;
pub const SUN_ORBIT_HEIGHT: f32 = 600.0;

// intensities above are relative, these convert them to bevy units
pub const LUX_PER_INTENSITY: f32 = 3_000.0;
pub const AMBIENT_BRIGHTNESS_PER_INTENSITY: f32 = 400.0;

// Camera far plane must contain the skydome
pub const CAMERA_FAR: f32 = 10_000.0;
