// house assembly
// composes the primitive parts into one addressable structure

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};
use std::fmt;

use bevy::prelude::*;

use crate::config::*;
use super::geometry::{bounds, Bounds};
use super::parts::*;

pub fn hex_color(hex: u32) -> Color {
    Color::srgb_u8((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
}

/// Resolved house style, every value valid
#[derive(Clone, Debug, PartialEq)]
pub struct StyleConfig {
    pub base_color: Color,
    pub tri_color: Color,
    pub roof_color: Color,
    pub door_color: Color,
    pub window_color: Color,
    pub door_type: DoorType,
    pub window_type: WindowType,
    pub scale: f32,
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            base_color: hex_color(DEFAULT_BASE_COLOR),
            tri_color: hex_color(DEFAULT_TRI_COLOR),
            roof_color: hex_color(DEFAULT_ROOF_COLOR),
            door_color: hex_color(DEFAULT_DOOR_COLOR),
            window_color: hex_color(DEFAULT_WINDOW_COLOR),
            door_type: DoorType::default(),
            window_type: WindowType::default(),
            scale: DEFAULT_SCALE,
        }
    }
}

/// Unchecked style input, missing fields take the defaults
#[derive(Clone, Debug, Default)]
pub struct RawStyle {
    pub base_color: Option<u32>,
    pub tri_color: Option<u32>,
    pub roof_color: Option<u32>,
    pub door_color: Option<u32>,
    pub window_color: Option<u32>,
    pub door_type: Option<String>,
    pub window_type: Option<String>,
    pub scale: Option<f32>,
}

/// A style value that was present but unusable and got replaced by its default
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigDefaulted {
    Color { field: &'static str, value: u32 },
    DoorType(String),
    WindowType(String),
    Scale(f32),
}

impl fmt::Display for ConfigDefaulted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color { field, value } => write!(f, "{field} {value:#x} is not a 24-bit color, using default"),
            Self::DoorType(name) => write!(f, "unknown door type '{name}', using {:?}", DoorType::default()),
            Self::WindowType(name) => write!(f, "unknown window type '{name}', using {:?}", WindowType::default()),
            Self::Scale(scale) => write!(f, "scale {scale} is not positive, using {DEFAULT_SCALE}"),
        }
    }
}

impl std::error::Error for ConfigDefaulted {}

impl StyleConfig {
    /// Resolves raw input, substituting defaults for anything unusable
    /// # Returns the config plus one entry per substituted value; never fails
    pub fn from_raw(raw: &RawStyle) -> (Self, Vec<ConfigDefaulted>) {
        let mut defaulted = Vec::new();
        let mut config = Self::default();

        let mut color = |field: &'static str, value: Option<u32>, fallback: Color| match value {
            Some(hex) if hex <= 0xffffff => hex_color(hex),
            Some(hex) => {
                defaulted.push(ConfigDefaulted::Color { field, value: hex });
                fallback
            }
            None => fallback,
        };

        config.base_color = color("base_color", raw.base_color, config.base_color);
        config.tri_color = color("tri_color", raw.tri_color, config.tri_color);
        config.roof_color = color("roof_color", raw.roof_color, config.roof_color);
        config.door_color = color("door_color", raw.door_color, config.door_color);
        config.window_color = color("window_color", raw.window_color, config.window_color);

        if let Some(name) = &raw.door_type {
            match DoorType::from_name(name) {
                Some(door_type) => config.door_type = door_type,
                None => defaulted.push(ConfigDefaulted::DoorType(name.clone())),
            }
        }

        if let Some(name) = &raw.window_type {
            match WindowType::from_name(name) {
                Some(window_type) => config.window_type = window_type,
                None => defaulted.push(ConfigDefaulted::WindowType(name.clone())),
            }
        }

        if let Some(scale) = raw.scale {
            if scale.is_finite() && scale > 0.0 {
                config.scale = scale;
            } else {
                defaulted.push(ConfigDefaulted::Scale(scale));
            }
        }

        for warning in &defaulted {
            warn!("{}", warning);
        }

        (config, defaulted)
    }
}

/// Discriminant carried by scene nodes, a pick only resolves to `Structure`
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeTag {
    Structure,
    Scenery,
}

/// Where a ray met a structure
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PartHit {
    pub part: usize,
    pub kind: PartKind,
    pub distance: f32,
}

/// A built house
/// parts are in house space, the placement transform is set once by the street layout
#[derive(Clone, Debug, PartialEq)]
pub struct Structure {
    parts: Vec<Part>,
    scale: f32,
    position: Vec3,
    yaw: f32,
    tag: NodeTag,
    address: Option<String>,
}

impl Structure {
    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    pub fn tag(&self) -> NodeTag {
        self.tag
    }

    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    pub fn count(&self, kind: PartKind) -> usize {
        self.parts.iter().filter(|p| p.kind == kind).count()
    }

    /// Places the structure in the world and gives it its address
    pub fn placed(mut self, position: Vec3, yaw: f32, address: String) -> Self {
        self.position = position;
        self.yaw = yaw;
        self.address = Some(address);
        self
    }

    /// Whole-house transform: placement plus the uniform scale
    pub fn transform(&self) -> Transform {
        Transform {
            translation: self.position,
            rotation: Quat::from_rotation_y(self.yaw),
            scale: Vec3::splat(self.scale),
        }
    }

    /// Bounds in house space with the scale applied, placement ignored
    pub fn local_bounds(&self) -> Option<Bounds> {
        let scale = Mat4::from_scale(Vec3::splat(self.scale));
        bounds(self.parts.iter().flat_map(|part| {
            let part_matrix = scale * part.transform.compute_matrix();
            part.pieces.iter().flat_map(move |piece| {
                let matrix = part_matrix * piece.transform.compute_matrix();
                piece.shape.outline().into_iter().map(move |p| matrix.transform_point3(p))
            })
        }))
    }

    /// Closest hit of a world space ray against every piece of every part
    pub fn raycast(&self, ray: Ray3d) -> Option<PartHit> {
        let house = self.transform().compute_matrix();
        let mut closest: Option<PartHit> = None;

        for (index, part) in self.parts.iter().enumerate() {
            let part_matrix = house * part.transform.compute_matrix();
            for piece in &part.pieces {
                let inverse = (part_matrix * piece.transform.compute_matrix()).inverse();
                let origin = inverse.transform_point3(ray.origin);
                let direction = inverse.transform_vector3(*ray.direction);

                let Some(distance) = piece.shape.raycast(origin, direction) else { continue };
                if closest.is_none_or(|hit| distance < hit.distance) {
                    closest = Some(PartHit { part: index, kind: part.kind, distance });
                }
            }
        }

        closest
    }
}

/// Builds a house from a resolved style
/// the house front faces +Z, the base is centered on the origin
pub fn build(config: &StyleConfig) -> Structure {
    let mut parts = Vec::with_capacity(9);

    // base box
    parts.push(Part::new(PartKind::Base, config.base_color, vec![
        Piece::new(Shape::Cuboid { size: Vec3::new(3.0, 2.0, 4.0) }),
    ]));

    // gables on the front and back end
    for z in [2.0, -2.0] {
        parts.push(make_gable(config.tri_color).at(Vec3::new(-0.5, 1.0, z)));
    }

    // roof planes leaning against the gables, meeting at the ridge
    for (x, slope) in [(-1.0, FRAC_PI_4), (1.0, -FRAC_PI_4)] {
        let roof = Part::new(PartKind::Roof, config.roof_color, vec![
            Piece::new(Shape::Rectangle { size: Vec2::new(2.84, 4.5) }),
        ]);
        parts.push(roof.at(Vec3::new(x, 1.51, 0.0)).rotated(FRAC_PI_2, slope, 0.0));
    }

    // door on the front face
    parts.push(make_door(config.door_color, config.door_type).at(Vec3::new(0.5, -0.2, 2.1)));

    // windows
    match config.window_type {
        WindowType::Rectangular => {
            parts.push(make_window(config.window_color, WindowType::Rectangular).at(Vec3::new(-0.75, 0.1, 2.1)));
            for z in [-1.1, 1.1] {
                parts.push(
                    make_window(config.window_color, WindowType::Rectangular)
                        .at(Vec3::new(-1.6, 0.1, z))
                        .rotated(FRAC_PI_2, PI + FRAC_PI_2, 0.0),
                );
            }
        }
        WindowType::Circular => {
            parts.push(make_window(config.window_color, WindowType::Circular).at(Vec3::new(-0.75, 0.5, 2.1)));
        }
        WindowType::Triangular => {
            // turned to face the left side, centered on the wall
            parts.push(
                make_window(config.window_color, WindowType::Triangular)
                    .at(Vec3::new(-1.6, -0.3, -0.3))
                    .rotated(0.0, -FRAC_PI_2, 0.0),
            );
        }
    }

    Structure {
        parts,
        scale: config.scale,
        position: Vec3::ZERO,
        yaw: 0.0,
        tag: NodeTag::Structure,
        address: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn style(door_type: DoorType, window_type: WindowType, scale: f32) -> StyleConfig {
        StyleConfig { door_type, window_type, scale, ..default() }
    }

    fn ray(origin: Vec3, direction: Vec3) -> Ray3d {
        Ray3d { origin, direction: Dir3::new(direction).unwrap() }
    }

    #[test]
    fn part_counts_per_window_type() {
        for (window_type, windows) in [
            (WindowType::Rectangular, 3),
            (WindowType::Circular, 1),
            (WindowType::Triangular, 1),
        ] {
            for door_type in [DoorType::Simple, DoorType::Fancy] {
                let house = build(&style(door_type, window_type, 1.0));
                assert_eq!(house.count(PartKind::Base), 1);
                assert_eq!(house.count(PartKind::Gable), 2);
                assert_eq!(house.count(PartKind::Roof), 2);
                assert_eq!(house.count(PartKind::Door), 1);
                assert_eq!(house.count(PartKind::Window), windows, "{window_type:?}");
            }
        }
    }

    #[test]
    fn built_house_is_tagged_but_unaddressed() {
        let house = build(&StyleConfig::default());
        assert_eq!(house.tag(), NodeTag::Structure);
        assert_eq!(house.address(), None);
        assert_eq!(house.position(), Vec3::ZERO);
    }

    #[test]
    fn build_is_deterministic() {
        let config = style(DoorType::Simple, WindowType::Triangular, 1.1);
        assert_eq!(build(&config), build(&config));
    }

    #[test]
    fn bounds_scale_linearly() {
        let unit = build(&style(DoorType::Fancy, WindowType::Rectangular, 1.0)).local_bounds().unwrap();
        for scale in [0.1, 0.75, 1.25, 3.0, 40.0] {
            let scaled = build(&style(DoorType::Fancy, WindowType::Rectangular, scale)).local_bounds().unwrap();
            assert!(scaled.size().abs_diff_eq(unit.size() * scale, 1e-3 * scale), "scale {scale}");
            assert!(scaled.min.abs_diff_eq(unit.min * scale, 1e-3 * scale), "scale {scale}");
        }
    }

    #[test]
    fn unit_house_covers_base_and_roof() {
        let size = build(&StyleConfig::default()).local_bounds().unwrap().size();
        // roof eaves stick out past the 3 x 4 base
        assert!(size.x >= 4.0 - 1e-2);
        assert!(size.z >= 4.5 - 1e-3);
        // from the base bottom (-1) up to the ridge
        assert!(size.y > 3.4 && size.y < 3.6);
    }

    #[test]
    fn simple_circular_double_scale() {
        let house = build(&style(DoorType::Simple, WindowType::Circular, 2.0));
        let door = house.parts().iter().find(|p| p.kind == PartKind::Door).unwrap();
        assert_eq!(door.pieces.len(), 1);
        assert!(matches!(door.pieces[0].shape, Shape::Rectangle { .. }));

        let windows: Vec<&Part> = house.parts().iter().filter(|p| p.kind == PartKind::Window).collect();
        assert_eq!(windows.len(), 1);
        assert!(matches!(windows[0].pieces[0].shape, Shape::Disc { .. }));

        let unit = build(&style(DoorType::Simple, WindowType::Circular, 1.0)).local_bounds().unwrap();
        let doubled = house.local_bounds().unwrap();
        assert!((doubled.size().x - unit.size().x * 2.0).abs() < 1e-4);
        assert!((doubled.size().z - unit.size().z * 2.0).abs() < 1e-4);
    }

    #[test]
    fn raycast_front_hits_door_window_and_base() {
        let house = build(&style(DoorType::Simple, WindowType::Rectangular, 1.0));
        let door = house.raycast(ray(Vec3::new(0.5, -0.2, 10.0), Vec3::NEG_Z)).unwrap();
        assert_eq!(door.kind, PartKind::Door);
        assert!((door.distance - 7.9).abs() < 1e-4);

        let window = house.raycast(ray(Vec3::new(-0.75, 0.1, 10.0), Vec3::NEG_Z)).unwrap();
        assert_eq!(window.kind, PartKind::Window);

        let base = house.raycast(ray(Vec3::new(1.3, 0.6, 10.0), Vec3::NEG_Z)).unwrap();
        assert_eq!(base.kind, PartKind::Base);
        assert!((base.distance - 8.0).abs() < 1e-4);
    }

    #[test]
    fn raycast_follows_placement() {
        let house = build(&StyleConfig::default()).placed(Vec3::new(10.0, 0.0, 0.0), PI, "Test Road 1".into());
        // front now faces -Z and the door, at local x = 0.5, lands on world x = 9.5
        let hit = house.raycast(ray(Vec3::new(9.5, 0.0, -10.0), Vec3::Z)).unwrap();
        assert_eq!(hit.kind, PartKind::Door);
        assert!((hit.distance - 7.9).abs() < 1e-3);
        assert!(house.raycast(ray(Vec3::new(0.0, 0.0, -10.0), Vec3::Z)).is_none());
    }

    #[test]
    fn raycast_hits_triangular_side_window() {
        let house = build(&style(DoorType::Fancy, WindowType::Triangular, 1.0));
        let hit = house.raycast(ray(Vec3::new(-10.0, 0.0, 0.0), Vec3::X)).unwrap();
        assert_eq!(hit.kind, PartKind::Window);
    }

    #[test]
    fn raw_style_defaults_bad_values() {
        let raw = RawStyle {
            base_color: Some(0x1000000),
            roof_color: Some(0x00ff00),
            door_type: Some("revolving".into()),
            window_type: Some("circular".into()),
            scale: Some(-2.0),
            ..default()
        };
        let (config, defaulted) = StyleConfig::from_raw(&raw);
        assert_eq!(config.base_color, hex_color(DEFAULT_BASE_COLOR));
        assert_eq!(config.roof_color, hex_color(0x00ff00));
        assert_eq!(config.door_type, DoorType::Fancy);
        assert_eq!(config.window_type, WindowType::Circular);
        assert_eq!(config.scale, DEFAULT_SCALE);
        assert_eq!(defaulted, vec![
            ConfigDefaulted::Color { field: "base_color", value: 0x1000000 },
            ConfigDefaulted::DoorType("revolving".into()),
            ConfigDefaulted::Scale(-2.0),
        ]);
    }

    #[test]
    fn empty_raw_style_is_the_default() {
        let (config, defaulted) = StyleConfig::from_raw(&RawStyle::default());
        assert_eq!(config, StyleConfig::default());
        assert!(defaulted.is_empty());
    }

    #[test]
    fn nan_scale_is_defaulted() {
        let raw = RawStyle { scale: Some(f32::NAN), ..default() };
        let (config, defaulted) = StyleConfig::from_raw(&raw);
        assert_eq!(config.scale, DEFAULT_SCALE);
        assert_eq!(defaulted.len(), 1);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(hex_color(0xff0000), Color::srgb_u8(255, 0, 0));
        assert_eq!(hex_color(0x537d90), Color::srgb_u8(0x53, 0x7d, 0x90));
    }
}
