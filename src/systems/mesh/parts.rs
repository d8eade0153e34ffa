// house parts
// every part is a small rigid group of primitive pieces with one color
// the factory functions below never fail, style names are resolved before they get here

use bevy::prelude::*;

use super::geometry::{ray_cuboid, ray_disc, ray_rectangle, ray_triangle};
use super::mesh_gen::flat_triangle;

// gable triangle, counter-clockwise seen from +Z; apex above a 3 unit wide base
pub const GABLE_VERTICES: [Vec3; 3] = [
    Vec3::new(-1.0, 0.0, 0.0),
    Vec3::new(2.0, 0.0, 0.0),
    Vec3::new(0.5, 1.5, 0.0),
];

pub const TRIANGLE_WINDOW_SCALE: f32 = 0.6;

const DISC_OUTLINE_SEGMENTS: usize = 32;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PartKind {
    Base,
    Gable,
    Roof,
    Door,
    Window,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DoorType {
    Simple,
    #[default]
    Fancy,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum WindowType {
    #[default]
    Rectangular,
    Circular,
    Triangular,
}

impl DoorType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "simple" => Some(Self::Simple),
            "fancy" => Some(Self::Fancy),
            _ => None,
        }
    }
}

impl WindowType {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "rectangular" => Some(Self::Rectangular),
            "circular" => Some(Self::Circular),
            "triangular" => Some(Self::Triangular),
            _ => None,
        }
    }
}

/// Primitive shapes, all centered on their local origin
/// flat shapes lie in the XY plane and face +Z
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    Cuboid { size: Vec3 },
    Rectangle { size: Vec2 },
    Disc { radius: f32 },
    Triangle { vertices: [Vec3; 3] },
}

impl Shape {
    pub fn mesh(&self) -> Mesh {
        match *self {
            Shape::Cuboid { size } => Mesh::from(Cuboid::from_size(size)),
            Shape::Rectangle { size } => Mesh::from(Rectangle::from_size(size)),
            Shape::Disc { radius } => Mesh::from(Circle::new(radius)),
            Shape::Triangle { vertices } => flat_triangle(vertices),
        }
    }

    // points whose hull contains the shape, for bounds
    pub fn outline(&self) -> Vec<Vec3> {
        match *self {
            Shape::Cuboid { size } => {
                let h = size * 0.5;
                let mut corners = Vec::with_capacity(8);
                for x in [-h.x, h.x] {
                    for y in [-h.y, h.y] {
                        for z in [-h.z, h.z] {
                            corners.push(Vec3::new(x, y, z));
                        }
                    }
                }
                corners
            }
            Shape::Rectangle { size } => {
                let h = size * 0.5;
                vec![
                    Vec3::new(-h.x, -h.y, 0.0),
                    Vec3::new(h.x, -h.y, 0.0),
                    Vec3::new(h.x, h.y, 0.0),
                    Vec3::new(-h.x, h.y, 0.0),
                ]
            }
            Shape::Disc { radius } => (0..DISC_OUTLINE_SEGMENTS)
                .map(|i| {
                    let angle = i as f32 / DISC_OUTLINE_SEGMENTS as f32 * std::f32::consts::TAU;
                    Vec3::new(angle.cos() * radius, angle.sin() * radius, 0.0)
                })
                .collect(),
            Shape::Triangle { vertices } => vertices.to_vec(),
        }
    }

    /// Ray test in the shape's local space
    /// # Returns the ray parameter of the first hit
    pub fn raycast(&self, origin: Vec3, direction: Vec3) -> Option<f32> {
        match *self {
            Shape::Cuboid { size } => ray_cuboid(origin, direction, size * 0.5),
            Shape::Rectangle { size } => ray_rectangle(origin, direction, size * 0.5),
            Shape::Disc { radius } => ray_disc(origin, direction, radius),
            Shape::Triangle { vertices } => ray_triangle(origin, direction, vertices),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Piece {
    pub shape: Shape,
    pub transform: Transform,
}

impl Piece {
    pub fn new(shape: Shape) -> Self {
        Self { shape, transform: Transform::IDENTITY }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Part {
    pub kind: PartKind,
    pub color: Color,
    pub transform: Transform,
    pub pieces: Vec<Piece>,
}

impl Part {
    pub fn new(kind: PartKind, color: Color, pieces: Vec<Piece>) -> Self {
        Self { kind, color, transform: Transform::IDENTITY, pieces }
    }

    pub fn at(mut self, translation: Vec3) -> Self {
        self.transform.translation = translation;
        self
    }

    // rotation given as XYZ euler angles
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Quat::from_euler(EulerRot::XYZ, x, y, z);
        self
    }
}

pub fn make_gable(color: Color) -> Part {
    Part::new(PartKind::Gable, color, vec![Piece::new(Shape::Triangle { vertices: GABLE_VERTICES })])
}

pub fn make_door(color: Color, style: DoorType) -> Part {
    let pieces = match style {
        DoorType::Simple => vec![Piece::new(Shape::Rectangle { size: Vec2::new(1.0, 1.6) })],
        // arched door: shorter panel with a half-covered disc on top
        DoorType::Fancy => vec![
            Piece::new(Shape::Rectangle { size: Vec2::new(1.0, 1.2) }).at(Vec3::new(0.0, -0.2, 0.0)),
            Piece::new(Shape::Disc { radius: 0.5 }).at(Vec3::new(0.0, 0.4, 0.0)),
        ],
    };
    Part::new(PartKind::Door, color, pieces)
}

pub fn make_window(color: Color, style: WindowType) -> Part {
    let shape = match style {
        WindowType::Rectangular => Shape::Rectangle { size: Vec2::ONE },
        WindowType::Circular => Shape::Disc { radius: 0.5 },
        WindowType::Triangular => Shape::Triangle {
            vertices: GABLE_VERTICES.map(|v| v * TRIANGLE_WINDOW_SCALE),
        },
    };
    Part::new(PartKind::Window, color, vec![Piece::new(shape)])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn style_names_are_case_insensitive() {
        assert_eq!(DoorType::from_name("Simple"), Some(DoorType::Simple));
        assert_eq!(WindowType::from_name(" CIRCULAR "), Some(WindowType::Circular));
        assert_eq!(DoorType::from_name("revolving"), None);
        assert_eq!(WindowType::from_name(""), None);
    }

    #[test]
    fn defaults_match_documented_fallbacks() {
        assert_eq!(DoorType::default(), DoorType::Fancy);
        assert_eq!(WindowType::default(), WindowType::Rectangular);
    }

    #[test]
    fn gable_ignores_everything_but_color() {
        let a = make_gable(Color::WHITE);
        let b = make_gable(Color::BLACK);
        assert_eq!(a.pieces, b.pieces);
        assert_eq!(a.kind, PartKind::Gable);
    }

    #[test]
    fn simple_door_is_one_rectangle() {
        let door = make_door(Color::WHITE, DoorType::Simple);
        assert_eq!(door.pieces.len(), 1);
        assert_eq!(door.pieces[0].shape, Shape::Rectangle { size: Vec2::new(1.0, 1.6) });
    }

    #[test]
    fn fancy_door_is_panel_and_arch() {
        let door = make_door(Color::WHITE, DoorType::Fancy);
        let shapes: Vec<Shape> = door.pieces.iter().map(|p| p.shape).collect();
        assert_eq!(shapes, vec![
            Shape::Rectangle { size: Vec2::new(1.0, 1.2) },
            Shape::Disc { radius: 0.5 },
        ]);
        // arch sits above the panel
        assert!(door.pieces[1].transform.translation.y > door.pieces[0].transform.translation.y);
    }

    #[test]
    fn triangular_window_is_scaled_gable() {
        let window = make_window(Color::WHITE, WindowType::Triangular);
        let Shape::Triangle { vertices } = window.pieces[0].shape else {
            panic!("expected a triangle");
        };
        assert!(vertices[2].abs_diff_eq(Vec3::new(0.3, 0.9, 0.0), 1e-6));
        let gable_width = GABLE_VERTICES[1].x - GABLE_VERTICES[0].x;
        let width = vertices[1].x - vertices[0].x;
        assert!((width / gable_width - TRIANGLE_WINDOW_SCALE).abs() < 1e-6);
    }

    #[test]
    fn window_shapes() {
        assert_eq!(make_window(Color::WHITE, WindowType::Rectangular).pieces[0].shape, Shape::Rectangle { size: Vec2::ONE });
        assert_eq!(make_window(Color::WHITE, WindowType::Circular).pieces[0].shape, Shape::Disc { radius: 0.5 });
    }

    #[test]
    fn outline_counts() {
        assert_eq!(Shape::Cuboid { size: Vec3::ONE }.outline().len(), 8);
        assert_eq!(Shape::Rectangle { size: Vec2::ONE }.outline().len(), 4);
        assert_eq!(Shape::Disc { radius: 1.0 }.outline().len(), DISC_OUTLINE_SEGMENTS);
    }
}
