// GEOMETRY UTILS
// ray tests are done in the local space of a primitive, so every shape is axis aligned
// and centered on the origin. the ray direction does not need to be normalized,
// the returned parameter t is the one of the ray that was passed in

use bevy::prelude::*;

const EPSILON: f32 = 1e-6;

/// Axis aligned bounds of a point set
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl Bounds {
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }
}

/// Computes the bounds of a point cloud
/// # Returns `None` for an empty iterator
pub fn bounds(points: impl IntoIterator<Item = Vec3>) -> Option<Bounds> {
    let mut points = points.into_iter();
    let first = points.next()?;
    let mut bounds = Bounds { min: first, max: first };
    for point in points {
        bounds.min = bounds.min.min(point);
        bounds.max = bounds.max.max(point);
    }
    Some(bounds)
}

/// Slab test against a box centered on the origin
/// # Returns the entry parameter, or the exit parameter if the origin is inside the box
pub fn ray_cuboid(origin: Vec3, direction: Vec3, half_size: Vec3) -> Option<f32> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let o = origin[axis];
        let d = direction[axis];
        let (lo, hi) = (-half_size[axis], half_size[axis]);

        if d.abs() < EPSILON {
            // parallel to this slab, must already be between its planes
            if o < lo || o > hi {
                return None;
            }
            continue;
        }

        let t1 = (lo - o) / d;
        let t2 = (hi - o) / d;
        let (near, far) = if t1 <= t2 { (t1, t2) } else { (t2, t1) };
        t_min = t_min.max(near);
        t_max = t_max.min(far);
        if t_max < t_min {
            return None;
        }
    }

    if t_max < 0.0 {
        return None; // box is behind the ray
    }
    Some(if t_min >= 0.0 { t_min } else { t_max })
}

/// Intersection with the z = 0 plane
/// # Returns the ray parameter and the hit point in plane coordinates
pub fn ray_plane_z(origin: Vec3, direction: Vec3) -> Option<(f32, Vec2)> {
    // parallel to the plane
    if direction.z.abs() < EPSILON {
        return None;
    }

    let t = -origin.z / direction.z;
    if t < 0.0 {
        return None; // plane behind the ray
    }

    let point = origin + direction * t;
    Some((t, point.truncate()))
}

/// Flat rectangle in the XY plane, centered on the origin
pub fn ray_rectangle(origin: Vec3, direction: Vec3, half_size: Vec2) -> Option<f32> {
    let (t, point) = ray_plane_z(origin, direction)?;
    (point.x.abs() <= half_size.x && point.y.abs() <= half_size.y).then_some(t)
}

/// Flat disc in the XY plane, centered on the origin
pub fn ray_disc(origin: Vec3, direction: Vec3, radius: f32) -> Option<f32> {
    let (t, point) = ray_plane_z(origin, direction)?;
    (point.length_squared() <= radius * radius).then_some(t)
}

/// Möller–Trumbore ray/triangle test, double sided
/// https://en.wikipedia.org/wiki/M%C3%B6ller%E2%80%93Trumbore_intersection_algorithm
pub fn ray_triangle(origin: Vec3, direction: Vec3, [a, b, c]: [Vec3; 3]) -> Option<f32> {
    let edge1 = b - a;
    let edge2 = c - a;
    let p = direction.cross(edge2);
    let det = edge1.dot(p);

    // ray lies in the triangle plane
    if det.abs() < EPSILON {
        return None;
    }

    let inv_det = 1.0 / det;
    let s = origin - a;
    let u = s.dot(p) * inv_det;
    if !(0.0..=1.0).contains(&u) {
        return None;
    }

    let q = s.cross(edge1);
    let v = direction.dot(q) * inv_det;
    if v < 0.0 || u + v > 1.0 {
        return None;
    }

    let t = edge2.dot(q) * inv_det;
    (t >= 0.0).then_some(t)
}

/// Face normal of a triangle, counter-clockwise winding
pub fn triangle_normal([a, b, c]: [Vec3; 3]) -> Vec3 {
    (b - a).cross(c - a).normalize_or_zero()
}
