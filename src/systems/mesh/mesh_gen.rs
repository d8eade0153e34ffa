use bevy::prelude::*;
use bevy::color::{ColorToComponents, Mix};
use bevy::render::mesh::{Indices, PrimitiveTopology, VertexAttributeValues};
use bevy::render::render_asset::RenderAssetUsages;

use super::geometry::triangle_normal;

// single flat shaded triangle, used for gables and triangular windows
// the one face normal is shared by all three vertices
pub fn flat_triangle(vertices: [Vec3; 3]) -> Mesh {
    let normal = triangle_normal(vertices);

    let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.to_array()).collect();
    let normals = vec![normal.to_array(); 3];

    // UV coordinates based on position relative to bounds
    let min_x = vertices.iter().map(|v| v.x).fold(f32::INFINITY, f32::min);
    let max_x = vertices.iter().map(|v| v.x).fold(f32::NEG_INFINITY, f32::max);
    let min_y = vertices.iter().map(|v| v.y).fold(f32::INFINITY, f32::min);
    let max_y = vertices.iter().map(|v| v.y).fold(f32::NEG_INFINITY, f32::max);
    let uvs: Vec<[f32; 2]> = vertices
        .iter()
        .map(|v| [
            (v.x - min_x) / (max_x - min_x).max(f32::EPSILON),
            (v.y - min_y) / (max_y - min_y).max(f32::EPSILON),
        ])
        .collect();

    let mut mesh = Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );

    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    mesh.insert_attribute(Mesh::ATTRIBUTE_UV_0, uvs);
    mesh.insert_indices(Indices::U32(vec![0, 1, 2]));

    mesh
}

/// Vertical sky gradient for a point on the dome
/// `offset` lifts the horizon, `exponent` shapes the blend towards `top`
pub fn sky_gradient(position: Vec3, top: LinearRgba, bottom: LinearRgba, offset: f32, exponent: f32) -> LinearRgba {
    let height = (position + Vec3::Y * offset).normalize_or_zero().y;
    let t = height.max(0.0).powf(exponent).clamp(0.0, 1.0);
    bottom.mix(&top, t)
}

// bake the gradient into vertex colors so the dome needs no custom shader
pub fn paint_sky_gradient(mesh: &mut Mesh, top: Color, bottom: Color, offset: f32, exponent: f32) {
    let (top, bottom) = (top.to_linear(), bottom.to_linear());

    let Some(VertexAttributeValues::Float32x3(positions)) = mesh.attribute(Mesh::ATTRIBUTE_POSITION) else {
        return;
    };

    let colors: Vec<[f32; 4]> = positions
        .iter()
        .map(|p| sky_gradient(Vec3::from_array(*p), top, bottom, offset, exponent).to_f32_array())
        .collect();

    mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
}
