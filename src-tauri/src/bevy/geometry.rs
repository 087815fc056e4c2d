//! Cubie meshes
//!
//! A rounded box is built from six subdivided faces whose vertices are
//! pulled onto the surface of an inner box inflated by the edge radius.
//! Grid lines are packed into the rounded bands so the curvature stays
//! smooth while the flat middle of each face is a single quad.

use bevy::{
    asset::RenderAssetUsages,
    mesh::{Indices, PrimitiveTopology},
    prelude::*,
};

/// Outward normal, then the two in-plane directions (u x v = normal)
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::Y, Vec3::Z),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::Z, Vec3::X),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::Y, Vec3::X),
];

/// Grid coordinates along one face edge, from `-half` to `half`
fn band_coordinates(half: f32, radius: f32, smoothness: u32) -> Vec<f32> {
    let inner = half - radius;
    let segments = smoothness.max(1);
    let mut coords = Vec::with_capacity(2 * segments as usize + 2);
    for i in 0..=segments {
        coords.push(-half + radius * i as f32 / segments as f32);
    }
    for i in 0..=segments {
        coords.push(inner + radius * i as f32 / segments as f32);
    }
    coords
}

/// A box of edge length `size` with edges rounded to `radius`
pub fn rounded_box(size: f32, radius: f32, smoothness: u32) -> Mesh {
    let half = size / 2.0;
    let radius = radius.clamp(0.0, half);
    let inner = Vec3::splat(half - radius);
    let coords = band_coordinates(half, radius, smoothness);
    let n = coords.len();

    let mut positions = Vec::with_capacity(6 * n * n);
    let mut normals = Vec::with_capacity(6 * n * n);
    let mut indices = Vec::with_capacity(6 * (n - 1) * (n - 1) * 6);

    for (normal, u, v) in FACES {
        let base = positions.len() as u32;
        for &b in &coords {
            for &a in &coords {
                let flat = normal * half + u * a + v * b;
                let core = flat.clamp(-inner, inner);
                let outward = (flat - core).try_normalize().unwrap_or(normal);
                positions.push((core + outward * radius).to_array());
                normals.push(outward.to_array());
            }
        }
        for j in 0..n - 1 {
            for i in 0..n - 1 {
                let a = base + (j * n + i) as u32;
                let b = a + 1;
                let c = a + n as u32 + 1;
                let d = a + n as u32;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }
    }

    Mesh::new(
        PrimitiveTopology::TriangleList,
        RenderAssetUsages::default(),
    )
    .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, positions)
    .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, normals)
    .with_inserted_indices(Indices::U32(indices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<Vec3> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(values)) => {
                values.iter().map(|p| Vec3::from_array(*p)).collect()
            }
            _ => panic!("missing positions"),
        }
    }

    #[test]
    fn vertices_stay_inside_the_box() {
        let mesh = rounded_box(1.0, 0.08, 5);
        let positions = positions(&mesh);
        assert_eq!(positions.len(), 6 * 12 * 12);
        for p in positions {
            assert!(p.abs().max_element() <= 0.5 + 1e-5, "{p}");
        }
    }

    #[test]
    fn face_centres_reach_the_full_extent() {
        let mesh = rounded_box(1.0, 0.08, 5);
        let positions = positions(&mesh);
        for axis in [Vec3::X, Vec3::Y, Vec3::Z, Vec3::NEG_X, Vec3::NEG_Y, Vec3::NEG_Z] {
            let reach = positions.iter().map(|p| p.dot(axis)).fold(f32::MIN, f32::max);
            assert!((reach - 0.5).abs() < 1e-5);
        }
    }

    #[test]
    fn corners_are_rounded() {
        let mesh = rounded_box(1.0, 0.08, 5);
        let farthest = positions(&mesh)
            .into_iter()
            .map(Vec3::length)
            .fold(0.0, f32::max);
        let sharp_corner = Vec3::splat(0.5).length();
        assert!(farthest < sharp_corner - 0.01);
    }

    #[test]
    fn indices_cover_every_quad() {
        let mesh = rounded_box(1.0, 0.1, 2);
        let count = mesh.indices().map(|i| i.len()).unwrap_or(0);
        assert_eq!(count, 6 * 5 * 5 * 6);
    }
}
