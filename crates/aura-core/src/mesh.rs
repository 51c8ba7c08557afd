//! Procedural meshes for ripples and flowers.
//!
//! Both are built once and then only scaled/tinted by their owners, so the
//! vertex layout is kept plain enough to upload directly.

use crate::constants::*;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

impl Mesh {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// Flat quad on the XZ plane, large enough for a ripple of `max_radius`.
pub fn ripple_quad(max_radius: f32) -> Mesh {
    let h = max_radius.max(0.0);
    let corners = [
        ([-h, 0.0, -h], [0.0, 0.0]),
        ([h, 0.0, -h], [1.0, 0.0]),
        ([-h, 0.0, h], [0.0, 1.0]),
        ([h, 0.0, h], [1.0, 1.0]),
    ];
    Mesh {
        vertices: corners
            .iter()
            .map(|&(position, uv)| MeshVertex { position, uv })
            .collect(),
        indices: vec![0, 2, 1, 2, 3, 1],
    }
}

/// Flower of `petals` triangle pairs fanned around a center vertex at the origin.
///
/// Each petal owns three vertices: the inner edge at its start angle, a raised
/// tip twisted slightly forward, and the inner edge at the next angle.
pub fn flower_mesh(petals: usize) -> Mesh {
    let petals = petals.max(1);
    let mut vertices = Vec::with_capacity(petals * 3 + 1);
    let mut indices = Vec::with_capacity(petals * 6);
    vertices.push(MeshVertex {
        position: [0.0, 0.0, 0.0],
        uv: [0.5, 0.5],
    });

    let step = std::f32::consts::TAU / petals as f32;
    for i in 0..petals {
        let angle = step * i as f32;
        let next = step * (i + 1) as f32;
        let tip = angle + PETAL_TIP_TWIST_RAD;
        let base = vertices.len() as u32;
        vertices.push(MeshVertex {
            position: ring_point(angle, PETAL_INNER_RADIUS, 0.0),
            uv: [0.3, 0.3],
        });
        vertices.push(MeshVertex {
            position: ring_point(tip, PETAL_TIP_RADIUS, PETAL_TIP_HEIGHT),
            uv: [0.8, 0.8],
        });
        vertices.push(MeshVertex {
            position: ring_point(next, PETAL_INNER_RADIUS, 0.0),
            uv: [0.3, 0.3],
        });
        indices.extend_from_slice(&[0, base, base + 1, 0, base + 1, base + 2]);
    }
    Mesh { vertices, indices }
}

/// Offsets of `count` flowers evenly spaced on a circle of `radius` (XZ plane).
pub fn flower_ring(count: usize, radius: f32) -> Vec<Vec3> {
    if count == 0 {
        return Vec::new();
    }
    let step = std::f32::consts::TAU / count as f32;
    (0..count)
        .map(|i| Vec3::from(ring_point(step * i as f32, radius, 0.0)))
        .collect()
}

#[inline]
fn ring_point(angle: f32, radius: f32, height: f32) -> [f32; 3] {
    [angle.cos() * radius, height, angle.sin() * radius]
}
