//! Static mesh data and vertex formats.

use glam::{Vec2, Vec3};

// ==================== VERTEX FORMATS ====================

/// 32-byte lit vertex: position, normal, texture coordinates.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MeshVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
}

impl MeshVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3, 2 => Float32x2];

    const fn new(position: [f32; 3], normal: [f32; 3], uv: [f32; 2]) -> Self {
        Self {
            position,
            normal,
            uv,
        }
    }

    /// Vertex buffer layout matching `@location(0..3)`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// 44-byte normal-mapped vertex: position, normal, texture coordinates and
/// tangent.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct TangentVertex {
    /// Object-space position.
    pub position: [f32; 3],
    /// Object-space normal.
    pub normal: [f32; 3],
    /// Texture coordinates.
    pub uv: [f32; 2],
    /// Object-space tangent (direction of increasing u).
    pub tangent: [f32; 3],
}

impl TangentVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 4] = wgpu::vertex_attr_array![
        0 => Float32x3,
        1 => Float32x3,
        2 => Float32x2,
        3 => Float32x3,
    ];

    /// Vertex buffer layout matching `@location(0..4)`.
    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<Self>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Position-only vertex layout for the light marker and skybox cubes.
#[must_use]
pub fn position_layout() -> wgpu::VertexBufferLayout<'static> {
    const ATTRIBUTES: [wgpu::VertexAttribute; 1] = wgpu::vertex_attr_array![0 => Float32x3];
    wgpu::VertexBufferLayout {
        array_stride: size_of::<[f32; 3]>() as wgpu::BufferAddress,
        step_mode: wgpu::VertexStepMode::Vertex,
        attributes: &ATTRIBUTES,
    }
}

// ==================== MESHES ====================

const UP: [f32; 3] = [0.0, 1.0, 0.0];

/// 20x20 ground quad at `y = -0.5`, texture tiled ten times.
pub const GROUND: [MeshVertex; 6] = [
    MeshVertex::new([10.0, -0.5, 10.0], UP, [10.0, 0.0]),
    MeshVertex::new([-10.0, -0.5, 10.0], UP, [0.0, 0.0]),
    MeshVertex::new([-10.0, -0.5, -10.0], UP, [0.0, 10.0]),
    MeshVertex::new([10.0, -0.5, 10.0], UP, [10.0, 0.0]),
    MeshVertex::new([-10.0, -0.5, -10.0], UP, [0.0, 10.0]),
    MeshVertex::new([10.0, -0.5, -10.0], UP, [10.0, 10.0]),
];

/// Corner positions of the 2-unit cube, six per face, faces ordered
/// back, front, left, right, bottom, top.
const CUBE_CORNERS: [[f32; 3]; 36] = [
    // back
    [-1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    // front
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, -1.0, 1.0],
    // left
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    // right
    [1.0, 1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    // bottom
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    // top
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
];

const FACE_NORMALS: [[f32; 3]; 6] = [
    [0.0, 0.0, -1.0],
    [0.0, 0.0, 1.0],
    [-1.0, 0.0, 0.0],
    [1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
    [0.0, 1.0, 0.0],
];

const CUBE_UVS: [[f32; 2]; 36] = [
    [0.0, 0.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [0.0, 1.0],
    //
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    //
    [1.0, 0.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [0.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
    //
    [1.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [0.0, 1.0],
    [1.0, 0.0],
    [0.0, 0.0],
    //
    [0.0, 1.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [1.0, 0.0],
    [0.0, 0.0],
    [0.0, 1.0],
    //
    [0.0, 1.0],
    [1.0, 0.0],
    [1.0, 1.0],
    [1.0, 0.0],
    [0.0, 1.0],
    [0.0, 0.0],
];

/// 36-vertex textured box spanning `[-1, 1]` on every axis.
#[must_use]
pub fn box_vertices() -> Vec<MeshVertex> {
    CUBE_CORNERS
        .iter()
        .zip(CUBE_UVS)
        .enumerate()
        .map(|(i, (&position, uv))| MeshVertex::new(position, FACE_NORMALS[i / 6], uv))
        .collect()
}

/// 36 positions of the `[-1, 1]` cube, used by the light marker and skybox.
#[must_use]
pub fn cube_positions() -> &'static [[f32; 3]; 36] {
    &CUBE_CORNERS
}

/// Unit wall quad in the XY plane facing -Z (toward the start camera),
/// with per-triangle tangents. `u` runs along -X so the texture reads
/// left to right from the front.
#[must_use]
pub fn wall_vertices() -> Vec<TangentVertex> {
    let corners = [
        (Vec3::new(1.0, 1.0, 0.0), Vec2::new(0.0, 1.0)),
        (Vec3::new(1.0, -1.0, 0.0), Vec2::new(0.0, 0.0)),
        (Vec3::new(-1.0, -1.0, 0.0), Vec2::new(1.0, 0.0)),
        (Vec3::new(-1.0, 1.0, 0.0), Vec2::new(1.0, 1.0)),
    ];
    let normal = Vec3::NEG_Z;

    [[0_usize, 1, 2], [0, 2, 3]]
        .into_iter()
        .flat_map(|tri| {
            let [a, b, c] = tri.map(|i| corners[i]);
            let tangent = triangle_tangent([a.0, b.0, c.0], [a.1, b.1, c.1]);
            [a, b, c].map(|(position, uv)| TangentVertex {
                position: position.to_array(),
                normal: normal.to_array(),
                uv: uv.to_array(),
                tangent: tangent.to_array(),
            })
        })
        .collect()
}

/// Tangent of a triangle from its edges and UV deltas.
///
/// Solves `edge = du * T + dv * B` for `T`. Degenerate UV mappings fall
/// back to the first edge direction.
#[must_use]
pub fn triangle_tangent(positions: [Vec3; 3], uvs: [Vec2; 3]) -> Vec3 {
    let edge1 = positions[1] - positions[0];
    let edge2 = positions[2] - positions[0];
    let duv1 = uvs[1] - uvs[0];
    let duv2 = uvs[2] - uvs[0];

    let det = duv1.x * duv2.y - duv2.x * duv1.y;
    if det.abs() < f32::EPSILON {
        return edge1.normalize_or_zero();
    }
    ((edge1 * duv2.y - edge2 * duv1.y) / det).normalize_or_zero()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_normals_point_out_of_each_face() {
        let vertices = box_vertices();
        assert_eq!(vertices.len(), 36);
        for v in &vertices {
            let p = Vec3::from_array(v.position);
            let n = Vec3::from_array(v.normal);
            // The corner lies on the face the normal points out of.
            assert_eq!(p.dot(n), 1.0, "{p} / {n}");
        }
    }

    #[test]
    fn ground_is_flat_and_tiled() {
        assert!(GROUND.iter().all(|v| v.position[1] == -0.5));
        let max_u = GROUND.iter().map(|v| v.uv[0]).fold(0.0, f32::max);
        assert_eq!(max_u, 10.0);
    }

    #[test]
    fn wall_tangent_follows_u() {
        let vertices = wall_vertices();
        assert_eq!(vertices.len(), 6);
        for v in &vertices {
            let t = Vec3::from_array(v.tangent);
            assert!(t.abs_diff_eq(Vec3::NEG_X, 1e-6), "{t}");
            assert!(t.dot(Vec3::from_array(v.normal)).abs() < 1e-6);
        }
    }

    #[test]
    fn wall_front_faces_start_camera() {
        let camera = crate::camera::Camera::default();
        let wall = crate::scene::Scene::DEFAULT.wall.unwrap();
        let to_camera = (camera.position - wall.position).normalize();
        for v in wall_vertices() {
            let n = Vec3::from_array(v.normal);
            assert!(n.dot(to_camera) > 0.9, "{n}");
            // Bitangent as the shader builds it must point along +v (up).
            let b = n.cross(Vec3::from_array(v.tangent));
            assert!(b.abs_diff_eq(Vec3::Y, 1e-6), "{b}");
        }
    }

    #[test]
    fn tangent_of_rotated_uvs() {
        // u increases along -Y here.
        let t = triangle_tangent(
            [Vec3::ZERO, Vec3::new(0.0, -1.0, 0.0), Vec3::X],
            [Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(0.0, 1.0)],
        );
        assert!(t.abs_diff_eq(Vec3::NEG_Y, 1e-6));
    }

    #[test]
    fn degenerate_uvs_fall_back_to_edge() {
        let t = triangle_tangent([Vec3::ZERO, Vec3::Z * 2.0, Vec3::X], [Vec2::ZERO; 3]);
        assert_eq!(t, Vec3::Z);
    }

    #[test]
    fn vertex_sizes_match_layouts() {
        assert_eq!(size_of::<MeshVertex>(), 32);
        assert_eq!(size_of::<TangentVertex>(), 44);
        assert_eq!(MeshVertex::layout().attributes.len(), 3);
        assert_eq!(TangentVertex::layout().attributes.len(), 4);
        assert_eq!(position_layout().array_stride, 12);
    }
}
