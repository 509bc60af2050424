//! Surface geometry an effect kernel is evaluated over.
//!
//! Pixel effects cover the full viewport and need no geometry beyond the
//! pixel grid. The blob effect runs on a subdivided icosahedron whose
//! vertices carry a tangent frame for the finite-difference normals.

use bytemuck::{Pod, Zeroable};
use gallery::SurfaceSpec;
use glam::{vec3, Vec3};

/// One undisplaced mesh vertex.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct MeshVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub tangent: [f32; 3],
}

/// Vertex after kernel displacement, as handed to the presentation layer.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct DisplacedVertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Debug, Clone)]
pub struct MeshSurface {
    pub vertices: Vec<MeshVertex>,
    pub indices: Vec<u32>,
}

/// The canvas of one effect instance.
#[derive(Debug, Clone)]
pub enum Surface {
    /// Full-viewport quad; the pixel loop is the geometry.
    Quad,
    Mesh(MeshSurface),
}

impl Surface {
    pub fn from_spec(spec: SurfaceSpec) -> Self {
        match spec {
            SurfaceSpec::Quad => Surface::Quad,
            SurfaceSpec::Icosphere { radius, detail } => {
                Surface::Mesh(icosphere(radius, detail))
            }
        }
    }
}

/// Builds a subdivided icosahedron. Each of the 20 base faces becomes a
/// triangular grid with `detail` rows; shared edges duplicate vertices,
/// which is harmless because every attribute is radially symmetric.
pub fn icosphere(radius: f32, detail: u32) -> MeshSurface {
    let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
    let corners = [
        vec3(-1.0, t, 0.0),
        vec3(1.0, t, 0.0),
        vec3(-1.0, -t, 0.0),
        vec3(1.0, -t, 0.0),
        vec3(0.0, -1.0, t),
        vec3(0.0, 1.0, t),
        vec3(0.0, -1.0, -t),
        vec3(0.0, 1.0, -t),
        vec3(t, 0.0, -1.0),
        vec3(t, 0.0, 1.0),
        vec3(-t, 0.0, -1.0),
        vec3(-t, 0.0, 1.0),
    ];
    const FACES: [[usize; 3]; 20] = [
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];

    let detail = detail.max(1);
    let rows = detail as usize;
    let verts_per_face = (rows + 1) * (rows + 2) / 2;
    let mut vertices = Vec::with_capacity(FACES.len() * verts_per_face);
    let mut indices = Vec::with_capacity(FACES.len() * rows * rows * 3);

    for face in FACES {
        let a = corners[face[0]];
        let b = corners[face[1]];
        let c = corners[face[2]];
        let base = vertices.len() as u32;

        // Row-major barycentric grid: row i has i + 1 vertices.
        for i in 0..=rows {
            for j in 0..=i {
                let fi = i as f32 / rows as f32;
                let fj = if i == 0 { 0.0 } else { j as f32 / i as f32 };
                let point = a.lerp(b, fi).lerp(a.lerp(c, fi), fj);
                let normal = point.try_normalize().unwrap_or(Vec3::Y);
                vertices.push(MeshVertex {
                    position: (normal * radius).to_array(),
                    normal: normal.to_array(),
                    tangent: tangent_for(normal).to_array(),
                });
            }
        }

        let row_start = |i: usize| -> u32 { base + (i * (i + 1) / 2) as u32 };
        for i in 0..rows {
            for j in 0..=i {
                let top = row_start(i) + j as u32;
                let below_left = row_start(i + 1) + j as u32;
                let below_right = below_left + 1;
                indices.extend_from_slice(&[top, below_left, below_right]);
                if j < i {
                    indices.extend_from_slice(&[top, below_right, top + 1]);
                }
            }
        }
    }

    MeshSurface { vertices, indices }
}

/// Stable tangent perpendicular to the radial normal, with a pole fallback.
fn tangent_for(normal: Vec3) -> Vec3 {
    Vec3::Y
        .cross(normal)
        .try_normalize()
        .unwrap_or_else(|| Vec3::X.cross(normal).normalize())
}
