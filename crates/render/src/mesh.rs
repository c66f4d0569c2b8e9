use crate::view::NormalMode;
use glam::Vec3;
use rubik_common::FaceSlot;

/// Corner offsets of a unit cube centered on the origin.
#[rustfmt::skip]
pub const CORNERS: [[f32; 3]; 8] = [
    [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5],
    [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
    [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5],
    [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
];

/// Corner indices of each quad, in [`FaceSlot::ALL`] order.
#[rustfmt::skip]
pub const FACE_QUADS: [[u16; 4]; 6] = [
    [0, 1, 2, 3], // front
    [4, 5, 6, 7], // back
    [0, 1, 5, 4], // bottom
    [2, 3, 7, 6], // top
    [0, 3, 7, 4], // left
    [1, 2, 6, 5], // right
];

/// Corner index pairs of the twelve border lines.
#[rustfmt::skip]
pub const EDGES: [[u16; 2]; 12] = [
    [0, 1], [1, 2], [2, 3], [3, 0],
    [4, 5], [5, 6], [6, 7], [7, 4],
    [0, 4], [1, 5], [2, 6], [3, 7],
];

/// A vertex of the cubelet face mesh.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceVertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Which face slot this vertex belongs to; selects the instance color.
    pub slot: u32,
}

/// Geometry of one unit cubelet, generated once and instanced 27 times.
#[derive(Debug, Clone)]
pub struct CubeletMesh {
    /// Four vertices per face slot so each slot can carry its own normal.
    pub face_vertices: Vec<FaceVertex>,
    /// Two triangles per face slot.
    pub face_indices: Vec<u16>,
    /// Endpoint pairs of the border lines.
    pub edge_vertices: Vec<Vec3>,
}

impl CubeletMesh {
    pub fn new(normals: NormalMode) -> Self {
        let corner = |i: u16| Vec3::from_array(CORNERS[i as usize]);

        let mut face_vertices = Vec::with_capacity(24);
        let mut face_indices = Vec::with_capacity(36);
        for (slot, quad) in FaceSlot::ALL.iter().zip(FACE_QUADS) {
            let base = face_vertices.len() as u16;
            for &i in &quad {
                face_vertices.push(FaceVertex {
                    position: corner(i),
                    normal: normals.object_normal(*slot),
                    slot: slot.index() as u32,
                });
            }
            face_indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
        }

        let edge_vertices = EDGES
            .iter()
            .flat_map(|&[a, b]| [corner(a), corner(b)])
            .collect();

        Self {
            face_vertices,
            face_indices,
            edge_vertices,
        }
    }
}
