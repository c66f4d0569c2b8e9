use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Linear RGB color with components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Opaque RGBA, the layout GPU buffers expect.
    pub fn to_rgba(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.r, self.g, self.b)
    }
}

/// The six canonical faces of the puzzle, in face-color table order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Up,
    Down,
    Front,
    Back,
    Left,
    Right,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::Up,
        Face::Down,
        Face::Front,
        Face::Back,
        Face::Left,
        Face::Right,
    ];

    /// Outward direction of this face on the assembled cube.
    pub fn direction(self) -> Vec3 {
        match self {
            Face::Up => Vec3::Y,
            Face::Down => Vec3::NEG_Y,
            Face::Front => Vec3::Z,
            Face::Back => Vec3::NEG_Z,
            Face::Left => Vec3::NEG_X,
            Face::Right => Vec3::X,
        }
    }

    pub fn letter(self) -> char {
        match self {
            Face::Up => 'U',
            Face::Down => 'D',
            Face::Front => 'F',
            Face::Back => 'B',
            Face::Left => 'L',
            Face::Right => 'R',
        }
    }
}

/// One of the six quads of the cubelet geometry, in draw order.
///
/// Slot names describe the quad's vertex winding in the cubelet mesh, not a
/// face of the puzzle: the `Front` slot is the quad at `z - 0.5`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FaceSlot {
    Front,
    Back,
    Bottom,
    Top,
    Left,
    Right,
}

impl FaceSlot {
    pub const ALL: [FaceSlot; 6] = [
        FaceSlot::Front,
        FaceSlot::Back,
        FaceSlot::Bottom,
        FaceSlot::Top,
        FaceSlot::Left,
        FaceSlot::Right,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Geometric outward normal of the quad occupying this slot.
    pub fn normal(self) -> Vec3 {
        match self {
            FaceSlot::Front => Vec3::NEG_Z,
            FaceSlot::Back => Vec3::Z,
            FaceSlot::Bottom => Vec3::NEG_Y,
            FaceSlot::Top => Vec3::Y,
            FaceSlot::Left => Vec3::NEG_X,
            FaceSlot::Right => Vec3::X,
        }
    }
}

/// Face-color table. Iteration order is part of the contract: positional
/// coloring hands the i-th entry to the i-th [`FaceSlot`].
pub const FACE_COLORS: [(Face, Color); 6] = [
    (Face::Up, Color::rgb(1.0, 1.0, 1.0)),
    (Face::Down, Color::rgb(1.0, 0.9, 0.2)),
    (Face::Front, Color::rgb(0.1, 0.8, 0.1)),
    (Face::Back, Color::rgb(0.1, 0.2, 0.9)),
    (Face::Left, Color::rgb(1.0, 0.5, 0.2)),
    (Face::Right, Color::rgb(0.9, 0.1, 0.1)),
];

/// Color of faces that never show a sticker.
pub const HIDDEN_FACE_COLOR: Color = Color::rgb(0.1, 0.1, 0.1);

/// Color of the edge lines drawn around every cubelet.
pub const BORDER_COLOR: Color = Color::rgb(0.15, 0.15, 0.15);

/// Requested border line width in pixels.
pub const BORDER_WIDTH: f32 = 2.0;

/// Frame clear color.
pub const BACKGROUND_COLOR: Color = Color::rgb(0.2, 0.2, 0.2);

/// Look up a face in the face-color table.
pub fn face_color(face: Face) -> Color {
    FACE_COLORS
        .iter()
        .find(|(f, _)| *f == face)
        .map(|(_, c)| *c)
        .unwrap_or(HIDDEN_FACE_COLOR)
}

/// Absolute orientation of the whole assembly, in degrees.
///
/// Both angles are reapplied from scratch every frame: X first, then Y, about
/// world-fixed axes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rotation {
    pub x_degrees: f32,
    pub y_degrees: f32,
}

impl Rotation {
    pub fn new(x_degrees: f32, y_degrees: f32) -> Self {
        Self {
            x_degrees,
            y_degrees,
        }
    }

    /// Model matrix `Rx(x) * Ry(y)`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_rotation_x(self.x_degrees.to_radians())
            * Mat4::from_rotation_y(self.y_degrees.to_radians())
    }
}

impl std::fmt::Display for Rotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={:.1}deg y={:.1}deg", self.x_degrees, self.y_degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_table_has_six_distinct_faces() {
        assert_eq!(FACE_COLORS.len(), 6);
        for (i, (face, _)) in FACE_COLORS.iter().enumerate() {
            assert_eq!(*face, Face::ALL[i]);
        }
    }

    #[test]
    fn face_color_lookup() {
        assert_eq!(face_color(Face::Up), Color::rgb(1.0, 1.0, 1.0));
        assert_eq!(face_color(Face::Right), Color::rgb(0.9, 0.1, 0.1));
    }

    #[test]
    fn slot_normals_are_unit_axes() {
        for slot in FaceSlot::ALL {
            assert_eq!(slot.normal().length(), 1.0);
        }
        assert_eq!(FaceSlot::Front.index(), 0);
        assert_eq!(FaceSlot::Right.index(), 5);
    }

    #[test]
    fn rotation_default_is_identity() {
        assert_eq!(Rotation::default().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn rotation_applies_x_outermost() {
        let r = Rotation::new(90.0, 90.0);
        // Ry maps +X to -Z, then Rx maps -Z to +Y.
        let p = r.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::Y).length() < 1e-5, "got {p}");
    }
}
