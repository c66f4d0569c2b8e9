use glam::{IVec3, Vec3};
use rubik_common::{Color, FACE_COLORS, Face, FaceSlot, HIDDEN_FACE_COLOR, face_color};
use serde::{Deserialize, Serialize};

/// Distance between neighbouring cubelet centers. Slightly above 1.0 so
/// adjacent faces do not z-fight.
pub const SPACING: f32 = 1.01;

/// How sticker colors are assigned to the six face slots of a cubelet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColorScheme {
    /// The i-th face-color table entry goes to the i-th face slot on every
    /// non-center cubelet, whatever direction that slot faces. This is the
    /// classic look of the viewer (the Up color lands on the `z - 0.5` quad).
    #[default]
    Positional,
    /// Each slot shows the color of the puzzle face it points toward, and
    /// only when the cubelet sits on that outer layer.
    FaceCorrect,
}

/// Returns true iff the position is the exact center of the assembly.
pub fn is_internal(position: Vec3) -> bool {
    position.x == 0.0 && position.y == 0.0 && position.z == 0.0
}

/// One unit sub-cube of the assembly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Cubelet {
    /// Grid coordinate, each component in `{-1, 0, 1}`.
    pub grid: IVec3,
    /// Center in scene space (`grid * SPACING`).
    pub position: Vec3,
}

impl Cubelet {
    pub fn new(grid: IVec3) -> Self {
        Self {
            grid,
            position: grid.as_vec3() * SPACING,
        }
    }

    pub fn is_internal(&self) -> bool {
        is_internal(self.position)
    }

    /// Colors for the six face slots, in [`FaceSlot::ALL`] order.
    pub fn face_colors(&self, scheme: ColorScheme) -> [Color; 6] {
        if self.is_internal() {
            return [HIDDEN_FACE_COLOR; 6];
        }
        match scheme {
            ColorScheme::Positional => FACE_COLORS.map(|(_, color)| color),
            ColorScheme::FaceCorrect => FaceSlot::ALL.map(|slot| self.outer_face_color(slot)),
        }
    }

    fn outer_face_color(&self, slot: FaceSlot) -> Color {
        let normal = slot.normal();
        // Outer layer along the slot normal: the grid component in that
        // direction is +1.
        if self.grid.as_vec3().dot(normal) < 1.0 {
            return HIDDEN_FACE_COLOR;
        }
        Face::ALL
            .into_iter()
            .find(|face| face.direction() == normal)
            .map(face_color)
            .unwrap_or(HIDDEN_FACE_COLOR)
    }
}

/// The full 3x3x3 arrangement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubeAssembly {
    cubelets: Vec<Cubelet>,
}

impl CubeAssembly {
    /// Build the 27 cubelets, x outermost and z innermost.
    pub fn new() -> Self {
        let mut cubelets = Vec::with_capacity(27);
        for x in -1..=1 {
            for y in -1..=1 {
                for z in -1..=1 {
                    cubelets.push(Cubelet::new(IVec3::new(x, y, z)));
                }
            }
        }
        tracing::debug!("built cube assembly with {} cubelets", cubelets.len());
        Self { cubelets }
    }

    pub fn cubelets(&self) -> &[Cubelet] {
        &self.cubelets
    }

    pub fn len(&self) -> usize {
        self.cubelets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cubelets.is_empty()
    }
}

impl Default for CubeAssembly {
    fn default() -> Self {
        Self::new()
    }
}
