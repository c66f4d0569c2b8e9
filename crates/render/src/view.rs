use glam::Vec3;
use rubik_common::{BACKGROUND_COLOR, BORDER_COLOR, BORDER_WIDTH, Color, FaceSlot};

/// Fixed camera and projection configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewParams {
    /// Vertical field of view in degrees.
    pub fov_y_degrees: f32,
    /// Width / height of the output surface.
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// The scene is pushed this far down -Z, away from the viewer.
    pub camera_distance: f32,
    pub clear_color: Color,
    pub border_color: Color,
    pub border_width: f32,
}

impl Default for ViewParams {
    fn default() -> Self {
        Self {
            fov_y_degrees: 45.0,
            aspect: 800.0 / 600.0,
            near: 0.1,
            far: 50.0,
            camera_distance: 6.0,
            clear_color: BACKGROUND_COLOR,
            border_color: BORDER_COLOR,
            border_width: BORDER_WIDTH,
        }
    }
}

impl ViewParams {
    pub fn with_size(width: u32, height: u32) -> Self {
        let mut view = Self::default();
        view.set_size(width, height);
        view
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }

    /// Eye position in scene space (before the model rotation).
    pub fn eye(&self) -> Vec3 {
        Vec3::new(0.0, 0.0, self.camera_distance)
    }
}

/// Where the lighting normal of a face vertex comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalMode {
    /// Every vertex uses the object-space +Z normal, turned only by the
    /// cube's rotation. All six quads of a cubelet shade alike.
    #[default]
    Constant,
    /// Each quad uses the geometric normal of its face slot.
    PerFace,
}

impl NormalMode {
    /// Object-space normal for vertices of `slot`.
    pub fn object_normal(self, slot: FaceSlot) -> Vec3 {
        match self {
            NormalMode::Constant => Vec3::Z,
            NormalMode::PerFace => slot.normal(),
        }
    }
}

/// A single positional light with color-tracked material.
///
/// Terms follow the classic fixed-function equation: the vertex color acts
/// as both ambient and diffuse reflectance, and the material's specular
/// reflectance is independent of it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    /// Light position in scene space.
    pub position: Vec3,
    pub ambient: f32,
    pub diffuse: f32,
    pub specular: f32,
    /// Global ambient added on top of the light's own ambient term.
    pub scene_ambient: f32,
    /// Material specular reflectance. Zero leaves highlights off.
    pub material_specular: f32,
    pub shininess: f32,
    pub normals: NormalMode,
}

impl Default for Lighting {
    fn default() -> Self {
        Self {
            position: Vec3::new(3.0, 3.0, 3.0),
            ambient: 0.5,
            diffuse: 0.9,
            specular: 1.0,
            scene_ambient: 0.2,
            material_specular: 0.0,
            shininess: 32.0,
            normals: NormalMode::Constant,
        }
    }
}

impl Lighting {
    pub fn with_normals(mut self, normals: NormalMode) -> Self {
        self.normals = normals;
        self
    }

    /// Ambient factor applied to every surface regardless of orientation.
    pub fn total_ambient(&self) -> f32 {
        self.scene_ambient + self.ambient
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_view_matches_window() {
        let view = ViewParams::default();
        assert_eq!(view.fov_y_degrees, 45.0);
        assert_eq!(view.near, 0.1);
        assert_eq!(view.far, 50.0);
        assert_eq!(view.eye(), Vec3::new(0.0, 0.0, 6.0));
        assert!((view.aspect - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn zero_height_does_not_divide_by_zero() {
        let view = ViewParams::with_size(640, 0);
        assert_eq!(view.aspect, 640.0);
    }

    #[test]
    fn total_ambient_adds_scene_and_light_terms() {
        let light = Lighting::default();
        assert!((light.total_ambient() - 0.7).abs() < 1e-6);
    }

    #[test]
    fn constant_normals_ignore_the_slot() {
        for slot in FaceSlot::ALL {
            assert_eq!(NormalMode::Constant.object_normal(slot), Vec3::Z);
        }
        assert_eq!(NormalMode::PerFace.object_normal(FaceSlot::Top), Vec3::Y);
        assert_eq!(NormalMode::PerFace.object_normal(FaceSlot::Front), Vec3::NEG_Z);
    }

    #[test]
    fn default_lighting_uses_constant_normals() {
        let light = Lighting::default();
        assert_eq!(light.normals, NormalMode::Constant);
        let per_face = light.with_normals(NormalMode::PerFace);
        assert_eq!(per_face.normals, NormalMode::PerFace);
        assert_eq!(per_face.position, light.position);
    }
}
