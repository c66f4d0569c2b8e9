use glam::{Mat4, Vec3};
use rubik_common::Color;
use rubik_kernel::{ColorScheme, CubeAssembly};
use serde::{Deserialize, Serialize};

/// Per-cubelet instance data: where it sits and what each face slot shows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeletInstance {
    pub offset: Vec3,
    pub face_colors: [Color; 6],
    pub internal: bool,
}

impl CubeletInstance {
    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.offset)
    }
}

/// Static description of what gets drawn each frame.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CubeScene {
    pub scheme: ColorScheme,
    pub instances: Vec<CubeletInstance>,
}

impl CubeScene {
    pub fn new(cube: &CubeAssembly, scheme: ColorScheme) -> Self {
        let instances = cube
            .cubelets()
            .iter()
            .map(|c| CubeletInstance {
                offset: c.position,
                face_colors: c.face_colors(scheme),
                internal: c.is_internal(),
            })
            .collect();
        Self { scheme, instances }
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubik_common::{FACE_COLORS, HIDDEN_FACE_COLOR};

    #[test]
    fn scene_instances_every_cubelet() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        assert_eq!(scene.len(), 27);
        assert_eq!(scene.instances.iter().filter(|i| i.internal).count(), 1);
    }

    #[test]
    fn positional_scene_is_stable() {
        let cube = CubeAssembly::new();
        let a = CubeScene::new(&cube, ColorScheme::Positional);
        let b = CubeScene::new(&cube, ColorScheme::Positional);
        assert_eq!(a.instances, b.instances);

        let table: Vec<Color> = FACE_COLORS.iter().map(|(_, c)| *c).collect();
        for inst in &a.instances {
            if inst.internal {
                assert_eq!(inst.face_colors, [HIDDEN_FACE_COLOR; 6]);
            } else {
                assert_eq!(inst.face_colors.to_vec(), table);
            }
        }
    }

    #[test]
    fn instance_matrix_translates() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::FaceCorrect);
        let last = scene.instances[26];
        assert_eq!(last.model_matrix().transform_point3(Vec3::ZERO), last.offset);
    }
}
