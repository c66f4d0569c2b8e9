use glam::{Mat4, Vec3};
use rubik_render::ViewParams;

/// Stationary camera looking down -Z at the assembly.
///
/// The assembly spins in front of it; the camera itself never moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedCamera {
    /// Eye position in scene space.
    pub eye: Vec3,
    pub fov_y: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl From<&ViewParams> for FixedCamera {
    fn from(view: &ViewParams) -> Self {
        Self {
            eye: view.eye(),
            fov_y: view.fov_y_degrees.to_radians(),
            aspect: view.aspect,
            near: view.near,
            far: view.far,
        }
    }
}

impl FixedCamera {
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_translation(-self.eye)
    }

    /// Right-handed perspective with a 0..1 depth range, as wgpu expects.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_camera() {
        let cam = FixedCamera::from(&ViewParams::default());
        assert_eq!(cam.eye, Vec3::new(0.0, 0.0, 6.0));
        let vp = cam.view_projection();
        assert!(!vp.col(0).x.is_nan());
    }

    #[test]
    fn eye_follows_camera_distance() {
        let view = ViewParams {
            camera_distance: 9.0,
            ..ViewParams::default()
        };
        let cam = FixedCamera::from(&view);
        assert_eq!(cam.eye, view.eye());
        assert_eq!(cam.view_matrix().w_axis.z, -9.0);
    }

    #[test]
    fn origin_projects_to_screen_center_inside_depth_range() {
        let cam = FixedCamera::from(&ViewParams::default());
        let clip = cam.view_projection() * glam::Vec4::new(0.0, 0.0, 0.0, 1.0);
        let ndc = clip.truncate() / clip.w;
        assert!(ndc.x.abs() < 1e-6 && ndc.y.abs() < 1e-6);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn whole_cube_fits_in_view() {
        let cam = FixedCamera::from(&ViewParams::default());
        let vp = cam.view_projection();
        // Farthest corner of the assembly from the center.
        let extent = 1.01 + 0.5;
        for corner in [
            Vec3::new(extent, extent, extent),
            Vec3::new(-extent, -extent, extent),
        ] {
            let clip = vp * corner.extend(1.0);
            let ndc = clip.truncate() / clip.w;
            assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0, "corner {corner} at {ndc}");
        }
    }
}
