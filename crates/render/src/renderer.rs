use crate::scene::CubeScene;
use crate::view::{Lighting, ViewParams};
use rubik_common::{FaceSlot, Rotation};

/// Everything a backend needs to draw one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub scene: &'a CubeScene,
    pub rotation: Rotation,
    pub view: &'a ViewParams,
    pub lighting: &'a Lighting,
}

/// Renderer-agnostic interface. All backends implement this trait.
///
/// A renderer reads the frame description and produces output; it never
/// touches interaction state.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Clear, draw the whole assembly under the frame's rotation, present.
    fn render(&mut self, frame: &Frame<'_>) -> Self::Output;
}

/// Debug text renderer.
///
/// Produces a human-readable description of the frame. Used by the CLI and
/// for testing the render interface without a GPU.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    frames: u64,
}

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&mut self, frame: &Frame<'_>) -> String {
        self.frames += 1;
        let view = frame.view;
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (rotation {}, scheme {:?}) ===\n",
            self.frames, frame.rotation, frame.scene.scheme
        ));
        out.push_str(&format!(
            "Camera: distance={:.1} fov={:.0} aspect={:.3} clip=[{}, {}]\n",
            view.camera_distance, view.fov_y_degrees, view.aspect, view.near, view.far
        ));
        out.push_str(&format!(
            "Light: position=({:.1}, {:.1}, {:.1}) ambient={} diffuse={} specular={} normals={:?}\n",
            frame.lighting.position.x,
            frame.lighting.position.y,
            frame.lighting.position.z,
            frame.lighting.ambient,
            frame.lighting.diffuse,
            frame.lighting.specular,
            frame.lighting.normals
        ));
        out.push_str(&format!(
            "Border: color={} width={}\n",
            view.border_color, view.border_width
        ));
        out.push_str(&format!("Cubelets: {}\n", frame.scene.len()));

        for inst in &frame.scene.instances {
            let p = inst.offset;
            out.push_str(&format!("  pos=({:5.2}, {:5.2}, {:5.2})", p.x, p.y, p.z));
            if inst.internal {
                out.push_str(" internal");
            }
            out.push('\n');
            for slot in FaceSlot::ALL {
                out.push_str(&format!(
                    "    {:<6} {}\n",
                    format!("{slot:?}"),
                    inst.face_colors[slot.index()]
                ));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rubik_kernel::{ColorScheme, CubeAssembly};

    fn render_once(rotation: Rotation) -> String {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let view = ViewParams::default();
        let lighting = Lighting::default();
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&Frame {
            scene: &scene,
            rotation,
            view: &view,
            lighting: &lighting,
        })
    }

    #[test]
    fn debug_renderer_lists_all_cubelets() {
        let output = render_once(Rotation::default());
        assert!(output.contains("Frame 1"));
        assert!(output.contains("Cubelets: 27"));
        assert_eq!(output.matches("pos=(").count(), 27);
        assert_eq!(output.matches(" internal").count(), 1);
    }

    #[test]
    fn debug_renderer_reports_rotation() {
        let output = render_once(Rotation::new(15.0, 5.0));
        assert!(output.contains("x=15.0deg y=5.0deg"));
    }

    #[test]
    fn debug_renderer_reports_normal_mode() {
        let output = render_once(Rotation::default());
        assert!(output.contains("normals=Constant"));
    }

    #[test]
    fn debug_renderer_counts_frames() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let view = ViewParams::default();
        let lighting = Lighting::default();
        let frame = Frame {
            scene: &scene,
            rotation: Rotation::default(),
            view: &view,
            lighting: &lighting,
        };
        let mut renderer = DebugTextRenderer::new();
        renderer.render(&frame);
        let second = renderer.render(&frame);
        assert_eq!(renderer.frames(), 2);
        assert!(second.contains("Frame 2"));
    }
}
