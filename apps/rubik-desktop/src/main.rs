use anyhow::{Context, Result};
use clap::Parser;
use glam::DVec2;
use rubik_input::{InputEvent, LoopControl};
use rubik_kernel::{ColorScheme, CubeAssembly};
use rubik_render::{CubeScene, FrameLoop, Lighting, NormalMode, ViewParams};
use rubik_render_wgpu::{GpuContext, WgpuRenderer};
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const WINDOW_TITLE: &str = "3D Rubik's Cube - Enhanced Lighting";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

#[derive(Parser)]
#[command(name = "rubik-desktop", about = "Interactive 3x3x3 cube viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Color each outer face by the direction it points instead of by slot order
    #[arg(long)]
    face_correct: bool,

    /// Light each face by its own geometric normal instead of a shared +Z normal
    #[arg(long)]
    face_normals: bool,
}

impl Cli {
    fn color_scheme(&self) -> ColorScheme {
        if self.face_correct {
            ColorScheme::FaceCorrect
        } else {
            ColorScheme::Positional
        }
    }

    fn lighting(&self) -> Lighting {
        let normals = if self.face_normals {
            NormalMode::PerFace
        } else {
            NormalMode::Constant
        };
        Lighting::default().with_normals(normals)
    }
}

struct ViewerApp {
    frame_loop: FrameLoop,
    window: Option<Arc<Window>>,
    renderer: Option<WgpuRenderer>,
    /// Last cursor position in logical pixels; presses start a drag here.
    cursor: DVec2,
    next_frame: Instant,
    fatal: Option<anyhow::Error>,
}

impl ViewerApp {
    fn new(frame_loop: FrameLoop) -> Self {
        Self {
            frame_loop,
            window: None,
            renderer: None,
            cursor: DVec2::ZERO,
            next_frame: Instant::now(),
            fatal: None,
        }
    }

    fn init_graphics(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let size = window.inner_size();
        let ctx = GpuContext::new(window.clone(), size.width, size.height)
            .context("failed to initialize GPU")?;
        self.frame_loop.view_mut().set_size(size.width, size.height);
        self.renderer = Some(WgpuRenderer::new(ctx));
        self.window = Some(window);
        Ok(())
    }

    /// Whether a redraw is due at `now`, and when to wake up next.
    fn pace(&mut self, now: Instant) -> (bool, Instant) {
        let due = now >= self.next_frame;
        if due {
            self.next_frame = now + self.frame_loop.frame_interval();
        }
        (due, self.next_frame)
    }

    fn dispatch(&mut self, event_loop: &ActiveEventLoop, event: InputEvent) {
        if self.frame_loop.handle_events([event]) == LoopControl::Exit {
            event_loop.exit();
        }
    }
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        if let Err(e) = self.init_graphics(event_loop) {
            tracing::error!("initialization failed: {e:#}");
            self.fatal = Some(e);
            event_loop.exit();
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                self.dispatch(event_loop, InputEvent::Quit);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let scale = self.window.as_ref().map_or(1.0, |w| w.scale_factor());
                let logical = position.to_logical::<f64>(scale);
                self.cursor = DVec2::new(logical.x, logical.y);
                self.dispatch(event_loop, InputEvent::CursorMoved(self.cursor));
            }
            WindowEvent::MouseInput { state, .. } => {
                let event = match state {
                    ElementState::Pressed => InputEvent::ButtonPressed(self.cursor),
                    ElementState::Released => InputEvent::ButtonReleased,
                };
                self.dispatch(event_loop, event);
            }
            WindowEvent::Resized(new_size) => {
                if let Some(renderer) = &mut self.renderer {
                    renderer.resize(new_size.width, new_size.height);
                    self.frame_loop
                        .view_mut()
                        .set_size(new_size.width, new_size.height);
                }
            }
            WindowEvent::RedrawRequested => {
                let Some(renderer) = self.renderer.as_mut() else {
                    return;
                };
                if let Some(Err(e)) = self.frame_loop.draw(renderer) {
                    tracing::error!("frame skipped: {e}");
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        if !self.frame_loop.is_running() {
            return;
        }
        let (due, wake_at) = self.pace(Instant::now());
        if due {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
        event_loop.set_control_flow(ControlFlow::WaitUntil(wake_at));
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        // Surface must go before the window it was created from.
        self.renderer = None;
        self.window = None;
        tracing::info!(
            "viewer closed after {} frames at {}",
            self.frame_loop.frames_drawn(),
            self.frame_loop.rotation()
        );
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("rubik-desktop starting");

    let scheme = cli.color_scheme();
    let scene = CubeScene::new(&CubeAssembly::new(), scheme);
    tracing::debug!("scene ready: {} cubelets, {:?} coloring", scene.len(), scheme);
    let frame_loop = FrameLoop::new(scene, ViewParams::with_size(WINDOW_WIDTH, WINDOW_HEIGHT))
        .with_lighting(cli.lighting());

    let event_loop = EventLoop::new()?;

    let mut app = ViewerApp::new(frame_loop);
    event_loop.run_app(&mut app)?;

    if let Some(err) = app.fatal.take() {
        return Err(err);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn runs_without_arguments() {
        let cli = Cli::try_parse_from(["rubik-desktop"]).unwrap();
        assert!(!cli.verbose);
        assert_eq!(cli.color_scheme(), ColorScheme::Positional);
    }

    #[test]
    fn face_correct_flag() {
        let cli = Cli::try_parse_from(["rubik-desktop", "--face-correct", "-v"]).unwrap();
        assert!(cli.verbose);
        assert_eq!(cli.color_scheme(), ColorScheme::FaceCorrect);
    }

    #[test]
    fn normal_mode_flag() {
        let cli = Cli::try_parse_from(["rubik-desktop"]).unwrap();
        assert_eq!(cli.lighting().normals, NormalMode::Constant);
        let cli = Cli::try_parse_from(["rubik-desktop", "--face-normals"]).unwrap();
        assert_eq!(cli.lighting().normals, NormalMode::PerFace);
    }

    #[test]
    fn redraws_are_paced_by_the_frame_interval() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let mut app = ViewerApp::new(FrameLoop::new(scene, ViewParams::default()));
        let start = Instant::now();
        app.next_frame = start;

        let (due, wake_at) = app.pace(start);
        assert!(due);
        assert_eq!(wake_at, start + FrameLoop::DEFAULT_FRAME_INTERVAL);

        let (due, again) = app.pace(start + Duration::from_millis(4));
        assert!(!due);
        assert_eq!(again, wake_at);

        let (due, _) = app.pace(wake_at);
        assert!(due);
    }
}
