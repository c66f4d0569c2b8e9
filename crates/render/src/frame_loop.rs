use crate::renderer::{Frame, Renderer};
use crate::scene::CubeScene;
use crate::view::{Lighting, ViewParams};
use rubik_common::Rotation;
use rubik_input::{InputEvent, InteractionState, LoopControl};
use std::collections::VecDeque;
use std::time::Duration;

/// Pull-based source of pending input events, drained once per frame.
pub trait EventSource {
    fn poll_events(&mut self) -> Vec<InputEvent>;
}

/// Replays a fixed list of per-frame event batches, then asks to quit.
#[derive(Debug, Default)]
pub struct ScriptedEvents {
    batches: VecDeque<Vec<InputEvent>>,
}

impl ScriptedEvents {
    pub fn new<I>(batches: I) -> Self
    where
        I: IntoIterator<Item = Vec<InputEvent>>,
    {
        Self {
            batches: batches.into_iter().collect(),
        }
    }
}

impl EventSource for ScriptedEvents {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        self.batches
            .pop_front()
            .unwrap_or_else(|| vec![InputEvent::Quit])
    }
}

/// The viewer's draw / present / wait / poll cycle.
///
/// Owns the static scene plus the interaction state that input mutates
/// between frames. Backends that drive their own event loop call
/// [`FrameLoop::draw`] and [`FrameLoop::handle_events`] directly; headless
/// callers use [`FrameLoop::run`].
#[derive(Debug)]
pub struct FrameLoop {
    scene: CubeScene,
    view: ViewParams,
    lighting: Lighting,
    interaction: InteractionState,
    frame_interval: Duration,
    frames_drawn: u64,
    running: bool,
}

impl FrameLoop {
    /// Best-effort pause between frames.
    pub const DEFAULT_FRAME_INTERVAL: Duration = Duration::from_millis(10);

    pub fn new(scene: CubeScene, view: ViewParams) -> Self {
        Self {
            scene,
            view,
            lighting: Lighting::default(),
            interaction: InteractionState::new(),
            frame_interval: Self::DEFAULT_FRAME_INTERVAL,
            frames_drawn: 0,
            running: true,
        }
    }

    pub fn with_frame_interval(mut self, interval: Duration) -> Self {
        self.frame_interval = interval;
        self
    }

    pub fn with_lighting(mut self, lighting: Lighting) -> Self {
        self.lighting = lighting;
        self
    }

    pub fn view_mut(&mut self) -> &mut ViewParams {
        &mut self.view
    }

    pub fn rotation(&self) -> Rotation {
        self.interaction.rotation
    }

    pub fn frame_interval(&self) -> Duration {
        self.frame_interval
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Draw one frame. Returns `None` once the loop has exited.
    pub fn draw<R: Renderer>(&mut self, renderer: &mut R) -> Option<R::Output> {
        if !self.running {
            return None;
        }
        self.frames_drawn += 1;
        Some(renderer.render(&Frame {
            scene: &self.scene,
            rotation: self.interaction.rotation,
            view: &self.view,
            lighting: &self.lighting,
        }))
    }

    /// Feed one frame's worth of events through the interaction state.
    pub fn handle_events<I>(&mut self, events: I) -> LoopControl
    where
        I: IntoIterator<Item = InputEvent>,
    {
        if !self.running {
            return LoopControl::Exit;
        }
        let (next, control) = self.interaction.process(events);
        self.interaction = next;
        if control == LoopControl::Exit {
            tracing::info!("frame loop exiting after {} frames", self.frames_drawn);
            self.running = false;
        }
        control
    }

    /// Run until an exit event arrives. Returns the last frame's output.
    pub fn run<R, E>(&mut self, renderer: &mut R, events: &mut E) -> Option<R::Output>
    where
        R: Renderer,
        E: EventSource,
    {
        let mut last = None;
        while self.running {
            if let Some(output) = self.draw(renderer) {
                last = Some(output);
            }
            if !self.frame_interval.is_zero() {
                std::thread::sleep(self.frame_interval);
            }
            self.handle_events(events.poll_events());
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::NormalMode;
    use rubik_kernel::{ColorScheme, CubeAssembly};

    #[derive(Default)]
    struct RecordingRenderer {
        rotations: Vec<Rotation>,
    }

    impl Renderer for RecordingRenderer {
        type Output = usize;

        fn render(&mut self, frame: &Frame<'_>) -> usize {
            self.rotations.push(frame.rotation);
            frame.scene.len()
        }
    }

    fn frame_loop() -> FrameLoop {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        FrameLoop::new(scene, ViewParams::default()).with_frame_interval(Duration::ZERO)
    }

    #[test]
    fn exit_stops_before_the_next_draw() {
        let mut fl = frame_loop();
        let mut renderer = RecordingRenderer::default();
        let mut events = ScriptedEvents::new([
            vec![],
            vec![InputEvent::Quit],
            vec![InputEvent::pressed(0.0, 0.0)],
        ]);

        let last = fl.run(&mut renderer, &mut events);

        assert_eq!(last, Some(27));
        assert_eq!(fl.frames_drawn(), 2);
        assert_eq!(renderer.rotations.len(), 2);
        assert!(!fl.is_running());
        assert!(fl.draw(&mut renderer).is_none());
    }

    #[test]
    fn drag_is_visible_on_the_following_frame() {
        let mut fl = frame_loop();
        let mut renderer = RecordingRenderer::default();
        let mut events = ScriptedEvents::new([
            vec![InputEvent::pressed(100.0, 100.0)],
            vec![InputEvent::moved(110.0, 130.0)],
            vec![InputEvent::ButtonReleased],
        ]);

        fl.run(&mut renderer, &mut events);

        assert_eq!(
            renderer.rotations,
            vec![
                Rotation::default(),
                Rotation::default(),
                Rotation::new(15.0, 5.0),
                Rotation::new(15.0, 5.0),
            ]
        );
        assert_eq!(fl.rotation(), Rotation::new(15.0, 5.0));
    }

    #[test]
    fn events_after_exit_are_ignored() {
        let mut fl = frame_loop();
        assert_eq!(fl.handle_events([InputEvent::Quit]), LoopControl::Exit);
        assert_eq!(
            fl.handle_events([InputEvent::pressed(0.0, 0.0), InputEvent::moved(9.0, 9.0)]),
            LoopControl::Exit
        );
        assert_eq!(fl.rotation(), Rotation::default());
    }

    #[test]
    fn exhausted_script_quits() {
        let mut events = ScriptedEvents::new(Vec::<Vec<InputEvent>>::new());
        assert_eq!(events.poll_events(), vec![InputEvent::Quit]);
    }

    #[test]
    fn frames_carry_the_configured_lighting() {
        struct NormalsRenderer;

        impl Renderer for NormalsRenderer {
            type Output = NormalMode;

            fn render(&mut self, frame: &Frame<'_>) -> NormalMode {
                frame.lighting.normals
            }
        }

        let mut fl = frame_loop();
        assert_eq!(fl.draw(&mut NormalsRenderer), Some(NormalMode::Constant));

        let lighting = Lighting::default().with_normals(NormalMode::PerFace);
        let mut fl = frame_loop().with_lighting(lighting);
        assert_eq!(fl.draw(&mut NormalsRenderer), Some(NormalMode::PerFace));
    }

    #[test]
    fn default_frame_interval_is_ten_millis() {
        let scene = CubeScene::new(&CubeAssembly::new(), ColorScheme::Positional);
        let fl = FrameLoop::new(scene, ViewParams::default());
        assert_eq!(fl.frame_interval(), Duration::from_millis(10));
    }
}
