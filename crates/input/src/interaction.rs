use crate::event::InputEvent;
use glam::DVec2;
use rubik_common::Rotation;

/// Degrees of rotation per pixel of cursor travel.
pub const DRAG_SENSITIVITY: f32 = 0.5;

/// Whether the loop should keep going after a batch of events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopControl {
    Continue,
    Exit,
}

/// Pointer drag bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DragState {
    pub dragging: bool,
    /// Last cursor position observed while dragging (or at press time).
    pub last_cursor: DVec2,
}

/// Everything the input step reads and writes between frames.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InteractionState {
    pub rotation: Rotation,
    pub drag: DragState,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a single event in place.
    pub fn handle(&mut self, event: InputEvent) -> LoopControl {
        match event {
            InputEvent::Quit => return LoopControl::Exit,
            InputEvent::ButtonPressed(at) => {
                self.drag = DragState {
                    dragging: true,
                    last_cursor: at,
                };
            }
            InputEvent::ButtonReleased => {
                self.drag.dragging = false;
            }
            InputEvent::CursorMoved(to) if self.drag.dragging => {
                let delta = to - self.drag.last_cursor;
                self.rotation.y_degrees += delta.x as f32 * DRAG_SENSITIVITY;
                self.rotation.x_degrees += delta.y as f32 * DRAG_SENSITIVITY;
                self.drag.last_cursor = to;
            }
            InputEvent::CursorMoved(_) => {}
        }
        LoopControl::Continue
    }

    /// Consume one frame's pending events and return the next state.
    ///
    /// Processing stops at the first [`InputEvent::Quit`]; later events in the
    /// batch would never be drawn.
    pub fn process<I>(mut self, events: I) -> (Self, LoopControl)
    where
        I: IntoIterator<Item = InputEvent>,
    {
        for event in events {
            if self.handle(event) == LoopControl::Exit {
                tracing::debug!("exit requested");
                return (self, LoopControl::Exit);
            }
        }
        (self, LoopControl::Continue)
    }
}
