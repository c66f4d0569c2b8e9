use glam::DVec2;
use serde::{Deserialize, Serialize};

/// A windowing event the viewer reacts to.
///
/// Cursor positions are window coordinates with the origin at the top left
/// and y growing downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    /// The window was asked to close.
    Quit,
    /// Any mouse button went down at the given cursor position.
    ButtonPressed(DVec2),
    /// Any mouse button went up.
    ButtonReleased,
    /// The cursor moved to the given position.
    CursorMoved(DVec2),
}

impl InputEvent {
    pub fn pressed(x: f64, y: f64) -> Self {
        Self::ButtonPressed(DVec2::new(x, y))
    }

    pub fn moved(x: f64, y: f64) -> Self {
        Self::CursorMoved(DVec2::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constructors_carry_position() {
        assert_eq!(
            InputEvent::pressed(1.0, 2.0),
            InputEvent::ButtonPressed(DVec2::new(1.0, 2.0))
        );
        assert!(matches!(InputEvent::moved(3.0, 4.0), InputEvent::CursorMoved(p) if p.y == 4.0));
    }
}
