//! Shared value types for the cube viewer.

mod types;

pub use types::{
    BACKGROUND_COLOR, BORDER_COLOR, BORDER_WIDTH, Color, FACE_COLORS, Face, FaceSlot,
    HIDDEN_FACE_COLOR, Rotation, face_color,
};
