//! Interaction: windowing events mapped to a drag-to-rotate state machine.
//!
//! # Invariants
//! - Rotation changes only while a drag is in progress.
//! - The window backend translates its events into [`InputEvent`]; nothing
//!   here depends on a particular windowing crate.

pub mod event;
pub mod interaction;

pub use event::InputEvent;
pub use interaction::{DRAG_SENSITIVITY, DragState, InteractionState, LoopControl};
