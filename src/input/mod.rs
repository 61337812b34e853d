//! Input handling: logical key actions, platform-agnostic events, press-edge
//! tracking, and the processor that turns raw key and mouse input into
//! per-frame camera and mode updates.

/// Press-edge detection keyed by action.
pub mod edge;
/// Platform-agnostic input events.
pub mod event;
/// Logical actions that keys can be bound to.
pub mod keyboard;
/// Converts raw events into held keys, look deltas and fired toggles.
pub mod processor;

pub use edge::EdgeTracker;
pub use event::InputEvent;
pub use keyboard::KeyAction;
pub use processor::{FrameInput, InputProcessor};
