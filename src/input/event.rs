/// Platform-agnostic input events.
///
/// The windowed viewer translates winit events into these and feeds them to
/// [`ViewerState::handle_event`](crate::ViewerState::handle_event), which
/// keeps the camera and mode logic testable without a window.
///
/// # Example
///
/// ```
/// use shadelab::{InputEvent, ViewerState};
/// use shadelab::options::Options;
///
/// let mut state = ViewerState::new(&Options::default());
/// state.handle_event(InputEvent::Key { key: "KeyZ".into(), pressed: true });
/// let _elapsed = state.begin_frame_at(0.016);
/// assert!(state.modes.skybox);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A physical key changed state.
    Key {
        /// Key name in `winit::keyboard::KeyCode` debug format
        /// (`"KeyW"`, `"Escape"`, ...).
        key: String,
        /// `true` for press, `false` for release.
        pressed: bool,
    },
    /// Relative mouse motion in device units.
    MouseMotion {
        /// Horizontal motion (positive = right).
        dx: f32,
        /// Vertical motion (positive = down, screen convention).
        dy: f32,
    },
    /// Scroll wheel (positive = zoom in).
    Scroll {
        /// Scroll amount in lines.
        delta: f32,
    },
    /// The window gained or lost keyboard focus.
    FocusChanged {
        /// Whether the window is now focused.
        focused: bool,
    },
}
