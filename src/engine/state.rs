//! All mutable non-GPU viewer state.

use crate::camera::Camera;
use crate::input::{InputEvent, InputProcessor, KeyAction};
use crate::modes::RenderModes;
use crate::options::Options;
use crate::util::frame_timing::FrameClock;

/// Camera, modes, input and timing, driven by [`InputEvent`]s and one
/// [`ViewerState::begin_frame`] call per frame.
pub struct ViewerState {
    /// First-person camera.
    pub camera: Camera,
    /// Active rendering modes.
    pub modes: RenderModes,
    /// Held keys, pending taps and press-edges.
    pub input: InputProcessor,
    /// Frame timer.
    pub clock: FrameClock,
    exit_requested: bool,
}

impl ViewerState {
    /// Build the start-up state from options.
    #[must_use]
    pub fn new(options: &Options) -> Self {
        Self {
            camera: Camera::from_options(&options.camera),
            modes: options.modes,
            input: InputProcessor::new(options.keybindings.clone()),
            clock: FrameClock::new(options.camera.max_frame_delta),
            exit_requested: false,
        }
    }

    /// Apply one input event. Mouse motion and scroll reach the camera
    /// immediately; keys are recorded for the next frame.
    pub fn handle_event(&mut self, event: InputEvent) {
        match event {
            InputEvent::Key { key, pressed } => {
                if self.input.handle_key(&key, pressed) == Some(KeyAction::Exit) && pressed {
                    self.request_exit();
                }
            }
            InputEvent::MouseMotion { dx, dy } => {
                if let Some((x, y)) = self.input.look_delta(dx, dy) {
                    self.camera.process_look(x, y, true);
                }
            }
            InputEvent::Scroll { delta } => self.camera.process_zoom(delta),
            InputEvent::FocusChanged { focused } => self.input.set_focused(focused),
        }
    }

    /// Start a frame using the wall clock. Returns the elapsed seconds.
    pub fn begin_frame(&mut self) -> f32 {
        let elapsed = self.clock.tick();
        self.step(elapsed)
    }

    /// Start a frame at `now` seconds since start. Returns the elapsed
    /// seconds.
    pub fn begin_frame_at(&mut self, now: f32) -> f32 {
        let elapsed = self.clock.tick_at(now);
        self.step(elapsed)
    }

    fn step(&mut self, elapsed: f32) -> f32 {
        let frame = self.input.poll();

        for direction in frame.movements {
            self.camera.process_movement(direction, elapsed);
        }

        for action in frame.toggles {
            if self.modes.apply(action) {
                log::info!("{action:?}: {:?}", self.modes);
            } else if action == KeyAction::ToggleFog {
                log::debug!("fog is locked while the skybox is shown");
            }
        }

        if frame.exit {
            self.request_exit();
        }
        elapsed
    }

    /// Ask the viewer to close after the current frame.
    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Whether an exit was requested.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }
}

impl Default for ViewerState {
    fn default() -> Self {
        Self::new(&Options::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(state: &mut ViewerState, key: &str, pressed: bool) {
        state.handle_event(InputEvent::Key {
            key: key.into(),
            pressed,
        });
    }

    #[test]
    fn held_key_moves_camera_by_speed_times_elapsed() {
        let mut state = ViewerState::default();
        let start = state.camera.position;
        let front = state.camera.front();
        key(&mut state, "KeyW", true);

        let elapsed = state.begin_frame_at(0.5);
        assert_eq!(elapsed, 0.5);
        let expected = start + front * state.camera.speed * 0.5;
        assert!(state.camera.position.abs_diff_eq(expected, 1e-4));
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut state = ViewerState::default();
        let start = state.camera.position;
        key(&mut state, "KeyA", true);
        key(&mut state, "KeyD", true);
        let _ = state.begin_frame_at(1.0);
        assert!(state.camera.position.abs_diff_eq(start, 1e-4));
    }

    #[test]
    fn toggle_fires_once_while_held() {
        let mut state = ViewerState::default();
        key(&mut state, "KeyM", true);
        for i in 1..=5 {
            let _ = state.begin_frame_at(i as f32 * 0.016);
        }
        assert!(state.modes.monochrome);
    }

    #[test]
    fn fog_key_ignored_with_skybox() {
        let mut state = ViewerState::default();
        key(&mut state, "KeyZ", true);
        let _ = state.begin_frame_at(0.1);
        key(&mut state, "KeyZ", false);
        key(&mut state, "KeyF", true);
        let _ = state.begin_frame_at(0.2);
        assert!(state.modes.skybox);
        assert!(!state.modes.fog);
    }

    #[test]
    fn fog_press_during_skybox_is_spent() {
        let mut state = ViewerState::default();
        key(&mut state, "KeyZ", true);
        let _ = state.begin_frame_at(0.1);
        key(&mut state, "KeyZ", false);
        key(&mut state, "KeyF", true);
        let _ = state.begin_frame_at(0.2);

        // Skybox off while F is still held: no new edge, fog stays off.
        key(&mut state, "KeyZ", true);
        let _ = state.begin_frame_at(0.3);
        assert!(!state.modes.skybox);
        assert!(!state.modes.fog);

        key(&mut state, "KeyF", false);
        let _ = state.begin_frame_at(0.4);
        key(&mut state, "KeyF", true);
        let _ = state.begin_frame_at(0.5);
        assert!(state.modes.fog);
    }

    #[test]
    fn mouse_motion_rotates_immediately() {
        let mut state = ViewerState::default();
        let yaw = state.camera.yaw();
        let pitch = state.camera.pitch();
        state.handle_event(InputEvent::MouseMotion { dx: 10.0, dy: 10.0 });
        assert!((state.camera.yaw() - (yaw + 1.0)).abs() < 1e-4);
        // Moving the mouse down pitches down.
        assert!((state.camera.pitch() - (pitch - 1.0)).abs() < 1e-4);
    }

    #[test]
    fn scroll_zooms_within_limits() {
        let mut state = ViewerState::default();
        state.handle_event(InputEvent::Scroll { delta: 100.0 });
        assert_eq!(state.camera.zoom(), 1.0);
        state.handle_event(InputEvent::Scroll { delta: -100.0 });
        assert_eq!(state.camera.zoom(), 45.0);
    }

    #[test]
    fn escape_requests_exit() {
        let mut state = ViewerState::default();
        assert!(!state.exit_requested());
        key(&mut state, "Escape", true);
        assert!(state.exit_requested());
    }

    #[test]
    fn unfocused_window_ignores_motion_and_releases_keys() {
        let mut state = ViewerState::default();
        key(&mut state, "KeyW", true);
        state.handle_event(InputEvent::FocusChanged { focused: false });
        let before = state.camera.clone();
        state.handle_event(InputEvent::MouseMotion { dx: 50.0, dy: 0.0 });
        let _ = state.begin_frame_at(1.0);
        assert_eq!(state.camera, before);
        assert!(!state.input.is_held(KeyAction::MoveForward));
    }
}
