//! Standalone viewer window backed by winit.
//!
//! ```no_run
//! # use shadelab::Viewer;
//! Viewer::builder()
//!     .with_title("Shadelab")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    application::ApplicationHandler,
    event::{DeviceEvent, DeviceId, ElementState, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{CursorGrabMode, Window, WindowId},
};

use crate::{error::ViewerError, options::Options, InputEvent, ViewerEngine};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Options,
    title: Option<String>,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: Options::default(),
            title: None,
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    /// Set the window title, overriding `window.title` from the options.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(mut self) -> Viewer {
        if let Some(title) = self.title {
            self.options.window.title = title;
        }
        Viewer {
            options: self.options,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A window showing the demo scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed or the exit key is pressed.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Viewer`] if the event loop can't start, or the
    /// setup error if the window or engine could not be created.
    pub fn run(self) -> Result<(), ViewerError> {
        let event_loop =
            EventLoop::new().map_err(|e| ViewerError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            options: Some(self.options),
            setup_error: None,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| ViewerError::Viewer(e.to_string()))?;

        app.setup_error.map_or(Ok(()), Err)
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<ViewerEngine>,
    /// Taken when the window is created.
    options: Option<Options>,
    setup_error: Option<ViewerError>,
}

impl ViewerApp {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: ViewerError) {
        log::error!("{error}");
        self.setup_error = Some(error);
        event_loop.exit();
    }

    fn forward(&mut self, event: InputEvent) {
        if let Some(engine) = &mut self.engine {
            engine.handle_input(event);
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(engine)) = (&self.window, &mut self.engine) else {
            return;
        };

        let _ = engine.update();
        if engine.exit_requested() {
            event_loop.exit();
            return;
        }

        match engine.render() {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                let size = window.inner_size();
                engine.resize(size.width, size.height);
            }
            Err(e) => log::error!("render error: {e:?}"),
        }
        window.request_redraw();
    }
}

/// Hide the cursor and keep it inside the window so raw motion drives the
/// camera. Falls back to confining when locking isn't supported.
fn grab_cursor(window: &Window) {
    let grabbed = window
        .set_cursor_grab(CursorGrabMode::Locked)
        .or_else(|_| window.set_cursor_grab(CursorGrabMode::Confined));
    if let Err(e) = grabbed {
        log::warn!("cursor grab unavailable: {e}");
    }
    window.set_cursor_visible(false);
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        let Some(options) = self.options.take() else {
            return;
        };

        let attrs = Window::default_attributes()
            .with_title(options.window.title.clone())
            .with_inner_size(winit::dpi::PhysicalSize::new(
                options.window.width,
                options.window.height,
            ));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                self.fail(event_loop, ViewerError::Viewer(format!("failed to create window: {e}")));
                return;
            }
        };

        let inner = window.inner_size();
        let engine = match pollster::block_on(ViewerEngine::new(
            window.clone(),
            (inner.width.max(1), inner.height.max(1)),
            options,
        )) {
            Ok(engine) => engine,
            Err(e) => {
                self.fail(event_loop, e);
                return;
            }
        };

        grab_cursor(&window);
        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            if let Some(engine) = &mut self.engine {
                engine.state.request_exit();
            }
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            WindowEvent::KeyboardInput { event, .. } => {
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                self.forward(InputEvent::Key {
                    key: format!("{code:?}"),
                    pressed: event.state == ElementState::Pressed,
                });
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let delta = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.forward(InputEvent::Scroll { delta });
            }
            WindowEvent::Focused(focused) => {
                if focused {
                    if let Some(window) = &self.window {
                        grab_cursor(window);
                    }
                }
                self.forward(InputEvent::FocusChanged { focused });
            }
            _ => {}
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: DeviceId,
        event: DeviceEvent,
    ) {
        if let DeviceEvent::MouseMotion { delta: (dx, dy) } = event {
            self.forward(InputEvent::MouseMotion {
                dx: dx as f32,
                dy: dy as f32,
            });
        }
    }
}
