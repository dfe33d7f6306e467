//! Standalone window backed by winit.
//!
//! Desktops have no tilt sensor, so the viewer feeds a [`SimulatedSensor`]
//! from the keyboard (arrow keys or W/S by default). The window opens
//! phone-sized so tilt scrolling is active; widen it past the mobile
//! breakpoint to see the desktop fallback.
//!
//! ```no_run
//! # use tiltscroll::Viewer;
//! Viewer::builder()
//!     .with_title("Tilt Scroll")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```

use std::sync::Arc;

use winit::{
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::PhysicalKey,
    window::{Window, WindowId},
};

use crate::{
    error::TiltScrollError, input::KeyAction, options::Options,
    sensor::SimulatedSensor, viewport::Viewport, TiltScrollEngine,
};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
    size: (u32, u32),
    fonts: Vec<Vec<u8>>,
}

impl ViewerBuilder {
    /// Create a builder with sensible defaults (title "Tilt Scroll", a
    /// 390 × 844 logical window, default options).
    fn new() -> Self {
        Self {
            options: None,
            title: "Tilt Scroll".into(),
            size: (390, 844),
            fonts: Vec::new(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the initial window size in logical pixels.
    #[must_use]
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.size = (width.max(1), height.max(1));
        self
    }

    /// Register an extra font file for the panel labels.
    #[must_use]
    pub fn with_font(mut self, font: Vec<u8>) -> Self {
        self.fonts.push(font);
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options.unwrap_or_default(),
            title: self.title,
            size: self.size,
            fonts: self.fonts,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the tilt-scrolling panels.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Options,
    title: String,
    size: (u32, u32),
    fonts: Vec<Vec<u8>>,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::Viewer`] if the event loop cannot be
    /// created or exits abnormally.
    pub fn run(self) -> Result<(), TiltScrollError> {
        let event_loop = EventLoop::new()
            .map_err(|e| TiltScrollError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            sensor: SimulatedSensor::new(),
            options: self.options,
            title: self.title,
            size: self.size,
            fonts: self.fonts,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| TiltScrollError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<TiltScrollEngine>,
    sensor: SimulatedSensor,
    options: Options,
    title: String,
    size: (u32, u32),
    fonts: Vec<Vec<u8>>,
}

impl ViewerApp {
    fn handle_key(&mut self, action: KeyAction) {
        let Some(engine) = &mut self.engine else {
            return;
        };
        match action.tilt_degrees(self.options.sensor.key_tilt_degrees) {
            Some(beta) => {
                let _ = self.sensor.tilt(beta);
            }
            None => engine.reset_scroll(),
        }
    }
}

impl winit::application::ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(&self.title)
            .with_inner_size(winit::dpi::LogicalSize::new(self.size.0, self.size.1));

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let inner = window.inner_size();
        let viewport =
            Viewport::new(inner.width, inner.height, window.scale_factor());

        let engine_result = pollster::block_on(TiltScrollEngine::new(
            window.clone(),
            viewport,
            self.options.clone(),
            std::mem::take(&mut self.fonts),
        ));

        let mut engine = match engine_result {
            Ok(e) => e,
            Err(e) => {
                log::error!("Failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        if let Err(e) = engine.connect_sensor(&self.sensor) {
            log::error!("Failed to attach simulated sensor: {e}");
        }

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
            // Tear down the engine first so the sensor subscription is
            // released before the window goes away.
            self.engine = None;
            event_loop.exit();
            return;
        }

        match event {
            WindowEvent::Resized(size) => {
                if let Some(engine) = &mut self.engine {
                    engine.resize(size.width, size.height);
                }
            }

            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                if let Some(engine) = &mut self.engine {
                    engine.set_scale_factor(scale_factor);
                }
            }

            WindowEvent::RedrawRequested => {
                if let Some(engine) = &mut self.engine {
                    engine.update();
                    match engine.render() {
                        Ok(()) => {}
                        Err(
                            wgpu::SurfaceError::Outdated
                            | wgpu::SurfaceError::Lost,
                        ) => {
                            if let Some(w) = &self.window {
                                let inner = w.inner_size();
                                engine.resize(inner.width, inner.height);
                            }
                        }
                        Err(e) => {
                            log::error!("render error: {e:?}");
                        }
                    }
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                let key_str = format!("{code:?}");
                if let Some(action) = self.options.keybindings.lookup(&key_str)
                {
                    self.handle_key(action);
                }
            }

            _ => (),
        }
    }
}
