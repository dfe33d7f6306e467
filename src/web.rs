//! Browser entry point.
//!
//! ```js
//! import init, { start } from "./tiltscroll.js";
//! await init();
//! const font = new Uint8Array(await (await fetch("Inter.ttf")).arrayBuffer());
//! const handle = start("scroller", font);
//! // later
//! handle.unmount();
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;
use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    platform::web::{EventLoopExtWebSys, WindowAttributesExtWebSys},
    window::{Window, WindowId},
};

use crate::{
    error::TiltScrollError,
    options::Options,
    page::{FullHeightGuard, WebDocumentStyle},
    sensor::DomOrientationSource,
    viewport::Viewport,
    TiltScrollEngine,
};

/// Everything torn down by [`TiltScrollHandle::unmount`].
#[derive(Default)]
struct Mount {
    engine: Option<TiltScrollEngine>,
    page: Option<FullHeightGuard<WebDocumentStyle>>,
    unmounted: bool,
}

type SharedMount = Rc<RefCell<Mount>>;

impl From<TiltScrollError> for JsValue {
    fn from(e: TiltScrollError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}

/// Handle returned to JavaScript by [`start`].
#[wasm_bindgen]
pub struct TiltScrollHandle {
    mount: SharedMount,
}

#[wasm_bindgen]
impl TiltScrollHandle {
    /// Remove the orientation listener, release the GPU surface and restore
    /// the page's previous inline heights. Calling it twice is harmless.
    pub fn unmount(&self) {
        let mut mount = self.mount.borrow_mut();
        if mount.unmounted {
            return;
        }
        mount.unmounted = true;
        if let Some(mut engine) = mount.engine.take() {
            engine.disconnect_sensor();
        }
        mount.page = None;
        log::info!("tilt scroller unmounted");
    }

    /// Current scroll offset in world units.
    #[wasm_bindgen(js_name = scrollOffset)]
    pub fn scroll_offset(&self) -> f32 {
        self.mount
            .borrow()
            .engine
            .as_ref()
            .map_or(0.0, TiltScrollEngine::scroll_offset)
    }
}

/// Mount the scroller on the canvas with id `canvas_id`.
///
/// `font` is a TTF/OTF file for the panel labels; browsers expose no system
/// fonts to the shaper, so without it the panels render unlabeled.
///
/// # Errors
///
/// Rejects when the canvas, document or event loop is unavailable.
#[wasm_bindgen]
pub fn start(
    canvas_id: &str,
    font: Option<Vec<u8>>,
) -> Result<TiltScrollHandle, JsValue> {
    console_error_panic_hook::set_once();
    // A second `start` on the same page finds the logger already installed.
    let _ = console_log::init_with_level(log::Level::Info);

    let window = web_sys::window()
        .ok_or_else(|| TiltScrollError::Platform("no global `window`".into()))?;
    let document = window
        .document()
        .ok_or_else(|| TiltScrollError::Platform("window has no document".into()))?;
    let canvas = document
        .get_element_by_id(canvas_id)
        .ok_or_else(|| {
            TiltScrollError::Platform(format!("no element with id '{canvas_id}'"))
        })?
        .dyn_into::<HtmlCanvasElement>()?;

    let style = canvas.style();
    style.set_property("width", "100%")?;
    style.set_property("height", "100%")?;
    style.set_property("display", "block")?;

    let mount: SharedMount = Rc::new(RefCell::new(Mount {
        page: Some(FullHeightGuard::mount(WebDocumentStyle::new(&document)?)),
        ..Mount::default()
    }));

    let event_loop =
        EventLoop::new().map_err(|e| TiltScrollError::Viewer(e.to_string()))?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.spawn_app(WebApp {
        canvas: Some(canvas),
        window: None,
        fonts: font.into_iter().collect(),
        mount: Rc::clone(&mount),
    });

    Ok(TiltScrollHandle { mount })
}

struct WebApp {
    canvas: Option<HtmlCanvasElement>,
    window: Option<Arc<Window>>,
    fonts: Vec<Vec<u8>>,
    mount: SharedMount,
}

async fn init_engine(window: Arc<Window>, fonts: Vec<Vec<u8>>, mount: SharedMount) {
    let inner = window.inner_size();
    let viewport = Viewport::new(inner.width, inner.height, window.scale_factor());
    let mut engine = match TiltScrollEngine::new(
        Arc::clone(&window),
        viewport,
        Options::default(),
        fonts,
    )
    .await
    {
        Ok(engine) => engine,
        Err(e) => {
            log::error!("failed to initialize engine: {e}");
            return;
        }
    };

    let sensor = match DomOrientationSource::new() {
        Ok(sensor) => sensor,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    if let Err(e) = engine.connect_sensor(&sensor) {
        log::error!("{e}");
    }

    // The canvas may have been laid out while the adapter was pending.
    let inner = window.inner_size();
    engine.resize(inner.width, inner.height);

    let mut mount = mount.borrow_mut();
    if mount.unmounted {
        engine.disconnect_sensor();
        return;
    }
    mount.engine = Some(engine);
    window.request_redraw();
}

impl ApplicationHandler for WebApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        let Some(canvas) = self.canvas.take() else {
            return;
        };
        let attrs = Window::default_attributes().with_canvas(Some(canvas));
        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                return;
            }
        };
        self.window = Some(Arc::clone(&window));
        wasm_bindgen_futures::spawn_local(init_engine(
            window,
            std::mem::take(&mut self.fonts),
            Rc::clone(&self.mount),
        ));
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        let mut mount = self.mount.borrow_mut();
        if mount.unmounted {
            self.window = None;
            event_loop.exit();
            return;
        }
        let Some(engine) = mount.engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::Resized(size) => {
                engine.resize(size.width, size.height);
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                engine.set_scale_factor(scale_factor);
            }
            WindowEvent::RedrawRequested => {
                engine.update();
                match engine.render() {
                    Ok(()) => {}
                    Err(wgpu::SurfaceError::Outdated | wgpu::SurfaceError::Lost) => {
                        if let Some(w) = &self.window {
                            let inner = w.inner_size();
                            engine.resize(inner.width, inner.height);
                        }
                    }
                    Err(e) => log::error!("render error: {e:?}"),
                }
                if let Some(w) = &self.window {
                    w.request_redraw();
                }
            }
            _ => (),
        }
    }
}
