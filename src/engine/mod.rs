//! Engine: GPU resources plus the per-frame scroll update.
//!
//! [`ScrollState`] is the GPU-free half and can be driven headless;
//! [`TiltScrollEngine`] wraps it with the surface and renderers.

mod options;
mod state;

pub use state::ScrollState;

use crate::camera::{Camera, CameraBinding};
use crate::error::TiltScrollError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::texture::DepthTarget;
use crate::options::Options;
use crate::renderer::{PanelRenderer, SceneUniform, TextRenderer};
use crate::scene::{PanelStyle, DEFAULT_PANELS};
use crate::sensor::OrientationSource;
use crate::viewport::{Viewport, ViewportClass};

/// The tilt-scroll rendering engine.
///
/// Owns the GPU context, the fixed camera, the panel and text renderers,
/// and the [`ScrollState`] that turns sensor readings into the panel group
/// transform. Hosts drive it with [`update`](Self::update) followed by
/// [`render`](Self::render) once per frame.
///
/// # Frame loop
///
/// ```ignore
/// engine.connect_sensor(&source)?;
/// loop {
///     engine.update();
///     engine.render()?;
/// }
/// ```
pub struct TiltScrollEngine {
    context: RenderContext,
    depth: DepthTarget,
    camera: Camera,
    camera_binding: CameraBinding,
    panels: PanelRenderer,
    text: TextRenderer,
    state: ScrollState,
    options: Options,
}

impl TiltScrollEngine {
    /// Create the engine for a window or canvas surface.
    ///
    /// `extra_fonts` are raw font files registered with the text shaper
    /// (required on the web, optional natively).
    ///
    /// # Errors
    ///
    /// Returns [`TiltScrollError::Gpu`] if no adapter, device or surface
    /// configuration is available.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        viewport: Viewport,
        options: Options,
        extra_fonts: Vec<Vec<u8>>,
    ) -> Result<Self, TiltScrollError> {
        let context =
            RenderContext::new(window, (viewport.width, viewport.height)).await?;
        let viewport =
            Viewport::new(context.width(), context.height(), viewport.scale_factor);

        let state = ScrollState::new(&options, viewport);
        let camera = Camera::from_options(&options.camera, viewport.aspect());
        let camera_binding = CameraBinding::new(&context.device, &camera);
        let depth = DepthTarget::new(&context.device, viewport.width, viewport.height);

        let style = PanelStyle::DEFAULT;
        let scene = SceneUniform::new(state.group(), &options.lighting);
        let panels = PanelRenderer::new(
            &context,
            &camera_binding,
            &DEFAULT_PANELS,
            &style,
            &scene,
        );
        let text = TextRenderer::new(
            &context,
            &DEFAULT_PANELS,
            &style,
            &viewport,
            extra_fonts,
        );

        log::info!("engine ready with {} panels", DEFAULT_PANELS.len());

        Ok(Self {
            context,
            depth,
            camera,
            camera_binding,
            panels,
            text,
            state,
            options,
        })
    }

    /// Subscribe to a tilt sensor, replacing any current subscription.
    ///
    /// # Errors
    ///
    /// Propagates the source's subscription failure.
    pub fn connect_sensor(
        &mut self,
        source: &dyn OrientationSource,
    ) -> Result<(), TiltScrollError> {
        self.state.connect(source)
    }

    /// Unsubscribe from the tilt sensor. The panels freeze where they are.
    pub fn disconnect_sensor(&mut self) {
        self.state.disconnect();
    }

    /// Resize the surface and dependent targets. Zero sizes are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.state.resize(width, height);
        self.refresh_viewport();
    }

    /// Track a new host scale factor (affects mobile classification and
    /// overlay text size).
    pub fn set_scale_factor(&mut self, scale_factor: f64) {
        self.state.set_scale_factor(scale_factor);
        self.refresh_viewport();
    }

    fn refresh_viewport(&mut self) {
        let viewport = *self.state.viewport();
        self.camera.aspect = viewport.aspect();
        if !self.depth.matches(viewport.width, viewport.height) {
            self.depth =
                DepthTarget::new(&self.context.device, viewport.width, viewport.height);
        }
        self.text.resize(&viewport);
    }

    /// Jump back to the first panel.
    pub fn reset_scroll(&mut self) {
        self.state.reset();
    }

    /// Per-frame update: drain sensor readings, then write the offset and
    /// viewport scale into the panel group.
    pub fn update(&mut self) {
        let _ = self.state.update();
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_offset(&self) -> f32 {
        self.state.offset()
    }

    /// Current viewport class.
    #[must_use]
    pub fn viewport_class(&self) -> ViewportClass {
        self.state.class()
    }

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns the surface error when the swapchain texture cannot be
    /// acquired; hosts reconfigure on `Lost`/`Outdated`.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let queue = &self.context.queue;
        self.camera_binding.update(queue, &self.camera);
        self.panels.update(
            queue,
            &SceneUniform::new(self.state.group(), &self.options.lighting),
        );

        let viewport = *self.state.viewport();
        let text_ready = match self.text.prepare(
            &self.context,
            &self.camera,
            self.state.group(),
            &viewport,
            self.state.class(),
        ) {
            Ok(()) => true,
            Err(e) => {
                log::error!("text prepare failed: {e}");
                false
            }
        };

        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        let [r, g, b] = self
            .options
            .lighting
            .background
            .for_target(self.context.format());
        {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Panel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: f64::from(r),
                            g: f64::from(g),
                            b: f64::from(b),
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(
                    wgpu::RenderPassDepthStencilAttachment {
                        view: &self.depth.view,
                        depth_ops: Some(wgpu::Operations {
                            load: wgpu::LoadOp::Clear(1.0),
                            store: wgpu::StoreOp::Discard,
                        }),
                        stencil_ops: None,
                    },
                ),
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.panels.draw(&mut rp, &self.camera_binding);
        }

        if text_ready {
            let mut rp = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Text Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            if let Err(e) = self.text.render(&mut rp) {
                log::error!("text render failed: {e}");
            }
        }

        self.context.submit(encoder);
        frame.present();
        self.text.trim();
        Ok(())
    }
}
