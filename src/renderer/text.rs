//! Panel labels and the desktop fallback message, drawn with glyphon.
//!
//! Labels are shaped once at a fixed reference size. Each frame the label
//! anchor is projected to screen space and the glyphs are scaled so the
//! label keeps its world-space size (0.2 units per em by default) at the
//! current depth and group scale.

use glam::Vec3;
use glyphon::cosmic_text::Align;
use glyphon::{
    Attrs, Buffer, Cache, Color, ColorMode, Family, FontSystem, Metrics,
    Resolution, Shaping, SwashCache, TextArea, TextAtlas, TextBounds,
    TextRenderer as GlyphonRenderer, Viewport as GlyphonViewport,
};

use crate::camera::Camera;
use crate::gpu::render_context::RenderContext;
use crate::scene::{Panel, PanelGroup, PanelStyle, Rgb};
use crate::viewport::{Viewport, ViewportClass};

/// Message shown on viewports that cannot tilt-scroll.
pub const FALLBACK_MESSAGE: &str = "Tilt scrolling needs a phone or tablet \
with a gyroscope. Open this page on a mobile device to explore the panels.";

/// Em size labels are shaped at, in pixels.
const REFERENCE_FONT_PX: f32 = 32.0;
/// Overlay em size in logical pixels.
const OVERLAY_FONT_PX: f32 = 18.0;
/// Widest the overlay text block gets, in logical pixels.
const OVERLAY_MAX_WIDTH: f32 = 520.0;
/// Minimum gap between the overlay and the viewport sides, in logical
/// pixels.
const OVERLAY_MARGIN: f32 = 24.0;

/// Where and how large to draw one shaped label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelPlacement {
    /// Left edge in physical pixels.
    pub left: f32,
    /// Top edge in physical pixels.
    pub top: f32,
    /// Glyph scale relative to the reference shaping size.
    pub scale: f32,
}

/// Place a label whose shaped block is `block_width` × `block_height`
/// reference pixels, centered on `anchor` (group-local).
///
/// Returns `None` when the anchor is behind the camera or the scaled block
/// falls entirely outside the viewport.
#[must_use]
pub fn place_label(
    anchor: Vec3,
    block_width: f32,
    block_height: f32,
    font_size: f32,
    group: &PanelGroup,
    camera: &Camera,
    viewport: &Viewport,
) -> Option<LabelPlacement> {
    let world = group.to_world(anchor);
    let center = camera.project(world, viewport)?;
    let ppu = camera.pixels_per_unit(world, viewport)?;
    let scale = font_size * group.scale() * ppu / REFERENCE_FONT_PX;

    let half_h = block_height * scale * 0.5;
    if center.y + half_h < 0.0 || center.y - half_h > viewport.height as f32 {
        return None;
    }
    Some(LabelPlacement {
        left: center.x - block_width * scale * 0.5,
        top: center.y - half_h,
        scale,
    })
}

/// Group-local anchor and shaped size (reference pixels) of one label.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelBlock {
    /// Center of the label in group-local space.
    pub anchor: Vec3,
    /// Wrap width the label was shaped at.
    pub width: f32,
    /// Height of all shaped lines.
    pub height: f32,
}

/// Top-left corner of the fallback message, in physical pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayPlacement {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
}

/// Center a `width` × `height` block (physical pixels) in the viewport.
#[must_use]
pub fn place_overlay(width: f32, height: f32, viewport: &Viewport) -> OverlayPlacement {
    OverlayPlacement {
        left: (viewport.width as f32 - width) * 0.5,
        top: (viewport.height as f32 - height) * 0.5,
    }
}

/// Text drawn in one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TextPlan {
    /// Visible labels as (index into the label list, placement).
    pub labels: Vec<(usize, LabelPlacement)>,
    /// Fallback message placement; `None` on mobile viewports.
    pub overlay: Option<OverlayPlacement>,
}

/// Decide which text to draw and where.
///
/// Labels follow the panel group on every viewport; the fallback message
/// only appears when the viewport cannot tilt-scroll.
#[must_use]
pub fn plan_text(
    blocks: &[LabelBlock],
    font_size: f32,
    overlay_size: (f32, f32),
    class: ViewportClass,
    group: &PanelGroup,
    camera: &Camera,
    viewport: &Viewport,
) -> TextPlan {
    let labels = blocks
        .iter()
        .enumerate()
        .filter_map(|(i, block)| {
            place_label(
                block.anchor,
                block.width,
                block.height,
                font_size,
                group,
                camera,
                viewport,
            )
            .map(|placement| (i, placement))
        })
        .collect();
    let overlay = (!class.is_mobile())
        .then(|| place_overlay(overlay_size.0, overlay_size.1, viewport));
    TextPlan { labels, overlay }
}

fn block_height(buffer: &Buffer) -> f32 {
    buffer.layout_runs().count() as f32 * buffer.metrics().line_height
}

/// Set `text` and center every line within the buffer width.
fn shape_centered(
    buffer: &mut Buffer,
    font_system: &mut FontSystem,
    text: &str,
    attrs: &Attrs<'_>,
) {
    buffer.set_text(font_system, text, attrs, Shaping::Advanced);
    for line in &mut buffer.lines {
        let _ = line.set_align(Some(Align::Center));
    }
    buffer.shape_until_scroll(font_system, false);
}

fn glyph_color(color: Rgb) -> Color {
    Color::rgb(color.r, color.g, color.b)
}

/// Shapes and draws all screen-space text.
pub struct TextRenderer {
    font_system: FontSystem,
    swash_cache: SwashCache,
    atlas: TextAtlas,
    renderer: GlyphonRenderer,
    viewport: GlyphonViewport,
    labels: Vec<Buffer>,
    blocks: Vec<LabelBlock>,
    overlay: Buffer,
    overlay_width: f32,
    font_size: f32,
    text_color: Color,
}

impl TextRenderer {
    /// Shape every panel label and the fallback message.
    ///
    /// `extra_fonts` are raw TTF/OTF files loaded on top of the system
    /// fonts; on the web there are no system fonts, so at least one must
    /// be supplied for text to appear.
    pub fn new(
        context: &RenderContext,
        panels: &[Panel],
        style: &PanelStyle,
        viewport: &Viewport,
        extra_fonts: Vec<Vec<u8>>,
    ) -> Self {
        let mut font_system = FontSystem::new();
        for font in extra_fonts {
            font_system.db_mut().load_font_data(font);
        }
        let swash_cache = SwashCache::new();
        let cache = Cache::new(&context.device);
        let color_mode = if context.format().is_srgb() {
            ColorMode::Accurate
        } else {
            ColorMode::Web
        };
        let mut atlas = TextAtlas::with_color_mode(
            &context.device,
            &context.queue,
            &cache,
            context.format(),
            color_mode,
        );
        let renderer = GlyphonRenderer::new(
            &mut atlas,
            &context.device,
            wgpu::MultisampleState::default(),
            None,
        );
        let glyphon_viewport = GlyphonViewport::new(&context.device, &cache);

        let text_color = glyph_color(style.text_color);
        let attrs = Attrs::new().family(Family::SansSerif).color(text_color);
        let metrics = Metrics::new(
            REFERENCE_FONT_PX,
            REFERENCE_FONT_PX * style.line_height,
        );
        let block_width =
            style.max_text_width / style.font_size * REFERENCE_FONT_PX;

        let (labels, blocks): (Vec<Buffer>, Vec<LabelBlock>) = panels
            .iter()
            .map(|panel| {
                let mut buffer = Buffer::new(&mut font_system, metrics);
                buffer.set_size(&mut font_system, Some(block_width), None);
                shape_centered(&mut buffer, &mut font_system, panel.text, &attrs);
                let block = LabelBlock {
                    anchor: panel.position + style.text_offset,
                    width: block_width,
                    height: block_height(&buffer),
                };
                (buffer, block)
            })
            .unzip();

        let overlay_metrics = Metrics::new(OVERLAY_FONT_PX, OVERLAY_FONT_PX * 1.5);
        let overlay = Buffer::new(&mut font_system, overlay_metrics);

        let mut text = Self {
            font_system,
            swash_cache,
            atlas,
            renderer,
            viewport: glyphon_viewport,
            labels,
            blocks,
            overlay,
            overlay_width: 0.0,
            font_size: style.font_size,
            text_color,
        };
        text.resize(viewport);
        text
    }

    /// Re-wrap the overlay for a new surface size or scale factor.
    pub fn resize(&mut self, viewport: &Viewport) {
        let sf = viewport.scale_factor as f32;
        let font_px = OVERLAY_FONT_PX * sf;
        let available = viewport.width as f32 - 2.0 * OVERLAY_MARGIN * sf;
        self.overlay_width = available.min(OVERLAY_MAX_WIDTH * sf).max(1.0);

        self.overlay
            .set_metrics(&mut self.font_system, Metrics::new(font_px, font_px * 1.5));
        self.overlay
            .set_size(&mut self.font_system, Some(self.overlay_width), None);
        let attrs = Attrs::new().family(Family::SansSerif).color(self.text_color);
        shape_centered(
            &mut self.overlay,
            &mut self.font_system,
            FALLBACK_MESSAGE,
            &attrs,
        );
    }

    /// Lay out this frame's labels, plus the fallback message on
    /// viewports of class [`ViewportClass::Desktop`].
    ///
    /// # Errors
    ///
    /// Returns [`glyphon::PrepareError`] if the glyph atlas cannot grow.
    pub fn prepare(
        &mut self,
        context: &RenderContext,
        camera: &Camera,
        group: &PanelGroup,
        viewport: &Viewport,
        class: ViewportClass,
    ) -> Result<(), glyphon::PrepareError> {
        self.viewport.update(
            &context.queue,
            Resolution {
                width: viewport.width,
                height: viewport.height,
            },
        );

        let bounds = TextBounds {
            left: 0,
            top: 0,
            right: viewport.width as i32,
            bottom: viewport.height as i32,
        };

        let plan = plan_text(
            &self.blocks,
            self.font_size,
            (self.overlay_width, block_height(&self.overlay)),
            class,
            group,
            camera,
            viewport,
        );

        let mut areas: Vec<TextArea<'_>> = plan
            .labels
            .iter()
            .map(|(i, placement)| TextArea {
                buffer: &self.labels[*i],
                left: placement.left,
                top: placement.top,
                scale: placement.scale,
                bounds,
                default_color: self.text_color,
                custom_glyphs: &[],
            })
            .collect();

        if let Some(overlay) = plan.overlay {
            areas.push(TextArea {
                buffer: &self.overlay,
                left: overlay.left,
                top: overlay.top,
                scale: 1.0,
                bounds,
                default_color: self.text_color,
                custom_glyphs: &[],
            });
        }

        self.renderer.prepare(
            &context.device,
            &context.queue,
            &mut self.font_system,
            &mut self.atlas,
            &self.viewport,
            areas,
            &mut self.swash_cache,
        )
    }

    /// Record the prepared text into `pass`.
    ///
    /// # Errors
    ///
    /// Returns [`glyphon::RenderError`] if prepared glyphs were evicted.
    pub fn render(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
    ) -> Result<(), glyphon::RenderError> {
        self.renderer.render(&self.atlas, &self.viewport, pass)
    }

    /// Drop atlas entries unused this frame.
    pub fn trim(&mut self) {
        self.atlas.trim();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::CameraOptions;

    fn setup(width: u32, height: u32) -> (Camera, Viewport) {
        let vp = Viewport::new(width, height, 1.0);
        (Camera::from_options(&CameraOptions::default(), vp.aspect()), vp)
    }

    #[test]
    fn label_is_centered_on_projected_anchor() {
        let (camera, vp) = setup(800, 600);
        let group = PanelGroup::default();
        let p = place_label(
            Vec3::new(0.0, 0.0, 0.1),
            560.0,
            96.0,
            0.2,
            &group,
            &camera,
            &vp,
        )
        .unwrap();
        let world = Vec3::new(0.0, 0.0, 0.1);
        let ppu = camera.pixels_per_unit(world, &vp).unwrap();
        let expected_scale = 0.2 * ppu / REFERENCE_FONT_PX;
        assert!((p.scale - expected_scale).abs() < 1e-5);
        assert!((p.left + 560.0 * p.scale * 0.5 - 400.0).abs() < 1e-2);
        assert!((p.top + 96.0 * p.scale * 0.5 - 300.0).abs() < 1e-2);
    }

    #[test]
    fn group_scale_shrinks_labels() {
        let (camera, vp) = setup(390, 844);
        let mut group = PanelGroup::default();
        let anchor = Vec3::new(0.0, 0.0, 0.1);
        let full = place_label(anchor, 560.0, 96.0, 0.2, &group, &camera, &vp)
            .unwrap();
        group.write(0.0, 0.7);
        let small = place_label(anchor, 560.0, 96.0, 0.2, &group, &camera, &vp)
            .unwrap();
        assert!(small.scale < full.scale);
    }

    #[test]
    fn offscreen_labels_are_culled() {
        let (camera, vp) = setup(800, 600);
        let mut group = PanelGroup::default();
        // Last panel anchor sits 12 units down; far below the frame at rest.
        let anchor = Vec3::new(0.0, -12.0, 0.1);
        assert!(
            place_label(anchor, 560.0, 96.0, 0.2, &group, &camera, &vp).is_none()
        );
        // Scrolled all the way, it comes into view.
        group.write(12.0, 1.0);
        assert!(
            place_label(anchor, 560.0, 96.0, 0.2, &group, &camera, &vp).is_some()
        );
    }

    fn default_blocks() -> Vec<LabelBlock> {
        let style = PanelStyle::DEFAULT;
        crate::scene::DEFAULT_PANELS
            .iter()
            .map(|panel| LabelBlock {
                anchor: panel.position + style.text_offset,
                width: 560.0,
                height: 96.0,
            })
            .collect()
    }

    #[test]
    fn desktop_frame_shows_centered_overlay() {
        let (camera, vp) = setup(1920, 1080);
        let plan = plan_text(
            &default_blocks(),
            0.2,
            (520.0, 81.0),
            ViewportClass::Desktop,
            &PanelGroup::default(),
            &camera,
            &vp,
        );
        let overlay = plan.overlay.unwrap();
        assert_eq!(overlay.left, (1920.0 - 520.0) / 2.0);
        assert_eq!(overlay.top, (1080.0 - 81.0) / 2.0);
        // Panels stay visible underneath.
        assert_eq!(plan.labels.first().map(|(i, _)| *i), Some(0));
    }

    #[test]
    fn mobile_frame_has_no_overlay() {
        let (camera, vp) = setup(390, 844);
        let plan = plan_text(
            &default_blocks(),
            0.2,
            (342.0, 108.0),
            ViewportClass::Mobile,
            &PanelGroup::default(),
            &camera,
            &vp,
        );
        assert!(plan.overlay.is_none());
        assert!(!plan.labels.is_empty());
    }

    #[test]
    fn overlay_follows_reclassification_after_resize() {
        use crate::engine::ScrollState;
        use crate::options::Options;

        let options = Options::default();
        let mut state = ScrollState::new(&options, Viewport::new(1920, 1080, 1.0));
        let blocks = default_blocks();
        let plan_for = |state: &ScrollState| {
            let vp = *state.viewport();
            let camera = Camera::from_options(&options.camera, vp.aspect());
            plan_text(
                &blocks,
                0.2,
                (300.0, 60.0),
                state.class(),
                state.group(),
                &camera,
                &vp,
            )
        };

        assert!(plan_for(&state).overlay.is_some());
        state.resize(390, 844);
        let _ = state.update();
        assert!(plan_for(&state).overlay.is_none());
        state.resize(1280, 800);
        let _ = state.update();
        assert!(plan_for(&state).overlay.is_some());
    }

    #[test]
    fn scrolled_group_changes_visible_labels() {
        let (camera, vp) = setup(390, 844);
        let mut group = PanelGroup::default();
        let blocks = default_blocks();
        let at_rest = plan_text(&blocks, 0.2, (1.0, 1.0), ViewportClass::Mobile, &group, &camera, &vp);
        group.write(12.0 * 0.7, 0.7);
        let scrolled = plan_text(&blocks, 0.2, (1.0, 1.0), ViewportClass::Mobile, &group, &camera, &vp);
        assert!(at_rest.labels.iter().any(|(i, _)| *i == 0));
        assert!(!scrolled.labels.iter().any(|(i, _)| *i == 0));
        assert!(scrolled.labels.iter().any(|(i, _)| *i == 4));
    }

    #[test]
    fn shaped_lines_are_centered_in_block() {
        let mut font_system = FontSystem::new();
        let width = 400.0;
        let mut buffer = Buffer::new(&mut font_system, Metrics::new(32.0, 48.0));
        buffer.set_size(&mut font_system, Some(width), None);
        shape_centered(&mut buffer, &mut font_system, "Tilt", &Attrs::new());

        assert!(buffer
            .lines
            .iter()
            .all(|line| line.align() == Some(Align::Center)));
        // Glyph positions need a font; hosts without one shape nothing.
        for run in buffer.layout_runs() {
            let (Some(first), Some(last)) = (run.glyphs.first(), run.glyphs.last())
            else {
                continue;
            };
            let left_gap = first.x;
            let right_gap = width - (last.x + last.w);
            assert!((left_gap - right_gap).abs() < 1.0);
        }
    }
}
