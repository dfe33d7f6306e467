//! Rendering subsystems for the panel stack.
//!
//! Frames are drawn in two passes: the lit panel slabs (with depth), then
//! all text on top (labels and, on desktop viewports, the fallback
//! message).

pub mod panel;
pub mod text;

pub use panel::{PanelRenderer, SceneUniform};
pub use text::{plan_text, TextPlan, TextRenderer, FALLBACK_MESSAGE};
