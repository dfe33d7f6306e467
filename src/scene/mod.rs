//! Scene content: the fixed panel list and the group transform that
//! scrolls it.
//!
//! Panels are authored in group-local space, stacked downward from the
//! origin. The renderer never moves individual panels; it only rewrites
//! the [`PanelGroup`] transform each frame.

mod color;
mod group;
mod panel;

pub use color::{ParseColorError, Rgb};
pub use group::PanelGroup;
pub use panel::{Panel, PanelStyle, DEFAULT_PANELS};
