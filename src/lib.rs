// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
// Documentation
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![deny(rustdoc::bare_urls)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Complexity limits (thresholds in clippy.toml)
#![deny(clippy::cognitive_complexity)]
#![deny(clippy::too_many_lines)]
#![deny(clippy::excessive_nesting)]
// Function signature hygiene
#![deny(clippy::too_many_arguments)]
#![deny(clippy::fn_params_excessive_bools)]
// Clone / pass-by-value hygiene
#![deny(clippy::needless_pass_by_value)]
#![deny(clippy::implicit_clone)]
// String hygiene
#![deny(clippy::inefficient_to_string)]
#![deny(clippy::redundant_closure_for_method_calls)]
#![deny(clippy::manual_string_new)]
#![deny(clippy::str_to_string)]
// Cargo lints (warn, not deny since cargo lints can be noisy)
#![warn(clippy::cargo)]
// Unused / redundant code
#![deny(unused_results)]
#![deny(unused_qualifications)]
// Cast hygiene
#![deny(trivial_casts)]
#![deny(trivial_numeric_casts)]

//! Tilt-driven vertical scrolling of 3D content panels, rendered with wgpu.
//!
//! On phone-sized viewports the device's front-to-back tilt (the `beta`
//! angle of a device-orientation event) moves a stack of colored panels up
//! and down. Wider viewports keep the panels static and show a short
//! fallback message instead.
//!
//! # Key entry points
//!
//! - [`TiltScrollEngine`] - owns the GPU surface and draws one frame per call
//! - [`scroll::TiltScroller`] - the incremental, clamped tilt-to-offset map
//! - [`sensor::OrientationSource`] - how hosts plug in a tilt sensor
//! - [`options::Options`] - runtime configuration (scroll constants,
//!   breakpoints, camera, lighting, keybindings)
//!
//! # Architecture
//!
//! Sensor readings are pushed into a channel by the platform listener and
//! drained once per frame by [`engine::ScrollState`], which owns the scroll
//! offset. The offset and the viewport-dependent scale are written into the
//! [`scene::PanelGroup`] transform, then drawn in two passes: lit panel
//! slabs with depth testing, followed by screen-space labels.

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod input;
pub mod options;
pub mod page;
pub mod renderer;
pub mod scene;
pub mod scroll;
pub mod sensor;
pub mod viewport;
#[cfg(feature = "viewer")]
pub mod viewer;
#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;

pub use engine::TiltScrollEngine;
pub use error::TiltScrollError;
#[cfg(feature = "viewer")]
pub use viewer::{Viewer, ViewerBuilder};
