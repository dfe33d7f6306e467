//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization and the depth attachment.

/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Depth render target.
pub mod texture;
