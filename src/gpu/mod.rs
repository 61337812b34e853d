//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, shader composition, image
//! texture loading, and bind-group/pipeline boilerplate helpers.

/// Shared wgpu boilerplate helpers for bind groups, samplers and pipelines.
pub mod pipeline_helpers;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// WGSL shader composition with `#import` support via naga-oil.
pub mod shader_composer;
/// Image textures, cube maps and render targets.
pub mod texture;
