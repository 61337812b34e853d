//! The interface shared by fullscreen passes.

use crate::gpu::render_context::RenderContext;

/// Uniform interface for fullscreen post-processing passes.
pub trait ScreenPass {
    /// Encode GPU commands that read this pass's input and write `output`.
    fn render(&self, encoder: &mut wgpu::CommandEncoder, output: &wgpu::TextureView);
    /// Recreate resolution-dependent resources after the surface resized.
    fn resize(&mut self, context: &RenderContext);
}
