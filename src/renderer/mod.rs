//! Draw passes for the fixed scene.
//!
//! The scene pipelines share two bind group layouts: per-frame uniforms at
//! group 0 and per-object uniforms at group 1. Each pass owns its geometry,
//! its material bind groups and a pipeline. A pass whose shader fails to
//! compose keeps `None` for its pipeline and skips its draws.

pub mod light_pass;
pub mod mesh_pass;
pub mod postprocess;
pub mod skybox_pass;
pub mod uniforms;
pub mod wall_pass;

use crate::gpu::pipeline_helpers::uniform_layout;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderFile};

/// Bind group layouts shared by every scene pipeline.
pub struct SceneLayouts {
    /// Group 0: [`uniforms::FrameUniforms`].
    pub frame: wgpu::BindGroupLayout,
    /// Group 1: [`uniforms::ObjectUniforms`].
    pub object: wgpu::BindGroupLayout,
}

impl SceneLayouts {
    /// Create the shared layouts.
    #[must_use]
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            frame: uniform_layout(device, "Frame Uniform Layout"),
            object: uniform_layout(device, "Object Uniform Layout"),
        }
    }
}

/// Compose `shader`, logging and returning `None` on failure.
pub(crate) fn compose_or_log(
    context: &RenderContext,
    composer: &mut ShaderComposer,
    label: &str,
    shader: ShaderFile,
) -> Option<wgpu::ShaderModule> {
    composer
        .compose(&context.device, label, shader)
        .map_err(|e| log::error!("{label} disabled: {e}"))
        .ok()
}
