//! Unlit marker cube at the light position.

use super::uniforms::{ObjectUniforms, UniformBinding};
use super::{compose_or_log, SceneLayouts};
use crate::gpu::pipeline_helpers::{
    create_scene_pipeline, create_vertex_buffer, depth_stencil_state, ScenePipelineDef,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderFile};
use crate::scene::geometry::{cube_positions, position_layout};
use crate::scene::LightMarker;

/// Draws the light marker in the light's color.
pub struct LightPass {
    pipeline: Option<wgpu::RenderPipeline>,
    vertices: wgpu::Buffer,
    vertex_count: u32,
    uniforms: UniformBinding,
}

impl LightPass {
    /// Upload the marker cube and build the pipeline.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        layouts: &SceneLayouts,
        composer: &mut ShaderComposer,
        light: &LightMarker,
    ) -> Self {
        let device = &context.device;
        let positions = cube_positions();
        let pipeline = compose_or_log(context, composer, "Light Shader", ShaderFile::LIGHT)
            .map(|shader| {
                create_scene_pipeline(
                    device,
                    context.format(),
                    ScenePipelineDef {
                        label: "Light Marker",
                        shader: &shader,
                        bind_group_layouts: &[&layouts.frame, &layouts.object],
                        vertex_layout: position_layout(),
                        depth: depth_stencil_state(wgpu::CompareFunction::Less, true),
                    },
                )
            });
        let initial = ObjectUniforms::new(light.model(), 0.0);
        Self {
            pipeline,
            vertices: create_vertex_buffer(device, "Light Marker Vertices", positions),
            vertex_count: positions.len() as u32,
            uniforms: UniformBinding::new(device, "Light Marker Uniforms", &layouts.object, &initial),
        }
    }

    /// Upload this frame's marker transform.
    pub fn prepare(&self, queue: &wgpu::Queue, uniforms: &ObjectUniforms) {
        self.uniforms.write(queue, uniforms);
    }

    /// Draw the marker. Group 0 must already be bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(1, self.uniforms.bind_group(), &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}
