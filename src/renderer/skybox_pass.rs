//! Cube-mapped background.
//!
//! The vertex shader emits `pos.xyww`, so every skybox fragment lands on the
//! far plane. With a `LessEqual` test and no depth writes the sky fills only
//! what the scene left uncovered, which lets it be drawn last.

use super::compose_or_log;
use super::SceneLayouts;
use crate::gpu::pipeline_helpers::{
    create_scene_pipeline, create_vertex_buffer, depth_stencil_state,
    filtering_sampler, linear_sampler, texture_cube, ScenePipelineDef,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderFile};
use crate::gpu::texture::Texture;
use crate::options::AssetOptions;
use crate::scene::geometry::{cube_positions, position_layout};

/// Draws the skybox cube around the camera.
pub struct SkyboxPass {
    pipeline: Option<wgpu::RenderPipeline>,
    vertices: wgpu::Buffer,
    vertex_count: u32,
    bind_group: wgpu::BindGroup,
}

impl SkyboxPass {
    /// Load the six faces and build the pipeline.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        layouts: &SceneLayouts,
        composer: &mut ShaderComposer,
        faces: &[&str; 6],
        assets: &AssetOptions,
    ) -> Self {
        let device = &context.device;
        let paths = faces.map(|face| assets.texture_path(face));
        let cube = Texture::load_cube(context, &paths);
        let sampler = linear_sampler(device, "Skybox Sampler");

        let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Skybox Layout"),
            entries: &[texture_cube(0), filtering_sampler(1)],
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Skybox Bind Group"),
            layout: &layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&cube.view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = compose_or_log(context, composer, "Skybox Shader", ShaderFile::SKYBOX)
            .map(|shader| {
                create_scene_pipeline(
                    device,
                    context.format(),
                    ScenePipelineDef {
                        label: "Skybox",
                        shader: &shader,
                        bind_group_layouts: &[&layouts.frame, &layout],
                        vertex_layout: position_layout(),
                        depth: depth_stencil_state(wgpu::CompareFunction::LessEqual, false),
                    },
                )
            });

        let positions = cube_positions();
        Self {
            pipeline,
            vertices: create_vertex_buffer(device, "Skybox Vertices", positions),
            vertex_count: positions.len() as u32,
            bind_group,
        }
    }

    /// Draw the skybox. Group 0 must already be bound.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(1, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}
