//! Normal-mapped wall with optional steep parallax.
//!
//! Two material bind groups are built up front: one carrying the real
//! height map and one carrying a flat map. Parallax mode only chooses which
//! one is bound, so toggling it never touches the GPU resources.

use super::uniforms::{ObjectUniforms, UniformBinding};
use super::{compose_or_log, SceneLayouts};
use crate::gpu::pipeline_helpers::{
    create_scene_pipeline, create_vertex_buffer, depth_stencil_state,
    filtering_sampler, repeat_sampler, texture_2d, ScenePipelineDef,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderFile};
use crate::gpu::texture::{Texture, TextureKind};
use crate::options::AssetOptions;
use crate::scene::geometry::{wall_vertices, TangentVertex};
use crate::scene::WallInstance;

/// Draws the wall quad with tangent-space lighting.
pub struct WallPass {
    pipeline: Option<wgpu::RenderPipeline>,
    vertices: wgpu::Buffer,
    vertex_count: u32,
    uniforms: UniformBinding,
    with_height: wgpu::BindGroup,
    flat: wgpu::BindGroup,
}

impl WallPass {
    /// Load the wall's three maps and build the pipeline.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        layouts: &SceneLayouts,
        composer: &mut ShaderComposer,
        wall: &WallInstance,
        assets: &AssetOptions,
    ) -> Self {
        let device = &context.device;
        let material_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Wall Material Layout"),
                entries: &[
                    texture_2d(0),
                    texture_2d(1),
                    texture_2d(2),
                    filtering_sampler(3),
                ],
            });
        let sampler = repeat_sampler(device, "Wall Sampler");

        let load = |file: &str, kind| Texture::load_2d(context, &assets.texture_path(file), kind);
        let diffuse = load(wall.diffuse, TextureKind::Color);
        let normal = load(wall.normal_map, TextureKind::Data);
        let height = load(wall.height_map, TextureKind::Data);
        // Zero depth everywhere: the parallax walk stops at the first layer.
        let no_height = Texture::solid(context, "Flat Height Map", [0, 0, 0, 255], TextureKind::Data);

        let material = |label: &str, height: &Texture| {
            device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &material_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&diffuse.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::TextureView(&normal.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 2,
                        resource: wgpu::BindingResource::TextureView(&height.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 3,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            })
        };
        let with_height = material("Wall Material", &height);
        let flat = material("Wall Material (flat)", &no_height);

        let pipeline =
            compose_or_log(context, composer, "Wall Shader", ShaderFile::NORMAL_MAP).map(
                |shader| {
                    create_scene_pipeline(
                        device,
                        context.format(),
                        ScenePipelineDef {
                            label: "Wall",
                            shader: &shader,
                            bind_group_layouts: &[
                                &layouts.frame,
                                &layouts.object,
                                &material_layout,
                            ],
                            vertex_layout: TangentVertex::layout(),
                            depth: depth_stencil_state(wgpu::CompareFunction::Less, true),
                        },
                    )
                },
            );

        let mesh = wall_vertices();
        let initial = ObjectUniforms::new(wall.model(0.0), wall.shininess);
        Self {
            pipeline,
            vertices: create_vertex_buffer(device, "Wall Vertices", &mesh),
            vertex_count: mesh.len() as u32,
            uniforms: UniformBinding::new(device, "Wall Uniforms", &layouts.object, &initial),
            with_height,
            flat,
        }
    }

    /// Upload this frame's wall transform.
    pub fn prepare(&self, queue: &wgpu::Queue, uniforms: &ObjectUniforms) {
        self.uniforms.write(queue, uniforms);
    }

    /// Draw the wall, sampling the height map only when `height_map` is set.
    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>, height_map: bool) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        let material = if height_map { &self.with_height } else { &self.flat };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(1, self.uniforms.bind_group(), &[]);
        pass.set_bind_group(2, material, &[]);
        pass.set_vertex_buffer(0, self.vertices.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}
