//! Lit, textured meshes: the ground plane and the rotating boxes.

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
use crate::scene::geometry::{box_vertices, MeshVertex, GROUND};
use crate::scene::Scene;

/// One drawable object: its uniforms and its diffuse texture.
struct MeshObject {
    uniforms: UniformBinding,
    material: wgpu::BindGroup,
}

/// Draws the ground and the boxes with the lit textured pipeline.
pub struct MeshPass {
    pipeline: Option<wgpu::RenderPipeline>,
    ground_vertices: wgpu::Buffer,
    box_vertices: wgpu::Buffer,
    box_vertex_count: u32,
    ground: MeshObject,
    boxes: Vec<MeshObject>,
}

impl MeshPass {
    /// Load textures, upload geometry and build the pipeline.
    #[must_use]
    pub fn new(
        context: &RenderContext,
        layouts: &SceneLayouts,
        composer: &mut ShaderComposer,
        scene: &Scene,
        assets: &AssetOptions,
    ) -> Self {
        let device = &context.device;
        let material_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Mesh Material Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });
        let sampler = repeat_sampler(device, "Mesh Sampler");

        let make_object = |label: &str, texture_file: &str, model_shininess: f32| {
            let texture = Texture::load_2d(
                context,
                &assets.texture_path(texture_file),
                TextureKind::Color,
            );
            let material = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(label),
                layout: &material_layout,
                entries: &[
                    wgpu::BindGroupEntry {
                        binding: 0,
                        resource: wgpu::BindingResource::TextureView(&texture.view),
                    },
                    wgpu::BindGroupEntry {
                        binding: 1,
                        resource: wgpu::BindingResource::Sampler(&sampler),
                    },
                ],
            });
            let initial = ObjectUniforms::new(glam::Mat4::IDENTITY, model_shininess);
            MeshObject {
                uniforms: UniformBinding::new(device, label, &layouts.object, &initial),
                material,
            }
        };

        let ground = make_object("Ground", scene.ground.texture, scene.ground.shininess);
        let boxes = scene
            .boxes
            .iter()
            .enumerate()
            .map(|(i, b)| make_object(&format!("Box {i}"), b.texture, b.shininess))
            .collect();

        let box_mesh = box_vertices();
        let pipeline = compose_or_log(context, composer, "Mesh Shader", ShaderFile::COMMON)
            .map(|shader| {
                create_scene_pipeline(
                    device,
                    context.format(),
                    ScenePipelineDef {
                        label: "Mesh",
                        shader: &shader,
                        bind_group_layouts: &[
                            &layouts.frame,
                            &layouts.object,
                            &material_layout,
                        ],
                        vertex_layout: MeshVertex::layout(),
                        depth: depth_stencil_state(wgpu::CompareFunction::Less, true),
                    },
                )
            });

        Self {
            pipeline,
            ground_vertices: create_vertex_buffer(device, "Ground Vertices", &GROUND),
            box_vertices: create_vertex_buffer(device, "Box Vertices", &box_mesh),
            box_vertex_count: box_mesh.len() as u32,
            ground,
            boxes,
        }
    }

    /// Number of boxes this pass can draw.
    #[must_use]
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Upload this frame's ground and box transforms. Extra entries in
    /// `boxes` are ignored.
    pub fn prepare(
        &self,
        queue: &wgpu::Queue,
        ground: &ObjectUniforms,
        boxes: &[ObjectUniforms],
    ) {
        self.ground.uniforms.write(queue, ground);
        for (object, uniforms) in self.boxes.iter().zip(boxes) {
            object.uniforms.write(queue, uniforms);
        }
    }

    /// Draw the ground. Group 0 must already be bound.
    pub fn draw_ground(&self, pass: &mut wgpu::RenderPass<'_>) {
        self.draw_object(pass, &self.ground, &self.ground_vertices, GROUND.len() as u32);
    }

    /// Draw box `index`. Group 0 must already be bound.
    pub fn draw_box(&self, pass: &mut wgpu::RenderPass<'_>, index: usize) {
        if let Some(object) = self.boxes.get(index) {
            self.draw_object(pass, object, &self.box_vertices, self.box_vertex_count);
        }
    }

    fn draw_object(
        &self,
        pass: &mut wgpu::RenderPass<'_>,
        object: &MeshObject,
        vertices: &wgpu::Buffer,
        vertex_count: u32,
    ) {
        let Some(pipeline) = &self.pipeline else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(1, object.uniforms.bind_group(), &[]);
        pass.set_bind_group(2, &object.material, &[]);
        pass.set_vertex_buffer(0, vertices.slice(..));
        pass.draw(0..vertex_count, 0..1);
    }
}
