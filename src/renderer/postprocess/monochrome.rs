//! Grayscale post pass.
//!
//! While monochrome mode is on the scene renders into [`MonochromePass`]'s
//! offscreen target instead of the swapchain. This pass then clears the
//! swapchain to white and draws one fullscreen triangle that converts the
//! offscreen image to luminance.

use super::screen_pass::ScreenPass;
use crate::gpu::pipeline_helpers::{
    create_screen_space_pipeline, filtering_sampler, linear_sampler, texture_2d,
};
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::{ShaderComposer, ShaderFile};
use crate::gpu::texture::RenderTarget;
use crate::renderer::compose_or_log;

/// Offscreen scene target plus the grayscale conversion pipeline.
pub struct MonochromePass {
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    sampler: wgpu::Sampler,
    target: RenderTarget,
    size: (u32, u32),
}

impl MonochromePass {
    /// Allocate a surface-sized offscreen target and build the pipeline.
    #[must_use]
    pub fn new(context: &RenderContext, composer: &mut ShaderComposer) -> Self {
        let device = &context.device;
        let size = (context.width(), context.height());
        let target = Self::create_target(context, size);
        let sampler = linear_sampler(device, "Monochrome Sampler");

        let bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Monochrome Layout"),
                entries: &[texture_2d(0), filtering_sampler(1)],
            });
        let bind_group =
            Self::create_bind_group(device, &bind_group_layout, &target.view, &sampler);

        let pipeline =
            compose_or_log(context, composer, "Monochrome Shader", ShaderFile::MONOCHROME)
                .map(|shader| {
                    create_screen_space_pipeline(
                        device,
                        "Monochrome",
                        &shader,
                        context.format(),
                        &[&bind_group_layout],
                    )
                });

        Self {
            pipeline,
            bind_group_layout,
            bind_group,
            sampler,
            target,
            size,
        }
    }

    /// The view the scene should render into while monochrome is on.
    #[must_use]
    pub fn scene_view(&self) -> &wgpu::TextureView {
        &self.target.view
    }

    fn create_target(context: &RenderContext, size: (u32, u32)) -> RenderTarget {
        RenderTarget::new(&context.device, "Monochrome Scene Target", size, context.format())
    }

    fn create_bind_group(
        device: &wgpu::Device,
        layout: &wgpu::BindGroupLayout,
        view: &wgpu::TextureView,
        sampler: &wgpu::Sampler,
    ) -> wgpu::BindGroup {
        device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Monochrome Bind Group"),
            layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(sampler),
                },
            ],
        })
    }
}

impl ScreenPass for MonochromePass {
    fn render(&self, encoder: &mut wgpu::CommandEncoder, output: &wgpu::TextureView) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Monochrome Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: output,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        let Some(pipeline) = &self.pipeline else {
            return;
        };
        pass.set_pipeline(pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.draw(0..3, 0..1);
    }

    fn resize(&mut self, context: &RenderContext) {
        let size = (context.width(), context.height());
        if size == self.size {
            return;
        }
        self.size = size;
        self.target = Self::create_target(context, size);
        self.bind_group = Self::create_bind_group(
            &context.device,
            &self.bind_group_layout,
            &self.target.view,
            &self.sampler,
        );
    }
}
