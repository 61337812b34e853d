//! The viewer engine: GPU resources plus the per-frame update and render.
//!
//! [`ViewerState`] holds everything that changes without a GPU; this module
//! turns it into uniforms and draw calls. Every buffer, texture and pipeline
//! is created in [`ViewerEngine::new`]; the frame path only writes uniforms
//! and encodes passes.

mod plan;
mod state;
mod transforms;

pub use plan::{ColorTarget, DrawStep, FramePlan};
pub use state::ViewerState;
pub use transforms::{ClipPlanes, FrameTransforms, ObjectTransform};

use glam::Vec3;

use crate::error::ViewerError;
use crate::gpu::render_context::RenderContext;
use crate::gpu::shader_composer::ShaderComposer;
use crate::gpu::texture::RenderTarget;
use crate::input::InputEvent;
use crate::options::Options;
use crate::renderer::light_pass::LightPass;
use crate::renderer::mesh_pass::MeshPass;
use crate::renderer::postprocess::{MonochromePass, ScreenPass};
use crate::renderer::skybox_pass::SkyboxPass;
use crate::renderer::uniforms::{FrameUniforms, ObjectUniforms, UniformBinding};
use crate::renderer::wall_pass::WallPass;
use crate::renderer::SceneLayouts;
use crate::scene::Scene;

/// Seconds between FPS log lines.
const FPS_LOG_INTERVAL: f32 = 5.0;

/// Owns the GPU context, the draw passes and the viewer state.
pub struct ViewerEngine {
    /// Device, queue and surface.
    pub context: RenderContext,
    /// Camera, modes, input and timing.
    pub state: ViewerState,
    /// The scene being drawn.
    pub scene: Scene,
    /// Options the engine was built with.
    pub options: Options,
    frame_uniforms: UniformBinding,
    mesh_pass: MeshPass,
    wall_pass: Option<WallPass>,
    light_pass: LightPass,
    skybox_pass: SkyboxPass,
    monochrome_pass: MonochromePass,
    depth: RenderTarget,
    last_fps_log: f32,
}

impl ViewerEngine {
    /// Create the GPU context, load every asset and build every pipeline.
    ///
    /// Missing textures and shaders that fail to compose are logged and
    /// degrade the picture; only GPU setup and the shared shader modules
    /// are fatal.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Gpu`] if the context cannot be created and
    /// [`ViewerError::Shader`] if a shared shader module is invalid.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        size: (u32, u32),
        options: Options,
    ) -> Result<Self, ViewerError> {
        let context = RenderContext::new(window, size).await?;
        let mut composer = ShaderComposer::new()?;
        let layouts = SceneLayouts::new(&context.device);

        let scene = Scene::with_light(Vec3::from_array(options.lighting.light_position));
        let state = ViewerState::new(&options);

        let frame_uniforms = UniformBinding::new(
            &context.device,
            "Frame Uniforms",
            &layouts.frame,
            &FrameUniforms::new(
                state.camera.view_matrix(),
                glam::Mat4::IDENTITY,
                glam::Mat4::IDENTITY,
                state.camera.position,
            ),
        );

        let mesh_pass = MeshPass::new(&context, &layouts, &mut composer, &scene, &options.assets);
        let wall_pass = scene
            .wall
            .map(|wall| WallPass::new(&context, &layouts, &mut composer, &wall, &options.assets));
        let light_pass = LightPass::new(&context, &layouts, &mut composer, &scene.light);
        let skybox_pass = SkyboxPass::new(
            &context,
            &layouts,
            &mut composer,
            &scene.skybox_faces,
            &options.assets,
        );
        let monochrome_pass = MonochromePass::new(&context, &mut composer);
        let depth = RenderTarget::depth(&context.device, (context.width(), context.height()));

        log::info!(
            "engine ready: {}x{}, {} boxes, modes {:?}",
            context.width(),
            context.height(),
            mesh_pass.box_count(),
            state.modes
        );

        Ok(Self {
            context,
            state,
            scene,
            options,
            frame_uniforms,
            mesh_pass,
            wall_pass,
            light_pass,
            skybox_pass,
            monochrome_pass,
            depth,
            last_fps_log: 0.0,
        })
    }

    /// Forward an input event to the viewer state.
    pub fn handle_input(&mut self, event: InputEvent) {
        self.state.handle_event(event);
    }

    /// Whether the exit action or a close request was seen.
    #[must_use]
    pub fn exit_requested(&self) -> bool {
        self.state.exit_requested()
    }

    /// Advance the clock and apply this frame's input. Returns the elapsed
    /// seconds.
    pub fn update(&mut self) -> f32 {
        let elapsed = self.state.begin_frame();

        let total = self.state.clock.total();
        if total - self.last_fps_log >= FPS_LOG_INTERVAL {
            self.last_fps_log = total;
            log::debug!("{:.1} fps", self.state.clock.fps());
        }
        elapsed
    }

    /// Reconfigure the surface and recreate size-dependent targets.
    pub fn resize(&mut self, width: u32, height: u32) {
        if !self.context.resize(width, height) {
            return;
        }
        self.depth = RenderTarget::depth(&self.context.device, (width, height));
        self.monochrome_pass.resize(&self.context);
    }

    /// Encode and present one frame.
    ///
    /// # Errors
    ///
    /// Returns the surface error if the next swapchain image can't be
    /// acquired; the caller decides whether to resize or skip the frame.
    pub fn render(&self) -> Result<(), wgpu::SurfaceError> {
        let plan = FramePlan::new(self.state.modes, &self.scene);
        let clip = ClipPlanes {
            znear: self.options.camera.znear,
            zfar: self.options.camera.zfar,
        };
        let transforms = FrameTransforms::compute(
            &self.state.camera,
            self.context.aspect(),
            clip,
            &self.scene,
            self.state.clock.total(),
        );
        self.upload(&transforms);

        let frame = self.context.acquire_frame()?;
        let display = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.context.create_encoder();

        let color_view = match plan.color_target {
            ColorTarget::Display => &display,
            ColorTarget::Offscreen => self.monochrome_pass.scene_view(),
        };
        self.draw_scene(&mut encoder, color_view, &plan.steps);

        if plan.post_pass {
            self.monochrome_pass.render(&mut encoder, &display);
        }

        self.context.submit(encoder);
        frame.present();
        Ok(())
    }

    fn upload(&self, transforms: &FrameTransforms) {
        let queue = &self.context.queue;
        let height_scale = self.scene.wall.map_or(0.0, |wall| wall.height_scale);
        let frame = FrameUniforms::new(
            transforms.view,
            transforms.projection,
            transforms.sky_view_projection,
            transforms.view_position,
        )
        .with_modes(self.state.modes)
        .with_light(self.scene.light.position, &self.options.lighting)
        .with_fog(&self.options.fog)
        .with_height_scale(height_scale);
        self.frame_uniforms.write(queue, &frame);

        let ground = ObjectUniforms::new(transforms.ground.model, transforms.ground.shininess);
        let boxes: Vec<ObjectUniforms> = transforms
            .boxes
            .iter()
            .map(|b| ObjectUniforms::new(b.model, b.shininess))
            .collect();
        self.mesh_pass.prepare(queue, &ground, &boxes);

        if let (Some(pass), Some(wall)) = (&self.wall_pass, transforms.wall) {
            pass.prepare(queue, &ObjectUniforms::new(wall.model, wall.shininess));
        }
        self.light_pass
            .prepare(queue, &ObjectUniforms::new(transforms.light, 0.0));
    }

    fn draw_scene(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        color_view: &wgpu::TextureView,
        steps: &[DrawStep],
    ) {
        let [r, g, b] = self.options.lighting.clear_color;
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Scene Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: color_view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color {
                        r: f64::from(r),
                        g: f64::from(g),
                        b: f64::from(b),
                        a: 1.0,
                    }),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
        });

        pass.set_bind_group(0, self.frame_uniforms.bind_group(), &[]);
        for step in steps {
            match *step {
                DrawStep::Ground => self.mesh_pass.draw_ground(&mut pass),
                DrawStep::Box(i) => self.mesh_pass.draw_box(&mut pass, i),
                DrawStep::Wall { height_map } => {
                    if let Some(wall) = &self.wall_pass {
                        wall.draw(&mut pass, height_map);
                    }
                }
                DrawStep::LightMarker => self.light_pass.draw(&mut pass),
                DrawStep::Skybox => self.skybox_pass.draw(&mut pass),
            }
        }
    }
}
