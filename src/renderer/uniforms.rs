//! GPU uniform layouts shared by the scene pipelines.
//!
//! Field order and padding mirror `FrameUniforms` / `ObjectUniforms` in
//! `assets/shaders/modules/camera.wgsl`.

use glam::{Mat4, Vec3};

use crate::gpu::pipeline_helpers::{create_uniform_buffer, uniform_bind_group};
use crate::modes::RenderModes;
use crate::options::{FogOptions, LightingOptions};

/// Per-frame camera, light, fog and mode state (bind group 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniforms {
    /// World to view transform.
    pub view: [[f32; 4]; 4],
    /// View to clip transform.
    pub projection: [[f32; 4]; 4],
    /// Projection times the rotation-only view, for the skybox.
    pub sky_view_projection: [[f32; 4]; 4],
    /// Camera position in world space.
    pub view_position: [f32; 3],
    /// Lighting flag (0 or 1).
    pub lighting: u32,
    /// Light position in world space.
    pub light_position: [f32; 3],
    /// Blinn-Phong flag (0 = Phong).
    pub blinn: u32,
    /// Light color.
    pub light_color: [f32; 3],
    /// Fog flag.
    pub fog: u32,
    /// Fog color.
    pub fog_color: [f32; 3],
    /// Parallax mapping flag.
    pub parallax: u32,
    /// Fog density.
    pub fog_density: f32,
    /// Fog gradient exponent.
    pub fog_gradient: f32,
    /// Ambient light factor.
    pub ambient: f32,
    /// Parallax displacement scale.
    pub height_scale: f32,
}

impl FrameUniforms {
    /// Camera matrices with every mode off and no light.
    #[must_use]
    pub fn new(
        view: Mat4,
        projection: Mat4,
        sky_view_projection: Mat4,
        view_position: Vec3,
    ) -> Self {
        Self {
            view: view.to_cols_array_2d(),
            projection: projection.to_cols_array_2d(),
            sky_view_projection: sky_view_projection.to_cols_array_2d(),
            view_position: view_position.to_array(),
            ..bytemuck::Zeroable::zeroed()
        }
    }

    /// Copy the mode flags the shaders branch on.
    #[must_use]
    pub fn with_modes(mut self, modes: RenderModes) -> Self {
        self.lighting = u32::from(modes.lighting);
        self.blinn = u32::from(modes.blinn);
        self.fog = u32::from(modes.fog);
        self.parallax = u32::from(modes.parallax);
        self
    }

    /// Set the point light.
    #[must_use]
    pub fn with_light(mut self, position: Vec3, lighting: &LightingOptions) -> Self {
        self.light_position = position.to_array();
        self.light_color = lighting.light_color;
        self.ambient = lighting.ambient;
        self
    }

    /// Set the fog curve and color.
    #[must_use]
    pub fn with_fog(mut self, fog: &FogOptions) -> Self {
        self.fog_density = fog.density;
        self.fog_gradient = fog.gradient;
        self.fog_color = fog.color;
        self
    }

    /// Set the parallax displacement scale.
    #[must_use]
    pub fn with_height_scale(mut self, height_scale: f32) -> Self {
        self.height_scale = height_scale;
        self
    }
}

/// Per-object transform and material (bind group 1).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniforms {
    /// Object to world transform.
    pub model: [[f32; 4]; 4],
    /// Inverse-transpose of `model`, for normals.
    pub normal_matrix: [[f32; 4]; 4],
    /// Specular exponent.
    pub shininess: f32,
    /// Padding to the WGSL struct size.
    pub _pad: [f32; 3],
}

impl ObjectUniforms {
    /// Uniforms for an object with the given transform and shininess.
    #[must_use]
    pub fn new(model: Mat4, shininess: f32) -> Self {
        Self {
            model: model.to_cols_array_2d(),
            normal_matrix: model.inverse().transpose().to_cols_array_2d(),
            shininess,
            _pad: [0.0; 3],
        }
    }
}

/// A uniform buffer and the bind group exposing it.
pub struct UniformBinding {
    buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl UniformBinding {
    /// Allocate a buffer holding `initial` and bind it with `layout`.
    #[must_use]
    pub fn new<T: bytemuck::Pod>(
        device: &wgpu::Device,
        label: &str,
        layout: &wgpu::BindGroupLayout,
        initial: &T,
    ) -> Self {
        let buffer = create_uniform_buffer(device, label, initial);
        let bind_group = uniform_bind_group(device, label, layout, &buffer);
        Self { buffer, bind_group }
    }

    /// Overwrite the buffer contents.
    pub fn write<T: bytemuck::Pod>(&self, queue: &wgpu::Queue, value: &T) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(value));
    }

    /// The bind group to set on a render pass.
    #[must_use]
    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sizes_match_wgsl_layout() {
        assert_eq!(size_of::<FrameUniforms>(), 272);
        assert_eq!(size_of::<ObjectUniforms>(), 144);
    }

    #[test]
    fn mode_flags_are_copied() {
        let modes = RenderModes {
            fog: true,
            blinn: false,
            ..Default::default()
        };
        let u = FrameUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ZERO)
            .with_modes(modes);
        assert_eq!((u.lighting, u.blinn, u.fog, u.parallax), (1, 0, 1, 0));
    }

    #[test]
    fn normal_matrix_undoes_non_uniform_scale() {
        let model = Mat4::from_scale(Vec3::new(2.0, 1.0, 1.0));
        let u = ObjectUniforms::new(model, 8.0);
        let normal = Mat4::from_cols_array_2d(&u.normal_matrix);
        let n = normal.transform_vector3(Vec3::X);
        assert!(n.abs_diff_eq(Vec3::new(0.5, 0.0, 0.0), 1e-6));
        assert_eq!(u.shininess, 8.0);
    }

    #[test]
    fn fog_and_light_builders() {
        let u = FrameUniforms::new(Mat4::IDENTITY, Mat4::IDENTITY, Mat4::IDENTITY, Vec3::ONE)
            .with_light(Vec3::new(0.0, 10.0, 0.0), &LightingOptions::default())
            .with_fog(&FogOptions::default());
        assert_eq!(u.light_position, [0.0, 10.0, 0.0]);
        assert_eq!(u.fog_density, 0.1);
        assert_eq!(u.fog_gradient, 0.9);
        assert_eq!(u.view_position, [1.0, 1.0, 1.0]);
    }
}
