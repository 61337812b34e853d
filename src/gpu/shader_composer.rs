use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, ComposerError, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::ViewerError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Shared WGSL modules are registered at construction time; consuming
/// shaders use `#import shadelab::module_name` to pull them in. The composer
/// produces `naga::Module` IR directly, skipping a WGSL re-parse in wgpu.
pub struct ShaderComposer {
    composer: Composer,
}

/// A top-level shader: embedded source and the path used in diagnostics.
#[derive(Debug, Clone, Copy)]
pub struct ShaderFile {
    /// WGSL source, possibly containing `#import` directives.
    pub source: &'static str,
    /// Path reported in composition errors.
    pub file_path: &'static str,
}

macro_rules! shader {
    ($path:literal) => {
        ShaderFile {
            source: include_str!(concat!("../../assets/shaders/", $path)),
            file_path: $path,
        }
    };
}

impl ShaderFile {
    /// Lit, textured ground and boxes.
    pub const COMMON: Self = shader!("raster/common.wgsl");
    /// Normal / parallax mapped wall.
    pub const NORMAL_MAP: Self = shader!("raster/normal_map.wgsl");
    /// Unlit light marker.
    pub const LIGHT: Self = shader!("raster/light.wgsl");
    /// Cube-mapped background.
    pub const SKYBOX: Self = shader!("raster/skybox.wgsl");
    /// Grayscale post-process.
    pub const MONOCHROME: Self = shader!("screen/monochrome.wgsl");

    /// Every top-level shader the renderer builds.
    pub const ALL: [Self; 5] = [
        Self::COMMON,
        Self::NORMAL_MAP,
        Self::LIGHT,
        Self::SKYBOX,
        Self::MONOCHROME,
    ];
}

/// Shared modules, in dependency order.
const MODULES: [ShaderFile; 3] = [
    shader!("modules/camera.wgsl"),
    shader!("modules/lighting.wgsl"),
    shader!("modules/fullscreen.wgsl"),
];

impl ShaderComposer {
    /// Create a composer with every shared module registered.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Shader`] if a shared module fails to parse.
    pub fn new() -> Result<Self, ViewerError> {
        let mut composer = Composer::default();

        for m in &MODULES {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| shader_error(m.file_path, &e))?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader into a `wgpu::ShaderModule` ready for pipeline
    /// creation.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Shader`] carrying the composer diagnostic.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        shader: ShaderFile,
    ) -> Result<wgpu::ShaderModule, ViewerError> {
        let naga_module = self.compose_naga(shader)?;

        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose a shader into a `naga::Module` without creating a wgpu shader
    /// module. Useful for validating shaders without a GPU device.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::Shader`] carrying the composer diagnostic.
    pub fn compose_naga(
        &mut self,
        shader: ShaderFile,
    ) -> Result<naga::Module, ViewerError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source: shader.source,
                file_path: shader.file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| shader_error(shader.file_path, &e))
    }
}

fn shader_error(file_path: &str, error: &ComposerError) -> ViewerError {
    ViewerError::Shader(format!("{file_path}: {error}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The composer validates every module it produces, so this covers
    /// parsing, import resolution and type checking of every shader.
    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for shader in ShaderFile::ALL {
            let module = composer
                .compose_naga(shader)
                .unwrap_or_else(|e| panic!("{e}"));
            assert!(
                module.entry_points.len() >= 2,
                "{} should define vs_main and fs_main",
                shader.file_path
            );
        }
    }

    #[test]
    fn broken_shader_reports_path() {
        let mut composer = ShaderComposer::new().unwrap();
        let broken = ShaderFile {
            source: "@fragment fn fs_main() -> @location(0) vec4<f32> { return nope; }",
            file_path: "broken.wgsl",
        };
        let err = composer.compose_naga(broken).unwrap_err();
        assert!(matches!(err, ViewerError::Shader(ref msg) if msg.contains("broken.wgsl")));
    }
}
