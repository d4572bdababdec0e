//! Render settings.

use std::path::PathBuf;

use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::transform::Viewport;

pub const DEFAULT_MODEL: &str = "diablo3_pose";
pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 800;

/// How far the rim pass shifts every vertex along -x, in model units.
pub const DEFAULT_RIM_OFFSET: f32 = 0.1;

/// Everything the engine needs to know besides the model itself.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: u32,
    pub height: u32,
    /// Directory holding `<model>.obj` and `<model>_diffuse.tga`.
    pub model_dir: PathBuf,
    /// Directory the output images are written to.
    pub output_dir: PathBuf,
    pub rim_offset: f32,
    pub light_direction: Vec3,
    /// File name of the composited color render.
    pub color_file: String,
    /// File name of the depth visualization.
    pub depth_file: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            model_dir: PathBuf::from("obj"),
            output_dir: PathBuf::from("."),
            rim_offset: DEFAULT_RIM_OFFSET,
            light_direction: Vec3::BACK,
            color_file: "out.tga".to_string(),
            depth_file: "z.tga".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_model_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.model_dir = dir.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_rim_offset(mut self, offset: f32) -> Self {
        self.rim_offset = offset;
        self
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.width, self.height)
    }

    pub fn light(&self) -> DirectionalLight {
        DirectionalLight::new(self.light_direction)
    }

    pub fn color_path(&self) -> PathBuf {
        self.output_dir.join(&self.color_file)
    }

    pub fn depth_path(&self) -> PathBuf {
        self.output_dir.join(&self.depth_file)
    }
}
