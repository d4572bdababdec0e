//! Core rendering engine.
//!
//! The [`Engine`] renders a [`Model`] twice: a **base** pass with the model
//! as loaded and a **rim** pass with every vertex shifted along -x. Each pass
//! owns its frame buffer and depth buffer, so the two run in parallel on a
//! shared, read-only model. The passes are then composited:
//!
//! - color: `(2 * base, 0, 2 * rim)` per pixel, wrapping at 256
//! - depth: the base pass depth buffer as a gray ramp
//!
//! Both images are flipped vertically when written, since image space has
//! its origin at the bottom left and image files at the top left.

use std::fmt;
use std::path::{Path, PathBuf};

use image::{imageops, Rgb, RgbImage};
use log::{debug, info, warn};

use crate::colors;
use crate::config::RenderConfig;
use crate::light::DirectionalLight;
use crate::math::vec3::Vec3;
use crate::model::Model;
use crate::render::{BarycentricRasterizer, FrameBuffer, TextureShader, Triangle};
use crate::transform::Viewport;

/// Errors raised while writing the rendered images.
#[derive(Debug)]
pub enum OutputError {
    Write {
        path: PathBuf,
        source: image::ImageError,
    },
}

impl fmt::Display for OutputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputError::Write { path, source } => {
                write!(f, "cannot write {}: {}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Write { source, .. } => Some(source),
        }
    }
}

/// The two geometry variants rendered per face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    /// The model as loaded.
    Base,
    /// The model shifted along -x by the rim offset.
    Rim,
}

impl Pass {
    /// Offset subtracted from every vertex x in this pass.
    pub fn offset(self, rim_offset: f32) -> f32 {
        match self {
            Pass::Base => 0.0,
            Pass::Rim => rim_offset,
        }
    }
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Base => write!(f, "base"),
            Pass::Rim => write!(f, "rim"),
        }
    }
}

/// Shift a face's corners along -x by `offset`.
pub fn rim_variant(corners: [Vec3; 3], offset: f32) -> [Vec3; 3] {
    corners.map(|v| Vec3::new(v.x - offset, v.y, v.z))
}

/// Face counters for one pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Faces handed to the rasterizer.
    pub drawn: usize,
    /// Faces facing away from (or edge-on to) the light.
    pub unlit: usize,
    /// Faces with an index outside the mesh.
    pub skipped: usize,
    /// Pixels that passed the depth test.
    pub fragments: usize,
}

/// The composited images of a render, in image space (origin bottom left).
pub struct RenderOutput {
    pub color: RgbImage,
    pub depth: RgbImage,
    pub base: PassStats,
    pub rim: PassStats,
}

impl RenderOutput {
    /// Flip both images vertically and write them to the configured paths.
    pub fn save(&self, config: &RenderConfig) -> Result<(), OutputError> {
        write_flipped(&self.color, &config.color_path())?;
        write_flipped(&self.depth, &config.depth_path())?;
        Ok(())
    }
}

fn write_flipped(image: &RgbImage, path: &Path) -> Result<(), OutputError> {
    imageops::flip_vertical(image)
        .save(path)
        .map_err(|source| OutputError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    info!("wrote {}", path.display());
    Ok(())
}

pub struct Engine {
    config: RenderConfig,
    viewport: Viewport,
    light: DirectionalLight,
    rasterizer: BarycentricRasterizer,
}

impl Engine {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            viewport: config.viewport(),
            light: config.light(),
            rasterizer: BarycentricRasterizer::new(),
            config,
        }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Render both passes and composite them.
    pub fn render(&self, model: &Model) -> RenderOutput {
        let ((base_fb, base), (rim_fb, rim)) = rayon::join(
            || self.render_pass(model, Pass::Base),
            || self.render_pass(model, Pass::Rim),
        );
        let (color, depth) = self.composite(&base_fb, &rim_fb);
        info!(
            "rendered {} faces of {} ({} base, {} rim)",
            model.face_count(),
            model.name(),
            base.drawn,
            rim.drawn
        );
        RenderOutput {
            color,
            depth,
            base,
            rim,
        }
    }

    /// Rasterize every lit face of `model` for one pass into a fresh
    /// frame buffer.
    pub fn render_pass(&self, model: &Model, pass: Pass) -> (FrameBuffer, PassStats) {
        let mut buffer = FrameBuffer::new(self.viewport);
        let mut stats = PassStats::default();
        let offset = pass.offset(self.config.rim_offset);

        for (index, face) in model.mesh().faces().iter().enumerate() {
            let Some((corners, uvs)) = model.mesh().face_corners(face) else {
                warn!("{pass} pass: face {index} has an index out of range, skipping");
                stats.skipped += 1;
                continue;
            };

            let world = rim_variant(corners, offset);
            let intensity = self.light.intensity(DirectionalLight::face_normal(world));
            if intensity <= 0.0 {
                stats.unlit += 1;
                continue;
            }

            let triangle = Triangle::new(world.map(|v| self.viewport.to_image_3d(v)), uvs);
            let tint = colors::scale(colors::WHITE, intensity);
            let shader = TextureShader::for_triangle(model.texture(), &triangle, tint);
            stats.fragments += self.rasterizer.fill_triangle(&triangle, &mut buffer, &shader);
            stats.drawn += 1;
        }

        debug!("{pass} pass: {stats:?}");
        (buffer, stats)
    }

    /// Merge the two pass buffers into the color composite and the depth
    /// visualization.
    pub fn composite(&self, base: &FrameBuffer, rim: &FrameBuffer) -> (RgbImage, RgbImage) {
        let (width, height) = (self.viewport.width(), self.viewport.height());
        let mut color = RgbImage::new(width, height);
        let mut depth = RgbImage::new(width, height);

        for x in 0..width {
            for y in 0..height {
                let z = base.depth()[self.viewport.flatten(x, y)];
                depth.put_pixel(x, y, colors::depth_gray(z));

                let base_value = base.color().get_pixel(x, y)[0];
                let rim_value = rim.color().get_pixel(x, y)[0];
                color.put_pixel(
                    x,
                    y,
                    Rgb([colors::boost(base_value), 0, colors::boost(rim_value)]),
                );
            }
        }

        (color, depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::vec2::Vec2;
    use crate::mesh::Mesh;
    use crate::texture::Texture;
    use crate::triangle::Face;
    use image::Luma;

    fn engine() -> Engine {
        Engine::new(RenderConfig::default().with_size(64, 64))
    }

    fn model(source: &str) -> Model {
        let mesh = Mesh::parse(source).unwrap();
        Model::new("test", mesh, Texture::solid(4, 4, colors::WHITE))
    }

    const FACING: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 2/2/2 3/3/3
";

    const AWAY: &str = "\
v 0 0 0
v 1 0 0
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 3/3/3 2/2/2
";

    #[test]
    fn test_rim_variant_shifts_x_exactly() {
        let corners = [
            Vec3::new(0.3, 0.1, -0.2),
            Vec3::new(-0.7, 0.9, 0.4),
            Vec3::new(0.123, -0.5, 0.0),
        ];
        let rim = rim_variant(corners, 0.1);
        for (base, shifted) in corners.iter().zip(rim.iter()) {
            assert_eq!(shifted.x, base.x - 0.1);
            assert_eq!(shifted.y, base.y);
            assert_eq!(shifted.z, base.z);
        }
        assert_eq!(rim_variant(corners, Pass::Base.offset(0.1)), corners);
    }

    #[test]
    fn test_lit_triangle_has_uniform_intensity() {
        let engine = engine();
        let model = model(FACING);
        let (fb, stats) = engine.render_pass(&model, Pass::Base);

        let corners = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)];
        let intensity = engine.light.intensity(DirectionalLight::face_normal(corners));
        let expected = (255.0 * intensity) as u8;
        assert_eq!(expected, 255);

        assert_eq!(stats.drawn, 1);
        assert!(stats.fragments > 0);
        // Screen triangle is (32,32) (64,32) (32,64), clamped at 63
        let viewport = engine.viewport();
        for x in 0..viewport.width() as i32 {
            for y in 0..viewport.height() as i32 {
                let inside = inside_facing(x, y);
                let value = fb.get_pixel(x, y).unwrap();
                if inside {
                    assert_eq!(value, Luma([expected]), "({x}, {y})");
                    assert_eq!(fb.depth_at(x, y), Some(0.5));
                } else {
                    assert_eq!(value, colors::BACKGROUND, "({x}, {y})");
                }
            }
        }
    }

    // Same screen footprint as FACING, tilted so that 0 < intensity < 1
    const TILTED: &str = "\
v 0 0 0
v 1 0 0.5
v 0 1 0
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 2/2/2 3/3/3
";

    fn inside_facing(x: i32, y: i32) -> bool {
        x >= 32 && y >= 32 && x + y <= 96
    }

    #[test]
    fn test_tilted_triangle_is_dimmed_by_intensity() {
        let engine = engine();
        let (fb, stats) = engine.render_pass(&model(TILTED), Pass::Base);

        let corners = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.5), Vec3::new(0.0, 1.0, 0.0)];
        let intensity = engine.light.intensity(DirectionalLight::face_normal(corners));
        assert!(intensity > 0.0 && intensity < 1.0);
        let expected = (255.0 * intensity) as u8;
        assert_ne!(expected, 255);

        assert_eq!(stats.drawn, 1);
        for x in 0..64 {
            for y in 0..64 {
                let value = fb.get_pixel(x, y).unwrap();
                if inside_facing(x, y) {
                    assert_eq!(value, Luma([expected]), "({x}, {y})");
                } else {
                    assert_eq!(value, colors::BACKGROUND, "({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn test_texture_is_modulated_by_intensity() {
        let engine = engine();
        let mesh = Mesh::parse(TILTED).unwrap();
        // Columns differ, rows do not: u < 0.5 reads the dark texel
        let texture = Texture::from_image(RgbImage::from_fn(2, 2, |x, _| {
            if x == 0 {
                Rgb([100, 0, 0])
            } else {
                Rgb([200, 0, 0])
            }
        }));
        let model = Model::new("striped", mesh, texture);
        let (fb, _) = engine.render_pass(&model, Pass::Base);

        let corners = [Vec3::ZERO, Vec3::new(1.0, 0.0, 0.5), Vec3::new(0.0, 1.0, 0.0)];
        let intensity = engine.light.intensity(DirectionalLight::face_normal(corners));
        let tint = colors::scale(colors::WHITE, intensity);
        let dark = colors::modulate(Rgb([100, 0, 0]), tint)[0];
        let light = colors::modulate(Rgb([200, 0, 0]), tint)[0];
        assert!(dark < 100 && light < 200 && dark < light);

        // Screen u = (x - 32) / 32, so the texel switches at x = 48
        assert_eq!(fb.get_pixel(40, 40), Some(Luma([dark])));
        assert_eq!(fb.get_pixel(47, 33), Some(Luma([dark])));
        assert_eq!(fb.get_pixel(48, 33), Some(Luma([light])));
        assert_eq!(fb.get_pixel(60, 34), Some(Luma([light])));
    }

    #[test]
    fn test_back_facing_triangle_is_skipped() {
        let engine = engine();
        let (fb, stats) = engine.render_pass(&model(AWAY), Pass::Base);
        assert_eq!(stats.unlit, 1);
        assert_eq!(stats.drawn, 0);
        assert!(fb.color().pixels().all(|&p| p == colors::BACKGROUND));
    }

    #[test]
    fn test_dangling_face_is_skipped() {
        let mesh = Mesh::new(
            vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0)],
            vec![Vec2::ZERO],
            vec![Face::new([0, 1, 2], [0, 0, 5])],
        );
        let model = Model::new("dangling", mesh, Texture::solid(1, 1, colors::WHITE));
        let (_, stats) = engine().render_pass(&model, Pass::Rim);
        assert_eq!(stats.skipped, 1);
        assert_eq!(stats.fragments, 0);
    }

    #[test]
    fn test_rim_pass_is_shifted_left() {
        let engine = engine();
        let model = model(FACING);
        let (fb, _) = engine.render_pass(&model, Pass::Rim);
        // x: (-0.1 + 1) * 32 + 0.5 -> 29
        assert_eq!(fb.get_pixel(29, 32), Some(Luma([255])));
        assert_eq!(fb.get_pixel(28, 32), Some(colors::BACKGROUND));
        assert_eq!(fb.get_pixel(62, 32), Some(colors::BACKGROUND));
    }

    #[test]
    fn test_composite_channels() {
        let engine = engine();
        let output = engine.render(&model(FACING));

        // Covered by both passes; 2 * 255 wraps to 254
        assert_eq!(output.color.get_pixel(40, 40), &Rgb([254, 0, 254]));
        // Only the rim pass reaches this far left
        assert_eq!(output.color.get_pixel(30, 40), &Rgb([0, 0, 254]));
        // Background
        assert_eq!(output.color.get_pixel(5, 5), &Rgb([0, 0, 0]));

        // Depth visualization comes from the base pass only
        assert_eq!(output.depth.get_pixel(40, 40), &Rgb([127, 127, 127]));
        assert_eq!(output.depth.get_pixel(30, 40), &Rgb([0, 0, 0]));

        assert_eq!(output.base.drawn, 1);
        assert_eq!(output.rim.drawn, 1);
    }

    #[test]
    fn test_composite_wraps_doubled_channels() {
        let engine = engine();
        let viewport = engine.viewport();
        let mut base = FrameBuffer::new(viewport);
        let mut rim = FrameBuffer::new(viewport);
        base.set_pixel(1, 2, Luma([100]));
        rim.set_pixel(1, 2, Luma([200]));
        base.set_pixel(3, 4, Luma([128]));
        let (color, _) = engine.composite(&base, &rim);
        assert_eq!(color.get_pixel(1, 2), &Rgb([200, 0, 144]));
        assert_eq!(color.get_pixel(3, 4), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_pass_offsets() {
        assert_eq!(Pass::Base.offset(0.1), 0.0);
        assert_eq!(Pass::Rim.offset(0.1), 0.1);
        assert_eq!(Pass::Rim.to_string(), "rim");
    }
}
