//! Bounding-box triangle rasterization with barycentric coverage.
//!
//! # Algorithm Overview
//!
//! 1. Compute the triangle's bounding box, clamped to the frame buffer
//! 2. For each integer pixel in the box, compute its barycentric weights
//! 3. Skip the pixel if any weight is negative (outside the triangle)
//! 4. Interpolate depth with the weights and run the depth test
//! 5. Ask the shader for the color of pixels that pass
//!
//! Pixels are sampled at their integer coordinates, which is where the
//! viewport puts rounded vertices, so shared edges are covered exactly.
//!
//! # References
//!
//! - Juan Pineda, "A Parallel Algorithm for Polygon Rasterization" (1988)
//! - Scratchapixel: <https://www.scratchapixel.com/lessons/3d-basic-rendering/rasterization-practical-implementation>

use image::Luma;

use super::shader::PixelShader;
use crate::math::barycentric;
use crate::math::vec2::Vec2;
use crate::render::framebuffer::FrameBuffer;
use crate::render::Triangle;

/// Triangle rasterizer iterating every pixel of the triangle's bounding box.
///
/// Degenerate triangles and triangles entirely outside the buffer produce
/// no fragments.
#[derive(Clone, Copy, Debug, Default)]
pub struct BarycentricRasterizer;

impl BarycentricRasterizer {
    pub fn new() -> Self {
        BarycentricRasterizer
    }

    /// Fill `triangle` into `buffer`, coloring covered pixels with `shader`.
    ///
    /// The shaded color is stored as its red channel since the frame buffer
    /// has a single channel. Returns the number of pixels that passed the
    /// depth test.
    pub fn fill_triangle<S: PixelShader>(
        &self,
        triangle: &Triangle,
        buffer: &mut FrameBuffer,
        shader: &S,
    ) -> usize {
        let [v0, v1, v2] = triangle.points;

        // ─────────────────────────────────────────────────────────────────────
        // Step 1: Bounding box, clamped to the buffer
        // ─────────────────────────────────────────────────────────────────────
        let max_x = (buffer.width() as i32 - 1) as f32;
        let max_y = (buffer.height() as i32 - 1) as f32;
        let min_x = v0.x.min(v1.x).min(v2.x).max(0.0).ceil() as i32;
        let min_y = v0.y.min(v1.y).min(v2.y).max(0.0).ceil() as i32;
        let max_x = v0.x.max(v1.x).max(v2.x).min(max_x).floor() as i32;
        let max_y = v0.y.max(v1.y).max(v2.y).min(max_y).floor() as i32;

        // Zero area: no pixel can be covered
        if barycentric(v0, v1, v2, v0.xy()).is_none() {
            return 0;
        }

        // ─────────────────────────────────────────────────────────────────────
        // Step 2: Coverage, depth test, shading
        // ─────────────────────────────────────────────────────────────────────
        let mut written = 0;
        for x in min_x..=max_x {
            for y in min_y..=max_y {
                let p = Vec2::new(x as f32, y as f32);
                let Some(lambda) = barycentric(v0, v1, v2, p) else {
                    continue;
                };
                if lambda.iter().any(|&l| l < 0.0) {
                    continue;
                }

                let depth = triangle.depth_at(lambda);
                let Some(stored) = buffer.depth_at(x, y) else {
                    continue;
                };
                if depth > stored {
                    let color = shader.shade(lambda);
                    buffer.set_pixel_with_depth(x, y, depth, Luma([color[0]]));
                    written += 1;
                }
            }
        }
        written
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors;
    use crate::math::vec3::Vec3;
    use crate::render::rasterizer::shader::FlatShader;
    use crate::transform::Viewport;
    use image::Rgb;

    const RED: Rgb<u8> = Rgb([200, 0, 0]);
    const DIM: Rgb<u8> = Rgb([50, 0, 0]);

    fn buffer() -> FrameBuffer {
        FrameBuffer::new(Viewport::new(32, 32))
    }

    fn flat(depth: f32) -> Triangle {
        Triangle::untextured([
            Vec3::new(2.0, 2.0, depth),
            Vec3::new(20.0, 2.0, depth),
            Vec3::new(2.0, 20.0, depth),
        ])
    }

    fn covered(fb: &FrameBuffer) -> usize {
        fb.color().pixels().filter(|&&p| p != colors::BACKGROUND).count()
    }

    #[test]
    fn test_fills_inside_only() {
        let mut fb = buffer();
        let written =
            BarycentricRasterizer::new().fill_triangle(&flat(0.5), &mut fb, &FlatShader::new(RED));

        assert!(written > 0);
        assert_eq!(written, covered(&fb));
        // Corners and an interior point
        assert_eq!(fb.get_pixel(2, 2), Some(Luma([200])));
        assert_eq!(fb.get_pixel(20, 2), Some(Luma([200])));
        assert_eq!(fb.get_pixel(2, 20), Some(Luma([200])));
        assert_eq!(fb.get_pixel(6, 6), Some(Luma([200])));
        // Beyond the hypotenuse and outside the box
        assert_eq!(fb.get_pixel(15, 15), Some(colors::BACKGROUND));
        assert_eq!(fb.get_pixel(1, 1), Some(colors::BACKGROUND));
        assert_eq!(fb.depth_at(6, 6), Some(0.5));
    }

    #[test]
    fn test_interpolates_depth() {
        let mut fb = buffer();
        let triangle = Triangle::untextured([
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(30.0, 0.0, 1.0),
            Vec3::new(0.0, 30.0, 0.0),
        ]);
        BarycentricRasterizer::new().fill_triangle(&triangle, &mut fb, &FlatShader::new(RED));
        let depth = fb.depth_at(15, 0).unwrap();
        assert!((depth - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_rasterizing_twice_is_idempotent() {
        let rasterizer = BarycentricRasterizer::new();
        let shader = FlatShader::new(RED);

        let mut once = buffer();
        rasterizer.fill_triangle(&flat(0.5), &mut once, &shader);

        let mut twice = buffer();
        rasterizer.fill_triangle(&flat(0.5), &mut twice, &shader);
        let second = rasterizer.fill_triangle(&flat(0.5), &mut twice, &shader);

        assert_eq!(second, 0);
        assert_eq!(once.color(), twice.color());
        assert_eq!(once.depth(), twice.depth());
    }

    #[test]
    fn test_nearest_wins_regardless_of_order() {
        let rasterizer = BarycentricRasterizer::new();
        let near = FlatShader::new(RED);
        let far = FlatShader::new(DIM);

        let mut near_first = buffer();
        rasterizer.fill_triangle(&flat(0.8), &mut near_first, &near);
        rasterizer.fill_triangle(&flat(0.3), &mut near_first, &far);

        let mut far_first = buffer();
        rasterizer.fill_triangle(&flat(0.3), &mut far_first, &far);
        rasterizer.fill_triangle(&flat(0.8), &mut far_first, &near);

        assert_eq!(near_first.get_pixel(5, 5), Some(Luma([200])));
        assert_eq!(near_first.color(), far_first.color());
    }

    #[test]
    fn test_degenerate_triangle_is_noop() {
        let mut fb = buffer();
        let line = Triangle::untextured([
            Vec3::new(1.0, 1.0, 0.5),
            Vec3::new(10.0, 10.0, 0.5),
            Vec3::new(20.0, 20.0, 0.5),
        ]);
        let written =
            BarycentricRasterizer::new().fill_triangle(&line, &mut fb, &FlatShader::new(RED));
        assert_eq!(written, 0);
        assert_eq!(covered(&fb), 0);
    }

    #[test]
    fn test_offscreen_triangle_is_noop() {
        let mut fb = buffer();
        let triangle = Triangle::untextured([
            Vec3::new(-40.0, -40.0, 0.5),
            Vec3::new(-10.0, -40.0, 0.5),
            Vec3::new(-40.0, -10.0, 0.5),
        ]);
        let written =
            BarycentricRasterizer::new().fill_triangle(&triangle, &mut fb, &FlatShader::new(RED));
        assert_eq!(written, 0);

        let right = Triangle::untextured([
            Vec3::new(40.0, 0.0, 0.5),
            Vec3::new(60.0, 0.0, 0.5),
            Vec3::new(40.0, 20.0, 0.5),
        ]);
        assert_eq!(
            BarycentricRasterizer::new().fill_triangle(&right, &mut fb, &FlatShader::new(RED)),
            0
        );
    }

    #[test]
    fn test_partially_offscreen_is_clipped() {
        let mut fb = buffer();
        let triangle = Triangle::untextured([
            Vec3::new(-10.0, -10.0, 0.5),
            Vec3::new(60.0, -10.0, 0.5),
            Vec3::new(-10.0, 60.0, 0.5),
        ]);
        BarycentricRasterizer::new().fill_triangle(&triangle, &mut fb, &FlatShader::new(RED));
        assert_eq!(fb.get_pixel(0, 0), Some(Luma([200])));
        assert_eq!(fb.get_pixel(31, 0), Some(Luma([200])));
    }
}
