//! Frame buffer: a single-channel color target plus its depth buffer.
//!
//! The depth buffer holds one normalized depth per pixel, indexed through
//! [`Viewport::flatten`]. It starts at `f32::MIN` so that any real depth
//! wins, and larger values are nearer.

use image::{GrayImage, Luma};

use crate::colors;
use crate::render::Triangle;
use crate::transform::Viewport;

/// Depth value of a pixel nothing has been drawn to.
pub const EMPTY_DEPTH: f32 = f32::MIN;

/// Color and depth storage for one render pass.
///
/// Both buffers are heap-allocated from the runtime viewport size and are
/// released when the frame buffer is dropped.
pub struct FrameBuffer {
    color: GrayImage,
    depth: Vec<f32>,
    viewport: Viewport,
}

impl FrameBuffer {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            color: GrayImage::from_pixel(viewport.width(), viewport.height(), colors::BACKGROUND),
            depth: vec![EMPTY_DEPTH; viewport.pixel_count()],
            viewport,
        }
    }

    pub fn width(&self) -> u32 {
        self.viewport.width()
    }

    pub fn height(&self) -> u32 {
        self.viewport.height()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Set a pixel at (x, y) with depth testing.
    ///
    /// The pixel is only written if `depth` is strictly greater than the
    /// stored depth (nearer). Out-of-bounds coordinates are ignored.
    /// Returns whether the pixel was written.
    #[inline]
    pub fn set_pixel_with_depth(&mut self, x: i32, y: i32, depth: f32, color: Luma<u8>) -> bool {
        if !self.viewport.contains(x, y) {
            return false;
        }
        let idx = self.viewport.flatten(x as u32, y as u32);
        if depth > self.depth[idx] {
            self.depth[idx] = depth;
            self.color.put_pixel(x as u32, y as u32, color);
            true
        } else {
            false
        }
    }

    /// Set a pixel without depth testing (for overlays such as wireframes).
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Luma<u8>) {
        if self.viewport.contains(x, y) {
            self.color.put_pixel(x as u32, y as u32, color);
        }
    }

    /// Get the color at (x, y), or None if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Luma<u8>> {
        if self.viewport.contains(x, y) {
            Some(*self.color.get_pixel(x as u32, y as u32))
        } else {
            None
        }
    }

    /// Stored depth at (x, y), or None if out of bounds.
    #[inline]
    pub fn depth_at(&self, x: i32, y: i32) -> Option<f32> {
        if self.viewport.contains(x, y) {
            Some(self.depth[self.viewport.flatten(x as u32, y as u32)])
        } else {
            None
        }
    }

    pub fn color(&self) -> &GrayImage {
        &self.color
    }

    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Draws a line between two pixels using Bresenham's algorithm.
    ///
    /// The segment is first clipped to the buffer, then for each step along
    /// the major axis an error term decides whether to also step along the
    /// minor axis.
    pub fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Luma<u8>) {
        let Some(((mut x, mut y), (x1, y1))) = clip_segment(from, to, self.viewport) else {
            return;
        };

        let dx = (x1 - x).abs();
        let dy = (y1 - y).abs();
        let x_step = if x < x1 { 1 } else { -1 };
        let y_step = if y < y1 { 1 } else { -1 };
        let mut err = dx - dy;

        loop {
            self.set_pixel(x, y, color);
            if x == x1 && y == y1 {
                break;
            }

            let e2 = 2 * err;
            if e2 > -dy {
                err -= dy;
                x += x_step;
            }
            if e2 < dx {
                err += dx;
                y += y_step;
            }
        }
    }

    /// Outline a triangle with three lines, ignoring depth.
    pub fn draw_triangle_wireframe(&mut self, triangle: &Triangle, color: Luma<u8>) {
        let [p0, p1, p2] = triangle.points.map(|p| (p.x as i32, p.y as i32));
        self.draw_line(p0, p1, color);
        self.draw_line(p1, p2, color);
        self.draw_line(p2, p0, color);
    }
}

/// Liang-Barsky clip of a segment to the viewport's pixel rectangle.
///
/// Returns the clipped endpoints rounded to pixels, or `None` when no part
/// of the segment is inside.
fn clip_segment(
    from: (i32, i32),
    to: (i32, i32),
    viewport: Viewport,
) -> Option<((i32, i32), (i32, i32))> {
    if viewport.pixel_count() == 0 {
        return None;
    }
    let (x0, y0) = (from.0 as f64, from.1 as f64);
    let (dx, dy) = (to.0 as f64 - x0, to.1 as f64 - y0);
    let max_x = (viewport.width() - 1) as f64;
    let max_y = (viewport.height() - 1) as f64;

    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [(-dx, x0), (dx, max_x - x0), (-dy, y0), (dy, max_y - y0)] {
        if p == 0.0 {
            // Parallel to this edge: entirely outside or never crossing it
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| {
        (
            (x0 + t * dx).round().clamp(0.0, max_x) as i32,
            (y0 + t * dy).round().clamp(0.0, max_y) as i32,
        )
    };
    Some((at(t0), at(t1)))
}
