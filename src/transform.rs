//! Mapping between normalized model space and image pixels.
//!
//! Model coordinates live in `[-1, 1]` on every axis. The [`Viewport`] maps
//! x/y onto the `[0, width] x [0, height]` pixel grid (rounded to the nearest
//! pixel) and z onto a normalized depth in `[0, 1]`.
//!
//! It also owns the depth-buffer indexing scheme. Indices are column-major
//! (`x * height + y`), so a buffer is only valid for the viewport that
//! produced it.

use crate::math::{vec2::Vec2, vec3::Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    width: u32,
    height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of pixels, i.e. the length of a matching depth buffer.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Map one axis from `[-1, 1]` to `[0, size]`, rounded to the nearest
    /// pixel. The `as` cast truncates toward zero.
    #[inline]
    fn to_pixel(value: f32, size: u32) -> f32 {
        ((value + 1.0) * size as f32 / 2.0 + 0.5) as i32 as f32
    }

    #[inline]
    fn from_pixel(value: f32, size: u32) -> f32 {
        value * 2.0 / size as f32 - 1.0
    }

    /// Normalized model coordinates to pixel x/y plus normalized depth.
    pub fn to_image_3d(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            Self::to_pixel(v.x, self.width),
            Self::to_pixel(v.y, self.height),
            (v.z + 1.0) / 2.0,
        )
    }

    /// Normalized model coordinates to pixel x/y.
    pub fn to_image_2d(&self, v: Vec2) -> Vec2 {
        Vec2::new(
            Self::to_pixel(v.x, self.width),
            Self::to_pixel(v.y, self.height),
        )
    }

    /// Inverse of [`Viewport::to_image_3d`], up to pixel quantization.
    pub fn to_normalized_3d(&self, p: Vec3) -> Vec3 {
        Vec3::new(
            Self::from_pixel(p.x, self.width),
            Self::from_pixel(p.y, self.height),
            p.z * 2.0 - 1.0,
        )
    }

    /// Inverse of [`Viewport::to_image_2d`], up to pixel quantization.
    pub fn to_normalized_2d(&self, p: Vec2) -> Vec2 {
        Vec2::new(
            Self::from_pixel(p.x, self.width),
            Self::from_pixel(p.y, self.height),
        )
    }

    /// Depth-buffer slot of pixel `(x, y)`.
    #[inline]
    pub fn flatten(&self, x: u32, y: u32) -> usize {
        x as usize * self.height as usize + y as usize
    }

    /// Pixel of depth-buffer slot `index`, or `None` past the last slot.
    #[inline]
    pub fn unflatten(&self, index: usize) -> Option<(u32, u32)> {
        if index >= self.pixel_count() {
            return None;
        }
        let height = self.height as usize;
        Some(((index / height) as u32, (index % height) as u32))
    }
}
