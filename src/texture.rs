use std::path::Path;

use image::{imageops, Rgb, RgbImage};

use crate::math::vec2::Vec2;

/// Represents a 2D diffuse texture for texture mapping.
#[derive(Clone, Debug)]
pub struct Texture {
    image: RgbImage,
}

impl Texture {
    /// Load a texture from an image file (TGA, PNG, etc.).
    ///
    /// Image files store their first row at the top while texture
    /// coordinates grow upward, so the image is flipped vertically once here.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, image::ImageError> {
        let mut image = image::open(path)?.to_rgb8();
        imageops::flip_vertical_in_place(&mut image);
        Ok(Self { image })
    }

    /// Wrap an in-memory image as-is (no flip).
    pub fn from_image(image: RgbImage) -> Self {
        Self { image }
    }

    /// A single-color texture of the given size.
    pub fn solid(width: u32, height: u32, color: Rgb<u8>) -> Self {
        Self::from_image(RgbImage::from_pixel(width, height, color))
    }

    /// Sample the texture at UV coordinates using nearest-neighbor filtering.
    ///
    /// `u * width` and `v * height` are truncated to a texel. Coordinates
    /// outside `[0, 1)` are clamped to the border texel.
    #[inline]
    pub fn sample(&self, uv: Vec2) -> Rgb<u8> {
        let (width, height) = self.image.dimensions();
        if width == 0 || height == 0 {
            return Rgb([0, 0, 0]);
        }

        let x = ((uv.x * width as f32).max(0.0) as u32).min(width - 1);
        let y = ((uv.y * height as f32).max(0.0) as u32).min(height - 1);
        *self.image.get_pixel(x, y)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn size(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}
