//! Pixel shaders for triangle rasterization.
//!
//! The rasterizer handles coverage, barycentric weights and the depth test.
//! The shader turns the weights of a covered pixel into a color.

use image::Rgb;

use crate::colors;
use crate::math::vec2::Vec2;
use crate::render::Triangle;
use crate::texture::Texture;

/// Trait for per-pixel shading computations.
///
/// The `lambda` parameter contains three weights [λ₀, λ₁, λ₂] that sum to
/// 1.0 inside the triangle and can interpolate any per-vertex attribute:
/// `attr_at_pixel = λ₀*attr₀ + λ₁*attr₁ + λ₂*attr₂`
pub trait PixelShader {
    /// Compute the color for a pixel given its barycentric coordinates.
    fn shade(&self, lambda: [f32; 3]) -> Rgb<u8>;
}

/// Flat shader - returns a constant color for all pixels.
pub struct FlatShader {
    color: Rgb<u8>,
}

impl FlatShader {
    pub fn new(color: Rgb<u8>) -> Self {
        Self { color }
    }
}

impl PixelShader for FlatShader {
    #[inline]
    fn shade(&self, _lambda: [f32; 3]) -> Rgb<u8> {
        self.color
    }
}

/// Samples the diffuse texture at the interpolated UV and multiplies the
/// result by a tint (the lit face color).
pub struct TextureShader<'a> {
    texture: &'a Texture,
    uvs: [Vec2; 3],
    tint: Rgb<u8>,
}

impl<'a> TextureShader<'a> {
    pub fn new(texture: &'a Texture, uvs: [Vec2; 3], tint: Rgb<u8>) -> Self {
        Self { texture, uvs, tint }
    }

    /// Shader for `triangle`, interpolating its texture coordinates.
    pub fn for_triangle(texture: &'a Texture, triangle: &Triangle, tint: Rgb<u8>) -> Self {
        Self::new(texture, triangle.texture_coords, tint)
    }
}

impl PixelShader for TextureShader<'_> {
    #[inline]
    fn shade(&self, lambda: [f32; 3]) -> Rgb<u8> {
        let uv = Vec2::weighted(self.uvs, lambda);
        colors::modulate(self.texture.sample(uv), self.tint)
    }
}
