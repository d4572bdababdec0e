//! Triangle rasterization.
//!
//! [`BarycentricRasterizer`] decides which pixels a triangle covers and
//! resolves visibility with the depth buffer. A [`PixelShader`] decides
//! what color those pixels get:
//! - [`TextureShader`]: diffuse texture lookup tinted by the face light
//! - [`FlatShader`]: a single color

mod barycentric;
mod shader;

pub use barycentric::BarycentricRasterizer;
pub use shader::{FlatShader, PixelShader, TextureShader};
