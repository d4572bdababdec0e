//! Rasterization into frame buffers.

pub mod framebuffer;
pub mod rasterizer;

pub use crate::triangle::Triangle;
pub use framebuffer::FrameBuffer;
pub use rasterizer::{BarycentricRasterizer, FlatShader, PixelShader, TextureShader};
