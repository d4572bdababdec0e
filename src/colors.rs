//! Color helpers over the `image` crate's pixel types.

use image::{Luma, Rgb};

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Framebuffer clear value.
pub const BACKGROUND: Luma<u8> = Luma([0]);

/// Scale every channel by `intensity`, truncating toward zero.
///
/// `intensity` is clamped to `[0, 1]`.
#[inline]
pub fn scale(color: Rgb<u8>, intensity: f32) -> Rgb<u8> {
    let intensity = intensity.clamp(0.0, 1.0);
    let Rgb([r, g, b]) = color;
    Rgb([
        (r as f32 * intensity) as u8,
        (g as f32 * intensity) as u8,
        (b as f32 * intensity) as u8,
    ])
}

/// Component-wise product of two colors, normalized by the max channel
/// value so that white is the identity.
#[inline]
pub fn modulate(base: Rgb<u8>, tint: Rgb<u8>) -> Rgb<u8> {
    let Rgb([br, bg, bb]) = base;
    let Rgb([tr, tg, tb]) = tint;
    let mul = |b: u8, t: u8| ((b as u16 * t as u16) / 255) as u8;
    Rgb([mul(br, tr), mul(bg, tg), mul(bb, tb)])
}

/// Doubles a channel value modulo 256, the way an 8-bit channel narrows.
#[inline]
pub fn boost(value: u8) -> u8 {
    value.wrapping_mul(2)
}

/// Gray level of a normalized depth in `[0, 1]`; anything outside
/// (including the empty depth-buffer sentinel) is clamped.
#[inline]
pub fn depth_gray(depth: f32) -> Rgb<u8> {
    scale(WHITE, depth)
}
