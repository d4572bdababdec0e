//! Small fixed-size vector and matrix types.

pub mod matrix;
pub mod vec2;
pub mod vec3;

use vec2::Vec2;
use vec3::Vec3;

/// Barycentric weights of `p` relative to the triangle `(a, b, c)`, using
/// only the x/y components.
///
/// The weights are `[wa, wb, wc]` with `wa + wb + wc == 1` and
/// `p == a * wa + b * wb + c * wc`. A point lies inside the triangle
/// (edges included) iff every weight is non-negative.
///
/// Returns `None` for degenerate (zero-area) triangles.
pub fn barycentric(a: Vec3, b: Vec3, c: Vec3, p: Vec2) -> Option<[f32; 3]> {
    let ab = b - a;
    let ac = c - a;
    // Twice the signed area of the triangle
    let area = ab.x * ac.y - ac.x * ab.y;
    if area.abs() < f32::EPSILON {
        return None;
    }

    let ap = p - a.xy();
    let wb = (ap.x * ac.y - ac.x * ap.y) / area;
    let wc = (ab.x * ap.y - ap.x * ab.y) / area;
    Some([1.0 - wb - wc, wb, wc])
}
