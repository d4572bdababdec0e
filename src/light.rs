//! Lighting types for the renderer.

use crate::math::vec3::Vec3;

/// A directional light that illuminates the scene uniformly from a direction.
///
/// All rays are parallel, so a flat face receives a single intensity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DirectionalLight {
    /// The normalized light direction.
    pub direction: Vec3,
}

impl Default for DirectionalLight {
    /// Light shining along the negative depth axis.
    fn default() -> Self {
        Self::new(Vec3::BACK)
    }
}

impl DirectionalLight {
    /// Create a new directional light pointing in the given direction.
    /// The direction will be normalized automatically.
    pub fn new(direction: Vec3) -> Self {
        DirectionalLight {
            direction: direction.normalize(),
        }
    }

    /// Lambertian intensity for a face normal.
    ///
    /// Returns `normal · direction` in `[0.0, 1.0]`. Faces pointing away
    /// from the light, edge-on faces and degenerate (NaN) normals all
    /// yield `0.0`.
    pub fn intensity(&self, normal: Vec3) -> f32 {
        self.direction.dot(normal.normalize()).max(0.0)
    }

    /// Face normal of a triangle, `normalize((c - a) x (b - a))`.
    ///
    /// With this winding, a counter-clockwise triangle (seen from +z) gets
    /// a normal along -z and faces the default light.
    pub fn face_normal(corners: [Vec3; 3]) -> Vec3 {
        let [a, b, c] = corners;
        (c - a).cross(b - a).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_direct_illumination() {
        let light = DirectionalLight::default();
        let normal = Vec3::new(0.0, 0.0, -1.0);
        assert_relative_eq!(light.intensity(normal), 1.0, epsilon = 0.001);
    }

    #[test]
    fn test_no_illumination() {
        let light = DirectionalLight::default();
        assert_eq!(light.intensity(Vec3::new(0.0, 0.0, 1.0)), 0.0);
        assert_eq!(light.intensity(Vec3::new(1.0, 0.0, 0.0)), 0.0);
    }

    #[test]
    fn test_degenerate_normal_is_unlit() {
        let light = DirectionalLight::default();
        assert_eq!(light.intensity(Vec3::ZERO), 0.0);
    }

    #[test]
    fn test_angled_illumination() {
        let light = DirectionalLight::new(Vec3::new(0.0, -1.0, 0.0));
        let normal = Vec3::new(0.0, -1.0, 1.0);
        // cos(45) ≈ 0.707
        assert_relative_eq!(light.intensity(normal), 0.707, epsilon = 0.01);
    }

    #[test]
    fn test_face_normal_winding() {
        let corners = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        assert_eq!(DirectionalLight::face_normal(corners), Vec3::BACK);

        let [a, b, c] = corners;
        assert_eq!(DirectionalLight::face_normal([a, c, b]), Vec3::FORWARD);
    }
}
