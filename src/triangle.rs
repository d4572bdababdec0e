use crate::math::vec2::Vec2;
use crate::math::vec3::Vec3;

// A triangular face of a mesh. Both arrays hold 0-based indices: `vertices`
// into the mesh's positions, `texture_coords` into its texture coordinates,
// corner for corner.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Face {
    pub vertices: [usize; 3],
    pub texture_coords: [usize; 3],
}

impl Face {
    pub const fn new(vertices: [usize; 3], texture_coords: [usize; 3]) -> Self {
        Self {
            vertices,
            texture_coords,
        }
    }
}

// A triangle ready for rasterization. The points are in image space:
// x/y in pixels, z a normalized depth where larger is nearer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    pub points: [Vec3; 3],
    pub texture_coords: [Vec2; 3],
}

impl Triangle {
    pub fn new(points: [Vec3; 3], texture_coords: [Vec2; 3]) -> Self {
        Self {
            points,
            texture_coords,
        }
    }

    /// A triangle without meaningful texture coordinates, for flat fills.
    pub fn untextured(points: [Vec3; 3]) -> Self {
        Self::new(points, [Vec2::ZERO; 3])
    }

    /// Depth at barycentric weights `lambda`.
    #[inline]
    pub fn depth_at(&self, lambda: [f32; 3]) -> f32 {
        self.points[0].z * lambda[0] + self.points[1].z * lambda[1] + self.points[2].z * lambda[2]
    }
}
