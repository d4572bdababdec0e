//! Fixed-size matrix generic over its dimensions.
//!
//! # Convention
//! - Stored as `data[row][col]`
//! - Vectors are **column vectors** on the right: `M * v`
//! - Points become homogeneous `4x1` columns with `w = 1`
//!
//! # Example
//! ```ignore
//! let column = Matrix::from_point(vertex);   // 4x1
//! let moved = transform * column;            // 4x4 * 4x1
//! let vertex = moved.to_point();
//! ```

use std::ops::{Index, IndexMut, Mul};

use super::vec3::Vec3;

/// An `R x C` matrix of `f32`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matrix<const R: usize, const C: usize> {
    data: [[f32; C]; R],
}

/// Homogeneous 4x4 transform.
pub type Mat4 = Matrix<4, 4>;

impl<const R: usize, const C: usize> Matrix<R, C> {
    pub const fn new(data: [[f32; C]; R]) -> Self {
        Self { data }
    }

    pub const fn zeros() -> Self {
        Self::new([[0.0; C]; R])
    }

    pub const fn rows(&self) -> usize {
        R
    }

    pub const fn cols(&self) -> usize {
        C
    }

    /// Returns the `C x R` transpose.
    pub fn transpose(&self) -> Matrix<C, R> {
        let mut result = Matrix::<C, R>::zeros();
        for row in 0..R {
            for col in 0..C {
                result.data[col][row] = self.data[row][col];
            }
        }
        result
    }

    /// Access element at [row][col].
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.data[row][col]
    }

    /// Set element at [row][col].
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: f32) {
        self.data[row][col] = value;
    }
}

impl<const N: usize> Matrix<N, N> {
    pub fn identity() -> Self {
        let mut result = Self::zeros();
        for i in 0..N {
            result.data[i][i] = 1.0;
        }
        result
    }
}

impl Matrix<4, 1> {
    /// Embeds a point as a homogeneous column with `w = 1`.
    pub const fn from_point(v: Vec3) -> Self {
        Self::new([[v.x], [v.y], [v.z], [1.0]])
    }

    /// Projects a homogeneous column back to 3D by dividing through `w`.
    pub fn to_point(&self) -> Vec3 {
        let w = self.data[3][0];
        Vec3::new(
            self.data[0][0] / w,
            self.data[1][0] / w,
            self.data[2][0] / w,
        )
    }
}

impl<const R: usize, const C: usize> Default for Matrix<R, C> {
    fn default() -> Self {
        Self::zeros()
    }
}

/// Row access: `m[row][col]`.
impl<const R: usize, const C: usize> Index<usize> for Matrix<R, C> {
    type Output = [f32; C];

    fn index(&self, row: usize) -> &Self::Output {
        &self.data[row]
    }
}

impl<const R: usize, const C: usize> IndexMut<usize> for Matrix<R, C> {
    fn index_mut(&mut self, row: usize) -> &mut Self::Output {
        &mut self.data[row]
    }
}

/// Matrix product: `(R x K) * (K x C) = (R x C)`.
impl<const R: usize, const K: usize, const C: usize> Mul<Matrix<K, C>> for Matrix<R, K> {
    type Output = Matrix<R, C>;

    fn mul(self, rhs: Matrix<K, C>) -> Self::Output {
        let mut result = Matrix::<R, C>::zeros();
        for row in 0..R {
            for col in 0..C {
                result.data[row][col] = (0..K).map(|k| self.data[row][k] * rhs.data[k][col]).sum();
            }
        }
        result
    }
}
