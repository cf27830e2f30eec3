// src/math.rs

//! Minimal 4x4 matrix support for composing the per-frame model matrix.
//!
//! Matrices are column-major: `m.0[col][row]`, so a point transforms as
//! `r[row] = sum over col of m.0[col][row] * v[col]`. This matches the
//! layout the vertex pipeline expects when the matrix is bound as a
//! uniform, and it is the layout all constructors below assume.

/// Column-major 4x4 float matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mat4(pub [[f32; 4]; 4]);

impl Mat4 {
    pub fn identity() -> Self {
        let mut m = [[0.0f32; 4]; 4];
        m[0][0] = 1.0;
        m[1][1] = 1.0;
        m[2][2] = 1.0;
        m[3][3] = 1.0;
        Mat4(m)
    }

    /// Orthographic projection spanning `[l, r] x [b, t]` with the given
    /// near/far planes.
    pub fn ortho(l: f32, r: f32, b: f32, t: f32, n: f32, f: f32) -> Self {
        let mut m = [[0.0f32; 4]; 4];
        m[0][0] = 2.0 / (r - l);
        m[1][1] = 2.0 / (t - b);
        m[2][2] = -2.0 / (f - n);
        m[3][0] = -(r + l) / (r - l);
        m[3][1] = -(t + b) / (t - b);
        m[3][2] = -(f + n) / (f - n);
        m[3][3] = 1.0;
        Mat4(m)
    }

    pub fn translation(x: f32, y: f32, z: f32) -> Self {
        let mut m = Self::identity();
        m.0[3][0] = x;
        m.0[3][1] = y;
        m.0[3][2] = z;
        m
    }

    /// Rotation about the Z axis by `angle` radians, counterclockwise
    /// positive.
    pub fn rotation_z(angle: f32) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Self::identity();
        m.0[0][0] = c;
        m.0[0][1] = s;
        m.0[1][0] = -s;
        m.0[1][1] = c;
        m
    }

    pub fn scale(sx: f32, sy: f32) -> Self {
        let mut m = Self::identity();
        m.0[0][0] = sx;
        m.0[1][1] = sy;
        m
    }

    /// Shear in the XY plane: `shx` feeds x into y, `shy` feeds y into x.
    pub fn shear_xy(shx: f32, shy: f32) -> Self {
        let mut m = Self::identity();
        m.0[0][1] = shx;
        m.0[1][0] = shy;
        m
    }

    /// Applies the matrix to a column vector.
    pub fn transform_point(&self, v: [f32; 4]) -> [f32; 4] {
        let mut out = [0.0f32; 4];
        for (col, vc) in v.iter().enumerate() {
            for row in 0..4 {
                out[row] += self.0[col][row] * vc;
            }
        }
        out
    }
}

impl std::ops::Mul for Mat4 {
    type Output = Mat4;

    fn mul(self, rhs: Mat4) -> Mat4 {
        let mut m = [[0.0f32; 4]; 4];
        #[allow(clippy::needless_range_loop)]
        for col in 0..4 {
            for row in 0..4 {
                let mut acc = 0.0;
                for k in 0..4 {
                    acc += self.0[k][row] * rhs.0[col][k];
                }
                m[col][row] = acc;
            }
        }
        Mat4(m)
    }
}
