//! Transform constructors.
//!
//! Every constructor here builds a matrix for the row-vector convention used by [`Matrix`]:
//! translations live in row 3, and rotation matrices are the transpose of the ones you will find
//! in column-vector literature. Angles are in degrees.
//!
//! Axis rotations follow the right-hand rule: with `θ = 90°`, [`Matrix::rotation_x`] sends `+Y`
//! onto `+Z`, [`Matrix::rotation_y`] sends `+Z` onto `+X` and [`Matrix::rotation_z`] sends `+X`
//! onto `+Y`.

use crate::matrix::Matrix;
use crate::vector::{Vector, VectorError};

impl Matrix {
  /// Rotation around the X axis.
  pub fn rotation_x(angle_deg: f32) -> Self {
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    Matrix::from_rows([
      [1., 0., 0., 0.],
      [0., cos, sin, 0.],
      [0., -sin, cos, 0.],
      [0., 0., 0., 1.],
    ])
  }

  /// Rotation around the Y axis.
  pub fn rotation_y(angle_deg: f32) -> Self {
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    Matrix::from_rows([
      [cos, 0., -sin, 0.],
      [0., 1., 0., 0.],
      [sin, 0., cos, 0.],
      [0., 0., 0., 1.],
    ])
  }

  /// Rotation around the Z axis.
  pub fn rotation_z(angle_deg: f32) -> Self {
    let (sin, cos) = angle_deg.to_radians().sin_cos();

    Matrix::from_rows([
      [cos, sin, 0., 0.],
      [-sin, cos, 0., 0.],
      [0., 0., 1., 0.],
      [0., 0., 0., 1.],
    ])
  }

  /// Rotation around an arbitrary axis.
  ///
  /// The axis doesn’t have to be normalized, but it must not be the null vector.
  pub fn rotation(axis: Vector, angle_deg: f32) -> Result<Self, VectorError> {
    let axis = axis.normal()?;
    let (x, y, z) = (axis.x(), axis.y(), axis.z());
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let inv_cos = 1. - cos;

    Ok(Matrix::from_rows([
      [
        x * x + (1. - x * x) * cos,
        x * y * inv_cos + z * sin,
        x * z * inv_cos - y * sin,
        0.,
      ],
      [
        x * y * inv_cos - z * sin,
        y * y + (1. - y * y) * cos,
        y * z * inv_cos + x * sin,
        0.,
      ],
      [
        x * z * inv_cos + y * sin,
        y * z * inv_cos - x * sin,
        z * z + (1. - z * z) * cos,
        0.,
      ],
      [0., 0., 0., 1.],
    ]))
  }

  /// Axis-aligned scale.
  pub fn scaling(factors: impl Into<[f32; 3]>) -> Self {
    let [x, y, z] = factors.into();

    Matrix::from_rows([
      [x, 0., 0., 0.],
      [0., y, 0., 0.],
      [0., 0., z, 0.],
      [0., 0., 0., 1.],
    ])
  }

  /// Translation by an offset.
  pub fn translation(offset: impl Into<[f32; 3]>) -> Self {
    let [x, y, z] = offset.into();

    Matrix::from_rows([
      [1., 0., 0., 0.],
      [0., 1., 0., 0.],
      [0., 0., 1., 0.],
      [x, y, z, 1.],
    ])
  }

  /// Symmetric perspective projection.
  ///
  /// `fovy_deg` is the full vertical field of view and `aspect` is the width / height ratio of the
  /// viewport. Camera space is right-handed and looks down `-Z`; `z_near` and `z_far` are positive
  /// distances mapped to `-1` and `1` after the perspective divide.
  pub fn perspective(fovy_deg: f32, aspect: f32, z_near: f32, z_far: f32) -> Self {
    let range = (fovy_deg.to_radians() / 2.).tan() * z_near;
    let (left, right) = (-range * aspect, range * aspect);
    let (bottom, top) = (-range, range);

    Matrix::from_rows([
      [(2. * z_near) / (right - left), 0., 0., 0.],
      [0., (2. * z_near) / (top - bottom), 0., 0.],
      [0., 0., -(z_far + z_near) / (z_far - z_near), -1.],
      [0., 0., -(2. * z_far * z_near) / (z_far - z_near), 0.],
    ])
  }

  /// Orthographic projection of the box `[left, right] × [bottom, top] × [-z_near, -z_far]`.
  pub fn orthographic(
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    z_near: f32,
    z_far: f32,
  ) -> Self {
    Matrix::from_rows([
      [2. / (right - left), 0., 0., 0.],
      [0., 2. / (top - bottom), 0., 0.],
      [0., 0., -2. / (z_far - z_near), 0.],
      [
        -(right + left) / (right - left),
        -(top + bottom) / (top - bottom),
        -(z_far + z_near) / (z_far - z_near),
        1.,
      ],
    ])
  }
}
