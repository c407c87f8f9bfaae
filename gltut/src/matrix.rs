//! 4×4 homogeneous matrices.
//!
//! A [`Matrix`] is a plain value: copying it copies its 16 components, and no two matrices ever
//! share storage. The default value is the identity.
//!
//! Matrices are stored row-major and are meant to be used with row vectors (`p' = p × M`), which
//! puts the translation part of an affine transform in row 3. See the [crate documentation] for
//! the consequences on composition order.
//!
//! [crate documentation]: crate

use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use std::{
  error, fmt,
  ops::{Mul, MulAssign},
};

/// Errors that can happen while manipulating a [`Matrix`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum MatrixError {
  /// A row or a column index was outside of `[0, 3]`.
  OutOfBounds {
    /// Row index that was asked.
    row: usize,
    /// Column index that was asked.
    col: usize,
  },
  /// The matrix has no inverse.
  ///
  /// The determinant is either not finite or negligible compared to the magnitude of the rows.
  Singular,
}

impl fmt::Display for MatrixError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      MatrixError::OutOfBounds { row, col } => {
        write!(f, "matrix element ({}, {}) is out of bounds", row, col)
      }

      MatrixError::Singular => f.write_str("singular matrix cannot be inverted"),
    }
  }
}

impl error::Error for MatrixError {}

/// A 4×4 row-major matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Matrix([[f32; 4]; 4]);

impl Matrix {
  /// The identity matrix.
  pub const IDENTITY: Self = Matrix([
    [1., 0., 0., 0.],
    [0., 1., 0., 0.],
    [0., 0., 1., 0.],
    [0., 0., 0., 1.],
  ]);

  /// Create the identity matrix.
  pub const fn identity() -> Self {
    Self::IDENTITY
  }

  /// Create a matrix from its rows.
  pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
    Matrix(rows)
  }

  /// Get the rows of the matrix.
  pub const fn rows(&self) -> &[[f32; 4]; 4] {
    &self.0
  }

  /// Read the element at `(row, col)`.
  pub fn get(&self, row: usize, col: usize) -> Result<f32, MatrixError> {
    self
      .0
      .get(row)
      .and_then(|r| r.get(col))
      .copied()
      .ok_or(MatrixError::OutOfBounds { row, col })
  }

  /// Write the element at `(row, col)`.
  pub fn set(&mut self, row: usize, col: usize, value: f32) -> Result<(), MatrixError> {
    let slot = self
      .0
      .get_mut(row)
      .and_then(|r| r.get_mut(col))
      .ok_or(MatrixError::OutOfBounds { row, col })?;
    *slot = value;
    Ok(())
  }

  /// Matrix product `self × rhs`.
  ///
  /// The product is not commutative. With row vectors, `a.multiply(&b)` applies `a` _first_, then
  /// `b`.
  pub fn multiply(&self, rhs: &Matrix) -> Matrix {
    let mut out = [[0.; 4]; 4];

    for (i, row) in out.iter_mut().enumerate() {
      for (j, cell) in row.iter_mut().enumerate() {
        *cell = (0..4).map(|k| self.0[i][k] * rhs.0[k][j]).sum();
      }
    }

    Matrix(out)
  }

  /// Swap rows and columns.
  pub fn transpose(&self) -> Matrix {
    let mut out = [[0.; 4]; 4];

    for (i, row) in self.0.iter().enumerate() {
      for (j, &x) in row.iter().enumerate() {
        out[j][i] = x;
      }
    }

    Matrix(out)
  }

  /// Determinant, computed by Gaussian elimination with partial pivoting.
  pub fn determinant(&self) -> f32 {
    let mut a = self.0;
    let mut det = 1.;

    for col in 0..4 {
      let pivot = pivot_row(&a, col);

      if a[pivot][col] == 0. {
        return 0.;
      }

      if pivot != col {
        a.swap(pivot, col);
        det = -det;
      }

      let p = a[col][col];
      let pivot_values = a[col];
      det *= p;

      for row in a.iter_mut().skip(col + 1) {
        let factor = row[col] / p;

        for k in col..4 {
          row[k] -= factor * pivot_values[k];
        }
      }
    }

    det
  }

  /// General inverse, computed by Gauss-Jordan elimination.
  ///
  /// Fails with [`MatrixError::Singular`] if the matrix is not invertible.
  pub fn inverse(&self) -> Result<Matrix, MatrixError> {
    if self.is_singular() {
      return Err(MatrixError::Singular);
    }

    let mut a = self.0;
    let mut inv = Self::IDENTITY.0;

    for col in 0..4 {
      let pivot = pivot_row(&a, col);

      if a[pivot][col] == 0. {
        return Err(MatrixError::Singular);
      }

      a.swap(pivot, col);
      inv.swap(pivot, col);

      let scale = 1. / a[col][col];
      for k in 0..4 {
        a[col][k] *= scale;
        inv[col][k] *= scale;
      }

      let pivot_values = a[col];
      let pivot_inv = inv[col];

      for row in 0..4 {
        let factor = a[row][col];

        if row == col || factor == 0. {
          continue;
        }

        for k in 0..4 {
          a[row][k] -= factor * pivot_values[k];
          inv[row][k] -= factor * pivot_inv[k];
        }
      }
    }

    let inverse = Matrix(inv);

    if inverse.0.iter().flatten().all(|x| x.is_finite()) {
      Ok(inverse)
    } else {
      Err(MatrixError::Singular)
    }
  }

  // Hadamard’s inequality bounds |det| by the product of the row norms; once every row is scaled
  // to unit length, a negligible determinant means the rows are (numerically) linearly dependent.
  fn is_singular(&self) -> bool {
    let mut unit = self.0;

    for row in &mut unit {
      let norm = row.iter().fold(0., |acc: f32, x| acc.hypot(*x));

      if norm == 0. || !norm.is_finite() {
        return true;
      }

      for x in row.iter_mut() {
        *x /= norm;
      }
    }

    let det = Matrix(unit).determinant();
    !det.is_finite() || det.abs() <= f32::EPSILON
  }

  /// Flatten the matrix, row after row.
  ///
  /// This is the layout expected by the uniform upload of a 4×4 matrix.
  pub fn to_flat(&self) -> [f32; 16] {
    let mut flat = [0.; 16];

    for (dst, &src) in flat.iter_mut().zip(self.0.iter().flatten()) {
      *dst = src;
    }

    flat
  }
}

// Index of the row, starting at `col`, holding the biggest magnitude in column `col`.
fn pivot_row(a: &[[f32; 4]; 4], col: usize) -> usize {
  let mut pivot = col;

  for row in col + 1..4 {
    if a[row][col].abs() > a[pivot][col].abs() {
      pivot = row;
    }
  }

  pivot
}

impl Default for Matrix {
  fn default() -> Self {
    Self::IDENTITY
  }
}

impl From<[[f32; 4]; 4]> for Matrix {
  fn from(rows: [[f32; 4]; 4]) -> Self {
    Matrix(rows)
  }
}

impl From<Matrix> for [[f32; 4]; 4] {
  fn from(Matrix(rows): Matrix) -> Self {
    rows
  }
}

impl From<Matrix> for [f32; 16] {
  fn from(m: Matrix) -> Self {
    m.to_flat()
  }
}

impl AsRef<[[f32; 4]; 4]> for Matrix {
  fn as_ref(&self) -> &[[f32; 4]; 4] {
    &self.0
  }
}

impl Mul for Matrix {
  type Output = Matrix;

  fn mul(self, rhs: Matrix) -> Self::Output {
    self.multiply(&rhs)
  }
}

impl<'a> Mul<&'a Matrix> for &'a Matrix {
  type Output = Matrix;

  fn mul(self, rhs: &'a Matrix) -> Self::Output {
    self.multiply(rhs)
  }
}

impl MulAssign for Matrix {
  fn mul_assign(&mut self, rhs: Matrix) {
    *self = self.multiply(&rhs);
  }
}

impl fmt::Display for Matrix {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    for (i, row) in self.0.iter().enumerate() {
      if i != 0 {
        f.write_str("\n")?;
      }

      write!(
        f,
        "[{:>10.4} {:>10.4} {:>10.4} {:>10.4}]",
        row[0], row[1], row[2], row[3]
      )?;
    }

    Ok(())
  }
}

impl AbsDiffEq for Matrix {
  type Epsilon = f32;

  fn default_epsilon() -> Self::Epsilon {
    <f32 as AbsDiffEq>::default_epsilon()
  }

  fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
    self
      .0
      .iter()
      .flatten()
      .zip(other.0.iter().flatten())
      .all(|(a, b)| a.abs_diff_eq(b, epsilon))
  }
}

impl RelativeEq for Matrix {
  fn default_max_relative() -> Self::Epsilon {
    <f32 as RelativeEq>::default_max_relative()
  }

  fn relative_eq(
    &self,
    other: &Self,
    epsilon: Self::Epsilon,
    max_relative: Self::Epsilon,
  ) -> bool {
    self
      .0
      .iter()
      .flatten()
      .zip(other.0.iter().flatten())
      .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
  }
}

impl UlpsEq for Matrix {
  fn default_max_ulps() -> u32 {
    <f32 as UlpsEq>::default_max_ulps()
  }

  fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
    self
      .0
      .iter()
      .flatten()
      .zip(other.0.iter().flatten())
      .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
  }
}
