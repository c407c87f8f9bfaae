//! Homogeneous vectors and points.
//!
//! [`Vector`] and [`Point`] are both `[f32; 4]` underneath and convert freely from and to arrays,
//! but they don’t have the same `w` and don’t obey the same algebra. See the [crate
//! documentation] for the operations that are allowed between them.
//!
//! Both are transformed as row vectors: `v * m` and `p * m` (or [`Matrix::transform_vector`] and
//! [`Matrix::transform_point`]). A vector has `w = 0` so it is not affected by the translation row
//! of an affine transform, while a point has `w = 1` and is.
//!
//! [crate documentation]: crate

use crate::matrix::Matrix;
use approx::{AbsDiffEq, RelativeEq, UlpsEq};
use std::{
  error, fmt,
  ops::{Add, AddAssign, Deref, DerefMut, Mul, MulAssign, Neg, Sub, SubAssign},
};

/// Errors that can happen while manipulating a [`Vector`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum VectorError {
  /// The vector has a null (or non-finite) length and has no direction.
  ZeroLength,
}

impl fmt::Display for VectorError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      VectorError::ZeroLength => f.write_str("cannot normalize a zero-length vector"),
    }
  }
}

impl error::Error for VectorError {}

/// A displacement in homogeneous coordinates (`w = 0` by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Vector(pub [f32; 4]);

/// A position in homogeneous coordinates (`w = 1` by default).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point(pub [f32; 4]);

// Implementations shared by Vector and Point; `$w` is the w component given to 3D inputs.
macro_rules! homogeneous {
  ($t:ident, $w:expr) => {
    impl $t {
      /// Create a value from its x, y and z components.
      pub const fn new(x: f32, y: f32, z: f32) -> Self {
        $t([x, y, z, $w])
      }

      /// x component.
      pub fn x(&self) -> f32 {
        self.0[0]
      }

      /// y component.
      pub fn y(&self) -> f32 {
        self.0[1]
      }

      /// z component.
      pub fn z(&self) -> f32 {
        self.0[2]
      }

      /// w component.
      pub fn w(&self) -> f32 {
        self.0[3]
      }

      /// Change the x component.
      pub fn set_x(&mut self, x: f32) {
        self.0[0] = x;
      }

      /// Change the y component.
      pub fn set_y(&mut self, y: f32) {
        self.0[1] = y;
      }

      /// Change the z component.
      pub fn set_z(&mut self, z: f32) {
        self.0[2] = z;
      }

      /// Change the w component.
      pub fn set_w(&mut self, w: f32) {
        self.0[3] = w;
      }

      /// Iterate over the four components, x first.
      pub fn iter(&self) -> impl Iterator<Item = f32> + '_ {
        self.0.iter().copied()
      }

      /// The x, y and z components.
      pub fn xyz(&self) -> [f32; 3] {
        [self.0[0], self.0[1], self.0[2]]
      }
    }

    impl From<[f32; 4]> for $t {
      fn from(a: [f32; 4]) -> Self {
        $t(a)
      }
    }

    impl From<[f32; 3]> for $t {
      fn from([x, y, z]: [f32; 3]) -> Self {
        $t::new(x, y, z)
      }
    }

    impl From<$t> for [f32; 4] {
      fn from($t(a): $t) -> Self {
        a
      }
    }

    impl From<$t> for [f32; 3] {
      fn from(v: $t) -> Self {
        v.xyz()
      }
    }

    impl AsRef<[f32; 4]> for $t {
      fn as_ref(&self) -> &[f32; 4] {
        &self.0
      }
    }

    impl Deref for $t {
      type Target = [f32; 4];

      fn deref(&self) -> &Self::Target {
        &self.0
      }
    }

    impl DerefMut for $t {
      fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
      }
    }

    impl Mul<f32> for $t {
      type Output = $t;

      fn mul(mut self, k: f32) -> Self::Output {
        self *= k;
        self
      }
    }

    impl MulAssign<f32> for $t {
      fn mul_assign(&mut self, k: f32) {
        for a in &mut self.0 {
          *a *= k;
        }
      }
    }

    // Hadamard product.
    impl Mul for $t {
      type Output = $t;

      fn mul(mut self, rhs: $t) -> Self::Output {
        self *= rhs;
        self
      }
    }

    impl MulAssign for $t {
      fn mul_assign(&mut self, rhs: $t) {
        for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
          *a *= b;
        }
      }
    }

    impl Mul<Matrix> for $t {
      type Output = $t;

      fn mul(self, m: Matrix) -> Self::Output {
        $t(row_times_matrix(&self.0, &m))
      }
    }

    impl<'a> Mul<&'a Matrix> for $t {
      type Output = $t;

      fn mul(self, m: &'a Matrix) -> Self::Output {
        $t(row_times_matrix(&self.0, m))
      }
    }

    impl MulAssign<Matrix> for $t {
      fn mul_assign(&mut self, m: Matrix) {
        self.0 = row_times_matrix(&self.0, &m);
      }
    }

    impl fmt::Display for $t {
      fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        write!(
          f,
          "({}, {}, {}, {})",
          self.0[0], self.0[1], self.0[2], self.0[3]
        )
      }
    }

    impl AbsDiffEq for $t {
      type Epsilon = f32;

      fn default_epsilon() -> Self::Epsilon {
        <f32 as AbsDiffEq>::default_epsilon()
      }

      fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self
          .0
          .iter()
          .zip(other.0.iter())
          .all(|(a, b)| a.abs_diff_eq(b, epsilon))
      }
    }

    impl RelativeEq for $t {
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
          .zip(other.0.iter())
          .all(|(a, b)| a.relative_eq(b, epsilon, max_relative))
      }
    }

    impl UlpsEq for $t {
      fn default_max_ulps() -> u32 {
        <f32 as UlpsEq>::default_max_ulps()
      }

      fn ulps_eq(&self, other: &Self, epsilon: Self::Epsilon, max_ulps: u32) -> bool {
        self
          .0
          .iter()
          .zip(other.0.iter())
          .all(|(a, b)| a.ulps_eq(b, epsilon, max_ulps))
      }
    }
  };
}

homogeneous!(Vector, 0.);
homogeneous!(Point, 1.);

fn row_times_matrix(v: &[f32; 4], m: &Matrix) -> [f32; 4] {
  let rows = m.rows();
  let mut out = [0.; 4];

  for (j, cell) in out.iter_mut().enumerate() {
    *cell = v.iter().zip(rows.iter()).map(|(x, row)| x * row[j]).sum();
  }

  out
}

impl Matrix {
  /// Transform a point (row vector times matrix).
  pub fn transform_point(&self, p: Point) -> Point {
    p * self
  }

  /// Transform a vector (row vector times matrix).
  ///
  /// The translation row has no effect as long as `w = 0`.
  pub fn transform_vector(&self, v: Vector) -> Vector {
    v * self
  }
}

impl Vector {
  /// The null vector.
  pub const ZERO: Self = Vector([0., 0., 0., 0.]);

  /// Euclidean length of the x, y and z components.
  pub fn length(&self) -> f32 {
    self.0[0].hypot(self.0[1]).hypot(self.0[2])
  }

  /// Divide every component by the length of the vector.
  pub fn normalize(&mut self) -> Result<(), VectorError> {
    let length = self.length();

    if length == 0. || !length.is_finite() {
      return Err(VectorError::ZeroLength);
    }

    for a in &mut self.0 {
      *a /= length;
    }

    Ok(())
  }

  /// Normalized copy of the vector.
  pub fn normal(&self) -> Result<Vector, VectorError> {
    let mut v = *self;
    v.normalize()?;
    Ok(v)
  }

  /// Dot product of the x, y and z components.
  pub fn dot(&self, rhs: &Vector) -> f32 {
    self.0[0] * rhs.0[0] + self.0[1] * rhs.0[1] + self.0[2] * rhs.0[2]
  }

  /// Cross product `self × rhs` of the x, y and z components. `w` is always 0.
  pub fn cross(&self, rhs: &Vector) -> Vector {
    let [ax, ay, az] = self.xyz();
    let [bx, by, bz] = rhs.xyz();

    Vector::new(ay * bz - az * by, az * bx - ax * bz, ax * by - ay * bx)
  }
}

impl Default for Vector {
  fn default() -> Self {
    Self::ZERO
  }
}

impl Add for Vector {
  type Output = Vector;

  fn add(mut self, rhs: Vector) -> Self::Output {
    self += rhs;
    self
  }
}

impl AddAssign for Vector {
  fn add_assign(&mut self, rhs: Vector) {
    for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
      *a += b;
    }
  }
}

impl Sub for Vector {
  type Output = Vector;

  fn sub(mut self, rhs: Vector) -> Self::Output {
    self -= rhs;
    self
  }
}

impl SubAssign for Vector {
  fn sub_assign(&mut self, rhs: Vector) {
    for (a, b) in self.0.iter_mut().zip(rhs.0.iter()) {
      *a -= b;
    }
  }
}

impl Neg for Vector {
  type Output = Vector;

  fn neg(self) -> Self::Output {
    self * -1.
  }
}

impl Add<Point> for Vector {
  type Output = Point;

  fn add(self, p: Point) -> Self::Output {
    p + self
  }
}

impl Point {
  /// The origin, `(0, 0, 0, 1)`.
  pub const ORIGIN: Self = Point([0., 0., 0., 1.]);

  /// The origin, `(0, 0, 0, 1)`.
  pub const fn origin() -> Self {
    Self::ORIGIN
  }
}

impl Default for Point {
  fn default() -> Self {
    Self::ORIGIN
  }
}

impl Sub for Point {
  type Output = Vector;

  fn sub(self, rhs: Point) -> Self::Output {
    let mut v = Vector(self.0);

    for (a, b) in v.0.iter_mut().zip(rhs.0.iter()) {
      *a -= b;
    }

    v
  }
}

impl Add<Vector> for Point {
  type Output = Point;

  fn add(mut self, v: Vector) -> Self::Output {
    self += v;
    self
  }
}

impl AddAssign<Vector> for Point {
  fn add_assign(&mut self, v: Vector) {
    for (a, b) in self.0.iter_mut().zip(v.0.iter()) {
      *a += b;
    }
  }
}

impl Sub<Vector> for Point {
  type Output = Point;

  fn sub(mut self, v: Vector) -> Self::Output {
    self -= v;
    self
  }
}

impl SubAssign<Vector> for Point {
  fn sub_assign(&mut self, v: Vector) {
    for (a, b) in self.0.iter_mut().zip(v.0.iter()) {
      *a -= b;
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn default_w() {
    assert_eq!(Vector::default().w(), 0.);
    assert_eq!(Point::default().w(), 1.);
    assert_eq!(Vector::from([1., 2., 3.]), Vector([1., 2., 3., 0.]));
    assert_eq!(Point::from([1., 2., 3.]), Point([1., 2., 3., 1.]));
  }

  #[test]
  fn accessors_are_independent() {
    let mut p = Point::new(1., 2., 3.);
    p.set_y(-7.);
    p.set_w(2.);

    assert_eq!(p.iter().collect::<Vec<_>>(), vec![1., -7., 3., 2.]);
  }

  #[test]
  fn cross_product() {
    let x = Vector::new(1., 0., 0.);
    let y = Vector::new(0., 1., 0.);

    assert_eq!(x.cross(&y), Vector::new(0., 0., 1.));
    assert_eq!(y.cross(&x), Vector::new(0., 0., -1.));
  }

  #[test]
  fn cross_ignores_w() {
    let a = Vector([1., 0., 0., 5.]);
    let b = Vector([0., 1., 0., 3.]);

    assert_eq!(a.cross(&b).w(), 0.);
  }

  #[test]
  fn length_and_normalize() {
    let mut v = Vector::new(3., 0., 4.);

    assert_eq!(v.length(), 5.);
    assert_eq!(v.normalize(), Ok(()));
    assert_relative_eq!(v, Vector::new(0.6, 0., 0.8));
    assert_relative_eq!(v.length(), 1.);
  }

  #[test]
  fn normalize_large_components() {
    let v = Vector::new(1e20, 0., 0.);

    assert_eq!(v.length(), 1e20);
    assert_relative_eq!(v.normal().unwrap(), Vector::new(1., 0., 0.));
    assert_relative_eq!(
      Vector::new(3e30, -4e30, 0.).normal().unwrap(),
      Vector::new(0.6, -0.8, 0.)
    );
  }

  #[test]
  fn normalize_zero_length() {
    let mut v = Vector::default();

    assert_eq!(v.normalize(), Err(VectorError::ZeroLength));
    assert_eq!(v, Vector::default());
    assert_eq!(
      Vector::new(f32::INFINITY, 0., 0.).normal(),
      Err(VectorError::ZeroLength)
    );
  }

  #[test]
  fn normal_leaves_receiver_alone() {
    let v = Vector::new(0., 2., 0.);

    assert_eq!(v.normal(), Ok(Vector::new(0., 1., 0.)));
    assert_eq!(v, Vector::new(0., 2., 0.));
  }

  #[test]
  fn affine_algebra() {
    let a = Point::new(1., 2., 3.);
    let b = Point::new(4., 6., 3.);
    let d = b - a;

    assert_eq!(d, Vector::new(3., 4., 0.));
    assert_eq!(a + d, b);
    assert_eq!(d + a, b);
    assert_eq!(b - d, a);
    assert_eq!(-d, Vector::new(-3., -4., 0.));
  }

  #[test]
  fn in_place_arithmetic() {
    let mut v = Vector::new(1., 1., 1.);
    v += Vector::new(1., 2., 3.);
    v -= Vector::new(0., 0., 1.);
    v *= 2.;

    assert_eq!(v, Vector::new(4., 6., 6.));

    let mut p = Point::origin();
    p += Vector::new(1., 0., 0.);
    p -= Vector::new(0., 1., 0.);

    assert_eq!(p, Point::new(1., -1., 0.));
  }

  #[test]
  fn scalar_and_hadamard_products() {
    let v = Vector::new(1., 2., 3.);

    assert_eq!(v * 2., Vector::new(2., 4., 6.));
    assert_eq!(v * Vector::new(3., 0.5, -1.), Vector::new(3., 1., -3.));
  }

  #[test]
  fn row_vector_times_matrix() {
    let m = Matrix::from_rows([
      [1., 2., 0., 0.],
      [0., 1., 0., 0.],
      [0., 0., 1., 0.],
      [10., 20., 30., 1.],
    ]);

    assert_eq!(Point::new(1., 1., 1.) * m, Point([11., 23., 31., 1.]));
    assert_eq!(m.transform_vector(Vector::new(1., 1., 1.)), Vector::new(1., 3., 1.));
    assert_eq!(m.transform_point(Point::origin()), Point::new(10., 20., 30.));
  }

  #[test]
  fn dot_product() {
    assert_eq!(Vector::new(1., 2., 3.).dot(&Vector::new(-1., 0., 2.)), 5.);
  }
}
