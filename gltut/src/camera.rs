//! Camera helpers.
//!
//! - [`look_at`] builds a world-to-camera matrix from a camera position, a target and an up
//!   direction.
//! - [`frustum_scale`] turns a field of view into the scale factor of a perspective projection.
//! - [`orbit_position`] resolves a camera orbiting around a target, expressed in spherical
//!   coordinates.

use crate::matrix::{Matrix, MatrixError};
use crate::vector::{Point, Vector, VectorError};
use std::{error, fmt};

/// Errors that can happen while building a look-at matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LookAtError {
  /// The look or the up direction is degenerate (null, or up parallel to the look direction).
  Direction(VectorError),
  /// The camera basis cannot be inverted.
  Basis(MatrixError),
}

impl fmt::Display for LookAtError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      LookAtError::Direction(ref e) => write!(f, "degenerate camera direction: {}", e),

      LookAtError::Basis(ref e) => write!(f, "invalid camera basis: {}", e),
    }
  }
}

impl error::Error for LookAtError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      LookAtError::Direction(e) => Some(e),
      LookAtError::Basis(e) => Some(e),
    }
  }
}

impl From<VectorError> for LookAtError {
  fn from(e: VectorError) -> Self {
    LookAtError::Direction(e)
  }
}

impl From<MatrixError> for LookAtError {
  fn from(e: MatrixError) -> Self {
    LookAtError::Basis(e)
  }
}

/// World-to-camera matrix of a camera at `camera` looking at `target`.
///
/// The camera basis is made of the right direction (`look × up`), the perpendicular up direction
/// (`right × look`) and the opposite of the look direction, so that the camera looks down `-Z`.
/// That basis, positioned at `camera`, is the camera-to-world transform; the returned matrix is its
/// inverse.
pub fn look_at(camera: Point, target: Point, up: Vector) -> Result<Matrix, LookAtError> {
  let look = (target - camera).normal()?;
  let up = up.normal()?;
  let right = look.cross(&up).normal()?;
  let perp_up = right.cross(&look);
  let back = -look;

  let camera_to_world = Matrix::from_rows([
    [right.x(), right.y(), right.z(), 0.],
    [perp_up.x(), perp_up.y(), perp_up.z(), 0.],
    [back.x(), back.y(), back.z(), 0.],
    [camera.x(), camera.y(), camera.z(), 1.],
  ]);

  Ok(camera_to_world.inverse()?)
}

/// Scale factor of a perspective projection with a field of view of `fov_deg` degrees.
pub fn frustum_scale(fov_deg: f32) -> f32 {
  1. / (fov_deg.to_radians() / 2.).tan()
}

/// Position of a camera orbiting around `target`.
///
/// `phi_deg` is the angle around the Y axis, measured from `+X` towards `+Z`. `theta_deg` is the
/// elevation: `0` is on the horizon and negative values are above it. `radius` is the distance
/// to the target.
pub fn orbit_position(target: Point, phi_deg: f32, theta_deg: f32, radius: f32) -> Point {
  let phi = phi_deg.to_radians();
  let theta = (theta_deg + 90.).to_radians();

  let (sin_theta, cos_theta) = theta.sin_cos();
  let (sin_phi, cos_phi) = phi.sin_cos();
  let dir_to_camera = Vector::new(sin_theta * cos_phi, cos_theta, sin_theta * sin_phi);

  target + dir_to_camera * radius
}

/// Spherical coordinates of an orbiting camera, relative to its target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spherical {
  /// Angle around the Y axis, in degrees.
  pub phi_deg: f32,
  /// Elevation, in degrees.
  pub theta_deg: f32,
  /// Distance to the target.
  pub radius: f32,
}

impl Spherical {
  /// Spherical coordinates from angles in degrees and a distance.
  pub const fn new(phi_deg: f32, theta_deg: f32, radius: f32) -> Self {
    Spherical {
      phi_deg,
      theta_deg,
      radius,
    }
  }

  /// Resolve the camera position around `target`. See [`orbit_position`].
  pub fn around(&self, target: Point) -> Point {
    orbit_position(target, self.phi_deg, self.theta_deg, self.radius)
  }
}
