use gltut::{frustum_scale, Matrix};

/// Ping-pong factor going from 0 to 1 and back to 0 every `duration` seconds.
pub fn lerp_factor(time: f32, duration: f32) -> f32 {
  let value = time.rem_euclid(duration) / duration;

  if value > 0.5 {
    (1. - value) * 2.
  } else {
    value * 2.
  }
}

/// Angle, in degrees, of something doing a full turn every `duration` seconds.
pub fn loop_angle(time: f32, duration: f32) -> f32 {
  time.rem_euclid(duration) * 360. / duration
}

/// Perspective camera-to-clip matrix built from a frustum scale.
///
/// `aspect` is the width / height ratio of the framebuffer.
pub fn camera_to_clip(fov_deg: f32, aspect: f32, z_near: f32, z_far: f32) -> Matrix {
  let scale = frustum_scale(fov_deg);

  Matrix::from_rows([
    [scale / aspect, 0., 0., 0.],
    [0., scale, 0., 0.],
    [0., 0., (z_far + z_near) / (z_near - z_far), -1.],
    [0., 0., (2. * z_far * z_near) / (z_near - z_far), 0.],
  ])
}

// Aspect ratio of a framebuffer; a degenerate height is treated as a square one.
pub(crate) fn aspect_ratio(width: u32, height: u32) -> f32 {
  if width == 0 || height == 0 {
    1.
  } else {
    width as f32 / height as f32
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;

  #[test]
  fn lerp_ping_pong() {
    assert_eq!(lerp_factor(0., 3.), 0.);
    assert_relative_eq!(lerp_factor(0.75, 3.), 0.5);
    assert_relative_eq!(lerp_factor(1.5, 3.), 1.);
    assert_relative_eq!(lerp_factor(2.25, 3.), 0.5);
    assert_relative_eq!(lerp_factor(3.75, 3.), 0.5);
  }

  #[test]
  fn loop_angle_wraps() {
    assert_eq!(loop_angle(0., 2.), 0.);
    assert_relative_eq!(loop_angle(0.5, 2.), 90.);
    assert_relative_eq!(loop_angle(2.5, 2.), 90.);
  }

  #[test]
  fn camera_to_clip_is_a_perspective() {
    assert_relative_eq!(
      camera_to_clip(45., 1.6, 1., 61.),
      Matrix::perspective(45., 1.6, 1., 61.),
      epsilon = 1e-5
    );
  }

  #[test]
  fn degenerate_aspect() {
    assert_eq!(aspect_ratio(500, 0), 1.);
    assert_eq!(aspect_ratio(800, 400), 2.);
  }
}
