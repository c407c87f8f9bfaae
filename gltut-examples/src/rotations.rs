//! This tutorial shows five boxes rotating in place: one doesn’t rotate at all, three rotate
//! around the X, Y and Z axes and the last one rotates around the `(1, 1, 1)` axis.
//!
//! Each instance builds its model-to-camera matrix directly: the rotation of the current time,
//! with its offset in the translation row.
//!
//! Press <escape> to quit.

use crate::{
  shared::{aspect_ratio, camera_to_clip, loop_angle},
  DrawTarget, Example, ExampleError, InputAction, LoopFeedback, Mesh,
};
use gltut::{Matrix, Vector, VectorError};

const FOV_DEG: f32 = 45.;
const Z_NEAR: f32 = 1.;
const Z_FAR: f32 = 61.;

/// Rotation applied to an instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rotation {
  /// No rotation.
  Null,
  /// Around the X axis, a full turn every 3 seconds.
  X,
  /// Around the Y axis, a full turn every 3 seconds.
  Y,
  /// Around the Z axis, a full turn every 3 seconds.
  Z,
  /// Around an arbitrary axis, a full turn every 2 seconds.
  Axis(Vector),
}

impl Rotation {
  /// Rotation matrix at `time`.
  pub fn matrix(&self, time: f32) -> Result<Matrix, VectorError> {
    let m = match *self {
      Rotation::Null => Matrix::identity(),
      Rotation::X => Matrix::rotation_x(loop_angle(time, 3.)),
      Rotation::Y => Matrix::rotation_y(loop_angle(time, 3.)),
      Rotation::Z => Matrix::rotation_z(loop_angle(time, 3.)),
      Rotation::Axis(axis) => Matrix::rotation(axis, loop_angle(time, 2.))?,
    };

    Ok(m)
  }
}

/// A rotating box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
  pub rotation: Rotation,
  /// Position of the box in camera space.
  pub offset: [f32; 3],
}

impl Instance {
  /// Model-to-camera matrix at `time`.
  pub fn model_to_camera(&self, time: f32) -> Result<Matrix, VectorError> {
    // the rotation has no translation, so this is the rotation with its row 3 set to the offset
    Ok(self.rotation.matrix(time)? * Matrix::translation(self.offset))
  }
}

/// The five instances of the tutorial.
pub fn instances() -> [Instance; 5] {
  [
    Instance {
      rotation: Rotation::Null,
      offset: [0., 0., -25.],
    },
    Instance {
      rotation: Rotation::X,
      offset: [-5., -5., -25.],
    },
    Instance {
      rotation: Rotation::Y,
      offset: [-5., 5., -25.],
    },
    Instance {
      rotation: Rotation::Z,
      offset: [5., 5., -25.],
    },
    Instance {
      rotation: Rotation::Axis(Vector::new(1., 1., 1.)),
      offset: [5., -5., -25.],
    },
  ]
}

pub struct LocalExample {
  instances: [Instance; 5],
  aspect: f32,
}

impl Example for LocalExample {
  fn bootstrap() -> Self {
    LocalExample {
      instances: instances(),
      aspect: 1.,
    }
  }

  fn render_frame(
    mut self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    target: &mut impl DrawTarget,
  ) -> Result<LoopFeedback<Self>, ExampleError> {
    for action in actions {
      match action {
        InputAction::Quit => return Ok(LoopFeedback::Exit),
        InputAction::Resized { width, height } => self.aspect = aspect_ratio(width, height),
        _ => (),
      }
    }

    target.set_camera_to_clip(camera_to_clip(FOV_DEG, self.aspect, Z_NEAR, Z_FAR).to_flat());

    for instance in &self.instances {
      let model_to_camera = instance.model_to_camera(time)?;
      target.draw(Mesh::ColoredCube, model_to_camera.to_flat());
    }

    Ok(LoopFeedback::Continue(self))
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;
  use gltut::Point;

  #[test]
  fn offset_in_translation_row() {
    for instance in &instances() {
      let m = instance.model_to_camera(1.234).unwrap();

      assert_eq!(m.rows()[3], [instance.offset[0], instance.offset[1], instance.offset[2], 1.]);
    }
  }

  #[test]
  fn null_rotation_is_a_translation() {
    let m = instances()[0].model_to_camera(2.).unwrap();

    assert_eq!(m, Matrix::translation([0., 0., -25.]));
  }

  #[test]
  fn quarter_loop() {
    // 0.75s out of 3s is a quarter turn
    let m = instances()[3].model_to_camera(0.75).unwrap();

    assert_relative_eq!(
      Point::new(1., 0., 0.) * m,
      Point::new(5., 6., -25.),
      epsilon = 1e-5
    );
  }
}
