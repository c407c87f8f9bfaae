//! This tutorial shows five boxes, each with a different scale: none, a static uniform one, a
//! static non-uniform one and two others changing over time.
//!
//! Press <escape> to quit.

use crate::{
  shared::{aspect_ratio, camera_to_clip, lerp_factor},
  DrawTarget, Example, ExampleError, InputAction, LoopFeedback, Mesh,
};
use gltut::Matrix;

const FOV_DEG: f32 = 45.;
const Z_NEAR: f32 = 1.;
const Z_FAR: f32 = 61.;

/// Scale applied to an instance.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Scale {
  /// No scaling.
  Null,
  /// 4 on every axis.
  StaticUniform,
  /// Squashed on X, stretched on Z.
  StaticNonUniform,
  /// Between 1 and 4 on every axis, back and forth every 3 seconds.
  DynamicUniform,
  /// Between 1 and 0.5 on X and between 1 and 10 on Z, with different periods.
  DynamicNonUniform,
}

impl Scale {
  /// Scale factors at `time`.
  pub fn factors(self, time: f32) -> [f32; 3] {
    match self {
      Scale::Null => [1., 1., 1.],
      Scale::StaticUniform => [4., 4., 4.],
      Scale::StaticNonUniform => [0.5, 1., 10.],

      Scale::DynamicUniform => {
        let s = 1. + 3. * lerp_factor(time, 3.);
        [s, s, s]
      }

      Scale::DynamicNonUniform => [
        1. - 0.5 * lerp_factor(time, 3.),
        1.,
        1. + 9. * lerp_factor(time, 5.),
      ],
    }
  }
}

/// A scaled box.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Instance {
  pub scale: Scale,
  /// Position of the box in camera space.
  pub offset: [f32; 3],
}

impl Instance {
  /// Model-to-camera matrix at `time`.
  pub fn model_to_camera(&self, time: f32) -> Matrix {
    Matrix::scaling(self.scale.factors(time)) * Matrix::translation(self.offset)
  }
}

/// The five instances of the tutorial.
pub fn instances() -> [Instance; 5] {
  [
    Instance {
      scale: Scale::Null,
      offset: [0., 0., -45.],
    },
    Instance {
      scale: Scale::StaticUniform,
      offset: [-10., -10., -45.],
    },
    Instance {
      scale: Scale::StaticNonUniform,
      offset: [-10., 10., -45.],
    },
    Instance {
      scale: Scale::DynamicUniform,
      offset: [10., 10., -45.],
    },
    Instance {
      scale: Scale::DynamicNonUniform,
      offset: [10., -10., -45.],
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
      target.draw(Mesh::ColoredCube, instance.model_to_camera(time).to_flat());
    }

    Ok(LoopFeedback::Continue(self))
  }
}
