//! This tutorial draws a robot arm, made of nine boxes, as a hierarchy of local transforms. Each
//! part of the arm is positioned relative to its parent, so moving a joint moves everything
//! attached to it.
//!
//! The scene is walked with a [`MatrixStack`]: every part opens a scope, applies its local
//! transform, draws its own boxes in nested scopes and lets its children do the same. Closing a
//! scope gets rid of the part’s transforms so that siblings are not affected.
//!
//! Controls:
//!
//! - <a> / <d>: rotate the base.
//! - <w> / <s>: raise / lower the upper arm.
//! - <r> / <f>: fold / unfold the lower arm.
//! - <t> / <g>: pitch the wrist.
//! - <z> / <c>: roll the wrist.
//! - <q> / <e>: open / close the fingers.
//! - <space>: dump the current pose (debug log level).
//! - <escape>: quit.

use crate::{
  shared::{aspect_ratio, camera_to_clip},
  DrawTarget, Example, ExampleError, InputAction, LoopFeedback, Mesh,
};
use gltut::MatrixStack;

const FOV_DEG: f32 = 45.;
const Z_NEAR: f32 = 1.;
const Z_FAR: f32 = 61.;

const STANDARD_ANGLE_INCREMENT: f32 = 11.25;
const SMALL_ANGLE_INCREMENT: f32 = 9.;

const POS_BASE: [f32; 3] = [3., -5., -40.];
const POS_BASE_LEFT: [f32; 3] = [2., 0., 0.];
const POS_BASE_RIGHT: [f32; 3] = [-2., 0., 0.];
const SCALE_BASE_Z: f32 = 3.;
const SIZE_UPPER_ARM: f32 = 9.;
const POS_LOWER_ARM: [f32; 3] = [0., 0., 8.];
const LEN_LOWER_ARM: f32 = 5.;
const WIDTH_LOWER_ARM: f32 = 1.5;
const POS_WRIST: [f32; 3] = [0., 0., 5.];
const LEN_WRIST: f32 = 2.;
const WIDTH_WRIST: f32 = 2.;
const POS_LEFT_FINGER: [f32; 3] = [1., 0., 1.];
const POS_RIGHT_FINGER: [f32; 3] = [-1., 0., 1.];
const LEN_FINGER: f32 = 2.;
const WIDTH_FINGER: f32 = 0.5;
const ANG_LOWER_FINGER: f32 = 45.;

/// Joints of the arm that can be moved.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Joint {
  /// Rotation of the whole arm around Y, wrapping around a full turn.
  Base,
  /// Shoulder, between -90° and 0°.
  UpperArm,
  /// Elbow, between 0° and 146.25°.
  LowerArm,
  /// Wrist bend, between 0° and 90°.
  WristPitch,
  /// Wrist twist, wrapping around a full turn.
  WristRoll,
  /// Opening of the fingers, between 9° and 180°.
  FingerOpen,
}

impl Joint {
  /// Angle increment, in degrees, of a single key press.
  pub fn step(self) -> f32 {
    match self {
      Joint::FingerOpen => SMALL_ANGLE_INCREMENT,
      _ => STANDARD_ANGLE_INCREMENT,
    }
  }

  /// Joint moved by a key, and whether the key increments its angle.
  pub fn from_key(key: char) -> Option<(Self, bool)> {
    let binding = match key.to_ascii_uppercase() {
      'A' => (Joint::Base, true),
      'D' => (Joint::Base, false),
      'W' => (Joint::UpperArm, true),
      'S' => (Joint::UpperArm, false),
      'R' => (Joint::LowerArm, true),
      'F' => (Joint::LowerArm, false),
      'T' => (Joint::WristPitch, true),
      'G' => (Joint::WristPitch, false),
      'Z' => (Joint::WristRoll, true),
      'C' => (Joint::WristRoll, false),
      'Q' => (Joint::FingerOpen, true),
      'E' => (Joint::FingerOpen, false),
      _ => return None,
    };

    Some(binding)
  }
}

/// Pose of the robot arm.
#[derive(Clone, Debug, PartialEq)]
pub struct Armature {
  ang_base: f32,
  ang_upper_arm: f32,
  ang_lower_arm: f32,
  ang_wrist_pitch: f32,
  ang_wrist_roll: f32,
  ang_finger_open: f32,
}

impl Default for Armature {
  fn default() -> Self {
    Armature {
      ang_base: -45.,
      ang_upper_arm: -33.75,
      ang_lower_arm: 146.25,
      ang_wrist_pitch: 67.5,
      ang_wrist_roll: 0.,
      ang_finger_open: 180.,
    }
  }
}

impl Armature {
  /// Current angle of a joint, in degrees.
  pub fn angle(&self, joint: Joint) -> f32 {
    match joint {
      Joint::Base => self.ang_base,
      Joint::UpperArm => self.ang_upper_arm,
      Joint::LowerArm => self.ang_lower_arm,
      Joint::WristPitch => self.ang_wrist_pitch,
      Joint::WristRoll => self.ang_wrist_roll,
      Joint::FingerOpen => self.ang_finger_open,
    }
  }

  /// Move a joint by one step.
  ///
  /// The base and the wrist roll wrap around in `[0, 360)`; the other joints saturate at their
  /// limits.
  pub fn adjust(&mut self, joint: Joint, increment: bool) {
    let delta = if increment { joint.step() } else { -joint.step() };

    match joint {
      Joint::Base => self.ang_base = (self.ang_base + delta).rem_euclid(360.),
      Joint::UpperArm => self.ang_upper_arm = (self.ang_upper_arm + delta).clamp(-90., 0.),
      Joint::LowerArm => self.ang_lower_arm = (self.ang_lower_arm + delta).clamp(0., 146.25),
      Joint::WristPitch => self.ang_wrist_pitch = (self.ang_wrist_pitch + delta).clamp(0., 90.),
      Joint::WristRoll => self.ang_wrist_roll = (self.ang_wrist_roll + delta).rem_euclid(360.),
      Joint::FingerOpen => self.ang_finger_open = (self.ang_finger_open + delta).clamp(9., 180.),
    }

    log::trace!("{:?} moved to {}°", joint, self.angle(joint));
  }

  /// Dump the pose in the logs.
  pub fn write_pose(&self) {
    log::debug!("angBase:       {}", self.ang_base);
    log::debug!("angUpperArm:   {}", self.ang_upper_arm);
    log::debug!("angLowerArm:   {}", self.ang_lower_arm);
    log::debug!("angWristPitch: {}", self.ang_wrist_pitch);
    log::debug!("angWristRoll:  {}", self.ang_wrist_roll);
    log::debug!("angFingerOpen: {}", self.ang_finger_open);
  }

  /// Draw the arm.
  ///
  /// `stack` holds the transform the arm is drawn relative to (the identity for model-to-camera).
  pub fn draw<T>(&self, stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    stack.with_scope(|stack| self.draw_base(stack, target))
  }

  fn draw_base<T>(&self, stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    stack.translate(POS_BASE).rotate_y(self.ang_base);

    draw_block(stack, target, POS_BASE_LEFT, [1., 1., SCALE_BASE_Z])?;
    draw_block(stack, target, POS_BASE_RIGHT, [1., 1., SCALE_BASE_Z])?;

    stack.with_scope(|stack| self.draw_upper_arm(stack, target))
  }

  fn draw_upper_arm<T>(&self, stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    stack.rotate_x(self.ang_upper_arm);

    draw_block(
      stack,
      target,
      [0., 0., SIZE_UPPER_ARM / 2. - 1.],
      [1., 1., SIZE_UPPER_ARM / 2.],
    )?;

    stack.with_scope(|stack| self.draw_lower_arm(stack, target))
  }

  fn draw_lower_arm<T>(&self, stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    stack
      .translate(POS_LOWER_ARM)
      .rotate_x(self.ang_lower_arm);

    draw_block(
      stack,
      target,
      [0., 0., LEN_LOWER_ARM / 2.],
      [WIDTH_LOWER_ARM / 2., WIDTH_LOWER_ARM / 2., LEN_LOWER_ARM / 2.],
    )?;

    stack.with_scope(|stack| self.draw_wrist(stack, target))
  }

  fn draw_wrist<T>(&self, stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    stack
      .translate(POS_WRIST)
      .rotate_z(self.ang_wrist_roll)
      .rotate_x(self.ang_wrist_pitch);

    draw_block(
      stack,
      target,
      [0., 0., 0.],
      [WIDTH_WRIST / 2., WIDTH_WRIST / 2., LEN_WRIST / 2.],
    )?;

    stack.with_scope(|stack| {
      draw_finger(
        stack,
        target,
        POS_LEFT_FINGER,
        self.ang_finger_open,
        -ANG_LOWER_FINGER,
      )
    })?;

    stack.with_scope(|stack| {
      draw_finger(
        stack,
        target,
        POS_RIGHT_FINGER,
        -self.ang_finger_open,
        ANG_LOWER_FINGER,
      )
    })
  }
}

// A finger is made of two segments; the lower one is attached at the end of the upper one.
fn draw_finger<T>(
  stack: &mut MatrixStack,
  target: &mut T,
  position: [f32; 3],
  ang_open: f32,
  ang_lower: f32,
) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  let offset = [0., 0., LEN_FINGER / 2.];
  let size = [WIDTH_FINGER / 2., WIDTH_FINGER / 2., LEN_FINGER / 2.];

  stack.translate(position).rotate_y(ang_open);
  draw_block(stack, target, offset, size)?;

  stack.translate([0., 0., LEN_FINGER]).rotate_y(ang_lower);
  draw_block(stack, target, offset, size)
}

// Draw a colored cube scaled by `size` then moved by `offset`, in a scope of its own.
fn draw_block<T>(
  stack: &mut MatrixStack,
  target: &mut T,
  offset: [f32; 3],
  size: [f32; 3],
) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  stack.with_scope(|stack| {
    stack.translate(offset).scale(size);
    target.draw(Mesh::ColoredCube, stack.top().to_flat());
    Ok(())
  })
}

pub struct LocalExample {
  armature: Armature,
  aspect: f32,
}

impl LocalExample {
  /// Current pose of the arm.
  pub fn armature(&self) -> &Armature {
    &self.armature
  }
}

impl Example for LocalExample {
  fn bootstrap() -> Self {
    LocalExample {
      armature: Armature::default(),
      aspect: 1.,
    }
  }

  fn render_frame(
    mut self,
    _: f32,
    actions: impl Iterator<Item = InputAction>,
    target: &mut impl DrawTarget,
  ) -> Result<LoopFeedback<Self>, ExampleError> {
    for action in actions {
      match action {
        InputAction::Quit => return Ok(LoopFeedback::Exit),

        InputAction::MainToggle => self.armature.write_pose(),

        InputAction::Key { key, .. } => {
          if let Some((joint, increment)) = Joint::from_key(key) {
            self.armature.adjust(joint, increment);
          }
        }

        InputAction::Resized { width, height } => {
          self.aspect = aspect_ratio(width, height);
        }
      }
    }

    target.set_camera_to_clip(camera_to_clip(FOV_DEG, self.aspect, Z_NEAR, Z_FAR).to_flat());

    let mut stack = MatrixStack::new();
    self.armature.draw(&mut stack, target)?;

    Ok(LoopFeedback::Continue(self))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn key_bindings() {
    assert_eq!(Joint::from_key('a'), Some((Joint::Base, true)));
    assert_eq!(Joint::from_key('E'), Some((Joint::FingerOpen, false)));
    assert_eq!(Joint::from_key('x'), None);
  }

  #[test]
  fn base_wraps() {
    let mut armature = Armature::default();
    armature.adjust(Joint::Base, true);

    assert_eq!(armature.angle(Joint::Base), 326.25);

    for _ in 0..3 {
      armature.adjust(Joint::Base, true);
    }

    assert_eq!(armature.angle(Joint::Base), 0.);

    armature.adjust(Joint::Base, false);
    assert_eq!(armature.angle(Joint::Base), 348.75);
  }

  #[test]
  fn upper_arm_saturates() {
    let mut armature = Armature::default();

    for _ in 0..10 {
      armature.adjust(Joint::UpperArm, true);
    }

    assert_eq!(armature.angle(Joint::UpperArm), 0.);

    for _ in 0..20 {
      armature.adjust(Joint::UpperArm, false);
    }

    assert_eq!(armature.angle(Joint::UpperArm), -90.);
  }

  #[test]
  fn fingers_step_by_small_increment() {
    let mut armature = Armature::default();
    armature.adjust(Joint::FingerOpen, false);

    assert_eq!(armature.angle(Joint::FingerOpen), 171.);

    armature.adjust(Joint::FingerOpen, true);
    armature.adjust(Joint::FingerOpen, true);

    assert_eq!(armature.angle(Joint::FingerOpen), 180.);
  }
}
