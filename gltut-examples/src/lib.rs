//! gltut tutorials.
//!
//! This crate provides the tutorials of the series in a form that can run on any platform. They
//! are made platform-agnostic on purpose: they don’t open windows, compile shaders or upload
//! buffers. What they do is compute every matrix the real tutorials hand to the graphics API and
//! submit it, along with the mesh it applies to, to a [`DrawTarget`] implemented by the platform
//! code running them.
//!
//! # Tutorial architecture
//!
//! Tutorials are simple modules exposed from this crate, each exporting a `LocalExample` type
//! implementing the [`Example`] trait. They do not depend on any platform-specific concepts, such
//! as system events or window capacities. User interaction is expressed with [`InputAction`],
//! which the platform code builds from whatever it gets (keyboard events, scripted key presses,
//! etc.).
//!
//! Every frame, a tutorial:
//!
//! 1. Consumes the actions that happened since the previous frame.
//! 2. Submits its camera-to-clip matrix (and world-to-camera matrix, if any).
//! 3. Submits one draw call per mesh instance, with its model-to-camera (or model-to-world)
//!    matrix.
//!
//! Matrices are handed over flattened, row after row. See [`gltut::Matrix::to_flat`].
//!
//! # Error handling
//!
//! Tutorials propagate errors from the transform core through [`ExampleError`] rather than
//! panicking. In practice, none of them should ever fail: the only fallible operations they use
//! are scopes, arbitrary-axis rotations and look-at matrices, whose inputs are controlled.

use gltut::{LookAtError, StackError, VectorError};
use std::{error, fmt};

pub mod hierarchy;
pub mod rotations;
pub mod scale;
mod shared;
pub mod world_scene;

pub use crate::shared::{camera_to_clip, lerp_factor, loop_angle};

/// Tutorial interface.
pub trait Example: Sized {
  /// Bootstrap the tutorial.
  fn bootstrap() -> Self;

  /// Render a frame of the tutorial.
  ///
  /// `time` is the number of seconds elapsed since the tutorial started.
  fn render_frame(
    self,
    time: f32,
    actions: impl Iterator<Item = InputAction>,
    target: &mut impl DrawTarget,
  ) -> Result<LoopFeedback<Self>, ExampleError>;
}

/// A type used to pass “inputs” to tutorials.
#[derive(Clone, Debug, PartialEq)]
pub enum InputAction {
  /// Quit the application.
  Quit,

  /// Main action. Typically used to switch an effect on and off or to dump some state.
  MainToggle,

  /// A key was pressed.
  ///
  /// `key` is always upper-case; `shift` tells whether the shift modifier was held.
  Key { key: char, shift: bool },

  /// Framebuffer size changed.
  Resized { width: u32, height: u32 },
}

impl InputAction {
  /// Build a key action from a typed character.
  ///
  /// Upper-case letters are reported with shift held. The space bar is the main toggle.
  pub fn from_char(c: char) -> Self {
    if c == ' ' {
      InputAction::MainToggle
    } else {
      InputAction::Key {
        key: c.to_ascii_uppercase(),
        shift: c.is_ascii_uppercase(),
      }
    }
  }
}

/// What to do after a frame.
#[derive(Clone, Debug, PartialEq)]
pub enum LoopFeedback<T> {
  /// Keep running, with the new state of the tutorial.
  Continue(T),

  /// Stop.
  Exit,
}

/// Meshes the tutorials know how to draw.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Mesh {
  /// Cube with per-vertex colors.
  ColoredCube,

  /// Cube colored with a uniform tint.
  TintedCube,

  /// Cylinder of unit height.
  Cylinder,

  /// Cone of unit height.
  Cone,

  /// Flat unit plane, in the XZ plane.
  Plane,
}

/// Where tutorials submit their matrices and draw calls.
pub trait DrawTarget {
  /// Set the camera-to-clip (projection) matrix used by the next draw calls.
  fn set_camera_to_clip(&mut self, matrix: [f32; 16]);

  /// Set the world-to-camera matrix used by the next draw calls.
  fn set_world_to_camera(&mut self, matrix: [f32; 16]);

  /// Draw a mesh with the given model matrix.
  fn draw(&mut self, mesh: Mesh, model: [f32; 16]);
}

/// Errors a tutorial can fail with.
#[derive(Debug)]
pub enum ExampleError {
  /// A matrix stack was misused.
  Stack(StackError),

  /// A vector had no direction.
  Vector(VectorError),

  /// The camera couldn’t be set up.
  Camera(LookAtError),
}

impl fmt::Display for ExampleError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      ExampleError::Stack(ref e) => write!(f, "matrix stack error: {}", e),

      ExampleError::Vector(ref e) => write!(f, "vector error: {}", e),

      ExampleError::Camera(ref e) => write!(f, "camera error: {}", e),
    }
  }
}

impl error::Error for ExampleError {
  fn source(&self) -> Option<&(dyn error::Error + 'static)> {
    match self {
      ExampleError::Stack(e) => Some(e),
      ExampleError::Vector(e) => Some(e),
      ExampleError::Camera(e) => Some(e),
    }
  }
}

impl From<StackError> for ExampleError {
  fn from(e: StackError) -> Self {
    ExampleError::Stack(e)
  }
}

impl From<VectorError> for ExampleError {
  fn from(e: VectorError) -> Self {
    ExampleError::Vector(e)
  }
}

impl From<LookAtError> for ExampleError {
  fn from(e: LookAtError) -> Self {
    ExampleError::Camera(e)
  }
}
