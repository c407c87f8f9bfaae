//! Matrix stacks.
//!
//! A [`MatrixStack`] is the tool used to build a chain of local transforms, typically a
//! model-to-camera matrix. It holds a _current_ matrix, starting as the identity, and a stack of
//! saved matrices.
//!
//! Every transform operation ([`MatrixStack::rotate_x`], [`MatrixStack::translate`], etc.)
//! left-multiplies the new transform onto the current matrix _and_ saves the result. There is no
//! need to [`MatrixStack::push`] before transforming, which means that explicit `push` / `pop`
//! pairs are not balanced with the transform calls. Use scopes for that.
//!
//! # Scopes
//!
//! A scope records the depth of the saved stack when it’s opened and, when it’s closed, truncates
//! the stack back to that depth and restores the current matrix to the last saved one (or the
//! identity if nothing is saved). Scopes nest, which makes them a perfect fit to walk a hierarchy:
//!
//! ```
//! use gltut::{MatrixStack, Point, StackError};
//!
//! let mut stack = MatrixStack::new();
//! stack.translate([0., 0., -10.]);
//!
//! stack.with_scope(|stack| -> Result<(), StackError> {
//!   stack.rotate_y(90.).scale([2., 2., 2.]);
//!   // draw a child here
//!   Ok(())
//! })?;
//!
//! // the child transforms didn’t leak
//! assert_eq!(Point::origin() * *stack.top(), Point::new(0., 0., -10.));
//! # Ok::<(), StackError>(())
//! ```
//!
//! Scopes come in two flavours:
//!
//! - [`MatrixStack::scope`], which returns a [`StackScope`] guard. The guard dereferences to the
//!   stack and closes the scope when dropped. Use [`StackScope::close`] to get the result of
//!   closing it.
//! - [`MatrixStack::with_scope`], which runs a closure inside a scope and closes it afterwards.
//!
//! [`MatrixStack::enter`] and [`MatrixStack::exit`] are also available if you need to manage scopes
//! by hand.

use crate::matrix::Matrix;
use crate::vector::{Vector, VectorError};
use std::{
  error, fmt,
  ops::{Deref, DerefMut},
};

/// Errors that can happen while manipulating a [`MatrixStack`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum StackError {
  /// [`MatrixStack::pop`] was called with no saved matrix.
  Underflow,
  /// [`MatrixStack::exit`] was called with no open scope.
  NoScope,
  /// The saved stack was popped past the depth it had when the scope was opened.
  ScopeBroken {
    /// Depth when the scope was opened.
    expected: usize,
    /// Depth when the scope was closed.
    actual: usize,
  },
}

impl fmt::Display for StackError {
  fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
    match *self {
      StackError::Underflow => f.write_str("cannot pop an empty matrix stack"),

      StackError::NoScope => f.write_str("no scope to exit"),

      StackError::ScopeBroken { expected, actual } => write!(
        f,
        "scope broken: entered at depth {} but exited at depth {}",
        expected, actual
      ),
    }
  }
}

impl error::Error for StackError {}

/// A stack of matrices.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MatrixStack {
  current: Matrix,
  saved: Vec<Matrix>,
  scopes: Vec<usize>,
}

impl MatrixStack {
  /// Create a new stack, with the identity as current matrix and nothing saved.
  pub fn new() -> Self {
    Self::default()
  }

  /// Current matrix.
  pub fn top(&self) -> &Matrix {
    &self.current
  }

  /// Number of saved matrices.
  pub fn depth(&self) -> usize {
    self.saved.len()
  }

  /// Save a copy of the current matrix.
  pub fn push(&mut self) -> &mut Self {
    self.saved.push(self.current);
    self
  }

  /// Remove the last saved matrix and make it the current one.
  pub fn pop(&mut self) -> Result<Matrix, StackError> {
    let m = self.saved.pop().ok_or(StackError::Underflow)?;
    self.current = m;
    Ok(m)
  }

  /// Left-multiply `m` onto the current matrix and save the result.
  ///
  /// This is the operation all the other transforms are built on.
  pub fn apply(&mut self, m: &Matrix) -> &mut Self {
    self.current = m * &self.current;
    self.push()
  }

  /// Replace the current matrix by `m` and save it.
  pub fn load(&mut self, m: Matrix) -> &mut Self {
    self.current = m;
    self.push()
  }

  /// Apply a rotation around the X axis.
  pub fn rotate_x(&mut self, angle_deg: f32) -> &mut Self {
    self.apply(&Matrix::rotation_x(angle_deg))
  }

  /// Apply a rotation around the Y axis.
  pub fn rotate_y(&mut self, angle_deg: f32) -> &mut Self {
    self.apply(&Matrix::rotation_y(angle_deg))
  }

  /// Apply a rotation around the Z axis.
  pub fn rotate_z(&mut self, angle_deg: f32) -> &mut Self {
    self.apply(&Matrix::rotation_z(angle_deg))
  }

  /// Apply a rotation around an arbitrary axis.
  ///
  /// Nothing is applied if the axis is the null vector.
  pub fn rotate(&mut self, axis: Vector, angle_deg: f32) -> Result<&mut Self, VectorError> {
    let m = Matrix::rotation(axis, angle_deg)?;
    Ok(self.apply(&m))
  }

  /// Apply an axis-aligned scale.
  pub fn scale(&mut self, factors: impl Into<[f32; 3]>) -> &mut Self {
    self.apply(&Matrix::scaling(factors))
  }

  /// Apply a translation.
  pub fn translate(&mut self, offset: impl Into<[f32; 3]>) -> &mut Self {
    self.apply(&Matrix::translation(offset))
  }

  /// Apply a perspective projection. See [`Matrix::perspective`].
  pub fn perspective(&mut self, fovy_deg: f32, aspect: f32, z_near: f32, z_far: f32) -> &mut Self {
    self.apply(&Matrix::perspective(fovy_deg, aspect, z_near, z_far))
  }

  /// Apply an orthographic projection. See [`Matrix::orthographic`].
  pub fn orthographic(
    &mut self,
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
    z_near: f32,
    z_far: f32,
  ) -> &mut Self {
    self.apply(&Matrix::orthographic(
      left, right, bottom, top, z_near, z_far,
    ))
  }

  /// Open a scope by recording the current depth.
  pub fn enter(&mut self) {
    log::trace!("entering scope at depth {}", self.saved.len());
    self.scopes.push(self.saved.len());
  }

  /// Close the innermost scope.
  ///
  /// The saved stack is truncated back to the depth recorded by [`MatrixStack::enter`] and the
  /// current matrix becomes the last saved one, or the identity if nothing is saved.
  ///
  /// If the saved stack got shorter than the recorded depth, [`StackError::ScopeBroken`] is
  /// returned. The stack is restored anyway.
  pub fn exit(&mut self) -> Result<(), StackError> {
    let expected = self.scopes.pop().ok_or(StackError::NoScope)?;
    let actual = self.saved.len();

    log::trace!("exiting scope: depth {} -> {}", actual, expected);

    self.saved.truncate(expected);
    self.current = self.saved.last().copied().unwrap_or_default();

    if actual < expected {
      Err(StackError::ScopeBroken { expected, actual })
    } else {
      Ok(())
    }
  }

  /// Open a scope and return a guard closing it when dropped.
  pub fn scope(&mut self) -> StackScope<'_> {
    self.enter();
    StackScope {
      stack: self,
      open: true,
    }
  }

  /// Run `f` inside a scope.
  ///
  /// The scope is closed whatever `f` returns. An error from `f` takes precedence over an error
  /// from closing the scope.
  pub fn with_scope<F, R, E>(&mut self, f: F) -> Result<R, E>
  where
    F: FnOnce(&mut MatrixStack) -> Result<R, E>,
    E: From<StackError>,
  {
    let mut scope = self.scope();
    let r = f(&mut *scope);
    let closed = scope.close();

    let r = r?;
    closed?;
    Ok(r)
  }
}

/// An open scope on a [`MatrixStack`].
///
/// The scope is closed when the guard is dropped. Errors occurring at that time are logged; call
/// [`StackScope::close`] instead to handle them.
#[derive(Debug)]
pub struct StackScope<'a> {
  stack: &'a mut MatrixStack,
  open: bool,
}

impl<'a> StackScope<'a> {
  /// Close the scope.
  pub fn close(mut self) -> Result<(), StackError> {
    self.open = false;
    self.stack.exit()
  }
}

impl<'a> Deref for StackScope<'a> {
  type Target = MatrixStack;

  fn deref(&self) -> &Self::Target {
    self.stack
  }
}

impl<'a> DerefMut for StackScope<'a> {
  fn deref_mut(&mut self) -> &mut Self::Target {
    self.stack
  }
}

impl<'a> Drop for StackScope<'a> {
  fn drop(&mut self) {
    if self.open {
      if let Err(e) = self.stack.exit() {
        log::error!("cannot close matrix stack scope: {}", e);
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::vector::Point;
  use approx::assert_relative_eq;

  #[test]
  fn starts_empty() {
    let stack = MatrixStack::new();

    assert_eq!(*stack.top(), Matrix::identity());
    assert_eq!(stack.depth(), 0);
  }

  #[test]
  fn transforms_checkpoint() {
    let mut stack = MatrixStack::new();
    stack.rotate_x(10.).translate([1., 2., 3.]).scale([2., 2., 2.]);

    assert_eq!(stack.depth(), 3);
  }

  #[test]
  fn translate_moves_origin() {
    let mut stack = MatrixStack::new();
    stack.translate([4., -1., 2.5]);

    assert_eq!(Point::origin() * *stack.top(), Point::new(4., -1., 2.5));
  }

  #[test]
  fn last_transform_applies_first() {
    let mut stack = MatrixStack::new();
    stack.rotate_y(90.).translate([0., 0., 5.]);

    assert_relative_eq!(
      Point::origin() * *stack.top(),
      Point::new(5., 0., 0.),
      epsilon = 1e-6
    );
  }

  #[test]
  fn pop_restores_saved() {
    let mut stack = MatrixStack::new();
    stack.translate([1., 0., 0.]);
    let translated = *stack.top();
    stack.scale([3., 3., 3.]);

    assert_eq!(stack.pop().map(|m| m != translated), Ok(true));
    assert_eq!(stack.pop(), Ok(translated));
    assert_eq!(*stack.top(), translated);
    assert_eq!(stack.pop(), Err(StackError::Underflow));
  }

  #[test]
  fn push_then_pop() {
    let mut stack = MatrixStack::new();
    stack.push();

    assert_eq!(stack.pop(), Ok(Matrix::identity()));
  }

  #[test]
  fn nested_scopes() {
    let mut stack = MatrixStack::new();
    stack.rotate_x(30.).rotate_y(30.).rotate_z(30.);
    let outer = *stack.top();

    stack.enter();
    stack.translate([1., 0., 0.]);
    let inner = *stack.top();

    stack.enter();
    stack.scale([2., 2., 2.]).translate([0., 1., 0.]);
    assert_eq!(stack.depth(), 6);

    assert_eq!(stack.exit(), Ok(()));
    assert_eq!(stack.depth(), 4);
    assert_eq!(*stack.top(), inner);

    assert_eq!(stack.exit(), Ok(()));
    assert_eq!(stack.depth(), 3);
    assert_eq!(*stack.top(), outer);
  }

  #[test]
  fn nested_scopes_with_pushes_from_empty() {
    let mut stack = MatrixStack::new();

    stack.enter();
    stack.translate([0., 0., -10.]).push();
    let outer = *stack.top();
    assert_eq!(stack.depth(), 2);

    stack.enter();
    stack.rotate_y(45.).push().push();
    assert_eq!(stack.depth(), 5);

    assert_eq!(stack.exit(), Ok(()));
    assert_eq!(stack.depth(), 2);
    assert_eq!(*stack.top(), outer);

    assert_eq!(stack.exit(), Ok(()));
    assert_eq!(stack.depth(), 0);
    assert_eq!(*stack.top(), Matrix::identity());
  }

  #[test]
  fn exiting_to_empty_resets_identity() {
    let mut stack = MatrixStack::new();
    stack.enter();
    stack.translate([1., 1., 1.]);

    assert_eq!(stack.exit(), Ok(()));
    assert_eq!(*stack.top(), Matrix::identity());
  }

  #[test]
  fn exit_without_scope() {
    assert_eq!(MatrixStack::new().exit(), Err(StackError::NoScope));
  }

  #[test]
  fn broken_scope_still_restores() {
    let mut stack = MatrixStack::new();
    stack.translate([1., 0., 0.]).translate([0., 1., 0.]);
    stack.enter();
    stack.pop().unwrap();
    stack.pop().unwrap();

    assert_eq!(
      stack.exit(),
      Err(StackError::ScopeBroken {
        expected: 2,
        actual: 0
      })
    );
    assert_eq!(stack.depth(), 0);
    assert_eq!(*stack.top(), Matrix::identity());
  }

  #[test]
  fn guard_restores_on_drop() {
    let mut stack = MatrixStack::new();
    stack.translate([0., 0., -3.]);
    let before = stack.clone();

    {
      let mut scope = stack.scope();
      scope.rotate_z(45.).scale([0.5, 0.5, 0.5]);
      assert_eq!(scope.depth(), 3);
    }

    assert_eq!(stack, before);
  }

  #[test]
  fn guard_close() {
    let mut stack = MatrixStack::new();
    let mut scope = stack.scope();
    scope.translate([1., 0., 0.]);

    assert_eq!(scope.close(), Ok(()));
    assert_eq!(stack.depth(), 0);
  }

  #[test]
  fn with_scope_returns_closure_value() {
    let mut stack = MatrixStack::new();
    let depth = stack.with_scope(|s| -> Result<usize, StackError> {
      s.translate([1., 0., 0.]).translate([0., 1., 0.]);
      Ok(s.depth())
    });

    assert_eq!(depth, Ok(2));
    assert_eq!(stack.depth(), 0);
  }

  #[test]
  fn with_scope_reports_broken_scope() {
    let mut stack = MatrixStack::new();
    stack.translate([1., 0., 0.]);

    let r = stack.with_scope(|s| -> Result<(), StackError> {
      s.pop()?;
      Ok(())
    });

    assert_eq!(
      r,
      Err(StackError::ScopeBroken {
        expected: 1,
        actual: 0
      })
    );
  }

  #[test]
  fn with_scope_prefers_closure_error() {
    let mut stack = MatrixStack::new();

    let r = stack.with_scope(|s| -> Result<(), StackError> {
      s.pop()?;
      Ok(())
    });

    assert_eq!(r, Err(StackError::Underflow));
    assert_eq!(stack.exit(), Err(StackError::NoScope));
  }

  #[test]
  fn rotate_around_null_axis() {
    let mut stack = MatrixStack::new();

    assert!(stack.rotate(Vector::default(), 90.).is_err());
    assert_eq!(stack.depth(), 0);
  }
}
