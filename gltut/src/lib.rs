//! # Homogeneous transforms for the OpenGL tutorials
//!
//! gltut is the small piece of linear algebra every tutorial of the series leans on: a 4×4
//! [`Matrix`], two homogeneous 4-component types, [`Vector`] and [`Point`], and a [`MatrixStack`]
//! used to build model-to-camera, world-to-camera and camera-to-clip matrices.
//!
//! It is _not_ a rendering crate. It doesn’t know about windows, shaders or buffers; the only
//! thing it hands to the graphics API is a flat array of 16 floats (see [`Matrix::to_flat`]).
//!
//! # Conventions
//!
//! Matrices are stored row-major and points are transformed as _row vectors_: `p' = p × M`. The
//! translation of an affine transform lives in row 3. This is the transpose of the usual
//! column-vector convention found in OpenGL literature, and because the memory layout of a
//! row-major `M` is the same as the column-major layout of `Mᵗ`, [`Matrix::to_flat`] can be
//! uploaded as-is with `transpose = GL_FALSE`.
//!
//! The consequence you need to keep in mind is the composition order. Composing a new transform
//! `N` onto an existing one `M` is done by _left-multiplying_: `N × M`. That is what every
//! operation of [`MatrixStack`] does, so the last operation you issue is the first one applied to
//! a vertex.
//!
//! All angles taken by this crate are expressed in **degrees**.
//!
//! # Points and vectors
//!
//! [`Vector`] and [`Point`] share the same representation but not the same algebra. A vector is a
//! displacement (`w = 0`), a point is a position (`w = 1`):
//!
//! - `Point - Point = Vector`
//! - `Point + Vector = Point` and `Point - Vector = Point`
//! - `Vector + Vector = Vector`
//!
//! Adding two points doesn’t mean anything in affine geometry and is not implemented.
//!
//! # Matrix stacks
//!
//! A [`MatrixStack`] holds a _current_ matrix and a stack of saved matrices. Every transform
//! operation both applies the transform and saves the result. Scopes ([`MatrixStack::scope`] and
//! [`MatrixStack::with_scope`]) restore the stack to the state it had when the scope was opened,
//! which is what you want to walk a hierarchy of nested local transforms.
//!
//! # Error handling
//!
//! Invalid operations, such as out-of-range element access or singular inversion, are programming
//! errors on the caller side. They are reported through `Result` and dedicated error types rather
//! than silently degraded into NaNs.

#![deny(missing_docs)]

pub mod camera;
pub mod matrix;
pub mod stack;
pub mod transform;
pub mod vector;

pub use crate::camera::{frustum_scale, look_at, orbit_position, LookAtError, Spherical};
pub use crate::matrix::{Matrix, MatrixError};
pub use crate::stack::{MatrixStack, StackError, StackScope};
pub use crate::vector::{Point, Vector, VectorError};
