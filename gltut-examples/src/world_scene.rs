//! This tutorial shows a small world: a ground plane, a forest and a Parthenon, seen from a camera
//! orbiting around a target point.
//!
//! The world-to-camera matrix is a look-at matrix computed from the camera position, resolved
//! from spherical coordinates relative to the target, and the target itself. Models are drawn
//! with model-to-world matrices.
//!
//! Controls (hold shift for finer moves):
//!
//! - <w> / <s>: move the target forward / backward.
//! - <a> / <d>: move the target left / right.
//! - <q> / <e>: move the target up / down.
//! - <i> / <k>: orbit up / down.
//! - <j> / <l>: orbit left / right.
//! - <o> / <u>: zoom in / out.
//! - <space>: show / hide the target and log the camera.
//! - <escape>: quit.

use crate::{
  shared::aspect_ratio, DrawTarget, Example, ExampleError, InputAction, LoopFeedback, Mesh,
};
use gltut::{look_at, Matrix, MatrixStack, Point, Spherical, Vector};

const FOV_DEG: f32 = 45.;
const Z_NEAR: f32 = 1.;
const Z_FAR: f32 = 1000.;

const MOVE_SPEED: f32 = 4.;
const ORBIT_SPEED: f32 = 11.25;
const ZOOM_SPEED: f32 = 5.;
const FINE_MODIFIER: f32 = 0.1;

const MIN_THETA: f32 = -78.75;
const MAX_THETA: f32 = -1.;
const MIN_RADIUS: f32 = 5.;

const PARTHENON_WIDTH: f32 = 14.;
const PARTHENON_LENGTH: f32 = 20.;
const PARTHENON_COLUMN_HEIGHT: f32 = 5.;
const PARTHENON_BASE_HEIGHT: f32 = 1.;
const PARTHENON_TOP_HEIGHT: f32 = 2.;
const COLUMN_BASE_HEIGHT: f32 = 0.25;
const PARTHENON_POSITION: [f32; 3] = [20., 0., -10.];

/// A tree of the forest.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tree {
  pub x: f32,
  pub z: f32,
  /// Height of the trunk, in world units.
  pub trunk_height: f32,
  /// Height of the foliage cone on top of the trunk.
  pub cone_height: f32,
}

impl Tree {
  /// A tree of the default size at `(x, 0, z)`.
  pub fn new(x: f32, z: f32) -> Self {
    Tree {
      x,
      z,
      trunk_height: 2.,
      cone_height: 3.,
    }
  }
}

pub struct LocalExample {
  camera_target: Point,
  camera_position: Spherical,
  draw_look_at_point: bool,
  forest: Vec<Tree>,
  aspect: f32,
}

impl LocalExample {
  /// Same scene, with a forest.
  pub fn with_forest(forest: impl Into<Vec<Tree>>) -> Self {
    LocalExample {
      forest: forest.into(),
      ..Self::bootstrap()
    }
  }

  /// Point the camera looks at.
  pub fn camera_target(&self) -> Point {
    self.camera_target
  }

  /// Camera position relative to its target.
  pub fn camera_position(&self) -> Spherical {
    self.camera_position
  }

  /// Whether the look-at point is shown.
  pub fn draws_look_at_point(&self) -> bool {
    self.draw_look_at_point
  }

  fn on_key(&mut self, key: char, shift: bool) {
    let modifier = if shift { FINE_MODIFIER } else { 1. };
    let step = MOVE_SPEED * modifier;
    let angle = ORBIT_SPEED * modifier;
    let zoom = ZOOM_SPEED * modifier;

    let target = &mut self.camera_target;
    let camera = &mut self.camera_position;

    match key {
      'W' => target.set_z(target.z() - step),
      'S' => target.set_z(target.z() + step),
      'D' => target.set_x(target.x() + step),
      'A' => target.set_x(target.x() - step),
      'E' => target.set_y(target.y() - step),
      'Q' => target.set_y(target.y() + step),
      'I' => camera.theta_deg -= angle,
      'K' => camera.theta_deg += angle,
      'J' => camera.phi_deg -= angle,
      'L' => camera.phi_deg += angle,
      'O' => camera.radius -= zoom,
      'U' => camera.radius += zoom,
      _ => (),
    }
  }

  fn toggle_look_at_point(&mut self) {
    self.draw_look_at_point = !self.draw_look_at_point;

    let target = self.camera_target;
    let camera = self.camera_position;
    log::info!("target: {}, {}, {}", target.x(), target.y(), target.z());
    log::info!(
      "position: {}, {}, {}",
      camera.phi_deg,
      camera.theta_deg,
      camera.radius
    );
  }

  // keep the camera above the ground and out of the target
  fn constrain_camera(&mut self) {
    let camera = &mut self.camera_position;
    camera.theta_deg = camera.theta_deg.clamp(MIN_THETA, MAX_THETA);
    camera.radius = camera.radius.max(MIN_RADIUS);

    let y = self.camera_target.y().max(0.);
    self.camera_target.set_y(y);
  }

  /// Resolved camera position, in world space.
  pub fn camera_world_position(&self) -> Point {
    self.camera_position.around(self.camera_target)
  }

  fn draw_scene<T>(&self, stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    // ground
    stack.with_scope(|stack| {
      stack.scale([100., 1., 100.]);
      draw_mesh(stack, target, Mesh::Plane)
    })?;

    for tree in &self.forest {
      stack.with_scope(|stack| {
        stack.translate([tree.x, 0., tree.z]);
        draw_tree(stack, target, tree.trunk_height, tree.cone_height)
      })?;
    }

    stack.with_scope(|stack| {
      stack.translate(PARTHENON_POSITION);
      draw_parthenon(stack, target)
    })
  }

  fn draw_target_marker<T>(
    &self,
    stack: &mut MatrixStack,
    target: &mut T,
    camera: Point,
  ) -> Result<(), ExampleError>
  where
    T: DrawTarget,
  {
    let distance = (self.camera_target - camera).length();

    // drawn in camera space
    target.set_world_to_camera(Matrix::identity().to_flat());

    stack.with_scope(|stack| {
      stack.translate([0., 0., -distance]).scale([1., 1., 1.]);
      draw_mesh(stack, target, Mesh::ColoredCube)
    })
  }
}

fn draw_mesh<T>(stack: &MatrixStack, target: &mut T, mesh: Mesh) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  target.draw(mesh, stack.top().to_flat());
  Ok(())
}

fn draw_tree<T>(
  stack: &mut MatrixStack,
  target: &mut T,
  trunk_height: f32,
  cone_height: f32,
) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  stack.with_scope(|stack| {
    stack.scale([1., trunk_height, 1.]).translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::Cylinder)
  })?;

  stack.with_scope(|stack| {
    stack
      .translate([0., trunk_height, 0.])
      .scale([3., cone_height, 3.]);
    draw_mesh(stack, target, Mesh::Cone)
  })
}

fn draw_column<T>(stack: &mut MatrixStack, target: &mut T, height: f32) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  // bottom
  stack.with_scope(|stack| {
    stack
      .scale([1., COLUMN_BASE_HEIGHT, 1.])
      .translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::TintedCube)
  })?;

  // top
  stack.with_scope(|stack| {
    stack
      .translate([0., height - COLUMN_BASE_HEIGHT, 0.])
      .scale([1., COLUMN_BASE_HEIGHT, 1.])
      .translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::TintedCube)
  })?;

  // shaft
  stack.with_scope(|stack| {
    stack
      .translate([0., COLUMN_BASE_HEIGHT, 0.])
      .scale([1., height - COLUMN_BASE_HEIGHT * 2., 0.8])
      .translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::TintedCube)
  })
}

fn draw_column_at<T>(
  stack: &mut MatrixStack,
  target: &mut T,
  position: [f32; 3],
) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  stack.with_scope(|stack| {
    stack.translate(position);
    draw_column(stack, target, PARTHENON_COLUMN_HEIGHT)
  })
}

fn draw_parthenon<T>(stack: &mut MatrixStack, target: &mut T) -> Result<(), ExampleError>
where
  T: DrawTarget,
{
  // base
  stack.with_scope(|stack| {
    stack
      .scale([PARTHENON_WIDTH, PARTHENON_BASE_HEIGHT, PARTHENON_LENGTH])
      .translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::TintedCube)
  })?;

  // top
  stack.with_scope(|stack| {
    stack
      .translate([0., PARTHENON_COLUMN_HEIGHT + PARTHENON_BASE_HEIGHT, 0.])
      .scale([PARTHENON_WIDTH, PARTHENON_TOP_HEIGHT, PARTHENON_LENGTH])
      .translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::TintedCube)
  })?;

  let front_z = PARTHENON_LENGTH / 2. - 1.;
  let right_x = PARTHENON_WIDTH / 2. - 1.;

  // front and back rows
  for i in 0..(PARTHENON_WIDTH / 2.) as u32 {
    let x = 2. * i as f32 - PARTHENON_WIDTH / 2. + 1.;

    draw_column_at(stack, target, [x, PARTHENON_BASE_HEIGHT, front_z])?;
    draw_column_at(stack, target, [x, PARTHENON_BASE_HEIGHT, -front_z])?;
  }

  // sides, without the corners drawn above
  for i in 1..((PARTHENON_LENGTH - 2.) / 2.) as u32 {
    let z = 2. * i as f32 - PARTHENON_LENGTH / 2. + 1.;

    draw_column_at(stack, target, [right_x, PARTHENON_BASE_HEIGHT, z])?;
    draw_column_at(stack, target, [-right_x, PARTHENON_BASE_HEIGHT, z])?;
  }

  // interior
  stack.with_scope(|stack| {
    stack
      .translate([0., 1., 0.])
      .scale([
        PARTHENON_WIDTH - 6.,
        PARTHENON_COLUMN_HEIGHT,
        PARTHENON_LENGTH - 6.,
      ])
      .translate([0., 0.5, 0.]);
    draw_mesh(stack, target, Mesh::ColoredCube)
  })?;

  // headpiece
  stack.with_scope(|stack| {
    stack
      .translate([
        0.,
        PARTHENON_COLUMN_HEIGHT + PARTHENON_BASE_HEIGHT + PARTHENON_TOP_HEIGHT / 2.,
        PARTHENON_LENGTH / 2.,
      ])
      .rotate_x(-135.)
      .rotate_y(45.);
    draw_mesh(stack, target, Mesh::ColoredCube)
  })
}

impl Example for LocalExample {
  fn bootstrap() -> Self {
    LocalExample {
      camera_target: Point::new(0., 0.4, 0.),
      camera_position: Spherical::new(67.5, -46., 150.),
      draw_look_at_point: false,
      forest: Vec::new(),
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

        InputAction::MainToggle => {
          self.toggle_look_at_point();
          self.constrain_camera();
        }

        InputAction::Key { key, shift } => {
          self.on_key(key, shift);
          self.constrain_camera();
        }

        InputAction::Resized { width, height } => self.aspect = aspect_ratio(width, height),
      }
    }

    let mut projection = MatrixStack::new();
    projection.perspective(FOV_DEG, self.aspect, Z_NEAR, Z_FAR);
    target.set_camera_to_clip(projection.top().to_flat());

    let camera = self.camera_world_position();
    let mut world_to_camera = MatrixStack::new();
    world_to_camera.load(look_at(camera, self.camera_target, Vector::new(0., 1., 0.))?);
    target.set_world_to_camera(world_to_camera.top().to_flat());

    let mut model = MatrixStack::new();
    self.draw_scene(&mut model, target)?;

    if self.draw_look_at_point {
      self.draw_target_marker(&mut model, target, camera)?;
    }

    Ok(LoopFeedback::Continue(self))
  }
}
