use approx::assert_relative_eq;
use gltut::{Matrix, Point};
use gltut_examples::{
  hierarchy::{self, Joint},
  rotations, scale,
  world_scene::{self, Tree},
  DrawTarget, Example, InputAction, LoopFeedback, Mesh,
};
use std::iter;

// Draw target keeping everything it is given.
#[derive(Debug, Default)]
struct Recorder {
  camera_to_clip: Vec<[f32; 16]>,
  world_to_camera: Vec<[f32; 16]>,
  draws: Vec<(Mesh, [f32; 16])>,
}

impl DrawTarget for Recorder {
  fn set_camera_to_clip(&mut self, matrix: [f32; 16]) {
    self.camera_to_clip.push(matrix);
  }

  fn set_world_to_camera(&mut self, matrix: [f32; 16]) {
    self.world_to_camera.push(matrix);
  }

  fn draw(&mut self, mesh: Mesh, model: [f32; 16]) {
    self.draws.push((mesh, model));
  }
}

fn unflatten(m: &[f32; 16]) -> Matrix {
  let mut rows = [[0.; 4]; 4];

  for (i, x) in m.iter().enumerate() {
    rows[i / 4][i % 4] = *x;
  }

  Matrix::from(rows)
}

fn keys(s: &str) -> impl Iterator<Item = InputAction> + '_ {
  s.chars().map(InputAction::from_char)
}

fn frame<E>(example: E, time: f32, actions: impl Iterator<Item = InputAction>) -> (E, Recorder)
where
  E: Example,
{
  let mut recorder = Recorder::default();

  match example.render_frame(time, actions, &mut recorder).unwrap() {
    LoopFeedback::Continue(example) => (example, recorder),
    LoopFeedback::Exit => panic!("tutorial exited"),
  }
}

#[test]
fn from_char() {
  assert_eq!(
    InputAction::from_char('a'),
    InputAction::Key {
      key: 'A',
      shift: false
    }
  );
  assert_eq!(
    InputAction::from_char('A'),
    InputAction::Key {
      key: 'A',
      shift: true
    }
  );
  assert_eq!(InputAction::from_char(' '), InputAction::MainToggle);
}

#[test]
fn quit() {
  let mut recorder = Recorder::default();
  let feedback = hierarchy::LocalExample::bootstrap()
    .render_frame(0., iter::once(InputAction::Quit), &mut recorder)
    .unwrap();

  assert!(matches!(feedback, LoopFeedback::Exit));
  assert!(recorder.draws.is_empty());
}

#[test]
fn hierarchy_draws_nine_boxes() {
  let (_, recorder) = frame(hierarchy::LocalExample::bootstrap(), 0., iter::empty());

  assert_eq!(recorder.camera_to_clip.len(), 1);
  assert_eq!(recorder.draws.len(), 9);
  assert!(recorder
    .draws
    .iter()
    .all(|(mesh, _)| *mesh == Mesh::ColoredCube));
}

#[test]
fn hierarchy_base_boxes() {
  let (_, recorder) = frame(hierarchy::LocalExample::bootstrap(), 0., iter::empty());

  // left base box: scaled, moved by (2, 0, 0), rotated by -45° around Y and moved to the base
  let m = Matrix::scaling([1., 1., 3.])
    * Matrix::translation([2., 0., 0.])
    * Matrix::rotation_y(-45.)
    * Matrix::translation([3., -5., -40.]);

  assert_relative_eq!(unflatten(&recorder.draws[0].1), m, epsilon = 1e-5);

  let center = Point::origin() * unflatten(&recorder.draws[1].1);
  let angle = f32::to_radians(-45.);
  assert_relative_eq!(
    center,
    Point::new(3. - 2. * angle.cos(), -5., -40. + 2. * angle.sin()),
    epsilon = 1e-4
  );
}

#[test]
fn hierarchy_joints_do_not_leak() {
  // the base boxes only depend on the base angle
  let (_, before) = frame(hierarchy::LocalExample::bootstrap(), 0., iter::empty());
  let (example, after) = frame(hierarchy::LocalExample::bootstrap(), 0., keys("wwrftgzqe"));

  assert_eq!(before.draws[0], after.draws[0]);
  assert_eq!(before.draws[1], after.draws[1]);
  assert_ne!(before.draws[2], after.draws[2]);
  assert_eq!(example.armature().angle(Joint::UpperArm), -11.25);
}

#[test]
fn hierarchy_keys() {
  let (example, _) = frame(hierarchy::LocalExample::bootstrap(), 0., keys("ggggggggggcEEEEEEEEEEEEEEEEEEEEEEE"));
  let armature = example.armature();

  assert_eq!(armature.angle(Joint::WristPitch), 0.);
  assert_eq!(armature.angle(Joint::WristRoll), 348.75);
  assert_eq!(armature.angle(Joint::FingerOpen), 9.);

  let (example, _) = frame(example, 0., keys("dddd"));
  assert_eq!(example.armature().angle(Joint::Base), 270.);
}

#[test]
fn hierarchy_aspect_from_resize() {
  let resize = iter::once(InputAction::Resized {
    width: 1000,
    height: 500,
  });
  let (_, recorder) = frame(hierarchy::LocalExample::bootstrap(), 0., resize);
  let camera_to_clip = unflatten(&recorder.camera_to_clip[0]);

  assert_relative_eq!(
    camera_to_clip,
    Matrix::perspective(45., 2., 1., 61.),
    epsilon = 1e-5
  );
}

#[test]
fn rotations_instances() {
  let (_, recorder) = frame(rotations::LocalExample::bootstrap(), 1.5, iter::empty());

  assert_eq!(recorder.draws.len(), 5);

  for ((_, m), instance) in recorder.draws.iter().zip(&rotations::instances()) {
    assert_eq!(&m[12..15], &instance.offset[..]);
  }

  // half a turn around X
  assert_relative_eq!(
    unflatten(&recorder.draws[1].1),
    Matrix::rotation_x(180.) * Matrix::translation([-5., -5., -25.]),
    epsilon = 1e-5
  );
}

#[test]
fn scale_instances() {
  let (_, recorder) = frame(scale::LocalExample::bootstrap(), 1.5, iter::empty());

  assert_eq!(recorder.draws.len(), 5);

  let uniform = unflatten(&recorder.draws[3].1);
  assert_relative_eq!(uniform.get(0, 0).unwrap(), 4.);
  assert_eq!(uniform.rows()[3], [10., 10., -45., 1.]);
}

#[test]
fn world_scene_draws() {
  let (example, recorder) = frame(world_scene::LocalExample::bootstrap(), 0., iter::empty());

  assert_eq!(recorder.camera_to_clip.len(), 1);
  assert_eq!(recorder.world_to_camera.len(), 1);
  // ground + Parthenon (base, top, 30 columns of 3 pieces, interior, headpiece)
  assert_eq!(recorder.draws.len(), 95);
  assert_eq!(recorder.draws[0].0, Mesh::Plane);
  assert!(!example.draws_look_at_point());

  let world_to_camera = unflatten(&recorder.world_to_camera[0]);
  let target = example.camera_target() * world_to_camera;
  let distance = (example.camera_target() - example.camera_world_position()).length();

  assert_relative_eq!(target, Point::new(0., 0., -distance), epsilon = 1e-3);
  assert_relative_eq!(distance, 150., max_relative = 1e-5);
}

#[test]
fn world_scene_forest_and_marker() {
  let example = world_scene::LocalExample::with_forest(vec![Tree::new(-20., -30.), Tree::new(5., 12.)]);
  let (example, recorder) = frame(example, 0., keys(" "));

  assert!(example.draws_look_at_point());
  assert_eq!(recorder.draws.len(), 95 + 2 * 2 + 1);
  assert_eq!(recorder.draws[1].0, Mesh::Cylinder);
  assert_eq!(recorder.draws[2].0, Mesh::Cone);
  assert_eq!(recorder.world_to_camera.last(), Some(&Matrix::identity().to_flat()));

  let (mesh, marker) = recorder.draws[recorder.draws.len() - 1];
  assert_eq!(mesh, Mesh::ColoredCube);
  assert_relative_eq!(marker[14], -150., max_relative = 1e-5);
}

#[test]
fn world_scene_constraints() {
  let (example, _) = frame(
    world_scene::LocalExample::bootstrap(),
    0.,
    keys("iiiiiiiiiioooooooooooooooooooooooooooooooeeee"),
  );

  let camera = example.camera_position();
  assert_eq!(camera.theta_deg, -78.75);
  assert_eq!(camera.radius, 5.);
  assert_eq!(example.camera_target().y(), 0.);

  let (example, _) = frame(example, 0., keys("kkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkkk"));
  assert_eq!(example.camera_position().theta_deg, -1.);
}

#[test]
fn world_scene_fine_orbit() {
  let (example, _) = frame(world_scene::LocalExample::bootstrap(), 0., keys("LL"));

  assert_relative_eq!(example.camera_position().phi_deg, 67.5 + 2.25, epsilon = 1e-5);
}
