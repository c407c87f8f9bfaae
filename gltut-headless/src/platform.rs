//! Headless draw target implementation.

use gltut::Matrix;
use gltut_examples::{DrawTarget, Mesh};

/// Draw target logging every matrix it receives instead of rendering.
#[derive(Debug)]
pub struct HeadlessTarget {
  name: String,
  frame: u32,
  draws: usize,
  total_draws: usize,
}

impl HeadlessTarget {
  pub fn new(name: impl Into<String>) -> Self {
    Self {
      name: name.into(),
      frame: 0,
      draws: 0,
      total_draws: 0,
    }
  }

  /// Start a new frame.
  pub fn begin_frame(&mut self, frame: u32, time: f32) {
    self.frame = frame;
    self.draws = 0;
    log::info!("{}: frame {} (t = {:.3}s)", self.name, frame, time);
  }

  /// End the current frame.
  pub fn end_frame(&mut self) {
    self.total_draws += self.draws;
    log::info!(
      "{}: frame {} done, {} draw call(s)",
      self.name,
      self.frame,
      self.draws
    );
  }

  /// Number of draw calls since the target was created.
  pub fn total_draws(&self) -> usize {
    self.total_draws
  }
}

impl DrawTarget for HeadlessTarget {
  fn set_camera_to_clip(&mut self, matrix: [f32; 16]) {
    log::info!("camera-to-clip:\n{}", unflatten(&matrix));
  }

  fn set_world_to_camera(&mut self, matrix: [f32; 16]) {
    log::info!("world-to-camera:\n{}", unflatten(&matrix));
  }

  fn draw(&mut self, mesh: Mesh, model: [f32; 16]) {
    log::info!("draw #{} {:?}:\n{}", self.draws, mesh, unflatten(&model));
    self.draws += 1;
  }
}

// Rebuild a matrix from its row-major flat form.
fn unflatten(flat: &[f32; 16]) -> Matrix {
  let mut rows = [[0.; 4]; 4];

  for (row, chunk) in rows.iter_mut().zip(flat.chunks_exact(4)) {
    row.copy_from_slice(chunk);
  }

  Matrix::from(rows)
}
