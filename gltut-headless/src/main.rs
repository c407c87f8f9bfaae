mod platform;

use gltut_examples::{Example, ExampleError, InputAction, LoopFeedback};
use platform::HeadlessTarget;
use std::{iter, process};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
pub struct CLIOpts {
  #[structopt(short, long)]
  /// List available examples.
  list_examples: bool,

  #[structopt(short, long, default_value = "1")]
  /// Number of frames to render.
  frames: u32,

  #[structopt(short, long, default_value = "0.016666668")]
  /// Time, in seconds, between two frames.
  time_step: f32,

  #[structopt(long, default_value = "500")]
  /// Width of the virtual framebuffer.
  width: u32,

  #[structopt(long, default_value = "500")]
  /// Height of the virtual framebuffer.
  height: u32,

  #[structopt(short, long, default_value = "")]
  /// Keys pressed during the first frame, one character per press. Upper-case letters are pressed
  /// with shift and a space is the main toggle.
  keys: String,

  /// Example to run.
  example: Option<String>,
}

/// Macro to declaratively add examples.
macro_rules! examples {
  ($($ex_name:literal, $test_ident:ident),* $(,)?) => {
    fn show_available_examples() {
      println!("available examples:");
      $( println!("  - {}", $ex_name); )*
    }

    // create a function that will run an example based on its name
    fn pick_and_run_example(cli_opts: CLIOpts) -> Result<(), ExampleError> {
      let example_name = cli_opts.example.as_deref();
      match example_name {
        $(
          Some($ex_name) => {
            run_example::<gltut_examples::$test_ident::LocalExample>(cli_opts, $ex_name).map(drop)
          }
        ),*

        _ => {
          log::error!("no example found");
          show_available_examples();
          Ok(())
        }
      }
    }
  }
}

// Run an example and return the number of draw calls it issued.
fn run_example<E>(cli_opts: CLIOpts, name: &str) -> Result<usize, ExampleError>
where
  E: Example,
{
  let mut target = HeadlessTarget::new(name);

  if cli_opts.frames == 0 {
    log::info!("{}: no frame to render", name);
    return Ok(0);
  }

  let example = E::bootstrap();

  // the first frame gets the framebuffer size and the scripted keys
  let actions = iter::once(InputAction::Resized {
    width: cli_opts.width,
    height: cli_opts.height,
  })
  .chain(cli_opts.keys.chars().map(InputAction::from_char));

  target.begin_frame(0, 0.);
  let feedback = example.render_frame(0., actions, &mut target)?;
  target.end_frame();

  let mut example = match feedback {
    LoopFeedback::Exit => return Ok(target.total_draws()),
    LoopFeedback::Continue(example) => example,
  };

  for frame in 1..cli_opts.frames {
    let t = frame as f32 * cli_opts.time_step;

    target.begin_frame(frame, t);
    let feedback = example.render_frame(t, iter::empty(), &mut target)?;
    target.end_frame();

    if let LoopFeedback::Continue(stepped) = feedback {
      example = stepped;
    } else {
      break;
    }
  }

  log::info!("{}: {} draw call(s) in total", name, target.total_draws());

  Ok(target.total_draws())
}

examples! {
  "hierarchy", hierarchy,
  "rotations", rotations,
  "scale", scale,
  "world-scene", world_scene,
}

fn main() {
  env_logger::builder()
    .filter_level(log::LevelFilter::Info)
    .parse_default_env()
    .init();
  let cli_opts = CLIOpts::from_args();

  if cli_opts.list_examples {
    show_available_examples();
  } else if let Err(e) = pick_and_run_example(cli_opts) {
    log::error!("{}", e);
    process::exit(1);
  }
}
