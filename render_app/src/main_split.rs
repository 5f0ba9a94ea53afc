//! Render the demo scene twice into one frame: orthographic on the left,
//! perspective on the right
//!
//! Usage: `split_view [config.toml|config.ron]`. Only the frame, render,
//! logging and output settings of the config are used; both cameras are
//! fixed.

use std::path::PathBuf;
use std::process::ExitCode;

use raster_engine::foundation::logging;
use raster_engine::prelude::*;

use render_app::{demo_scene, AppError};

/// Background of the orthographic half, to make the split visible
const LEFT_BACKGROUND: Rgb8 = Rgb8::new(24, 16, 16);

fn run() -> Result<(), AppError> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(PathBuf::from(path))?,
        None => demo_scene::default_config("split_view.ppm"),
    };
    config.validate()?;
    logging::init_with_level(&config.log_level);

    let (left_width, right_width) = demo_scene::split_widths(&config.frame)?;
    let height = config.frame.height;
    let aspect = left_width as f32 / height as f32;
    let pipeline = Pipeline::new(config.render);

    let mut scene = demo_scene::build(demo_scene::orthographic_camera(aspect).to_camera()?);
    let mut frame = config.frame.create_framebuffer()?;
    {
        let mut left = frame.viewport(0, 0, left_width, height)?;
        left.set_background(LEFT_BACKGROUND);
        left.clear();
        let stats = pipeline.render(&scene, &mut left)?;
        log::info!("Orthographic half: {stats}");
    }

    scene.set_camera(demo_scene::perspective_camera(aspect).to_camera()?);
    {
        let mut right = frame.viewport(left_width, 0, right_width, height)?;
        let stats = pipeline.render(&scene, &mut right)?;
        log::info!("Perspective half: {stats}");
    }

    config.output.write(&frame)?;
    log::info!("Wrote {}", config.output.path.display());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("split_view: {e}");
            ExitCode::FAILURE
        }
    }
}
