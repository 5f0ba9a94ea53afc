//! Render the demo scene to an image file
//!
//! Usage: `render_scene [config.toml|config.ron]`. Without a config file the
//! demo renders 640x480 through a perspective camera into `render.ppm`.

use std::path::PathBuf;
use std::process::ExitCode;

use raster_engine::foundation::logging;
use raster_engine::prelude::*;

use render_app::{demo_scene, AppError};

fn run() -> Result<(), AppError> {
    let config = match std::env::args_os().nth(1) {
        Some(path) => ApplicationConfig::load_from_file(PathBuf::from(path))?,
        None => demo_scene::default_config("render.ppm"),
    };
    config.validate()?;
    logging::init_with_level(&config.log_level);

    log::info!(
        "Rendering demo scene at {}x{} ({:?} camera)",
        config.frame.width,
        config.frame.height,
        config.camera.projection
    );
    let scene = demo_scene::build(config.camera.to_camera()?);
    let mut frame = config.frame.create_framebuffer()?;
    let stats = Pipeline::new(config.render).render(&scene, &mut frame)?;

    config.output.write(&frame)?;
    log::info!("Wrote {} ({stats})", config.output.path.display());
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("render_scene: {e}");
            ExitCode::FAILURE
        }
    }
}
