use clap::Parser;
use log::{error, info};

mod cli;
mod config;
mod logger;
mod output;

use cli::Args;
use config::{load_config, validate_config, RenderConfig};
use fogpath::scenes::two_spheres_and_fog;
use fogpath::tracer::RayTracer;
use logger::init_logger;
use output::save_image_as_png;

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => {
            info!("Loading configuration from {}", path);
            load_config(path)?
        }
        None => RenderConfig::default(),
    };
    config.apply_args(args);
    validate_config(&config)?;

    info!(
        "Image resolution: {}x{}, edge samples per pixel: {}",
        config.width, config.height, config.samples_per_pixel
    );

    let scene = two_spheres_and_fog(config.fog.to_fog());
    let tracer = RayTracer::new(&scene, config.tracer);
    let image = scene.camera.render(&tracer, &config.image_settings());

    let statistics = tracer.statistics();
    info!(
        "Rays: {} primary, {} total, deepest level {}",
        statistics.primary_rays(),
        statistics.all_rays(),
        statistics.deepest_level()
    );

    save_image_as_png(&image, &config.output_path);
    Ok(())
}

fn main() {
    let args = Args::parse();

    init_logger(args.debug_level.clone().into());

    // Log application startup with version information
    info!("FogPath - Git Version {} ({})", env!("GIT_HASH"), env!("GIT_DATE"));

    if let Err(e) = run(&args) {
        error!("{}", e);
        std::process::exit(1);
    }
}
