use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;

use lumen_core::SceneDescription;
use lumen_renderer::{render, save_image, Camera, RenderConfig, Scene};

mod cli;

use cli::Args;

/// Build the render configuration from defaults and command line overrides.
fn render_config(args: &Args) -> RenderConfig {
    let mut config = RenderConfig::default();
    if let Some(workers) = args.workers {
        config.workers = workers;
    }
    if let Some(max_depth) = args.max_depth {
        config.max_depth = max_depth;
    }
    if let Some(bucket_size) = args.bucket_size {
        config.bucket_size = bucket_size;
    }
    config.supersample = args.supersample;
    config
}

/// Warn about a viewport the renderer will reject, naming the overrides
/// that produced it.
fn check_viewport(args: &Args, width: u32, height: u32, bucket_size: u32) -> bool {
    if bucket_size == 0 || (width % bucket_size == 0 && height % bucket_size == 0) {
        return true;
    }

    let source = if args.width.is_some() || args.height.is_some() {
        "--width/--height override"
    } else {
        "scene viewport"
    };
    log::warn!(
        "{} {}x{} is not a multiple of the bucket size {}",
        source,
        width,
        height,
        bucket_size
    );
    false
}

fn load_description(args: &Args) -> Result<SceneDescription> {
    let mut description = match &args.scene {
        Some(path) => lumen_core::load_scene(path)
            .with_context(|| format!("Failed to load scene {}", path.display()))?,
        None => {
            log::info!("No scene file given, rendering the demo scene");
            SceneDescription::demo()
        }
    };

    if let Some(width) = args.width {
        description.camera.width = width;
    }
    if let Some(height) = args.height {
        description.camera.height = height;
    }

    Ok(description)
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_default_env()
        .filter_level(LevelFilter::from(args.log_level))
        .init();

    log::info!("Starting Lumen");

    let config = render_config(&args);
    let description = load_description(&args)?;
    check_viewport(
        &args,
        description.camera.width,
        description.camera.height,
        config.bucket_size,
    );

    let start = Instant::now();
    let scene = Scene::from_description(&description, &config.torus);
    let camera = Camera::from_description(&description.camera).context("Invalid camera")?;
    log::info!(
        "Scene ready in {:?}: {} shapes, {} lights",
        start.elapsed(),
        scene.len(),
        scene.lights().len()
    );

    let image = render(&camera, &scene, &config).context("Render failed")?;

    save_image(&image, &args.output)
        .with_context(|| format!("Failed to save {}", args.output.display()))?;

    Ok(())
}
