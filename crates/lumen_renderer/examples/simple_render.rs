//! Simple ray tracer example.
//!
//! Renders a mirror sphere, a matte sphere and a torus over a floor and
//! saves the result in PPM format.

use lumen_renderer::{
    render, save_ppm, Camera, Color, Light, Material, Plane, RenderConfig, Scene, Sphere, Torus, DVec3,
};

fn main() {
    println!("Lumen Ray Tracer - Simple Example");
    println!("=================================");

    let config = RenderConfig::default();

    let start = std::time::Instant::now();
    let scene = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let camera = Camera::builder()
        .with_resolution(512, 384)
        .with_position(
            DVec3::new(0.0, 1.0, 6.0), // eye
            DVec3::new(0.0, 0.0, 0.0), // look_at
            DVec3::new(0.0, 1.0, 0.0), // up
        )
        .with_lens(50.0, 1.0)
        .build()
        .expect("Invalid camera");

    println!(
        "Rendering {}x{} with {} workers...",
        camera.width(),
        camera.height(),
        config.workers
    );

    let start = std::time::Instant::now();
    let image = render(&camera, &scene, &config).expect("Render failed");
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.ppm";
    save_ppm(&image, filename).expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> Scene {
    let mut scene = Scene::new();

    // Floor
    scene.add_shape(Plane::new(
        DVec3::new(0.0, -1.0, 0.0),
        DVec3::Y,
        Material::new(Color::splat(0.1), Color::splat(0.5), Color::ZERO, Color::splat(0.2), 10.0),
    ));

    scene.add_shape(Sphere::new(DVec3::new(-1.2, 0.0, 0.0), 1.0, Material::mirror()));
    scene.add_shape(Sphere::new(
        DVec3::new(1.3, -0.4, 0.8),
        0.6,
        Material::new(Color::new(0.1, 0.0, 0.0), Color::new(0.8, 0.2, 0.2), Color::ONE, Color::ZERO, 60.0),
    ));
    scene.add_shape(Torus::new(
        DVec3::new(1.3, -0.4, 0.8),
        1.0,
        0.15,
        Material::new(Color::splat(0.05), Color::new(0.2, 0.3, 0.8), Color::ONE, Color::splat(0.3), 100.0),
    ));

    scene.add_light(Light::new(DVec3::new(-3.0, 4.0, 4.0), Color::splat(0.6)));
    scene.add_light(Light::new(DVec3::new(3.0, 2.0, 5.0), Color::splat(0.3)));

    println!("Created {} shapes", scene.len());
    scene
}
