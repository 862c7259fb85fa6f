use std::process;

use anyhow::Context;
use clap::Parser;
use log::{error, info, warn};
use nalgebra::{Point3, Vector3};

use raycaster::{Camera, CameraControls, RayTracer, Sampling, Scene, Viewport};

mod cli;
mod logger;

use cli::{Args, SceneArg};
use logger::init_logger;

fn main() {
    let args = Args::parse();
    init_logger(args.log_level.into());

    if let Err(e) = run(&args) {
        error!("{:#}", e);
        process::exit(1);
    }
}

fn run(args: &Args) -> anyhow::Result<()> {
    let (scene, camera) = match args.scene {
        SceneArg::Demo => (Scene::demo()?, demo_camera()),
        SceneArg::Mirrors => (Scene::mirrors()?, mirrors_camera()),
    };

    let sampling = Sampling::new(args.pattern.into(), args.samples)?;
    let viewport = Viewport::new(args.width, args.height)?;
    let mut tracer = RayTracer::new(camera, viewport, sampling)?;

    info!(
        "{} objects, {} materials, {} lights; {}x{} with {} {:?} samples",
        scene.objects().len(),
        scene.materials().len(),
        scene.lights().len(),
        args.width,
        args.height,
        sampling.count(),
        sampling.pattern()
    );

    tracer.render_frame(&scene)?;

    let mut controls = CameraControls::default();
    for key in args.keys.chars() {
        if let Some(edited) = controls.handle_key(key, tracer.camera()) {
            if let Err(e) = tracer.set_camera(edited) {
                warn!("Ignoring key '{}': {}", key, e);
            }
        }
        tracer.render_frame(&scene)?;
        info!("{}", controls.status(tracer.camera()));
    }

    let frame = tracer.render_frame(&scene)?;
    frame
        .to_image()
        .save(&args.output)
        .with_context(|| format!("failed to write {}", args.output))?;
    info!("Saved {}", args.output);

    Ok(())
}

fn demo_camera() -> Camera {
    Camera::new(
        Point3::new(0., -2., 0.),
        Point3::new(-203., -155., 104.),
        Vector3::new(0., 1., 0.),
        1.,
        800.,
        2.,
    )
}

fn mirrors_camera() -> Camera {
    Camera::new(
        Point3::new(0., 0., 0.),
        Point3::new(0., 3., 9.),
        Vector3::new(0., 1., 0.),
        1.,
        100.,
        40.,
    )
}
