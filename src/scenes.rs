use std::path::Path;

use anyhow::{Context, Result};
use phongtracer::{
    model_loader::model_loader, Camera, Material, PointLight, Scene, Shape,
};
use ultraviolet::DVec3;

use crate::cli::{CliArguments, SceneKind};

/// Width of the visible image plane in world units, whatever the resolution.
const VIEW_WIDTH: f64 = 400.0;

pub fn build(args: &CliArguments) -> Result<(Scene, Camera)> {
    let scene = match args.scene {
        SceneKind::Spheres => spheres()?,
        SceneKind::Random => random(args.seed)?,
        SceneKind::Mesh => {
            let path = args
                .mesh
                .as_deref()
                .context("--scene mesh needs --mesh <file.obj>")?;
            mesh(path)?
        }
    };
    Ok((scene, camera(args)))
}

fn camera(args: &CliArguments) -> Camera {
    let pixel_size = VIEW_WIDTH / args.width.max(1) as f64;
    let camera = Camera::new(
        DVec3::new(0.0, pixel_size, 0.0),
        DVec3::new(200.0, 200.0, 1000.0),
        DVec3::new(200.0, 200.0, 0.0),
    )
    .with_image(args.width, args.height, args.supersamples);

    match args.aperture {
        Some(aperture) => camera.with_depth_of_field(aperture, args.aperture_samples),
        None => camera,
    }
}

fn white_light() -> PointLight {
    PointLight::new(DVec3::new(1.0, 1.0, 1.0), DVec3::new(-200.0, 600.0, 1500.0))
}

fn grey_floor(scene: &mut Scene) -> Result<()> {
    let grey = scene.add_material(Material::new(
        DVec3::new(0.08, 0.08, 0.08),
        DVec3::new(0.32, 0.32, 0.32),
        DVec3::new(0.75, 0.75, 0.75),
        256.0,
    ));
    scene.add_shape(Shape::sphere(DVec3::new(200.0, 200.0, -1000.0), 1000.0, grey))?;
    Ok(())
}

/// Ambient is a fifth of the diffuse colour.
fn plastic(diffuse: DVec3, specular: f64, exponent: f64) -> Material {
    Material::new(
        diffuse * 0.2,
        diffuse,
        DVec3::new(specular, specular, specular),
        exponent,
    )
}

fn spheres() -> Result<Scene> {
    let mut scene = Scene::new();
    scene.add_light(white_light());

    let balls = [
        (DVec3::new(90.0, 320.0, 100.0), DVec3::new(0.0, 0.0, 0.7), 0.5, 64.0),
        (DVec3::new(210.0, 270.0, 300.0), DVec3::new(0.0, 0.3, 0.0), 0.5, 8.0),
        (DVec3::new(290.0, 170.0, 150.0), DVec3::new(0.7, 0.0, 0.0), 0.5, 32.0),
        (DVec3::new(140.0, 220.0, 400.0), DVec3::new(0.8, 0.64, 0.0), 0.0, 1.0),
        (DVec3::new(110.0, 130.0, 200.0), DVec3::new(0.8, 0.4, 0.0), 0.5, 32.0),
    ];
    for (center, diffuse, specular, exponent) in balls {
        let mat = scene.add_material(plastic(diffuse, specular, exponent));
        scene.add_shape(Shape::sphere(center, 50.0, mat))?;
    }

    grey_floor(&mut scene)?;
    Ok(scene)
}

fn random(seed: u64) -> Result<Scene> {
    let rng = fastrand::Rng::with_seed(seed);
    let mut scene = Scene::new();
    scene.add_light(white_light());

    for _ in 0..24 {
        let center = DVec3::new(
            rng.f64() * 400.0,
            rng.f64() * 400.0,
            rng.f64() * 400.0,
        );
        let radius = 15.0 + rng.f64() * 35.0;
        let diffuse = DVec3::new(rng.f64(), rng.f64(), rng.f64()) * 0.8;
        let specular = if rng.bool() { 0.5 } else { 0.0 };
        let exponent = f64::from(rng.u32(1..=7)).exp2();

        let mat = scene.add_material(plastic(diffuse, specular, exponent));
        scene.add_shape(Shape::sphere(center, radius, mat))?;
    }

    grey_floor(&mut scene)?;
    Ok(scene)
}

fn mesh(path: &Path) -> Result<Scene> {
    let mut scene = Scene::new();
    scene.add_light(white_light());

    let mat = scene.add_material(plastic(DVec3::new(0.8, 0.4, 0.0), 0.3, 32.0));
    let model = model_loader(path, mat, DVec3::new(200.0, 200.0, 200.0), 150.0)
        .with_context(|| format!("failed to load {}", path.display()))?;
    scene.add_shape(model)?;

    grey_floor(&mut scene)?;
    Ok(scene)
}
