use std::io::Cursor;
use std::sync::Arc;

use phongtracer::{
    model_loader::read_model, Camera, FlatShadingModel, Material, PhongShadingModel, PointLight,
    Hittable, RenderError, RenderModel, Scene, Shape,
};
use ultraviolet::DVec3;

const BACKGROUND: DVec3 = DVec3 {
    x: 0.2,
    y: 0.3,
    z: 0.4,
};

/// 101x101 pixels looking down -z, 0.01 world units per pixel at z = -1.
fn camera() -> Camera {
    Camera::new(
        DVec3::new(0.0, 0.01, 0.0),
        DVec3::zero(),
        DVec3::new(0.0, 0.0, -1.0),
    )
    .with_image(101, 101, 1)
}

fn red_sphere_scene(occluder: bool) -> Scene {
    let mut scene = Scene::new();
    let red = scene.add_material(Material::new(
        DVec3::new(0.1, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::zero(),
        1.0,
    ));
    scene.add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, red)).unwrap();

    if occluder {
        let blue = scene.add_material(Material::new(
            DVec3::new(0.0, 0.0, 0.1),
            DVec3::new(0.0, 0.0, 1.0),
            DVec3::zero(),
            1.0,
        ));
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 3.2, -5.0), 1.5, blue)).unwrap();
    }

    scene.add_light(PointLight::new(
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::new(0.0, 5.0, -5.0),
    ));
    scene
}

fn phong_model(scene: Scene, shadows: bool) -> RenderModel<PhongShadingModel> {
    let mut model = RenderModel::new(PhongShadingModel);
    model.set_scene(Arc::new(scene));
    model.set_camera(camera());
    model.set_background(BACKGROUND);
    model.set_reflection_depth(0);
    if shadows {
        model.enable_shadows();
    }
    model
}

#[test]
fn lit_sphere_center_is_red_and_corners_are_background() {
    let image = phong_model(red_sphere_scene(false), false).render().unwrap();

    let center = image.get_pixel(50, 50);
    assert!(center.x >= 0.1, "center {center:?}");
    assert_eq!(center.y, 0.0);
    assert_eq!(center.z, 0.0);

    for (x, y) in [(0, 0), (100, 0), (0, 100), (100, 100)] {
        assert_eq!(image.get_pixel(x, y), BACKGROUND, "corner ({x}, {y})");
    }
}

#[test]
fn occluder_leaves_only_ambient() {
    // Row 35 looks slightly upward onto the lit top of the red sphere.
    let (x, y) = (50, 35);

    let lit = phong_model(red_sphere_scene(false), true).render().unwrap();
    let lit = lit.get_pixel(x, y);
    assert!(lit.x > 0.2, "expected direct light, got {lit:?}");

    let shadowed = phong_model(red_sphere_scene(true), true).render().unwrap();
    assert_eq!(shadowed.get_pixel(x, y), DVec3::new(0.1, 0.0, 0.0));
}

#[test]
fn shadows_off_ignores_occluder() {
    let (x, y) = (50, 35);
    let open = phong_model(red_sphere_scene(false), false).render().unwrap();
    let blocked = phong_model(red_sphere_scene(true), false).render().unwrap();
    assert_eq!(open.get_pixel(x, y), blocked.get_pixel(x, y));
}

#[test]
fn thread_count_does_not_change_the_image() {
    let mut model = phong_model(red_sphere_scene(true), true);
    model.set_camera(camera().with_image(41, 33, 3).with_depth_of_field(2.0, 5));
    model.set_reflection_depth(3);

    let single = model.render().unwrap();
    for threads in 1..=4 {
        let threaded = model.render_threaded(threads).unwrap();
        assert_eq!(single, threaded, "{threads} threads");
    }
}

/// Eye inside a huge unlit sphere: every sample sees the same ambient colour.
fn flat_model(supersamples: usize) -> RenderModel<PhongShadingModel> {
    let mut scene = Scene::new();
    let mat = scene.add_material(Material::new(
        DVec3::new(0.5, 0.25, 0.125),
        DVec3::new(1.0, 1.0, 1.0),
        DVec3::zero(),
        1.0,
    ));
    scene.add_shape(Shape::sphere(DVec3::zero(), 100.0, mat)).unwrap();

    let mut model = RenderModel::new(PhongShadingModel);
    model.set_scene(Arc::new(scene));
    model.set_camera(camera().with_image(9, 7, supersamples));
    model.set_reflection_depth(2);
    model
}

#[test]
fn supersampling_flat_scene_is_stable() {
    let once = flat_model(1).render().unwrap();
    let doubled = flat_model(2).render().unwrap();
    let simple = flat_model(0).render().unwrap();

    assert_eq!(once, doubled);
    assert_eq!(once, simple);
    assert!(once
        .pixels()
        .iter()
        .all(|p| *p == DVec3::new(0.5, 0.25, 0.125)));
}

#[test]
fn depth_of_field_flat_scene_is_stable() {
    let plain = flat_model(2).render().unwrap();

    let mut model = flat_model(2);
    model.set_camera(model.camera().with_depth_of_field(3.0, 3));
    assert_eq!(plain, model.render().unwrap());
}

#[test]
fn scene_shared_between_models() {
    let scene = Arc::new(red_sphere_scene(false));

    let mut phong = RenderModel::new(PhongShadingModel);
    phong.set_scene(scene.clone());
    phong.set_camera(camera());

    let mut flat = RenderModel::new(FlatShadingModel);
    flat.set_scene(scene);
    flat.set_camera(camera());

    assert_eq!(flat.render().unwrap().get_pixel(50, 50), DVec3::new(1.0, 0.0, 0.0));
    assert_ne!(
        phong.render().unwrap().get_pixel(50, 50),
        DVec3::new(1.0, 0.0, 0.0)
    );
}

#[test]
fn loaded_mesh_is_visible() {
    let obj = "v -1 -1 0\nv 1 -1 0\nv 1 1 0\nv -1 1 0\nf 1 2 3 4\n";

    let mut scene = Scene::new();
    let green = scene.add_material(Material::new(
        DVec3::zero(),
        DVec3::new(0.0, 1.0, 0.0),
        DVec3::zero(),
        1.0,
    ));
    // Offset so the centre ray stays clear of the diagonal between the two triangles.
    let position = DVec3::new(0.2, 0.1, -3.0);
    let mesh = read_model(Cursor::new(obj), green, position, 0.5).unwrap();
    scene.add_shape(mesh).unwrap();

    let mut model = RenderModel::new(FlatShadingModel);
    model.set_scene(Arc::new(scene));
    model.set_camera(camera());
    model.set_background(BACKGROUND);

    let image = model.render_threaded(2).unwrap();
    assert_eq!(image.get_pixel(50, 50), DVec3::new(0.0, 1.0, 0.0));
    assert_eq!(image.get_pixel(0, 0), BACKGROUND);
}

#[test]
fn render_without_scene_fails() {
    let model = RenderModel::new(PhongShadingModel);
    let err = model.render_threaded(2).unwrap_err();
    assert!(matches!(err, RenderError::NoScene));
    assert_eq!(err.to_string(), "no scene set");
}

#[test]
fn shape_with_material_from_another_scene_never_reaches_a_render() {
    let donor = red_sphere_scene(true);
    let blue = donor.shapes()[1].material();

    let mut scene = Scene::new();
    let err = scene
        .add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, blue))
        .unwrap_err();
    assert!(matches!(err, RenderError::UnknownMaterial { index: 1, count: 0 }));

    let mut model = RenderModel::new(PhongShadingModel);
    model.set_scene(Arc::new(scene));
    model.set_camera(camera().with_image(11, 11, 1));
    model.set_background(BACKGROUND);
    let image = model.render_threaded(2).unwrap();
    assert!(image.pixels().iter().all(|p| *p == BACKGROUND));
}
