use std::fmt;

use ultraviolet::DVec3;

use crate::{
    error::RenderError,
    materials::{Material, MaterialId, MaterialStore},
    primatives::Ray,
    render_objects::{nearest, Hit, Hittable, Shape},
};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointLight {
    pub color: DVec3,
    pub position: DVec3,
}

impl PointLight {
    pub fn new(color: DVec3, position: DVec3) -> Self {
        Self { color, position }
    }
}

impl fmt::Display for PointLight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PointLight color: {:?} position: {:?}",
            self.color, self.position
        )
    }
}

/// Everything that can be rendered. Shapes, lights and materials are all
/// owned here and kept in insertion order.
///
/// A scene is only mutated while it is being set up; renders borrow it
/// read-only.
#[derive(Default)]
pub struct Scene {
    shapes: Vec<Shape>,
    lights: Vec<PointLight>,
    materials: MaterialStore,
}

impl Scene {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_material(&mut self, material: Material) -> MaterialId {
        self.materials.insert(material)
    }

    /// Fails if the shape, or any triangle of a mesh, uses a material that
    /// was not added to this scene. The shape is dropped in that case.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) -> Result<(), RenderError> {
        let shape = shape.into();
        let unknown = match &shape {
            Shape::Mesh(mesh) => std::iter::once(mesh.mat)
                .chain(mesh.tris.iter().map(|tri| tri.mat))
                .find(|id| !self.materials.contains(*id)),
            other => Some(other.material()).filter(|id| !self.materials.contains(*id)),
        };
        if let Some(id) = unknown {
            return Err(RenderError::UnknownMaterial {
                index: id.index(),
                count: self.materials.len(),
            });
        }

        self.shapes.push(shape);
        Ok(())
    }

    pub fn add_light(&mut self, light: PointLight) {
        self.lights.push(light);
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn lights(&self) -> &[PointLight] {
        &self.lights
    }

    pub fn material(&self, id: MaterialId) -> &Material {
        self.materials.get(id)
    }

    pub fn materials(&self) -> &MaterialStore {
        &self.materials
    }

    /// Nearest hit over every shape, by linear scan.
    ///
    /// Equal distances resolve to the shape added first. That order is
    /// incidental rather than a chosen policy.
    pub fn closest_hit(&self, ray: &Ray) -> Hit<'_> {
        nearest(self.shapes.iter().map(|shape| shape.intersect(ray)))
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Scene")?;
        writeln!(f, "    Objects: {}", self.shapes.len())?;
        writeln!(f, "    Lights: {}", self.lights.len())?;
        write!(f, "    Materials: {}", self.materials.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render_objects::MeshRenderObject;

    fn ray() -> Ray {
        Ray::new(DVec3::zero(), DVec3::new(0.0, 0.0, -1.0))
    }

    #[test]
    fn empty_scene_never_hits() {
        let scene = Scene::new();
        let hit = scene.closest_hit(&ray());
        assert!(hit.missed());
        assert_eq!(hit.distance, f64::INFINITY);
    }

    #[test]
    fn closest_of_several_spheres() {
        let mut scene = Scene::new();
        let mat = scene.add_material(Material::default());
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -10.0), 1.0, mat)).unwrap();
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, mat)).unwrap();
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 5.0, -3.0), 1.0, mat)).unwrap();

        let hit = scene.closest_hit(&ray());
        assert!((hit.distance - 4.0).abs() < 1e-9);
        assert!(hit.same_shape(&scene.shapes()[1].intersect(&ray())));
    }

    #[test]
    fn equal_distances_keep_first_shape() {
        let mut scene = Scene::new();
        let mat = scene.add_material(Material::default());
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, mat)).unwrap();
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, mat)).unwrap();

        let hit = scene.closest_hit(&ray());
        assert!(hit.same_shape(&scene.shapes()[0].intersect(&ray())));
    }

    #[test]
    fn ray_pointing_away_misses() {
        let mut scene = Scene::new();
        let mat = scene.add_material(Material::default());
        scene.add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, mat)).unwrap();

        let away = Ray::new(DVec3::zero(), DVec3::new(0.0, 0.0, 1.0));
        assert!(scene.closest_hit(&away).missed());
    }

    #[test]
    fn material_from_another_scene_is_rejected() {
        let mut other = Scene::new();
        other.add_material(Material::default());
        other.add_material(Material::default());
        let foreign = other.add_material(Material::default());

        let mut scene = Scene::new();
        let err = scene
            .add_shape(Shape::sphere(DVec3::new(0.0, 0.0, -5.0), 1.0, foreign))
            .unwrap_err();
        assert!(matches!(
            err,
            RenderError::UnknownMaterial { index: 2, count: 0 }
        ));
        assert!(scene.shapes().is_empty());
    }

    #[test]
    fn mesh_triangle_with_foreign_material_is_rejected() {
        let mut other = Scene::new();
        other.add_material(Material::default());
        let foreign = other.add_material(Material::default());

        let mut scene = Scene::new();
        let mat = scene.add_material(Material::default());
        let mut mesh = MeshRenderObject::new(mat);
        mesh.push(
            DVec3::new(-1.0, -1.0, -2.0),
            DVec3::new(1.0, -1.0, -2.0),
            DVec3::new(0.0, 1.0, -2.0),
        );
        mesh.tris[0].mat = foreign;

        assert!(matches!(
            scene.add_shape(mesh),
            Err(RenderError::UnknownMaterial { index: 1, count: 1 })
        ));
        assert!(scene.shapes().is_empty());
    }
}
