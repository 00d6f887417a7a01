use ultraviolet::DVec3;

use crate::{
    primatives::{clamped, reflected, Ray},
    scene::Scene,
};

use super::RenderSettings;

/// Computes the colour seen along a ray.
pub trait ShadingModel: Send + Sync {
    fn trace(
        &self,
        scene: &Scene,
        settings: &RenderSettings,
        ray: &Ray,
        reflections_left: usize,
    ) -> DVec3;
}

/// Unlit diffuse colour of whatever the ray hits. No lights, shadows or
/// reflections.
#[derive(Clone, Copy, Debug, Default)]
pub struct FlatShadingModel;

impl ShadingModel for FlatShadingModel {
    fn trace(
        &self,
        scene: &Scene,
        settings: &RenderSettings,
        ray: &Ray,
        _reflections_left: usize,
    ) -> DVec3 {
        let min_hit = scene.closest_hit(ray);
        match min_hit.shape {
            Some(shape) => {
                let material = scene.material(shape.material());
                shape.color_at(ray.at(min_hit.distance), material)
            }
            None => settings.background,
        }
    }
}

/// Phong lighting from every point light with optional hard shadows and
/// mirror reflections.
#[derive(Clone, Copy, Debug, Default)]
pub struct PhongShadingModel;

impl ShadingModel for PhongShadingModel {
    fn trace(
        &self,
        scene: &Scene,
        settings: &RenderSettings,
        ray: &Ray,
        reflections_left: usize,
    ) -> DVec3 {
        let min_hit = scene.closest_hit(ray);
        let Some(shape) = min_hit.shape else {
            return settings.background;
        };

        let material = scene.material(shape.material());
        let hit = ray.at(min_hit.distance);
        let normal = min_hit.normal;

        let mut color = material.ambient;

        for light in scene.lights() {
            let l = (light.position - hit).normalized();
            let r = (normal * (2.0 * l.dot(normal)) - l).normalized();

            // The light only reaches us if the first thing it hits is this shape.
            if settings.shadows {
                let from_light = scene.closest_hit(&Ray::new(light.position, -l));
                if !from_light.same_shape(&min_hit) {
                    continue;
                }
            }

            let diffuse = l.dot(normal).max(0.0);
            color += shape.color_at(hit, material) * light.color * diffuse;

            let specular = r
                .dot(-ray.direction)
                .max(0.0)
                .powf(material.specular_exponent);
            color += material.specular * light.color * specular;
        }

        if reflections_left > 0 && material.is_reflective() {
            let bounce = Ray::new(hit, reflected(ray.direction, normal));
            color += self.trace(scene, settings, &bounce, reflections_left - 1) * material.specular;
        }

        clamped(color)
    }
}
