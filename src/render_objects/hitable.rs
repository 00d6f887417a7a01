use ultraviolet::DVec3;

use crate::{
    materials::{Material, MaterialId},
    primatives::Ray,
};

pub trait Hittable {
    fn intersect(&self, ray: &Ray) -> Hit<'_>;
    fn material(&self) -> MaterialId;

    /// Diffuse colour at `point`. Surfaces are untextured, so this is the
    /// material's diffuse colour everywhere.
    fn color_at(&self, _point: DVec3, material: &Material) -> DVec3 {
        material.diffuse
    }
}

/// Result of an intersection test. A miss has no shape and an infinite
/// distance.
#[derive(Clone, Copy)]
pub struct Hit<'a> {
    pub shape: Option<&'a dyn Hittable>,
    pub distance: f64,
    pub normal: DVec3,
}

impl<'a> Hit<'a> {
    pub fn new(shape: &'a dyn Hittable, distance: f64, normal: DVec3) -> Self {
        Hit {
            shape: Some(shape),
            distance,
            normal,
        }
    }

    pub fn miss() -> Self {
        Hit {
            shape: None,
            distance: f64::INFINITY,
            normal: DVec3::zero(),
        }
    }

    pub fn is_hit(&self) -> bool {
        self.shape.is_some()
    }

    pub fn missed(&self) -> bool {
        self.shape.is_none()
    }

    /// Whether both hits landed on the very same primitive. Two misses
    /// compare equal.
    pub fn same_shape(&self, other: &Hit<'_>) -> bool {
        match (self.shape, other.shape) {
            (Some(a), Some(b)) => std::ptr::eq(
                a as *const dyn Hittable as *const u8,
                b as *const dyn Hittable as *const u8,
            ),
            (None, None) => true,
            _ => false,
        }
    }
}

impl std::fmt::Debug for Hit<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.missed() {
            return f.write_str("Hit(miss)");
        }
        f.debug_struct("Hit")
            .field("distance", &self.distance)
            .field("normal", &self.normal)
            .finish()
    }
}
